//! Business health collector: four signals derived from a single
//! homepage snapshot.

use tracing::warn;

use crate::classify;
use crate::gateways::{FetchOutcome, Gateways};
use crate::page::PageSnapshot;
use crate::signals::BusinessSnapshot;
use crate::url_utils::Subject;

pub async fn collect(subject: &Subject, gateways: &Gateways) -> Option<BusinessSnapshot> {
    let body = match gateways.fetch.fetch(&subject.origin).await {
        FetchOutcome::Success { body, .. } => body,
        FetchOutcome::Failure { error, .. } => {
            warn!(origin = %subject.origin, %error, "homepage unreachable, no business signals");
            return None;
        }
    };

    let snapshot = PageSnapshot::parse(&body);
    let text = snapshot.text.to_lowercase();

    let emails = classify::extract_emails(&text);
    let support_email = classify::preferred_support_email(&emails).cloned();

    Some(BusinessSnapshot {
        support_email,
        careers_found: classify::find_keyword_link(&snapshot.anchors, classify::CAREER_KEYWORDS)
            .is_some(),
        social_platforms: classify::detect_social(&text, &snapshot.anchors),
        legal_found: classify::find_keyword_link(&snapshot.anchors, classify::LEGAL_KEYWORDS)
            .is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::testing::{gateways, FailingFetch, FakeRegistration, FakeRepos, StaticFetch};
    use crate::signals::SocialPlatform;

    fn subject() -> Subject {
        Subject {
            origin: "https://example.com".to_string(),
            host: "example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn homepage_failure_yields_an_empty_bag() {
        let gw = gateways(FailingFetch, FakeRepos::default(), FakeRegistration::default());
        assert!(collect(&subject(), &gw).await.is_none());
    }

    #[tokio::test]
    async fn derives_all_four_signals_from_one_snapshot() {
        let html = r#"
            <html><body>
                <p>Questions? Reach us at support@example.com or hello@example.com.</p>
                <a href="/careers">Join us</a>
                <a href="https://www.linkedin.com/company/example">LinkedIn</a>
                <a href="https://twitter.com/example">Twitter</a>
                <a href="/privacy">Privacy Policy</a>
            </body></html>
        "#;
        let fetch = StaticFetch::default().with_page("https://example.com", html);
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let snapshot = collect(&subject(), &gw).await.unwrap();

        assert_eq!(snapshot.support_email.as_deref(), Some("support@example.com"));
        assert!(snapshot.careers_found);
        assert_eq!(
            snapshot.social_platforms,
            [SocialPlatform::LinkedIn, SocialPlatform::Twitter]
        );
        assert!(snapshot.legal_found);
    }

    #[tokio::test]
    async fn sparse_page_still_returns_a_populated_snapshot() {
        let fetch = StaticFetch::default()
            .with_page("https://example.com", "<html><body><p>Hello.</p></body></html>");
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let snapshot = collect(&subject(), &gw).await.unwrap();

        assert_eq!(snapshot.support_email, None);
        assert!(!snapshot.careers_found);
        assert!(snapshot.social_platforms.is_empty());
        assert!(!snapshot.legal_found);
    }
}
