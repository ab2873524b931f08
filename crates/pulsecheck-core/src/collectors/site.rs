//! Site vitality collector: domain age, reachability, sitemap, blog
//! presence, and last detectable content update.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::warn;

use crate::classify;
use crate::gateways::{FetchOutcome, Gateways};
use crate::page::{Anchor, PageSnapshot};
use crate::signals::{Reachability, SiteSignals};
use crate::url_utils::{resolve_href, Subject};

pub async fn collect(subject: &Subject, gateways: &Gateways, now: DateTime<Utc>) -> SiteSignals {
    let mut signals = SiteSignals::default();

    match gateways.registration.creation_date(&subject.host).await {
        Ok(created) => {
            let days = (now - created).num_days();
            signals.domain_age_years = Some((days / 365).max(0));
        }
        Err(err) => {
            warn!(host = %subject.host, %err, "domain registration lookup failed");
        }
    }

    match gateways.fetch.fetch(&subject.origin).await {
        FetchOutcome::Success { status, body, .. } => {
            signals.reachable = Some(Reachability {
                success: true,
                status: Some(status),
            });
            let snapshot = PageSnapshot::parse(&body);

            let sitemap_url = format!("{}/sitemap.xml", subject.origin);
            signals.sitemap_found = gateways.fetch.fetch(&sitemap_url).await.is_success();

            let blog_anchor =
                classify::find_keyword_link(&snapshot.anchors, classify::BLOG_KEYWORDS).cloned();
            signals.blog_found = blog_anchor.is_some();

            signals.last_update_days =
                last_update_days(&snapshot, blog_anchor.as_ref(), subject, gateways, now).await;
        }
        FetchOutcome::Failure { status, error } => {
            // No further probes: sitemap/blog/last-update stay at their
            // unknown/not-found defaults.
            warn!(origin = %subject.origin, %error, "homepage unreachable");
            signals.reachable = Some(Reachability {
                success: false,
                status,
            });
        }
    }

    signals
}

/// Days since the most recent content update, preferring a structured
/// modification timestamp on the homepage, falling back to the newest
/// `<time datetime>` on the linked blog page.
async fn last_update_days(
    snapshot: &PageSnapshot,
    blog_anchor: Option<&Anchor>,
    subject: &Subject,
    gateways: &Gateways,
    now: DateTime<Utc>,
) -> Option<i64> {
    let meta_modified = snapshot
        .meta("article:modified_time")
        .or_else(|| snapshot.meta("last-modified"));
    if let Some(raw) = meta_modified {
        if let Some(at) = parse_timestamp(raw) {
            return Some((now - at).num_days().max(0));
        }
        warn!(raw, "unparseable modification timestamp");
    }

    let anchor = blog_anchor?;
    let blog_url = resolve_href(&subject.origin, &anchor.href)?;
    match gateways.fetch.fetch(&blog_url).await {
        FetchOutcome::Success { body, .. } => {
            let blog = PageSnapshot::parse(&body);
            let latest = blog
                .time_datetimes()
                .iter()
                .filter_map(|raw| parse_timestamp(raw))
                .max()?;
            Some((now - latest).num_days().max(0))
        }
        FetchOutcome::Failure { error, .. } => {
            warn!(url = %blog_url, %error, "blog page unreachable");
            None
        }
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::testing::{gateways, FailingFetch, FakeRegistration, FakeRepos, StaticFetch};
    use chrono::Duration;

    fn subject() -> Subject {
        Subject {
            origin: "https://example.com".to_string(),
            host: "example.com".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        assert!(parse_timestamp("2025-06-01T10:00:00Z").is_some());
        assert!(parse_timestamp("2025-06-01").is_some());
        assert!(parse_timestamp("last tuesday").is_none());
    }

    #[tokio::test]
    async fn homepage_failure_defaults_everything_without_further_calls() {
        let now = fixed_now();
        let registration = FakeRegistration {
            created: Some(now - Duration::days(5 * 365 + 10)),
        };
        let gw = gateways(FailingFetch, FakeRepos::default(), registration);

        let signals = collect(&subject(), &gw, now).await;

        assert_eq!(signals.domain_age_years, Some(5));
        assert_eq!(
            signals.reachable,
            Some(Reachability {
                success: false,
                status: None
            })
        );
        assert!(!signals.sitemap_found);
        assert!(!signals.blog_found);
        assert_eq!(signals.last_update_days, None);
    }

    #[tokio::test]
    async fn registration_failure_is_an_unknown_age_not_a_collector_failure() {
        let fetch = StaticFetch::default().with_page(
            "https://example.com",
            "<html><body><p>hello</p></body></html>",
        );
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let signals = collect(&subject(), &gw, fixed_now()).await;

        assert_eq!(signals.domain_age_years, None);
        assert!(signals.reachable.unwrap().success);
    }

    #[tokio::test]
    async fn prefers_meta_modification_timestamp() {
        let html = r#"
            <html>
                <head><meta property="article:modified_time" content="2026-07-22T12:00:00Z"></head>
                <body><a href="/blog">Blog</a></body>
            </html>
        "#;
        let fetch = StaticFetch::default().with_page("https://example.com", html);
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let signals = collect(&subject(), &gw, fixed_now()).await;

        assert_eq!(signals.last_update_days, Some(10));
        assert!(signals.blog_found);
    }

    #[tokio::test]
    async fn falls_back_to_newest_blog_time_element() {
        let home = r#"<html><body><a href="/blog">Our Blog</a></body></html>"#;
        let blog = r#"
            <html><body>
                <time datetime="2026-06-02T00:00:00Z">June 2</time>
                <time datetime="2026-07-12T12:00:00Z">July 12</time>
                <time datetime="not a date">?</time>
            </body></html>
        "#;
        let fetch = StaticFetch::default()
            .with_page("https://example.com", home)
            .with_page("https://example.com/blog", blog);
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let signals = collect(&subject(), &gw, fixed_now()).await;

        assert_eq!(signals.last_update_days, Some(20));
    }

    #[tokio::test]
    async fn sitemap_probe_is_boolean_only() {
        let fetch = StaticFetch::default()
            .with_page("https://example.com", "<html><body></body></html>")
            .with_page("https://example.com/sitemap.xml", "<urlset></urlset>");
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let signals = collect(&subject(), &gw, fixed_now()).await;

        assert!(signals.sitemap_found);
        assert!(!signals.blog_found);
        assert_eq!(signals.last_update_days, None);
    }
}
