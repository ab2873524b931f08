//! Pure content classifiers over extracted text and anchors.
//!
//! Collectors hand these functions the output of [`crate::page`]; nothing
//! here performs I/O, so every rule is testable with canned markup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::page::Anchor;
use crate::signals::SocialPlatform;

/// Keywords that mark a blog or news section.
pub const BLOG_KEYWORDS: &[&str] = &["blog", "news", "updates", "changelog"];

/// Keywords that mark an active hiring page.
pub const CAREER_KEYWORDS: &[&str] = &["careers", "jobs", "hiring", "join us", "work with us"];

/// Keywords that mark terms-of-service / privacy pages.
pub const LEGAL_KEYWORDS: &[&str] = &["terms", "privacy", "legal"];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").expect("invalid email regex")
});

static REPO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"github\.com/([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)").expect("invalid repo regex")
});

// Bounded on the left so hosts like box.com do not read as x.com.
static X_DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^A-Za-z0-9.])x\.com").expect("invalid x.com regex"));

/// First anchor whose href or visible text contains any keyword,
/// case-insensitive.
pub fn find_keyword_link<'a>(anchors: &'a [Anchor], keywords: &[&str]) -> Option<&'a Anchor> {
    anchors.iter().find(|anchor| {
        let href = anchor.href.to_lowercase();
        let text = anchor.text.to_lowercase();
        keywords
            .iter()
            .any(|keyword| href.contains(keyword) || text.contains(keyword))
    })
}

/// First GitHub owner/repo path linked from the page, trailing `.git`
/// stripped. Links to bare profiles (one path segment) do not count.
pub fn find_repo_link(anchors: &[Anchor]) -> Option<String> {
    anchors.iter().find_map(|anchor| {
        let captures = REPO_RE.captures(&anchor.href)?;
        let path = captures.get(1)?.as_str();
        Some(path.trim_end_matches(".git").to_string())
    })
}

/// All email-like tokens in the text, in order of appearance.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}

/// Pick the support address: prefer one mentioning support/help/contact,
/// else the first one found.
pub fn preferred_support_email(emails: &[String]) -> Option<&String> {
    emails
        .iter()
        .find(|email| {
            let email = email.to_lowercase();
            email.contains("support") || email.contains("help") || email.contains("contact")
        })
        .or_else(|| emails.first())
}

/// Social platforms referenced anywhere in the page text or anchor hrefs.
pub fn detect_social(text: &str, anchors: &[Anchor]) -> Vec<SocialPlatform> {
    let text = text.to_lowercase();
    let hrefs: Vec<String> = anchors
        .iter()
        .map(|anchor| anchor.href.to_lowercase())
        .collect();

    let mentions = |needle: &str| {
        text.contains(needle) || hrefs.iter().any(|href| href.contains(needle))
    };
    let mentions_x = || {
        X_DOMAIN_RE.is_match(&text) || hrefs.iter().any(|href| X_DOMAIN_RE.is_match(href))
    };

    let mut platforms = Vec::new();
    if mentions("linkedin.com") {
        platforms.push(SocialPlatform::LinkedIn);
    }
    if mentions("twitter.com") || mentions_x() {
        platforms.push(SocialPlatform::Twitter);
    }
    if mentions("facebook.com") {
        platforms.push(SocialPlatform::Facebook);
    }
    platforms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(href: &str, text: &str) -> Anchor {
        Anchor {
            href: href.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn keyword_link_matches_href_or_text() {
        let anchors = vec![
            anchor("/about", "About"),
            anchor("/latest", "Company News"),
            anchor("/blog", "Read more"),
        ];

        let hit = find_keyword_link(&anchors, BLOG_KEYWORDS).unwrap();
        assert_eq!(hit.href, "/latest"); // "Company News" matched on text

        assert!(find_keyword_link(&anchors, CAREER_KEYWORDS).is_none());
    }

    #[test]
    fn keyword_link_is_case_insensitive() {
        let anchors = vec![anchor("/Careers", "JOIN US")];
        assert!(find_keyword_link(&anchors, CAREER_KEYWORDS).is_some());
    }

    #[test]
    fn repo_link_requires_owner_and_repo() {
        let anchors = vec![
            anchor("https://github.com/acme", "Profile"),
            anchor("https://github.com/acme/widget.git", "Source"),
        ];
        assert_eq!(find_repo_link(&anchors).as_deref(), Some("acme/widget"));
    }

    #[test]
    fn repo_link_ignores_deep_paths_beyond_owner_repo() {
        let anchors = vec![anchor("https://github.com/acme/widget/issues/42", "Issues")];
        assert_eq!(find_repo_link(&anchors).as_deref(), Some("acme/widget"));
    }

    #[test]
    fn repo_link_absent_when_no_github_anchor() {
        let anchors = vec![anchor("https://gitlab.com/acme/widget", "Source")];
        assert_eq!(find_repo_link(&anchors), None);
    }

    #[test]
    fn extracts_emails_in_order() {
        let emails = extract_emails("write hello@acme.io or support@acme.io today");
        assert_eq!(emails, ["hello@acme.io", "support@acme.io"]);
    }

    #[test]
    fn prefers_support_flavored_email() {
        let emails = vec!["hello@acme.io".to_string(), "support@acme.io".to_string()];
        assert_eq!(
            preferred_support_email(&emails).map(String::as_str),
            Some("support@acme.io")
        );

        let generic = vec!["sales@acme.io".to_string()];
        assert_eq!(
            preferred_support_email(&generic).map(String::as_str),
            Some("sales@acme.io")
        );
        assert_eq!(preferred_support_email(&[]), None);
    }

    #[test]
    fn detects_platforms_in_text_and_hrefs() {
        let anchors = vec![anchor("https://www.linkedin.com/company/acme", "LinkedIn")];
        let platforms = detect_social("follow us on twitter.com/acme", &anchors);
        assert_eq!(
            platforms,
            [SocialPlatform::LinkedIn, SocialPlatform::Twitter]
        );
    }

    #[test]
    fn x_domain_needs_a_boundary() {
        assert!(detect_social("files on box.com", &[]).is_empty());
        assert_eq!(
            detect_social("find us at x.com/acme", &[]),
            [SocialPlatform::Twitter]
        );
        assert_eq!(
            detect_social("", &[anchor("https://x.com/acme", "X")]),
            [SocialPlatform::Twitter]
        );
    }
}
