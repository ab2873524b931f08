use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Canonical identity of the site under analysis.
///
/// All collectors key their work off the normalized origin; registry
/// lookups use the bare hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// Origin the collectors fetch against (scheme + host + optional port).
    pub origin: String,
    /// Hostname with a leading `www.` stripped, used for registration lookups.
    pub host: String,
}

#[derive(Debug, Error)]
pub enum SubjectError {
    #[error("not a valid http(s) URL: {0}")]
    Invalid(String),
}

/// Normalize an input URL (or bare domain) to a [`Subject`].
///
/// A missing scheme defaults to `https://`. Path, query, and fragment are
/// discarded; the origin keeps port information.
pub fn normalize_subject(input: &str) -> Result<Subject, SubjectError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SubjectError::Invalid(input.to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|_| SubjectError::Invalid(input.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SubjectError::Invalid(input.to_string()));
    }
    let host = parsed
        .host_str()
        .ok_or_else(|| SubjectError::Invalid(input.to_string()))?;

    let origin = parsed
        .origin()
        .ascii_serialization()
        .trim_end_matches('/')
        .to_string();
    let host = host.strip_prefix("www.").unwrap_or(host).to_string();

    Ok(Subject { origin, host })
}

/// Resolve an anchor href against the subject origin.
///
/// Absolute URLs pass through; relative ones are joined onto the origin.
pub fn resolve_href(origin: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(&format!("{origin}/")).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}
