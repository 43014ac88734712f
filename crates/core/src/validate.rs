//! URL validation.

use url::Url;

use crate::{BrevisError, Result};

/// Returns true if `url` is an absolute URL with both a scheme and a host.
///
/// Malformed input is simply invalid; this never panics or errors.
///
/// # Example
///
/// ```rust
/// use brevis_core::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/post"));
/// assert!(!is_valid_url("example.com/post"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    parse_url(url).is_ok()
}

/// Parses `url`, requiring a scheme and a non-empty host.
///
/// # Errors
///
/// Returns [`BrevisError::InvalidUrl`] describing what is missing.
pub fn parse_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).map_err(|e| BrevisError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !has_authority(trimmed) {
        return Err(BrevisError::InvalidUrl(format!("{}: missing host", url)));
    }

    if parsed.scheme().is_empty() {
        return Err(BrevisError::InvalidUrl(format!("{}: missing scheme", url)));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(BrevisError::InvalidUrl(format!("{}: missing host", url))),
    }
}

/// Whether the text after `scheme:` opens a non-empty `//authority` part.
///
/// The WHATWG parser fills in a host for inputs such as `http:example.com`
/// or `https:///example.com`, so the raw text is checked as written.
fn has_authority(url: &str) -> bool {
    let Some((_, rest)) = url.split_once(':') else {
        return false;
    };
    let Some(after_slashes) = rest.strip_prefix("//") else {
        return false;
    };
    let authority = after_slashes.split(['/', '?', '#']).next().unwrap_or_default();
    !authority.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://example.com")]
    #[case("https://example.com/blog/post?id=1#top")]
    #[case("https://sub.example.co.uk:8443/path")]
    #[case("http://127.0.0.1:8080/")]
    #[case("ftp://files.example.com/readme.txt")]
    fn test_valid_urls(#[case] url: &str) {
        assert!(is_valid_url(url), "{} should be valid", url);
    }

    #[rstest]
    #[case("")]
    #[case("example.com")]
    #[case("example.com/blog/post")]
    #[case("/relative/path")]
    #[case("https://")]
    #[case("mailto:someone@example.com")]
    #[case("file:///etc/hosts")]
    #[case("not a url at all")]
    #[case("http:example.com")]
    #[case("https:///example.com")]
    #[case("http:/example.com")]
    fn test_invalid_urls(#[case] url: &str) {
        assert!(!is_valid_url(url), "{} should be invalid", url);
    }

    #[test]
    fn test_parse_url_error_variant() {
        assert!(matches!(parse_url("example.com"), Err(BrevisError::InvalidUrl(_))));
        assert!(matches!(parse_url("mailto:a@b.c"), Err(BrevisError::InvalidUrl(_))));
    }
}
