//! Utility functions and helpers.

use url::Url;

/// Resolve a potentially relative href against a base address.
///
/// Absolute hrefs pass through untouched; anything else is resolved with
/// standard relative-reference rules, query and fragment included.
/// Returns `None` when no valid absolute URL can be produced.
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("https://example.com", "/roles/42"),
            Some("https://example.com/roles/42".to_string())
        );
        assert_eq!(
            resolve_url("https://example.com/path/", "page.html"),
            Some("https://example.com/path/page.html".to_string())
        );
        assert_eq!(
            resolve_url("https://example.com", "https://other.com/x"),
            Some("https://other.com/x".to_string())
        );
    }

    #[test]
    fn test_resolve_url_keeps_query_and_fragment() {
        assert_eq!(
            resolve_url("https://example.com", "/jobs?id=9&src=feed#details"),
            Some("https://example.com/jobs?id=9&src=feed#details".to_string())
        );
    }

    #[test]
    fn test_resolve_url_rejects_invalid_base() {
        assert_eq!(resolve_url("not a url", "/roles/42"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Software \n Engineer\t II "), "Software Engineer II");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
