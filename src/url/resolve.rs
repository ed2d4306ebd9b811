use crate::HrefError;

/// Resolves an anchor href into an absolute URL on the crawl's terms
///
/// * empty hrefs and pure fragments (`#...`) are rejected
/// * protocol-relative hrefs (`//host/x`) take the seed's protocol
/// * root-relative hrefs (`/x`) become `protocol://domain/x`
/// * `http://` and `https://` links pass through unchanged
/// * anything else (`mailto:`, `javascript:`, bare relative paths) is rejected
///
/// A rejected href is simply dropped from the crawl.
///
/// # Examples
///
/// ```
/// use dead_link_hunter::url::resolve_href;
///
/// assert_eq!(
///     resolve_href("https", "example.com", "/about").unwrap(),
///     "https://example.com/about"
/// );
/// assert!(resolve_href("https", "example.com", "mailto:me@example.com").is_err());
/// ```
pub fn resolve_href(protocol: &str, domain: &str, href: &str) -> Result<String, HrefError> {
    let href = href.trim();

    if href.is_empty() {
        return Err(HrefError::Empty);
    }

    if href.starts_with('#') {
        return Err(HrefError::Fragment);
    }

    if href.starts_with("//") {
        return Ok(format!("{}:{}", protocol, href));
    }

    if href.starts_with('/') {
        return Ok(format!("{}://{}{}", protocol, domain, href));
    }

    if has_http_scheme(href) {
        return Ok(href.to_string());
    }

    Err(HrefError::Unrecognized(href.to_string()))
}

fn has_http_scheme(href: &str) -> bool {
    let prefix = |p: &str| {
        href.get(..p.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(p))
    };
    prefix("http://") || prefix("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_relative() {
        assert_eq!(
            resolve_href("http", "example.test", "/about").unwrap(),
            "http://example.test/about"
        );
    }

    #[test]
    fn test_absolute_passthrough() {
        assert_eq!(
            resolve_href("http", "example.test", "https://other.com/x?y=1").unwrap(),
            "https://other.com/x?y=1"
        );
        assert_eq!(
            resolve_href("http", "example.test", "HTTPS://example.test/").unwrap(),
            "HTTPS://example.test/"
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            resolve_href("https", "example.test", "//cdn.example.test/lib.js").unwrap(),
            "https://cdn.example.test/lib.js"
        );
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(
            resolve_href("http", "example.test", "  /team \n").unwrap(),
            "http://example.test/team"
        );
    }

    #[test]
    fn test_reject_empty() {
        assert_eq!(resolve_href("http", "example.test", ""), Err(HrefError::Empty));
        assert_eq!(resolve_href("http", "example.test", "   "), Err(HrefError::Empty));
    }

    #[test]
    fn test_reject_fragment() {
        assert_eq!(
            resolve_href("http", "example.test", "#top"),
            Err(HrefError::Fragment)
        );
    }

    #[test]
    fn test_reject_other_schemes() {
        for href in [
            "mailto:test@example.com",
            "javascript:void(0)",
            "tel:+1234567890",
            "ftp://example.test/file",
            "relative/path",
        ] {
            assert!(
                matches!(
                    resolve_href("http", "example.test", href),
                    Err(HrefError::Unrecognized(_))
                ),
                "expected {} to be rejected",
                href
            );
        }
    }
}
