use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a resolved link into its crawl-target identity
///
/// Two links name the same page iff their normalized strings are equal. The
/// scheme and host are lowercased, a default port is dropped, an empty path
/// becomes `/`, and the fragment is removed. Query strings are kept since
/// they usually select different content.
///
/// # Examples
///
/// ```
/// use dead_link_hunter::url::normalize_target;
///
/// let url = normalize_target("HTTP://Example.COM:80/docs#intro").unwrap();
/// assert_eq!(url, "http://example.com/docs");
/// ```
pub fn normalize_target(url_str: &str) -> UrlResult<String> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    Ok(url.into())
}
