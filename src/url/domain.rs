use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the protocol and comparison domain from a URL
///
/// The domain is the lowercase host with a leading `www.` label removed. An
/// explicit non-default port stays attached (`127.0.0.1:8080`) so that two
/// servers on one host are treated as different sites.
///
/// # Returns
///
/// * `Ok((protocol, domain))` - e.g. `("https", "example.com")`
/// * `Err(UrlError)` - The URL is malformed, not HTTP(S), or has no host
///
/// # Examples
///
/// ```
/// use dead_link_hunter::url::extract_protocol_and_domain;
///
/// let (protocol, domain) = extract_protocol_and_domain("https://WWW.Example.com/a").unwrap();
/// assert_eq!(protocol, "https");
/// assert_eq!(domain, "example.com");
/// ```
pub fn extract_protocol_and_domain(url_str: &str) -> UrlResult<(String, String)> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let domain = scope_domain(&url).ok_or(UrlError::MissingDomain)?;
    Ok((url.scheme().to_string(), domain))
}

/// Returns true iff `candidate` parses and its `www.`-stripped host equals `domain`
///
/// There is no subdomain wildcarding: `blog.example.com` is not in scope of
/// `example.com`.
pub fn is_in_scope(domain: &str, candidate: &str) -> bool {
    Url::parse(candidate)
        .ok()
        .and_then(|url| scope_domain(&url))
        .is_some_and(|candidate_domain| candidate_domain == domain)
}

fn scope_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        return None;
    }

    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
