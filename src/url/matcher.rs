use percent_encoding::percent_decode_str;
use url::Url;

/// Checks if a host matches a domain pattern
///
/// Two kinds of patterns are supported:
/// 1. Exact match: "wiki.example" matches only "wiki.example"
/// 2. Wildcard match: "*.wiki.example" matches the bare domain and any
///    subdomain at any depth
///
/// # Examples
///
/// ```
/// use wiki_trawl::url::matches_wildcard;
///
/// assert!(matches_wildcard("wiki.example", "wiki.example"));
/// assert!(!matches_wildcard("wiki.example", "other.example"));
///
/// assert!(matches_wildcard("*.fandom.com", "fandom.com"));
/// assert!(matches_wildcard("*.fandom.com", "civilization.fandom.com"));
/// assert!(!matches_wildcard("*.fandom.com", "notfandom.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || (candidate.len() > base.len()
                    && candidate.ends_with(base)
                    && candidate[..candidate.len() - base.len()].ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// Returns the lowercase host of a URL, if it has one
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Builds the string that article markers are matched against
///
/// Only the path takes part: it is percent-decoded so `%28Civ5%29` and
/// `(Civ5)` compare equal, and a single trailing slash is dropped so
/// `/Rome_(Civ5)/` still ends with the marker. Query strings never count.
pub fn match_target(url: &Url) -> String {
    let decoded = percent_decode_str(url.path()).decode_utf8_lossy();
    match decoded.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => decoded.into_owned(),
    }
}
