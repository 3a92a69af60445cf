use crate::UrlError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Bytes re-encoded when a decoded path is written back
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Normalizes a URL into the identity used for visited-set deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed. Parsing already lowercases the
///    scheme and host, drops default ports and resolves `.`/`..` segments
/// 2. Accept only `http` and `https`
/// 3. Require a host
/// 4. Remove the fragment (everything after #)
/// 5. Rewrite the path in one canonical encoding and drop one trailing `/`
///
/// Step 5 makes the identity agree with the classifier's match target, so
/// `/Rome_(Civ5)`, `/Rome_(Civ5)/` and `/Rome_%28Civ5%29` are one URL.
/// Letter case in the path and query strings are kept.
///
/// # Examples
///
/// ```
/// use wiki_trawl::url::normalize_url;
///
/// let url = normalize_url("https://WIKI.EXAMPLE/Page_(Civ5)#History").unwrap();
/// assert_eq!(url.as_str(), "https://wiki.example/Page_(Civ5)");
///
/// let url = normalize_url("https://wiki.example/Page_%28Civ5%29/").unwrap();
/// assert_eq!(url.as_str(), "https://wiki.example/Page_(Civ5)");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    let path = canonical_path(url.path());
    if path != url.path() {
        url.set_path(&path);
    }

    Ok(url)
}

/// Decodes the path and re-encodes it with `PATH`, minus one trailing slash
///
/// A path that does not decode to UTF-8 keeps its original encoding.
fn canonical_path(raw: &str) -> String {
    let encoded = match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => utf8_percent_encode(&decoded, PATH).to_string(),
        Err(_) => raw.to_string(),
    };

    match encoded.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => encoded,
    }
}
