use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a raw link into doccrawl's canonical URL form
///
/// # Normalization Steps
///
/// 1. Strip the fragment (everything after `#`)
/// 2. Reject the link if nothing is left
/// 3. Resolve it against `base` (scheme/host inheritance, `.`/`..` collapsing)
/// 4. Decode and re-encode each path segment so equivalent encodings
///    collapse to one form (an escaped `/` stays escaped)
/// 5. Rebuild as `https://authority/path`: `http` is upgraded, other schemes
///    are rejected, the query string is dropped
///
/// Trailing slashes are kept exactly as resolution produced them.
///
/// # Arguments
///
/// * `href` - The raw link, as found in an `href` attribute
/// * `base` - The URL of the page the link was found on
///
/// # Returns
///
/// * `Ok(String)` - The canonical URL
/// * `Err(UrlError)` - The link has no canonical form and should be skipped
///
/// # Examples
///
/// ```
/// use doccrawl::url::normalize_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.test/doc/sub/page.html").unwrap();
/// let url = normalize_url("../other.ck", &base).unwrap();
/// assert_eq!(url, "https://example.test/doc/other.ck");
///
/// let url = normalize_url("http://example.test/a%7eb/#top", &base).unwrap();
/// assert_eq!(url, "https://example.test/a~b/");
/// ```
pub fn normalize_url(href: &str, base: &Url) -> UrlResult<String> {
    let link = strip_fragment(href);
    if link.is_empty() {
        return Err(UrlError::Empty);
    }

    let resolved = base.join(link).map_err(|e| UrlError::Parse(e.to_string()))?;

    match resolved.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }

    let host = resolved.host_str().ok_or(UrlError::MissingHost)?;

    let mut canonical = String::from("https://");

    if !resolved.username().is_empty() {
        canonical.push_str(resolved.username());
        if let Some(password) = resolved.password() {
            canonical.push(':');
            canonical.push_str(password);
        }
        canonical.push('@');
    }

    canonical.push_str(host);

    // 443 becomes the default port once the scheme is https
    if let Some(port) = resolved.port().filter(|&p| p != 443) {
        canonical.push(':');
        canonical.push_str(&port.to_string());
    }

    canonical.push_str(&reencode_path(resolved.path()));

    Ok(canonical)
}

/// Canonicalizes an absolute URL (resolved against itself)
pub fn canonicalize(url: &str) -> UrlResult<Url> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;
    let canonical = normalize_url(url, &parsed)?;
    Url::parse(&canonical).map_err(|e| UrlError::Parse(e.to_string()))
}

/// Rewrites a leading `http://` to `https://`, leaving everything else as-is
///
/// Used on the final URL reported after redirects, which is not otherwise
/// normalized.
pub fn force_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Returns everything before the first `#`
fn strip_fragment(href: &str) -> &str {
    match href.find('#') {
        Some(idx) => &href[..idx],
        None => href,
    }
}

/// Re-encodes a path segment by segment
///
/// The path is split on `/` before decoding, so an escaped `%2F` stays
/// inside its segment and can never introduce a new `..` segment. Each
/// segment keeps only unreserved characters literal. Invalid UTF-8 left
/// after decoding is replaced with U+FFFD.
fn reencode_path(path: &str) -> String {
    path.split('/')
        .map(reencode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn reencode_segment(segment: &str) -> String {
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    urlencoding::encode(&String::from_utf8_lossy(&decoded)).into_owned()
}
