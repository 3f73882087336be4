//! Content routing
//!
//! Decides, from the final URL and the Content-Type header alone, whether a
//! fetched body is stored, parsed, or dropped.

use crate::storage::Bucket;

/// Media type that marks a body as an HTML page
const HTML_MEDIA_TYPE: &str = "text/html";

/// What to do with a fetched body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Special-extension file: store raw, never parse
    Special,
    /// HTML page: store, then extract links
    Page,
    /// Anything else: discard
    Unsupported,
}

impl Route {
    /// The content bucket this route stores into, if any
    pub fn bucket(self) -> Option<Bucket> {
        match self {
            Self::Special => Some(Bucket::Special),
            Self::Page => Some(Bucket::Page),
            Self::Unsupported => None,
        }
    }

    pub fn should_parse(self) -> bool {
        matches!(self, Self::Page)
    }
}

/// Classifies a fetched response
///
/// The extension check runs on the URL path (query excluded) and wins over
/// whatever Content-Type the server declared.
///
/// # Examples
///
/// ```
/// use doccrawl::crawler::{route, Route};
///
/// assert_eq!(route("https://a.test/doc/x.ck", "text/plain", ".ck"), Route::Special);
/// assert_eq!(route("https://a.test/doc/", "text/html; charset=utf-8", ".ck"), Route::Page);
/// assert_eq!(route("https://a.test/doc/x.png", "image/png", ".ck"), Route::Unsupported);
/// ```
pub fn route(final_url: &str, content_type: &str, special_extension: &str) -> Route {
    if url_path(final_url).ends_with(special_extension) {
        return Route::Special;
    }

    if is_html(content_type) {
        return Route::Page;
    }

    Route::Unsupported
}

/// True if the Content-Type header starts with the HTML media type
pub fn is_html(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..HTML_MEDIA_TYPE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(HTML_MEDIA_TYPE))
}

/// Returns the URL without its query string and fragment
fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
