//! URL handling module for doccrawl
//!
//! This module provides link normalization into canonical URLs and the scope
//! test that bounds a crawl.

mod normalize;
mod scope;

pub use normalize::{canonicalize, force_https, normalize_url};
pub use scope::{matches_any_root, Scope};

/// Returns the deduplication key for a canonical URL
///
/// Two canonical URLs that differ only by trailing slashes are the same crawl
/// target.
///
/// # Examples
///
/// ```
/// use doccrawl::url::dedup_key;
///
/// assert_eq!(dedup_key("https://a.test/doc/"), "https://a.test/doc");
/// assert_eq!(dedup_key("https://a.test/doc"), "https://a.test/doc");
/// ```
pub fn dedup_key(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Appends a trailing slash if the URL lacks one
pub fn directory_form(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
