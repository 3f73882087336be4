//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - The raw `href` of every anchor, in document order
//! - Page title (logged for context)
//!
//! Resolution and canonicalization happen later in the coordinator, against
//! the page's final URL.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw href values of `<a href>` elements, same-page fragments removed
    pub hrefs: Vec<String>,
}

/// Parses HTML content and extracts anchor targets
///
/// # Link Extraction Rules
///
/// **Include:**
/// - every `<a href="...">`, anywhere in the document, in document order
///
/// **Exclude:**
/// - hrefs that start with `#` (same-page fragments)
///
/// Everything else (`mailto:`, relative paths, other hosts) is returned as
/// written; the normalizer and scope test decide what survives.
///
/// # Example
///
/// ```
/// use doccrawl::crawler::parse_page;
///
/// let html = r##"<html><head><title>Test</title></head>
///     <body><a href="ugen.html">UGens</a><a href="#top">Top</a></body></html>"##;
/// let parsed = parse_page(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.hrefs, vec!["ugen.html".to_string()]);
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        hrefs: extract_hrefs(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts anchor hrefs, skipping same-page fragment links
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.starts_with('#'))
        .map(str::to_string)
        .collect()
}
