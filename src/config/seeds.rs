use crate::CrawlError;
use std::path::Path;

/// Reads seed URLs from a file, one per non-blank line
///
/// Lines are trimmed; blank lines are skipped. Order is preserved since it
/// decides the breadth-first order of the crawl.
pub fn load_seeds(path: &Path) -> crate::Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| CrawlError::SeedFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_seeds(&content))
}

/// Splits seed file content into trimmed, non-blank lines
pub fn parse_seeds(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
