//! Content storage for fetched bodies
//!
//! Bodies are written as plain files into one of two buckets: files with the
//! special extension, and HTML pages. URL paths are flattened into single
//! file names so the bucket never mirrors the site's directory depth.

mod filesystem;
mod layout;

pub use filesystem::{ContentStore, FlattenReport};
pub use layout::{flattened_dir_name, StorageLayout, INDEX_FILE};

/// One of the two content buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Special-extension files, stored raw
    Special,
    /// HTML pages
    Page,
}
