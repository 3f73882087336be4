use crate::config::OutputConfig;
use crate::storage::Bucket;
use std::path::{Path, PathBuf};
use url::Url;

/// File written inside the directory of a directory-style URL
pub const INDEX_FILE: &str = "index.html";

/// Suffixes accepted as-is in the page bucket
const PAGE_SUFFIXES: &[&str] = &[".html", ".htm"];

/// Suffix appended to page names that lack one of [`PAGE_SUFFIXES`]
const DEFAULT_PAGE_SUFFIX: &str = ".html";

/// Where the two content buckets live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub special_dir: PathBuf,
    pub page_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(special_dir: impl Into<PathBuf>, page_dir: impl Into<PathBuf>) -> Self {
        Self {
            special_dir: special_dir.into(),
            page_dir: page_dir.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.special_path(), config.page_path())
    }

    pub fn bucket_dir(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Special => &self.special_dir,
            Bucket::Page => &self.page_dir,
        }
    }

    /// Maps a URL to the file its body is stored in
    ///
    /// The URL path is flattened into a single file name (`/doc/ugen/sinosc.html`
    /// becomes `doc_ugen_sinosc.html`). Directory-style URLs get their own
    /// directory holding an `index.html`.
    ///
    /// # Examples
    ///
    /// ```
    /// use doccrawl::storage::{Bucket, StorageLayout};
    /// use std::path::Path;
    /// use url::Url;
    ///
    /// let layout = StorageLayout::new("ck_files", "html_files");
    ///
    /// let url = Url::parse("https://a.test/doc/examples/foo.ck").unwrap();
    /// assert_eq!(layout.path_for(&url, Bucket::Special), Path::new("ck_files/doc_examples_foo.ck"));
    ///
    /// let url = Url::parse("https://a.test/doc/ugen/").unwrap();
    /// assert_eq!(layout.path_for(&url, Bucket::Page), Path::new("html_files/doc_ugen_.html/index.html"));
    /// ```
    pub fn path_for(&self, url: &Url, bucket: Bucket) -> PathBuf {
        let path = url.path();
        let name = flat_name(path, bucket);
        let dir = self.bucket_dir(bucket);

        if path.ends_with('/') {
            dir.join(name).join(INDEX_FILE)
        } else {
            dir.join(name)
        }
    }
}

/// Flattens a URL path into a single file name
fn flat_name(path: &str, bucket: Bucket) -> String {
    let mut name = path.trim_start_matches('/').replace('/', "_");

    if name.is_empty() {
        name = INDEX_FILE.to_string();
    }

    if bucket == Bucket::Page && !PAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        name.push_str(DEFAULT_PAGE_SUFFIX);
    }

    name
}

/// Name a directory-style page takes once flattened to a plain file
///
/// `doc_ugen_.html` becomes `doc_ugen.html`; names not produced from a
/// directory-style URL are returned unchanged.
pub fn flattened_dir_name(dir_name: &str) -> String {
    match dir_name.strip_suffix("_.html") {
        Some(stem) if !stem.is_empty() => format!("{}.html", stem),
        _ => dir_name.to_string(),
    }
}
