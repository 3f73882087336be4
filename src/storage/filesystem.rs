use crate::storage::layout::{flattened_dir_name, StorageLayout, INDEX_FILE};
use crate::storage::Bucket;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use url::Url;

/// Counts reported by [`ContentStore::flatten_directory_pages`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Directory pages moved to a flat file
    pub moved: usize,
    /// Directories removed without an index file to move
    pub removed_empty: usize,
}

/// Writes fetched bodies into the content buckets
#[derive(Debug, Clone)]
pub struct ContentStore {
    layout: StorageLayout,
}

impl ContentStore {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    /// Creates both bucket directories
    pub fn ensure_buckets(&self) -> io::Result<()> {
        fs::create_dir_all(&self.layout.special_dir)?;
        fs::create_dir_all(&self.layout.page_dir)?;
        Ok(())
    }

    /// Computes where `url` is stored in `bucket`
    pub fn path_for(&self, url: &Url, bucket: Bucket) -> PathBuf {
        self.layout.path_for(url, bucket)
    }

    /// Stores `body` for `url`, replacing any earlier content at that path
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The file the body was written to
    /// * `Err(io::Error)` - The directory or file could not be written
    pub fn store(&self, url: &Url, bucket: Bucket, body: &str) -> io::Result<PathBuf> {
        let path = self.path_for(url, bucket);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&path)?;
        file.write_all(body.as_bytes())?;
        file.flush()?;

        tracing::trace!("Stored {} ({} bytes) at {}", url, body.len(), path.display());
        Ok(path)
    }

    /// Moves directory-style pages out of their directories
    ///
    /// Every directory directly inside the page bucket is removed. If it
    /// holds an `index.html`, that file is first moved next to it under the
    /// flattened name (`doc_ugen_.html/index.html` → `doc_ugen.html`),
    /// overwriting an existing file of that name.
    pub fn flatten_directory_pages(&self) -> io::Result<FlattenReport> {
        let page_dir = &self.layout.page_dir;
        let mut report = FlattenReport::default();

        let mut dirs = Vec::new();
        for entry in fs::read_dir(page_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry);
            }
        }

        for entry in dirs {
            let dir_path = entry.path();
            let index_path = dir_path.join(INDEX_FILE);

            // Read before removing: the directory may share the target name
            let content = if index_path.is_file() {
                Some(fs::read(&index_path)?)
            } else {
                None
            };

            fs::remove_dir_all(&dir_path)?;

            match content {
                Some(content) => {
                    let name = flattened_dir_name(&entry.file_name().to_string_lossy());
                    let target = page_dir.join(name);
                    fs::write(&target, content)?;
                    tracing::info!("Moved {} -> {}", index_path.display(), target.display());
                    report.moved += 1;
                }
                None => {
                    tracing::info!("No {} in {}, removed", INDEX_FILE, dir_path.display());
                    report.removed_empty += 1;
                }
            }
        }

        Ok(report)
    }
}
