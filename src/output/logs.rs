//! Line-oriented crawl logs
//!
//! Three plain-text logs are (re)created at the start of every run:
//! - discovered: one URL per newly queued link
//! - edges: `<source> <target>` for every extracted anchor
//! - crawled: one URL per stored body, in fetch order
//!
//! Each log is line-buffered so a line is on disk as soon as it is recorded.
//! Write failures are logged and never abort the crawl.

use crate::config::OutputConfig;
use crate::CrawlError;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

/// A single append-only log file
#[derive(Debug)]
struct LogFile {
    path: PathBuf,
    writer: LineWriter<File>,
}

impl LogFile {
    fn create(path: PathBuf) -> Result<Self, CrawlError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CrawlError::OutputFile {
                path: path.clone(),
                source,
            })?;
        }

        let file = File::create(&path).map_err(|source| CrawlError::OutputFile {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            writer: LineWriter::new(file),
        })
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{}", line) {
            tracing::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush {}: {}", self.path.display(), e);
        }
    }
}

/// The discovered, edge and crawled logs of one run
#[derive(Debug)]
pub struct CrawlLog {
    discovered: LogFile,
    edges: LogFile,
    crawled: LogFile,
}

impl CrawlLog {
    /// Creates (truncating) all three logs
    pub fn create(
        discovered: impl AsRef<Path>,
        edges: impl AsRef<Path>,
        crawled: impl AsRef<Path>,
    ) -> Result<Self, CrawlError> {
        Ok(Self {
            discovered: LogFile::create(discovered.as_ref().to_path_buf())?,
            edges: LogFile::create(edges.as_ref().to_path_buf())?,
            crawled: LogFile::create(crawled.as_ref().to_path_buf())?,
        })
    }

    pub fn from_config(config: &OutputConfig) -> Result<Self, CrawlError> {
        Self::create(
            config.discovered_log_path(),
            config.edges_log_path(),
            config.crawled_log_path(),
        )
    }

    /// Records a URL newly admitted to the frontier
    pub fn record_discovered(&mut self, url: &str) {
        self.discovered.write_line(url);
    }

    /// Records an extracted anchor, whatever happened to it afterwards
    pub fn record_edge(&mut self, source: &str, target: &str) {
        self.edges.write_line(&format!("{} {}", source, target));
    }

    /// Records a URL whose body was stored
    pub fn record_crawled(&mut self, url: &str) {
        self.crawled.write_line(url);
    }

    pub fn flush(&mut self) {
        self.discovered.flush();
        self.edges.flush();
        self.crawled.flush();
    }
}
