use serde::Deserialize;
use std::path::PathBuf;

/// Default allowed root when no configuration file is given
pub const DEFAULT_ALLOWED_ROOT: &str = "https://chuck.stanford.edu/doc/";

/// Default identifying request header
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:12.0) Gecko/20100101 Firefox/12.0";

/// Main configuration structure for doccrawl
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// How a URL is tested against the allowed roots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeMode {
    /// Literal string-prefix match
    #[default]
    Prefix,
    /// Prefix match that must end on a path boundary
    Segment,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL prefixes that bound the crawl
    #[serde(rename = "allowed-roots")]
    pub allowed_roots: Vec<String>,

    /// Matching rule applied to `allowed_roots`
    #[serde(rename = "scope-mode")]
    pub scope_mode: ScopeMode,

    /// Extension of files stored raw in the special bucket and never parsed
    #[serde(rename = "special-extension")]
    pub special_extension: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            allowed_roots: vec![DEFAULT_ALLOWED_ROOT.to_string()],
            scope_mode: ScopeMode::Prefix,
            special_extension: ".ck".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value sent in the `User-Agent` header
    pub header: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
///
/// Bucket directories and log files are resolved relative to `base_dir`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(rename = "base-dir")]
    pub base_dir: PathBuf,

    /// Bucket for special-extension files
    #[serde(rename = "special-dir")]
    pub special_dir: String,

    /// Bucket for HTML pages
    #[serde(rename = "page-dir")]
    pub page_dir: String,

    /// One line per newly queued URL
    #[serde(rename = "discovered-log")]
    pub discovered_log: String,

    /// One `<source> <target>` line per extracted anchor
    #[serde(rename = "edges-log")]
    pub edges_log: String,

    /// One line per stored URL, in fetch order
    #[serde(rename = "crawled-log")]
    pub crawled_log: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            special_dir: "ck_files".to_string(),
            page_dir: "html_files".to_string(),
            discovered_log: "crawler.output".to_string(),
            edges_log: "links.output".to_string(),
            crawled_log: "crawled.txt".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn special_path(&self) -> PathBuf {
        self.base_dir.join(&self.special_dir)
    }

    pub fn page_path(&self) -> PathBuf {
        self.base_dir.join(&self.page_dir)
    }

    pub fn discovered_log_path(&self) -> PathBuf {
        self.base_dir.join(&self.discovered_log)
    }

    pub fn edges_log_path(&self) -> PathBuf {
        self.base_dir.join(&self.edges_log)
    }

    pub fn crawled_log_path(&self) -> PathBuf {
        self.base_dir.join(&self.crawled_log)
    }
}
