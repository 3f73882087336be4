//! Configuration module for doccrawl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and reading the seed file.
//!
//! # Example
//!
//! ```no_run
//! use doccrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("doccrawl.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.request_timeout_secs);
//! ```

mod parser;
mod seeds;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, ScopeMode, UserAgentConfig, DEFAULT_ALLOWED_ROOT,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use seeds::{load_seeds, parse_seeds};
