//! End-of-run crawl summary

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Why the crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No URLs left to fetch
    FrontierExhausted,
    /// The seen set reached the discovery cap
    CapReached,
}

/// Counters and timing for one run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub termination: Termination,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Size of the seen set, seeds included
    pub discovered: usize,
    /// Bodies written to a content bucket
    pub stored: usize,
    /// URLs abandoned after a fetch failure
    pub failed: usize,
    /// Bodies dropped as unsupported content
    pub discarded: usize,
    /// Anchors written to the edge log
    pub edges: usize,
    /// SHA-256 of the configuration file the run used, if any
    pub config_hash: Option<String>,
}

impl CrawlSummary {
    /// Human-readable lines printed when the crawl ends
    pub fn report_lines(&self) -> Vec<String> {
        let seconds = self.elapsed.as_secs_f64();
        let mut lines = Vec::new();

        match self.termination {
            Termination::CapReached => {
                lines.push(format!(
                    "Time taken to identify {} URLs: {:.2} seconds",
                    self.discovered, seconds
                ));
            }
            Termination::FrontierExhausted => {
                lines.push("Crawling completed.".to_string());
                lines.push(format!("Total URLs crawled: {}", self.discovered));
                lines.push(format!("Time taken: {:.2} seconds", seconds));
            }
        }

        lines.push(format!(
            "Stored: {}, failed: {}, discarded: {}, edges: {}",
            self.stored, self.failed, self.discarded, self.edges
        ));
        if let Some(hash) = &self.config_hash {
            lines.push(format!("Configuration hash: {}", hash));
        }
        lines
    }
}

/// Prints the summary to standard output
pub fn print_summary(summary: &CrawlSummary) {
    for line in summary.report_lines() {
        println!("{}", line);
    }
}
