//! Frontier management
//!
//! The frontier is the FIFO backlog of canonical URLs waiting to be fetched.
//! It owns the seen set (dedup keys of every URL ever admitted) and the
//! discovery cap, so scope, dedup and cap checks all happen in one place.

use crate::url::{canonicalize, dedup_key, directory_form, Scope};
use std::collections::{HashSet, VecDeque};

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Newly admitted and appended to the queue
    Queued,
    /// Its dedup key was already admitted
    Duplicate,
    /// No allowed root matches it
    OutOfScope,
    /// The seen set is already at the cap
    CapReached,
    /// A seed that has no canonical form
    Invalid,
}

/// FIFO frontier with deduplication and a discovery cap
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<String>,
    seen: HashSet<String>,
    scope: Scope,
    max_urls: usize,
}

impl Frontier {
    /// Creates an empty frontier bounded by `scope` and `max_urls`
    pub fn new(scope: Scope, max_urls: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            seen: HashSet::new(),
            scope,
            max_urls,
        }
    }

    /// Admits a seed URL
    ///
    /// The seed is coerced to directory form and canonicalized, then goes
    /// through the same scope, dedup and cap checks as a discovered link.
    pub fn enqueue_seed(&mut self, seed: &str) -> Admission {
        let canonical = match canonicalize(&directory_form(seed)) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping seed {}: {}", seed, e);
                return Admission::Invalid;
            }
        };

        let admission = self.record_discovery(canonical.as_str());
        match admission {
            Admission::Queued => tracing::debug!("Seeded frontier with {}", canonical),
            Admission::OutOfScope => {
                tracing::warn!("Seed {} is outside the allowed roots", canonical)
            }
            Admission::Duplicate => tracing::debug!("Duplicate seed {}", canonical),
            Admission::CapReached => {
                tracing::warn!("Seed {} dropped, discovery cap already reached", canonical)
            }
            Admission::Invalid => {}
        }
        admission
    }

    /// Pops the oldest queued URL, or `None` once the frontier is exhausted
    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Offers a canonical URL found on a page
    ///
    /// Only a `Queued` result mutates the frontier. Callers must check
    /// [`Frontier::is_full`] after every `Queued` result and stop fetching
    /// once it returns true.
    pub fn record_discovery(&mut self, url: &str) -> Admission {
        if !self.scope.contains(url) {
            return Admission::OutOfScope;
        }

        let key = dedup_key(url);
        if self.seen.contains(key) {
            return Admission::Duplicate;
        }

        if self.is_full() {
            return Admission::CapReached;
        }

        self.seen.insert(key.to_string());
        self.queue.push_back(url.to_string());
        Admission::Queued
    }

    /// True once the seen set has reached the discovery cap
    pub fn is_full(&self) -> bool {
        self.seen.len() >= self.max_urls
    }

    /// Number of URLs ever admitted, seeds included
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of URLs still waiting to be fetched
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn max_urls(&self) -> usize {
        self.max_urls
    }

    pub fn has_seen(&self, url: &str) -> bool {
        self.seen.contains(dedup_key(url))
    }
}
