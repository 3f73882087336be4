use crate::config::{CrawlerConfig, ScopeMode};

/// The set of URL prefixes a crawl is allowed to visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    roots: Vec<String>,
    mode: ScopeMode,
}

impl Scope {
    /// Creates a scope from an ordered list of roots
    pub fn new(roots: Vec<String>, mode: ScopeMode) -> Self {
        Self { roots, mode }
    }

    /// Creates a literal-prefix scope
    pub fn prefix(roots: Vec<String>) -> Self {
        Self::new(roots, ScopeMode::Prefix)
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.allowed_roots.clone(), config.scope_mode)
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    /// Returns true if `url` falls under at least one root
    ///
    /// In [`ScopeMode::Prefix`] this is a raw string-prefix test, so a root of
    /// `https://a.test/doc` also admits `https://a.test/doc2/`. Roots that end
    /// in `/` avoid that. [`ScopeMode::Segment`] additionally requires the
    /// match to end on a path boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use doccrawl::url::Scope;
    ///
    /// let scope = Scope::prefix(vec!["https://a.test/doc".to_string()]);
    /// assert!(scope.contains("https://a.test/doc/index.html"));
    /// assert!(scope.contains("https://a.test/doc2/index.html"));
    /// assert!(!scope.contains("https://a.test/blog/"));
    /// ```
    pub fn contains(&self, url: &str) -> bool {
        match self.mode {
            ScopeMode::Prefix => matches_any_root(url, &self.roots),
            ScopeMode::Segment => self
                .roots
                .iter()
                .any(|root| matches_on_boundary(url, root)),
        }
    }
}

/// Literal prefix test against every root
pub fn matches_any_root(url: &str, roots: &[String]) -> bool {
    roots.iter().any(|root| url.starts_with(root.as_str()))
}

fn matches_on_boundary(url: &str, root: &str) -> bool {
    match url.strip_prefix(root) {
        Some(rest) => {
            root.ends_with('/') || rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')
        }
        None => false,
    }
}
