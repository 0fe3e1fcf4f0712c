// src/crawl/visited.rs
// =============================================================================
// The set of urls already handled in one crawl session.
//
// Pages and images share the same set: an image url that was fetched is
// never followed as a link afterwards, and vice versa.
//
// The set only grows. A fresh one is created for every run, so nothing
// leaks between runs.
// =============================================================================

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Records `url` and reports whether it was new.
    ///
    /// Check and insert happen in one call, so a caller can never see
    /// "not visited" for a url that it then fails to claim.
    pub fn mark(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}
