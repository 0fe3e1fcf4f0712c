// src/crawl/follow.rs
// =============================================================================
// Decides which discovered links are worth crawling.
//
// A rule can be built three ways:
// - a regex, matched anywhere in the absolute url string
// - a host suffix ("host ends with example.org")
// - any function from url to bool
//
// All three end up as the same thing: a shared closure. Pattern rules are
// compiled once when the rule is built, so a bad pattern is reported before
// the crawl starts.
//
// The "not visited yet" half of link acceptance lives in `accepts`, which
// only READS the visited set. Marking happens when a page is scanned.
// =============================================================================

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use url::Url;

use super::VisitedSet;
use crate::error::ConfigError;

/// Host suffix followed when no rule is configured
pub const DEFAULT_FOLLOW_SUFFIX: &str = ".neocities.org";

type Predicate = dyn Fn(&str) -> bool + Send + Sync;

#[derive(Clone)]
pub struct FollowRule {
    predicate: Arc<Predicate>,
    description: String,
}

impl FollowRule {
    /// Follows urls where `pattern` matches somewhere in the url string
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)?;
        Ok(Self {
            description: format!("pattern /{}/", pattern),
            predicate: Arc::new(move |url: &str| regex.is_match(url)),
        })
    }

    /// Follows http(s) urls whose host ends with `suffix`
    pub fn host_suffix(suffix: &str) -> Self {
        let suffix = suffix.to_ascii_lowercase();
        Self {
            description: format!("host suffix {}", suffix),
            predicate: Arc::new(move |url: &str| {
                Url::parse(url)
                    .ok()
                    .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
                    .and_then(|parsed| parsed.host_str().map(|host| host.ends_with(&suffix)))
                    .unwrap_or(false)
            }),
        }
    }

    /// Follows whatever `predicate` says yes to
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            description: "custom predicate".to_string(),
            predicate: Arc::new(predicate),
        }
    }

    /// Does the rule itself match this url?
    pub fn matches(&self, url: &str) -> bool {
        (self.predicate)(url)
    }

    /// Full link acceptance: not visited yet, and matched by the rule
    pub fn accepts(&self, url: &str, visited: &VisitedSet) -> bool {
        !visited.contains(url) && self.matches(url)
    }
}

impl Default for FollowRule {
    fn default() -> Self {
        Self::host_suffix(DEFAULT_FOLLOW_SUFFIX)
    }
}

impl fmt::Debug for FollowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FollowRule").field(&self.description).finish()
    }
}
