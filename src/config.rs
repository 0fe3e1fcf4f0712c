// src/config.rs
// =============================================================================
// Settings for one Spider. They are fixed for the whole run.
//
// Defaults are the classic 88x31 web button, five link hops deep, following
// only *.neocities.org pages.
// =============================================================================

use std::time::Duration;

use crate::crawl::FollowRule;
use crate::error::ConfigError;

pub const DEFAULT_WIDTH: u32 = 88;
pub const DEFAULT_HEIGHT: u32 = 31;
pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    /// Exact image width to collect, in pixels
    pub width: u32,
    /// Exact image height to collect, in pixels
    pub height: u32,
    /// Pages at this depth or deeper are not fetched
    pub max_depth: usize,
    /// Which discovered links get queued
    pub follow: FollowRule,
    /// Per-request timeout. None waits as long as the server takes.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_depth: DEFAULT_MAX_DEPTH,
            follow: FollowRule::default(),
            timeout: None,
            user_agent: None,
        }
    }
}

impl SpiderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_follow(mut self, follow: FollowRule) -> Self {
        self.follow = follow;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Checks everything that can be checked without touching the network
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroDimension { axis: "width" });
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroDimension { axis: "height" });
        }
        // a zero timeout would fail every request
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// True when an image of this size is one we collect
    pub fn is_target_size(&self, width: usize, height: usize) -> bool {
        width == self.width as usize && height == self.height as usize
    }
}
