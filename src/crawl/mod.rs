// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Features:
// - Breadth-first crawling from one or more seed urls
// - Link following controlled by a FollowRule
// - Depth limit: pages at depth >= max_depth are never fetched
// - Image collection: only images of exactly the configured size are kept
//
// Pieces, leaf first:
// - visited: urls already handled in this session
// - follow: which links get queued
// - qualify: fetch an image and check its size
// - scanner: one page in, next targets and qualifying images out
// - queue: the FIFO driver that keeps calling the scanner
//
// Everything runs one url at a time. The only waiting happens in fetches,
// and nothing else runs while a fetch is in flight.
// =============================================================================

mod follow;
mod qualify;
mod queue;
mod scanner;
mod visited;

pub use follow::{FollowRule, DEFAULT_FOLLOW_SUFFIX};
pub use queue::Crawl;
pub use scanner::Spider;
pub use visited::VisitedSet;

use crate::error::CrawlError;

/// A page waiting to be scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    /// Link hops from the seed it was found through (seeds are 0)
    pub depth: usize,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    pub fn seed(url: impl Into<String>) -> Self {
        Self::new(url, 0)
    }
}

/// An image whose dimensions matched the target exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedImage {
    pub url: String,
    pub bytes: Vec<u8>,
}

/// What one scan produced, both lists in document order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    pub next: Vec<CrawlTarget>,
    pub images: Vec<QualifiedImage>,
}

impl CrawlResult {
    pub fn is_empty(&self) -> bool {
        self.next.is_empty() && self.images.is_empty()
    }
}

/// Notifications sent while scanning. They are informational only;
/// nothing an observer does feeds back into the crawl.
#[derive(Debug, Clone, Copy)]
pub enum CrawlEvent<'a> {
    /// A qualifying image was found
    Image { url: &'a str },
    /// A link was accepted and queued
    Link { url: &'a str },
    /// A page or image could not be handled
    Error { url: &'a str, error: &'a CrawlError },
}

impl<'a> CrawlEvent<'a> {
    pub fn url(&self) -> &'a str {
        match *self {
            CrawlEvent::Image { url } | CrawlEvent::Link { url } | CrawlEvent::Error { url, .. } => url,
        }
    }
}

/// Receives CrawlEvents synchronously, at the point of discovery.
pub trait Observer {
    fn notify(&self, event: &CrawlEvent<'_>);
}

impl<F> Observer for F
where
    F: Fn(&CrawlEvent<'_>),
{
    fn notify(&self, event: &CrawlEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {
    fn notify(&self, _event: &CrawlEvent<'_>) {}
}
