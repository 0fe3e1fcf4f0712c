// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// There are two families:
// - CrawlError: something went wrong with ONE url (a page or an image).
//   These never stop a crawl. The scanner turns them into `error` events
//   and moves on to the next url.
// - ConfigError: the configuration itself is unusable. These are returned
//   from Spider::new before anything is fetched.
// =============================================================================

use thiserror::Error;

/// A failure tied to a single url during a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The page response is not something we can treat as HTML
    #[error("could not parse {url} as HTML: {reason}")]
    Parse { url: String, reason: String },

    /// The image bytes are not a format we can read dimensions from
    #[error("could not read image dimensions of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: imagesize::ImageError,
    },

    /// A reference that cannot be turned into an absolute url
    #[error("malformed url '{reference}': {reason}")]
    MalformedUrl { reference: String, reason: String },
}

impl CrawlError {
    /// The url (or raw reference) this error is about
    pub fn url(&self) -> &str {
        match self {
            CrawlError::Fetch { url, .. }
            | CrawlError::Status { url, .. }
            | CrawlError::Parse { url, .. }
            | CrawlError::Decode { url, .. } => url,
            CrawlError::MalformedUrl { reference, .. } => reference,
        }
    }

    /// True for the network side of the taxonomy (transport or HTTP status)
    pub fn is_fetch(&self) -> bool {
        matches!(self, CrawlError::Fetch { .. } | CrawlError::Status { .. })
    }
}

/// Problems found while building a Spider.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid follow pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("target {axis} must be greater than zero")]
    ZeroDimension { axis: &'static str },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
