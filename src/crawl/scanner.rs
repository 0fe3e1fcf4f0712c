// src/crawl/scanner.rs
// =============================================================================
// Scans a single page.
//
// How it works:
// 1. Stop right away if the page is too deep or was already scanned
// 2. Fetch the page and pull out every <a href> and <img src>
// 3. Resolve each reference against the page's origin
// 4. Links that pass the FollowRule become targets one level deeper
// 5. Images are downloaded one by one and kept if their size matches
//
// Nothing in here is fatal. A page that fails to load gives an empty
// result plus an `error` event; a bad image or a malformed reference gives
// an `error` event and the loop moves on.
//
// Rust concepts:
// - &mut VisitedSet: the session owns the set, the scanner borrows it
// - &dyn Observer: callers plug in whatever they want to hear events
// =============================================================================

use tracing::warn;
use url::Url;

use super::qualify::qualify;
use super::{CrawlEvent, CrawlResult, CrawlTarget, Observer, VisitedSet};
use crate::config::SpiderConfig;
use crate::error::{ConfigError, CrawlError};
use crate::fetch::{extract_refs, resolve, Fetcher};

/// A configured crawler. Holds no per-run state, so one Spider can
/// run any number of independent crawls.
#[derive(Debug, Clone)]
pub struct Spider {
    config: SpiderConfig,
    fetcher: Fetcher,
}

impl Spider {
    /// Validates `config` and builds the HTTP client
    pub fn new(config: SpiderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fetcher = Fetcher::new(config.timeout, config.user_agent.as_deref())?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &SpiderConfig {
        &self.config
    }

    // Scans one page
    //
    // Parameters:
    //   url: the page to scan
    //   depth: link hops from the seed
    //   visited: the session's visited set
    //   observer: receives link / image / error events
    //
    // Returns: the accepted links (at depth + 1) and the qualifying images
    pub async fn scan(
        &self,
        url: &str,
        depth: usize,
        visited: &mut VisitedSet,
        observer: &dyn Observer,
    ) -> CrawlResult {
        let mut result = CrawlResult::default();

        if depth >= self.config.max_depth {
            return result;
        }

        let page = match Url::parse(url) {
            Ok(page) => page,
            Err(e) => {
                let error = CrawlError::MalformedUrl {
                    reference: url.to_string(),
                    reason: e.to_string(),
                };
                report(observer, &error);
                return result;
            }
        };

        // Claim the page. Someone queued it twice; the first one wins.
        if !visited.mark(page.as_str()) {
            return result;
        }

        let html = match self.fetcher.fetch_page(&page).await {
            Ok(html) => html,
            Err(error) => {
                report(observer, &error);
                return result;
            }
        };
        let refs = extract_refs(&html);

        for href in &refs.links {
            let link = match resolve(href, &page) {
                Ok(link) => link,
                Err(error) => {
                    report(observer, &error);
                    continue;
                }
            };

            if !self.config.follow.accepts(link.as_str(), visited) {
                continue;
            }

            observer.notify(&CrawlEvent::Link { url: link.as_str() });
            result.next.push(CrawlTarget::new(link.to_string(), depth + 1));
        }

        for src in &refs.images {
            let image_url = match resolve(src, &page) {
                Ok(image_url) => image_url,
                Err(error) => {
                    report(observer, &error);
                    continue;
                }
            };

            match qualify(&self.fetcher, &self.config, visited, &image_url).await {
                Ok(Some(image)) => {
                    observer.notify(&CrawlEvent::Image { url: &image.url });
                    result.images.push(image);
                }
                Ok(None) => {}
                Err(error) => report(observer, &error),
            }
        }

        result
    }
}

fn report(observer: &dyn Observer, error: &CrawlError) {
    warn!(url = error.url(), "{}", error);
    observer.notify(&CrawlEvent::Error {
        url: error.url(),
        error,
    });
}
