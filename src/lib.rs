// src/lib.rs
// =============================================================================
// button-spider: crawl web pages breadth-first and collect every image of
// one exact pixel size (88x31 buttons unless told otherwise).
//
// Modules:
// - crawl: the engine (visited set, follow rules, scanner, queue)
// - fetch: HTTP, HTML reference extraction, image dimensions
// - config: SpiderConfig and its defaults
// - error: CrawlError / ConfigError
// - output: console events and the image directory writer
//
// Example:
//
//   let spider = Spider::new(SpiderConfig::default())?;
//   let images = spider
//       .run(vec![CrawlTarget::seed("https://someone.neocities.org/")], &Silent)
//       .await;
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod output;

pub use config::SpiderConfig;
pub use crawl::{
    Crawl, CrawlEvent, CrawlResult, CrawlTarget, FollowRule, Observer, QualifiedImage, Silent,
    Spider, VisitedSet,
};
pub use error::{ConfigError, CrawlError};
