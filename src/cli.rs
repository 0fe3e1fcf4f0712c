// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the Cli struct below IS the argument list, and
// clap generates the parser (plus --help and --version) from it.
//
// Usage:
//   button-spider [-s] [-i FILE]... [-o DIR] [-W WIDTH] [-H HEIGHT]
//                 [-F FOLLOW] [-D DEPTH] [--timeout SECS]
//                 [--user-agent AGENT] [--json] [URL]...
// =============================================================================

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use button_spider::config::{DEFAULT_HEIGHT, DEFAULT_MAX_DEPTH, DEFAULT_WIDTH};
use button_spider::{CrawlTarget, FollowRule, SpiderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "button-spider",
    version,
    about = "Crawl websites and collect images of an exact pixel size",
    long_about = "button-spider follows links breadth-first from the given pages and downloads \
                  every image that is exactly WIDTH x HEIGHT pixels. By default it hunts 88x31 \
                  buttons and only follows links to *.neocities.org."
)]
pub struct Cli {
    /// Pages to start crawling from
    pub urls: Vec<String>,

    /// Read more start pages from a file, one url per line
    ///
    /// Can be given several times. These are crawled after the urls on the
    /// command line.
    #[arg(short, long = "input", value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Save matching images (and an index.txt) into this directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Don't print IMAGE / LINK / ERROR events
    #[arg(short, long)]
    pub silent: bool,

    /// Image width to collect, in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Image height to collect, in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Only follow links matching this regular expression
    ///
    /// Without it, only http(s) links to *.neocities.org are followed.
    #[arg(short = 'F', long, value_name = "REGEX")]
    pub follow: Option<String>,

    /// Maximum crawl depth
    ///
    /// Start pages are depth 0, so depth 1 = just the start pages,
    /// depth 2 = start pages + the pages they link to, etc.
    #[arg(short = 'D', long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// Give up on a single request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Print a JSON summary instead of the plain url list
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Command line urls first, then the contents of each --input file
    pub fn seed_targets(&self) -> Result<Vec<CrawlTarget>> {
        let mut urls = self.urls.clone();

        for path in &self.input {
            let content = fs::read_to_string(path)
                .with_context(|| format!("could not read input file {}", path.display()))?;
            urls.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(urls.into_iter().map(CrawlTarget::seed).collect())
    }

    pub fn spider_config(&self) -> Result<SpiderConfig> {
        let mut config = SpiderConfig::default()
            .with_size(self.width, self.height)
            .with_max_depth(self.depth);

        if let Some(pattern) = &self.follow {
            config = config.with_follow(FollowRule::pattern(pattern)?);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent.as_str());
        }

        Ok(config)
    }
}
