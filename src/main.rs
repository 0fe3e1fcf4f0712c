// src/main.rs
// =============================================================================
// This is the entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build a Spider from them (bad settings stop us before any request)
// 3. Crawl one page at a time, printing progress and saving images
// 4. Print every matching image url (or a JSON summary)
// 5. Exit with proper code (0 = done, 1 = no urls given, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use button_spider::output::{ConsoleObserver, ImageWriter};
use button_spider::Spider;
use cli::Cli;

/// One entry of the --json summary
#[derive(Debug, Serialize)]
struct ImageSummary {
    url: String,
    bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    images: Vec<ImageSummary>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with the url list on stdout.
// RUST_LOG=button_spider=info shows one line per scanned page.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let seeds = cli.seed_targets()?;
    if seeds.is_empty() {
        println!("No URLs provided.");
        return Ok(1);
    }

    let spider = Spider::new(cli.spider_config()?)?;

    // JSON mode keeps stdout clean for the summary
    let quiet = cli.silent || cli.json;
    let observer = ConsoleObserver::new(quiet);

    let mut writer = match &cli.output {
        Some(dir) => Some(ImageWriter::create(dir)?),
        None => None,
    };

    // Images are written as soon as their page is done, so only their
    // summaries stay in memory
    let mut found = Vec::new();
    let mut crawl = spider.crawl(seeds);
    while let Some((target, result)) = crawl.step(&observer).await {
        if !result.is_empty() && !cli.json {
            println!("Scanned {} (depth {})", target.url, target.depth);
        }

        for image in result.images {
            let file = match writer.as_mut() {
                Some(writer) => writer.write(&image)?,
                None => None,
            };
            found.push(ImageSummary {
                bytes: image.bytes.len(),
                url: image.url,
                file: file.map(|path| path.display().to_string()),
            });
        }
    }

    if cli.json {
        let summary = RunSummary { images: found };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for image in &found {
            println!("{}", image.url);
        }
    }

    Ok(0)
}
