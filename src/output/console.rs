// src/output/console.rs
// Prints crawl events as colored one-liners:
//
//   IMAGE: https://someone.neocities.org/buttons/me.gif
//   LINK: https://friend.neocities.org/
//   ERROR: https://gone.neocities.org/

use colored::{ColoredString, Colorize};

use crate::crawl::{CrawlEvent, Observer};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver {
    silent: bool,
}

impl ConsoleObserver {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }
}

impl Observer for ConsoleObserver {
    fn notify(&self, event: &CrawlEvent<'_>) {
        if self.silent {
            return;
        }
        println!("{}", format_event(event));
    }
}

fn label(event: &CrawlEvent<'_>) -> ColoredString {
    match event {
        CrawlEvent::Image { .. } => "IMAGE".green().bold(),
        CrawlEvent::Link { .. } => "LINK".blue().bold(),
        CrawlEvent::Error { .. } => "ERROR".red().bold(),
    }
}

pub fn format_event(event: &CrawlEvent<'_>) -> String {
    format!("{}: {}", label(event), event.url())
}
