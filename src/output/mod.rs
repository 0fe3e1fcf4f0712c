// src/output/mod.rs
// =============================================================================
// What the caller does with crawl results. The crawl engine never depends
// on anything in here.
//
// Submodules:
// - console: prints IMAGE / LINK / ERROR events in color
// - writer: saves images to a numbered directory with an index.txt
// =============================================================================

mod console;
mod writer;

pub use console::{format_event, ConsoleObserver};
pub use writer::{image_extension, ImageWriter};
