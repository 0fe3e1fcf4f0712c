// src/fetch/mod.rs
// =============================================================================
// The crawler's outside world: HTTP downloads, HTML reference extraction
// with url resolution, and reading pixel dimensions from image bytes.
//
// Submodules:
// - http: Fetcher, a configured reqwest client
// - html: pulls <a href> / <img src> out of a page, resolves references
// - dimensions: image header probe
// =============================================================================

mod dimensions;
mod html;
mod http;

pub use dimensions::dimensions;
pub use html::{extract_refs, origin_url, resolve, PageRefs};
pub use http::Fetcher;

#[cfg(test)]
pub(crate) use dimensions::gif_fixture;
