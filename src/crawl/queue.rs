// src/crawl/queue.rs
// =============================================================================
// This module drives a crawl with a breadth-first queue.
//
// How it works:
// 1. Start with the seed targets in a queue
// 2. Pop the front target and scan it
// 3. Collect the qualifying images it returned
// 4. Push the targets it returned onto the back of the queue
// 5. Repeat until the queue is empty
//
// Because new targets go to the back, every page at depth d is scanned
// before any page at depth d + 1. The crawl always ends: depth grows by
// one per hop and pages at max_depth are never fetched, and the visited
// set stops a page from being scanned twice.
//
// Rust concepts:
// - VecDeque: Double-ended queue for breadth-first crawling
// - Streams: consuming images while the crawl is still going
// =============================================================================

use std::collections::VecDeque;

use futures::stream::{self, Stream};
use tracing::info;

use super::{CrawlResult, CrawlTarget, Observer, QualifiedImage, Spider, VisitedSet};

/// One crawl session: the queue, the visited set, and the Spider doing
/// the work. Create a new one per run.
#[derive(Debug)]
pub struct Crawl<'s> {
    spider: &'s Spider,
    queue: VecDeque<CrawlTarget>,
    visited: VisitedSet,
}

impl<'s> Crawl<'s> {
    pub fn new(spider: &'s Spider, seeds: impl IntoIterator<Item = CrawlTarget>) -> Self {
        Self {
            spider,
            queue: seeds.into_iter().collect(),
            visited: VisitedSet::new(),
        }
    }

    /// Targets still waiting to be scanned
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Scans the target at the front of the queue and queues whatever it
    /// found. Returns None once the queue is empty.
    pub async fn step(&mut self, observer: &dyn Observer) -> Option<(CrawlTarget, CrawlResult)> {
        let target = self.queue.pop_front()?;

        let result = self
            .spider
            .scan(&target.url, target.depth, &mut self.visited, observer)
            .await;

        if !result.is_empty() {
            info!(
                url = %target.url,
                depth = target.depth,
                links = result.next.len(),
                images = result.images.len(),
                "scanned"
            );
        }

        self.queue.extend(result.next.iter().cloned());
        Some((target, result))
    }

    /// Runs the crawl to the end and returns every qualifying image in
    /// the order it was found.
    pub async fn run(mut self, observer: &dyn Observer) -> Vec<QualifiedImage> {
        let mut images = Vec::new();
        while let Some((_, result)) = self.step(observer).await {
            images.extend(result.images);
        }
        images
    }

    /// Same crawl as `run`, but hands images out as soon as they are found
    /// instead of collecting them all in memory first.
    pub fn into_stream(self, observer: &'s dyn Observer) -> impl Stream<Item = QualifiedImage> + 's {
        stream::unfold(
            (self, VecDeque::<QualifiedImage>::new()),
            move |(mut crawl, mut ready)| async move {
                loop {
                    if let Some(image) = ready.pop_front() {
                        return Some((image, (crawl, ready)));
                    }
                    let (_, result) = crawl.step(observer).await?;
                    ready.extend(result.images);
                }
            },
        )
    }
}

impl Spider {
    /// Crawls breadth-first from `seeds` with a fresh visited set and
    /// returns all qualifying images.
    pub async fn run(
        &self,
        seeds: impl IntoIterator<Item = CrawlTarget>,
        observer: &dyn Observer,
    ) -> Vec<QualifiedImage> {
        Crawl::new(self, seeds).run(observer).await
    }

    pub fn crawl(&self, seeds: impl IntoIterator<Item = CrawlTarget>) -> Crawl<'_> {
        Crawl::new(self, seeds)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What is VecDeque?
//    - A double-ended queue (deck)
//    - push_back() adds to end, pop_front() removes from start
//    - Perfect for breadth-first search (BFS)
//
// 2. Why does step() return the target too?
//    - The CLI prints "Scanned <url> (depth d)" after each useful scan
//    - Callers that only want images can ignore it
//
// 3. What does stream::unfold do?
//    - It builds a Stream from a state value and an async function
//    - Each call returns Some((item, next_state)), or None to end the stream
//    - Here the state is the crawl plus images found but not yet handed out
//
// 4. Why does the `?` inside the unfold closure work?
//    - step() returns Option, and so does the closure
//    - An empty queue gives None, which ends the stream
// -----------------------------------------------------------------------------
