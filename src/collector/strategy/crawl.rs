//! Crawl strategy
//!
//! Depth-first, pre-order walk over the link graph as it is discovered:
//!
//! 1. Propose the URL, flagged as a match if it satisfies the target pattern
//! 2. If no document comes back (failed, or already visited), the branch ends
//! 3. Otherwise recurse into every anchor whose href matches the target
//!    pattern, then into every anchor whose href matches the crawl pattern,
//!    each in document order and each to exhaustion before the next
//!
//! Recursion is an explicit stack of frames, one per expanded page, so deep
//! sites cannot overflow the native stack. Cycles are cut by the collector's
//! visited set: a revisited URL comes back without a document.
//!
//! An href matching both patterns is queued by both scans. The second visit
//! is absorbed by the visited set.

use crate::collector::strategy::{Candidate, FetchResult, Step};
use crate::collector::Document;
use crate::url::rebase_href;
use crate::SieveError;
use regex::Regex;
use std::collections::VecDeque;

#[derive(Debug)]
enum State {
    Start,
    Awaiting(String),
    Exhausted,
}

/// Link-following crawl from a start URL
#[derive(Debug)]
pub struct CrawlStrategy {
    base_url: String,
    start_url: String,
    target_pattern: Regex,
    crawl_pattern: Regex,
    frames: Vec<VecDeque<String>>,
    state: State,
}

impl CrawlStrategy {
    /// Creates a crawl starting at `start_url`
    ///
    /// `base_url` must already be normalized; links are only followed when
    /// they are site-relative or start with it.
    pub fn new(
        base_url: String,
        start_url: String,
        target_pattern: Regex,
        crawl_pattern: Regex,
    ) -> Self {
        Self {
            base_url,
            start_url,
            target_pattern,
            crawl_pattern,
            frames: Vec::new(),
            state: State::Start,
        }
    }

    /// Resumes with the outcome of the previous step
    pub fn advance(&mut self, outcome: Option<FetchResult>) -> Result<Step, SieveError> {
        match std::mem::replace(&mut self.state, State::Exhausted) {
            State::Start => Ok(self.propose(self.start_url.clone())),
            State::Awaiting(url) => {
                match outcome.as_ref().and_then(FetchResult::document) {
                    Some(document) => {
                        let links = self.links_from(document)?;
                        tracing::trace!("Found {} followable links on {}", links.len(), url);
                        self.frames.push(links);
                    }
                    None => tracing::trace!("No document for {}, branch ends", url),
                }
                Ok(self.next_step())
            }
            State::Exhausted => Ok(Step::Done),
        }
    }

    fn next_step(&mut self) -> Step {
        while let Some(frame) = self.frames.last_mut() {
            match frame.pop_front() {
                Some(url) => return self.propose(url),
                None => {
                    self.frames.pop();
                }
            }
        }

        Step::Done
    }

    fn propose(&mut self, url: String) -> Step {
        tracing::debug!("Crawling URL: {}", url);
        let is_match = self.target_pattern.is_match(&url);
        self.state = State::Awaiting(url.clone());
        Step::Fetch(Candidate { url, is_match })
    }

    /// Target-pattern links followed by crawl-pattern links, rebased
    fn links_from(&self, document: &Document) -> Result<VecDeque<String>, SieveError> {
        let mut links = VecDeque::new();

        for pattern in [&self.target_pattern, &self.crawl_pattern] {
            for href in document.anchors_matching(pattern)? {
                match rebase_href(&href, &self.base_url) {
                    Some(url) => links.push_back(url),
                    None => tracing::trace!("Dropping external link: {}", href),
                }
            }
        }

        Ok(links)
    }
}
