//! Sitemap strategy
//!
//! Sitemaps are loaded as discovery documents, never as candidates. Nested
//! sitemaps are walked depth-first and pre-order: a referenced sub-sitemap is
//! exhausted before the next entry of its parent is looked at. Within one
//! sitemap, nested `<sitemap>` references are processed before `<url>` leaves.
//!
//! Leaf URLs that match the target pattern are proposed as hits; the rest are
//! dropped without being fetched.

use crate::collector::strategy::{Candidate, FetchResult, Step};
use crate::collector::Document;
use crate::SieveError;
use regex::Regex;
use std::collections::{HashSet, VecDeque};

/// Walks the sitemap at a single URL
#[derive(Debug)]
pub struct SitemapStrategy {
    walk: SitemapWalk,
}

impl SitemapStrategy {
    /// Creates a strategy for the sitemap at `sitemap_url`
    pub fn new(sitemap_url: String, target_pattern: Regex) -> Self {
        Self {
            walk: SitemapWalk::new(target_pattern, vec![sitemap_url]),
        }
    }

    /// Resumes with the outcome of the previous step
    pub fn advance(&mut self, outcome: Option<FetchResult>) -> Result<Step, SieveError> {
        self.walk.advance(outcome)
    }
}

#[derive(Debug)]
enum Entry {
    Sitemap(String),
    Page(String),
}

#[derive(Debug)]
enum Awaiting {
    Nothing,
    Sitemap(String),
    Page,
}

/// Depth-first walk over one or more sitemap trees
///
/// Shared by the sitemap and robots.txt strategies. Each frame on the stack
/// holds the unprocessed entries of one loaded sitemap.
#[derive(Debug)]
pub(crate) struct SitemapWalk {
    target_pattern: Regex,
    frames: Vec<VecDeque<Entry>>,
    loaded: HashSet<String>,
    awaiting: Awaiting,
}

impl SitemapWalk {
    /// Starts a walk over `roots`, exhausting each in order
    pub(crate) fn new(target_pattern: Regex, roots: Vec<String>) -> Self {
        Self {
            target_pattern,
            frames: vec![roots.into_iter().map(Entry::Sitemap).collect()],
            loaded: HashSet::new(),
            awaiting: Awaiting::Nothing,
        }
    }

    pub(crate) fn advance(&mut self, outcome: Option<FetchResult>) -> Result<Step, SieveError> {
        match std::mem::replace(&mut self.awaiting, Awaiting::Nothing) {
            Awaiting::Sitemap(url) => match outcome.as_ref().and_then(FetchResult::document) {
                Some(document) => {
                    let frame = self.read_sitemap(document)?;
                    self.frames.push(frame);
                }
                None => {
                    tracing::warn!("Could not load sitemap {}, skipping branch", url);
                }
            },
            // Leaf pages are never branched from
            Awaiting::Page | Awaiting::Nothing => {}
        }

        Ok(self.next_step())
    }

    fn next_step(&mut self) -> Step {
        while let Some(frame) = self.frames.last_mut() {
            let Some(entry) = frame.pop_front() else {
                self.frames.pop();
                continue;
            };

            match entry {
                Entry::Sitemap(url) => {
                    if !self.loaded.insert(url.clone()) {
                        tracing::debug!("Sitemap already walked, skipping: {}", url);
                        continue;
                    }
                    tracing::debug!("Parsing sitemap: {}", url);
                    self.awaiting = Awaiting::Sitemap(url.clone());
                    return Step::Load(url);
                }
                Entry::Page(url) => {
                    if !self.target_pattern.is_match(&url) {
                        continue;
                    }
                    tracing::debug!("Matched URL from sitemap: {}", url);
                    self.awaiting = Awaiting::Page;
                    return Step::Fetch(Candidate::hit(url));
                }
            }
        }

        Step::Done
    }

    fn read_sitemap(&self, document: &Document) -> Result<VecDeque<Entry>, SieveError> {
        let sitemaps = document.child_texts("sitemap", "loc")?;
        let pages = document.child_texts("url", "loc")?;

        for sitemap in &sitemaps {
            tracing::debug!("Sitemap found: {}", sitemap);
        }

        Ok(sitemaps
            .into_iter()
            .map(Entry::Sitemap)
            .chain(pages.into_iter().map(Entry::Page))
            .collect())
    }
}
