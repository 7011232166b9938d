//! Collector coordinator - drives a strategy and surfaces matches
//!
//! The collector sits between a traversal strategy and the fetch gateway:
//! - Feeding each step's outcome back to the strategy
//! - Fetching every candidate URL at most once per traversal
//! - Loading discovery documents (sitemaps, robots files) on request
//! - Handing matched pages to the consumer, one pull at a time
//!
//! Nothing is fetched ahead of the consumer: when a match is surfaced the
//! strategy is left suspended until the next call to
//! [`Collector::next_match`].

use crate::collector::strategy::{Candidate, FetchResult, Step, Strategy};
use crate::collector::{Document, Fetch};
use crate::SieveError;
use std::collections::HashSet;
use std::rc::Rc;

/// A page whose URL matched the target pattern, with its parsed document
#[derive(Debug, Clone)]
pub struct Match {
    /// The matched URL
    pub url: String,

    /// The fetched and parsed page
    pub document: Rc<Document>,
}

/// Counters for a single traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    /// Candidate pages fetched successfully
    pub pages_fetched: u64,

    /// Candidate pages whose fetch failed
    pub pages_failed: u64,

    /// Candidates skipped because they were already visited
    pub pages_skipped: u64,

    /// Matches surfaced to the consumer
    pub matches: u64,

    /// Discovery documents loaded successfully
    pub documents_loaded: u64,

    /// Discovery documents that could not be loaded
    pub documents_failed: u64,
}

impl CollectorStats {
    /// Total requests issued through the fetch gateway
    pub fn requests(&self) -> u64 {
        self.pages_fetched + self.pages_failed + self.documents_loaded + self.documents_failed
    }
}

/// Drives a strategy to completion, yielding matched pages on demand
pub struct Collector<F> {
    fetcher: F,
    strategy: Strategy,
    visited: HashSet<String>,
    pending: Option<FetchResult>,
    exhausted: bool,
    stats: CollectorStats,
}

impl<F: Fetch> Collector<F> {
    /// Creates a collector for one traversal
    pub fn new(fetcher: F, strategy: Strategy) -> Self {
        Self {
            fetcher,
            strategy,
            visited: HashSet::new(),
            pending: None,
            exhausted: false,
            stats: CollectorStats::default(),
        }
    }

    /// Pulls the next matched page
    ///
    /// Returns `Ok(None)` once the strategy is exhausted, and on every call
    /// after that. Fetch failures are logged and never surface here; only a
    /// failure while scanning a document ends the traversal with an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use regex::Regex;
    /// use sumi_sieve::collector::{Collector, HttpFetcher, Strategy, StrategyConfig};
    /// use sumi_sieve::config::UserAgentConfig;
    ///
    /// # async fn example(agent: UserAgentConfig) -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StrategyConfig::sitemap(
    ///     "https://example.com",
    ///     Regex::new(r"/products/")?,
    ///     "sitemap.xml",
    /// );
    /// let mut collector = Collector::new(HttpFetcher::new(&agent)?, Strategy::new(config));
    ///
    /// while let Some(found) = collector.next_match().await? {
    ///     println!("{} -> {:?}", found.url, found.document.title());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn next_match(&mut self) -> Result<Option<Match>, SieveError> {
        if self.exhausted {
            return Ok(None);
        }

        // A match surfaced on the previous pull still owes the strategy its
        // outcome
        let mut outcome = self.pending.take();

        loop {
            let step = match self.strategy.advance(outcome.take()) {
                Ok(step) => step,
                Err(e) => {
                    self.exhausted = true;
                    return Err(e);
                }
            };

            match step {
                Step::Done => {
                    tracing::debug!(
                        "Strategy {} exhausted after {} matches",
                        self.strategy.name(),
                        self.stats.matches
                    );
                    self.exhausted = true;
                    return Ok(None);
                }
                Step::Load(url) => {
                    outcome = Some(self.load(url).await);
                }
                Step::Fetch(candidate) => match self.visit(candidate).await {
                    Visit::Resume(result) => outcome = Some(result),
                    Visit::Surface(found, result) => {
                        self.pending = Some(result);
                        self.stats.matches += 1;
                        return Ok(Some(found));
                    }
                },
            }
        }
    }

    /// Fetches a discovery document, bypassing the visited set
    async fn load(&mut self, url: String) -> FetchResult {
        match self.fetcher.fetch(&url).await {
            Ok(document) => {
                self.stats.documents_loaded += 1;
                FetchResult::with_document(url, Rc::new(document))
            }
            Err(e) => {
                tracing::warn!("Unable to load discovery document: {}", e);
                self.stats.documents_failed += 1;
                FetchResult::empty(url)
            }
        }
    }

    /// Fetches a candidate page unless it was already visited
    async fn visit(&mut self, candidate: Candidate) -> Visit {
        let Candidate { url, is_match } = candidate;

        if self.visited.contains(&url) {
            tracing::debug!("Skipping already hit URL: {}", url);
            self.stats.pages_skipped += 1;
            return Visit::Resume(FetchResult::empty(url));
        }
        self.visited.insert(url.clone());

        match self.fetcher.fetch(&url).await {
            Ok(document) => {
                self.stats.pages_fetched += 1;
                let document = Rc::new(document);
                let result = FetchResult::with_document(url.clone(), Rc::clone(&document));

                if is_match {
                    tracing::debug!("URL hit: {}", url);
                    Visit::Surface(Match { url, document }, result)
                } else {
                    Visit::Resume(result)
                }
            }
            Err(e) => {
                tracing::warn!("Unable to fetch page: {}", e);
                self.stats.pages_failed += 1;
                Visit::Resume(FetchResult::empty(url))
            }
        }
    }

    /// Counters for this traversal so far
    pub fn stats(&self) -> CollectorStats {
        self.stats
    }

    /// Number of distinct candidate URLs visited so far
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Whether the strategy has been exhausted
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The fetch gateway in use
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The strategy being driven
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }
}

enum Visit {
    /// Resume the strategy right away
    Resume(FetchResult),

    /// Hand the match to the consumer first, resume on the next pull
    Surface(Match, FetchResult),
}
