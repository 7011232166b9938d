//! Runner: pulls matches, extracts items and feeds the output
//!
//! The runner is the consumer side of the collector. It pulls one match at a
//! time, so the limit and the delay directly bound how much of the site is
//! fetched.

use crate::collector::{Collector, CollectorStats, Fetch};
use crate::extract::Extractor;
use crate::output::Output;
use crate::SieveError;
use std::time::Duration;

/// What a finished run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Matched pages handed to the extractor
    pub matches: usize,

    /// Items written to the output
    pub items: usize,

    /// Collector counters at the end of the run
    pub stats: CollectorStats,
}

/// Drives a collector into an output through an extractor
pub struct Runner<F, E, O> {
    collector: Collector<F>,
    extractor: E,
    output: O,
    limit: usize,
    delay: Duration,
}

impl<F, E, O> Runner<F, E, O>
where
    F: Fetch,
    E: Extractor,
    O: Output,
{
    pub fn new(collector: Collector<F>, extractor: E, output: O) -> Self {
        Self {
            collector,
            extractor,
            output,
            limit: 0,
            delay: Duration::ZERO,
        }
    }

    /// Stops after `limit` matched pages (0 = unlimited)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Pauses for `delay` after each matched page
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs to exhaustion or to the limit
    ///
    /// The output is always closed, even when the run fails.
    pub async fn run(mut self) -> Result<RunSummary, SieveError> {
        tracing::info!(
            "Starting runner (strategy: {}, limit: {}, delay: {}ms)",
            self.collector.strategy().name(),
            self.limit,
            self.delay.as_millis()
        );

        self.output.start()?;

        let mut summary = RunSummary::default();
        let result = self.drive(&mut summary).await;
        summary.stats = self.collector.stats();

        match result {
            Ok(()) => {
                self.output.end()?;
                tracing::info!(
                    "Runner finished: {} matches, {} items, {} requests ({} failed)",
                    summary.matches,
                    summary.items,
                    summary.stats.requests(),
                    summary.stats.pages_failed + summary.stats.documents_failed
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("Error during crawl, closing output: {}", e);
                if let Err(end_error) = self.output.end() {
                    tracing::error!("Failed to close output: {}", end_error);
                }
                Err(e)
            }
        }
    }

    async fn drive(&mut self, summary: &mut RunSummary) -> Result<(), SieveError> {
        loop {
            // Checked before pulling so nothing past the limit is fetched
            if self.limit > 0 && summary.matches >= self.limit {
                tracing::debug!("Limit of {} matches reached", self.limit);
                return Ok(());
            }

            let page = match self.collector.next_match().await? {
                Some(page) => page,
                None => return Ok(()),
            };
            summary.matches += 1;

            for item in self.extractor.extract(&page)? {
                self.output.add(&item)?;
                summary.items += 1;
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }
    }
}
