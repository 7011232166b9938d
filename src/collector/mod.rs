//! Collector module for URL discovery and page retrieval
//!
//! This module contains the core discovery logic, including:
//! - The fetch gateway contract and its HTTP implementation
//! - Parsed documents with tag, attribute and href lookups
//! - The three traversal strategies (sitemap, robots.txt, crawl)
//! - The collector that drives a strategy and yields matched pages

mod coordinator;
mod document;
mod fetcher;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{Collector, CollectorStats, Match};
pub use document::{text_of, Document};
pub use fetcher::{build_http_client, user_agent_string, Fetch, FetchError, HttpFetcher};
pub use strategy::{Candidate, FetchResult, Step, Strategy, StrategyConfig, StrategyKind};

use crate::config::Config;
use crate::SieveError;

/// Builds an HTTP-backed collector from a loaded configuration
///
/// # Returns
///
/// * `Ok(Collector)` - Ready to pull matches
/// * `Err(SieveError)` - Patterns failed to compile or the client could not be built
pub fn collector_from_config(config: &Config) -> Result<Collector<HttpFetcher>, SieveError> {
    let strategy = Strategy::new(StrategyConfig::from_collector(&config.collector)?);
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    Ok(Collector::new(fetcher, strategy))
}
