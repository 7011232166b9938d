//! Sumi-Sieve: a pattern-driven page collector
//!
//! This crate discovers the pages of a website whose URLs match a target
//! pattern, using one of three traversal strategies (sitemap, robots.txt
//! declared sitemaps, or link-following crawl), and hands each matching page
//! to an extractor and an output sink.

pub mod collector;
pub mod config;
pub mod extract;
pub mod output;
pub mod robots;
pub mod runner;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] collector::FetchError),

    #[error("Document scan error for {url}: {message}")]
    Scan { url: String, message: String },

    #[error("Extraction error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for Sumi-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use collector::{Candidate, Collector, FetchResult, Match, Strategy, StrategyConfig};
pub use config::Config;
pub use runner::{RunSummary, Runner};
