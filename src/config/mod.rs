//! Configuration module for Sumi-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sieve.toml")).unwrap();
//! println!("Collecting from: {}", config.collector.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CollectorConfig, Config, ExtractorConfig, ExtractorKind, OutputConfig, OutputKind,
    RunnerConfig, StrategyName, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

pub use validation::compile_pattern;
