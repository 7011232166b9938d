//! Sumi-Sieve main entry point
//!
//! This is the command-line interface for the Sumi-Sieve page collector.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use sumi_sieve::collector::{collector_from_config, StrategyConfig};
use sumi_sieve::config::{load_config_with_hash, Config};
use sumi_sieve::extract::ConfiguredExtractor;
use sumi_sieve::output::ConfiguredOutput;
use sumi_sieve::Runner;
use tracing_subscriber::EnvFilter;

/// Sumi-Sieve: a pattern-driven page collector
///
/// Sumi-Sieve discovers the pages of a site whose URLs match a pattern,
/// by walking its sitemaps, the sitemaps its robots.txt declares, or its
/// links, and extracts structured items from each matched page.
#[derive(Parser, Debug)]
#[command(name = "sumi-sieve")]
#[command(version)]
#[command(about = "A pattern-driven page collector", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Stop after this many matched pages, overriding the config (0 = unlimited)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Pause between matched pages in milliseconds, overriding the config
    #[arg(long, value_name = "MS")]
    delay: Option<u64>,

    /// Validate config and show what would be collected without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The config may carry the default log level, so it is read before
    // logging is set up and its errors are reported afterwards
    let loaded = load_config_with_hash(&cli.config);
    let config_level = loaded
        .as_ref()
        .ok()
        .and_then(|(config, _)| config.runner.log_level.clone());

    setup_logging(cli.verbose, cli.quiet, config_level.as_deref());

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match loaded {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let limit = cli.limit.unwrap_or(config.runner.limit);
    let delay = Duration::from_millis(cli.delay.unwrap_or(config.runner.delay));

    if cli.dry_run {
        handle_dry_run(&config, limit, delay)?;
    } else {
        handle_collect(&config, limit, delay).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, config_level: Option<&str>) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => {
                let level = config_level.unwrap_or("info").to_lowercase();
                EnvFilter::new(format!("sumi_sieve={},warn", level))
            }
            1 => EnvFilter::new("sumi_sieve=debug,info"),
            2 => EnvFilter::new("sumi_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be collected
fn handle_dry_run(
    config: &Config,
    limit: usize,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = StrategyConfig::from_collector(&config.collector)?;

    println!("=== Sumi-Sieve Dry Run ===\n");

    if let Some(title) = &config.title {
        println!("Title: {}\n", title);
    }

    println!("Collector:");
    println!("  Strategy: {}", strategy.name());
    println!("  Base URL: {}", strategy.base_url);
    println!("  Entry URL: {}", strategy.entry_url());
    println!("  Target pattern: {}", strategy.target_pattern);
    if let Some(crawl_pattern) = &config.collector.crawl_pattern {
        println!("  Crawl pattern: {}", crawl_pattern);
    }

    println!("\nRunner:");
    if limit == 0 {
        println!("  Limit: unlimited");
    } else {
        println!("  Limit: {} matches", limit);
    }
    println!("  Delay: {}ms", delay.as_millis());

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    if let Some(email) = &config.user_agent.contact_email {
        println!("  Contact Email: {}", email);
    }

    println!("\nExtractor: {}", ConfiguredExtractor::from_config(&config.extractor).name());
    match &config.output.path {
        Some(path) => println!("Output: {:?} -> {}", config.output.kind, path),
        None => println!("Output: {:?}", config.output.kind),
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start collecting from {}", strategy.entry_url());

    Ok(())
}

/// Handles the main collection run
async fn handle_collect(
    config: &Config,
    limit: usize,
    delay: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let collector = collector_from_config(config)?;
    let extractor = ConfiguredExtractor::from_config(&config.extractor);
    let output = ConfiguredOutput::from_config(&config.output)?;

    let runner = Runner::new(collector, extractor, output)
        .with_limit(limit)
        .with_delay(delay);

    match runner.run().await {
        Ok(summary) => {
            tracing::info!(
                "Collection completed: {} matched pages, {} items, {} pages visited",
                summary.matches,
                summary.items,
                summary.stats.pages_fetched
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Collection failed: {}", e);
            Err(e.into())
        }
    }
}
