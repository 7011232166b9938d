//! Traversal strategies
//!
//! A strategy proposes URLs one step at a time and, for each step, is handed
//! back the outcome of fetching what it asked for before it decides on the
//! next one. Strategies are explicit state machines rather than coroutines:
//! the collector calls [`Strategy::advance`] with the previous outcome and
//! receives the next [`Step`].
//!
//! Three strategies are available:
//! - **Sitemap**: walks a sitemap (and any nested sitemaps) for matching URLs
//! - **RobotsTxt**: reads the sitemaps declared in robots.txt and walks each
//! - **Crawl**: follows links from a start page, depth-first

mod crawl;
mod robots_txt;
mod sitemap;

pub use crawl::CrawlStrategy;
pub use robots_txt::RobotsTxtStrategy;
pub use sitemap::SitemapStrategy;

use crate::collector::Document;
use crate::config::{compile_pattern, CollectorConfig, StrategyName};
use crate::url::{join_path, normalize_base_url};
use crate::{ConfigError, SieveError};
use regex::Regex;
use std::rc::Rc;

/// A URL proposed by a strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The URL to fetch
    pub url: String,

    /// Whether the URL satisfies the target pattern and should be surfaced,
    /// as opposed to being visited only to discover further links
    pub is_match: bool,
}

impl Candidate {
    /// A candidate that matched the target pattern
    pub fn hit(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_match: true,
        }
    }

    /// A candidate visited for discovery only
    pub fn pass_through(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_match: false,
        }
    }
}

/// The outcome of a step, handed back to the strategy
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: String,

    /// The parsed document, absent if the fetch failed or was skipped
    pub document: Option<Rc<Document>>,
}

impl FetchResult {
    /// An outcome with no document
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            document: None,
        }
    }

    /// An outcome carrying a fetched document
    pub fn with_document(url: impl Into<String>, document: Rc<Document>) -> Self {
        Self {
            url: url.into(),
            document: Some(document),
        }
    }

    /// Borrows the document, if any
    pub fn document(&self) -> Option<&Document> {
        self.document.as_deref()
    }
}

/// What a strategy wants done next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Fetch a page candidate (deduplicated, surfaced if it is a match)
    Fetch(Candidate),

    /// Load a discovery document such as a sitemap or robots file; never
    /// deduplicated against visited pages and never surfaced
    Load(String),

    /// The strategy is exhausted
    Done,
}

/// Strategy-specific parameters
#[derive(Debug, Clone)]
pub enum StrategyKind {
    /// Walk the sitemap at `sitemap_path`
    Sitemap { sitemap_path: String },

    /// Walk the sitemaps declared in the robots file at `robots_path`
    RobotsTxt { robots_path: String },

    /// Crawl links from `start_path`, following target and crawl-only matches
    Crawl {
        start_path: String,
        crawl_pattern: Regex,
    },
}

/// Immutable configuration for a traversal strategy
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Base URL, always ending in exactly one slash
    pub base_url: String,

    /// Pattern identifying URLs whose content is wanted
    pub target_pattern: Regex,

    /// Which strategy to run and its parameters
    pub kind: StrategyKind,
}

impl StrategyConfig {
    /// Default robots file location, relative to the base URL
    pub const DEFAULT_ROBOTS_PATH: &'static str = "robots.txt";

    /// Default sitemap location, relative to the base URL
    pub const DEFAULT_SITEMAP_PATH: &'static str = "sitemap.xml";

    /// Configures a sitemap walk
    pub fn sitemap(base_url: &str, target_pattern: Regex, sitemap_path: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            target_pattern,
            kind: StrategyKind::Sitemap {
                sitemap_path: sitemap_path.trim_matches('/').to_string(),
            },
        }
    }

    /// Configures a robots.txt sitemap dispatch
    pub fn robots_txt(base_url: &str, target_pattern: Regex, robots_path: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            target_pattern,
            kind: StrategyKind::RobotsTxt {
                robots_path: robots_path.trim_matches('/').to_string(),
            },
        }
    }

    /// Configures a link-following crawl
    pub fn crawl(
        base_url: &str,
        target_pattern: Regex,
        start_path: &str,
        crawl_pattern: Regex,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            target_pattern,
            kind: StrategyKind::Crawl {
                start_path: start_path.trim_start_matches('/').to_string(),
                crawl_pattern,
            },
        }
    }

    /// Builds a strategy configuration from the `[collector]` section
    ///
    /// Missing paths fall back to the defaults; a crawl without a
    /// `crawl-pattern` is rejected.
    pub fn from_collector(config: &CollectorConfig) -> Result<Self, ConfigError> {
        let target_pattern = compile_pattern("target-pattern", &config.target_pattern)?;

        Ok(match config.strategy {
            StrategyName::Sitemap => Self::sitemap(
                &config.base_url,
                target_pattern,
                config
                    .sitemap_path
                    .as_deref()
                    .unwrap_or(Self::DEFAULT_SITEMAP_PATH),
            ),
            StrategyName::RobotsTxt => Self::robots_txt(
                &config.base_url,
                target_pattern,
                config
                    .robots_path
                    .as_deref()
                    .unwrap_or(Self::DEFAULT_ROBOTS_PATH),
            ),
            StrategyName::Crawl => {
                let crawl_pattern = config.crawl_pattern.as_deref().ok_or_else(|| {
                    ConfigError::Validation("crawl strategy requires a crawl-pattern".to_string())
                })?;
                Self::crawl(
                    &config.base_url,
                    target_pattern,
                    config.start_path.as_deref().unwrap_or(""),
                    compile_pattern("crawl-pattern", crawl_pattern)?,
                )
            }
        })
    }

    /// The first URL the strategy will request
    pub fn entry_url(&self) -> String {
        match &self.kind {
            StrategyKind::Sitemap { sitemap_path } => join_path(&self.base_url, sitemap_path),
            StrategyKind::RobotsTxt { robots_path } => join_path(&self.base_url, robots_path),
            StrategyKind::Crawl { start_path, .. } => join_path(&self.base_url, start_path),
        }
    }

    /// Short name of the configured strategy
    pub fn name(&self) -> &'static str {
        match self.kind {
            StrategyKind::Sitemap { .. } => "sitemap",
            StrategyKind::RobotsTxt { .. } => "robots-txt",
            StrategyKind::Crawl { .. } => "crawl",
        }
    }
}

/// A traversal strategy, selected once at construction
#[derive(Debug)]
pub enum Strategy {
    Sitemap(SitemapStrategy),
    RobotsTxt(RobotsTxtStrategy),
    Crawl(CrawlStrategy),
}

impl Strategy {
    /// Builds the strategy described by `config`
    pub fn new(config: StrategyConfig) -> Self {
        let entry_url = config.entry_url();
        match config.kind {
            StrategyKind::Sitemap { .. } => {
                Self::Sitemap(SitemapStrategy::new(entry_url, config.target_pattern))
            }
            StrategyKind::RobotsTxt { .. } => {
                Self::RobotsTxt(RobotsTxtStrategy::new(entry_url, config.target_pattern))
            }
            StrategyKind::Crawl { crawl_pattern, .. } => Self::Crawl(CrawlStrategy::new(
                config.base_url,
                entry_url,
                config.target_pattern,
                crawl_pattern,
            )),
        }
    }

    /// Resumes the strategy with the outcome of its previous step
    ///
    /// The first call must pass `None`; each later call passes the result for
    /// the URL requested by the previous [`Step::Fetch`] or [`Step::Load`].
    /// Once [`Step::Done`] is returned the strategy must not be advanced
    /// again.
    pub fn advance(&mut self, outcome: Option<FetchResult>) -> Result<Step, SieveError> {
        match self {
            Self::Sitemap(strategy) => strategy.advance(outcome),
            Self::RobotsTxt(strategy) => strategy.advance(outcome),
            Self::Crawl(strategy) => strategy.advance(outcome),
        }
    }

    /// Short name of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sitemap(_) => "sitemap",
            Self::RobotsTxt(_) => "robots-txt",
            Self::Crawl(_) => "crawl",
        }
    }
}
