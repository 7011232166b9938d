use serde::Deserialize;

/// Main configuration structure for Sumi-Sieve
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Human-readable name of this run
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub collector: CollectorConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerConfig {
    /// Maximum number of matched pages to process (0 = unlimited)
    #[serde(default)]
    pub limit: usize,

    /// Pause between matched pages (milliseconds)
    #[serde(default)]
    pub delay: u64,

    /// Log level used when no verbosity flag is given on the command line
    #[serde(rename = "log-level", default)]
    pub log_level: Option<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: Option<String>,
}

/// Which traversal strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyName {
    Sitemap,
    RobotsTxt,
    Crawl,
}

/// URL collector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    pub strategy: StrategyName,

    /// Base URL of the site; only links under it are followed
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Regular expression identifying URLs to surface
    #[serde(rename = "target-pattern")]
    pub target_pattern: String,

    /// Sitemap location relative to the base URL (sitemap strategy)
    #[serde(rename = "sitemap-path", default)]
    pub sitemap_path: Option<String>,

    /// Robots file location relative to the base URL (robots-txt strategy)
    #[serde(rename = "robots-path", default)]
    pub robots_path: Option<String>,

    /// Path the crawl starts from (crawl strategy)
    #[serde(rename = "start-path", default)]
    pub start_path: Option<String>,

    /// Regular expression for links worth following but not surfaced (crawl
    /// strategy)
    #[serde(rename = "crawl-pattern", default)]
    pub crawl_pattern: Option<String>,
}

/// Which extractor turns matched pages into items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    #[default]
    Page,
    Product,
}

/// Extractor configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub kind: ExtractorKind,
}

/// Where extracted items go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    #[default]
    Log,
    JsonLines,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub kind: OutputKind,

    /// Destination file (json-lines output)
    #[serde(default)]
    pub path: Option<String>,
}
