//! Robots.txt parser implementation
//!
//! Parsing is delegated to the robotstxt crate; only the `Sitemap:`
//! directives are kept.

use robotstxt::{parse_robotstxt, RobotsParseHandler};

/// Sitemap declarations found in a robots.txt file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRobots {
    sitemaps: Vec<String>,
}

impl ParsedRobots {
    /// Parses raw robots.txt content
    ///
    /// Never fails: unrecognized lines are ignored, so garbage input simply
    /// declares no sitemaps.
    pub fn from_content(content: &str) -> Self {
        let mut collector = SitemapCollector::default();
        parse_robotstxt(content, &mut collector);
        Self {
            sitemaps: collector.sitemaps,
        }
    }

    /// Declared sitemap URLs, in file order
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Consumes the parsed file, returning the declared sitemap URLs
    pub fn into_sitemaps(self) -> Vec<String> {
        self.sitemaps
    }
}

#[derive(Default)]
struct SitemapCollector {
    sitemaps: Vec<String>,
}

impl RobotsParseHandler for SitemapCollector {
    fn handle_robots_start(&mut self) {}

    fn handle_robots_end(&mut self) {}

    fn handle_user_agent(&mut self, _line_num: u32, _user_agent: &str) {}

    fn handle_allow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_disallow(&mut self, _line_num: u32, _value: &str) {}

    fn handle_sitemap(&mut self, _line_num: u32, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            self.sitemaps.push(value.to_string());
        }
    }

    fn handle_unknown_action(&mut self, _line_num: u32, _action: &str, _value: &str) {}
}
