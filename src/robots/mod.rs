//! Robots.txt handling module
//!
//! Robots files are consulted only for the sitemaps they declare.

mod parser;

pub use parser::ParsedRobots;

/// Returns the sitemap URLs declared in robots.txt content, in file order
///
/// # Example
///
/// ```
/// use sumi_sieve::robots::declared_sitemaps;
///
/// let content = "User-agent: *\nSitemap: https://example.com/sitemap.xml\n";
/// assert_eq!(declared_sitemaps(content), vec!["https://example.com/sitemap.xml"]);
/// ```
pub fn declared_sitemaps(content: &str) -> Vec<String> {
    ParsedRobots::from_content(content).into_sitemaps()
}
