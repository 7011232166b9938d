//! In-memory fetch gateway for unit tests

use crate::collector::{Document, Fetch, FetchError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// A fake website: URL -> body, with every request recorded
#[derive(Debug, Default)]
pub(crate) struct StaticSite {
    pages: HashMap<String, String>,
    broken: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl StaticSite {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serves `body` at `url` with a 200
    pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Makes `url` fail with a transport error
    pub(crate) fn broken(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }

    /// Every URL requested so far, in order
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// How many times `url` was requested
    pub(crate) fn hits(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|r| *r == url).count()
    }
}

impl Fetch for StaticSite {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        if self.broken.contains(url) {
            return Err(FetchError::Transport {
                url: url.to_string(),
                message: "Connection refused".to_string(),
            });
        }

        match self.pages.get(url) {
            Some(body) => Ok(Document::parse(url, body.as_str())),
            None => Err(FetchError::NonOkStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Builds an HTML page containing one anchor per href
pub(crate) fn links_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

/// Builds a `<urlset>` sitemap
pub(crate) fn urlset(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

/// Builds a `<sitemapindex>` sitemap
pub(crate) fn sitemap_index(locs: &[&str]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}
