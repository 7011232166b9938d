//! Parsed, navigable documents
//!
//! Every response that passes through the fetch gateway is parsed into a
//! [`Document`]: HTML pages, sitemap XML and robots files alike. The markup
//! tree is built with scraper (html5ever), which is lenient enough to walk
//! sitemap XML by tag name, and the raw source is kept for consumers that need
//! plain text (robots.txt).
//!
//! All lookups return elements in depth-first document order.

use crate::SieveError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// A fetched and parsed document
pub struct Document {
    url: String,
    source: String,
    html: Html,
}

impl Document {
    /// Parses `source` into a navigable document
    ///
    /// Parsing never fails: malformed markup is repaired the way a browser
    /// would, so lookup errors only surface when a caller supplies an invalid
    /// selector.
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_sieve::collector::Document;
    ///
    /// let doc = Document::parse("https://example.com/", "<title>Hi</title><a href=\"/x\">x</a>");
    /// assert_eq!(doc.title(), Some("Hi".to_string()));
    /// assert!(doc.source().starts_with("<title>"));
    /// ```
    pub fn parse(url: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        Self {
            url: url.into(),
            source,
            html,
        }
    }

    /// The URL this document was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The raw, unparsed response body
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The underlying scraper tree, for callers that want full CSS selectors
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects all elements matching a CSS selector
    pub fn select(&self, selectors: &str) -> Result<Vec<ElementRef<'_>>, SieveError> {
        let selector = self.selector(selectors)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Finds all elements with the given tag name
    pub fn elements_by_tag(&self, tag: &str) -> Result<Vec<ElementRef<'_>>, SieveError> {
        self.select(tag)
    }

    /// Finds all elements whose attribute `name` equals `value`
    pub fn elements_by_attr(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Vec<ElementRef<'_>>, SieveError> {
        let all = self.selector("*")?;
        Ok(self
            .html
            .select(&all)
            .filter(|element| element.value().attr(name) == Some(value))
            .collect())
    }

    /// Returns the raw href of every anchor whose href matches `pattern`
    ///
    /// The pattern is searched (not anchored) against the href exactly as it
    /// appears in the markup, before any rebasing.
    pub fn anchors_matching(&self, pattern: &Regex) -> Result<Vec<String>, SieveError> {
        let anchors = self.selector("a[href]")?;
        Ok(self
            .html
            .select(&anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| pattern.is_match(href))
            .map(str::to_string)
            .collect())
    }

    /// For every `parent` element, returns the trimmed text of its first
    /// `child` descendant
    ///
    /// Parents without such a child, or with an empty one, are skipped. This
    /// is how sitemap `<sitemap><loc>` and `<url><loc>` entries are read.
    pub fn child_texts(&self, parent: &str, child: &str) -> Result<Vec<String>, SieveError> {
        let parents = self.selector(parent)?;
        let children = self.selector(child)?;

        Ok(self
            .html
            .select(&parents)
            .filter_map(|element| element.select(&children).next())
            .map(|element| text_of(&element))
            .filter(|text| !text.is_empty())
            .collect())
    }

    /// Extracts the page title from the `<title>` tag
    pub fn title(&self) -> Option<String> {
        let title_selector = Selector::parse("title").ok()?;

        self.html
            .select(&title_selector)
            .next()
            .map(|element| text_of(&element))
            .filter(|s| !s.is_empty())
    }

    fn selector(&self, selectors: &str) -> Result<Selector, SieveError> {
        Selector::parse(selectors).map_err(|e| SieveError::Scan {
            url: self.url.clone(),
            message: format!("invalid selector '{}': {:?}", selectors, e),
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Collects the text content of an element, trimmed
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
