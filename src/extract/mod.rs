//! Item extraction from matched pages
//!
//! An [`Extractor`] turns one matched page into zero or more [`Item`]s. Two
//! extractors are provided:
//! - [`PageExtractor`]: generic title and meta description
//! - [`ProductExtractor`]: product detail pages (name, breadcrumb, price, unit price)

mod page;
mod product;

pub use page::PageExtractor;
pub use product::ProductExtractor;

use crate::collector::Match;
use crate::config::{ExtractorConfig, ExtractorKind};
use scraper::{ElementRef, Selector};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while extracting items from a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{url}: missing {what}")]
    MissingElement { url: String, what: String },

    #[error("{url}: invalid {what} '{value}'")]
    InvalidValue {
        url: String,
        what: String,
        value: String,
    },

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// A structured record extracted from a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Item {
    Page {
        url: String,
        title: Option<String>,
        description: Option<String>,
    },
    Product {
        url: String,
        name: String,
        category: Vec<String>,
        price: f64,
        currency: String,
        description: String,
        #[serde(rename = "unit-price")]
        unit_price: f64,
        unit: String,
    },
}

impl Item {
    /// The page URL the item was extracted from
    pub fn url(&self) -> &str {
        match self {
            Item::Page { url, .. } | Item::Product { url, .. } => url,
        }
    }
}

/// Turns a matched page into items
pub trait Extractor {
    fn extract(&self, page: &Match) -> Result<Vec<Item>, ExtractError>;
}

impl<E: Extractor + ?Sized> Extractor for &E {
    fn extract(&self, page: &Match) -> Result<Vec<Item>, ExtractError> {
        (**self).extract(page)
    }
}

/// The extractor selected by the `[extractor]` config section
#[derive(Debug, Clone)]
pub enum ConfiguredExtractor {
    Page(PageExtractor),
    Product(ProductExtractor),
}

impl ConfiguredExtractor {
    pub fn from_config(config: &ExtractorConfig) -> Self {
        match config.kind {
            ExtractorKind::Page => Self::Page(PageExtractor),
            ExtractorKind::Product => Self::Product(ProductExtractor),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Page(_) => "page",
            Self::Product(_) => "product",
        }
    }
}

impl Extractor for ConfiguredExtractor {
    fn extract(&self, page: &Match) -> Result<Vec<Item>, ExtractError> {
        match self {
            Self::Page(extractor) => extractor.extract(page),
            Self::Product(extractor) => extractor.extract(page),
        }
    }
}

pub(crate) fn selector(selectors: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selectors).map_err(|e| ExtractError::Selector {
        selector: selectors.to_string(),
        message: format!("{:?}", e),
    })
}

/// First descendant of `scope` matching `selectors`
pub(crate) fn first<'a>(
    scope: ElementRef<'a>,
    selectors: &str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let selector = selector(selectors)?;
    Ok(scope.select(&selector).next())
}
