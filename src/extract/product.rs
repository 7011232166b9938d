//! Product detail page extraction
//!
//! Expects the markup of a grocer product page:
//!
//! ```html
//! <div class="product-detail">
//!   <ol><li>Fruit</li><li>Apples</li></ol>
//!   <h1>Red apples</h1>
//!   <p class="description">Crisp.</p>
//!   <div itemprop="price" content="29.90">
//!     <span itemprop="priceCurrency" content="NOK"></span>
//!   </div>
//!   <div class="unit-price">kr 39,87 per kg</div>
//! </div>
//! ```

use crate::collector::{text_of, Match};
use crate::extract::{first, selector, ExtractError, Extractor, Item};
use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

/// Extracts one product per product detail page
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductExtractor;

fn unit_price_pattern() -> &'static Regex {
    static UNIT_PRICE_RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    UNIT_PRICE_RE.get_or_init(|| {
        Regex::new(r"\w+ (\d+)[.,](\d+) per (\w+)").expect("unit price regex is valid")
    })
}

impl Extractor for ProductExtractor {
    fn extract(&self, page: &Match) -> Result<Vec<Item>, ExtractError> {
        let url = page.url.as_str();
        let missing = |what: &str| ExtractError::MissingElement {
            url: url.to_string(),
            what: what.to_string(),
        };

        let detail_selector = selector("div.product-detail")?;
        let details = page
            .document
            .html()
            .select(&detail_selector)
            .next()
            .ok_or_else(|| missing("div.product-detail"))?;

        let category: Vec<String> = match first(details, "ol")? {
            Some(breadcrumb) => {
                let li = selector("li")?;
                breadcrumb
                    .select(&li)
                    .map(|element| text_of(&element))
                    .collect()
            }
            None => return Err(missing("breadcrumb")),
        };

        let name = first(details, "h1")?
            .map(|element| text_of(&element))
            .ok_or_else(|| missing("h1"))?;

        let description = first(details, "p.description")?
            .map(|element| text_of(&element))
            .unwrap_or_default();

        let price_box = first(details, r#"div[itemprop="price"]"#)?
            .ok_or_else(|| missing("price"))?;
        let price = parse_number(url, "price", content_of(&price_box, "price", url)?)?;

        let currency = first(price_box, r#"span[itemprop="priceCurrency"]"#)?
            .ok_or_else(|| missing("currency"))?;
        let currency = content_of(&currency, "currency", url)?.trim().to_string();

        let unit_box = first(details, "div.unit-price")?.ok_or_else(|| missing("unit price"))?;
        let unit_text = text_of(&unit_box);
        let captures = unit_price_pattern()
            .captures(&unit_text)
            .ok_or_else(|| ExtractError::InvalidValue {
                url: url.to_string(),
                what: "unit price".to_string(),
                value: unit_text.clone(),
            })?;
        let unit_price = parse_number(
            url,
            "unit price",
            &format!("{}.{}", &captures[1], &captures[2]),
        )?;
        let unit = captures[3].to_string();

        tracing::trace!("Extracted product '{}' from {}", name, url);

        Ok(vec![Item::Product {
            url: url.to_string(),
            name,
            category,
            price,
            currency,
            description,
            unit_price,
            unit,
        }])
    }
}

fn content_of<'a>(
    element: &ElementRef<'a>,
    what: &str,
    url: &str,
) -> Result<&'a str, ExtractError> {
    element
        .value()
        .attr("content")
        .ok_or_else(|| ExtractError::MissingElement {
            url: url.to_string(),
            what: format!("{} content", what),
        })
}

fn parse_number(url: &str, what: &str, value: &str) -> Result<f64, ExtractError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ExtractError::InvalidValue {
            url: url.to_string(),
            what: what.to_string(),
            value: value.to_string(),
        })
}
