use crate::collector::{text_of, Match};
use crate::extract::{selector, ExtractError, Extractor, Item};

/// Extracts the title and meta description of any page
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl Extractor for PageExtractor {
    fn extract(&self, page: &Match) -> Result<Vec<Item>, ExtractError> {
        let meta = selector(r#"meta[name="description"]"#)?;
        let description = page
            .document
            .html()
            .select(&meta)
            .filter_map(|element| element.value().attr("content"))
            .map(|content| content.trim().to_string())
            .find(|content| !content.is_empty());

        let title = page.document.title().or_else(|| {
            // Fall back to the first heading
            let h1 = selector("h1").ok()?;
            page.document
                .html()
                .select(&h1)
                .next()
                .map(|element| text_of(&element))
                .filter(|text| !text.is_empty())
        });

        Ok(vec![Item::Page {
            url: page.url.clone(),
            title,
            description,
        }])
    }
}
