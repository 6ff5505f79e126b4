//! Listing locator
//!
//! Finds the ad cards on a catalog page and hands them on as standalone
//! HTML fragments, in document order.

use crate::config::{compile_selector, SelectorConfig};
use crate::ConfigError;
use scraper::{Html, Selector};

/// Splits a catalog page into listing fragments
#[derive(Debug, Clone)]
pub struct ListingLocator {
    listing: Selector,
}

impl ListingLocator {
    /// Compiles the listing card selector
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            listing: compile_selector(&selectors.listing)?,
        })
    }

    /// Returns the outer HTML of every listing card on the page
    ///
    /// An empty result is not an error: it marks the end of the catalog.
    pub fn locate(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.listing)
            .map(|card| card.html())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> ListingLocator {
        ListingLocator::new(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_locate_in_document_order() {
        let html = r#"<html><body>
            <section>
              <div class="a-card" data-id="1"><a class="a-card__title">first</a></div>
              <div class="a-card a-card--top" data-id="2"><a class="a-card__title">second</a></div>
            </section>
            <div class="a-card" data-id="3"><a class="a-card__title">third</a></div>
            </body></html>"#;

        let fragments = locator().locate(html);

        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].contains("first"));
        assert!(fragments[1].contains("second"));
        assert!(fragments[2].contains("third"));
    }

    #[test]
    fn test_no_listings_is_empty() {
        let html = r#"<html><body><div class="paginator">Ничего не найдено</div></body></html>"#;
        assert!(locator().locate(html).is_empty());
    }

    #[test]
    fn test_ignores_other_elements_with_card_class() {
        let html = r#"<html><body><span class="a-card">not a card</span></body></html>"#;
        assert!(locator().locate(html).is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(locator().locate("").is_empty());
    }

    #[test]
    fn test_custom_selector() {
        let selectors = SelectorConfig {
            listing: "article.ad".to_string(),
            ..SelectorConfig::default()
        };
        let locator = ListingLocator::new(&selectors).unwrap();

        let html = r#"<article class="ad">a</article><article class="ad">b</article>"#;
        assert_eq!(locator.locate(html).len(), 2);
    }
}
