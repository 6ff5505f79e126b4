//! Field extractor
//!
//! Turns one listing fragment into a [`ListingRecord`]. Each field is looked
//! up on its own and a miss leaves that field empty; only a fragment without
//! any element is rejected.
//!
//! The fragment's first element is the card itself. The page-level listing
//! selector is not applied again, since a fragment has lost its ancestors.

use crate::config::{compile_selector, SelectorConfig, SiteConfig};
use crate::record::{
    derive_street, parse_floor, parse_price, parse_rooms, parse_square_m2, ListingRecord,
};
use crate::url::resolve_listing_link;
use crate::{ConfigError, ExtractionError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts listing records from card fragments
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    title: Selector,
    price: Selector,
    address: Selector,
    link: Selector,
    city: String,
    origin: Url,
}

impl FieldExtractor {
    /// Compiles the field selectors and captures the crawl's city and origin
    pub fn new(selectors: &SelectorConfig, site: &SiteConfig) -> Result<Self, ConfigError> {
        let origin = Url::parse(&site.origin)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", site.origin, e)))?;

        Ok(Self {
            title: compile_selector(&selectors.title)?,
            price: compile_selector(&selectors.price)?,
            address: compile_selector(&selectors.address)?,
            link: compile_selector(&selectors.link)?,
            city: site.city_name.clone(),
            origin,
        })
    }

    /// Builds a record from one listing fragment
    ///
    /// # Returns
    ///
    /// * `Ok(ListingRecord)` - Possibly with some fields empty
    /// * `Err(ExtractionError)` - The fragment is blank or holds no element
    pub fn extract(&self, fragment: &str) -> Result<ListingRecord, ExtractionError> {
        if fragment.trim().is_empty() {
            return Err(ExtractionError::EmptyFragment);
        }

        let document = Html::parse_fragment(fragment);
        let card = document
            .root_element()
            .children()
            .find_map(ElementRef::wrap)
            .ok_or(ExtractionError::NotAListingCard)?;

        let title = self.text_of(card, &self.title).unwrap_or_default();
        let price = self
            .text_of(card, &self.price)
            .as_deref()
            .and_then(parse_price);
        let address = self.text_of(card, &self.address).unwrap_or_default();

        Ok(ListingRecord {
            price,
            city: self.city.clone(),
            street: derive_street(&address, &self.city),
            rooms: parse_rooms(&title),
            square_m2: parse_square_m2(&title),
            floor: parse_floor(&title),
            link: self.link_of(card),
            title,
        })
    }

    /// Whitespace-normalized text of the first element matching `selector`
    fn text_of(&self, card: ElementRef<'_>, selector: &Selector) -> Option<String> {
        card.select(selector)
            .next()
            .map(|element| element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" "))
    }

    /// Absolute link to the listing page, or an empty string
    fn link_of(&self, card: ElementRef<'_>) -> String {
        card.select(&self.link)
            .next()
            .and_then(|element| element.value().attr("href"))
            .map(|href| resolve_listing_link(&self.origin, href))
            .unwrap_or_default()
    }
}
