//! Listing record and the text patterns that feed it
//!
//! Rooms, area and floor are not separate elements on a listing card; they are
//! mined from the free-form title ("2-комнатная квартира · 45.5 м² · 3/5 этаж").
//! Each pattern is a pure function returning `None` on a miss.

use once_cell::sync::Lazy;
use regex::Regex;

static ROOMS_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+)-комнат").ok());

static AREA_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s?м²").ok());

static FLOOR_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(\d+/\d+)\s?этаж").ok());

/// One real-estate ad
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub title: String,
    pub price: Option<u64>,
    pub city: String,
    pub street: String,
    pub rooms: Option<u32>,
    pub square_m2: Option<f64>,
    /// Raw "current/total" text
    pub floor: Option<String>,
    pub link: String,
}

impl ListingRecord {
    /// Price grouped in thousands for log output ("11 500 000")
    pub fn display_price(&self) -> String {
        self.price.map(group_thousands).unwrap_or_default()
    }
}

/// Parses the digits of a price label, ignoring currency and separators
///
/// Returns `None` when no digits remain; a missing price is never zero.
/// Amounts above `u64::MAX` are also `None` and logged at debug level.
pub fn parse_price(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    match digits.parse() {
        Ok(price) => Some(price),
        Err(e) => {
            tracing::debug!("Price '{}' dropped: {}", raw.trim(), e);
            None
        }
    }
}

/// Room count from a title such as "3-комнатная квартира"
pub fn parse_rooms(title: &str) -> Option<u32> {
    let captures = ROOMS_PATTERN.as_ref()?.captures(title)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Area in square meters; accepts both "45,5 м²" and "45.5 м²"
pub fn parse_square_m2(title: &str) -> Option<f64> {
    let captures = AREA_PATTERN.as_ref()?.captures(title)?;
    captures.get(1)?.as_str().replace(',', ".").parse().ok()
}

/// Floor as "current/total" from "3/5 этаж"
pub fn parse_floor(title: &str) -> Option<String> {
    let captures = FLOOR_PATTERN.as_ref()?.captures(title)?;
    Some(captures.get(1)?.as_str().to_string())
}

/// Removes the city name and any surrounding ", —" separators from an address
pub fn derive_street(address: &str, city: &str) -> String {
    let without_city = if city.is_empty() {
        address.to_string()
    } else {
        address.replace(city, "")
    };

    without_city
        .trim_matches(|c: char| c == ',' || c == '—' || c.is_whitespace())
        .to_string()
}

/// Groups digits in threes separated by a space
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    grouped
}
