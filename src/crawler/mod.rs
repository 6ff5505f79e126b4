//! Crawler module for catalog fetching and listing extraction
//!
//! This module contains the core scraping pipeline:
//! - HTTP fetching of catalog pages
//! - Locating listing cards on a page
//! - Extracting one record per card
//! - Pacing between requests
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod locator;
mod pacing;

pub use coordinator::{Coordinator, CrawlReport};
pub use extractor::FieldExtractor;
pub use fetcher::{build_http_client, PageFetcher};
pub use locator::ListingLocator;
pub use pacing::{DelayRange, Pacing};

use crate::config::Config;
use crate::ScoutError;

/// Runs a complete crawl with the configured CSV output
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client, selectors and pacing policy
/// 2. Walk the catalog pages until an empty page or a fetch failure
/// 3. Write every collected record to the CSV file
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `rooms` - Optional room-count filter
pub async fn crawl(config: &Config, rooms: Option<u32>) -> Result<CrawlReport, ScoutError> {
    Coordinator::new(config)?.run(rooms).await
}
