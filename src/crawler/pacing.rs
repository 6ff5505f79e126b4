//! Pacing policy
//!
//! Randomized pauses between listings and between pages keep the request
//! pattern from looking like a burst. The ranges are fixed for a run; there is
//! no back-off on errors.

use crate::config::PacingConfig;
use std::time::Duration;

/// Inclusive range of delays in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    /// Creates a range; bounds given in the wrong order are swapped
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// A range that never waits
    pub fn zero() -> Self {
        Self::from_millis(0, 0)
    }

    /// Draws a delay uniformly from the range
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(fastrand::u64(self.min_ms..=self.max_ms))
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

/// Delays applied by the crawl loop
#[derive(Debug, Clone)]
pub struct Pacing {
    listing: DelayRange,
    page: DelayRange,
}

impl Pacing {
    pub fn new(listing: DelayRange, page: DelayRange) -> Self {
        Self { listing, page }
    }

    /// Builds the pacing policy from configuration
    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(
            DelayRange::from_millis(config.listing_delay_min_ms, config.listing_delay_max_ms),
            DelayRange::from_millis(config.page_delay_min_ms, config.page_delay_max_ms),
        )
    }

    /// Pacing that never sleeps
    pub fn disabled() -> Self {
        Self::new(DelayRange::zero(), DelayRange::zero())
    }

    pub fn listing_range(&self) -> DelayRange {
        self.listing
    }

    pub fn page_range(&self) -> DelayRange {
        self.page
    }

    /// Sleeps for a listing delay and returns how long it waited
    pub async fn delay_between_listings(&self) -> Duration {
        pause(self.listing.sample()).await
    }

    /// Sleeps for a page delay and returns how long it waited
    pub async fn delay_between_pages(&self) -> Duration {
        let delay = pause(self.page.sample()).await;
        tracing::debug!("Waited {:?} before next page", delay);
        delay
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_config(&PacingConfig::default())
    }
}

async fn pause(delay: Duration) -> Duration {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    delay
}
