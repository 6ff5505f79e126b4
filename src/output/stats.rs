//! Crawl statistics
//!
//! Counters kept by the coordinator during a run and logged as a summary
//! block once the records are saved.

use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// Why the crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A page without listings ended the catalog
    EmptyPage { page: u32 },

    /// A page could not be fetched
    FetchFailed { page: u32 },

    /// The configured page cap was reached
    PageLimit { pages: u32 },

    /// The loop refused an illegal state transition
    Halted { page: u32 },
}

impl Termination {
    /// Returns true unless the crawl was cut short by a fault
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::FetchFailed { .. } | Self::Halted { .. })
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPage { page } => write!(f, "no listings on page {}", page),
            Self::FetchFailed { page } => write!(f, "page {} could not be fetched", page),
            Self::PageLimit { pages } => write!(f, "page limit of {} reached", pages),
            Self::Halted { page } => write!(f, "halted on page {}", page),
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Local>,

    /// When the crawl loop stopped
    pub finished_at: Option<DateTime<Local>>,

    /// Pages fetched successfully
    pub pages_fetched: u32,

    /// Listing cards found across all pages
    pub listings_located: u64,

    /// Records added to the aggregate
    pub records_extracted: u64,

    /// Fragments that could not be processed at all
    pub fragments_skipped: u64,

    /// Why the loop stopped
    pub termination: Option<Termination>,
}

impl CrawlStatistics {
    /// Starts a new statistics block at the current time
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            finished_at: None,
            pages_fetched: 0,
            listings_located: 0,
            records_extracted: 0,
            fragments_skipped: 0,
            termination: None,
        }
    }

    /// Marks the crawl loop as stopped
    pub fn finish(&mut self, termination: Termination) {
        self.termination = Some(termination);
        self.finished_at = Some(Local::now());
    }

    /// Wall-clock time between start and finish
    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_at
            .and_then(|finished| (finished - self.started_at).to_std().ok())
    }

    /// Share of located listings that became records, as a percentage
    pub fn extraction_rate(&self) -> f64 {
        if self.listings_located == 0 {
            return 0.0;
        }
        (self.records_extracted as f64 / self.listings_located as f64) * 100.0
    }
}

/// Logs the statistics as a summary block
pub fn log_statistics(stats: &CrawlStatistics) {
    tracing::info!("=== Crawl Statistics ===");
    tracing::info!("  Started: {}", stats.started_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(elapsed) = stats.elapsed() {
        tracing::info!("  Duration: {}s", elapsed.as_secs());
    }
    tracing::info!("  Pages fetched: {}", stats.pages_fetched);
    tracing::info!("  Listings found: {}", stats.listings_located);
    tracing::info!(
        "  Records extracted: {} ({:.1}%)",
        stats.records_extracted,
        stats.extraction_rate()
    );
    if stats.fragments_skipped > 0 {
        tracing::warn!("  Listings skipped: {}", stats.fragments_skipped);
    }
    if let Some(termination) = stats.termination {
        tracing::info!("  Stopped: {}", termination);
    }
}
