//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the page loop that coordinates:
//! - Fetching catalog pages one at a time, in order
//! - Locating listing cards and extracting a record from each
//! - Pacing between listings and between pages
//! - Persisting the aggregate once the loop stops
//!
//! The loop stops on the first page without listings or the first fetch
//! failure. Records collected before a failure are still persisted.

use crate::config::Config;
use crate::crawler::{FieldExtractor, ListingLocator, PageFetcher, Pacing};
use crate::output::{log_statistics, CrawlStatistics, CsvSink, PersistOutcome, RecordSink, Termination};
use crate::record::ListingRecord;
use crate::state::CrawlState;
use crate::ScoutError;

/// Result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Terminal state of the loop
    pub final_state: CrawlState,

    /// Counters for the run
    pub statistics: CrawlStatistics,

    /// What the sink did with the aggregate
    pub outcome: PersistOutcome,
}

/// Main crawler coordinator structure
pub struct Coordinator<S = CsvSink> {
    fetcher: PageFetcher,
    locator: ListingLocator,
    extractor: FieldExtractor,
    pacing: Pacing,
    sink: S,
    city_slug: String,
    max_pages: Option<u32>,
}

impl Coordinator<CsvSink> {
    /// Creates a coordinator writing to the configured CSV file
    pub fn new(config: &Config) -> Result<Self, ScoutError> {
        Self::with_sink(config, CsvSink::new(&config.output.csv_path))
    }
}

impl<S: RecordSink> Coordinator<S> {
    /// Creates a coordinator with a custom record sink
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScoutError)` - Invalid selectors, URLs or HTTP client settings
    pub fn with_sink(config: &Config, sink: S) -> Result<Self, ScoutError> {
        Ok(Self {
            fetcher: PageFetcher::new(&config.site)?,
            locator: ListingLocator::new(&config.selectors)?,
            extractor: FieldExtractor::new(&config.selectors, &config.site)?,
            pacing: Pacing::from_config(&config.pacing),
            sink,
            city_slug: config.site.city_slug.clone(),
            max_pages: config.crawler.max_pages,
        })
    }

    /// Replaces the pacing policy
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs the crawl loop and persists the aggregate
    ///
    /// A fetch failure or an illegal state transition ends the loop but is
    /// not returned as an error; only a failure to persist the records is.
    ///
    /// # Arguments
    ///
    /// * `rooms` - Optional room-count filter sent with every page request
    pub async fn run(&mut self, rooms: Option<u32>) -> Result<CrawlReport, ScoutError> {
        tracing::info!(
            "START | City: {} | Rooms: {}",
            self.city_slug,
            rooms.map_or_else(|| "any".to_string(), |r| r.to_string())
        );

        let mut statistics = CrawlStatistics::start();
        let mut records: Vec<ListingRecord> = Vec::new();
        let mut state = CrawlState::initial();
        let mut html = String::new();
        let mut fragments: Vec<String> = Vec::new();

        while !state.is_terminal() {
            let next = match state {
                CrawlState::Fetching { page } => {
                    tracing::info!("📄 Parsing page {}", page);
                    match self.fetcher.fetch(page, rooms).await {
                        Ok(body) => {
                            statistics.pages_fetched += 1;
                            html = body;
                            CrawlState::Locating { page }
                        }
                        Err(e) => {
                            tracing::error!("❌ Page {} unavailable: {}", page, e);
                            statistics.finish(Termination::FetchFailed { page });
                            CrawlState::DoneFailure
                        }
                    }
                }
                CrawlState::Locating { page } => {
                    fragments = self.locator.locate(&html);
                    if fragments.is_empty() {
                        tracing::info!("No listings found on page {}. Crawl finished.", page);
                        statistics.finish(Termination::EmptyPage { page });
                        CrawlState::DoneSuccess
                    } else {
                        tracing::info!("🔎 Found {} listings on page {}", fragments.len(), page);
                        statistics.listings_located += fragments.len() as u64;
                        CrawlState::ExtractingEach { page }
                    }
                }
                CrawlState::ExtractingEach { page } => {
                    let batch = std::mem::take(&mut fragments);
                    self.extract_fragments(page, batch, &mut records, &mut statistics)
                        .await;

                    match self.max_pages {
                        Some(limit) if page >= limit => {
                            tracing::info!("Page limit of {} reached. Crawl finished.", limit);
                            statistics.finish(Termination::PageLimit { pages: page });
                            CrawlState::DoneSuccess
                        }
                        _ => CrawlState::Pacing { page },
                    }
                }
                CrawlState::Pacing { page } => {
                    self.pacing.delay_between_pages().await;
                    CrawlState::Fetching {
                        page: page.saturating_add(1),
                    }
                }
                CrawlState::DoneSuccess | CrawlState::DoneFailure => break,
            };

            state = advance(state, next, &mut statistics);
        }

        let outcome = self.sink.persist(&records)?;
        log_statistics(&statistics);

        Ok(CrawlReport {
            final_state: state,
            statistics,
            outcome,
        })
    }

    /// Extracts a record from each fragment of one page
    ///
    /// A fragment that cannot be processed is logged and counted, and the
    /// listing delay still applies after it.
    async fn extract_fragments(
        &self,
        page: u32,
        fragments: Vec<String>,
        records: &mut Vec<ListingRecord>,
        statistics: &mut CrawlStatistics,
    ) {
        for fragment in fragments {
            match self.extractor.extract(&fragment) {
                Ok(record) => {
                    tracing::info!(
                        "✔ {} | {} | {}",
                        record.title,
                        record.display_price(),
                        record.street
                    );
                    statistics.records_extracted += 1;
                    records.push(record);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse listing on page {}: {}", page, e);
                    statistics.fragments_skipped += 1;
                }
            }
            self.pacing.delay_between_listings().await;
        }
    }
}

/// Moves the loop to `next`, or halts it when the step is illegal
///
/// A halted loop ends in `DoneFailure` so the records collected so far are
/// still persisted.
fn advance(state: CrawlState, next: CrawlState, statistics: &mut CrawlStatistics) -> CrawlState {
    if state.can_transition_to(&next) {
        tracing::trace!("{} -> {}", state, next);
        return next;
    }

    let error = ScoutError::InvalidTransition {
        from: state,
        to: next,
    };
    tracing::error!("❌ Crawl halted: {}", error);
    statistics.finish(Termination::Halted {
        page: state.page().unwrap_or_default(),
    });
    CrawlState::DoneFailure
}
