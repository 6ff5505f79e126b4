//! Output module for persisting crawl results
//!
//! This module handles:
//! - The record sink interface and its CSV implementation
//! - Recording and logging crawl statistics

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::{CsvSink, CSV_HEADER, UTF8_BOM};
pub use stats::{log_statistics, CrawlStatistics, Termination};
pub use traits::{PersistOutcome, RecordSink};
