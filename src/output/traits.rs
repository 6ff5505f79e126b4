//! Record sink trait and types
//!
//! A sink receives the whole aggregate once, at the end of a crawl.

use crate::record::ListingRecord;
use crate::OutputResult;
use std::path::PathBuf;

/// What a sink did with the aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Records were written to `path`
    Written { path: PathBuf, records: usize },

    /// Nothing was written because the aggregate was empty
    Skipped,
}

impl PersistOutcome {
    /// Number of records written
    pub fn records(&self) -> usize {
        match self {
            Self::Written { records, .. } => *records,
            Self::Skipped => 0,
        }
    }
}

/// Trait for record sinks
///
/// `persist` is called once per run with every record in aggregate order.
/// An empty slice must not produce any output.
pub trait RecordSink {
    /// Persists the aggregate
    ///
    /// # Arguments
    ///
    /// * `records` - All records collected during the run
    fn persist(&mut self, records: &[ListingRecord]) -> OutputResult<PersistOutcome>;
}
