//! CSV record sink
//!
//! Spreadsheet-friendly output: UTF-8 with a byte-order mark, `;` separators,
//! every field quoted, CRLF line endings and a header row in record field order.

use crate::output::traits::{PersistOutcome, RecordSink};
use crate::record::ListingRecord;
use crate::OutputResult;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column order of the output file
pub const CSV_HEADER: [&str; 8] = [
    "title",
    "price",
    "city",
    "street",
    "rooms",
    "square_m2",
    "floor",
    "link",
];

/// Writes the aggregate to a CSV file, replacing any previous content
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn persist(&mut self, records: &[ListingRecord]) -> OutputResult<PersistOutcome> {
        if records.is_empty() {
            tracing::warn!("No data to save, {} was not written", self.path.display());
            return Ok(PersistOutcome::Skipped);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = BufWriter::new(File::create(&self.path)?);
        file.write_all(UTF8_BOM)?;

        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .has_headers(false)
            .from_writer(file);

        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.write_record(to_row(record))?;
        }
        writer.flush()?;

        tracing::info!(
            "Data saved to {} | Total: {}",
            self.path.display(),
            records.len()
        );

        Ok(PersistOutcome::Written {
            path: self.path.clone(),
            records: records.len(),
        })
    }
}

/// Renders a record as CSV cells; missing values become empty strings
fn to_row(record: &ListingRecord) -> [String; 8] {
    [
        record.title.clone(),
        record.price.map(|p| p.to_string()).unwrap_or_default(),
        record.city.clone(),
        record.street.clone(),
        record.rooms.map(|r| r.to_string()).unwrap_or_default(),
        record.square_m2.map(|s| s.to_string()).unwrap_or_default(),
        record.floor.clone().unwrap_or_default(),
        record.link.clone(),
    ]
}
