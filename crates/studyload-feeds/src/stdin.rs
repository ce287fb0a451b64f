//! Standard-input source, selected with the `-` path.

use crate::{read_records_from, FeedError, RecordSource};
use std::io::Read;
use studyload_core::RawRecord;

/// Reads the batch from any reader; stdin by default.
pub struct StdinSource<R = std::io::Stdin> {
    reader: R,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: std::io::stdin(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Read> StdinSource<R> {
    /// Use an arbitrary reader in place of stdin.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> RecordSource for StdinSource<R> {
    fn name(&self) -> String {
        "stdin".to_string()
    }

    fn read_records(&mut self) -> Result<Vec<RawRecord>, FeedError> {
        let records = read_records_from(&mut self.reader)?;
        tracing::info!(records = records.len(), "loaded records from stdin");
        Ok(records)
    }
}
