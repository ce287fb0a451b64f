//! JSON export file source.

use crate::{read_records_from, FeedError, RecordSource};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use studyload_core::RawRecord;

/// Reads the batch from a JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_records(&mut self) -> Result<Vec<RawRecord>, FeedError> {
        let file = File::open(&self.path).map_err(|source| FeedError::Io {
            source_name: self.name(),
            source,
        })?;
        let records = read_records_from(BufReader::new(file))?;
        tracing::info!(path = %self.path.display(), records = records.len(), "loaded records");
        Ok(records)
    }
}
