//! studyload-feeds: record source adapters for studyload.
//!
//! A source yields the whole batch of [`RawRecord`]s at once. The on-disk
//! format is the one written by the archive query step: a JSON array of
//! objects mapping `"(GGGG,EEEE)"` tags to formatted value strings.

pub mod file;
pub mod stdin;

pub use file::JsonFileSource;
pub use stdin::StdinSource;

use serde_json::Value;
use std::io::Read;
use studyload_core::RawRecord;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of records")]
    NotAnArray,
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Something that produces a batch of raw records.
pub trait RecordSource {
    /// Human-readable name for logs and error messages.
    fn name(&self) -> String;

    fn read_records(&mut self) -> Result<Vec<RawRecord>, FeedError>;
}

/// Parse an export document from a reader.
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<RawRecord>, FeedError> {
    let doc: Value = serde_json::from_reader(reader)?;
    records_from_value(doc)
}

/// Parse an export document already held in memory.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, FeedError> {
    records_from_value(serde_json::from_str(text)?)
}

fn records_from_value(doc: Value) -> Result<Vec<RawRecord>, FeedError> {
    let Value::Array(items) = doc else {
        return Err(FeedError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map
                .into_iter()
                .filter_map(|(tag, value)| match value {
                    Value::Null => None,
                    Value::String(s) => Some((tag, s)),
                    other => Some((tag, other.to_string())),
                })
                .collect::<RawRecord>()),
            _ => Err(FeedError::NotAnObject { index }),
        })
        .collect()
}
