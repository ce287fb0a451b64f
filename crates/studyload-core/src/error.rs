//! Error types.
//!
//! Two kinds of failure exist as separate types:
//! [`Error`] aborts a run (bad configuration), [`MalformedRecord`] only ever
//! skips a single record.

use thiserror::Error;

/// A configuration defect that fails the whole run before any aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {name} {value:?}: expected {expected}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Error::InvalidArgument {
            name,
            value: value.into(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a record could not be turned into an [`Event`](crate::Event).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("study date missing")]
    MissingDate,
    #[error("study time missing")]
    MissingTime,
    #[error("unparseable date/time {date:?} {time:?}")]
    InvalidDateTime { date: String, time: String },
    #[error("study instance uid missing")]
    MissingIdentity,
}
