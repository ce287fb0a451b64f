//! studyload-core: reconstruction and aggregation of imaging study events.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! types used across all stages.
//!
//! # Architecture
//!
//! ```text
//! RawRecord ──► extract ──► normalizer ──► window ──► calendar ──► aggregate
//!                                                                     │
//!                                            (studyload-report) ◄─────┘
//! ```
//!
//! Every stage is a pure batch transform over an in-memory `Vec`; nothing
//! keeps state between runs and nothing reads the wall clock.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod institutions;
pub mod normalizer;
pub mod types;
pub mod window;

pub use aggregate::{bucketize, top_n, Bucket, CountMode, Distribution, Observation, TopEntry};
pub use calendar::{partition, HolidayCalendar, Partition, Region, RegionCalendar};
pub use config::{Config, RunOptions};
pub use error::{Error, MalformedRecord, Result};
pub use normalizer::{normalize, normalize_batch, IdentityPolicy, NormalizedBatch, SkippedRecord};
pub use types::{day_name, tags, Event, RawRecord, WEEKDAYS};
pub use window::{filter_window, TimeWindow};
