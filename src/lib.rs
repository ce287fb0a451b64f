//! studyload: imaging study load analysis
//!
//! Batch analyser for DICOM study exports. Reads JSON dumps of tag values,
//! turns each record into a timestamped event and reports when studies
//! happen: the busiest (date, hour) slots and the day-to-day variation of
//! every weekday × hour bucket, split by workdays and public holidays.
//!
//! # Architecture
//!
//! ```text
//! Feeds ──► Normalizer ──► Window ──► Calendar ──► Aggregator ──► Report
//!                                                      │
//!                                                      └──► listings / CSV
//! ```
//!
//! Everything runs synchronously on the calling thread. The layers live in
//! the workspace crates and are re-exported here so that integration tests
//! and benches can reach them through one import path.

pub mod pipeline;

pub use pipeline::{analyze, Analysis, AnalysisOutcome, EmptyStage, Pipeline, Section};

pub use studyload_core as analysis;
pub use studyload_feeds as feeds;
pub use studyload_report as report;

pub use studyload_core::{
    Config, CountMode, Event, IdentityPolicy, RawRecord, Region, RegionCalendar, RunOptions,
    TimeWindow,
};
