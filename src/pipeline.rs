//! Pipeline orchestration: one batch from raw records to report sections.
//!
//! ```text
//! records ──► normalize_batch ──► filter_window ──► partition ──► top_n / bucketize
//! ```
//!
//! The run is a pure function of (records, options, calendar, today).
//! Configuration errors are caught earlier, when [`RunOptions`] are resolved.

use chrono::NaiveDate;
use studyload_core::{
    bucketize, filter_window, normalize_batch, partition, top_n, CountMode, Distribution, Event,
    HolidayCalendar, RawRecord, Region, RegionCalendar, RunOptions, SkippedRecord, TimeWindow,
    TopEntry,
};

/// Where a run ran out of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStage {
    /// No record produced a valid event.
    Normalization,
    /// Events existed but none fell inside the time window.
    Window,
}

/// Aggregates for one subset of events.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// `all`, `workdays` or `holidays`; also used in output file names.
    pub name: &'static str,
    pub events: usize,
    pub top: Vec<TopEntry>,
    pub distribution: Distribution,
}

impl Section {
    fn build(name: &'static str, events: &[Event], top: usize, mode: CountMode) -> Self {
        Self {
            name,
            events: events.len(),
            top: top_n(events, top, mode),
            distribution: bucketize(events, mode),
        }
    }

    /// A section with no events has nothing worth rendering.
    pub fn is_empty(&self) -> bool {
        self.events == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub today: NaiveDate,
    pub window: TimeWindow,
    pub region: Region,
    pub count_mode: CountMode,
    pub total_records: usize,
    pub skipped: Vec<SkippedRecord>,
    pub all: Section,
    pub workdays: Section,
    pub holidays: Section,
}

impl Analysis {
    pub fn sections(&self) -> [&Section; 3] {
        [&self.all, &self.workdays, &self.holidays]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Complete(Box<Analysis>),
    NoData {
        stage: EmptyStage,
        total_records: usize,
        skipped: usize,
    },
}

/// A configured pipeline. The calendar defaults to the options' region.
#[derive(Debug, Clone)]
pub struct Pipeline<C = RegionCalendar> {
    options: RunOptions,
    calendar: C,
}

impl Pipeline {
    pub fn new(options: RunOptions) -> Self {
        let calendar = options.calendar();
        Self { options, calendar }
    }
}

impl<C: HolidayCalendar> Pipeline<C> {
    /// Use a caller-supplied holiday calendar instead of the built-in one.
    pub fn with_calendar(options: RunOptions, calendar: C) -> Self {
        Self { options, calendar }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run one batch. `today` anchors the trailing window.
    pub fn run(&self, records: &[RawRecord], today: NaiveDate) -> AnalysisOutcome {
        let opts = &self.options;
        let batch = normalize_batch(records, opts.identity);
        let skipped = batch.skipped;
        tracing::info!(
            records = records.len(),
            events = batch.events.len(),
            skipped = skipped.len(),
            "normalised records"
        );

        if batch.events.is_empty() {
            return AnalysisOutcome::NoData {
                stage: EmptyStage::Normalization,
                total_records: records.len(),
                skipped: skipped.len(),
            };
        }

        let retained = filter_window(batch.events, opts.window, today);
        tracing::info!(window = %opts.window, retained = retained.len(), "applied window");
        if retained.is_empty() {
            return AnalysisOutcome::NoData {
                stage: EmptyStage::Window,
                total_records: records.len(),
                skipped: skipped.len(),
            };
        }

        let count_mode = CountMode::infer(opts.identity, &retained);
        tracing::debug!(?count_mode, "selected count mode");

        let all = Section::build("all", &retained, opts.top_n, count_mode);
        let split = partition(retained, &self.calendar);
        tracing::info!(
            workdays = split.workdays.len(),
            holidays = split.holidays.len(),
            "partitioned by holiday calendar"
        );
        let workdays = Section::build("workdays", &split.workdays, opts.top_n, count_mode);
        let holidays = Section::build("holidays", &split.holidays, opts.top_n, count_mode);

        AnalysisOutcome::Complete(Box::new(Analysis {
            today,
            window: opts.window,
            region: opts.region,
            count_mode,
            total_records: records.len(),
            skipped,
            all,
            workdays,
            holidays,
        }))
    }
}

/// Run with the options' own region calendar.
pub fn analyze(records: &[RawRecord], options: RunOptions, today: NaiveDate) -> AnalysisOutcome {
    Pipeline::new(options).run(records, today)
}
