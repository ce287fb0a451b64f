//! Domain-specific assertion macros for studyload harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* stage of the pipeline produced the unexpected value.

// ---------------------------------------------------------------------------
// Normalizer assertions
// ---------------------------------------------------------------------------

/// Assert that a batch skipped exactly the given record indices.
///
/// ```rust
/// assert_skipped!(batch, [5, 6]);
/// ```
#[macro_export]
macro_rules! assert_skipped {
    ($batch:expr, [$($index:expr),* $(,)?]) => {{
        let batch: &studyload_core::NormalizedBatch = &$batch;
        let actual: Vec<usize> = batch.skipped.iter().map(|s| s.index).collect();
        let expected: Vec<usize> = vec![$($index),*];
        if actual != expected {
            panic!(
                "assert_skipped! failed:\n  expected indices: {:?}\n  actual indices:   {:?}\n  reasons: {:?}",
                expected,
                actual,
                batch.skipped.iter().map(|s| s.reason.to_string()).collect::<Vec<_>>()
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Aggregator assertions
// ---------------------------------------------------------------------------

/// Assert that a distribution has one bucket per weekday × hour, in
/// Monday-first order.
#[macro_export]
macro_rules! assert_full_grid {
    ($dist:expr) => {{
        let dist: &studyload_core::Distribution = &$dist;
        if dist.len() != 168 {
            panic!("assert_full_grid! failed: {} buckets instead of 168", dist.len());
        }
        for (i, bucket) in dist.iter().enumerate() {
            let weekday = studyload_core::WEEKDAYS[i / 24];
            let hour = (i % 24) as u32;
            if bucket.weekday != weekday || bucket.hour != hour {
                panic!(
                    "assert_full_grid! failed at position {}:\n  expected: {:?} {:02}\n  actual:   {:?} {:02}",
                    i, weekday, hour, bucket.weekday, bucket.hour
                );
            }
        }
    }};
}

/// Assert Top-N rows as `(date, hour, count)` triples.
///
/// ```rust
/// assert_top_rows!(rows, [("2024-12-23", 9, 2), ("2024-12-25", 10, 1)]);
/// ```
#[macro_export]
macro_rules! assert_top_rows {
    ($rows:expr, [$(($date:expr, $hour:expr, $count:expr)),* $(,)?]) => {{
        let rows: &[studyload_core::TopEntry] = &$rows;
        let actual: Vec<(String, u32, usize)> = rows
            .iter()
            .map(|r| (r.date.format("%Y-%m-%d").to_string(), r.hour, r.count))
            .collect();
        let expected: Vec<(String, u32, usize)> =
            vec![$(($date.to_string(), $hour, $count)),*];
        pretty_assertions::assert_eq!(actual, expected, "top-N rows differ");
    }};
}
