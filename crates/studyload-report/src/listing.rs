//! Plain-text listings for terminal output.

use crate::boxplot::BoxSummary;
use chrono::Weekday;
use std::fmt::Write;
use studyload_core::institutions::InstitutionCount;
use studyload_core::{day_name, Distribution, TopEntry};

const BAR_WIDTH: f64 = 30.0;
const STRING_WRITE: &str = "writing to a String cannot fail";

/// Ranked Top-N table.
pub fn render_top(rows: &[TopEntry]) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{:>4}  {:<10}  {:<9}  {:>4}  {:>5}",
        "rank", "date", "weekday", "hour", "count"
    )
    .expect(STRING_WRITE);
    for (i, row) in rows.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<10}  {:<9}  {:>4}  {:>5}",
            i + 1,
            row.date.format("%Y-%m-%d").to_string(),
            row.weekday_name(),
            format!("{:02}", row.hour),
            row.count
        )
        .expect(STRING_WRITE);
    }
    out
}

/// Per-hour box summary for one weekday, with a bar scaled to the median.
///
/// Every hour 0–23 is listed; hours without data show `n=0`.
pub fn render_weekday(dist: &Distribution, weekday: Weekday) -> String {
    let summaries: Vec<Option<BoxSummary>> = dist
        .weekday(weekday)
        .iter()
        .map(|b| BoxSummary::from_population(&b.population()))
        .collect();
    let peak = summaries
        .iter()
        .flatten()
        .map(|s| s.median)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    writeln!(out, "Study distribution per hour for {}", day_name(weekday)).expect(STRING_WRITE);
    for (hour, summary) in summaries.iter().enumerate() {
        match summary {
            Some(s) => {
                let width = if peak > 0.0 {
                    (s.median / peak * BAR_WIDTH).round() as usize
                } else {
                    0
                };
                writeln!(
                    out,
                    "{hour:02}  n={:<3}  median={:<5}  q1..q3={}..{}  max={}  {}",
                    s.n,
                    s.median,
                    s.q1,
                    s.q3,
                    s.max,
                    "#".repeat(width)
                )
                .expect(STRING_WRITE);
            }
            None => {
                writeln!(out, "{hour:02}  n=0").expect(STRING_WRITE);
            }
        }
    }
    out
}

/// Institution tally in `name: count` lines.
pub fn render_institutions(counts: &[InstitutionCount]) -> String {
    let mut out = String::from("Institution Name Counts (sorted by occurrences):\n");
    for c in counts {
        writeln!(out, "{}: {}", c.name, c.count).expect(STRING_WRITE);
    }
    out
}
