//! CSV emitters for the aggregator's tabular output.

use crate::boxplot::BoxSummary;
use std::io::Write;
use studyload_core::{Distribution, TopEntry};

pub const TOP_HEADER: [&str; 4] = ["date", "weekday", "hour", "count"];

pub const SUMMARY_HEADER: [&str; 11] = [
    "weekday",
    "hour",
    "n",
    "min",
    "q1",
    "median",
    "q3",
    "max",
    "whisker_low",
    "whisker_high",
    "outliers",
];

pub const POPULATION_HEADER: [&str; 4] = ["weekday", "hour", "date", "count"];

/// Top-N rows under the `date,weekday,hour,count` header.
pub fn write_top_entries<W: Write>(out: W, rows: &[TopEntry]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(TOP_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.weekday_name().to_string(),
            row.hour.to_string(),
            row.count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// One box-and-whisker row per bucket, all 168 of them. Empty buckets carry
/// `n = 0` and blank statistics.
pub fn write_summary<W: Write>(out: W, dist: &Distribution) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(SUMMARY_HEADER)?;
    for bucket in dist.iter() {
        let mut record = vec![bucket.weekday_name().to_string(), bucket.hour.to_string()];
        match BoxSummary::from_population(&bucket.population()) {
            Some(s) => {
                record.push(s.n.to_string());
                record.extend(
                    [s.min, s.q1, s.median, s.q3, s.max, s.whisker_low, s.whisker_high]
                        .iter()
                        .map(|v| v.to_string()),
                );
                record.push(
                    s.outliers
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(";"),
                );
            }
            None => {
                record.push("0".to_string());
                record.extend(std::iter::repeat(String::new()).take(8));
            }
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Long-form populations: one row per (bucket, date) observation.
pub fn write_populations<W: Write>(out: W, dist: &Distribution) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(POPULATION_HEADER)?;
    for bucket in dist.iter() {
        for obs in &bucket.observations {
            wtr.write_record([
                bucket.weekday_name().to_string(),
                bucket.hour.to_string(),
                obs.date.format("%Y-%m-%d").to_string(),
                obs.count.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
