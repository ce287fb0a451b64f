//! Institution-name tally over a batch of raw records.

use crate::extract::Extractor;
use crate::types::{tags, RawRecord};
use std::collections::HashMap;

/// Label used when a record carries no institution name.
pub const UNKNOWN_INSTITUTION: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstitutionCount {
    pub name: String,
    pub count: usize,
}

/// Institution name for one record, falling back to [`UNKNOWN_INSTITUTION`].
pub fn institution_name(record: &RawRecord) -> &str {
    Extractor::institution()
        .extract_tag(record, tags::INSTITUTION_NAME)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_INSTITUTION)
}

/// Count records per institution, most frequent first; ties keep the order in
/// which the names were first seen.
pub fn tally(records: &[RawRecord]) -> Vec<InstitutionCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<InstitutionCount> = Vec::new();
    for record in records {
        let name = institution_name(record);
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(InstitutionCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
