#![allow(unused)]
//! Extractor integration harness.
//!
//! # What this covers
//!
//! - **Grammar order**: quoted values win over bare `UI:` tokens; the
//!   institution extractor prefers `LO:` over a plain quoted value.
//! - **Absent and unmatched values**: both yield `None`, never an error.
//! - **Property**: any quote-free payload survives a round trip through the
//!   quoted grammar.
//!
//! # Running
//!
//! ```sh
//! cargo test --test extraction_harness
//! ```

mod common;
use common::*;
use proptest::prelude::*;
use rstest::rstest;
use studyload_core::extract::{extract, Extractor, Grammar};
use studyload_core::institutions::{institution_name, tally, InstitutionCount};
use studyload_core::tags;

// ---------------------------------------------------------------------------
// Tag values
// ---------------------------------------------------------------------------

#[rstest]
#[case::date("DA: '20241006'", Some("20241006"))]
#[case::time_with_fraction("TM: '235959.123'", Some("235959.123"))]
#[case::quoted_uid("UI: '1.2.840.10008'", Some("1.2.840.10008"))]
#[case::bare_uid("UI: 1.2.840.10008", Some("1.2.840.10008"))]
#[case::bare_uid_no_space("UI:1.2.3", Some("1.2.3"))]
#[case::empty_quotes("DA: ''", Some(""))]
#[case::no_grammar("20241006", None)]
#[case::empty("", None)]
fn tag_value_grammar(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(extract(input), expected);
}

#[test]
fn first_matching_grammar_is_reported() {
    let ex = Extractor::tag_value();
    assert_eq!(
        ex.extract_match("UI: '1.2.3'"),
        Some((Grammar::Quoted, "1.2.3"))
    );
    assert_eq!(
        ex.extract_match("UI: 1.2.3"),
        Some((Grammar::UniqueIdentifier, "1.2.3"))
    );
}

#[test]
fn absent_tag_extracts_nothing() {
    let record = RecordBuilder::study("20241006", "120000").build();
    let ex = Extractor::tag_value();
    assert_eq!(ex.extract_tag(&record, tags::STUDY_DATE), Some("20241006"));
    assert_eq!(ex.extract_tag(&record, tags::STUDY_INSTANCE_UID), None);
}

#[test]
fn custom_grammar_order() {
    let ex = Extractor::new(&[Grammar::UniqueIdentifier, Grammar::Quoted]);
    assert_eq!(ex.grammars().collect::<Vec<_>>(), [Grammar::UniqueIdentifier, Grammar::Quoted]);
    assert_eq!(ex.extract("UI: '1.2.3'"), Some("'1.2.3'"));
}

// ---------------------------------------------------------------------------
// Institutions
// ---------------------------------------------------------------------------

#[rstest]
#[case::long_string("LO: 'North Clinic'", "North Clinic")]
#[case::plain_quoted("'South Imaging'", "South Imaging")]
#[case::double_quoted_apostrophe(r#"LO: "St. Mary's Hospital""#, "St. Mary's Hospital")]
#[case::double_quoted_no_marker(r#""O'Brien Clinic""#, "O'Brien Clinic")]
#[case::blank("LO: '   '", "Unknown")]
#[case::unmatched("North Clinic", "Unknown")]
fn institution_names(#[case] value: &str, #[case] expected: &str) {
    let record = RecordBuilder::new().tag(tags::INSTITUTION_NAME, value).build();
    assert_eq!(institution_name(&record), expected);
}

#[test]
fn tally_over_export() {
    let records = studyload_feeds::parse_records(EXPORT_DECEMBER).unwrap();
    pretty_assertions::assert_eq!(
        tally(&records),
        vec![
            InstitutionCount { name: "North Clinic".into(), count: 5 },
            InstitutionCount { name: "South Imaging".into(), count: 2 },
            InstitutionCount { name: "Unknown".into(), count: 1 },
        ]
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn quoted_payload_round_trips(prefix in "[A-Z]{2}", payload in "[^']{0,40}") {
        let value = format!("{prefix}: '{payload}'");
        prop_assert_eq!(extract(&value), Some(payload.as_str()));
    }

    #[test]
    fn extraction_never_panics(value in ".{0,80}") {
        let _ = extract(&value);
        let _ = Extractor::institution().extract(&value);
    }
}
