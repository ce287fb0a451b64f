//! Static export corpora used across harnesses.
//!
//! Each corpus is a JSON document in the archive export format: an array of
//! objects mapping `"(GGGG,EEEE)"` tags to formatted value strings.

/// Late December 2024 at two sites. Records 5 and 6 are malformed (missing
/// time, impossible date). 2024-12-25 is a public holiday in DE.
///
/// | idx | date       | time       | uid   | institution   |
/// |-----|------------|------------|-------|---------------|
/// | 0   | 2024-12-23 | 09:15      | 1.1   | North Clinic  |
/// | 1   | 2024-12-23 | 09:30      | 1.2   | North Clinic  |
/// | 2   | 2024-12-23 | 09:45      | 1.2   | North Clinic  |
/// | 3   | 2024-12-25 | 10:10.250  | 1.3   | South Imaging |
/// | 4   | 2024-12-27 | 14:00      | 1.4   | South Imaging |
/// | 5   | 2024-12-27 | null       | 1.5   |               |
/// | 6   | 2024-13-30 | 08:00      | 1.6   | North Clinic  |
/// | 7   | 2024-12-30 | 08:00      | 1.7   | North Clinic  |
pub const EXPORT_DECEMBER: &str = r#"[
  {"(0008,0020)": "DA: '20241223'", "(0008,0030)": "TM: '091500'", "(0020,000D)": "UI: 1.2.826.0.1.1", "(0008,0080)": "LO: 'North Clinic'"},
  {"(0008,0020)": "DA: '20241223'", "(0008,0030)": "TM: '093000'", "(0020,000D)": "UI: 1.2.826.0.1.2", "(0008,0080)": "LO: 'North Clinic'"},
  {"(0008,0020)": "DA: '20241223'", "(0008,0030)": "TM: '094500'", "(0020,000D)": "UI: 1.2.826.0.1.2", "(0008,0080)": "LO: 'North Clinic'"},
  {"(0008,0020)": "DA: '20241225'", "(0008,0030)": "TM: '101000.250'", "(0020,000D)": "UI: 1.2.826.0.1.3", "(0008,0080)": "LO: 'South Imaging'"},
  {"(0008,0020)": "DA: '20241227'", "(0008,0030)": "TM: '140000'", "(0020,000D)": "UI: 1.2.826.0.1.4", "(0008,0080)": "LO: 'South Imaging'"},
  {"(0008,0020)": "DA: '20241227'", "(0008,0030)": null, "(0020,000D)": "UI: 1.2.826.0.1.5"},
  {"(0008,0020)": "DA: '20241330'", "(0008,0030)": "TM: '080000'", "(0020,000D)": "UI: 1.2.826.0.1.6", "(0008,0080)": "LO: 'North Clinic'"},
  {"(0008,0020)": "DA: '20241230'", "(0008,0030)": "TM: '080000'", "(0020,000D)": "UI: 1.2.826.0.1.7", "(0008,0080)": "LO: 'North Clinic'"}
]"#;

/// Anchor date for [`EXPORT_DECEMBER`]; every valid record is within 30 days.
pub const DECEMBER_TODAY: (i32, u32, u32) = (2025, 1, 1);

/// Studies from 2023 only; empty under any trailing window anchored in 2025.
pub const EXPORT_STALE: &str = r#"[
  {"(0008,0020)": "DA: '20230301'", "(0008,0030)": "TM: '080000'"},
  {"(0008,0020)": "DA: '20230302'", "(0008,0030)": "TM: '120000'"}
]"#;

/// No record yields a valid event.
pub const EXPORT_ALL_MALFORMED: &str = r#"[
  {"(0008,0020)": "DA: '2023'", "(0008,0030)": "TM: '080000'"},
  {"(0008,0030)": "TM: '120000'"},
  {"(0008,0020)": 20230302, "(0008,0030)": "TM: '120000'"}
]"#;

/// Records without identity keys.
pub const EXPORT_ANONYMOUS: &str = r#"[
  {"(0008,0020)": "DA: '20241007'", "(0008,0030)": "TM: '090000'"},
  {"(0008,0020)": "DA: '20241007'", "(0008,0030)": "TM: '091500'"},
  {"(0008,0020)": "DA: '20241014'", "(0008,0030)": "TM: '093000'"}
]"#;
