//! Tag-value extractor: pulls the raw scalar out of a formatted value string.
//!
//! Exported values carry a value-representation prefix, e.g.
//! `"DA: '20241006'"` or `"UI: 1.2.840.113619.2.55"`. An [`Extractor`] holds
//! an ordered list of [`Grammar`]s and returns the capture of the first one
//! that matches. Not matching anything is a normal outcome (`None`), never an
//! error.

use crate::types::RawRecord;
use regex::Regex;
use std::sync::LazyLock;

/// One value grammar. Each compiles to a regex with exactly one capture group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Anything between the first pair of single quotes.
    Quoted,
    /// The whitespace-delimited token after a `UI:` marker (unquoted UIDs).
    UniqueIdentifier,
    /// A single-quoted value directly after an `LO:` marker.
    LongString,
    /// A double-quoted value directly after an `LO:` marker. Exporters switch
    /// to double quotes when the value itself holds an apostrophe.
    LongStringDoubleQuoted,
    /// Anything between the first pair of double quotes.
    DoubleQuoted,
}

impl Grammar {
    pub fn pattern(self) -> &'static str {
        match self {
            Grammar::Quoted => r"'([^']*)'",
            Grammar::UniqueIdentifier => r"UI:\s*(\S+)",
            Grammar::LongString => r"LO:\s*'([^']*)'",
            Grammar::LongStringDoubleQuoted => r#"LO:\s*"([^"]*)""#,
            Grammar::DoubleQuoted => r#""([^"]*)""#,
        }
    }
}

static TAG_VALUE: LazyLock<Extractor> =
    LazyLock::new(|| Extractor::new(&[Grammar::Quoted, Grammar::UniqueIdentifier]));

static INSTITUTION: LazyLock<Extractor> = LazyLock::new(|| {
    Extractor::new(&[
        Grammar::LongString,
        Grammar::LongStringDoubleQuoted,
        Grammar::DoubleQuoted,
        Grammar::Quoted,
    ])
});

/// Ordered first-match-wins list of grammars.
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<(Grammar, Regex)>,
}

impl Extractor {
    /// Compile `grammars` in the order given.
    pub fn new(grammars: &[Grammar]) -> Self {
        let rules = grammars
            .iter()
            .map(|g| {
                let re = Regex::new(g.pattern()).expect("built-in grammar must be a valid regex");
                (*g, re)
            })
            .collect();
        Self { rules }
    }

    /// The general-purpose extractor: quoted values, then bare `UI:` tokens.
    pub fn tag_value() -> &'static Extractor {
        &TAG_VALUE
    }

    /// Extractor for institution names, which prefers the explicit `LO:` form
    /// and accepts double-quoted names before falling back to single quotes.
    pub fn institution() -> &'static Extractor {
        &INSTITUTION
    }

    pub fn grammars(&self) -> impl Iterator<Item = Grammar> + '_ {
        self.rules.iter().map(|(g, _)| *g)
    }

    /// Return the matching grammar together with the extracted value.
    pub fn extract_match<'a>(&self, value: &'a str) -> Option<(Grammar, &'a str)> {
        self.rules.iter().find_map(|(grammar, re)| {
            re.captures(value)
                .and_then(|caps| caps.get(1))
                .map(|m| (*grammar, m.as_str()))
        })
    }

    pub fn extract<'a>(&self, value: &'a str) -> Option<&'a str> {
        self.extract_match(value).map(|(_, v)| v)
    }

    /// Extract the value stored under `tag`. An absent tag behaves like an
    /// empty string and yields `None`.
    pub fn extract_tag<'a>(&self, record: &'a RawRecord, tag: &str) -> Option<&'a str> {
        self.extract(record.get(tag).unwrap_or(""))
    }
}

/// Shorthand for [`Extractor::tag_value`]`().extract(value)`.
pub fn extract(value: &str) -> Option<&str> {
    Extractor::tag_value().extract(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
