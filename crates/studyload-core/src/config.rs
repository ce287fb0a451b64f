//! Configuration types for studyload.
//!
//! [`Config::load`] reads `~/.config/studyload/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).
//!
//! Settings are kept as strings here; [`AnalysisConfig::resolve`] validates
//! them into [`RunOptions`] before any record is read.

use crate::aggregate::DEFAULT_TOP_N;
use crate::calendar::{Region, RegionCalendar};
use crate::normalizer::IdentityPolicy;
use crate::window::TimeWindow;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[analysis]
window   = "all"
region   = "DE"
top_n    = 10
identity = "optional"
# Site closure days counted as holidays, e.g. ["2024-12-24", "2024-12-31"]
# extra_holidays = []

[output]
directory = "reports"
csv       = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/studyload/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[analysis]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window")]
    pub window: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_identity")]
    pub identity: String,
    #[serde(default)]
    pub extra_holidays: Vec<String>,
}

fn default_window() -> String { "all".to_string() }
fn default_region() -> String { "DE".to_string() }
fn default_top_n() -> usize { DEFAULT_TOP_N }
fn default_identity() -> String { "optional".to_string() }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            region: default_region(),
            top_n: default_top_n(),
            identity: default_identity(),
            extra_holidays: Vec::new(),
        }
    }
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_csv")]
    pub csv: bool,
}

fn default_directory() -> PathBuf { PathBuf::from("reports") }
fn default_csv() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            csv: default_csv(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/studyload/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(&path, false)
    }

    /// Load an explicit config file over the built-in defaults. The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

/// Validated, typed analysis settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub window: TimeWindow,
    pub region: Region,
    pub top_n: usize,
    pub identity: IdentityPolicy,
    pub extra_holidays: Vec<NaiveDate>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            window: TimeWindow::All,
            region: Region::De,
            top_n: DEFAULT_TOP_N,
            identity: IdentityPolicy::Optional,
            extra_holidays: Vec::new(),
        }
    }
}

impl RunOptions {
    /// Holiday calendar for the configured region plus closure days.
    pub fn calendar(&self) -> RegionCalendar {
        RegionCalendar::new(self.region).with_extra_days(self.extra_holidays.iter().copied())
    }
}

impl AnalysisConfig {
    /// Validate every setting. Fails on the first unknown value.
    pub fn resolve(&self) -> crate::Result<RunOptions> {
        if self.top_n == 0 {
            return Err(crate::Error::invalid(
                "top_n",
                "0",
                "a positive number of rows",
            ));
        }
        let extra_holidays = self
            .extra_holidays
            .iter()
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map_err(|_| crate::Error::invalid("extra holiday", s.as_str(), "a YYYY-MM-DD date"))
            })
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(RunOptions {
            window: self.window.parse()?,
            region: self.region.parse()?,
            top_n: self.top_n,
            identity: self.identity.parse()?,
            extra_holidays,
        })
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("studyload")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.analysis.window, "all");
        assert_eq!(cfg.analysis.region, "DE");
        assert_eq!(cfg.analysis.top_n, 10);
        assert!(cfg.analysis.extra_holidays.is_empty());
        assert!(cfg.output.csv);
        assert_eq!(cfg.output.directory, PathBuf::from("reports"));
    }

    #[test]
    fn defaults_resolve() {
        let opts = Config::defaults().analysis.resolve().unwrap();
        assert_eq!(opts, RunOptions::default());
    }

    #[test]
    fn resolve_rejects_bad_values() {
        let mut analysis = AnalysisConfig::default();
        analysis.window = "weekly".into();
        assert!(analysis.resolve().is_err());

        let mut analysis = AnalysisConfig::default();
        analysis.region = "Atlantis".into();
        let err = analysis.resolve().unwrap_err();
        assert!(err.to_string().contains("Atlantis"));

        let mut analysis = AnalysisConfig::default();
        analysis.top_n = 0;
        assert!(analysis.resolve().is_err());

        let mut analysis = AnalysisConfig::default();
        analysis.extra_holidays = vec!["24.12.2024".into()];
        assert!(analysis.resolve().is_err());
    }

    #[test]
    fn extra_holidays_feed_the_calendar() {
        use crate::calendar::HolidayCalendar;

        let mut analysis = AnalysisConfig::default();
        analysis.extra_holidays = vec!["2024-12-24".into()];
        let opts = analysis.resolve().unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
        assert!(opts.calendar().is_holiday(day));
    }
}
