//! studyload-report: presentation layer over the aggregator's output.
//!
//! Nothing here computes new groupings: it summarises bucket populations as
//! box-and-whisker statistics and writes them out as CSV files or
//! terminal listings.

pub mod boxplot;
pub mod listing;
pub mod tables;

pub use boxplot::BoxSummary;

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use studyload_core::{Distribution, TopEntry};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Write `top_<section>.csv`, `summary_<section>.csv` and
/// `populations_<section>.csv` under `dir`, creating it if needed.
/// Returns the paths written, in that order.
pub fn write_section_files(
    dir: &Path,
    section: &str,
    top: &[TopEntry],
    dist: &Distribution,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let [top_path, summary_path, populations_path] = section_paths(dir, section);
    write_with(&top_path, |f| tables::write_top_entries(f, top))?;
    write_with(&summary_path, |f| tables::write_summary(f, dist))?;
    write_with(&populations_path, |f| tables::write_populations(f, dist))?;

    tracing::info!(dir = %dir.display(), section, "wrote report tables");
    Ok(vec![top_path, summary_path, populations_path])
}

/// Delete the tables [`write_section_files`] would write for `section`, so a
/// section that is empty in this run leaves nothing behind from earlier
/// runs. Missing files are fine. Returns the paths actually removed.
pub fn remove_section_files(dir: &Path, section: &str) -> Result<Vec<PathBuf>, ReportError> {
    let mut removed = Vec::new();
    for path in section_paths(dir, section) {
        match fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(ReportError::Io { path, source }),
        }
    }
    if !removed.is_empty() {
        tracing::info!(
            dir = %dir.display(),
            section,
            removed = removed.len(),
            "removed stale report tables"
        );
    }
    Ok(removed)
}

fn section_paths(dir: &Path, section: &str) -> [PathBuf; 3] {
    [
        dir.join(format!("top_{section}.csv")),
        dir.join(format!("summary_{section}.csv")),
        dir.join(format!("populations_{section}.csv")),
    ]
}

fn write_with<F>(path: &Path, write: F) -> Result<(), ReportError>
where
    F: FnOnce(&mut BufWriter<File>) -> csv::Result<()>,
{
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    write(&mut out).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(io_err)
}
