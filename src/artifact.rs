//! Persistence of the JSON report under the run root.
//!
//! Workflow tooling collects run outputs from the run root, so the harness
//! can drop its machine-readable report there alongside whatever the node
//! produced. Directory access goes through `cap-std` so writes stay scoped
//! to the run root.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

use crate::report::{self, ReportError};
use crate::runner::RunSummary;

/// File name of the report artifact written under the run root.
pub const REPORT_FILE_NAME: &str = "report.json";

/// Errors raised while writing the report artifact.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ArtifactError {
    /// Indicates a file system operation failed.
    #[error("failed to write {path}: {message}")]
    Io {
        /// Path the operation targeted.
        path: Utf8PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// Indicates the report could not be rendered.
    #[error(transparent)]
    Render(#[from] ReportError),
}

/// Writes the JSON report for `summary` to `<run_root>/report.json`.
///
/// The run root is created when missing; an existing report is overwritten.
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`ArtifactError`] when rendering or writing fails.
pub fn write_json_report(
    run_root: &Utf8Path,
    summary: &RunSummary,
) -> Result<Utf8PathBuf, ArtifactError> {
    let rendered = report::render_json(summary)?;
    Dir::create_ambient_dir_all(run_root, ambient_authority()).map_err(|err| ArtifactError::Io {
        path: run_root.to_owned(),
        message: err.to_string(),
    })?;
    let dir = Dir::open_ambient_dir(run_root, ambient_authority()).map_err(|err| {
        ArtifactError::Io {
            path: run_root.to_owned(),
            message: err.to_string(),
        }
    })?;
    let path = run_root.join(REPORT_FILE_NAME);
    dir.write(REPORT_FILE_NAME, rendered)
        .map_err(|err| ArtifactError::Io {
            path: path.clone(),
            message: err.to_string(),
        })?;
    Ok(path)
}
