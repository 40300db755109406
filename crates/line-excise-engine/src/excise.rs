use crate::document::Document;
use crate::io::{self, IoError};
use crate::range::{ExcisionRange, RangeError, RangePolicy};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExciseError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Io(#[from] IoError),
}

#[derive(Debug, Clone, Default)]
pub struct ExciseOptions {
    pub policy: RangePolicy,
    /// Write here instead of overwriting the source
    pub output: Option<PathBuf>,
}

/// What an excision did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcisionReport {
    pub original_lines: usize,
    pub removed_lines: usize,
    pub remaining_lines: usize,
    pub written_to: PathBuf,
}

/// Remove lines `start..=end` (1-based) from the file at `path` in place and
/// return the number of lines left.
///
/// Uses [`RangePolicy::Strict`]; an `end` past the last line drops the rest
/// of the file.
pub fn excise(path: &Path, start: usize, end: usize) -> Result<usize, ExciseError> {
    let range = ExcisionRange::new(start, end)?;
    let report = excise_file(path, range, &ExciseOptions::default())?;
    Ok(report.remaining_lines)
}

/// Read `path`, remove `range`, and write the remaining lines back to `path`
/// or to `options.output`.
///
/// The source is fully read and closed before anything is written, and a
/// range error leaves every file untouched.
pub fn excise_file(
    path: &Path,
    range: ExcisionRange,
    options: &ExciseOptions,
) -> Result<ExcisionReport, ExciseError> {
    let document = io::read_document(path)?;
    let result = document.excise(range, options.policy)?;

    let written_to = options.output.as_deref().unwrap_or(path);
    io::write_document(written_to, &result)?;

    Ok(report(&document, &result, written_to))
}

fn report(original: &Document, result: &Document, written_to: &Path) -> ExcisionReport {
    ExcisionReport {
        original_lines: original.len(),
        removed_lines: original.len() - result.len(),
        remaining_lines: result.len(),
        written_to: written_to.to_path_buf(),
    }
}
