use std::path::PathBuf;

use thiserror::Error;

/// Why a price list produced no report.
///
/// Row-level errors carry the 1-based line number of the offending row,
/// available through [`Error::line`] rather than the message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{} is not a .csv file", .path.display())]
    NotCsv { path: PathBuf },
    #[error("no header found")]
    MissingHeader,
    #[error("incorrect header {found:?}, expected {expected:?}")]
    IncorrectHeader { found: String, expected: String },
    #[error("incorrect number of columns: expected {expected}, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid year {value:?}")]
    InvalidYear { line: usize, value: String },
    #[error("make value missing")]
    MissingMake { line: usize },
    #[error("model value missing")]
    MissingModel { line: usize },
    #[error("invalid msrp {value:?}")]
    InvalidMsrp { line: usize, value: String },
    #[error("{what} is too large to represent")]
    Overflow { what: &'static str },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the 1-based line number of the offending row, if the error
    /// came from a data row.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ColumnCount { line, .. }
            | Self::InvalidYear { line, .. }
            | Self::MissingMake { line }
            | Self::MissingModel { line }
            | Self::InvalidMsrp { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
