//! Error types shared by the reader and the aggregators.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a whole operation.
///
/// A malformed row is not an error: the reader hands back `None` for it and
/// the caller moves on to the next line.
#[derive(Error, Debug)]
pub enum Error {
    /// The input or output file could not be opened, read or written.
    #[error("I/O failure on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column required by the operation is not named in the header.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// Serialising a delimited output table failed.
    #[error("failed to write delimited output: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
}
