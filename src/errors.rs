//! Error types shared by the generator, the store and the command line.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date interval: start {start} is after end {end}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    #[error("Invalid value for {field}: {value} (must be a positive number)")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Cannot derive a position from an empty NAV series")]
    EmptySeries,

    #[error("Existing data file {} is not valid JSON: {source}", path.display())]
    MalformedPersistedFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Missing required arguments for generating a single fund. Either use --all flag to \
         generate all predefined funds, or provide all required arguments for a single fund."
    )]
    MissingArguments,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode fund data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
