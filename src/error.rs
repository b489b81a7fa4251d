use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Failures that end a scan. Both are reported at the top level and terminate
/// the command; a failed batch is never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A date bound did not look like `YYYY-MM-DD`. Raised before any query.
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    Validation,

    /// The content store rejected a batch query. The message is the store's own.
    #[error("Database error: {0}")]
    Storage(String),

    /// The reader of the output went away (`| head`). Not a failure of the scan.
    #[error("output closed")]
    OutputClosed,

    #[error("could not write output: {0}")]
    Output(String),
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::BrokenPipe => ScanError::OutputClosed,
            _ => ScanError::Output(err.to_string()),
        }
    }
}

impl From<StoreError> for ScanError {
    fn from(err: StoreError) -> Self {
        ScanError::Storage(err.0)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no database configured, pass --database or set `database` in the config file")]
    MissingDatabase,

    #[error("invalid table prefix '{0}': only ASCII letters, digits and '_' are allowed")]
    InvalidTablePrefix(String),
}
