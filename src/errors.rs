//! Scan error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error while running a scan.
///
/// `ConfigOpen` and `DatabaseInit` abort a run before anything is printed. A
/// `RepositoryRegistration` failure stops config processing but the
/// repositories registered before it stay in use. `Report` means the output
/// went away partway through; `written` lines had already been printed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to open config file {}", path.display())]
    ConfigOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize package database: {message}")]
    DatabaseInit { message: String },

    #[error("failed to register repository `{name}`: {reason}")]
    RepositoryRegistration { name: String, reason: String },

    #[error("failed to write report after {written} lines")]
    Report {
        written: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Report lines printed before the error.
    pub fn lines_written(&self) -> usize {
        match self {
            ScanError::Report { written, .. } => *written,
            _ => 0,
        }
    }
}
