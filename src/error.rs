use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`HistoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ReadFailure,
    ValidationFailure,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("invalid limit: {0:?}")]
    InvalidLimit(String),
}

impl HistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HistoryError::NotFound(_) => ErrorKind::NotFound,
            HistoryError::Snapshot { .. } | HistoryError::Read { .. } => ErrorKind::ReadFailure,
            HistoryError::InvalidLimit(_) => ErrorKind::ValidationFailure,
        }
    }

    /// Status code the HTTP layer answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::ValidationFailure => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::ReadFailure => 500,
        }
    }
}
