//! Failure kinds raised by the file store and its logging guard.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Coarse classification used by [`crate::error_log::guard`] to decide which
/// failures get written to the error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The data files are missing, empty, or could not be read or written.
    Data,
    /// The logging setup was asked for something it does not support.
    Configuration,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Neither the primary nor the fallback file holds any data.
    #[error("Both files are missing or empty ({primary:?}, {fallback:?})")]
    DataUnavailable { primary: PathBuf, fallback: PathBuf },

    /// A data file could not be created, read, or written.
    #[error("Could not {action} {path:?}: {source}")]
    DataCorrupted {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Unknown logging mode '{value}' (expected 'console' or 'file')")]
    InvalidConfiguration { value: String },
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::DataUnavailable { .. } | StoreError::DataCorrupted { .. } => {
                FailureKind::Data
            }
            StoreError::InvalidConfiguration { .. } => FailureKind::Configuration,
        }
    }

    pub(crate) fn corrupted(
        path: impl Into<PathBuf>,
        action: &'static str,
        source: io::Error,
    ) -> Self {
        StoreError::DataCorrupted {
            path: path.into(),
            action,
            source,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
