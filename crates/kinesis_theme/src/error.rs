//! Theme and storage errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing persisted preferences
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read preferences from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write preferences to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed preferences file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode preferences")]
    Encode(#[from] serde_json::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the theme crate
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme preference {0:?} (expected \"light\" or \"dark\")")]
    UnknownPreference(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
