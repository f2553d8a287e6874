//! Application errors

use kinesis_theme::{StorageError, ThemeError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse site config {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse portfolio content")]
    Content(#[from] toml::de::Error),

    #[error("invalid portfolio content: {0}")]
    InvalidContent(String),

    #[error("invalid site config: {0}")]
    InvalidConfig(String),

    #[error("unknown skill category {0:?}")]
    UnknownCategory(String),

    #[error("unknown experience {0:?}")]
    UnknownExperience(String),

    #[error("unknown section anchor {0:?}")]
    UnknownAnchor(String),

    #[error("failed to encode report")]
    Report(#[from] serde_json::Error),

    #[error("failed to write output")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AppError>;
