//! Configuration loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown fields in {}: {}", path.display(), fields.join(", "))]
    UnknownFields { path: PathBuf, fields: Vec<String> },

    #[error(transparent)]
    Command(#[from] gobrago_core::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
