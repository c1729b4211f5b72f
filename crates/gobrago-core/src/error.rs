//! Error types for gobrago.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path to Gobra's jar was not provided")]
    MissingJarPath,

    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
