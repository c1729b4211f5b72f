//! Core types for gobrago.
//!
//! This crate contains:
//! - Installation and job configuration types with their defaults
//! - Resolution of document-relative paths
//! - Expansion of configuration into a Gobra command line
//! - The runner trait used to execute that command line

pub mod command;
pub mod error;
pub mod install;
pub mod job;
pub mod paths;
pub mod runner;

pub use command::{Invocation, expand, expand_to_string};
pub use error::{Error, Result};
pub use install::InstallConfig;
pub use job::{JobConfig, MceMode, MoreJoins, ViperBackend};
pub use paths::ResolvePaths;
pub use runner::{RunOutcome, Runner};
