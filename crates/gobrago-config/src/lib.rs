//! JSON configuration loading for gobrago.
//!
//! This crate handles:
//! - Reading the Gobra installation and verification job documents
//! - Decoding them onto their defaults
//! - Reporting keys no config field reads
//! - Producing the Gobra invocation from a pair of documents

pub mod error;
pub mod fields;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    LoadOptions, Loaded, LoadedConfigs, base_dir, generate_command, load, load_install_config,
    load_job_config,
};
