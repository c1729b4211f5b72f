//! CLI command implementations.

pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use gobrago_config::{LoadOptions, generate_command};
use gobrago_core::Invocation;

/// Build the Gobra invocation from the two config files.
pub fn generate(install_config: &Path, job_config: &Path, strict: bool) -> Result<Invocation> {
    generate_command(install_config, job_config, &LoadOptions { strict }).with_context(|| {
        format!(
            "Failed to generate command from {} and {}",
            install_config.display(),
            job_config.display()
        )
    })
}
