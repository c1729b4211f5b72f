//! Loading of installation and job documents.

use std::path::{Path, PathBuf};

use gobrago_core::{InstallConfig, Invocation, JobConfig, ResolvePaths, expand};
use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::{debug, warn};

use crate::fields::unknown_fields;
use crate::{ConfigError, ConfigResult};

/// Options controlling how documents are decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Reject documents containing keys no config field reads.
    pub strict: bool,
}

/// A decoded document and the directory it was read from.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub config: T,
    /// Base for the document's relative paths.
    pub base_dir: PathBuf,
}

impl<T: ResolvePaths> Loaded<T> {
    /// Resolve the config's paths against its own document directory.
    pub fn resolve(mut self) -> T {
        self.config.resolve_paths(&self.base_dir);
        self.config
    }
}

/// Both documents of a verification run, not yet resolved.
#[derive(Debug, Clone)]
pub struct LoadedConfigs {
    pub install: Loaded<InstallConfig>,
    pub job: Loaded<JobConfig>,
}

/// Directory containing the document at `path`; `.` for a bare file name.
pub fn base_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn load_install_config(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> ConfigResult<Loaded<InstallConfig>> {
    load_document(path.as_ref(), options)
}

pub fn load_job_config(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> ConfigResult<Loaded<JobConfig>> {
    load_document(path.as_ref(), options)
}

/// Load the installation and job documents.
pub fn load(
    install_path: impl AsRef<Path>,
    job_path: impl AsRef<Path>,
    options: &LoadOptions,
) -> ConfigResult<LoadedConfigs> {
    Ok(LoadedConfigs {
        install: load_install_config(install_path, options)?,
        job: load_job_config(job_path, options)?,
    })
}

/// Load both documents, resolve their paths and expand them into the Gobra
/// invocation.
pub fn generate_command(
    install_path: impl AsRef<Path>,
    job_path: impl AsRef<Path>,
    options: &LoadOptions,
) -> ConfigResult<Invocation> {
    let LoadedConfigs { install, job } = load(install_path, job_path, options)?;
    let install = install.resolve();
    let job = job.resolve();
    Ok(expand(&install, &job)?)
}

fn load_document<T>(path: &Path, options: &LoadOptions) -> ConfigResult<Loaded<T>>
where
    T: DeserializeOwned + Serialize + Default,
{
    let raw = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_error = |source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let document: Value = serde_json::from_slice(&raw).map_err(decode_error)?;
    let Value::Object(mut fields) = document else {
        return Err(decode_error(serde_json::Error::custom(
            "expected a JSON object at the top level",
        )));
    };

    let unknown = unknown_fields::<T>(&fields);
    if !unknown.is_empty() {
        if options.strict {
            return Err(ConfigError::UnknownFields {
                path: path.to_path_buf(),
                fields: unknown,
            });
        }
        warn!(path = %path.display(), fields = ?unknown, "Ignoring unknown fields");
    }

    // absent and null keys keep the type's default
    fields.retain(|_, value| !value.is_null());
    let config: T = serde_json::from_value(Value::Object(fields)).map_err(decode_error)?;
    let base_dir = base_dir(path);
    debug!(path = %path.display(), base_dir = %base_dir.display(), "Loaded config");

    Ok(Loaded { config, base_dir })
}
