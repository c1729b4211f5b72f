//! Resolution of document-relative paths.
//!
//! Paths in a configuration document are relative to the directory that
//! contains the document. Resolution is purely lexical: nothing here touches
//! the filesystem.

use std::path::{Component, Path, PathBuf};

use crate::install::InstallConfig;
use crate::job::JobConfig;

/// Rewrite every relative path-valued field so that it is rooted at `base`.
pub trait ResolvePaths {
    fn resolve_paths(&mut self, base: &Path);
}

impl ResolvePaths for InstallConfig {
    fn resolve_paths(&mut self, base: &Path) {
        resolve_in_place(&mut self.jar_path, base);
        resolve_in_place(&mut self.z3_path, base);
    }
}

impl ResolvePaths for JobConfig {
    fn resolve_paths(&mut self, base: &Path) {
        for path in self
            .include_paths
            .iter_mut()
            .chain(self.input_file_paths.iter_mut())
        {
            resolve_in_place(path, base);
        }
        resolve_in_place(&mut self.package_path, base);
        resolve_in_place(&mut self.project_root, base);
    }
}

/// Join `path` onto `base` unless it is empty or already absolute.
pub fn resolve_path(path: &str, base: &Path) -> Option<String> {
    if path.is_empty() || Path::new(path).is_absolute() {
        return None;
    }
    Some(clean(&base.join(path)).to_string_lossy().into_owned())
}

fn resolve_in_place(field: &mut String, base: &Path) {
    if let Some(resolved) = resolve_path(field, base) {
        *field = resolved;
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component. Leading `..` of a relative path are kept.
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    cleaned.pop();
                    depth -= 1;
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(part) => {
                cleaned.push(part);
                depth += 1;
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
