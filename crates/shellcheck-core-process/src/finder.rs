//! Locating ShellCheck executables.

use shellcheck_core::DEFAULT_EXECUTABLE;
use std::env;
use std::path::{Path, PathBuf};

/// `name` with the platform's executable suffix (`.exe` on Windows).
pub fn executable_name(name: &str) -> String {
    let suffix = env::consts::EXE_SUFFIX;
    if suffix.is_empty() || name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Every executable called `name` inside `dirs`, in order, without duplicates.
///
/// Relative directories are ignored.
pub fn find_executables_in_dirs<I, P>(name: &str, dirs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let file_name = executable_name(name);
    let mut found: Vec<PathBuf> = Vec::new();

    for dir in dirs {
        let dir = dir.as_ref();
        if !dir.is_absolute() {
            continue;
        }
        let candidate = dir.join(&file_name);
        if is_executable(&candidate) && !found.contains(&candidate) {
            found.push(candidate);
        }
    }

    found
}

/// Every executable called `name` on `PATH`.
pub fn find_executables_in_path(name: &str) -> Vec<PathBuf> {
    match env::var_os("PATH") {
        Some(path) => find_executables_in_dirs(name, env::split_paths(&path)),
        None => Vec::new(),
    }
}

/// Every `shellcheck` executable on `PATH`.
pub fn find_shellcheck_executables() -> Vec<PathBuf> {
    find_executables_in_path(DEFAULT_EXECUTABLE)
}

/// Whether `path` is acceptable as the configured executable.
///
/// Absolute paths must name an existing file. Relative paths are resolved against `base_dir`
/// and accepted unchecked when there is no base directory.
pub fn validate_executable_path(base_dir: Option<&Path>, path: &Path) -> bool {
    if path.is_absolute() {
        return path.is_file();
    }
    match base_dir {
        Some(base) => base.join(path).is_file(),
        None => true,
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
