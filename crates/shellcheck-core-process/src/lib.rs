#![warn(missing_docs)]
//! `shellcheck-core-process` - process-backed linter for `shellcheck-core`.
//!
//! This crate contains the blocking process runner (stdio pipes, hard timeout, kill + reap),
//! the [`ShellcheckProcess`] adapter implementing [`shellcheck_core::ExternalLinter`], and helpers
//! for locating ShellCheck executables.

pub mod finder;
pub mod runner;
pub mod shellcheck;

pub use finder::{
    executable_name, find_executables_in_dirs, find_executables_in_path,
    find_shellcheck_executables, validate_executable_path,
};
pub use runner::{ProcessError, ProcessOutput, ToolCommand, run_command};
pub use shellcheck::{FORMAT_ARG, ShellcheckProcess, parse_version};
