//! The `check` command: lint files concurrently and print their annotations.

use crate::output::{self, FileReport, OutputFormat};
use anyhow::Context;
use shellcheck_core::{
    Checker, ExternalLinter, LineIndex, LintRequest, Notification, Settings, is_shell_script,
};
use shellcheck_core_process::{ShellcheckProcess, validate_executable_path};
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use tracing::debug;

const FALLBACK_JOBS: usize = 4;

pub fn run(
    settings: &Settings,
    files: &[PathBuf],
    format: OutputFormat,
    all_files: bool,
) -> anyhow::Result<ExitCode> {
    let mut stderr = io::stderr();

    if !settings.plugin_enabled {
        let notification =
            Notification::info("ShellCheck is disabled in the settings, nothing was checked");
        writeln!(stderr, "{}", output::notification_line(None, &notification))?;
        return Ok(ExitCode::SUCCESS);
    }

    let cwd = std::env::current_dir().context("failed to determine the working directory")?;
    if let Some(problem) = executable_problem(settings, &cwd) {
        writeln!(stderr, "{}", output::notification_line(None, &problem))?;
        return Ok(ExitCode::FAILURE);
    }

    let targets: Vec<&PathBuf> = files
        .iter()
        .filter(|path| {
            let keep = all_files || is_shell_script(path);
            if !keep {
                debug!(path = %path.display(), "skipping non-shell file");
            }
            keep
        })
        .collect();

    let checker = Checker::new(
        ShellcheckProcess::from_settings(settings),
        settings.annotation_options(),
    );
    let reports = check_files(&checker, &cwd, &targets)?;

    output::write_notifications(&reports, &mut stderr)?;
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Human => output::write_human(&reports, &mut stdout)?,
        OutputFormat::Json => output::write_json(&reports, &mut stdout)?,
    }
    stdout.flush()?;

    if reports.iter().any(FileReport::failed) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Check `paths` on scoped worker threads, at most one linter process per available core.
pub fn check_files<L>(
    checker: &Checker<L>,
    cwd: &Path,
    paths: &[&PathBuf],
) -> anyhow::Result<Vec<FileReport>>
where
    L: ExternalLinter + Sync,
{
    let jobs = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_JOBS);

    let mut reports = Vec::with_capacity(paths.len());
    for chunk in paths.chunks(jobs) {
        let finished = thread::scope(|scope| {
            let handles: Vec<_> = chunk
                .iter()
                .map(|path| scope.spawn(move || check_file(checker, cwd, path)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .map_err(|_| anyhow::anyhow!("check worker panicked"))
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })?;
        reports.extend(finished);
    }
    Ok(reports)
}

/// Check one file. The text read here is both the buffer and what the linter sees on stdin.
pub fn check_file<L: ExternalLinter>(checker: &Checker<L>, cwd: &Path, path: &Path) -> FileReport {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            return FileReport {
                path: path.to_path_buf(),
                buffer: LineIndex::new(),
                annotations: Vec::new(),
                notification: Some(Notification::error(format!(
                    "failed to read {}: {err}",
                    path.display()
                ))),
            };
        }
    };

    let buffer = LineIndex::from_text(&text);
    let request = LintRequest::on_disk(cwd, path).with_content(&text);
    let report = checker.check_with_report(&request, &buffer);

    FileReport {
        path: path.to_path_buf(),
        buffer,
        annotations: report.annotations,
        notification: report.notification,
    }
}

/// A configured executable path that cannot be used.
///
/// Bare names (the default `shellcheck`) are looked up on `PATH` at spawn time and not checked.
fn executable_problem(settings: &Settings, cwd: &Path) -> Option<Notification> {
    let executable = settings.resolved_executable();
    if executable.components().count() <= 1 && !executable.is_absolute() {
        return None;
    }
    if validate_executable_path(Some(cwd), &executable) {
        None
    } else {
        Some(Notification::warning(format!(
            "invalid shellcheck executable: {}",
            executable.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellcheck_core::{AnnotationOptions, InvocationError, Severity, ToolOutput};
    use std::fs;

    struct CannedLinter;

    impl ExternalLinter for CannedLinter {
        fn invoke(&self, request: &LintRequest<'_>) -> Result<ToolOutput, InvocationError> {
            let stdout = match request.content {
                Some(content) if content.contains("$x") => {
                    r#"[{"line":2,"column":6,"endColumn":8,"level":"error","code":2086,"message":"quote"}]"#
                }
                _ => "[]",
            };
            Ok(ToolOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(if stdout == "[]" { 0 } else { 1 }),
            })
        }

        fn version(&self) -> Result<String, InvocationError> {
            Ok("0.9.0".to_string())
        }
    }

    #[test]
    fn test_check_files_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let dirty = dir.path().join("dirty.sh");
        let clean = dir.path().join("clean.sh");
        let missing = dir.path().join("missing.sh");
        fs::write(&dirty, "#!/bin/sh\necho $x\n").unwrap();
        fs::write(&clean, "#!/bin/sh\necho ok\n").unwrap();

        let checker = Checker::new(CannedLinter, AnnotationOptions::default());
        let reports = check_files(&checker, dir.path(), &[&dirty, &missing, &clean]).unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].path, dirty);
        assert_eq!(reports[0].annotations.len(), 1);
        assert_eq!(reports[0].annotations[0].severity, Severity::Error);
        assert!(reports[0].failed());

        assert!(reports[1].notification.is_some());
        assert!(reports[1].failed());

        assert!(reports[2].annotations.is_empty());
        assert!(!reports[2].failed());
    }

    #[test]
    fn test_executable_problem() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        assert_eq!(executable_problem(&settings, dir.path()), None);

        settings.shellcheck_executable = "tools/shellcheck".to_string();
        assert!(executable_problem(&settings, dir.path()).is_some());

        fs::create_dir(dir.path().join("tools")).unwrap();
        fs::write(dir.path().join("tools/shellcheck"), "").unwrap();
        assert_eq!(executable_problem(&settings, dir.path()), None);
    }
}
