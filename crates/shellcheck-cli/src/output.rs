//! Rendering check results.

use serde::Serialize;
use shellcheck_core::{Annotation, LineIndex, Notification, NotificationKind, Severity};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `path:line:col: severity: message` line per annotation
    Human,
    /// JSON array of `{ path, annotations }` for tooling
    Json,
}

/// Outcome of checking one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub buffer: LineIndex,
    pub annotations: Vec<Annotation>,
    pub notification: Option<Notification>,
}

impl FileReport {
    /// Error annotations, or a check that did not complete cleanly.
    pub fn failed(&self) -> bool {
        self.annotations
            .iter()
            .any(|annotation| annotation.severity == Severity::Error)
            || self
                .notification
                .as_ref()
                .is_some_and(|notification| notification.kind != NotificationKind::Info)
    }
}

/// `path:line:col: severity: message`, with 1-based line and character column.
pub fn human_line(path: &Path, buffer: &LineIndex, annotation: &Annotation) -> String {
    let (line, column) = buffer.char_offset_to_position(annotation.range.start);
    format!(
        "{}:{}:{}: {}: {}",
        path.display(),
        line + 1,
        column + 1,
        annotation.severity,
        annotation.message
    )
}

pub fn notification_line(path: Option<&Path>, notification: &Notification) -> String {
    match path {
        Some(path) => format!(
            "{}: {}: {}",
            path.display(),
            notification.kind,
            notification.message
        ),
        None => format!("{}: {}", notification.kind, notification.message),
    }
}

pub fn write_notifications(reports: &[FileReport], err: &mut impl Write) -> io::Result<()> {
    for report in reports {
        if let Some(notification) = &report.notification {
            writeln!(err, "{}", notification_line(Some(&report.path), notification))?;
        }
    }
    Ok(())
}

pub fn write_human(reports: &[FileReport], out: &mut impl Write) -> io::Result<()> {
    for report in reports {
        for annotation in &report.annotations {
            writeln!(out, "{}", human_line(&report.path, &report.buffer, annotation))?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    path: String,
    annotations: &'a [Annotation],
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<&'a Notification>,
}

pub fn write_json(reports: &[FileReport], out: &mut impl Write) -> anyhow::Result<()> {
    let json: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|report| JsonReport {
            path: report.path.display().to_string(),
            annotations: &report.annotations,
            notification: report.notification.as_ref(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}
