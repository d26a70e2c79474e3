#![warn(missing_docs)]
//! Shellcheck Core - Headless Diagnostic Mapping for Shell Scripts
//!
//! # Overview
//!
//! `shellcheck-core` turns the findings of an external shell linter (ShellCheck) into
//! annotations anchored at exact character offsets of an editor buffer. It does not render
//! anything and does not spawn processes; the host provides a [`TextBuffer`] and an
//! [`ExternalLinter`], and receives [`Annotation`]s back.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Checker (invoke → decode → annotate)       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Severity Classifier                        │  ← error / warning / info
//! ├─────────────────────────────────────────────┤
//! │  Range Selector (whole line vs. precise)    │  ← Highlight span
//! ├─────────────────────────────────────────────┤
//! │  Position Mapper (tab-expanded columns)     │  ← Character offsets
//! ├─────────────────────────────────────────────┤
//! │  Diagnostic Parser (json / json1)           │  ← Issues
//! ├─────────────────────────────────────────────┤
//! │  Text Buffer (Rope-based line index)        │  ← Line access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use shellcheck_core::{AnnotationOptions, LineIndex, Severity, annotate_issues, parse_issues};
//!
//! let buffer = LineIndex::from_text("#!/bin/sh\n\techo $x\n");
//! let issues = parse_issues(
//!     r#"[{"line":2,"column":14,"endColumn":16,"level":"info","code":2086,"message":"Double quote"}]"#,
//! )
//! .unwrap();
//!
//! let annotations = annotate_issues(&buffer, &issues, AnnotationOptions::default());
//! assert_eq!(annotations.len(), 1);
//!
//! // The tab counts as 8 display columns, so column 14 is the `$` at char offset 16.
//! assert_eq!(annotations[0].range.start, 16);
//! assert_eq!(annotations[0].range.end, 18);
//! assert_eq!(annotations[0].severity, Severity::Info);
//! assert_eq!(annotations[0].message, "Double quote [SC2086]");
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Read-only buffer query trait
//! - [`line_index`] - Rope based line index implementing [`TextBuffer`]
//! - [`issue`] - The decoded ShellCheck finding
//! - [`parser`] - ShellCheck JSON decoding
//! - [`mapping`] - Display column to character offset mapping
//! - [`highlight`] - Whole-line / precise highlight selection
//! - [`severity`] - Level to severity classification
//! - [`annotation`] - Annotation records and the mapping pipeline
//! - [`linter`] - The injected external linter capability
//! - [`check`] - Linter invocation + error policy for one buffer
//! - [`notification`] - User-facing failure messages
//! - [`settings`] - User settings

pub mod annotation;
pub mod buffer;
pub mod check;
pub mod highlight;
pub mod issue;
pub mod line_index;
pub mod linter;
pub mod mapping;
pub mod notification;
pub mod parser;
pub mod settings;
pub mod severity;

pub use annotation::{
    ANNOTATION_SOURCE, Annotation, AnnotationOptions, AnnotationRange, annotate_issue,
    annotate_issues,
};
pub use buffer::TextBuffer;
pub use check::{CheckError, CheckReport, Checker, EXPECTED_EXIT_CODES, issues_from_output};
pub use highlight::{HighlightRange, select_highlight};
pub use issue::Issue;
pub use line_index::LineIndex;
pub use linter::{
    DEFAULT_TIMEOUT, ExternalLinter, InvocationError, LintRequest, SHELL_SCRIPT_EXTENSIONS,
    ToolOutput, is_shell_script,
};
pub use mapping::{MappedRange, TAB_WIDTH, map_issue, normalize_column};
pub use notification::{Notification, NotificationKind};
pub use parser::{ParseError, parse_issues};
pub use settings::{DEFAULT_EXECUTABLE, Settings, SettingsError};
pub use severity::Severity;
