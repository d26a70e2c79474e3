//! Decoding of ShellCheck's structured output.
//!
//! Both `--format=json` (a bare array of comments) and `--format=json1` (an object wrapping the
//! array in `comments`) are accepted. Anything else is rejected as a whole: a run whose output
//! cannot be decoded yields no issues at all rather than a partially trusted list.

use crate::issue::Issue;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unrecognized linter output: {source}")]
/// The tool's output did not match the expected schema.
pub struct ParseError {
    /// The undecodable output, kept verbatim so it can be shown to the user.
    pub raw: String,
    /// Underlying JSON error.
    #[source]
    pub source: serde_json::Error,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Output {
    Json(Vec<Issue>),
    Json1 { comments: Vec<Issue> },
}

/// Decode the linter's raw stdout into issues.
///
/// Empty (or whitespace-only) output is a clean run.
pub fn parse_issues(raw: &str) -> Result<Vec<Issue>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Output>(raw) {
        Ok(Output::Json(issues)) | Ok(Output::Json1 { comments: issues }) => Ok(issues),
        Err(source) => Err(ParseError {
            raw: raw.to_string(),
            source,
        }),
    }
}
