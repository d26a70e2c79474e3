//! Diagnostics as reported by the external linter.

use serde::{Deserialize, Deserializer};

/// One diagnostic finding reported by ShellCheck.
///
/// Positions are 1-based. Columns are *display* columns: ShellCheck expands tabs to width 8
/// before counting, while the buffer stores a single tab character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    /// Start line (1-based).
    pub line: usize,
    /// End line (1-based). `0` means "unset", i.e. the same as [`Issue::line`].
    pub end_line: usize,
    /// Start display column (1-based).
    pub column: usize,
    /// End display column (1-based). `0` means "unset", i.e. the same as [`Issue::column`].
    pub end_column: usize,
    /// Free-text level tag (`"error"`, `"warning"`, `"info"`, `"style"`, ...).
    pub level: String,
    /// Diagnostic identifier without the `SC` prefix (e.g. `"2086"`).
    #[serde(deserialize_with = "deserialize_code")]
    pub code: Option<String>,
    /// Human readable message.
    pub message: String,
}

impl Issue {
    /// End line with the `0 = same as line` default applied.
    pub fn effective_end_line(&self) -> usize {
        if self.end_line == 0 {
            self.line
        } else {
            self.end_line
        }
    }

    /// End column with the `0 = same as column` default applied.
    pub fn effective_end_column(&self) -> usize {
        if self.end_column == 0 {
            self.column
        } else {
            self.end_column
        }
    }

    /// The `SC`-prefixed code, e.g. `SC2086`.
    pub fn display_code(&self) -> Option<String> {
        self.code.as_ref().map(|code| format!("SC{code}"))
    }

    /// Message as shown to the user: `"<message> [SC<code>]"`, or `"<message> [none]"`.
    pub fn formatted_message(&self) -> String {
        format!(
            "{} [{}]",
            self.message.trim(),
            self.display_code().as_deref().unwrap_or("none")
        )
    }
}

/// ShellCheck emits `code` as a JSON number; tolerate strings and `null` as well.
fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(u64),
        Text(String),
    }

    Ok(Option::<Code>::deserialize(deserializer)?.map(|code| match code {
        Code::Number(n) => n.to_string(),
        Code::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(message: &str, code: Option<&str>) -> Issue {
        Issue {
            line: 1,
            column: 1,
            level: "warning".to_string(),
            code: code.map(str::to_string),
            message: message.to_string(),
            ..Issue::default()
        }
    }

    #[test]
    fn test_formatted_message_with_code() {
        let issue = issue("quote this", Some("2086"));
        assert_eq!(issue.formatted_message(), "quote this [SC2086]");
        assert_eq!(issue.display_code().as_deref(), Some("SC2086"));
    }

    #[test]
    fn test_formatted_message_without_code() {
        let issue = issue("  trailing spaces \n", None);
        assert_eq!(issue.formatted_message(), "trailing spaces [none]");
    }

    #[test]
    fn test_zero_end_positions_default_to_start() {
        let mut issue = issue("x", None);
        issue.line = 4;
        issue.column = 7;
        assert_eq!(issue.effective_end_line(), 4);
        assert_eq!(issue.effective_end_column(), 7);

        issue.end_line = 6;
        issue.end_column = 2;
        assert_eq!(issue.effective_end_line(), 6);
        assert_eq!(issue.effective_end_column(), 2);
    }
}
