//! Error types for loading blueprints

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde_json::error::Category;
use thiserror::Error;

/// Character range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum BlueprintError {
    /// Malformed JSON
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that does not describe a blueprint
    #[error("invalid blueprint at line {line}, column {column}: {message}")]
    Schema {
        line: usize,
        column: usize,
        message: String,
    },

    /// Two pages normalize to the same route key
    #[error("duplicate page path '{path}' declared by pages '{first}' and '{second}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("failed to read blueprint '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for BlueprintError {
    fn from(err: serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        // serde_json appends " at line N column M"; the position is kept separately
        let message = err.to_string();
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        match err.classify() {
            Category::Data => BlueprintError::Schema {
                line,
                column,
                message,
            },
            Category::Io | Category::Syntax | Category::Eof => BlueprintError::Syntax {
                line,
                column,
                message,
            },
        }
    }
}

impl BlueprintError {
    /// Source position of the error, if it has one
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            BlueprintError::Syntax { line, column, .. }
            | BlueprintError::Schema { line, column, .. } => {
                let len = source.chars().count();
                if len == 0 {
                    return None;
                }
                let start = char_offset(source, *line, *column).min(len - 1);
                Some(start..start + 1)
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let message = self.to_string();

        let written = match self.span(source) {
            Some(span) => Report::build(ReportKind::Error, filename, span.start)
                .with_message(&message)
                .with_label(
                    Label::new((filename, span))
                        .with_message(self.short_message())
                        .with_color(Color::Red),
                )
                .finish()
                .write((filename, Source::from(source)), &mut buf),
            None => Report::<(&str, Span)>::build(ReportKind::Error, filename, 0)
                .with_message(&message)
                .finish()
                .write((filename, Source::from(source)), &mut buf),
        };

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, message),
        }
    }

    fn short_message(&self) -> String {
        match self {
            BlueprintError::Syntax { message, .. } | BlueprintError::Schema { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Convert a one-based line and column into a character offset
fn char_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col = column.saturating_sub(1).min(text.chars().count());
            return offset + col;
        }
        offset += text.chars().count();
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offset() {
        let src = "ab\ncde\nf";
        assert_eq!(char_offset(src, 1, 1), 0);
        assert_eq!(char_offset(src, 2, 2), 4);
        assert_eq!(char_offset(src, 3, 1), 7);
    }

    #[test]
    fn test_from_serde_syntax_error() {
        let err: BlueprintError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        match err {
            BlueprintError::Syntax { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(!message.contains(" at line "));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_format_includes_filename_and_message() {
        let source = "{\n  \"client_name\": 42\n}";
        let err = crate::parse(source).unwrap_err();
        let formatted = err.format(source, "blueprint.json");
        assert!(formatted.contains("blueprint.json"));
        assert!(formatted.contains("invalid blueprint"));
    }

    #[test]
    fn test_format_without_span() {
        let err = BlueprintError::DuplicatePath {
            path: "/about".to_string(),
            first: "About".to_string(),
            second: "Team".to_string(),
        };
        let formatted = err.format("{}", "site.json");
        assert!(formatted.contains("duplicate page path '/about'"));
    }

    #[test]
    fn test_duplicate_path_display() {
        let err = BlueprintError::DuplicatePath {
            path: "/".to_string(),
            first: "Home".to_string(),
            second: "Index".to_string(),
        };
        assert!(err.to_string().contains("'Home'"));
        assert!(err.to_string().contains("'Index'"));
    }
}
