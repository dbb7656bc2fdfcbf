//! Diagnostics and error reporting for Scandi
//!
//! Every stage reports problems as [`CompileError`] values. They render either as plain text with the offending
//! source line ([`format_error`]) or as a `miette` report with a labelled span ([`to_report`]).

use std::fmt;

use miette::{NamedSource, SourceSpan};

use crate::ast::Position;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CompileError {
    pub message: String,
    pub position: Position,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn lex(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Lex, message, position)
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, position)
    }

    pub fn semantic(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Semantic, message, position)
    }

    /// A broken compiler invariant, not a problem in the user's program.
    pub fn internal(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Internal, message, position).with_note("this is a bug in the compiler")
    }

    pub fn warning(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Warning, message, position)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_warning(&self) -> bool {
        self.kind == ErrorKind::Warning
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    Semantic,
    Internal,
    Warning,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "lex error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
            ErrorKind::Internal => write!(f, "internal compiler error"),
            ErrorKind::Warning => write!(f, "warning"),
        }
    }
}

/// Render an error with its source line and a caret under the column.
pub fn format_error(source: &str, error: &CompileError) -> String {
    let mut out = format!("{}: {}\n  --> {}\n", error.kind, error.message, error.position);

    if let Some(line_text) = line_text(source, error.position.line) {
        let gutter = error.position.line.to_string().len();
        out.push_str(&format!("  {:>gutter$} |\n", ""));
        out.push_str(&format!("  {:>gutter$} | {}\n", error.position.line, line_text));
        out.push_str(&format!(
            "  {:>gutter$} | {}^\n",
            "",
            " ".repeat(error.position.column.saturating_sub(1))
        ));
    }

    for note in &error.notes {
        out.push_str(&format!("  = note: {note}\n"));
    }
    for hint in &error.hints {
        out.push_str(&format!("  = hint: {hint}\n"));
    }
    out
}

/// `miette` view of a [`CompileError`] bound to its source text.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{kind}: {message}")]
pub struct SourceDiagnostic {
    kind: ErrorKind,
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    span: Option<SourceSpan>,
    #[help]
    help: Option<String>,
}

/// Build a `miette` report for an error raised while compiling `source`.
pub fn to_report(source: &str, error: &CompileError) -> miette::Report {
    let span = byte_offset(source, error.position.line, error.position.column).map(|offset| {
        let len = source[offset..].chars().next().map(char::len_utf8).unwrap_or(0);
        SourceSpan::from((offset, len))
    });
    let help = error
        .notes
        .iter()
        .map(|n| format!("note: {n}"))
        .chain(error.hints.iter().cloned())
        .collect::<Vec<_>>();

    miette::Report::new(SourceDiagnostic {
        kind: error.kind,
        message: error.message.clone(),
        source_code: NamedSource::new(error.position.file.to_string(), source.to_string()),
        span,
        help: (!help.is_empty()).then(|| help.join("\n")),
    })
}

/// Text of a 1-based line, without its line terminator.
fn line_text(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source.lines().nth(line - 1).map(|l| l.trim_end_matches('\r'))
}

/// Byte offset of a 1-based line/column pair (columns count characters).
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 || column == 0 {
        return None;
    }
    let mut line_start = 0;
    for _ in 1..line {
        line_start += source[line_start..].find('\n')? + 1;
    }
    let text = line_text(source, line)?;
    let within = text
        .char_indices()
        .nth(column - 1)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    Some(line_start + within)
}

// ============================================================================
// Error catalog
// ============================================================================

/// Constructors for the errors the lexer and parser raise more than once.
pub mod errors {
    use super::*;

    pub fn unknown_symbol(symbol: char, position: Position) -> CompileError {
        CompileError::lex(format!("Unknown symbol '{symbol}'"), position)
    }

    pub fn extraneous_decimal_point(position: Position) -> CompileError {
        CompileError::lex("Extraneous decimal point", position).with_hint("Scandi uses ',' as the decimal separator")
    }

    pub fn duplicate_declaration(name: &str, position: Position) -> CompileError {
        CompileError::syntax(format!("Duplicate declaration of '{name}'"), position)
            .with_note("a name may be declared only once per scope; nested scopes may shadow it")
    }

    pub fn unexpected_token(found: &str, context: &str, position: Position) -> CompileError {
        CompileError::syntax(format!("Unexpected '{found}' in {context}"), position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn at(line: usize, column: usize) -> Position {
        Position::new(Arc::from("a.scandi"), line, column)
    }

    #[test]
    fn test_byte_offset() {
        let source = "line 1\nline 2\nline 3";
        assert_eq!(byte_offset(source, 1, 1), Some(0));
        assert_eq!(byte_offset(source, 2, 1), Some(7));
        assert_eq!(byte_offset(source, 2, 4), Some(10));
        assert_eq!(byte_offset(source, 4, 1), None);
    }

    #[test]
    fn test_format_error_points_at_column() {
        let source = "$x\n$y 1 ; 2\n";
        let err = errors::unknown_symbol(';', at(2, 6)).with_hint("remove it");
        let text = format_error(source, &err);
        assert!(text.starts_with("lex error: Unknown symbol ';'\n  --> a.scandi:2:6\n"));
        assert!(text.contains("  2 | $y 1 ; 2\n"));
        assert!(text.contains("   |      ^\n"));
        assert!(text.ends_with("  = hint: remove it\n"));
    }

    #[test]
    fn test_internal_errors_carry_a_note() {
        let err = CompileError::internal("broken parent link", at(1, 1));
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.notes.len(), 1);
        assert_eq!(err.to_string(), "internal compiler error: broken parent link");
    }
}
