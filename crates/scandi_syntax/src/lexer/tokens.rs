//! Token types for the Scandi lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Operator(OperatorId)` for operators, including the contextual access operators
//! - `Punctuation(PunctuationId)` for declaration markers, delimiters, `()` and `:`
//!
//! ## Notes
//! - ID-bearing tokens avoid stringly-typed checks in the parser.
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use std::fmt;

use crate::ast::{Depth, Position};
use scandi_core::lang::operators::{self, OperatorId};
use scandi_core::lang::punctuation::{self, PunctuationId};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Operator / punctuation (ID-based) ==========
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Structure ==========
    /// Start of a line; carries `leading spaces + 1`, or 0 for the file scope.
    Scope(Depth),
    /// Text after a backtick.
    Comment(String),

    // ========== Identifiers and Literals ==========
    Identifier(String),
    NumberLong(i64),
    NumberDouble(f64),
    Hexadecimal(i64),
    StringLiteral(String),
    BinaryBlob(Vec<u8>),
}

impl TokenKind {
    /// `true` for the `$$` and `@@` declaration markers.
    pub fn is_static(&self) -> bool {
        match self {
            TokenKind::Punctuation(id) => punctuation::info_for(*id).is_static,
            _ => false,
        }
    }

    /// `true` for the context-free forms of `.`, `!`, `[` and `[]`.
    pub fn targets_self(&self) -> bool {
        match self {
            TokenKind::Operator(id) => operators::info_for(*id).targets_self,
            TokenKind::Punctuation(id) => punctuation::info_for(*id).targets_self,
            _ => false,
        }
    }

    /// Replace an attached contextual symbol by its context-free twin; other kinds are returned unchanged.
    pub fn into_self_form(self) -> Self {
        match self {
            TokenKind::Operator(id) => TokenKind::Operator(operators::self_form(id).unwrap_or(id)),
            TokenKind::Punctuation(id) => TokenKind::Punctuation(punctuation::self_form(id).unwrap_or(id)),
            other => other,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Operator(id) => {
                let info = operators::info_for(*id);
                write!(f, "{} ({})", info.spelling, info.description)
            }
            TokenKind::Punctuation(id) => write!(f, "{}", punctuation::as_str(*id)),
            TokenKind::Scope(depth) => write!(f, "scope {depth}"),
            TokenKind::Comment(text) => write!(f, "comment `{text}"),
            TokenKind::Identifier(name) => write!(f, "identifier {name}"),
            TokenKind::NumberLong(value) => write!(f, "long {value}"),
            TokenKind::NumberDouble(value) => write!(f, "double {value:?}"),
            TokenKind::Hexadecimal(value) => write!(f, "hexadecimal #{value:X}"),
            TokenKind::StringLiteral(text) => write!(f, "string {text:?}"),
            TokenKind::BinaryBlob(bytes) => write!(f, "binary {} byte(s)", bytes.len()),
        }
    }
}

/// A token with its kind and source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.position.line, self.position.column, self.kind)
    }
}
