//! Lexer for the Scandi programming language
//!
//! Handles tokenization including:
//! - Line depth (`Scope` tokens from leading spaces)
//! - Identifiers and literals (long, double with `,` separator, hexadecimal, string, binary blob)
//! - Operators and punctuation, digraphs first
//! - Context-sensitive `.`, `!`, `[` and `[]`
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String and binary-blob scanning
//! - `numbers` - Numeric literal scanning
//! - `indent` - Leading-space depth
//!
//! ## Error recovery
//!
//! An error abandons the rest of its line (and drops the tokens that line produced so far). Scanning resumes on
//! the next line so that one run reports every bad line.

mod indent;
mod numbers;
mod strings;
pub mod tokens;

use std::sync::Arc;

pub use tokens::{Token, TokenKind};

use crate::ast::Position;
use crate::diagnostics::{CompileError, errors};
use scandi_core::lang::conventions;
use scandi_core::lang::operators;
use scandi_core::lang::punctuation;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// [Start of line] → count spaces → Scope(depth) → [Inside line] → ... → end of line
//                                                      ↓
//                                                 see '`' → Comment, end of line
//                                                      ↓
//                                                 error → drop line, record error
// ============================================================================

/// Lexer for Scandi source code.
///
/// Converts source text into a flat stream of tokens. Program structure is carried only by token order and the
/// depth of `Scope` tokens.
pub struct Lexer<'a> {
    source: &'a str,
    file: Arc<str>,
    /// Characters of the line being scanned.
    line: Vec<char>,
    line_no: usize,
    pos: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str, file: impl Into<Arc<str>>) -> Self {
        Self {
            source,
            file: file.into(),
            line: Vec::new(),
            line_no: 0,
            pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns every token on success, or every lex error on failure.
    pub fn tokenize(self) -> Result<Vec<Token>, Vec<CompileError>> {
        let (tokens, errors) = self.tokenize_lossy();
        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    /// Tokenize the entire source code, keeping the tokens of the lines that scanned cleanly.
    pub fn tokenize_lossy(mut self) -> (Vec<Token>, Vec<CompileError>) {
        self.tokens.push(Token::new(
            TokenKind::Scope(conventions::FILE_DEPTH),
            Position::new(self.file.clone(), 1, 1),
        ));

        let source = self.source;
        for (index, line) in source.split('\n').enumerate() {
            self.line = line.trim_end_matches('\r').chars().collect();
            self.line_no = index + 1;
            self.pos = 0;

            let mark = self.tokens.len();
            if let Err(error) = self.scan_line() {
                tracing::debug!(line = self.line_no, %error, "dropping line after lex error");
                self.tokens.truncate(mark);
                self.errors.push(error);
            }
        }

        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn peek(&self) -> Option<char> {
        self.line.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.line.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Position of the character at `index` on the current line.
    fn position_at(&self, index: usize) -> Position {
        Position::new(self.file.clone(), self.line_no, index + 1)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let position = self.position_at(start);
        self.tokens.push(Token::new(kind, position));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_line(&mut self) -> Result<(), CompileError> {
        let depth = self.measure_depth();
        if self.is_at_end() {
            return Ok(());
        }
        self.add_token(TokenKind::Scope(depth), 0);

        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                ' ' => {
                    self.advance();
                }
                '`' => {
                    let text: String = self.line[start + 1..].iter().collect();
                    self.add_token(TokenKind::Comment(text), start);
                    self.pos = self.line.len();
                }
                c if c.is_ascii_alphabetic() => self.scan_identifier(start),
                c if c.is_ascii_digit() || c == numbers::DECIMAL_SEPARATOR => self.scan_number(start)?,
                numbers::HEX_PREFIX => self.scan_hex(start)?,
                '"' | '\'' => self.scan_string(start)?,
                _ => self.scan_symbol(start)?,
            }
        }
        Ok(())
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.advance();
        }
        let name: String = self.line[start..self.pos].iter().collect();
        self.add_token(TokenKind::Identifier(name), start);
    }

    // ========================================================================
    // Symbol scanning
    // ========================================================================

    /// Scan an operator or punctuation symbol. Two-character spellings win over one-character ones.
    fn scan_symbol(&mut self, start: usize) -> Result<(), CompileError> {
        let self_context = self.is_self_context(start);

        let digraph = self
            .peek_next()
            .and_then(|second| lookup_symbol(&String::from_iter([self.line[start], second])));
        let kind = match digraph {
            Some(kind) => {
                self.pos += 2;
                kind
            }
            None => {
                let c = self.line[start];
                let Some(kind) = lookup_symbol(&c.to_string()) else {
                    return Err(errors::unknown_symbol(c, self.position_at(start)));
                };
                self.pos += 1;
                kind
            }
        };

        let kind = if self_context { kind.into_self_form() } else { kind };
        self.add_token(kind, start);
        Ok(())
    }

    /// A contextual symbol is context-free at the start of a line, after a space or after `{`.
    fn is_self_context(&self, start: usize) -> bool {
        match start.checked_sub(1).map(|i| self.line[i]) {
            None => true,
            Some(prev) => prev == ' ' || prev == '{',
        }
    }
}

/// Resolve a symbol spelling against the operator and punctuation registries.
fn lookup_symbol(spelling: &str) -> Option<TokenKind> {
    operators::from_str(spelling)
        .map(TokenKind::Operator)
        .or_else(|| punctuation::from_str(spelling).map(TokenKind::Punctuation))
}

/// Tokenize one compilation unit.
///
/// This is a shorthand for `Lexer::new(source, file).tokenize()`.
#[tracing::instrument(skip_all, fields(file = %file, source_len = source.len()))]
pub fn tokenize(source: &str, file: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source, file).tokenize()
}
