//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to make it easy
//! to work with ID-based tokens.

use crate::ast::Depth;
use crate::lexer::{Token, TokenKind};
use scandi_core::lang::operators::{self, OperatorId};
use scandi_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is one of the comparison operators that end a conditional line.
    pub fn is_comparison(&self) -> bool {
        self.operator_id().is_some_and(operators::is_comparison)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for either of the two given punctuation ids (a plain marker and its static digraph).
    pub fn is_either(&self, plain: PunctuationId, other: PunctuationId) -> bool {
        self.is_punctuation(plain) || self.is_punctuation(other)
    }

    /// Return the identifier name, if this is an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Return the line depth, if this is a scope token.
    pub fn scope_depth(&self) -> Option<Depth> {
        match self {
            TokenKind::Scope(depth) => Some(*depth),
            _ => None,
        }
    }

    /// Return `true` for tokens that end a scope run.
    pub fn ends_run(&self) -> bool {
        matches!(self, TokenKind::Scope(_) | TokenKind::Comment(_))
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}

/// Return `true` if `kind` is the given operator.
pub fn is_op(kind: &TokenKind, id: OperatorId) -> bool {
    kind.is_operator(id)
}

/// Return `true` if `kind` is the given punctuation.
pub fn is_punct(kind: &TokenKind, id: PunctuationId) -> bool {
    kind.is_punctuation(id)
}
