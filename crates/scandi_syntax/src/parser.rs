//! Parser for the Scandi programming language
//!
//! Builds the [`ScopeTree`] from a token stream. Scandi has no block delimiters: each line's `Scope` depth decides
//! which earlier node the line's statement belongs to.
//!
//! ## Examples
//!
//! ```rust
//! use scandi_syntax::ast::{NodeKind, ScopeTree};
//! use scandi_syntax::{lexer, parser};
//!
//! let source = "$a $b @add\n a b +\n";
//! let tokens = lexer::tokenize(source, "add.scandi").unwrap();
//! let mut tree = ScopeTree::new();
//! parser::parse(&tokens, &mut tree).unwrap();
//! let file = tree.node(tree.root()).children[0];
//! let add = tree.node(file).children[0];
//! assert!(matches!(tree.node(add).kind, NodeKind::Function { .. }));
//! assert_eq!(tree.node(add).children.len(), 1);
//! ```

use std::collections::HashMap;

use crate::ast::*;
use crate::diagnostics::{CompileError, errors};
use crate::lexer::{Token, TokenKind};
use scandi_core::lang::conventions;
use scandi_core::lang::operators::{self, OperatorId};
use scandi_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/runs.rs");
include!("parser/decl.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
