//! Shared syntax frontend for the Scandi language: lexer, scope tree, parser, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only": it builds the scope tree but does not link identifiers or stitch conditionals.
//!   Those passes live in the `scandi` crate's semantic resolver.
//! - Vocabulary identity (operators/punctuation) comes from `scandi_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use scandi_syntax::ast::ScopeTree;
//! use scandi_syntax::{lexer, parser};
//!
//! let tokens = lexer::tokenize("$x\nx 1 +\n", "demo.scandi").unwrap();
//! let mut tree = ScopeTree::new();
//! parser::parse(&tokens, &mut tree).unwrap();
//! let file = tree.node(tree.root()).children[0];
//! assert_eq!(tree.node(file).children.len(), 2);
//! ```
//!
//! ## See also
//! - `scandi_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
