#![forbid(unsafe_code)]
//! Scandi Programming Language Compiler Front End
//!
//! Scandi marks nesting with indentation alone and writes expressions in postfix. This crate turns Scandi source into
//! a resolved scope tree: frontend (lexer, parser, semantic resolver), backend (visitor contract and code-generation
//! trace) and the command line.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod backend;
pub mod cli;
pub mod frontend;
pub mod version;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::semantics;

pub use backend::{TreeVisitor, emit_trace, walk};
pub use frontend::{FrontendError, Program, SourceUnit, compile};
