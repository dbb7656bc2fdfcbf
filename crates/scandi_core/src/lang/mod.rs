//! Scandi language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: operators, punctuation and the naming
//! conventions the compiler uses for synthesized nodes.
//!
//! Callers work with **stable IDs** (e.g. `OperatorId`, `PunctuationId`) and look up spellings/metadata via
//! registry tables.
//!
//! ## Notes
//! - Registries are **pure**: no tree types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   token dumps, the code-generation trace).
//!
//! ## Examples
//! ```rust
//! use scandi_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("?<"), Some(OperatorId::LessEqual));
//! assert_eq!(operators::as_str(OperatorId::LessEqual), "?<");
//! ```

pub mod conventions;
pub mod operators;
pub mod punctuation;
