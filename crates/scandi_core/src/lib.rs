//! Provide the canonical language vocabulary shared by the Scandi compiler crates.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no compiler-specific types.
//! - The lexer, parser, resolver and code-generation trace all look up spellings and categories here instead of
//!   matching on raw strings.

pub mod lang;
