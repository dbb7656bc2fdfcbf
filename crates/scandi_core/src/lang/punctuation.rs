//! Punctuation vocabulary.
//!
//! This module defines the non-operator symbols used by the lexer/parser: declaration markers, delimiters, the
//! null literal and the else marker.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `[` has an attached and a self form sharing one spelling; [`from_str`] resolves the attached form.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source text.
//!
//! ## Examples
//! ```rust
//! use scandi_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("$$"), Some(PunctuationId::StaticVariable));
//! assert_eq!(punctuation::as_str(PunctuationId::Else), ":");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// `\`, `$`, `$$`, `@`, `@@`.
    Declaration,
    /// Alias braces, reference brackets and negation parentheses.
    Delimiter,
    /// `()`.
    Literal,
    /// `:`.
    Control,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Declaration markers
    Label,
    Variable,
    StaticVariable,
    Function,
    StaticFunction,

    // Delimiters
    AliasBegin,
    AliasEnd,
    ReferenceBegin,
    SelfReference,
    ReferenceEnd,
    NegateBegin,
    NegateEnd,

    // Literal
    Null,

    // Control
    Else,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
    /// `true` for `$$` and `@@`.
    pub is_static: bool,
    /// `true` for the context-free form of `[`.
    pub targets_self: bool,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Declaration markers
    info(PunctuationId::Label, "\\", PunctuationCategory::Declaration),
    info(PunctuationId::Variable, "$", PunctuationCategory::Declaration),
    static_info(PunctuationId::StaticVariable, "$$"),
    info(PunctuationId::Function, "@", PunctuationCategory::Declaration),
    static_info(PunctuationId::StaticFunction, "@@"),
    // Delimiters
    info(PunctuationId::AliasBegin, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::AliasEnd, "}", PunctuationCategory::Delimiter),
    info(PunctuationId::ReferenceBegin, "[", PunctuationCategory::Delimiter),
    PunctuationInfo {
        id: PunctuationId::SelfReference,
        canonical: "[",
        category: PunctuationCategory::Delimiter,
        is_static: false,
        targets_self: true,
    },
    info(PunctuationId::ReferenceEnd, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::NegateBegin, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::NegateEnd, ")", PunctuationCategory::Delimiter),
    // Literal
    info(PunctuationId::Null, "()", PunctuationCategory::Literal),
    // Control
    info(PunctuationId::Else, ":", PunctuationCategory::Control),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
///
/// ## Notes
/// - Matching is **case-sensitive**.
/// - `[` resolves to [`PunctuationId::ReferenceBegin`].
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION
        .iter()
        .find(|p| p.canonical == s && !p.targets_self)
        .map(|p| p.id)
}

/// Map an attached contextual punctuation token to its context-free twin.
pub fn self_form(id: PunctuationId) -> Option<PunctuationId> {
    match id {
        PunctuationId::ReferenceBegin => Some(PunctuationId::SelfReference),
        _ => None,
    }
}

/// Check whether a punctuation token introduces a declaration.
pub fn is_declaration_marker(id: PunctuationId) -> bool {
    category(id) == PunctuationCategory::Declaration
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
        is_static: false,
        targets_self: false,
    }
}

const fn static_info(id: PunctuationId, canonical: &'static str) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category: PunctuationCategory::Declaration,
        is_static: true,
        targets_self: false,
    }
}
