//! Operator vocabulary.
//!
//! This module defines the canonical operator set of the postfix expression language: assignment, arithmetic,
//! bitwise, shift, comparison, and the access operators (`.`, `!`, `[]`, `_`).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `.`, `!` and `[]` come in two forms sharing one spelling: an *attached* form (glued to the preceding operand)
//!   and a *self* form (at the start of an expression, after a space or after `{`). [`from_str`] resolves the
//!   attached form; use [`self_form`] to get the twin.
//!
//! ## Examples
//! ```rust
//! use scandi_core::lang::operators::{self, OperatorCategory, OperatorId};
//!
//! assert_eq!(operators::from_str("->"), Some(OperatorId::ShiftRight));
//! assert_eq!(operators::info_for(OperatorId::Less).category, OperatorCategory::Comparison);
//! assert_eq!(operators::self_form(OperatorId::Dot), Some(OperatorId::SelfDot));
//! ```

/// Broad semantic grouping for operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    Assignment,
    Arithmetic,
    Bitwise,
    Shift,
    Comparison,
    /// Member access, element count, contents and address markers.
    Access,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Assignment
    Assign,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,

    // Bitwise
    Complement,
    And,
    Or,
    Xor,

    // Shifts
    ShiftLeft,
    ShiftRight,
    SignedShiftRight,

    // Comparison
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Access
    Dot,
    SelfDot,
    Count,
    SelfCount,
    Contents,
    SelfContents,
    Address,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub category: OperatorCategory,
    /// `true` for the context-free form of a contextual operator.
    pub targets_self: bool,
    /// Short human-readable name used in token dumps and diagnostics.
    pub description: &'static str,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Assign, "=", OperatorCategory::Assignment, "assignment"),
    // Arithmetic
    op(OperatorId::Add, "+", OperatorCategory::Arithmetic, "add"),
    op(OperatorId::Subtract, "-", OperatorCategory::Arithmetic, "subtract"),
    op(OperatorId::Multiply, "*", OperatorCategory::Arithmetic, "multiply"),
    op(OperatorId::Divide, "/", OperatorCategory::Arithmetic, "divide"),
    op(OperatorId::Modulus, "%", OperatorCategory::Arithmetic, "modulus"),
    // Bitwise
    op(OperatorId::Complement, "~", OperatorCategory::Bitwise, "complement"),
    op(OperatorId::And, "&", OperatorCategory::Bitwise, "and"),
    op(OperatorId::Or, "|", OperatorCategory::Bitwise, "or"),
    op(OperatorId::Xor, "^", OperatorCategory::Bitwise, "xor"),
    // Shifts
    op(OperatorId::ShiftLeft, "<-", OperatorCategory::Shift, "shift left"),
    op(OperatorId::ShiftRight, "->", OperatorCategory::Shift, "shift right"),
    op(OperatorId::SignedShiftRight, ">>", OperatorCategory::Shift, "signed shift right"),
    // Comparison
    op(OperatorId::Equal, "?", OperatorCategory::Comparison, "equal"),
    op(OperatorId::Less, "<", OperatorCategory::Comparison, "less"),
    op(OperatorId::LessEqual, "?<", OperatorCategory::Comparison, "less or equal"),
    op(OperatorId::Greater, ">", OperatorCategory::Comparison, "greater"),
    op(OperatorId::GreaterEqual, "?>", OperatorCategory::Comparison, "greater or equal"),
    // Access
    op(OperatorId::Dot, ".", OperatorCategory::Access, "member"),
    self_op(OperatorId::SelfDot, ".", "self member"),
    op(OperatorId::Count, "!", OperatorCategory::Access, "count"),
    self_op(OperatorId::SelfCount, "!", "self count"),
    op(OperatorId::Contents, "[]", OperatorCategory::Access, "contents"),
    self_op(OperatorId::SelfContents, "[]", "self contents"),
    op(OperatorId::Address, "_", OperatorCategory::Access, "address"),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the category for an operator.
pub fn category(id: OperatorId) -> OperatorCategory {
    info_for(id).category
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
///
/// ## Notes
/// - Contextual spellings resolve to their attached form.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.spelling == spelling && !o.targets_self)
        .map(|o| o.id)
}

/// Map an attached contextual operator to its context-free twin.
///
/// Returns `None` for operators that have no self form.
pub fn self_form(id: OperatorId) -> Option<OperatorId> {
    match id {
        OperatorId::Dot => Some(OperatorId::SelfDot),
        OperatorId::Count => Some(OperatorId::SelfCount),
        OperatorId::Contents => Some(OperatorId::SelfContents),
        _ => None,
    }
}

/// Check whether an operator compares its operands (the trailing token of a conditional line).
pub fn is_comparison(id: OperatorId) -> bool {
    category(id) == OperatorCategory::Comparison
}

/// Check whether a bare expression ending in this operator is shorthand for an assignment to its head.
///
/// `n 1 +` means `n n 1 + =`; this holds for arithmetic, bitwise and shift operators only.
pub fn expands_to_assignment(id: OperatorId) -> bool {
    matches!(
        category(id),
        OperatorCategory::Arithmetic | OperatorCategory::Bitwise | OperatorCategory::Shift
    )
}

const fn op(id: OperatorId, spelling: &'static str, category: OperatorCategory, description: &'static str) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        category,
        targets_self: false,
        description,
    }
}

const fn self_op(id: OperatorId, spelling: &'static str, description: &'static str) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        category: OperatorCategory::Access,
        targets_self: true,
        description,
    }
}
