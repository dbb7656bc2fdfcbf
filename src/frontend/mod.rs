//! Scandi Compiler Frontend
//!
//! This module ties the front-end stages together:
//! - `lexer`: tokenization of source lines (from `scandi_syntax`)
//! - `parser`: depth-driven construction of the scope tree (from `scandi_syntax`)
//! - `semantics`: in-place resolution of the parsed tree
//!
//! [`compile`] runs all of them over a set of compilation units that share one global scope.

// Syntax components are provided by the shared scandi_syntax crate.
pub use scandi_syntax::{ast, diagnostics, lexer, parser};

pub mod semantics;

use std::sync::Arc;

use ast::ScopeTree;
use diagnostics::CompileError;

pub use semantics::{SemanticReport, analyse};

/// One source file to compile.
///
/// `name` becomes the name of the unit's file scope and the file part of every position in it.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub name: Arc<str>,
    pub source: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<Arc<str>>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// A resolved program, ready for code generation.
#[derive(Debug, Clone)]
pub struct Program {
    pub tree: ScopeTree,
    pub report: SemanticReport,
}

/// Failure of one front-end stage.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FrontendError {
    /// Every line that failed to tokenize, across all units.
    #[error("tokenization failed with {} error(s)", .0.len())]
    #[diagnostic(code(scandi::lex))]
    Lex(Vec<CompileError>),

    /// The first malformed statement of every unit that failed to parse.
    #[error("parsing failed with {} error(s)", .0.len())]
    #[diagnostic(code(scandi::parse))]
    Parse(Vec<CompileError>),

    /// Everything the resolver passes collected.
    #[error("semantic errors occurred")]
    #[diagnostic(code(scandi::semantic))]
    Semantic(Vec<CompileError>),

    /// A broken invariant of the compiler itself.
    #[error("{0}")]
    #[diagnostic(code(scandi::internal), help("this is a bug in the compiler"))]
    Internal(CompileError),
}

impl FrontendError {
    /// The individual errors behind this failure.
    pub fn errors(&self) -> &[CompileError] {
        match self {
            FrontendError::Lex(errors) | FrontendError::Parse(errors) | FrontendError::Semantic(errors) => errors,
            FrontendError::Internal(error) => std::slice::from_ref(error),
        }
    }
}

/// Tokenize every unit, parse them into one tree and resolve it.
///
/// ## Errors
/// - [`FrontendError::Lex`] with the errors of every unit when any line fails to tokenize. Nothing is parsed then.
/// - [`FrontendError::Parse`] with the first malformed statement of each failing unit. A parse error ends only its
///   own unit; the remaining units are still parsed.
/// - [`FrontendError::Internal`] when attachment breaks down.
/// - [`FrontendError::Semantic`] from [`analyse`].
#[tracing::instrument(skip_all, fields(units = units.len()))]
pub fn compile(units: &[SourceUnit]) -> Result<Program, FrontendError> {
    let mut streams = Vec::with_capacity(units.len());
    let mut lex_errors = Vec::new();
    for unit in units {
        match lexer::tokenize(&unit.source, &unit.name) {
            Ok(tokens) => streams.push(tokens),
            Err(errors) => lex_errors.extend(errors),
        }
    }
    if !lex_errors.is_empty() {
        return Err(FrontendError::Lex(lex_errors));
    }

    let mut tree = ScopeTree::new();
    let mut parse_errors = Vec::new();
    for tokens in &streams {
        let root = tree.root();
        if let Err(error) = parser::parse_into(tokens, &mut tree, root) {
            if error.kind == diagnostics::ErrorKind::Internal {
                return Err(FrontendError::Internal(error));
            }
            parse_errors.push(error);
        }
    }
    if !parse_errors.is_empty() {
        return Err(FrontendError::Parse(parse_errors));
    }

    let report = analyse(&mut tree)?;
    Ok(Program { tree, report })
}
