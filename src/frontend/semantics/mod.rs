//! Semantic resolver for Scandi scope trees.
//!
//! Runs fixed-order passes over a parsed [`ScopeTree`] and mutates it in place:
//!
//! 1. **Auto-assignment** ([`auto_assign`]): `x 1 +` becomes `x x 1 + =`.
//! 2. **Identifier linking** ([`identifiers`]): every identifier operand gets the declaration it names.
//! 3. **Global visibility** ([`visibility`]): structural checks that every node hangs off the root and every
//!    declaration is reachable by name.
//! 4. **Conditional stitching** ([`conditionals`]): a conditional absorbs the `:` label that follows it.
//!
//! ## Notes
//!
//! - **Error accumulation**: every pass runs even after an earlier one reported errors. All errors are returned
//!   together as one [`FrontendError::Semantic`].
//! - **Unresolved names** are not errors. A name may live in a unit compiled separately; it is recorded in the
//!   [`SemanticReport`] and logged at debug level.
//! - All walks use explicit stacks.
//!
//! ## Examples
//!
//! ```rust
//! use scandi::frontend::semantics;
//! use scandi_syntax::ast::ScopeTree;
//! use scandi_syntax::{lexer, parser};
//!
//! let tokens = lexer::tokenize("$y\ny 1 +\n", "demo.scandi").unwrap();
//! let mut tree = ScopeTree::new();
//! parser::parse(&tokens, &mut tree).unwrap();
//! let report = semantics::analyse(&mut tree).unwrap();
//! assert_eq!(report.expanded, 1);
//! assert!(report.unresolved.is_empty());
//! ```

mod auto_assign;
mod conditionals;
mod identifiers;
mod visibility;

#[cfg(test)]
mod tests;

use scandi_syntax::ast::{Position, ScopeTree};
use scandi_syntax::diagnostics::CompileError;

use super::FrontendError;

/// A name that no enclosing scope declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Unresolved {
    pub name: String,
    pub position: Position,
}

/// What the resolver did, for callers and tests.
#[derive(Debug, Clone, Default)]
pub struct SemanticReport {
    /// Non-fatal findings (`ErrorKind::Warning`).
    pub warnings: Vec<CompileError>,
    /// Expression chains rewritten by auto-assignment.
    pub expanded: usize,
    /// Identifiers linked to a declaration.
    pub linked: usize,
    /// Identifiers left unlinked.
    pub unresolved: Vec<Unresolved>,
    /// Conditionals that received an else branch.
    pub stitched: usize,
}

/// Resolver state: the tree being rewritten plus everything collected along the way.
pub(crate) struct Analyser<'t> {
    pub(crate) tree: &'t mut ScopeTree,
    pub(crate) errors: Vec<CompileError>,
    pub(crate) report: SemanticReport,
}

impl<'t> Analyser<'t> {
    pub(crate) fn new(tree: &'t mut ScopeTree) -> Self {
        Self {
            tree,
            errors: Vec::new(),
            report: SemanticReport::default(),
        }
    }

    /// Run every pass in order.
    ///
    /// ## Errors
    /// Returns all errors the passes produced, in pass order.
    pub(crate) fn run(mut self) -> Result<SemanticReport, Vec<CompileError>> {
        self.expand_auto_assignments();
        self.link_identifiers();
        self.check_visibility();
        self.stitch_conditionals();

        if self.errors.is_empty() {
            Ok(self.report)
        } else {
            Err(self.errors)
        }
    }

    pub(crate) fn warn(&mut self, warning: CompileError) {
        tracing::warn!(position = %warning.position, "{}", warning.message);
        self.report.warnings.push(warning);
    }
}

/// Resolve `tree` in place.
///
/// ## Errors
/// Returns [`FrontendError::Semantic`] carrying every error collected by any pass.
#[tracing::instrument(skip_all, fields(nodes = tree.len()))]
pub fn analyse(tree: &mut ScopeTree) -> Result<SemanticReport, FrontendError> {
    let report = Analyser::new(tree).run().map_err(FrontendError::Semantic)?;
    tracing::debug!(
        expanded = report.expanded,
        linked = report.linked,
        unresolved = report.unresolved.len(),
        stitched = report.stitched,
        warnings = report.warnings.len(),
        "semantic analysis finished"
    );
    Ok(report)
}
