//! Scandi Compiler Backend
//!
//! Read-only consumers of a resolved [`ScopeTree`]. Code generation proper lives outside this crate; what lives here is
//! the contract a generator plugs into, plus the trace emitter that prints what a generator would be asked to do.
//!
//! ## Module Organization
//!
//! - `mod.rs` - [`TreeVisitor`] and the [`walk`] driving it
//! - `emitter.rs` - Indented text buffer
//! - `trace.rs` - [`TraceEmitter`], the standard visitor
//!
//! ## Notes
//!
//! - The walk is pre-order with explicit `enter_*`/`leave_*` calls for nodes that open a block.
//! - A stitched else branch is walked as part of its conditional, between the success block and
//!   [`TreeVisitor::leave_conditional`].

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]

pub mod emitter;
pub mod trace;

pub use trace::{TraceEmitter, emit_trace};

use scandi_syntax::ast::{Node, NodeId, NodeKind, ScopeTree};

/// One node handed to a visitor, with its nesting level below the global root.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'t> {
    pub tree: &'t ScopeTree,
    pub id: NodeId,
    pub level: usize,
}

impl<'t> Visit<'t> {
    pub fn node(&self) -> &'t Node {
        self.tree.node(self.id)
    }
}

/// Callbacks of a code generator. Every method defaults to doing nothing.
///
/// Children of labels and variables are visited right after the node itself, one level deeper.
pub trait TreeVisitor {
    fn enter_scope(&mut self, _scope: &Visit<'_>) {}
    fn leave_scope(&mut self, _scope: &Visit<'_>) {}
    fn label(&mut self, _label: &Visit<'_>) {}
    fn variable(&mut self, _variable: &Visit<'_>) {}
    /// Parameters are reachable through the function's `next` chain.
    fn enter_function(&mut self, _function: &Visit<'_>) {}
    fn leave_function(&mut self, _function: &Visit<'_>) {}
    fn alias(&mut self, _alias: &Visit<'_>) {}
    fn enter_conditional(&mut self, _conditional: &Visit<'_>) {}
    /// Called once the success block is done, before the statements of `when_false`.
    fn else_branch(&mut self, _conditional: &Visit<'_>) {}
    fn leave_conditional(&mut self, _conditional: &Visit<'_>) {}
    fn expression(&mut self, _expression: &Visit<'_>) {}
}

enum Step {
    Visit(NodeId, usize),
    Else(NodeId, usize),
    Leave(NodeId, usize),
}

/// Walk `tree` depth-first from the global root, dispatching every statement to `visitor`.
pub fn walk<V: TreeVisitor + ?Sized>(tree: &ScopeTree, visitor: &mut V) {
    let mut stack = vec![Step::Visit(tree.root(), 0)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(id, level) => {
                let visit = Visit { tree, id, level };
                let node = visit.node();
                match &node.kind {
                    NodeKind::Scope => {
                        visitor.enter_scope(&visit);
                        stack.push(Step::Leave(id, level));
                    }
                    NodeKind::Function { .. } => {
                        visitor.enter_function(&visit);
                        stack.push(Step::Leave(id, level));
                    }
                    NodeKind::Conditional { when_false, .. } => {
                        visitor.enter_conditional(&visit);
                        stack.push(Step::Leave(id, level));
                        if when_false.is_some() {
                            stack.push(Step::Else(id, level));
                        }
                    }
                    NodeKind::Label => visitor.label(&visit),
                    NodeKind::Variable => visitor.variable(&visit),
                    NodeKind::Alias => visitor.alias(&visit),
                    NodeKind::Expression { .. } => visitor.expression(&visit),
                    _ => continue,
                }
                push_children(&mut stack, node, level + 1);
            }
            Step::Else(id, level) => {
                let visit = Visit { tree, id, level };
                visitor.else_branch(&visit);
                if let NodeKind::Conditional {
                    when_false: Some(label),
                    ..
                } = visit.node().kind
                {
                    push_children(&mut stack, tree.node(label), level + 1);
                }
            }
            Step::Leave(id, level) => {
                let visit = Visit { tree, id, level };
                match visit.node().kind {
                    NodeKind::Scope => visitor.leave_scope(&visit),
                    NodeKind::Function { .. } => visitor.leave_function(&visit),
                    NodeKind::Conditional { .. } => visitor.leave_conditional(&visit),
                    _ => {}
                }
            }
        }
    }
}

fn push_children(stack: &mut Vec<Step>, node: &Node, level: usize) {
    stack.extend(node.children.iter().rev().map(|&child| Step::Visit(child, level)));
}
