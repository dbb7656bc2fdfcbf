//! Conditional stitching.
//!
//! The parser leaves `:` as an ordinary `auto_else_<line>` label next to its conditional. This pass moves the label
//! into the conditional's `when_false` slot so a code generator sees one node with both branches.

use scandi_core::lang::conventions;
use scandi_syntax::ast::{NodeId, NodeKind};
use scandi_syntax::diagnostics::CompileError;

use super::Analyser;

impl Analyser<'_> {
    pub(crate) fn stitch_conditionals(&mut self) {
        for parent in self.tree.preorder() {
            if !self.tree.node(parent).children.is_empty() {
                self.stitch_children(parent);
            }
        }
    }

    /// Pair every conditional of `parent` with an else label directly after it.
    fn stitch_children(&mut self, parent: NodeId) {
        let children = self.tree.node(parent).children.clone();
        let mut pending: Option<NodeId> = None;

        for child in children {
            let node = self.tree.node(child);
            match &node.kind {
                NodeKind::Conditional { .. } => {
                    if let Some(previous) = pending.take() {
                        self.without_else(previous);
                    }
                    if node.children.is_empty() {
                        let warning = CompileError::warning(
                            format!("conditional without a success block ('{}')", node.name),
                            node.position.clone(),
                        )
                        .with_hint("indent the statements to run when the comparison holds below the condition");
                        self.warn(warning);
                    }
                    pending = Some(child);
                }
                NodeKind::Label if conventions::is_auto_else(&node.name) => match pending.take() {
                    Some(conditional) => self.stitch(parent, conditional, child),
                    None => {
                        let warning = CompileError::warning("else without a preceding conditional", node.position.clone())
                            .with_note("the ':' line is kept as a plain label");
                        self.warn(warning);
                    }
                },
                _ => {
                    if let Some(previous) = pending.take() {
                        self.without_else(previous);
                    }
                }
            }
        }
        if let Some(previous) = pending {
            self.without_else(previous);
        }
    }

    fn stitch(&mut self, parent: NodeId, conditional: NodeId, label: NodeId) {
        if let NodeKind::Conditional { when_false, .. } = &mut self.tree.node_mut(conditional).kind {
            *when_false = Some(label);
        }
        self.tree.remove_child(parent, label);
        self.report.stitched += 1;
        tracing::debug!(
            conditional = %self.tree.node(conditional).name,
            label = %self.tree.node(label).name,
            "stitched else branch"
        );
    }

    fn without_else(&self, conditional: NodeId) {
        let node = self.tree.node(conditional);
        if matches!(node.kind, NodeKind::Conditional { when_false: None, .. }) {
            tracing::debug!(conditional = %node.name, "conditional has no else branch");
        }
    }
}
