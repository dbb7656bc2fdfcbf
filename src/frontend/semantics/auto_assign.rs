//! Auto-assignment expansion.
//!
//! A bare expression statement whose chain starts with an identifier and ends with an arithmetic, bitwise or shift
//! operator updates that identifier in place: `x 1 +` is shorthand for `x x 1 + =`. Initializer expressions are left
//! alone since their target is explicit.

use scandi_core::lang::operators::{self, OperatorId};
use scandi_syntax::ast::{Node, NodeId, NodeKind};

use super::Analyser;

impl Analyser<'_> {
    pub(crate) fn expand_auto_assignments(&mut self) {
        for id in self.tree.preorder() {
            if !matches!(self.tree.node(id).kind, NodeKind::Expression { initializes: None }) {
                continue;
            }
            if self.expand(id) {
                self.report.expanded += 1;
                tracing::debug!(
                    line = self.tree.node(id).position.line,
                    chain = %self.tree.render_chain(self.tree.node(id).next),
                    "expanded auto-assignment"
                );
            }
        }
    }

    /// Rewrite the chain of `expression` if it qualifies. Returns whether it did.
    fn expand(&mut self, expression: NodeId) -> bool {
        let links = self.tree.chain_ids(self.tree.node(expression).next);
        let (Some(&head), Some(&tail)) = (links.first(), links.last()) else {
            return false;
        };
        if head == tail || !matches!(self.tree.node(head).kind, NodeKind::Identifier { .. }) {
            return false;
        }
        let NodeKind::Operator(op) = self.tree.node(tail).kind else {
            return false;
        };
        if !operators::expands_to_assignment(op) {
            return false;
        }

        let head_node = self.tree.node(head);
        let mut target = Node::new(
            head_node.name.clone(),
            NodeKind::Identifier { target: None },
            head_node.depth,
            head_node.position.clone(),
        );
        target.parent = head_node.parent;
        target.next = head_node.next;
        let copy = self.tree.alloc(target);
        self.tree.node_mut(head).next = Some(copy);

        let tail_node = self.tree.node(tail);
        let mut assign = Node::new(
            "",
            NodeKind::Operator(OperatorId::Assign),
            tail_node.depth,
            tail_node.position.clone(),
        );
        assign.parent = tail_node.parent;
        let assign = self.tree.alloc(assign);
        self.tree.node_mut(tail).next = Some(assign);
        true
    }
}
