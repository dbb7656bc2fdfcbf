//! Identifier linking.

use scandi_syntax::ast::NodeKind;

use super::{Analyser, Unresolved};

impl Analyser<'_> {
    /// Link every identifier of every owned chain, nested reference chains included.
    ///
    /// Lookup starts at the identifier's parent (the scope its statement was attached to) and walks outward: members,
    /// then parameters when the scope is a function, then the next ancestor up to the global scope, which holds the
    /// file-level declarations of every unit.
    pub(crate) fn link_identifiers(&mut self) {
        for owner in self.tree.preorder() {
            if !self.tree.node(owner).kind.owns_chain() {
                continue;
            }
            for operand in self.tree.operands(owner) {
                let node = self.tree.node(operand);
                if !matches!(node.kind, NodeKind::Identifier { .. }) {
                    continue;
                }
                let Some(scope) = node.parent else {
                    continue;
                };

                let found = self.tree.can_see(scope, &node.name);
                match found {
                    Some(declaration) => {
                        tracing::debug!(
                            name = %node.name,
                            position = %node.position,
                            declaration,
                            "linked identifier"
                        );
                        self.report.linked += 1;
                    }
                    None => {
                        tracing::debug!(name = %node.name, position = %node.position, "unresolved identifier");
                        self.report.unresolved.push(Unresolved {
                            name: node.name.clone(),
                            position: node.position.clone(),
                        });
                    }
                }
                self.tree.node_mut(operand).kind = NodeKind::Identifier { target: found };
            }
        }
    }
}
