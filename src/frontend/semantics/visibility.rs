//! Global-visibility check.
//!
//! Verifies the structure the other passes rely on. A failure here means the parser or an earlier pass built a
//! broken tree, so every finding is an internal error.

use scandi_syntax::ast::{NodeId, NodeKind, ScopeTree};
use scandi_syntax::diagnostics::CompileError;

use super::Analyser;

impl Analyser<'_> {
    pub(crate) fn check_visibility(&mut self) {
        let root = self.tree.root();
        for id in self.tree.preorder() {
            if id != root && !reaches_root(self.tree, id) {
                let node = self.tree.node(id);
                self.errors.push(CompileError::internal(
                    format!("{} '{}' is not connected to the global scope", node.kind.describe(), node.name),
                    node.position.clone(),
                ));
                continue;
            }
            if let Some(error) = self.check_declaration(id) {
                self.errors.push(error);
            }
            if self.tree.node(id).kind.owns_chain() {
                for operand in self.tree.operands(id) {
                    if let Some(error) = self.check_link(operand) {
                        self.errors.push(error);
                    }
                }
            }
        }
    }

    /// A declaration must be the member its parent registers under its name, and visible from there.
    fn check_declaration(&self, id: NodeId) -> Option<CompileError> {
        let node = self.tree.node(id);
        if !node.kind.is_declaration() {
            return None;
        }
        let parent = node.parent?;
        let registered = self.tree.has_member(parent, &node.name);
        let visible = self.tree.can_see(parent, &node.name);
        if registered == Some(id) && visible == Some(id) {
            return None;
        }
        Some(
            CompileError::internal(
                format!("{} '{}' is not visible from its scope", node.kind.describe(), node.name),
                node.position.clone(),
            )
            .with_note(format!("registered as {registered:?}, resolved as {visible:?}")),
        )
    }

    /// A linked identifier must point at exactly what lookup from its scope finds.
    fn check_link(&self, operand: NodeId) -> Option<CompileError> {
        let node = self.tree.node(operand);
        let NodeKind::Identifier { target: Some(target) } = node.kind else {
            return None;
        };
        let expected = node.parent.and_then(|scope| self.tree.can_see(scope, &node.name));
        if expected == Some(target) {
            return None;
        }
        Some(CompileError::internal(
            format!("identifier '{}' is linked to a declaration it cannot see", node.name),
            node.position.clone(),
        ))
    }
}

/// Follow parent links from `id`; cycles end the walk without reaching the root.
fn reaches_root(tree: &ScopeTree, id: NodeId) -> bool {
    let root = tree.root();
    tree.ancestors(id).any(|ancestor| ancestor == root)
}
