/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, its top-level `parse()` loop and the attach step every statement goes
/// through.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
/// - The parser keeps no indentation stack. The `cursor` is the node attached last; each new node walks up from
///   it to the nearest shallower ancestor.

/// Parser state.
///
/// ## Notes
/// - The first error aborts the compilation unit. Nodes attached before the error stay in the tree.
pub struct Parser<'a> {
    tokens: &'a [Token],
    tree: &'a mut ScopeTree,
    cursor: NodeId,
}

impl<'a> Parser<'a> {
    /// Create a parser that grows `tree`, attaching the first statement relative to `start`.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `scandi_syntax::lexer`.
    /// - `tree`: The tree to grow. Several units may be parsed into the same tree.
    /// - `start`: Node the first depth walk begins at, usually the root.
    pub fn new(tokens: &'a [Token], tree: &'a mut ScopeTree, start: NodeId) -> Self {
        Self {
            tokens,
            tree,
            cursor: start,
        }
    }

    /// Parse the entire token stream into the tree and return the root.
    ///
    /// ## Errors
    /// Returns the first [`CompileError`]; the parser does not recover within a unit.
    pub fn parse(mut self) -> Result<NodeId, CompileError> {
        for run in scope_runs(self.tokens)? {
            self.statement(&run)?;
        }
        Ok(self.tree.root())
    }

    // ========================================================================
    // Attachment
    // ========================================================================

    /// Allocate a detached node for the statement of `run`.
    fn new_node(&mut self, name: impl Into<String>, kind: NodeKind, run: &ScopeRun<'_>) -> NodeId {
        self.tree
            .alloc(Node::new(name, kind, run.depth, run.statement_position()))
    }

    /// Attach `node` by depth relative to the cursor, register it if it is a declaration, and make it the cursor.
    ///
    /// Returns the parent the node was attached to.
    fn attach(&mut self, node: NodeId) -> Result<NodeId, CompileError> {
        let position = self.tree.node(node).position.clone();
        match self.tree.attach(self.cursor, node) {
            Ok(parent) => {
                self.cursor = node;
                let attached = self.tree.node(node);
                tracing::debug!(
                    kind = attached.kind.describe(),
                    name = %attached.name,
                    depth = attached.depth,
                    parent,
                    "attached node"
                );
                Ok(parent)
            }
            Err(TreeError::Duplicate { name, .. }) => Err(errors::duplicate_declaration(&name, position)),
            Err(err @ TreeError::MissingAncestor { .. }) => Err(CompileError::internal(err.to_string(), position)),
        }
    }
}
