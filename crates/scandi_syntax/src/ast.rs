//! Scope tree for Scandi.
//!
//! Every construct of a compilation (scopes, declarations, expression statements and their operand chains) is a
//! [`Node`] stored in one arena, the [`ScopeTree`], and addressed by a [`NodeId`]. Node `0` is the global root.
//!
//! ## Notes
//! - `parent` is a plain index used for lookups only. Traversal order comes from `children` (statements) and
//!   `next` (operand chains, parameter chains).
//! - Nesting is decided by `depth` alone: a node belongs to the nearest ancestor with a strictly smaller depth
//!   (see [`ScopeTree::find_attach_point`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use scandi_core::lang::conventions;
use scandi_core::lang::operators::{self, OperatorId};

// ============================================================================
// Source positions
// ============================================================================

/// A 1-based source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(file: Arc<str>, line: usize, column: usize) -> Self {
        Self { file, line, column }
    }

    /// Position of nodes that have no source text (the global root).
    pub fn builtin() -> Self {
        Self {
            file: Arc::from("<builtin>"),
            line: 0,
            column: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Index of a node inside its [`ScopeTree`].
pub type NodeId = usize;

/// Nesting depth of a line (leading spaces + 1). The root is -1 and file scopes are 0.
pub type Depth = i32;

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Anonymous block, file scope or the global root.
    Scope,
    Label,
    Variable,
    /// Parameters hang off `next` as a chain of `Variable` nodes.
    Function {
        parameters: Vec<String>,
        parameter_map: HashMap<String, NodeId>,
        takes_varargs: bool,
    },
    /// Named expression; the chain starts at `next`.
    Alias,
    /// The condition chain starts at `next`; `when_false` is filled in by the resolver.
    Conditional {
        comparison: OperatorId,
        when_false: Option<NodeId>,
    },
    /// Statement placeholder for an operand chain starting at `next`.
    Expression {
        /// The variable this chain initializes, when it came from `$name = ...`.
        initializes: Option<NodeId>,
    },

    // Chain operands
    Identifier {
        target: Option<NodeId>,
    },
    StringLiteral(String),
    BinaryLiteral(Vec<u8>),
    LongLiteral(i64),
    DoubleLiteral(f64),
    NullLiteral,
    Operator(OperatorId),
    /// Bracketed sub-expression owning its own chain.
    Reference {
        chain: Option<NodeId>,
        targets_self: bool,
    },
}

impl NodeKind {
    /// Check whether nodes of this kind register their name in the parent's member map.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::Label
                | NodeKind::Variable
                | NodeKind::Function { .. }
                | NodeKind::Alias
                | NodeKind::Conditional { .. }
        )
    }

    /// Check whether `next` starts an operand chain owned by this node.
    pub fn owns_chain(&self) -> bool {
        matches!(
            self,
            NodeKind::Alias | NodeKind::Conditional { .. } | NodeKind::Expression { .. }
        )
    }

    /// Short lowercase name of the kind, for dumps and diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Scope => "scope",
            NodeKind::Label => "label",
            NodeKind::Variable => "variable",
            NodeKind::Function { .. } => "function",
            NodeKind::Alias => "alias",
            NodeKind::Conditional { .. } => "conditional",
            NodeKind::Expression { .. } => "expression",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::StringLiteral(_) => "string",
            NodeKind::BinaryLiteral(_) => "binary",
            NodeKind::LongLiteral(_) => "long",
            NodeKind::DoubleLiteral(_) => "double",
            NodeKind::NullLiteral => "null",
            NodeKind::Operator(_) => "operator",
            NodeKind::Reference { .. } => "reference",
        }
    }
}

/// A node of the scope tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub depth: Depth,
    pub is_static: bool,
    pub position: Position,
    pub parent: Option<NodeId>,
    /// Statements in source order.
    pub children: Vec<NodeId>,
    /// Declarations by name.
    pub members: HashMap<String, NodeId>,
    /// Next link of an operand chain or parameter chain.
    pub next: Option<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind, depth: Depth, position: Position) -> Self {
        Self {
            name: name.into(),
            kind,
            depth,
            is_static: false,
            position,
            parent: None,
            children: Vec::new(),
            members: HashMap::new(),
            next: None,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

// ============================================================================
// Tree errors
// ============================================================================

/// Structural failures of tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The depth walk ran past the root. The tree is corrupt.
    #[error("attempted to attach a node of depth {depth} to a missing ancestor")]
    MissingAncestor { depth: Depth },
    /// The name is already declared in the same scope.
    #[error("'{name}' is already declared in this scope")]
    Duplicate { name: String, existing: NodeId },
}

// ============================================================================
// The arena
// ============================================================================

/// Arena of nodes with the global root at index 0.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    nodes: Vec<Node>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub const ROOT: NodeId = 0;

    /// Create a tree holding only the global root scope.
    pub fn new() -> Self {
        let root = Node::new(
            conventions::GLOBAL_SCOPE_NAME,
            NodeKind::Scope,
            conventions::GLOBAL_DEPTH,
            Position::builtin(),
        );
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move a node into the arena without linking it anywhere.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    // ------------------------------------------------------------------------
    // Attachment
    // ------------------------------------------------------------------------

    /// Find where a node of `depth` belongs, starting the walk at `from`.
    ///
    /// Walks up while `depth <= ancestor.depth` and returns the first ancestor with a strictly smaller depth.
    pub fn find_attach_point(&self, from: NodeId, depth: Depth) -> Result<NodeId, TreeError> {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get(id).ok_or(TreeError::MissingAncestor { depth })?;
            if node.depth < depth {
                return Ok(id);
            }
            current = node.parent;
        }
        Err(TreeError::MissingAncestor { depth })
    }

    /// Attach `child` below the ancestor of `from` its depth selects. Returns the chosen parent.
    pub fn attach(&mut self, from: NodeId, child: NodeId) -> Result<NodeId, TreeError> {
        let parent = self.find_attach_point(from, self.nodes[child].depth)?;
        if self.nodes[child].kind.is_declaration() {
            self.declare(parent, child)?;
        }
        self.insert_child(parent, child);
        Ok(parent)
    }

    /// Register `child` in the member map of `parent`.
    ///
    /// Only a name already declared directly in `parent` is a conflict; outer declarations may be shadowed.
    pub fn declare(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let name = self.nodes[child].name.clone();
        if let Some(&existing) = self.nodes[parent].members.get(&name) {
            return Err(TreeError::Duplicate { name, existing });
        }
        self.nodes[parent].members.insert(name, child);
        Ok(())
    }

    /// Append `child` to the ordered children of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Remove `child` from the ordered children of `parent`, keeping its member-map entry.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[parent].children;
        match children.iter().position(|&c| c == child) {
            Some(index) => {
                children.remove(index);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Look `name` up among the declarations made directly in `scope`.
    pub fn has_member(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[scope].members.get(name).copied()
    }

    /// Look `name` up among the parameters of `function`.
    pub fn parameter(&self, function: NodeId, name: &str) -> Option<NodeId> {
        match &self.nodes[function].kind {
            NodeKind::Function { parameter_map, .. } => parameter_map.get(name).copied(),
            _ => None,
        }
    }

    /// Check whether `id` is the file scope of a compilation unit.
    pub fn is_file_scope(&self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        matches!(node.kind, NodeKind::Scope) && node.parent == Some(Self::ROOT)
    }

    /// Look `name` up in the global scope.
    ///
    /// Every unit's file-level declarations belong to the global scope, so after the root's own members the file
    /// scopes are searched in the order their units were compiled.
    pub fn global_member(&self, name: &str) -> Option<NodeId> {
        self.has_member(Self::ROOT, name).or_else(|| {
            self.nodes[Self::ROOT]
                .children
                .iter()
                .filter(|&&unit| self.is_file_scope(unit))
                .find_map(|&unit| self.has_member(unit, name))
        })
    }

    /// Resolve `name` as seen from `scope`: own members, parameters (for functions), then each ancestor up to the
    /// global scope.
    pub fn can_see(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        let mut current = Some(scope);
        let mut steps = 0;
        while let Some(id) = current {
            let found = if id == Self::ROOT {
                self.global_member(name)
            } else {
                self.has_member(id, name)
            };
            if found.is_some() {
                return found;
            }
            if let Some(found) = self.parameter(id, name) {
                return Some(found);
            }
            steps += 1;
            if steps > self.nodes.len() {
                return None;
            }
            current = self.nodes[id].parent;
        }
        None
    }

    // ------------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------------

    /// Iterate an operand or parameter chain starting at `head`.
    pub fn chain(&self, head: Option<NodeId>) -> Chain<'_> {
        Chain {
            tree: self,
            current: head,
            remaining: self.nodes.len(),
        }
    }

    /// Collect a chain into a vector.
    pub fn chain_ids(&self, head: Option<NodeId>) -> Vec<NodeId> {
        self.chain(head).collect()
    }

    /// Iterate the parent links above `id` (excluding `id`).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.nodes[id].parent,
            remaining: self.nodes.len(),
        }
    }

    /// Statement nodes in depth-first pre-order, starting at the root.
    ///
    /// A conditional's `when_false` label is visited after the conditional's own children.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = &self.nodes[id];
            if let NodeKind::Conditional {
                when_false: Some(label),
                ..
            } = node.kind
            {
                stack.push(label);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Every operand of the chain owned by `owner`, including operands of nested references.
    pub fn operands(&self, owner: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut heads = vec![self.nodes[owner].next];
        while let Some(head) = heads.pop() {
            for id in self.chain(head) {
                out.push(id);
                if let NodeKind::Reference { chain, .. } = self.nodes[id].kind {
                    heads.push(chain);
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Source-like spelling of a single operand.
    pub fn operand_spelling(&self, id: NodeId) -> String {
        let node = &self.nodes[id];
        match &node.kind {
            NodeKind::Identifier { .. } => node.name.clone(),
            NodeKind::StringLiteral(text) if text.contains('"') => format!("'{text}'"),
            NodeKind::StringLiteral(text) => format!("\"{text}\""),
            NodeKind::BinaryLiteral(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                format!("#\"{hex}\"")
            }
            NodeKind::LongLiteral(value) => value.to_string(),
            NodeKind::DoubleLiteral(value) => format!("{value:?}").replace('.', ","),
            NodeKind::NullLiteral => "()".to_string(),
            NodeKind::Operator(op) => operators::as_str(*op).to_string(),
            NodeKind::Reference { chain, .. } => format!("[{}]", self.render_chain(*chain)),
            other => other.describe().to_string(),
        }
    }

    /// Space-separated spelling of a chain.
    pub fn render_chain(&self, head: Option<NodeId>) -> String {
        self.chain(head)
            .map(|id| self.operand_spelling(id))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Iterator over `next` links. Stops after visiting as many nodes as the arena holds.
pub struct Chain<'a> {
    tree: &'a ScopeTree,
    current: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Chain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = self.tree.get(id)?.next;
        Some(id)
    }
}

/// Iterator over parent links. Stops after visiting as many nodes as the arena holds.
pub struct Ancestors<'a> {
    tree: &'a ScopeTree,
    current: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = self.tree.get(id)?.parent;
        Some(id)
    }
}

/// Indented structural dump, one statement per line.
impl fmt::Display for ScopeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(Self::ROOT, 0usize)];
        while let Some((id, level)) = stack.pop() {
            let node = &self.nodes[id];
            let indent = "  ".repeat(level);
            let static_marker = if node.is_static { "static " } else { "" };
            match &node.kind {
                NodeKind::Function {
                    parameters,
                    takes_varargs,
                    ..
                } => {
                    let varargs = if *takes_varargs { " []" } else { "" };
                    writeln!(
                        f,
                        "{indent}{static_marker}function {}({}){varargs}",
                        node.name,
                        parameters.join(" ")
                    )?;
                }
                NodeKind::Conditional { comparison, .. } => writeln!(
                    f,
                    "{indent}conditional {} [{}] {}",
                    node.name,
                    self.render_chain(node.next),
                    operators::as_str(*comparison)
                )?,
                NodeKind::Alias => writeln!(f, "{indent}alias {} [{}]", node.name, self.render_chain(node.next))?,
                NodeKind::Expression { .. } => writeln!(f, "{indent}expression [{}]", self.render_chain(node.next))?,
                kind => writeln!(f, "{indent}{static_marker}{} {}", kind.describe(), node.name)?,
            }
            if let NodeKind::Conditional {
                when_false: Some(label),
                ..
            } = node.kind
            {
                stack.push((label, level));
            }
            stack.extend(node.children.iter().rev().map(|&c| (c, level + 1)));
        }
        Ok(())
    }
}
