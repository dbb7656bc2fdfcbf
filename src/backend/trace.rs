//! Code-generation trace.
//!
//! [`TraceEmitter`] prints one line per request a code generator would receive, indented two spaces per nesting level:
//!
//! ```text
//! NEW SCOPE t.scandi
//!   ADD FUNCTION f
//!     ADD PARAMETER a
//!     ADD EXPRESSION a@f a@f 1 + =
//!   END FUNCTION f
//! END SCOPE t.scandi
//! ```
//!
//! Linked identifiers are printed as `name@scope`, where `scope` is the node that declares the target.

use scandi_core::lang::operators;
use scandi_syntax::ast::{NodeId, NodeKind, ScopeTree};

use super::emitter::TextEmitter;
use super::{TreeVisitor, Visit, walk};

/// Visitor that renders the trace into a [`TextEmitter`].
#[derive(Debug, Default)]
pub struct TraceEmitter {
    out: TextEmitter,
}

impl TraceEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out.finish()
    }

    fn at(&mut self, visit: &Visit<'_>) -> &mut TextEmitter {
        self.out.set_indent(visit.level);
        &mut self.out
    }
}

impl TreeVisitor for TraceEmitter {
    fn enter_scope(&mut self, scope: &Visit<'_>) {
        let name = &scope.node().name;
        self.at(scope).linef(format_args!("NEW SCOPE {name}"));
    }

    fn leave_scope(&mut self, scope: &Visit<'_>) {
        let name = &scope.node().name;
        self.at(scope).linef(format_args!("END SCOPE {name}"));
    }

    fn label(&mut self, label: &Visit<'_>) {
        let name = &label.node().name;
        self.at(label).linef(format_args!("ADD LABEL {name}"));
    }

    fn variable(&mut self, variable: &Visit<'_>) {
        let node = variable.node();
        let what = if node.children.is_empty() { "VARIABLE" } else { "CLASS" };
        self.at(variable)
            .linef(format_args!("ADD {}{what} {}", static_prefix(node.is_static), node.name));
    }

    fn enter_function(&mut self, function: &Visit<'_>) {
        let tree = function.tree;
        let node = function.node();
        let out = self.at(function);
        out.linef(format_args!("ADD {}FUNCTION {}", static_prefix(node.is_static), node.name));
        out.indent();
        for param in tree.chain(node.next) {
            out.linef(format_args!("ADD PARAMETER {}", tree.node(param).name));
        }
        if let NodeKind::Function { takes_varargs: true, .. } = node.kind {
            out.line("ADD VARARGS");
        }
    }

    fn leave_function(&mut self, function: &Visit<'_>) {
        let name = &function.node().name;
        self.at(function).linef(format_args!("END FUNCTION {name}"));
    }

    fn alias(&mut self, alias: &Visit<'_>) {
        let node = alias.node();
        let chain = render_chain(alias.tree, node.next);
        self.at(alias)
            .linef(format_args!("ADD INLINE FUNCTION {} = {chain}", node.name));
    }

    fn enter_conditional(&mut self, conditional: &Visit<'_>) {
        let node = conditional.node();
        let NodeKind::Conditional { comparison, .. } = node.kind else {
            return;
        };
        let chain = render_chain(conditional.tree, node.next);
        let out = self.at(conditional);
        out.linef(format_args!(
            "ADD CONDITIONAL {} IF {chain} {}",
            node.name,
            operators::as_str(comparison)
        ));
        out.line("THEN");
    }

    fn else_branch(&mut self, conditional: &Visit<'_>) {
        let NodeKind::Conditional {
            when_false: Some(label),
            ..
        } = conditional.node().kind
        else {
            return;
        };
        let name = &conditional.tree.node(label).name;
        self.at(conditional).linef(format_args!("ELSE {name}"));
    }

    fn leave_conditional(&mut self, conditional: &Visit<'_>) {
        let name = &conditional.node().name;
        self.at(conditional).linef(format_args!("END CONDITIONAL {name}"));
    }

    fn expression(&mut self, expression: &Visit<'_>) {
        let tree = expression.tree;
        let node = expression.node();
        let chain = render_chain(tree, node.next);
        match node.kind {
            NodeKind::Expression {
                initializes: Some(variable),
            } => {
                let target = &tree.node(variable).name;
                self.at(expression)
                    .linef(format_args!("ADD INITIALIZER {target} = {chain}"));
            }
            _ => self.at(expression).linef(format_args!("ADD EXPRESSION {chain}")),
        }
    }
}

fn static_prefix(is_static: bool) -> &'static str {
    if is_static { "STATIC " } else { "" }
}

/// Spell a chain, marking linked identifiers with the scope that declares them.
fn render_chain(tree: &ScopeTree, head: Option<NodeId>) -> String {
    tree.chain(head)
        .map(|id| {
            let node = tree.node(id);
            match node.kind {
                NodeKind::Identifier { target: Some(target) } => {
                    let scope = tree
                        .node(target)
                        .parent
                        .map_or("?", |parent| tree.node(parent).name.as_str());
                    format!("{}@{scope}", node.name)
                }
                NodeKind::Reference { chain, .. } => format!("[{}]", render_chain(tree, chain)),
                _ => tree.operand_spelling(id),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the trace of a resolved tree.
pub fn emit_trace(tree: &ScopeTree) -> String {
    let mut emitter = TraceEmitter::new();
    walk(tree, &mut emitter);
    emitter.finish()
}
