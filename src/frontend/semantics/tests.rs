//! Resolver unit tests.

use super::*;
use scandi_syntax::ast::{NodeId, NodeKind};
use scandi_syntax::diagnostics::ErrorKind;
use scandi_syntax::{lexer, parser};

fn parse_str(source: &str) -> ScopeTree {
    let tokens = lexer::tokenize(source, "t.scandi").expect("lex failed");
    let mut tree = ScopeTree::new();
    parser::parse(&tokens, &mut tree).expect("parse failed");
    tree
}

fn analyse_str(source: &str) -> (ScopeTree, SemanticReport) {
    let mut tree = parse_str(source);
    let report = analyse(&mut tree).expect("analysis failed");
    (tree, report)
}

fn file(tree: &ScopeTree) -> NodeId {
    tree.node(tree.root()).children[0]
}

fn statement(tree: &ScopeTree, index: usize) -> NodeId {
    tree.node(file(tree)).children[index]
}

fn chain_of(tree: &ScopeTree, owner: NodeId) -> String {
    tree.render_chain(tree.node(owner).next)
}

// ========================================
// Auto-assignment
// ========================================

#[test]
fn test_shorthand_expands_to_assignment() {
    let (tree, report) = analyse_str("$y\ny 1 +\n");
    assert_eq!(report.expanded, 1);
    assert_eq!(chain_of(&tree, statement(&tree, 1)), "y y 1 + =");
}

#[test]
fn test_initializer_is_not_expanded() {
    let (tree, report) = analyse_str("$x\n$y=x 1 +\n");
    assert_eq!(report.expanded, 0);
    let children = &tree.node(file(&tree)).children;
    assert_eq!(children.len(), 3);
    assert_eq!(chain_of(&tree, children[2]), "x 1 +");
}

#[test]
fn test_expansion_is_idempotent() {
    let mut tree = parse_str("$y\ny 2 <-\ny 3 ~\n");
    let mut analyser = Analyser::new(&mut tree);
    analyser.expand_auto_assignments();
    analyser.expand_auto_assignments();
    assert_eq!(analyser.report.expanded, 2);
    assert_eq!(chain_of(&tree, statement(&tree, 1)), "y y 2 <- =");
    assert_eq!(chain_of(&tree, statement(&tree, 2)), "y y 3 ~ =");
}

#[test]
fn test_chains_that_do_not_qualify_are_left_alone() {
    let (tree, report) = analyse_str("$y\ny 1 =\n1 y +\ny . z\ny\n");
    assert_eq!(report.expanded, 0);
    assert_eq!(chain_of(&tree, statement(&tree, 1)), "y 1 =");
    assert_eq!(chain_of(&tree, statement(&tree, 2)), "1 y +");
    assert_eq!(chain_of(&tree, statement(&tree, 4)), "y");
}

#[test]
fn test_inserted_copy_is_linked_like_the_head() {
    let (tree, _) = analyse_str("$y\ny 1 +\n");
    let y = tree.has_member(file(&tree), "y").unwrap();
    let links = tree.chain_ids(tree.node(statement(&tree, 1)).next);
    assert_eq!(tree.node(links[0]).kind, NodeKind::Identifier { target: Some(y) });
    assert_eq!(tree.node(links[1]).kind, NodeKind::Identifier { target: Some(y) });
}

// ========================================
// Identifier linking
// ========================================

#[test]
fn test_parameters_are_visible_in_function_body() {
    let (tree, report) = analyse_str("$a @f\n a 1 =\n");
    let f = tree.has_member(file(&tree), "f").unwrap();
    let param = tree.parameter(f, "a").unwrap();
    let body = tree.node(f).children[0];
    let head = tree.node(body).next.unwrap();
    assert_eq!(tree.node(head).kind, NodeKind::Identifier { target: Some(param) });
    assert_eq!(report.linked, 1);
}

#[test]
fn test_nearest_declaration_wins() {
    let (tree, _) = analyse_str("$x\n\\block\n $x\n x 1 =\n");
    let block = tree.has_member(file(&tree), "block").unwrap();
    let inner = tree.has_member(block, "x").unwrap();
    let expression = tree.node(block).children[1];
    let head = tree.node(expression).next.unwrap();
    assert_eq!(tree.node(head).kind, NodeKind::Identifier { target: Some(inner) });
}

#[test]
fn test_outer_declarations_are_visible_from_nested_scopes() {
    let (tree, report) = analyse_str("$total\n\\loop\n  total 1 =\n");
    assert!(report.unresolved.is_empty());
    let total = tree.has_member(file(&tree), "total").unwrap();
    let block = tree.has_member(file(&tree), "loop").unwrap();
    let head = tree.node(tree.node(block).children[0]).next.unwrap();
    assert_eq!(tree.node(head).kind, NodeKind::Identifier { target: Some(total) });
}

#[test]
fn test_unresolved_names_are_reported_not_rejected() {
    let (tree, report) = analyse_str("z\n");
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].name, "z");
    assert_eq!(report.unresolved[0].position.line, 1);
    let head = tree.node(statement(&tree, 0)).next.unwrap();
    assert_eq!(tree.node(head).kind, NodeKind::Identifier { target: None });
}

#[test]
fn test_reference_chains_are_linked() {
    let (_, report) = analyse_str("$i\n$list\nlist[i] 1 =\n");
    assert_eq!(report.linked, 2);
    assert!(report.unresolved.is_empty());
}

#[test]
fn test_conditional_chains_are_linked() {
    let (tree, report) = analyse_str("$a\na 0 >\n a 1 =\n");
    assert!(report.unresolved.is_empty());
    let a = tree.has_member(file(&tree), "a").unwrap();
    let head = tree.node(statement(&tree, 1)).next.unwrap();
    assert_eq!(tree.node(head).kind, NodeKind::Identifier { target: Some(a) });
}

// ========================================
// Global visibility
// ========================================

#[test]
fn test_well_formed_tree_passes_visibility() {
    let mut tree = parse_str("$a @f\n $x = a\n a 0 >\n  x 1 +\n :\n  x\n");
    assert!(analyse(&mut tree).is_ok());
}

#[test]
fn test_unregistered_declaration_is_internal_error() {
    let mut tree = parse_str("$x\n");
    let f = file(&tree);
    tree.node_mut(f).members.clear();
    let Err(FrontendError::Semantic(errors)) = analyse(&mut tree) else {
        panic!("expected semantic errors");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Internal);
    assert!(errors[0].message.contains("'x'"), "{}", errors[0].message);
}

#[test]
fn test_detached_node_is_internal_error() {
    let mut tree = parse_str("\\a\n b\n");
    let a = statement(&tree, 0);
    let b = tree.node(a).children[0];
    tree.node_mut(b).parent = Some(b);
    let Err(FrontendError::Semantic(errors)) = analyse(&mut tree) else {
        panic!("expected semantic errors");
    };
    assert!(errors.iter().all(|e| e.kind == ErrorKind::Internal));
    assert!(errors[0].message.contains("not connected"), "{}", errors[0].message);
}

#[test]
fn test_passes_keep_running_after_errors() {
    let mut tree = parse_str("$x\nx 1 ?\n y\n:\n z\n");
    let f = file(&tree);
    tree.node_mut(f).members.remove("x");
    assert!(analyse(&mut tree).is_err());
    let conditional = tree.node(f).children[1];
    assert!(matches!(
        tree.node(conditional).kind,
        NodeKind::Conditional { when_false: Some(_), .. }
    ));
}

// ========================================
// Conditional stitching
// ========================================

#[test]
fn test_else_label_is_absorbed_by_conditional() {
    let (tree, report) = analyse_str("x 1 ?\n y\n:\n z\n");
    let f = file(&tree);
    assert_eq!(report.stitched, 1);
    assert!(report.warnings.is_empty());
    assert_eq!(tree.node(f).children.len(), 1);
    let label = tree.has_member(f, "auto_else_3").unwrap();
    let conditional = statement(&tree, 0);
    assert!(matches!(
        tree.node(conditional).kind,
        NodeKind::Conditional { when_false: Some(l), .. } if l == label
    ));
    assert!(tree.preorder().contains(&label));
}

#[test]
fn test_conditional_without_body_warns() {
    let (tree, report) = analyse_str("x 1 ?\n");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].kind, ErrorKind::Warning);
    assert!(report.warnings[0].message.starts_with("conditional without a success block"));
    assert!(matches!(
        tree.node(statement(&tree, 0)).kind,
        NodeKind::Conditional { when_false: None, .. }
    ));
}

#[test]
fn test_conditional_without_body_still_takes_its_else() {
    let (_, report) = analyse_str("x 1 ?\n:\n z\n");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.stitched, 1);
}

#[test]
fn test_orphan_else_warns_and_stays_a_label() {
    let (tree, report) = analyse_str("x 1 ?\n y\n$v\n:\n z\n");
    assert_eq!(report.stitched, 0);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].message, "else without a preceding conditional");
    assert_eq!(tree.node(file(&tree)).children.len(), 3);
}

#[test]
fn test_nested_conditionals_are_stitched_at_every_level() {
    let (tree, report) = analyse_str("a 1 ?\n b 2 ?\n  c\n :\n  d\n:\n e\n");
    assert_eq!(report.stitched, 2);
    let outer = statement(&tree, 0);
    assert_eq!(tree.node(outer).children.len(), 1);
    let inner = tree.node(outer).children[0];
    assert!(matches!(
        tree.node(inner).kind,
        NodeKind::Conditional { when_false: Some(_), .. }
    ));
}

#[test]
fn test_else_binds_only_to_the_directly_preceding_conditional() {
    let (tree, report) = analyse_str("a 1 ?\n b\nc 2 ?\n d\n:\n e\n");
    assert_eq!(report.stitched, 1);
    let first = statement(&tree, 0);
    let second = statement(&tree, 1);
    assert!(matches!(tree.node(first).kind, NodeKind::Conditional { when_false: None, .. }));
    assert!(matches!(
        tree.node(second).kind,
        NodeKind::Conditional { when_false: Some(_), .. }
    ));
}
