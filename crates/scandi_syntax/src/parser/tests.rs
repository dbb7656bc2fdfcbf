#[cfg(test)]
/// Parser unit tests.
///
/// These tests cover statement classification, depth attachment and the error for each malformed shape.
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;
    use crate::lexer;

    fn parse_str(source: &str) -> Result<ScopeTree, CompileError> {
        let tokens = lexer::tokenize(source, "t.scandi").expect("lex failed");
        let mut tree = ScopeTree::new();
        parse(&tokens, &mut tree)?;
        Ok(tree)
    }

    /// The file scope of the first (only) unit.
    fn file(tree: &ScopeTree) -> NodeId {
        tree.node(tree.root()).children[0]
    }

    fn child(tree: &ScopeTree, parent: NodeId, index: usize) -> &Node {
        tree.node(tree.node(parent).children[index])
    }

    #[test]
    fn test_file_scope_is_named_after_the_file() {
        let tree = parse_str("").unwrap();
        let f = tree.node(file(&tree));
        assert_eq!(f.name, "t.scandi");
        assert_eq!(f.depth, 0);
        assert!(matches!(f.kind, NodeKind::Scope));
    }

    #[test]
    fn test_depth_attachment_pops_back_to_outer_scope() {
        let tree = parse_str("\\outer\n  \\inner\n    x\n  \\second\n\\last\n").unwrap();
        let f = file(&tree);
        let outer = tree.node(f).children[0];
        assert_eq!(tree.node(f).children.len(), 2);
        assert_eq!(tree.node(outer).children.len(), 2);
        assert_eq!(child(&tree, outer, 1).name, "second");
        assert_eq!(child(&tree, f, 1).name, "last");
        let inner = tree.node(outer).children[0];
        assert!(matches!(child(&tree, inner, 0).kind, NodeKind::Expression { .. }));
    }

    #[test]
    fn test_comment_lines_are_ignored() {
        let tree = parse_str("`header\n$x `the x\n").unwrap();
        let f = file(&tree);
        assert_eq!(tree.node(f).children.len(), 1);
        assert_eq!(child(&tree, f, 0).name, "x");
    }

    #[test]
    fn test_variable_declaration_registers_name() {
        let tree = parse_str("$$count\n").unwrap();
        let f = file(&tree);
        let id = tree.has_member(f, "count").unwrap();
        assert!(tree.node(id).is_static);
        assert!(matches!(tree.node(id).kind, NodeKind::Variable));
    }

    #[test]
    fn test_infix_initializer_is_a_sibling_expression() {
        let tree = parse_str("$x\n$y=x 1 +\n").unwrap();
        let f = file(&tree);
        let children = &tree.node(f).children;
        assert_eq!(children.len(), 3);
        let y = children[1];
        let init = tree.node(children[2]);
        assert_eq!(init.kind, NodeKind::Expression { initializes: Some(y) });
        assert_eq!(tree.render_chain(init.next), "x 1 +");
        assert!(tree.node(y).children.is_empty());
    }

    #[test]
    fn test_postfix_initializer_keeps_target_and_assignment() {
        let tree = parse_str("$y x 2 * =\n").unwrap();
        let f = file(&tree);
        let init = child(&tree, f, 1);
        assert_eq!(tree.render_chain(init.next), "y x 2 * =");
    }

    #[test]
    fn test_malformed_variables() {
        assert_eq!(parse_str("$\n").unwrap_err().message, "Missing variable identifier");
        assert_eq!(parse_str("$1\n").unwrap_err().message, "Expected variable identifier, found long 1");
        let err = parse_str("$x y\n").unwrap_err();
        assert_eq!(err.message, "Malformed variable initialization of 'x'");
        assert_eq!(err.position.column, 4);
        assert!(parse_str("$x =\n").is_err());
    }

    #[test]
    fn test_duplicate_in_same_scope_is_an_error_naming_it() {
        let err = parse_str("$x\n$x\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.message.contains("'x'"), "{}", err.message);
        assert_eq!(err.position.line, 2);
    }

    #[test]
    fn test_shadowing_in_nested_scope_is_legal() {
        let tree = parse_str("$x\n\\block\n $x\n").unwrap();
        let f = file(&tree);
        let block = tree.has_member(f, "block").unwrap();
        let inner = tree.has_member(block, "x").unwrap();
        assert_ne!(Some(inner), tree.has_member(f, "x"));
    }

    #[test]
    fn test_function_with_parameters_and_varargs() {
        let tree = parse_str("[] $a $b @@sum\n a b +\n").unwrap();
        let f = file(&tree);
        let sum = tree.has_member(f, "sum").unwrap();
        let node = tree.node(sum);
        assert!(node.is_static);
        let NodeKind::Function {
            parameters,
            parameter_map,
            takes_varargs,
        } = &node.kind
        else {
            panic!("expected a function, got {:?}", node.kind);
        };
        assert_eq!(parameters, &vec!["a".to_string(), "b".to_string()]);
        assert!(*takes_varargs);
        let chain = tree.chain_ids(node.next);
        assert_eq!(chain.len(), 2);
        assert_eq!(parameter_map["a"], chain[0]);
        assert_eq!(tree.node(chain[1]).name, "b");
        assert!(node.members.is_empty());
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_function_wins_over_variable_classification() {
        let tree = parse_str("$a @f\n").unwrap();
        let f = file(&tree);
        assert!(tree.has_member(f, "a").is_none());
        assert!(tree.has_member(f, "f").is_some());
    }

    #[test]
    fn test_function_parameter_errors() {
        let err = parse_str("$a $a @f\n").unwrap_err();
        assert_eq!(err.message, "Duplicate parameter 'a' in function 'f'");
        let err = parse_str("$a 1 @f\n").unwrap_err();
        assert_eq!(err.message, "Unexpected 'long 1' in parameter list");
        let err = parse_str("$a @ 1\n").unwrap_err();
        assert_eq!(err.message, "Expected function identifier, found long 1");
    }

    #[test]
    fn test_label_and_else() {
        let tree = parse_str("\\start\nx 1 ?\n y\n:\n z\n").unwrap();
        let f = file(&tree);
        assert!(tree.has_member(f, "start").is_some());
        let else_label = tree.has_member(f, "auto_else_4").unwrap();
        assert_eq!(tree.node(else_label).children.len(), 1);
        assert_eq!(parse_str("\\\n").unwrap_err().message, "Missing label identifier");
        assert_eq!(parse_str("\\a b\n").unwrap_err().message, "Unexpected 'identifier b' in label declaration");
        assert!(parse_str(": x\n").is_err());
    }

    #[test]
    fn test_conditional_binds_trailing_comparison() {
        let tree = parse_str("a b ?<\n").unwrap();
        let f = file(&tree);
        let cond = child(&tree, f, 0);
        assert_eq!(cond.name, "auto_if_1");
        assert!(matches!(
            cond.kind,
            NodeKind::Conditional {
                comparison: OperatorId::LessEqual,
                when_false: None
            }
        ));
        assert_eq!(tree.render_chain(cond.next), "a b");
    }

    #[test]
    fn test_empty_conditional() {
        assert_eq!(parse_str(">\n").unwrap_err().message, "Empty conditional");
    }

    #[test]
    fn test_alias_forms() {
        let tree = parse_str("{a.b.c}\n{a.b short}\n").unwrap();
        let f = file(&tree);
        let c = tree.has_member(f, "c").unwrap();
        assert_eq!(tree.render_chain(tree.node(c).next), "a . b . c");
        let short = tree.has_member(f, "short").unwrap();
        assert_eq!(tree.render_chain(tree.node(short).next), "a . b");
    }

    #[test]
    fn test_malformed_aliases() {
        assert!(parse_str("{a.b\n").unwrap_err().message.starts_with("Malformed alias"));
        assert!(parse_str("{}\n").unwrap_err().message.starts_with("Malformed alias"));
        assert!(parse_str("{a 1}\n").unwrap_err().message.starts_with("Malformed alias"));
    }

    #[test]
    fn test_negation_desugars_to_zero_minus() {
        let tree = parse_str("x (y) =\n").unwrap();
        let f = file(&tree);
        assert_eq!(tree.render_chain(child(&tree, f, 0).next), "x 0 y - =");
        assert_eq!(parse_str("x (y\n").unwrap_err().message, "Unclosed '('");
        assert_eq!(parse_str("x y)\n").unwrap_err().message, "Unmatched ')'");
    }

    #[test]
    fn test_reference_owns_a_nested_chain() {
        let tree = parse_str("list[i 1 +] x =\n").unwrap();
        let f = file(&tree);
        let chain = tree.chain_ids(child(&tree, f, 0).next);
        assert_eq!(chain.len(), 4);
        let NodeKind::Reference { chain: nested, targets_self } = tree.node(chain[1]).kind else {
            panic!("expected a reference");
        };
        assert!(!targets_self);
        assert_eq!(tree.render_chain(nested), "i 1 +");
        assert_eq!(tree.render_chain(child(&tree, f, 0).next), "list [i 1 +] x =");
    }

    #[test]
    fn test_two_references_on_one_line() {
        let tree = parse_str("[a] [b] +\n").unwrap();
        let f = file(&tree);
        assert_eq!(tree.render_chain(child(&tree, f, 0).next), "[a] [b] +");
    }

    #[test]
    fn test_reference_errors() {
        assert_eq!(parse_str("x [a\n").unwrap_err().message, "Unclosed reference");
        assert_eq!(parse_str("x a]\n").unwrap_err().message, "Unmatched ']'");
    }

    #[test]
    fn test_declaration_markers_inside_expression_are_rejected() {
        let err = parse_str("x $ y\n").unwrap_err();
        assert_eq!(err.message, "Unexpected '$' in expression");
        assert_eq!(err.hints, vec!["declarations start their own line".to_string()]);
        let err = parse_str("x @@ y 1 +\n").unwrap_err();
        assert_eq!(err.message, "Unexpected '@@' in expression");
        let err = parse_str("x { y\n").unwrap_err();
        assert!(err.hints.is_empty());
    }

    #[test]
    fn test_literals_in_chain() {
        let tree = parse_str("x 1,5 #FF 'hi' #\"00\" () ~\n").unwrap();
        let f = file(&tree);
        let kinds: Vec<_> = tree
            .chain_ids(child(&tree, f, 0).next)
            .into_iter()
            .map(|id| tree.node(id).kind.describe())
            .collect();
        assert_eq!(
            kinds,
            vec!["identifier", "double", "long", "string", "binary", "null", "operator"]
        );
    }

    #[test]
    fn test_chain_nodes_look_up_from_the_statement_scope() {
        let tree = parse_str("\\body\n x 1 +\n").unwrap();
        let f = file(&tree);
        let body = tree.has_member(f, "body").unwrap();
        let expression = child(&tree, body, 0);
        for id in tree.chain_ids(expression.next) {
            assert_eq!(tree.node(id).parent, Some(body));
        }
    }

    #[test]
    fn test_second_unit_gets_its_own_file_scope() {
        let mut tree = ScopeTree::new();
        let a = lexer::tokenize("$x\n", "a.scandi").unwrap();
        let b = lexer::tokenize("$x\n", "b.scandi").unwrap();
        parse(&a, &mut tree).unwrap();
        let last = tree.len() - 1;
        parse_into(&b, &mut tree, last).unwrap();
        let root = tree.node(tree.root());
        assert_eq!(root.children.len(), 2);
        assert_eq!(tree.node(root.children[1]).name, "b.scandi");
    }

    #[test]
    fn test_stream_without_scope_marker_is_internal() {
        let tokens = vec![Token::new(TokenKind::Identifier("x".into()), Position::builtin())];
        let mut tree = ScopeTree::new();
        let err = parse(&tokens, &mut tree).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[test]
    fn test_tree_dump_snapshot() {
        let tree = parse_str("$a @f\n $x = a\n a 0 >\n  x 1 +\n :\n  x\n").unwrap();
        insta::assert_snapshot!(tree.to_string(), @r"
        scope global
          scope t.scandi
            function f(a)
              variable x
              expression [a]
              conditional auto_if_3 [a 0] >
                expression [x 1 +]
              label auto_else_5
                expression [x]
        ");
    }
}
