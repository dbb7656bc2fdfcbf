/// Parse a token stream into `tree`, starting the depth walk at the root.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `scandi_syntax::lexer`.
/// - `tree`: Tree to grow in place.
///
/// ## Errors
/// Returns the first [`CompileError`] of the unit.
pub fn parse(tokens: &[Token], tree: &mut ScopeTree) -> Result<NodeId, CompileError> {
    let root = tree.root();
    parse_into(tokens, tree, root)
}

/// Parse a token stream into `tree`, starting the depth walk at `at`.
///
/// Used to merge further compilation units into an already-built tree.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_into(tokens: &[Token], tree: &mut ScopeTree, at: NodeId) -> Result<NodeId, CompileError> {
    Parser::new(tokens, tree, at).parse()
}
