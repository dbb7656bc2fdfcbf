/// Operand chains.
///
/// Scandi expressions are postfix: tokens map one-to-one onto chain nodes linked through `next`, except for
/// - `(` / `)`: negation, `(x)` becomes `0 x -`
/// - `[ ... ]`: a reference, whose tokens form a separate chain owned by one `Reference` node

impl<'a> Parser<'a> {
    /// Build a chain from `tokens`. Every node gets `parent` as its lookup scope. Returns the head.
    fn chain(&mut self, tokens: &[Token], parent: NodeId, depth: Depth) -> Result<Option<NodeId>, CompileError> {
        let mut links: Vec<NodeId> = Vec::with_capacity(tokens.len());
        let mut open_negations: Vec<&Token> = Vec::new();
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            let (name, kind) = match &token.kind {
                TokenKind::Identifier(name) => (name.clone(), NodeKind::Identifier { target: None }),
                TokenKind::NumberLong(value) | TokenKind::Hexadecimal(value) => {
                    (String::new(), NodeKind::LongLiteral(*value))
                }
                TokenKind::NumberDouble(value) => (String::new(), NodeKind::DoubleLiteral(*value)),
                TokenKind::StringLiteral(text) => (String::new(), NodeKind::StringLiteral(text.clone())),
                TokenKind::BinaryBlob(bytes) => (String::new(), NodeKind::BinaryLiteral(bytes.clone())),
                TokenKind::Operator(id) => (String::new(), NodeKind::Operator(*id)),
                TokenKind::Punctuation(PunctuationId::Null) => (String::new(), NodeKind::NullLiteral),
                TokenKind::Punctuation(PunctuationId::NegateBegin) => {
                    open_negations.push(token);
                    (String::new(), NodeKind::LongLiteral(0))
                }
                TokenKind::Punctuation(PunctuationId::NegateEnd) => {
                    if open_negations.pop().is_none() {
                        return Err(CompileError::syntax("Unmatched ')'", token.position.clone()));
                    }
                    (String::new(), NodeKind::Operator(OperatorId::Subtract))
                }
                TokenKind::Punctuation(open @ (PunctuationId::ReferenceBegin | PunctuationId::SelfReference)) => {
                    let rest = &tokens[index + 1..];
                    let Some(close) = rest
                        .iter()
                        .position(|t| t.kind.is_punctuation(PunctuationId::ReferenceEnd))
                    else {
                        return Err(CompileError::syntax("Unclosed reference", token.position.clone())
                            .with_hint("close the reference with ']' on the same line"));
                    };
                    let nested = self.chain(&rest[..close], parent, depth)?;
                    index += close + 1;
                    (
                        String::new(),
                        NodeKind::Reference {
                            chain: nested,
                            targets_self: *open == PunctuationId::SelfReference,
                        },
                    )
                }
                TokenKind::Punctuation(PunctuationId::ReferenceEnd) => {
                    return Err(CompileError::syntax("Unmatched ']'", token.position.clone()));
                }
                TokenKind::Punctuation(marker) if punctuation::is_declaration_marker(*marker) => {
                    return Err(errors::unexpected_token(
                        punctuation::as_str(*marker),
                        "expression",
                        token.position.clone(),
                    )
                    .with_hint("declarations start their own line"));
                }
                TokenKind::Punctuation(other) => {
                    return Err(errors::unexpected_token(
                        punctuation::as_str(*other),
                        "expression",
                        token.position.clone(),
                    ));
                }
                TokenKind::Scope(_) | TokenKind::Comment(_) => {
                    return Err(CompileError::internal(
                        format!("{} inside a scope run", token.kind),
                        token.position.clone(),
                    ));
                }
            };

            let id = self.tree.alloc(Node::new(name, kind, depth, token.position.clone()));
            self.tree.node_mut(id).parent = Some(parent);
            if let Some(&previous) = links.last() {
                self.tree.node_mut(previous).next = Some(id);
            }
            links.push(id);
            index += 1;
        }

        if let Some(open) = open_negations.pop() {
            return Err(CompileError::syntax("Unclosed '('", open.position.clone()));
        }
        Ok(links.first().copied())
    }
}
