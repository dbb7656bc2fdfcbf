/// Declaration parsing: alias, function, variable, label, else label, conditional and bare expressions.

impl<'a> Parser<'a> {
    /// `{ chain name }` or `{ chain }`.
    ///
    /// With a trailing identifier pair (`{a.b c}`) the last identifier names the alias and is not part of the
    /// chain. Otherwise the alias takes the name of the chain's last identifier (`{a.b}` is `b`).
    fn alias(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let s = run.tokens;
        if !s.last().is_some_and(|t| t.kind.is_punctuation(PunctuationId::AliasEnd)) || s.len() < 3 {
            return Err(CompileError::syntax("Malformed alias: expected `{ ... name }`", run.statement_position())
                .with_hint("an alias needs a body and a closing '}' on the same line"));
        }
        let inner = &s[1..s.len() - 1];
        let name_token = &inner[inner.len() - 1];
        let Some(name) = name_token.kind.identifier() else {
            return Err(CompileError::syntax(
                format!("Malformed alias: expected a name before '}}', found {}", name_token.kind),
                name_token.position.clone(),
            ));
        };

        let explicit_name = inner.len() >= 2 && inner[inner.len() - 2].kind.identifier().is_some();
        let body = if explicit_name { &inner[..inner.len() - 1] } else { inner };

        let alias = self.new_node(name, NodeKind::Alias, run);
        let parent = self.attach(alias)?;
        let head = self.chain(body, parent, run.depth)?;
        self.tree.node_mut(alias).next = head;
        Ok(())
    }

    /// `[[]] { $param } @ name`; `@@` declares a static function.
    fn function(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let s = run.tokens;
        let marker = &s[s.len() - 2];
        let name_token = &s[s.len() - 1];
        let Some(name) = name_token.kind.identifier() else {
            return Err(CompileError::syntax(
                format!("Expected function identifier, found {}", name_token.kind),
                name_token.position.clone(),
            ));
        };

        let mut params = &s[..s.len() - 2];
        let takes_varargs = params.first().is_some_and(|t| {
            t.kind.is_operator(OperatorId::SelfContents) || t.kind.is_operator(OperatorId::Contents)
        });
        if takes_varargs {
            params = &params[1..];
        }

        let mut parameters: Vec<(String, Position)> = Vec::new();
        let mut index = 0;
        while index < params.len() {
            let token = &params[index];
            let name_at = if token.kind.is_punctuation(PunctuationId::Variable) {
                index += 1;
                params.get(index).ok_or_else(|| {
                    CompileError::syntax("Missing parameter identifier after '$'", token.position.clone())
                })?
            } else {
                token
            };
            let Some(param) = name_at.kind.identifier() else {
                return Err(errors::unexpected_token(
                    &name_at.kind.to_string(),
                    "parameter list",
                    name_at.position.clone(),
                )
                .with_hint("parameters are written as `$name` before the '@'"));
            };
            if parameters.iter().any(|(p, _)| p == param) {
                return Err(CompileError::syntax(
                    format!("Duplicate parameter '{param}' in function '{name}'"),
                    name_at.position.clone(),
                ));
            }
            parameters.push((param.to_string(), name_at.position.clone()));
            index += 1;
        }

        let function = self.new_node(
            name,
            NodeKind::Function {
                parameters: parameters.iter().map(|(p, _)| p.clone()).collect(),
                parameter_map: HashMap::new(),
                takes_varargs,
            },
            run,
        );
        self.tree.node_mut(function).is_static = marker.kind.is_static();
        self.attach(function)?;

        let mut map = HashMap::new();
        let mut previous: Option<NodeId> = None;
        for (param, position) in parameters {
            let id = self
                .tree
                .alloc(Node::new(param.clone(), NodeKind::Variable, run.depth + 1, position));
            self.tree.node_mut(id).parent = Some(function);
            match previous {
                Some(prev) => self.tree.node_mut(prev).next = Some(id),
                None => self.tree.node_mut(function).next = Some(id),
            }
            map.insert(param, id);
            previous = Some(id);
        }
        if let NodeKind::Function { parameter_map, .. } = &mut self.tree.node_mut(function).kind {
            *parameter_map = map;
        }
        Ok(())
    }

    /// `$name`, `$name = chain` or `$name chain =`; `$$` declares a static variable.
    ///
    /// An initializer becomes an `Expression` statement placed right after the variable in the same parent.
    fn variable(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let s = run.tokens;
        let marker = &s[0];
        let name_token = s.get(1).ok_or_else(|| {
            CompileError::syntax("Missing variable identifier", marker.position.clone())
        })?;
        let Some(name) = name_token.kind.identifier() else {
            return Err(CompileError::syntax(
                format!("Expected variable identifier, found {}", name_token.kind),
                name_token.position.clone(),
            ));
        };

        let is_assign = |t: &Token| t.kind.is_operator(OperatorId::Assign);
        let initializer = match s.len() {
            2 => None,
            n if n >= 4 && is_assign(&s[2]) => Some(&s[3..]),
            n if n >= 4 && is_assign(&s[n - 1]) => Some(&s[1..]),
            _ => {
                return Err(CompileError::syntax(
                    format!("Malformed variable initialization of '{name}'"),
                    s[2].position.clone(),
                )
                .with_hint(format!("write `${name} = value` or `${name} value =`")));
            }
        };

        let variable = self.new_node(name, NodeKind::Variable, run);
        self.tree.node_mut(variable).is_static = marker.kind.is_static();
        let parent = self.attach(variable)?;

        if let Some(tokens) = initializer {
            let expression = self.tree.alloc(Node::new(
                "",
                NodeKind::Expression {
                    initializes: Some(variable),
                },
                run.depth,
                tokens[0].position.clone(),
            ));
            self.tree.insert_child(parent, expression);
            let head = self.chain(tokens, parent, run.depth)?;
            self.tree.node_mut(expression).next = head;
        }
        Ok(())
    }

    /// `\name`.
    fn label(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let s = run.tokens;
        let name_token = s.get(1).ok_or_else(|| {
            CompileError::syntax("Missing label identifier", s[0].position.clone())
        })?;
        let Some(name) = name_token.kind.identifier() else {
            return Err(CompileError::syntax(
                format!("Expected label identifier, found {}", name_token.kind),
                name_token.position.clone(),
            ));
        };
        if let Some(extra) = s.get(2) {
            return Err(errors::unexpected_token(&extra.kind.to_string(), "label declaration", extra.position.clone()));
        }

        let label = self.new_node(name, NodeKind::Label, run);
        self.attach(label)?;
        Ok(())
    }

    /// `:` opens the else branch of the conditional before it, as a label named after the line.
    fn else_label(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        if let Some(extra) = run.tokens.get(1) {
            return Err(errors::unexpected_token(&extra.kind.to_string(), "else marker", extra.position.clone())
                .with_hint("put the else branch on the following, deeper-indented lines"));
        }
        let label = self.new_node(conventions::auto_else_name(run.line()), NodeKind::Label, run);
        self.attach(label)?;
        Ok(())
    }

    /// `condition... <comparison>`. The false branch is linked later by the resolver.
    fn conditional(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let s = run.tokens;
        let (last, condition) = s.split_last().ok_or_else(|| {
            CompileError::internal("conditional without tokens", run.statement_position())
        })?;
        let Some(comparison) = last.kind.operator_id() else {
            return Err(CompileError::internal("conditional without comparison", last.position.clone()));
        };
        if condition.is_empty() {
            return Err(CompileError::syntax("Empty conditional", last.position.clone())
                .with_hint(format!("compare two operands, e.g. `x 0 {}`", operators::as_str(comparison))));
        }

        let conditional = self.new_node(
            conventions::auto_if_name(run.line()),
            NodeKind::Conditional {
                comparison,
                when_false: None,
            },
            run,
        );
        let parent = self.attach(conditional)?;
        let head = self.chain(condition, parent, run.depth)?;
        self.tree.node_mut(conditional).next = head;
        Ok(())
    }

    /// Any other non-empty run is an operand chain.
    fn expression(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let expression = self.new_node("", NodeKind::Expression { initializes: None }, run);
        let parent = self.attach(expression)?;
        let head = self.chain(run.tokens, parent, run.depth)?;
        self.tree.node_mut(expression).next = head;
        Ok(())
    }
}
