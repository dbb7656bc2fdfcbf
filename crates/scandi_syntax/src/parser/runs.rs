/// Scope runs and statement classification.
///
/// A scope run is one `Scope` token plus the tokens after it, up to the next `Scope` or `Comment` token. Every
/// run is one statement.

/// One line's worth of tokens.
struct ScopeRun<'t> {
    depth: Depth,
    scope: &'t Token,
    /// Tokens after the `Scope` token, comment excluded.
    tokens: &'t [Token],
}

impl ScopeRun<'_> {
    /// Position of the first statement token (or of the scope token for an empty run).
    fn statement_position(&self) -> Position {
        self.tokens
            .first()
            .unwrap_or(self.scope)
            .position
            .clone()
    }

    fn line(&self) -> usize {
        self.scope.position.line
    }

    /// The last-but-one token of the whole run, counting the `Scope` token.
    fn last_but_one(&self) -> Option<&Token> {
        self.tokens.len().checked_sub(2).map(|i| &self.tokens[i])
    }
}

/// What a run declares, in the priority order the parser checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunShape {
    FileScope,
    Alias,
    Function,
    Variable,
    Label,
    Else,
    Conditional,
    Expression,
    Empty,
}

/// Split a token stream into scope runs.
fn scope_runs(tokens: &[Token]) -> Result<Vec<ScopeRun<'_>>, CompileError> {
    let mut runs = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        let scope = &tokens[index];
        let Some(depth) = scope.kind.scope_depth() else {
            return Err(CompileError::internal(
                format!("token stream does not start with a scope marker (found {})", scope.kind),
                scope.position.clone(),
            ));
        };

        let body_start = index + 1;
        let body_end = tokens[body_start..]
            .iter()
            .position(|t| t.kind.ends_run())
            .map_or(tokens.len(), |offset| body_start + offset);
        runs.push(ScopeRun {
            depth,
            scope,
            tokens: &tokens[body_start..body_end],
        });

        // Skip a trailing comment and anything else up to the next scope marker.
        index = tokens[body_end..]
            .iter()
            .position(|t| t.kind.scope_depth().is_some())
            .map_or(tokens.len(), |offset| body_end + offset);
    }
    Ok(runs)
}

/// Classify a run. The first matching rule wins.
fn classify(run: &ScopeRun<'_>) -> RunShape {
    let first = run.tokens.first().map(|t| &t.kind);
    if first.is_none() {
        return if run.depth == conventions::FILE_DEPTH {
            RunShape::FileScope
        } else {
            RunShape::Empty
        };
    }

    let first_is = |id: PunctuationId| first.is_some_and(|k| k.is_punctuation(id));
    if first_is(PunctuationId::AliasBegin) {
        RunShape::Alias
    } else if run
        .last_but_one()
        .is_some_and(|t| t.kind.is_either(PunctuationId::Function, PunctuationId::StaticFunction))
    {
        RunShape::Function
    } else if first_is(PunctuationId::Variable) || first_is(PunctuationId::StaticVariable) {
        RunShape::Variable
    } else if first_is(PunctuationId::Label) {
        RunShape::Label
    } else if first_is(PunctuationId::Else) {
        RunShape::Else
    } else if run.tokens.last().is_some_and(|t| t.kind.is_comparison()) {
        RunShape::Conditional
    } else {
        RunShape::Expression
    }
}

impl<'a> Parser<'a> {
    /// Parse one run into the tree.
    fn statement(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        match classify(run) {
            RunShape::FileScope => self.file_scope(run),
            RunShape::Alias => self.alias(run),
            RunShape::Function => self.function(run),
            RunShape::Variable => self.variable(run),
            RunShape::Label => self.label(run),
            RunShape::Else => self.else_label(run),
            RunShape::Conditional => self.conditional(run),
            RunShape::Expression => self.expression(run),
            RunShape::Empty => Ok(()),
        }
    }

    /// A bare `Scope(0)` opens the scope of a compilation unit, named after its file.
    fn file_scope(&mut self, run: &ScopeRun<'_>) -> Result<(), CompileError> {
        let name = run.scope.position.file.to_string();
        let scope = self.new_node(name, NodeKind::Scope, run);
        self.attach(scope)?;
        Ok(())
    }
}
