//! Leading-space depth.
//!
//! Depth is the only block structure Scandi has: a line indented by `n` spaces opens a `Scope(n + 1)`. Depth 0
//! is reserved for the file scope and -1 for the global root, so the first column of a file is depth 1.

use super::Lexer;
use crate::ast::Depth;

impl<'a> Lexer<'a> {
    /// Consume the leading spaces of the current line and return the line's depth.
    pub(super) fn measure_depth(&mut self) -> Depth {
        let mut spaces: Depth = 0;
        while self.peek() == Some(' ') {
            self.advance();
            spaces = spaces.saturating_add(1);
        }
        spaces.saturating_add(1)
    }
}
