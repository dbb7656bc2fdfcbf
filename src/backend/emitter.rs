//! Text emitter - builds indented, line-oriented output
//!
//! This module provides the buffer the trace visitor writes into.

use std::fmt::Write;

/// A buffer for building line-oriented text with indentation
#[derive(Debug)]
pub struct TextEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for TextEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "  ",
        }
    }

    /// Consume the emitter and return the generated text
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a formatted line with current indentation
    pub fn linef(&mut self, args: std::fmt::Arguments<'_>) {
        self.write_indent();
        let _ = self.buffer.write_fmt(args);
        self.buffer.push('\n');
    }

    /// Write indentation only
    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
    }

    /// Set the indent level directly
    pub fn set_indent(&mut self, level: usize) {
        self.indent_level = level;
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_indentation() {
        let mut e = TextEmitter::new();
        e.line("NEW SCOPE global");
        e.indent();
        e.linef(format_args!("ADD VARIABLE {}", "x"));
        e.dedent();
        e.dedent();
        e.line("END SCOPE global");
        assert_eq!(e.finish(), "NEW SCOPE global\n  ADD VARIABLE x\nEND SCOPE global\n");
    }
}
