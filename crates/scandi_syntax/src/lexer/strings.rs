//! String and binary-blob scanning.
//!
//! Strings are delimited by `"` or `'` and have no escape sequences. To embed a delimiter, close the string and
//! continue it immediately with the other quote character: `'don'"'"t'` is `don't`.

use super::Lexer;
use super::tokens::TokenKind;
use crate::diagnostics::CompileError;

fn other_quote(quote: char) -> char {
    if quote == '"' { '\'' } else { '"' }
}

impl<'a> Lexer<'a> {
    pub(super) fn scan_string(&mut self, start: usize) -> Result<(), CompileError> {
        let text = self.string_body(start)?;
        self.add_token(TokenKind::StringLiteral(text), start);
        Ok(())
    }

    /// Scan from an opening quote through the end of the (possibly concatenated) string.
    fn string_body(&mut self, start: usize) -> Result<String, CompileError> {
        let mut quote = self.advance().unwrap_or('"');
        let mut text = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(CompileError::lex("Unterminated string literal", self.position_at(start))
                        .with_hint(format!("close the string with {quote}")));
                }
                Some(c) if c == quote => {
                    let other = other_quote(quote);
                    if self.peek() == Some(other) {
                        self.advance();
                        quote = other;
                    } else {
                        return Ok(text);
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }

    /// `#"..."`: hex digit pairs inside quotes, spaces ignored. `start` is the position of `#`.
    pub(super) fn scan_binary_blob(&mut self, start: usize) -> Result<(), CompileError> {
        let body_start = self.pos;
        let body = self.string_body(start)?;
        let digits: Vec<char> = body.chars().filter(|c| *c != ' ').collect();

        if let Some(bad) = digits.iter().find(|c| !c.is_ascii_hexdigit()) {
            return Err(CompileError::lex(
                format!("Invalid digit '{bad}' in binary blob"),
                self.position_at(body_start),
            ));
        }
        if digits.len() % 2 != 0 {
            return Err(CompileError::lex(
                "Binary blob has an odd number of hex digits",
                self.position_at(body_start),
            ));
        }

        let bytes = digits
            .chunks(2)
            .map(|pair| {
                let hi = pair[0].to_digit(16).unwrap_or(0);
                let lo = pair[1].to_digit(16).unwrap_or(0);
                (hi * 16 + lo) as u8
            })
            .collect();
        self.add_token(TokenKind::BinaryBlob(bytes), start);
        Ok(())
    }
}
