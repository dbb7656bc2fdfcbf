//! Numeric literal scanning.
//!
//! - Decimal: digits with at most one `,` separator (`12`, `12,5`, `,5`).
//! - Hexadecimal: `#` followed by hex digits (`#FF`). Values are read as 64-bit patterns, so `#FFFFFFFFFFFFFFFF`
//!   is -1.
//! - `#'..'` / `#".."` is a binary blob and is handed to the string scanner.

use super::Lexer;
use super::tokens::TokenKind;
use crate::diagnostics::{CompileError, errors};

pub(super) const DECIMAL_SEPARATOR: char = ',';
pub(super) const HEX_PREFIX: char = '#';

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize) -> Result<(), CompileError> {
        let mut separator_seen = false;
        while let Some(c) = self.peek() {
            if c == DECIMAL_SEPARATOR {
                if separator_seen {
                    return Err(errors::extraneous_decimal_point(self.position_at(self.pos)));
                }
                separator_seen = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            self.advance();
        }

        let text: String = self.line[start..self.pos].iter().collect();
        let kind = if separator_seen {
            let value: f64 = text
                .replace(DECIMAL_SEPARATOR, ".")
                .parse()
                .map_err(|_| CompileError::lex(format!("Malformed number '{text}'"), self.position_at(start)))?;
            TokenKind::NumberDouble(value)
        } else {
            let value: i64 = text.parse().map_err(|_| {
                CompileError::lex(format!("Number '{text}' does not fit in a long"), self.position_at(start))
            })?;
            TokenKind::NumberLong(value)
        };
        self.add_token(kind, start);
        Ok(())
    }

    pub(super) fn scan_hex(&mut self, start: usize) -> Result<(), CompileError> {
        self.advance(); // '#'
        if matches!(self.peek(), Some('"' | '\'')) {
            return self.scan_binary_blob(start);
        }

        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
        }
        let digits: String = self.line[digits_start..self.pos].iter().collect();
        if digits.is_empty() {
            return Err(CompileError::lex("Malformed hexadecimal literal", self.position_at(start))
                .with_hint("write hexadecimal numbers as #1F, or binary blobs as #\"1F\""));
        }
        let value = u64::from_str_radix(&digits, 16).map_err(|_| {
            CompileError::lex(format!("Hexadecimal '#{digits}' does not fit in 64 bits"), self.position_at(start))
        })?;
        self.add_token(TokenKind::Hexadecimal(value as i64), start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, tokenize};

    fn single(source: &str) -> TokenKind {
        let mut tokens = tokenize(source, "t.scandi").unwrap();
        assert_eq!(tokens.len(), 3, "{tokens:?}");
        tokens.pop().unwrap().kind
    }

    fn error(source: &str) -> String {
        tokenize(source, "t.scandi").unwrap_err().remove(0).message
    }

    #[test]
    fn long_and_double() {
        assert_eq!(single("42"), TokenKind::NumberLong(42));
        assert_eq!(single("12,5"), TokenKind::NumberDouble(12.5));
        assert_eq!(single(",5"), TokenKind::NumberDouble(0.5));
        assert_eq!(single("3,"), TokenKind::NumberDouble(3.0));
    }

    #[test]
    fn second_separator_is_extraneous() {
        assert_eq!(error("12,5,3"), "Extraneous decimal point");
        let err = tokenize("x 12,5,3", "t.scandi").unwrap_err().remove(0);
        assert_eq!(err.position.column, 7);
    }

    #[test]
    fn lone_separator_is_malformed() {
        assert_eq!(error(","), "Malformed number ','");
    }

    #[test]
    fn long_overflow() {
        assert_eq!(error("99999999999999999999"), "Number '99999999999999999999' does not fit in a long");
    }

    #[test]
    fn hexadecimal() {
        assert_eq!(single("#1F"), TokenKind::Hexadecimal(31));
        assert_eq!(single("#ff"), TokenKind::Hexadecimal(255));
        assert_eq!(single("#FFFFFFFFFFFFFFFF"), TokenKind::Hexadecimal(-1));
        assert_eq!(error("#"), "Malformed hexadecimal literal");
        assert_eq!(error("#FFFFFFFFFFFFFFFFF"), "Hexadecimal '#FFFFFFFFFFFFFFFFF' does not fit in 64 bits");
    }

    #[test]
    fn number_stops_at_letters() {
        let kinds: Vec<_> = tokenize("12ab", "t.scandi").unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds[2], TokenKind::NumberLong(12));
        assert_eq!(kinds[3], TokenKind::Identifier("ab".into()));
    }
}
