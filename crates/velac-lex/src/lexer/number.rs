//! Number literal lexing.
//!
//! This module handles lexing of integer and floating-point literals. There
//! is no hexadecimal, octal, or binary notation, and no exponent suffix;
//! a numeric literal is a run of decimal digits, optionally followed by a
//! `.` and a further run of digits.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a decimal integer or float literal.
    ///
    /// # Returns
    ///
    /// `Token::IntLiteral(i32)` or `Token::FloatLiteral(f32)`.
    pub fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if is_float {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }

            let text = self.cursor.slice_from(start);
            match text.parse::<f32>() {
                Ok(value) => Token::FloatLiteral(value),
                Err(e) => {
                    self.report_error(format!("invalid float literal '{}': {}", text, e));
                    Token::FloatLiteral(0.0)
                },
            }
        } else {
            let text = self.cursor.slice_from(start);
            match text.parse::<i32>() {
                Ok(value) => Token::IntLiteral(value),
                Err(e) => {
                    self.report_error(format!("integer literal '{}' out of range: {}", text, e));
                    Token::IntLiteral(0)
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_util::Handler;

    fn lex_num(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_number()
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(lex_num("42"), Token::IntLiteral(42));
        assert_eq!(lex_num("0"), Token::IntLiteral(0));
        assert_eq!(lex_num("123456"), Token::IntLiteral(123456));
    }

    #[test]
    fn float_with_fraction() {
        assert_eq!(lex_num("3.14"), Token::FloatLiteral(3.14));
        assert_eq!(lex_num("1.0"), Token::FloatLiteral(1.0));
    }

    #[test]
    fn dot_not_followed_by_digit_is_not_part_of_the_number() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("1.x", &mut handler);
        assert_eq!(lexer.lex_number(), Token::IntLiteral(1));
        assert_eq!(lexer.next_token(), Token::Dot);
    }

    #[test]
    fn overflowing_literal_reports_error() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("99999999999999999999", &mut handler);
        lexer.lex_number();
        assert!(handler.has_errors());
    }
}
