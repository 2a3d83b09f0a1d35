//! String and character literal lexing.
//!
//! Neither literal processes escape sequences: a string reads raw bytes up
//! to the closing quote, and a character literal is exactly one raw byte
//! between quotes. A newline before the closing quote, or end-of-input, is
//! an error.

use crate::token::Token;
use crate::Lexer;
use velac_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a string literal.
    ///
    /// # Returns
    ///
    /// `Token::StringLiteral(symbol)` with the quotes stripped.
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance();

        let content_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("missing terminating '\"' character".to_string());
                break;
            }

            match self.cursor.current_char() {
                '"' => break,
                '\n' => {
                    self.report_error("missing terminating '\"' character".to_string());
                    break;
                },
                _ => self.cursor.advance(),
            }
        }

        let content = self.cursor.slice_from(content_start);

        if self.cursor.current_char() == '"' {
            self.cursor.advance();
        }

        Token::StringLiteral(Symbol::intern(content))
    }

    /// Lexes a character literal: exactly one byte of content.
    ///
    /// # Returns
    ///
    /// `Token::CharLiteral(byte)`.
    pub fn lex_char(&mut self) -> Token {
        self.cursor.advance();

        if self.cursor.is_at_end() {
            self.report_error("missing terminating '\\'' character".to_string());
            return Token::CharLiteral(0);
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        if self.cursor.current_char() != '\'' {
            self.report_error("missing terminating '\\'' character".to_string());
        } else {
            self.cursor.advance();
        }

        Token::CharLiteral(c as u8)
    }
}
