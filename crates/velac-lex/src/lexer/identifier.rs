//! Identifier and keyword lexing.
//!
//! This module handles lexing of identifiers and keywords.

use crate::classify::is_ident_continue;
use crate::token::{keyword_from_ident, Token};
use crate::Lexer;
use velac_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter or underscore, followed by
    /// alphanumeric characters or underscores. After reading the
    /// identifier, checks if it matches a reserved keyword.
    ///
    /// # Returns
    ///
    /// Either a keyword token (e.g. `Token::KwIf`) or `Token::Ident(symbol)`.
    pub fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text).unwrap_or_else(|| Token::Ident(Symbol::intern(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_util::Handler;

    fn lex_ident(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_identifier()
    }

    #[test]
    fn simple_identifier() {
        assert_eq!(lex_ident("foo"), Token::Ident(Symbol::intern("foo")));
    }

    #[test]
    fn identifier_with_underscore_and_digits() {
        assert_eq!(
            lex_ident("foo_bar_123"),
            Token::Ident(Symbol::intern("foo_bar_123"))
        );
    }

    #[test]
    fn identifier_starting_with_underscore() {
        assert_eq!(lex_ident("_x"), Token::Ident(Symbol::intern("_x")));
    }

    #[test]
    fn every_keyword_is_recognized() {
        let cases: &[(&str, Token)] = &[
            ("int", Token::KwInt),
            ("bigint", Token::KwBigInt),
            ("float", Token::KwFloat),
            ("string", Token::KwString),
            ("char", Token::KwChar),
            ("bool", Token::KwBool),
            ("void", Token::KwVoid),
            ("array", Token::KwArray),
            ("true", Token::True),
            ("false", Token::False),
            ("if", Token::KwIf),
            ("else", Token::KwElse),
            ("return", Token::KwReturn),
            ("for", Token::KwFor),
            ("while", Token::KwWhile),
            ("function", Token::KwFunction),
            ("print", Token::KwPrint),
        ];
        for (text, expected) in cases {
            assert_eq!(lex_ident(text), *expected, "keyword {text}");
        }
    }

    #[test]
    fn keyword_prefix_is_still_an_identifier() {
        assert_eq!(lex_ident("ifx"), Token::Ident(Symbol::intern("ifx")));
        assert_eq!(
            lex_ident("printer"),
            Token::Ident(Symbol::intern("printer"))
        );
    }
}
