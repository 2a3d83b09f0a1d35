//! Edge case tests for the scanner.

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token};
    use velac_util::{Handler, Symbol};

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn single_char_ident() {
        let t = lex_all("x");
        assert_eq!(t[0], Token::Ident(Symbol::intern("x")));
    }

    #[test]
    fn long_identifier() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("int {} = 1;", name));
        assert!(t.contains(&Token::Ident(Symbol::intern(&name))));
    }

    #[test]
    fn keywords_not_idents() {
        let t = lex_all("function int if");
        assert_eq!(t[0], Token::KwFunction);
        assert_eq!(t[1], Token::KwInt);
        assert_eq!(t[2], Token::KwIf);
    }

    #[test]
    fn case_sensitivity() {
        let t = lex_all("If if");
        assert_eq!(t[0], Token::Ident(Symbol::intern("If")));
        assert_eq!(t[1], Token::KwIf);
    }

    #[test]
    fn bools() {
        let t = lex_all("true false");
        assert_eq!(t[0], Token::True);
        assert_eq!(t[1], Token::False);
    }

    #[test]
    fn every_type_keyword() {
        let t = lex_all("int bigint float string char bool void array");
        assert_eq!(
            t,
            vec![
                Token::KwInt,
                Token::KwBigInt,
                Token::KwFloat,
                Token::KwString,
                Token::KwChar,
                Token::KwBool,
                Token::KwVoid,
                Token::KwArray,
            ]
        );
    }

    #[test]
    fn all_operators() {
        let t = lex_all("+ - * / % == != < > <= >= && || ! & | ^");
        assert!(t.contains(&Token::Plus));
        assert!(t.contains(&Token::EqEq));
        assert!(t.contains(&Token::Caret));
    }

    #[test]
    fn all_delimiters() {
        let t = lex_all("( ) { } [ ] , ; : . ->");
        assert!(t.contains(&Token::LParen));
        assert!(t.contains(&Token::Arrow));
    }

    #[test]
    fn nested_parens() {
        let t = lex_all("((()))");
        assert_eq!(t.iter().filter(|x| **x == Token::LParen).count(), 3);
    }

    #[test]
    fn empty_string_literal() {
        let t = lex_all("\"\"");
        assert_eq!(t[0], Token::StringLiteral(Symbol::intern("")));
    }

    #[test]
    fn consecutive_plus_does_not_become_plus_plus() {
        assert_eq!(lex_all("++"), vec![Token::Plus, Token::Plus]);
    }

    #[test]
    fn whitespace_variations() {
        let t = lex_all("int\tx\n=\n1");
        assert!(t.contains(&Token::KwInt));
        assert!(t.contains(&Token::IntLiteral(1)));
    }

    #[test]
    fn leading_zeros_are_not_an_error() {
        assert_eq!(lex_all("007"), vec![Token::IntLiteral(7)]);
    }

    #[test]
    fn dot_requires_following_digit_to_start_a_float() {
        let t = lex_all("array");
        assert_eq!(t, vec![Token::KwArray]);
    }

    // Error recovery: scanning continues past a bad byte or unterminated
    // literal, collecting one diagnostic per failure.

    #[test]
    fn unterminated_string_reports_error() {
        let mut h = Handler::new();
        let _ = Lexer::new("\"unterminated", &mut h).next_token();
        assert!(h.has_errors());
    }

    #[test]
    fn unterminated_char_reports_error() {
        let mut h = Handler::new();
        let _ = Lexer::new("'x", &mut h).next_token();
        assert!(h.has_errors());
    }

    #[test]
    fn invalid_byte_reports_error_and_scanning_continues() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("1 # 2", &mut h);
        let mut tokens = Vec::new();
        loop {
            let tok = lex.next_token();
            if tok == Token::Eof {
                break;
            }
            tokens.push(tok);
        }
        assert_eq!(
            tokens,
            vec![
                Token::IntLiteral(1),
                Token::Invalid('#'),
                Token::IntLiteral(2)
            ]
        );
        assert!(h.has_errors());
    }

    #[test]
    fn mixed_valid_and_invalid_bytes_collects_multiple_errors() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("int x = # 1 ` 2;", &mut h);
        while lex.next_token() != Token::Eof {}
        assert_eq!(h.error_count(), 2);
    }
}
