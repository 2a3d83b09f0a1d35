//! Parser core: token management, the top-level production, and function
//! signatures. Statement and expression productions live in [`crate::stmt`]
//! and [`crate::expr`]; both extend [`Parser`] with their own `impl` block.

use velac_lex::{Lexer, Token};
use velac_util::{DiagnosticBuilder, Handler, Span, Symbol};

use crate::ast::*;

/// A token paired with the span it occupied in the source. The parser
/// scans the whole input up front so it can look ahead and behind freely.
#[derive(Debug, Clone)]
pub struct TokenWithSpan {
    pub token: Token,
    pub span: Span,
}

pub struct Parser<'a> {
    tokens: Vec<TokenWithSpan>,
    position: usize,
    handler: &'a mut Handler,
}

impl<'a> Parser<'a> {
    /// Scans `source` completely, then builds a parser over the resulting
    /// token stream (lexical errors are reported through `handler` as the
    /// scan proceeds).
    pub fn from_source(source: &str, handler: &'a mut Handler) -> Self {
        let mut tokens = Vec::new();
        {
            let mut lexer = Lexer::new(source, handler);
            loop {
                let tok = lexer.next_token();
                let span = lexer.current_span();
                let eof = tok == Token::Eof;
                tokens.push(TokenWithSpan { token: tok, span });
                if eof {
                    break;
                }
            }
        }
        Self { tokens, position: 0, handler }
    }

    pub fn new(tokens: Vec<TokenWithSpan>, handler: &'a mut Handler) -> Self {
        Self { tokens, position: 0, handler }
    }

    /// Parses the whole program: a sequence of top-level items, each either
    /// a function definition or a bare statement. A production that fails
    /// reports its own diagnostic and is skipped; parsing resumes at the
    /// next top-level item so later errors can still be found.
    pub fn parse(&mut self) -> Ast {
        let mut items = Vec::new();
        while !self.is_at_end() {
            match self.current_token() {
                Token::KwFunction => {
                    if let Some(item) = self.parse_function() {
                        items.push(TopLevel::Function(item));
                    } else {
                        self.synchronize();
                    }
                },
                _ => {
                    if let Some(stmt) = self.parse_stmt() {
                        items.push(TopLevel::Stmt(stmt));
                    } else {
                        self.synchronize();
                    }
                },
            }
        }
        items
    }

    /// `"function" IDENT "(" params? ")" "->" type block`
    fn parse_function(&mut self) -> Option<FunctionItem> {
        let start = self.current_span();
        self.advance(); // `function`

        let name = self.expect_ident()?;
        self.expect(Token::LParen)?;
        let params = if self.current_token() == Token::RParen {
            Vec::new()
        } else {
            self.parse_params()?
        };
        self.expect(Token::RParen)?;
        self.expect(Token::Arrow)?;
        let ret_type = self.parse_type()?;
        let body = self.parse_block()?;

        let span = start.merge(body.span);
        Some(FunctionItem { name, params, ret_type, body, span })
    }

    /// `param ("," param)*`
    fn parse_params(&mut self) -> Option<Vec<Param>> {
        let mut params = vec![self.parse_param()?];
        while self.match_token(Token::Comma) {
            params.push(self.parse_param()?);
        }
        Some(params)
    }

    /// `type IDENT`
    fn parse_param(&mut self) -> Option<Param> {
        let ty = self.parse_type()?;
        let name = self.expect_ident()?;
        Some(Param { ty, name })
    }

    /// One of the scalar type keywords.
    pub(crate) fn parse_type(&mut self) -> Option<Type> {
        let ty = match self.current_token() {
            Token::KwInt => Type::Int,
            Token::KwBigInt => Type::BigInt,
            Token::KwFloat => Type::Float,
            Token::KwString => Type::String,
            Token::KwChar => Type::Char,
            Token::KwBool => Type::Bool,
            Token::KwVoid => Type::Void,
            _ => {
                self.error("expected a type".to_string());
                return None;
            },
        };
        self.advance();
        Some(ty)
    }

    // -- token stream navigation -------------------------------------------------

    pub(crate) fn current_token(&self) -> Token {
        self.tokens[self.position].token
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens[self.position].span
    }

    pub(crate) fn peek_token(&self, offset: usize) -> Token {
        let idx = (self.position + offset).min(self.tokens.len() - 1);
        self.tokens[idx].token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current_token() == Token::Eof
    }

    pub(crate) fn advance(&mut self) -> TokenWithSpan {
        let tok = self.tokens[self.position].clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        tok
    }

    /// Consumes the current token if it equals `expected`; otherwise reports
    /// an error and returns `None` without advancing.
    pub(crate) fn expect(&mut self, expected: Token) -> Option<()> {
        if self.current_token() == expected {
            self.advance();
            Some(())
        } else {
            self.error(format!(
                "expected {:?}, found {:?}",
                expected,
                self.current_token()
            ));
            None
        }
    }

    /// Consumes the current token and returns `true` if it equals `expected`;
    /// otherwise leaves the position unchanged and returns `false`.
    pub(crate) fn match_token(&mut self, expected: Token) -> bool {
        if self.current_token() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Option<Symbol> {
        match self.current_token() {
            Token::Ident(sym) => {
                self.advance();
                Some(sym)
            },
            other => {
                self.error(format!("expected an identifier, found {:?}", other));
                None
            },
        }
    }

    pub(crate) fn error(&mut self, message: String) {
        let span = self.current_span();
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    /// Error recovery: discards tokens until a likely statement boundary
    /// (`;`, the start of a block, or a keyword that begins a new top-level
    /// item) so that later errors can still be reported.
    pub(crate) fn synchronize(&mut self) {
        if self.current_token() == Token::Semicolon {
            self.advance();
            return;
        }
        while !self.is_at_end() {
            match self.current_token() {
                Token::Semicolon => {
                    self.advance();
                    return;
                },
                Token::KwFunction
                | Token::KwIf
                | Token::KwFor
                | Token::KwWhile
                | Token::KwReturn
                | Token::KwPrint
                | Token::LBrace => return,
                _ => {
                    self.advance();
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TopLevel;

    fn parse(source: &str) -> (Ast, bool) {
        let mut handler = Handler::new();
        let ast = Parser::from_source(source, &mut handler).parse();
        (ast, handler.has_errors())
    }

    #[test]
    fn empty_program_parses_to_no_items() {
        let (ast, errs) = parse("");
        assert!(ast.is_empty());
        assert!(!errs);
    }

    #[test]
    fn parses_a_bare_function_with_no_params() {
        let (ast, errs) = parse("function main() -> void { }");
        assert!(!errs);
        assert_eq!(ast.len(), 1);
        assert!(matches!(ast[0], TopLevel::Function(_)));
    }

    #[test]
    fn parses_function_params() {
        let (ast, errs) = parse("function add(int a, int b) -> int { return a + b; }");
        assert!(!errs);
        match &ast[0] {
            TopLevel::Function(f) => assert_eq!(f.params.len(), 2),
            _ => panic!("expected a function item"),
        }
    }

    #[test]
    fn missing_return_arrow_is_an_error() {
        let (_, errs) = parse("function f() int { return 0; }");
        assert!(errs);
    }

    #[test]
    fn top_level_statement_is_accepted() {
        let (ast, errs) = parse("int x = 1;");
        assert!(!errs);
        assert!(matches!(ast[0], TopLevel::Stmt(_)));
    }
}
