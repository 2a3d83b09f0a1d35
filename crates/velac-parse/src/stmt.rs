//! Statement productions: var-decl, array-decl, print, block, if, for,
//! while, return, and the expression-statement fallback.

use velac_lex::Token;

use crate::ast::*;
use crate::parser::Parser;

fn is_type_start(token: Token) -> bool {
    matches!(
        token,
        Token::KwInt
            | Token::KwBigInt
            | Token::KwFloat
            | Token::KwString
            | Token::KwChar
            | Token::KwBool
            | Token::KwVoid
    )
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_token() {
            Token::KwArray => self.parse_array_decl().map(Stmt::ArrayDecl),
            t if is_type_start(t) => self.parse_var_decl().map(Stmt::VarDecl),
            Token::KwPrint => self.parse_print().map(Stmt::Print),
            Token::LBrace => self.parse_block().map(Stmt::Block),
            Token::KwIf => self.parse_if(),
            Token::KwFor => self.parse_for(),
            Token::KwWhile => self.parse_while(),
            Token::KwReturn => self.parse_return(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// `type IDENT ("=" expression)? ";"`
    fn parse_var_decl(&mut self) -> Option<VarDeclStmt> {
        let start = self.current_span();
        let ty = self.parse_type()?;
        let name = self.expect_ident()?;
        let init = if self.match_token(Token::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;
        let span = start.merge(self.current_span());
        Some(VarDeclStmt { ty, name, init, span })
    }

    /// `"array" type IDENT "[" INT "]" ("=" "{" expr-list? "}")? ";"`
    fn parse_array_decl(&mut self) -> Option<ArrayDeclStmt> {
        let start = self.current_span();
        self.advance(); // `array`

        let elem_ty = self.parse_type()?;
        let name = self.expect_ident()?;
        self.expect(Token::LBracket)?;
        let size = match self.current_token() {
            Token::IntLiteral(n) => {
                self.advance();
                n
            },
            other => {
                self.error(format!("expected an array size, found {:?}", other));
                return None;
            },
        };
        self.expect(Token::RBracket)?;

        let init = if self.match_token(Token::Eq) {
            self.expect(Token::LBrace)?;
            let mut elems = Vec::new();
            if self.current_token() != Token::RBrace {
                elems.push(self.parse_expr()?);
                while self.match_token(Token::Comma) {
                    elems.push(self.parse_expr()?);
                }
            }
            self.expect(Token::RBrace)?;
            Some(elems)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;
        let span = start.merge(self.current_span());
        Some(ArrayDeclStmt { elem_ty, name, size, init, span })
    }

    /// `"print" "(" expression ")" ";"`
    fn parse_print(&mut self) -> Option<PrintStmt> {
        let start = self.current_span();
        self.advance(); // `print`
        self.expect(Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(Token::RParen)?;
        self.expect(Token::Semicolon)?;
        let span = start.merge(self.current_span());
        Some(PrintStmt { expr, span })
    }

    /// `"{" statement* "}"`
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let start = self.current_span();
        self.expect(Token::LBrace)?;
        let mut stmts = Vec::new();
        while self.current_token() != Token::RBrace && !self.is_at_end() {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        self.expect(Token::RBrace)?;
        let span = start.merge(self.current_span());
        Some(Block { stmts, span })
    }

    /// `"if" "(" logical-or ")" statement ("else" statement)?`
    fn parse_if(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `if`
        self.expect(Token::LParen)?;
        let cond = self.parse_logical_or()?;
        self.expect(Token::RParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.match_token(Token::KwElse) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        let span = start.merge(self.current_span());
        Some(Stmt::If(IfStmt { cond, then_branch, else_branch, span }))
    }

    /// `"for" "(" (var-decl | expr-stmt | ";") expression? ";" expression? ")" statement`
    fn parse_for(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `for`
        self.expect(Token::LParen)?;

        let init = match self.current_token() {
            Token::Semicolon => {
                self.advance();
                None
            },
            t if is_type_start(t) => Some(Box::new(Stmt::VarDecl(self.parse_var_decl()?))),
            _ => Some(Box::new(self.parse_expr_stmt()?)),
        };

        let cond = if self.current_token() != Token::Semicolon {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;

        let update = if self.current_token() != Token::RParen {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(Token::RParen)?;

        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(self.current_span());
        Some(Stmt::For(ForStmt { init, cond, update, body, span }))
    }

    /// `"while" "(" logical-or ")" statement`
    fn parse_while(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `while`
        self.expect(Token::LParen)?;
        let cond = self.parse_logical_or()?;
        self.expect(Token::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(self.current_span());
        Some(Stmt::While(WhileStmt { cond, body, span }))
    }

    /// `"return" expression ";"`
    fn parse_return(&mut self) -> Option<Stmt> {
        let start = self.current_span();
        self.advance(); // `return`
        let expr = self.parse_expr()?;
        self.expect(Token::Semicolon)?;
        let span = start.merge(self.current_span());
        Some(Stmt::Return(ReturnStmt { expr, span }))
    }

    /// `expression ";"`
    fn parse_expr_stmt(&mut self) -> Option<Stmt> {
        let expr = self.parse_expr()?;
        self.expect(Token::Semicolon)?;
        Some(Stmt::Expr(expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_util::Handler;

    fn parse_one(source: &str) -> (Stmt, bool) {
        let mut handler = Handler::new();
        let mut parser = Parser::from_source(source, &mut handler);
        let stmt = parser.parse_stmt().expect("statement should parse");
        (stmt, handler.has_errors())
    }

    #[test]
    fn var_decl_without_initializer() {
        let (stmt, errs) = parse_one("int x;");
        assert!(!errs);
        assert!(matches!(stmt, Stmt::VarDecl(_)));
    }

    #[test]
    fn var_decl_with_initializer() {
        let (stmt, errs) = parse_one("float y = 1.5;");
        assert!(!errs);
        match stmt {
            Stmt::VarDecl(v) => assert!(v.init.is_some()),
            _ => panic!("expected var decl"),
        }
    }

    #[test]
    fn array_decl_with_initializer_list() {
        let (stmt, errs) = parse_one("array int a[3] = {10, 20, 30};");
        assert!(!errs);
        match stmt {
            Stmt::ArrayDecl(a) => {
                assert_eq!(a.size, 3);
                assert_eq!(a.init.as_ref().unwrap().len(), 3);
            },
            _ => panic!("expected array decl"),
        }
    }

    #[test]
    fn array_decl_without_initializer() {
        let (stmt, errs) = parse_one("array int a[3];");
        assert!(!errs);
        match stmt {
            Stmt::ArrayDecl(a) => assert!(a.init.is_none()),
            _ => panic!("expected array decl"),
        }
    }

    #[test]
    fn print_statement() {
        let (stmt, errs) = parse_one("print(1 + 2);");
        assert!(!errs);
        assert!(matches!(stmt, Stmt::Print(_)));
    }

    #[test]
    fn if_without_else() {
        let (stmt, errs) = parse_one("if (1 < 2) print(1);");
        assert!(!errs);
        match stmt {
            Stmt::If(s) => assert!(s.else_branch.is_none()),
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn if_with_else() {
        let (stmt, errs) = parse_one("if (1 < 2) { print(1); } else { print(0); }");
        assert!(!errs);
        match stmt {
            Stmt::If(s) => assert!(s.else_branch.is_some()),
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn for_loop_with_all_clauses() {
        let (stmt, errs) = parse_one("for (int i = 0; i < 5; i = i + 1) print(i);");
        assert!(!errs);
        match stmt {
            Stmt::For(f) => {
                assert!(f.init.is_some());
                assert!(f.cond.is_some());
                assert!(f.update.is_some());
            },
            _ => panic!("expected for"),
        }
    }

    #[test]
    fn for_loop_with_empty_clauses() {
        let (stmt, errs) = parse_one("for (;;) { }");
        assert!(!errs);
        match stmt {
            Stmt::For(f) => {
                assert!(f.init.is_none());
                assert!(f.cond.is_none());
                assert!(f.update.is_none());
            },
            _ => panic!("expected for"),
        }
    }

    #[test]
    fn while_loop() {
        let (stmt, errs) = parse_one("while (1 < 2) { print(1); }");
        assert!(!errs);
        assert!(matches!(stmt, Stmt::While(_)));
    }

    #[test]
    fn return_statement() {
        let (stmt, errs) = parse_one("return 1 + 2;");
        assert!(!errs);
        assert!(matches!(stmt, Stmt::Return(_)));
    }

    #[test]
    fn expression_statement_assignment() {
        let (stmt, errs) = parse_one("x = 1;");
        assert!(!errs);
        match stmt {
            Stmt::Expr(Expr::Assign(_)) => {},
            other => panic!("expected an assignment expression statement, got {:?}", other),
        }
    }

    #[test]
    fn missing_semicolon_is_reported() {
        let (_, errs) = parse_one("int x = 1");
        assert!(errs);
    }
}
