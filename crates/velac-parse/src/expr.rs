//! Expression productions, one per precedence level, from `assignment`
//! down to `primary`. Every level follows the same shape: parse the next
//! tighter level for the left operand, then loop while the current token
//! is one of this level's operators.

use velac_lex::Token;

use crate::ast::*;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_assignment()
    }

    /// `logical-or ("=" expression)?` -- right-associative.
    fn parse_assignment(&mut self) -> Option<Expr> {
        let left = self.parse_logical_or()?;
        if self.match_token(Token::Eq) {
            if !left.is_assignable() {
                self.error("invalid assignment target".to_string());
                return None;
            }
            let value = self.parse_expr()?;
            let span = left.span().merge(value.span());
            return Some(Expr::Assign(AssignExpr {
                place: Box::new(left),
                value: Box::new(value),
                span,
            }));
        }
        Some(left)
    }

    /// `logical-and ("||" logical-and)*`
    pub(crate) fn parse_logical_or(&mut self) -> Option<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.match_token(Token::OrOr) {
            let right = self.parse_logical_and()?;
            left = binary(BinOp::Or, left, right);
        }
        Some(left)
    }

    /// `bitwise-or ("&&" bitwise-or)*`
    fn parse_logical_and(&mut self) -> Option<Expr> {
        let mut left = self.parse_bitwise_or()?;
        while self.match_token(Token::AndAnd) {
            let right = self.parse_bitwise_or()?;
            left = binary(BinOp::And, left, right);
        }
        Some(left)
    }

    /// `bitwise-xor ("|" bitwise-xor)*`
    fn parse_bitwise_or(&mut self) -> Option<Expr> {
        let mut left = self.parse_bitwise_xor()?;
        while self.match_token(Token::Pipe) {
            let right = self.parse_bitwise_xor()?;
            left = binary(BinOp::BitOr, left, right);
        }
        Some(left)
    }

    /// `bitwise-and ("^" bitwise-and)*`
    fn parse_bitwise_xor(&mut self) -> Option<Expr> {
        let mut left = self.parse_bitwise_and()?;
        while self.match_token(Token::Caret) {
            let right = self.parse_bitwise_and()?;
            left = binary(BinOp::BitXor, left, right);
        }
        Some(left)
    }

    /// `equality ("&" equality)*`
    fn parse_bitwise_and(&mut self) -> Option<Expr> {
        let mut left = self.parse_equality()?;
        while self.match_token(Token::Ampersand) {
            let right = self.parse_equality()?;
            left = binary(BinOp::BitAnd, left, right);
        }
        Some(left)
    }

    /// `comparison (("==" | "!=") comparison)*`
    fn parse_equality(&mut self) -> Option<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.current_token() {
                Token::EqEq => CmpOp::Eq,
                Token::NotEq => CmpOp::Ne,
                _ => break,
            };
            self.advance();
            let right = self.parse_comparison()?;
            left = comparison(op, left, right);
        }
        Some(left)
    }

    /// `term ((">" | ">=" | "<" | "<=") term)*`
    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current_token() {
                Token::Gt => CmpOp::Gt,
                Token::GtEq => CmpOp::Ge,
                Token::Lt => CmpOp::Lt,
                Token::LtEq => CmpOp::Le,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = comparison(op, left, right);
        }
        Some(left)
    }

    /// `factor (("+" | "-") factor)*`
    fn parse_term(&mut self) -> Option<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.current_token() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    /// `unary (("*" | "/" | "%") unary)*`
    fn parse_factor(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current_token() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                Token::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Some(left)
    }

    /// `("!" | "-") unary | primary`
    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.current_span();
        let op = match self.current_token() {
            Token::Bang => UnOp::Not,
            Token::Minus => UnOp::Neg,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        let span = start.merge(operand.span());
        Some(Expr::Unary(UnaryExpr { op, operand: Box::new(operand), span }))
    }

    /// `"true" | "false" | INT | FLOAT | CHAR | STRING`
    /// `| IDENT ( "(" arg-list? ")" | "[" expression "]" )?`
    /// `| "(" expression ")"`
    fn parse_primary(&mut self) -> Option<Expr> {
        let start = self.current_span();
        match self.current_token() {
            Token::True => {
                self.advance();
                Some(Expr::Bool(true))
            },
            Token::False => {
                self.advance();
                Some(Expr::Bool(false))
            },
            Token::IntLiteral(n) => {
                self.advance();
                Some(Expr::Int(n))
            },
            Token::FloatLiteral(f) => {
                self.advance();
                Some(Expr::Float(f))
            },
            Token::CharLiteral(c) => {
                self.advance();
                Some(Expr::Char(c))
            },
            Token::StringLiteral(s) => {
                self.advance();
                Some(Expr::Str(s))
            },
            Token::Ident(name) => {
                self.advance();
                if self.match_token(Token::LParen) {
                    let mut args = Vec::new();
                    if self.current_token() != Token::RParen {
                        args.push(self.parse_expr()?);
                        while self.match_token(Token::Comma) {
                            args.push(self.parse_expr()?);
                        }
                    }
                    self.expect(Token::RParen)?;
                    let span = start.merge(self.current_span());
                    Some(Expr::Call(CallExpr { callee: name, args, span }))
                } else if self.match_token(Token::LBracket) {
                    let index = self.parse_expr()?;
                    self.expect(Token::RBracket)?;
                    let span = start.merge(self.current_span());
                    Some(Expr::Index(IndexExpr { array: name, index: Box::new(index), span }))
                } else {
                    Some(Expr::Ident(name))
                }
            },
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Some(expr)
            },
            other => {
                self.error(format!("expected an expression, found {:?}", other));
                None
            },
        }
    }
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span().merge(right.span());
    Expr::Binary(BinaryExpr { op, left: Box::new(left), right: Box::new(right), span })
}

fn comparison(op: CmpOp, left: Expr, right: Expr) -> Expr {
    let span = left.span().merge(right.span());
    Expr::Comparison(ComparisonExpr { op, left: Box::new(left), right: Box::new(right), span })
}

#[cfg(test)]
mod tests {
    use super::*;
    use velac_util::{Handler, Symbol};

    fn parse(source: &str) -> (Expr, bool) {
        let mut handler = Handler::new();
        let mut parser = Parser::from_source(source, &mut handler);
        let expr = parser.parse_expr().expect("expression should parse");
        (expr, handler.has_errors())
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (expr, errs) = parse("1 + 2 * 3");
        assert!(!errs);
        match expr {
            Expr::Binary(b) => {
                assert_eq!(b.op, BinOp::Add);
                assert!(matches!(*b.right, Expr::Binary(BinaryExpr { op: BinOp::Mul, .. })));
            },
            _ => panic!("expected a top-level addition"),
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let (expr, errs) = parse("a = b = 1");
        assert!(!errs);
        match expr {
            Expr::Assign(outer) => match *outer.value {
                Expr::Assign(_) => {},
                other => panic!("expected nested assignment, got {:?}", other),
            },
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn logical_not_binds_tighter_than_logical_and() {
        let (expr, errs) = parse("!x && y");
        assert!(!errs);
        match expr {
            Expr::Binary(b) => {
                assert_eq!(b.op, BinOp::And);
                assert!(matches!(*b.left, Expr::Unary(UnaryExpr { op: UnOp::Not, .. })));
            },
            _ => panic!("expected a top-level logical and"),
        }
    }

    #[test]
    fn assigning_to_a_literal_is_an_error() {
        let (_, errs) = parse("1 = 2");
        assert!(errs);
    }

    #[test]
    fn call_with_arguments() {
        let (expr, errs) = parse("add(1, 2)");
        assert!(!errs);
        match expr {
            Expr::Call(c) => {
                assert_eq!(c.callee, Symbol::intern("add"));
                assert_eq!(c.args.len(), 2);
            },
            _ => panic!("expected a call"),
        }
    }

    #[test]
    fn array_index() {
        let (expr, errs) = parse("a[1 + 2]");
        assert!(!errs);
        assert!(matches!(expr, Expr::Index(_)));
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        let (expr, errs) = parse("(1 + 2) * 3");
        assert!(!errs);
        match expr {
            Expr::Binary(b) => {
                assert_eq!(b.op, BinOp::Mul);
                assert!(matches!(*b.left, Expr::Binary(BinaryExpr { op: BinOp::Add, .. })));
            },
            _ => panic!("expected a top-level multiplication"),
        }
    }

    #[test]
    fn comparison_is_distinct_from_binary() {
        let (expr, _) = parse("1 < 2");
        assert!(matches!(expr, Expr::Comparison(ComparisonExpr { op: CmpOp::Lt, .. })));
    }
}
