//! Recursive-descent parser: token stream to a typed AST.
//!
//! The grammar follows a classical precedence climb: each binary operator
//! level is its own production (see [`expr`]), calling down to the next
//! tighter level rather than consulting a binding-power table. Error
//! recovery is best-effort: a production that cannot complete reports a
//! diagnostic and returns `None`, and the caller resynchronizes at the
//! next likely statement or top-level boundary so later errors are still
//! found.

mod ast;
mod expr;
mod parser;
mod stmt;

#[cfg(test)]
mod edge_cases;

pub use ast::{
    ArrayDeclStmt, Ast, AssignExpr, BinOp, BinaryExpr, Block, CallExpr, CmpOp, ComparisonExpr,
    Expr, ForStmt, FunctionItem, IfStmt, IndexExpr, Param, PrintStmt, ReturnStmt, Stmt, TopLevel,
    Type, UnOp, UnaryExpr, VarDeclStmt, WhileStmt,
};
pub use parser::{Parser, TokenWithSpan};
