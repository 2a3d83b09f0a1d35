//! Edge case tests for the parser.

use crate::ast::*;
use crate::parser::Parser;
use velac_util::Handler;

fn parse(source: &str) -> (Ast, bool) {
    let mut handler = Handler::new();
    let ast = Parser::from_source(source, &mut handler).parse();
    (ast, handler.has_errors())
}

#[test]
fn empty_source_has_no_items() {
    let (ast, errs) = parse("");
    assert!(ast.is_empty());
    assert!(!errs);
}

#[test]
fn nested_function_calls() {
    let (ast, errs) = parse("f(g(1), h(2, 3));");
    assert!(!errs);
    match &ast[0] {
        TopLevel::Stmt(Stmt::Expr(Expr::Call(c))) => assert_eq!(c.args.len(), 2),
        other => panic!("unexpected item: {:?}", other),
    }
}

#[test]
fn chained_array_and_call_do_not_confuse_each_other() {
    let (ast, errs) = parse("print(a[f(1)]);");
    assert!(!errs);
    assert!(matches!(ast[0], TopLevel::Stmt(Stmt::Print(_))));
}

#[test]
fn full_operator_precedence_chain() {
    // || binds loosest, then &&, then |, ^, &, then == / !=, then
    // < <= > >=, then + -, then * / %, then unary.
    let (ast, errs) = parse("int x = a || b && c | d ^ e & f == g < h + i * -j;");
    assert!(!errs);
    assert!(matches!(ast[0], TopLevel::Stmt(Stmt::VarDecl(_))));
}

#[test]
fn for_loop_uses_closing_paren_not_brace_for_the_update_clause() {
    // The for-loop update expression terminates at ")", not "}" -- the
    // source's typo is fixed here.
    let (ast, errs) = parse("for (int i = 0; i < 10; i = i + 1) { print(i); }");
    assert!(!errs);
    match &ast[0] {
        TopLevel::Stmt(Stmt::For(f)) => assert!(f.update.is_some()),
        other => panic!("unexpected item: {:?}", other),
    }
}

#[test]
fn array_declaration_length_mismatch_is_not_a_parse_error() {
    // The grammar accepts any initializer list length; the length-vs-size
    // check is a lowering-time concern, not a syntactic one.
    let (ast, errs) = parse("array int a[3] = {1, 2};");
    assert!(!errs);
    match &ast[0] {
        TopLevel::Stmt(Stmt::ArrayDecl(a)) => {
            assert_eq!(a.size, 3);
            assert_eq!(a.init.as_ref().unwrap().len(), 2);
        },
        other => panic!("unexpected item: {:?}", other),
    }
}

#[test]
fn dangling_else_binds_to_the_nearest_if() {
    let (ast, errs) = parse("if (1 < 2) if (3 < 4) print(1); else print(0);");
    assert!(!errs);
    match &ast[0] {
        TopLevel::Stmt(Stmt::If(outer)) => match &*outer.then_branch {
            Stmt::If(inner) => assert!(inner.else_branch.is_some()),
            other => panic!("expected nested if, got {:?}", other),
        },
        other => panic!("unexpected item: {:?}", other),
    }
}

#[test]
fn function_with_no_parameters() {
    let (ast, errs) = parse("function main() -> void { }");
    assert!(!errs);
    match &ast[0] {
        TopLevel::Function(f) => assert!(f.params.is_empty()),
        other => panic!("unexpected item: {:?}", other),
    }
}

#[test]
fn consecutive_top_level_statements_parse_independently() {
    let (ast, errs) = parse("int x = 1; int y = 2;");
    assert!(!errs);
    assert_eq!(ast.len(), 2);
}

#[test]
fn unclosed_block_is_reported() {
    let (_, errs) = parse("function f() -> void { int x = 1;");
    assert!(errs);
}

#[test]
fn error_in_one_top_level_item_does_not_stop_later_items_from_parsing() {
    let (ast, errs) = parse("int x = ; int y = 2;");
    assert!(errs);
    assert!(ast.iter().any(|item| matches!(
        item,
        TopLevel::Stmt(Stmt::VarDecl(v)) if v.name == velac_util::Symbol::intern("y")
    )));
}

#[test]
fn string_and_char_literals_in_expressions() {
    let (ast, errs) = parse("print(\"hi\"); print('a');");
    assert!(!errs);
    assert_eq!(ast.len(), 2);
}

#[test]
fn boolean_literals_are_not_identifiers() {
    let (ast, errs) = parse("bool b = true;");
    assert!(!errs);
    match &ast[0] {
        TopLevel::Stmt(Stmt::VarDecl(v)) => {
            assert!(matches!(v.init, Some(Expr::Bool(true))));
        },
        other => panic!("unexpected item: {:?}", other),
    }
}
