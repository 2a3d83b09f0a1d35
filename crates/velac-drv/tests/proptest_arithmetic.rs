//! Random arithmetic expression trees must evaluate, through the full
//! scan/parse/lower/JIT pipeline, to the same value a reference tree
//! interpreter computes directly. Leaves stay small and operators stick to
//! wrapping add/sub/mul so the comparison holds even when an expression
//! overflows `i32` — LLVM's `add`/`sub`/`mul` on `i32` wrap the same way
//! `i32::wrapping_*` does.

use assert_cmd::Command;
use proptest::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone)]
enum Tree {
    Lit(i32),
    Add(Box<Tree>, Box<Tree>),
    Sub(Box<Tree>, Box<Tree>),
    Mul(Box<Tree>, Box<Tree>),
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    let leaf = any::<i32>().prop_map(|n| Tree::Lit(n % 1000));
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Tree::Add(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Tree::Sub(Box::new(a), Box::new(b))),
            (inner.clone(), inner).prop_map(|(a, b)| Tree::Mul(Box::new(a), Box::new(b))),
        ]
    })
}

fn render(tree: &Tree) -> String {
    match tree {
        Tree::Lit(n) => {
            if *n < 0 {
                format!("({})", n)
            } else {
                n.to_string()
            }
        },
        Tree::Add(a, b) => format!("({} + {})", render(a), render(b)),
        Tree::Sub(a, b) => format!("({} - {})", render(a), render(b)),
        Tree::Mul(a, b) => format!("({} * {})", render(a), render(b)),
    }
}

fn eval(tree: &Tree) -> i32 {
    match tree {
        Tree::Lit(n) => *n,
        Tree::Add(a, b) => eval(a).wrapping_add(eval(b)),
        Tree::Sub(a, b) => eval(a).wrapping_sub(eval(b)),
        Tree::Mul(a, b) => eval(a).wrapping_mul(eval(b)),
    }
}

fn velac_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_velac"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_arithmetic_trees_match_a_reference_interpreter(tree in tree_strategy()) {
        let expected = eval(&tree);
        let source = format!("print({});", render(&tree));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.vl");
        std::fs::write(&path, &source).unwrap();

        let output = Command::new(velac_bin())
            .arg(&path)
            .output()
            .expect("velac should run");

        prop_assert!(output.status.success());
        let printed = String::from_utf8_lossy(&output.stdout);
        let actual: i32 = printed.trim().parse().expect("output should be an integer");
        prop_assert_eq!(actual, expected);
    }
}
