#![allow(dead_code)]

use cfront_rs::{AstNode, NodeKind, Parsed, TokenKind, parse, tokenize};

/// Tokenize and parse, asserting that neither stage reported anything.
pub fn parse_clean(input: &str) -> AstNode {
    let lexed = tokenize(input);
    assert!(
        lexed.is_clean(),
        "unexpected lexical errors in:\n{input}\n{:?}",
        lexed.errors
    );
    let parsed = parse(&lexed.tokens);
    assert!(
        parsed.is_clean(),
        "unexpected syntax errors in:\n{input}\n{:?}",
        parsed.errors
    );
    parsed.program
}

/// Tokenize and parse, keeping whatever errors were found.
pub fn parse_lossy(input: &str) -> Parsed {
    parse(&tokenize(input).tokens)
}

pub fn token_kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).tokens.iter().map(|t| t.kind).collect()
}

pub fn child_kinds(node: &AstNode) -> Vec<NodeKind> {
    node.children.iter().map(|c| c.kind).collect()
}

/// Body block of the `index`-th top-level function.
pub fn function_body(program: &AstNode, index: usize) -> &AstNode {
    let function = &program.children[index];
    assert_eq!(function.kind, NodeKind::Function);
    &function.children[3]
}
