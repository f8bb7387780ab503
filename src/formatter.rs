//! Text renderings of front-end output.
//!
//! The AST rendering is tab-indented, one node per line, and is the
//! canonical debug form of a tree.

use std::fmt::Write as _;

use crate::ast::AstNode;
use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::token::Token;

/// Render a tree: one line per node, `Kind` or `Kind: value`, indented
/// by one tab per depth level.
#[must_use]
pub fn format_ast(root: &AstNode) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        out.push_str(&"\t".repeat(depth));
        let _ = write!(out, "{}", node.kind);
        if let Some(value) = node.value() {
            let _ = write!(out, ": {value}");
        }
        out.push('\n');

        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    out
}

/// Render the token list, one token per line.
#[must_use]
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "ID: {}, TYPE: {}, VALUE: {}, LINE: {}, COLUMN: {}",
            token.id, token.kind, token.text, token.span.line, token.span.column
        );
    }
    out
}

/// Render lexical errors as `[Line l:c] message`.
#[must_use]
pub fn format_lex_errors(errors: &[LexError]) -> String {
    let mut out = String::new();
    for error in errors {
        let _ = writeln!(
            out,
            "[Line {}:{}] {}",
            error.line(),
            error.column(),
            error.message()
        );
    }
    out
}

/// Render syntax errors as `[Line l:c] message`, or `[EOF] message` when
/// the error was found at end of input.
#[must_use]
pub fn format_syntax_errors(errors: &[ParseError]) -> String {
    let mut out = String::new();
    for error in errors {
        match error.span {
            Some(span) => {
                let _ = write!(out, "[Line {}:{}] ", span.line, span.column);
            }
            None => out.push_str("[EOF] "),
        }
        out.push_str(&error.message());
        out.push('\n');
    }
    out
}
