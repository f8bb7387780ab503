//! End-to-end tests running source text through both stages.

mod common;

use cfront_rs::{
    Error, LexErrorKind, NodeKind, ParseErrorKind, TokenKind, analyze, format_ast, tokenize,
};
use common::{child_kinds, function_body, parse_clean, parse_lossy, token_kinds};

const SAMPLE: &str = "\
/* running sum */
int sum(int *values, int n) {
    int total = 0;
    for (int i = 0; i < n; i++) {
        total += *values * 2 - (i % 3);
    }
    return total > 100 ? 100 : total;
}

int main(void) {
    int data[4];
    char *label = \"sum\";
    do {
        total = sum(data, 4);
    } while (!done && total != 0);
    return 0;
}
";

// -----------------------------------------------------------
// Reference programs.
// -----------------------------------------------------------

#[test]
fn e2e_minimal_main() {
    use TokenKind::{Identifier, Keyword, Number, Separator};
    let source = "int main() { return 0; }";
    assert_eq!(
        token_kinds(source),
        vec![
            Keyword, Identifier, Separator, Separator, Separator, Keyword, Number, Separator,
            Separator,
        ]
    );

    let program = parse_clean(source);
    assert_eq!(program.kind, NodeKind::Program);
    assert_eq!(child_kinds(&program), vec![NodeKind::Function]);

    let function = &program.children[0];
    assert_eq!(function.children[0].kind, NodeKind::ReturnType);
    assert_eq!(function.children[0].value(), Some("int"));
    assert_eq!(function.children[1].value(), Some("main"));
    assert!(function.children[2].children.is_empty());

    let body = function_body(&program, 0);
    assert_eq!(child_kinds(body), vec![NodeKind::Return]);
    let value = &body.children[0].children[0];
    assert_eq!(value.kind, NodeKind::Number);
    assert_eq!(value.value(), Some("0"));
}

#[test]
fn e2e_lexical_error_does_not_disturb_tokens() {
    let analysis = analyze("$x = 1;");
    assert_eq!(analysis.lex_errors.len(), 1);
    let error = &analysis.lex_errors[0];
    assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('$'));
    assert_eq!((error.line(), error.column()), (1, 1));

    let texts: Vec<_> = analysis.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "=", "1", ";"]);
    assert!(analysis.syntax_errors.is_empty());
    assert_eq!(analysis.program.children[0].kind, NodeKind::Assignment);
}

#[test]
fn e2e_ternary_assignment() {
    let program = parse_clean("a = b ? c : d;");
    let assignment = &program.children[0];
    assert_eq!(assignment.kind, NodeKind::Assignment);

    let ternary = &assignment.children[2];
    assert_eq!(ternary.kind, NodeKind::Ternary);
    let values: Vec<_> = ternary.children.iter().map(|c| c.value()).collect();
    assert_eq!(values, vec![Some("b"), Some("c"), Some("d")]);
}

#[test]
fn e2e_truncated_function() {
    let analysis = analyze("int foo(");
    assert!(analysis.lex_errors.is_empty());
    assert!(
        analysis
            .syntax_errors
            .iter()
            .any(|e| matches!(e.kind, ParseErrorKind::Expected { .. }))
    );
    assert_eq!(analysis.program.kind, NodeKind::Program);
    assert_eq!(analysis.program.children[0].kind, NodeKind::Function);
}

#[test]
fn e2e_dangling_else_binds_inner() {
    let program = parse_clean("if (a) if (b) x=1; else x=2;");
    let outer = &program.children[0];
    assert_eq!(outer.kind, NodeKind::If);
    assert_eq!(outer.children[2].kind, NodeKind::EmptyElse);

    let inner = &outer.children[1];
    assert_eq!(inner.kind, NodeKind::If);
    assert_eq!(inner.children[0].value(), Some("b"));
    assert_eq!(inner.children[2].kind, NodeKind::Assignment);
    assert_eq!(inner.children[2].children[2].value(), Some("2"));
}

#[test]
fn e2e_sample_program() {
    let program = parse_clean(SAMPLE);
    assert_eq!(
        child_kinds(&program),
        vec![NodeKind::Comment, NodeKind::Function, NodeKind::Function]
    );
    assert_eq!(
        child_kinds(function_body(&program, 1)),
        vec![NodeKind::Declaration, NodeKind::For, NodeKind::Return]
    );
    assert_eq!(
        child_kinds(function_body(&program, 2)),
        vec![
            NodeKind::Declaration,
            NodeKind::Declaration,
            NodeKind::DoWhile,
            NodeKind::Return,
        ]
    );
}

// -----------------------------------------------------------
// Whole-pipeline properties.
// -----------------------------------------------------------

#[test]
fn e2e_relexing_lexemes_is_idempotent() {
    let first = tokenize(SAMPLE);
    assert!(first.is_clean());

    let joined = first
        .tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let second = tokenize(&joined);
    assert!(second.is_clean());

    let kinds = |tokens: &[cfront_rs::Token]| tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(kinds(&first.tokens), kinds(&second.tokens));
    let texts = |tokens: &[cfront_rs::Token]| {
        tokens
            .iter()
            .map(|t| t.text.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(texts(&first.tokens), texts(&second.tokens));
}

#[test]
fn e2e_output_is_deterministic() {
    let source = "int f(int x) { return x @ 2 }";
    let first = analyze(source);
    let second = analyze(source);
    assert_eq!(first, second);
    assert_eq!(format_ast(&first.program), format_ast(&second.program));
}

#[test]
fn e2e_ids_skip_nothing_around_errors() {
    let analysis = analyze("a ` b # c @ d");
    assert_eq!(analysis.lex_errors.len(), 3);
    let ids: Vec<_> = analysis.tokens.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn e2e_diagnostics_list_lexical_errors_first() {
    let analysis = analyze("int main() { return @ 1 }");
    let diagnostics = analysis.diagnostics();
    assert!(!analysis.is_clean());
    assert!(matches!(diagnostics[0], Error::Lex(_)));
    assert!(diagnostics[1..].iter().all(|d| matches!(d, Error::Parse(_))));
    assert_eq!(
        diagnostics[0].to_string(),
        "unexpected character '@' at line 1, column 21"
    );
    assert_eq!(
        diagnostics.len(),
        analysis.lex_errors.len() + analysis.syntax_errors.len()
    );
}

#[test]
fn e2e_garbage_input_still_yields_program() {
    let parsed = parse_lossy("} else ) ] ++ -- : ? while for ( ( ( int int *");
    assert_eq!(parsed.program.kind, NodeKind::Program);
    assert!(!parsed.is_clean());
}
