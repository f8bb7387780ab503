//! Lexer behaviour and error tests.

mod common;

use cfront_rs::{LexErrorKind, Span, TokenKind, tokenize};
use common::token_kinds;

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    let out = tokenize("");
    assert!(out.tokens.is_empty());
    assert!(out.errors.is_empty());
}

#[test]
fn lex_only_whitespace() {
    let out = tokenize("   \t  \n\r\n  ");
    assert!(out.tokens.is_empty());
    assert!(out.is_clean());
}

#[test]
fn lex_main_function_kinds() {
    use TokenKind::{Identifier, Keyword, Number, Separator};
    assert_eq!(
        token_kinds("int main() { return 0; }"),
        vec![
            Keyword, Identifier, Separator, Separator, Separator, Keyword, Number, Separator,
            Separator,
        ]
    );
}

#[test]
fn lex_every_keyword() {
    let source = cfront_rs::KEYWORDS.join(" ");
    let out = tokenize(&source);
    assert!(out.is_clean());
    assert_eq!(out.tokens.len(), cfront_rs::KEYWORDS.len());
    assert!(out.tokens.iter().all(|t| t.kind == TokenKind::Keyword));
}

#[test]
fn lex_all_separators() {
    let out = tokenize("{ } ( ) [ ] , . ;");
    assert_eq!(out.tokens.len(), 9);
    assert!(out.tokens.iter().all(|t| t.kind == TokenKind::Separator));
}

#[test]
fn lex_compound_operators() {
    let ops = [
        "<<=", ">>=", "++", "--", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "*=", "/=",
        "%=", "&=", "|=", "^=", "<<", ">>", "?", ":", "~",
    ];
    for op in ops {
        let out = tokenize(&format!("a {op} b"));
        assert_eq!(out.tokens.len(), 3, "{op}");
        assert_eq!(out.tokens[1].kind, TokenKind::Operator);
        assert_eq!(out.tokens[1].text, op);
    }
}

#[test]
fn lex_ternary_pieces() {
    let texts: Vec<_> = tokenize("a?b:c")
        .tokens
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["a", "?", "b", ":", "c"]);
}

#[test]
fn lex_identifier_with_underscores_and_digits() {
    let out = tokenize("_tmp1 value_2");
    assert_eq!(out.tokens[0].kind, TokenKind::Identifier);
    assert_eq!(out.tokens[0].text, "_tmp1");
    assert_eq!(out.tokens[1].text, "value_2");
}

#[test]
fn lex_multiline_block_comment() {
    let out = tokenize("/* one\n two */ x");
    assert_eq!(out.tokens[0].kind, TokenKind::Comment);
    assert_eq!(out.tokens[0].text, "/* one\n two */");
    assert_eq!(out.tokens[1].span, Span { line: 2, column: 9 });
}

#[test]
fn lex_comment_takes_priority_over_operator() {
    let out = tokenize("a // b / c\n/ d");
    let texts: Vec<_> = out.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "// b / c", "/", "d"]);
}

#[test]
fn lex_string_with_escaped_quote_and_newline() {
    let out = tokenize("\"a\\\"b\" \"two\nlines\"");
    assert!(out.is_clean());
    assert_eq!(out.tokens.len(), 2);
    assert_eq!(out.tokens[0].text, "\"a\\\"b\"");
    assert_eq!(out.tokens[1].text, "\"two\nlines\"");
}

#[test]
fn lex_char_literal_only_one_character() {
    // 'ab' is not a character literal: the quote is rejected
    let out = tokenize("'ab'");
    assert_eq!(out.errors.len(), 2);
    assert!(out.errors.iter().all(|e| e.offending_char() == '\''));
    assert_eq!(out.tokens.len(), 1);
    assert_eq!(out.tokens[0].text, "ab");
}

#[test]
fn lex_numbers_with_suffixes() {
    for literal in ["10u", "10L", "0xFFul", "017", "6.02e23", "1E+3"] {
        let out = tokenize(literal);
        assert!(out.is_clean(), "{literal}");
        assert_eq!(out.tokens[0].kind, TokenKind::Number);
        assert_eq!(out.tokens[0].text, literal);
    }
}

#[test]
fn lex_float_suffix_is_not_number() {
    // `f` is not an integer suffix, so only `1` survives before the `.`
    let out = tokenize("1.5f");
    assert_eq!(out.tokens[0].text, "1");
    assert_eq!(out.tokens[1].text, ".");
    assert_eq!(out.errors.len(), 2);
}

// -----------------------------------------------------------
// Lexical errors.
// -----------------------------------------------------------

#[test]
fn lex_error_dollar_keeps_rest() {
    let out = tokenize("$x = 1;");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(
        out.errors[0].kind,
        LexErrorKind::UnexpectedCharacter('$')
    );
    assert_eq!(out.errors[0].column(), 1);

    let texts: Vec<_> = out.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "=", "1", ";"]);
    let columns: Vec<_> = out.tokens.iter().map(|t| t.span.column).collect();
    assert_eq!(columns, vec![2, 4, 6, 7]);
    let ids: Vec<_> = out.tokens.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn lex_error_adjacent_characters_are_separate() {
    let out = tokenize("@@#");
    assert_eq!(out.errors.len(), 3);
    let columns: Vec<_> = out.errors.iter().map(|e| e.column()).collect();
    assert_eq!(columns, vec![1, 2, 3]);
}

#[test]
fn lex_error_unterminated_string() {
    let out = tokenize("x = \"open;\ny;");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].offending_char(), '"');
    assert_eq!(out.errors[0].line(), 1);
    assert_eq!(out.errors[0].column(), 5);
    assert!(out.tokens.iter().any(|t| t.text == "open"));
}

#[test]
fn lex_error_display() {
    let out = tokenize("int `x;");
    assert_eq!(
        out.errors[0].to_string(),
        "unexpected character '`' at line 1, column 5"
    );
}

#[test]
fn lex_error_is_deterministic() {
    let input = "int a = 1 @ 2;\nchar *s = \"ok\"; #";
    assert_eq!(tokenize(input), tokenize(input));
}

#[test]
fn lex_positions_on_later_lines() {
    let out = tokenize("int a;\n\n    float b;");
    let float = &out.tokens[3];
    assert_eq!(float.text, "float");
    assert_eq!(float.span, Span { line: 3, column: 5 });
}
