//! Show how malformed input is reported without stopping either stage.

use cfront_rs::{Error, NodeKind, ParseErrorKind, ParseOptions, analyze, analyze_with};

fn main() {
    // Unrecognized character and a missing semicolon
    let analysis = analyze("int main() {\n\tint x = 1 @\n\treturn x;\n}\n");
    for diagnostic in analysis.diagnostics() {
        match diagnostic {
            Error::Lex(e) => {
                println!("Lex error: {e}");
                println!("  Character: {:?}", e.offending_char());
            }
            Error::Parse(e) => {
                println!("Parse error: {e}");
                println!("  Kind: {:?}", e.kind);
            }
        }
    }

    println!();

    // Truncated input still yields a Program with placeholders
    let analysis = analyze("int foo(");
    println!("Root: {}", analysis.program.kind);
    for e in &analysis.syntax_errors {
        if e.is_at_end_of_input() {
            println!("  at EOF: {}", e.message());
        }
    }

    println!();

    // Strict mode rejects statements outside functions
    let analysis = analyze_with("x = 1;\nint main() { return 0; }", ParseOptions::strict());
    let rejected = analysis
        .syntax_errors
        .iter()
        .filter(|e| matches!(e.kind, ParseErrorKind::ExpectedFunction { .. }))
        .count();
    let functions = analysis
        .program
        .children
        .iter()
        .filter(|n| n.kind == NodeKind::Function)
        .count();
    println!("Strict mode: {rejected} rejected, {functions} function(s) kept");
}
