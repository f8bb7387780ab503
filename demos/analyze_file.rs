//! Tokenize and parse a C file, then print the tree and any diagnostics.
//!
//! ```sh
//! cargo run --example analyze_file -- path/to/file.c
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: analyze_file <file.c>");
        return ExitCode::from(2);
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let analysis = cfront_rs::analyze(&source);
    println!(
        "{} tokens, {} top-level items",
        analysis.tokens.len(),
        analysis.program.children.len()
    );
    print!("{}", analysis.program);

    if analysis.is_clean() {
        println!("No errors.");
        return ExitCode::SUCCESS;
    }
    for diagnostic in analysis.diagnostics() {
        println!("{diagnostic}");
    }
    ExitCode::FAILURE
}
