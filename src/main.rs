//! CLI that runs the C front end over one file and prints tokens,
//! lexical errors, the AST and syntax errors.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, info};

use cfront_rs::{
    ParseOptions, analyze_with, format_ast, format_lex_errors, format_syntax_errors,
    format_tokens,
};

/// Tokenize and parse a C source file.
#[derive(Parser, Debug)]
#[command(name = "cfront", version, about)]
struct Cli {
    /// C source file to analyze
    file: PathBuf,

    /// Only accept function definitions at top level
    #[arg(long)]
    strict: bool,

    /// Do not print the token listing
    #[arg(long)]
    no_tokens: bool,

    /// Do not print the syntax tree
    #[arg(long)]
    no_ast: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli.file.display();
    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!("Error: file '{path}' not found");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = if cli.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    info!("analyzing {path} ({} bytes)", source.len());
    let analysis = analyze_with(&source, options);

    if !cli.no_tokens {
        println!("Tokens:");
        print!("{}", format_tokens(&analysis.tokens));
        println!();
    }

    if analysis.lex_errors.is_empty() {
        println!("No lexical errors found.");
    } else {
        println!("Lexical errors:");
        print!("{}", format_lex_errors(&analysis.lex_errors));
    }
    println!();

    if !cli.no_ast {
        println!("Abstract Syntax Tree:");
        print!("{}", format_ast(&analysis.program));
        println!();
    }

    if analysis.syntax_errors.is_empty() {
        println!("No syntax errors found.");
    } else {
        println!("Syntax errors:");
        print!("{}", format_syntax_errors(&analysis.syntax_errors));
    }

    ExitCode::SUCCESS
}
