//! Error-tolerant front end for a subset of C.
//!
//! Two stages, each of which always runs to completion:
//!
//! 1. [`tokenize`] turns source text into [`Token`]s plus a list of
//!    [`LexError`]s, one per character that matches no token class.
//! 2. [`parse`] builds a `Program` [`AstNode`] by recursive descent and
//!    collects [`ParseError`]s, replacing malformed pieces with
//!    placeholder nodes instead of giving up.
//!
//! # Quick start
//!
//! ```
//! use cfront_rs::{NodeKind, parse, tokenize};
//!
//! let lexed = tokenize("int main() { return 0; }");
//! assert!(lexed.is_clean());
//!
//! let parsed = parse(&lexed.tokens);
//! assert!(parsed.is_clean());
//! assert_eq!(parsed.program.children[0].kind, NodeKind::Function);
//! ```
//!
//! ## Malformed input
//!
//! ```
//! let analysis = cfront_rs::analyze("int foo(");
//! assert!(!analysis.syntax_errors.is_empty());
//! assert_eq!(analysis.program.kind, cfront_rs::NodeKind::Program);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod cursor;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{AstNode, NodeKind};
pub use cursor::TokenCursor;
pub use formatter::{format_ast, format_lex_errors, format_syntax_errors, format_tokens};
pub use lexer::{LexError, LexErrorKind, LineIndex, Tokenized, tokenize};
pub use parser::{ParseError, ParseErrorKind, ParseOptions, Parsed, parse, parse_with};
pub use token::{KEYWORDS, Span, TYPE_KEYWORDS, Token, TokenKind};

/// Unified diagnostic covering both stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Everything the front end produces for one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub lex_errors: Vec<LexError>,
    pub program: AstNode,
    pub syntax_errors: Vec<ParseError>,
}

impl Analysis {
    /// True when neither stage reported anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lex_errors.is_empty() && self.syntax_errors.is_empty()
    }

    /// All diagnostics, lexical first, each group in source order.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Error> {
        self.lex_errors
            .iter()
            .cloned()
            .map(Error::from)
            .chain(self.syntax_errors.iter().cloned().map(Error::from))
            .collect()
    }
}

/// Tokenize and parse a source string in one step (tolerant mode).
#[must_use]
pub fn analyze(source: &str) -> Analysis {
    analyze_with(source, ParseOptions::default())
}

/// Tokenize and parse a source string with explicit parser options.
#[must_use]
pub fn analyze_with(source: &str, options: ParseOptions) -> Analysis {
    let Tokenized { tokens, errors } = tokenize(source);
    let Parsed {
        program,
        errors: syntax_errors,
    } = parse_with(&tokens, options);

    Analysis {
        tokens,
        lex_errors: errors,
        program,
        syntax_errors,
    }
}
