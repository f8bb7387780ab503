//! Recursive-descent parser producing an [`AstNode`] tree.
//!
//! The parser never aborts. Each mismatch is recorded as a [`ParseError`]
//! and parsing continues with a placeholder, so callers always receive a
//! `Program` root together with every error found on the way.

mod expression;
mod statement;

use std::fmt;

use log::{debug, trace};

use crate::ast::{AstNode, NodeKind};
use crate::cursor::TokenCursor;
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required; `found` is `None` at end of input.
    Expected {
        expected: String,
        found: Option<String>,
    },
    /// Token that cannot start a statement.
    InvalidStatement { found: String },
    /// Input ended where a statement was required.
    ExpectedStatement,
    /// Input ended where an expression was required.
    ExpectedExpression,
    /// Token that cannot start an expression.
    InvalidExpression { found: String },
    /// `++`/`--` with neither an operand after it nor an identifier before it.
    MisplacedIncrement { operator: String },
    /// Top-level construct other than a function definition in strict mode.
    ExpectedFunction { found: String },
    /// Brackets, blocks or operators nested past [`ParseOptions::max_nesting`].
    NestingTooDeep { limit: usize },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected {
                expected,
                found: None,
            } => {
                write!(f, "expected {expected}")
            }
            Self::Expected {
                expected,
                found: Some(t),
            } => {
                write!(f, "expected {expected}, found {t}")
            }
            Self::InvalidStatement { found } => {
                write!(f, "invalid statement starting with {found}")
            }
            Self::ExpectedStatement => write!(f, "expected statement"),
            Self::ExpectedExpression => write!(f, "expected expression"),
            Self::InvalidExpression { found } => {
                write!(f, "invalid expression starting with {found}")
            }
            Self::MisplacedIncrement { operator } => {
                write!(f, "misplaced increment/decrement operator '{operator}'")
            }
            Self::ExpectedFunction { found } => {
                write!(f, "expected function definition, found {found}")
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "nesting deeper than {limit} levels")
            }
        }
    }
}

/// Error produced during parsing.
///
/// `span` is `None` when the error was detected at end of input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {}", position_suffix(span.as_ref()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Option<Span>,
}

fn position_suffix(span: Option<&Span>) -> String {
    span.map_or_else(
        || "at end of input".to_string(),
        |s| format!("at line {}, column {}", s.line, s.column),
    )
}

impl ParseError {
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.span.map(|s| s.line)
    }

    #[must_use]
    pub fn column(&self) -> Option<usize> {
        self.span.map(|s| s.column)
    }

    #[must_use]
    pub const fn is_at_end_of_input(&self) -> bool {
        self.span.is_none()
    }

    /// The message without the position suffix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept statements and global declarations between function
    /// definitions. When `false`, each one is reported as
    /// [`ParseErrorKind::ExpectedFunction`] and left out of the tree.
    pub allow_top_level_statements: bool,
    /// Deepest nesting of parentheses, calls, unary operators, ternaries
    /// and statements. A construct past the limit is reported as
    /// [`ParseErrorKind::NestingTooDeep`], skipped and left as an `Error`
    /// node, which keeps recursion within the thread's stack.
    pub max_nesting: usize,
}

/// The 127 block levels C11 requires, plus the function body.
const DEFAULT_MAX_NESTING: usize = 128;

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_top_level_statements: true,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl ParseOptions {
    /// Only function definitions (and comments) at top level.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            allow_top_level_statements: false,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    #[must_use]
    pub const fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

/// Output of a parse: the `Program` root and the syntax errors in the
/// order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub program: AstNode,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a token stream in tolerant mode.
#[must_use]
pub fn parse(tokens: &[Token]) -> Parsed {
    parse_with(tokens, ParseOptions::default())
}

/// Parse a token stream with explicit options.
#[must_use]
pub fn parse_with(tokens: &[Token], options: ParseOptions) -> Parsed {
    Parser::new(tokens, options).parse()
}

const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
];

struct Parser<'a> {
    cursor: TokenCursor<'a>,
    options: ParseOptions,
    errors: Vec<ParseError>,
    depth: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            options,
            errors: Vec::new(),
            depth: 0,
        }
    }

    fn parse(mut self) -> Parsed {
        let mut program = AstNode::new(NodeKind::Program);

        while let Some(token) = self.cursor.current() {
            if self.is_function_start() {
                program.push(self.parse_function());
                continue;
            }

            match self.parse_statement() {
                Some(stmt)
                    if self.options.allow_top_level_statements
                        || stmt.kind == NodeKind::Comment =>
                {
                    program.push(stmt);
                }
                Some(_) => {
                    self.record(
                        ParseErrorKind::ExpectedFunction {
                            found: token.describe(),
                        },
                        Some(token.span),
                    );
                }
                None => {
                    trace!("skipping {} at top level", token.describe());
                    self.cursor.advance();
                }
            }
        }

        debug!(
            "parsed {} top-level items, {} syntax errors",
            program.children.len(),
            self.errors.len()
        );
        Parsed {
            program,
            errors: self.errors,
        }
    }

    /// Type keyword, pointer markers, identifier, then `(`.
    fn is_function_start(&self) -> bool {
        if !self.cursor.current().is_some_and(Token::is_type_keyword) {
            return false;
        }
        let mut k = 1;
        while self.cursor.check_at(k, TokenKind::Operator, "*") {
            k += 1;
        }
        self.cursor
            .peek(k)
            .is_some_and(|t| t.kind == TokenKind::Identifier)
            && self.cursor.check_at(k + 1, TokenKind::Separator, "(")
    }

    /// Consume the current token if it matches, otherwise record an error.
    ///
    /// A mismatched token is left in place; the caller carries on as if
    /// the expected token had been there.
    fn expect(&mut self, kind: TokenKind, text: Option<&str>) -> Option<&'a Token> {
        let current = self.cursor.current();
        if let Some(token) = current.filter(|t| t.kind == kind && text.is_none_or(|s| t.text == s))
        {
            self.cursor.advance();
            return Some(token);
        }

        let expected = text.map_or_else(|| kind.to_string(), |s| format!("{kind} '{s}'"));
        self.record(
            ParseErrorKind::Expected {
                expected,
                found: current.map(Token::describe),
            },
            current.map(|t| t.span),
        );
        None
    }

    fn expect_separator(&mut self, sep: &str) -> Option<&'a Token> {
        self.expect(TokenKind::Separator, Some(sep))
    }

    /// Run `parse` one nesting level deeper.
    ///
    /// At the limit the construct under the cursor is reported, skipped
    /// with [`Self::skip_nested`] and replaced by an `Error` node.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> AstNode) -> AstNode {
        if self.depth >= self.options.max_nesting {
            let span = self.cursor.current().map(|t| t.span);
            self.record(
                ParseErrorKind::NestingTooDeep {
                    limit: self.options.max_nesting,
                },
                span,
            );
            self.skip_nested();
            return AstNode::error();
        }

        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    /// Skip to the end of the construct under the cursor.
    ///
    /// Stops before a `;` or `,` outside brackets and before the closer of
    /// an enclosing bracket. A block is skipped through its closing `}`.
    fn skip_nested(&mut self) {
        let mut open = 0usize;
        while let Some(token) = self.cursor.current() {
            if token.kind == TokenKind::Separator {
                match token.text.as_str() {
                    "(" | "[" | "{" => open += 1,
                    ")" | "]" | "}" if open == 0 => return,
                    ")" | "]" => open -= 1,
                    "}" => {
                        open -= 1;
                        if open == 0 {
                            self.cursor.advance();
                            return;
                        }
                    }
                    ";" | "," if open == 0 => return,
                    _ => {}
                }
            }
            self.cursor.advance();
        }
    }

    fn record(&mut self, kind: ParseErrorKind, span: Option<Span>) {
        let error = ParseError { kind, span };
        trace!("syntax error: {error}");
        self.errors.push(error);
    }
}

fn lexeme(token: Option<&Token>) -> Option<&str> {
    token.map(|t| t.text.as_str())
}
