use std::fmt;

/// Source location for error reporting (1-based, columns in characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Line (`// ...`) or block (`/* ... */`) comment.
    Comment,
    /// Double-quoted string or single-quoted character literal.
    StringOrCharLiteral,
    /// Integer or floating-point constant, including hex/octal forms.
    Number,
    /// One of the reserved words in [`KEYWORDS`].
    Keyword,
    /// Name that is not a keyword.
    Identifier,
    /// Arithmetic, assignment, logical, bitwise, comparison or ternary operator.
    Operator,
    /// One of `{ } ( ) [ ] , . ;`.
    Separator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Comment => "Comment",
            Self::StringOrCharLiteral => "StringOrCharLiteral",
            Self::Number => "Number",
            Self::Keyword => "Keyword",
            Self::Identifier => "Identifier",
            Self::Operator => "Operator",
            Self::Separator => "Separator",
        };
        f.write_str(name)
    }
}

/// The closed keyword set.
pub const KEYWORDS: &[&str] = &[
    "int", "float", "char", "if", "else", "while", "for", "return", "void", "struct", "typedef",
    "break", "continue", "double", "long", "short", "unsigned", "signed", "const", "static",
    "enum", "do", "switch", "case", "default", "sizeof", "goto", "union", "volatile", "register",
    "extern", "auto",
];

/// Keywords that can start a declaration or a function definition.
pub const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "char", "double", "long", "short", "unsigned", "signed", "void",
];

/// A single accepted token with its sequence number, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 1-based sequence number; ids of one token stream are contiguous.
    pub id: usize,
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// True when the token has the given kind and exact lexeme.
    #[must_use]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.is(TokenKind::Operator, op)
    }

    #[must_use]
    pub fn is_separator(&self, sep: &str) -> bool {
        self.is(TokenKind::Separator, sep)
    }

    /// True for keywords that name a type (`int`, `char`, `void`, ...).
    #[must_use]
    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&self.text.as_str())
    }

    /// Short human-readable description used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} '{}'", self.kind, self.text)
    }
}
