use std::fmt;

use log::debug;

use crate::token::{KEYWORDS, Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character '{ch}'")
            }
        }
    }
}

/// Error produced during lexing. One per unrecognized character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.column
    }

    /// The character the scanner could not classify.
    #[must_use]
    pub const fn offending_char(&self) -> char {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(ch) => ch,
        }
    }

    /// The message without the position suffix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Output of a tokenize pass: accepted tokens and lexical errors, both in
/// source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Tokenized {
    /// True when no character was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenize C source text.
///
/// Never fails: every unrecognized character is recorded as a
/// [`LexError`] and scanning resumes at the next character.
#[must_use]
pub fn tokenize(input: &str) -> Tokenized {
    Lexer::new(input).tokenize()
}

/// Maps character offsets to 1-based line/column positions.
///
/// Built once per input from the offsets that follow each `\n`.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            input
                .chars()
                .enumerate()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// Position of the character at `offset`.
    #[must_use]
    pub fn locate(&self, offset: usize) -> Span {
        // starts[0] == 0, so at least one start is <= offset
        let line = self.starts.partition_point(|&start| start <= offset);
        Span {
            line,
            column: offset - self.starts[line - 1] + 1,
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[derive(Debug, Clone, Copy)]
enum Class {
    Emit(TokenKind),
    Whitespace,
}

/// Returns the end offset of a match starting at the given offset.
type Matcher = fn(&[char], usize) -> Option<usize>;

/// Classification order. The first rule that matches wins.
const RULES: &[(Class, Matcher)] = &[
    (Class::Emit(TokenKind::Comment), match_comment),
    (Class::Emit(TokenKind::StringOrCharLiteral), match_quoted),
    (Class::Emit(TokenKind::Number), match_number),
    (Class::Emit(TokenKind::Keyword), match_keyword),
    (Class::Emit(TokenKind::Identifier), match_identifier),
    (Class::Emit(TokenKind::Operator), match_operator),
    (Class::Emit(TokenKind::Separator), match_separator),
    (Class::Whitespace, match_whitespace),
];

/// Longer operators precede their prefixes.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "++", "--", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "<<", ">>", "=", "?", ":", "+", "-", "*", "/", "%", "<", ">", "!", "&",
    "|", "^", "~",
];

const SEPARATORS: &str = "{}()[],.;";

struct Lexer {
    chars: Vec<char>,
    lines: LineIndex,
    pos: usize,
    next_id: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            lines: LineIndex::new(input),
            pos: 0,
            next_id: 1,
        }
    }

    fn tokenize(mut self) -> Tokenized {
        let mut out = Tokenized::default();

        while self.pos < self.chars.len() {
            match self.classify() {
                Some((Class::Whitespace, end)) => {
                    self.pos = end;
                }
                Some((Class::Emit(kind), end)) => {
                    let token = self.make_token(kind, end);
                    out.tokens.push(token);
                    self.pos = end;
                }
                None => {
                    out.errors.push(LexError {
                        kind: LexErrorKind::UnexpectedCharacter(self.chars[self.pos]),
                        span: self.lines.locate(self.pos),
                    });
                    self.pos += 1;
                }
            }
        }

        debug!(
            "tokenized {} chars over {} lines: {} tokens, {} lexical errors",
            self.chars.len(),
            self.lines.line_count(),
            out.tokens.len(),
            out.errors.len()
        );
        out
    }

    fn classify(&self) -> Option<(Class, usize)> {
        RULES.iter().find_map(|&(class, matcher)| {
            matcher(&self.chars, self.pos)
                .filter(|&end| end > self.pos)
                .map(|end| (class, end))
        })
    }

    fn make_token(&mut self, kind: TokenKind, end: usize) -> Token {
        let id = self.next_id;
        self.next_id += 1;
        Token {
            id,
            kind,
            text: self.chars[self.pos..end].iter().collect(),
            span: self.lines.locate(self.pos),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn boundary_before(chars: &[char], pos: usize) -> bool {
    pos == 0 || !is_word_char(chars[pos - 1])
}

fn boundary_after(chars: &[char], end: usize) -> bool {
    chars.get(end).is_none_or(|&ch| !is_word_char(ch))
}

fn skip_while(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while chars.get(end).is_some_and(|&ch| pred(ch)) {
        end += 1;
    }
    end
}

fn match_comment(chars: &[char], pos: usize) -> Option<usize> {
    if chars.get(pos) != Some(&'/') {
        return None;
    }
    match chars.get(pos + 1) {
        Some('/') => Some(skip_while(chars, pos + 2, |ch| ch != '\n')),
        Some('*') => {
            // non-greedy: the first `*/` closes the comment
            let mut i = pos + 2;
            while i + 1 < chars.len() {
                if chars[i] == '*' && chars[i + 1] == '/' {
                    return Some(i + 2);
                }
                i += 1;
            }
            None
        }
        _ => None,
    }
}

fn match_quoted(chars: &[char], pos: usize) -> Option<usize> {
    match *chars.get(pos)? {
        '"' => match_string_body(chars, pos + 1),
        '\'' => match_char_body(chars, pos + 1),
        _ => None,
    }
}

/// Escape sequence `\x` where `x` is anything but a newline.
fn escape_end(chars: &[char], pos: usize) -> Option<usize> {
    match chars.get(pos + 1) {
        Some(&ch) if ch != '\n' => Some(pos + 2),
        _ => None,
    }
}

fn match_string_body(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    loop {
        match *chars.get(i)? {
            '"' => return Some(i + 1),
            '\\' => i = escape_end(chars, i)?,
            _ => i += 1,
        }
    }
}

fn match_char_body(chars: &[char], start: usize) -> Option<usize> {
    let close = match *chars.get(start)? {
        '\\' => escape_end(chars, start)?,
        '\'' => return None,
        _ => start + 1,
    };
    (chars.get(close) == Some(&'\'')).then_some(close + 1)
}

fn is_int_suffix(ch: char) -> bool {
    matches!(ch, 'u' | 'U' | 'l' | 'L')
}

fn match_number(chars: &[char], pos: usize) -> Option<usize> {
    if !chars.get(pos)?.is_ascii_digit() || !boundary_before(chars, pos) {
        return None;
    }

    // A candidate body is accepted once its integer suffix ends on a word
    // boundary; otherwise the next shorter form is tried.
    let accept = |body_end: usize| {
        let end = skip_while(chars, body_end, is_int_suffix);
        boundary_after(chars, end).then_some(end)
    };

    if chars[pos] == '0' {
        if matches!(chars.get(pos + 1), Some('x' | 'X')) {
            let end = skip_while(chars, pos + 2, |ch| ch.is_ascii_hexdigit());
            if let Some(end) = (end > pos + 2).then(|| accept(end)).flatten() {
                return Some(end);
            }
        }
        let end = skip_while(chars, pos + 1, |ch| ('0'..='7').contains(&ch));
        if let Some(end) = (end > pos + 1).then(|| accept(end)).flatten() {
            return Some(end);
        }
    }

    let int_end = skip_while(chars, pos, |ch| ch.is_ascii_digit());
    let frac_end = (chars.get(int_end) == Some(&'.')
        && chars.get(int_end + 1).is_some_and(char::is_ascii_digit))
    .then(|| skip_while(chars, int_end + 1, |ch| ch.is_ascii_digit()));

    for base in frac_end.into_iter().chain(Some(int_end)) {
        if let Some(end) = match_exponent(chars, base).and_then(accept) {
            return Some(end);
        }
        if let Some(end) = accept(base) {
            return Some(end);
        }
    }
    None
}

fn match_exponent(chars: &[char], pos: usize) -> Option<usize> {
    if !matches!(chars.get(pos), Some('e' | 'E')) {
        return None;
    }
    let mut digits = pos + 1;
    if matches!(chars.get(digits), Some('+' | '-')) {
        digits += 1;
    }
    let end = skip_while(chars, digits, |ch| ch.is_ascii_digit());
    (end > digits).then_some(end)
}

fn match_word(chars: &[char], pos: usize) -> Option<usize> {
    let first = *chars.get(pos)?;
    if !(first.is_ascii_alphabetic() || first == '_') || !boundary_before(chars, pos) {
        return None;
    }
    let end = skip_while(chars, pos + 1, |ch| ch.is_ascii_alphanumeric() || ch == '_');
    boundary_after(chars, end).then_some(end)
}

fn is_keyword(chars: &[char]) -> bool {
    let word: String = chars.iter().collect();
    KEYWORDS.contains(&word.as_str())
}

fn match_keyword(chars: &[char], pos: usize) -> Option<usize> {
    match_word(chars, pos).filter(|&end| is_keyword(&chars[pos..end]))
}

fn match_identifier(chars: &[char], pos: usize) -> Option<usize> {
    match_word(chars, pos).filter(|&end| !is_keyword(&chars[pos..end]))
}

fn match_operator(chars: &[char], pos: usize) -> Option<usize> {
    OPERATORS.iter().find_map(|op| {
        let len = op.chars().count();
        op.chars()
            .enumerate()
            .all(|(i, ch)| chars.get(pos + i) == Some(&ch))
            .then_some(pos + len)
    })
}

fn match_separator(chars: &[char], pos: usize) -> Option<usize> {
    chars
        .get(pos)
        .filter(|&&ch| SEPARATORS.contains(ch))
        .map(|_| pos + 1)
}

/// Unicode whitespace plus the ASCII separators U+001C..U+001F.
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

fn match_whitespace(chars: &[char], pos: usize) -> Option<usize> {
    let end = skip_while(chars, pos, is_space);
    (end > pos).then_some(end)
}
