use std::fmt;

/// Tag of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root; children are function definitions and, in tolerant mode,
    /// top-level statements.
    Program,
    /// `[ReturnType, FunctionName, Parameters, Block]`.
    Function,
    ReturnType,
    FunctionName,
    Parameters,
    /// `[Type, Pointer*, Identifier]`.
    Parameter,
    Type,
    Identifier,
    Pointer,
    /// `[Type, Pointer*, Identifier, ArrayDimensions?, Initializer?]`.
    Declaration,
    ArrayDimensions,
    /// Value is the constant size, absent for `[]`.
    ArraySize,
    Initializer,
    Block,
    EmptyStatement,
    Comment,
    /// `[target, Operator, value]`.
    Assignment,
    Operator,
    /// `[condition, then, else | EmptyElse]`.
    If,
    EmptyElse,
    /// `[condition, body]`.
    While,
    /// `[body, condition]`.
    DoWhile,
    /// `[init | EmptyForInit, condition | EmptyForCondition, increment | EmptyForIncrement, body]`.
    For,
    EmptyForInit,
    EmptyForCondition,
    EmptyForIncrement,
    /// Zero or one child.
    Return,
    Break,
    Continue,
    /// `[condition, if_true, if_false]`.
    Ternary,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    /// Equality, relational, additive and multiplicative operations.
    Binary,
    /// `[Operator, operand]`.
    Unary,
    /// `[Operator, operand]`.
    PrefixIncDec,
    /// `[operand, Operator]`.
    PostfixIncDec,
    Number,
    StringLiteral,
    /// `[FunctionName, Arguments]`.
    FunctionCall,
    Arguments,
    /// Placeholder left where a malformed expression or statement was.
    Error,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A node of the syntax tree. Each node exclusively owns its children,
/// stored in left-to-right source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub value: Option<String>,
    pub children: Vec<Self>,
}

impl AstNode {
    /// Create a node with no value and no children.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: None,
            children: Vec::new(),
        }
    }

    /// Create a childless node carrying a literal value.
    #[must_use]
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self::new(kind).with_value(value)
    }

    /// Create a node with the given children.
    #[must_use]
    pub const fn branch(kind: NodeKind, children: Vec<Self>) -> Self {
        Self {
            kind,
            value: None,
            children,
        }
    }

    /// Set the literal value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the value from an optional source, e.g. a token that may be missing.
    #[must_use]
    pub fn with_optional_value(mut self, value: Option<&str>) -> Self {
        self.value = value.map(str::to_string);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// The error placeholder node.
    #[must_use]
    pub fn error() -> Self {
        Self::leaf(NodeKind::Error, "ERROR")
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// First direct child with the given kind.
    #[must_use]
    pub fn find(&self, kind: NodeKind) -> Option<&Self> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Pre-order traversal of this node and all descendants.
    pub fn walk(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Number of nodes in the subtree rooted here.
    #[must_use]
    pub fn size(&self) -> usize {
        self.walk().count()
    }
}

impl Drop for AstNode {
    // Left-leaning operator chains are not bounded by the parser's nesting
    // limit, so children are released without recursion.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::formatter::format_ast(self))
    }
}
