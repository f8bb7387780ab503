//! Function definitions, declarations and statements.

use super::{ASSIGNMENT_OPERATORS, ParseErrorKind, Parser, lexeme};
use crate::ast::{AstNode, NodeKind};
use crate::token::{Token, TokenKind};

/// Tokens that may begin an expression statement.
fn starts_expression(token: &Token) -> bool {
    match token.kind {
        TokenKind::Identifier | TokenKind::Number | TokenKind::StringOrCharLiteral => true,
        TokenKind::Separator => token.text == "(",
        TokenKind::Operator => matches!(
            token.text.as_str(),
            "*" | "&" | "+" | "-" | "!" | "~" | "++" | "--"
        ),
        TokenKind::Comment | TokenKind::Keyword => false,
    }
}

impl Parser<'_> {
    /// `type *name(type name, ...) { ... }`
    pub(super) fn parse_function(&mut self) -> AstNode {
        let return_type = self.expect(TokenKind::Keyword, None);
        let mut return_node =
            AstNode::new(NodeKind::ReturnType).with_optional_value(lexeme(return_type));
        return_node.children.extend(self.parse_pointers());

        let name = self.expect(TokenKind::Identifier, None);
        self.expect_separator("(");
        let parameters = self.parse_parameters();
        self.expect_separator(")");
        let body = self.parse_block();

        AstNode::branch(
            NodeKind::Function,
            vec![
                return_node,
                AstNode::new(NodeKind::FunctionName).with_optional_value(lexeme(name)),
                parameters,
                body,
            ],
        )
    }

    fn parse_parameters(&mut self) -> AstNode {
        let mut parameters = AstNode::new(NodeKind::Parameters);

        // `(void)` declares no parameters
        if self.cursor.check(TokenKind::Keyword, "void")
            && self.cursor.check_at(1, TokenKind::Separator, ")")
        {
            self.cursor.advance();
            return parameters;
        }

        while self.cursor.current().is_some_and(|t| !t.is_separator(")")) {
            let start = self.cursor.position();

            let param_type = self.expect(TokenKind::Keyword, None);
            let mut parameter = AstNode::branch(
                NodeKind::Parameter,
                vec![AstNode::new(NodeKind::Type).with_optional_value(lexeme(param_type))],
            );
            parameter.children.extend(self.parse_pointers());
            let name = self.expect(TokenKind::Identifier, None);
            parameter.push(AstNode::new(NodeKind::Identifier).with_optional_value(lexeme(name)));

            if self.cursor.check(TokenKind::Separator, ",") {
                self.cursor.advance();
            }
            if self.cursor.position() == start {
                break;
            }
            parameters.push(parameter);
        }

        parameters
    }

    fn parse_pointers(&mut self) -> Vec<AstNode> {
        let mut pointers = Vec::new();
        while self.cursor.check(TokenKind::Operator, "*") {
            self.cursor.advance();
            pointers.push(AstNode::new(NodeKind::Pointer));
        }
        pointers
    }

    /// Parse one statement.
    ///
    /// Returns `None` without consuming anything when the current token
    /// cannot start a statement (an error is recorded) or at end of input.
    pub(super) fn parse_statement(&mut self) -> Option<AstNode> {
        let token = self.cursor.current()?;

        match token.kind {
            TokenKind::Comment => {
                self.cursor.advance();
                Some(AstNode::leaf(NodeKind::Comment, token.text.as_str()))
            }
            TokenKind::Keyword => self.parse_keyword_statement(token),
            TokenKind::Separator if token.text == "{" => Some(self.nested(Self::parse_block)),
            TokenKind::Separator if token.text == ";" => {
                self.cursor.advance();
                Some(AstNode::new(NodeKind::EmptyStatement))
            }
            _ if starts_expression(token) => Some(self.parse_expression_statement()),
            _ => {
                self.reject_statement(token);
                None
            }
        }
    }

    fn parse_keyword_statement(&mut self, token: &Token) -> Option<AstNode> {
        if token.is_type_keyword() {
            return Some(self.parse_declaration());
        }
        match token.text.as_str() {
            "if" => Some(self.parse_if()),
            "while" => Some(self.parse_while()),
            "do" => Some(self.parse_do_while()),
            "for" => Some(self.parse_for()),
            "return" => Some(self.parse_return()),
            "break" => Some(self.parse_jump(NodeKind::Break)),
            "continue" => Some(self.parse_jump(NodeKind::Continue)),
            _ => {
                self.reject_statement(token);
                None
            }
        }
    }

    fn reject_statement(&mut self, token: &Token) {
        self.record(
            ParseErrorKind::InvalidStatement {
                found: token.describe(),
            },
            Some(token.span),
        );
    }

    /// A statement that must be present, e.g. the body of a loop.
    ///
    /// Always yields a node; a bad token is skipped and replaced by an
    /// `Error` placeholder.
    fn parse_required_statement(&mut self) -> AstNode {
        if self.cursor.is_at_end() {
            self.record(ParseErrorKind::ExpectedStatement, None);
            return AstNode::error();
        }
        self.nested(|parser| {
            parser.parse_statement().unwrap_or_else(|| {
                parser.cursor.advance();
                AstNode::error()
            })
        })
    }

    pub(super) fn parse_block(&mut self) -> AstNode {
        self.expect_separator("{");

        let mut block = AstNode::new(NodeKind::Block);
        while self.cursor.current().is_some_and(|t| !t.is_separator("}")) {
            match self.parse_statement() {
                Some(stmt) => block.push(stmt),
                None => self.cursor.advance(),
            }
        }

        self.expect_separator("}");
        block
    }

    /// `type *name[N][] = init;`
    fn parse_declaration(&mut self) -> AstNode {
        let base_type = self.expect(TokenKind::Keyword, None);
        let mut declaration = AstNode::branch(
            NodeKind::Declaration,
            vec![AstNode::new(NodeKind::Type).with_optional_value(lexeme(base_type))],
        );
        declaration.children.extend(self.parse_pointers());

        let name = self.expect(TokenKind::Identifier, None);
        declaration.push(AstNode::new(NodeKind::Identifier).with_optional_value(lexeme(name)));

        if let Some(dimensions) = self.parse_array_dimensions() {
            declaration.push(dimensions);
        }

        if self.cursor.check(TokenKind::Operator, "=") {
            self.cursor.advance();
            let value = self.parse_expression();
            declaration.push(AstNode::branch(NodeKind::Initializer, vec![value]));
        }

        self.expect_separator(";");
        declaration
    }

    fn parse_array_dimensions(&mut self) -> Option<AstNode> {
        let mut dimensions = AstNode::new(NodeKind::ArrayDimensions);

        while self.cursor.check(TokenKind::Separator, "[") {
            self.cursor.advance();
            let size = self
                .cursor
                .current()
                .filter(|t| t.kind == TokenKind::Number);
            if size.is_some() {
                self.cursor.advance();
            }
            self.expect_separator("]");
            dimensions.push(AstNode::new(NodeKind::ArraySize).with_optional_value(lexeme(size)));
        }

        (!dimensions.children.is_empty()).then_some(dimensions)
    }

    fn parse_expression_statement(&mut self) -> AstNode {
        let expression = self.parse_expression();
        let statement = self.parse_assignment_tail(expression);
        self.expect_separator(";");
        statement
    }

    /// `target op value` when an assignment operator follows `target`.
    fn parse_assignment_tail(&mut self, target: AstNode) -> AstNode {
        let Some(operator) = self.cursor.current().filter(|t| {
            t.kind == TokenKind::Operator && ASSIGNMENT_OPERATORS.contains(&t.text.as_str())
        }) else {
            return target;
        };
        self.cursor.advance();

        let value = self.parse_expression();
        AstNode::branch(
            NodeKind::Assignment,
            vec![
                target,
                AstNode::leaf(NodeKind::Operator, operator.text.as_str()),
                value,
            ],
        )
    }

    /// `(condition)` as used by `if`, `while` and `do ... while`.
    fn parse_condition(&mut self) -> AstNode {
        self.expect_separator("(");
        let condition = self.parse_expression();
        self.expect_separator(")");
        condition
    }

    fn parse_if(&mut self) -> AstNode {
        self.cursor.advance();
        let condition = self.parse_condition();
        let then_branch = self.parse_required_statement();

        // binds to the innermost `if` still being parsed
        let else_branch = if self.cursor.check(TokenKind::Keyword, "else") {
            self.cursor.advance();
            self.parse_required_statement()
        } else {
            AstNode::new(NodeKind::EmptyElse)
        };

        AstNode::branch(NodeKind::If, vec![condition, then_branch, else_branch])
    }

    fn parse_while(&mut self) -> AstNode {
        self.cursor.advance();
        let condition = self.parse_condition();
        let body = self.parse_required_statement();
        AstNode::branch(NodeKind::While, vec![condition, body])
    }

    fn parse_do_while(&mut self) -> AstNode {
        self.cursor.advance();
        let body = self.parse_required_statement();
        self.expect(TokenKind::Keyword, Some("while"));
        let condition = self.parse_condition();
        self.expect_separator(";");
        AstNode::branch(NodeKind::DoWhile, vec![body, condition])
    }

    fn parse_for(&mut self) -> AstNode {
        self.cursor.advance();
        self.expect_separator("(");

        let init = match self.cursor.current() {
            Some(t) if t.is_type_keyword() => self.parse_declaration(),
            Some(t) if !t.is_separator(";") => self.parse_expression_statement(),
            _ => {
                self.expect_separator(";");
                AstNode::new(NodeKind::EmptyForInit)
            }
        };

        let condition = if self.cursor.current().is_some_and(|t| !t.is_separator(";")) {
            self.parse_expression()
        } else {
            AstNode::new(NodeKind::EmptyForCondition)
        };
        self.expect_separator(";");

        let increment = if self.cursor.current().is_some_and(|t| !t.is_separator(")")) {
            let expression = self.parse_expression();
            self.parse_assignment_tail(expression)
        } else {
            AstNode::new(NodeKind::EmptyForIncrement)
        };
        self.expect_separator(")");

        let body = self.parse_required_statement();
        AstNode::branch(NodeKind::For, vec![init, condition, increment, body])
    }

    fn parse_return(&mut self) -> AstNode {
        self.cursor.advance();
        let mut node = AstNode::new(NodeKind::Return);
        if self.cursor.current().is_some_and(|t| !t.is_separator(";")) {
            node.push(self.parse_expression());
        }
        self.expect_separator(";");
        node
    }

    /// `break;` and `continue;`
    fn parse_jump(&mut self, kind: NodeKind) -> AstNode {
        self.cursor.advance();
        self.expect_separator(";");
        AstNode::new(kind)
    }
}
