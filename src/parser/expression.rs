//! Expression grammar, lowest precedence first:
//!
//! ternary → `||` → `&&` → `|` → `^` → `&` → `== !=` → `< > <= >=`
//! → `+ -` → `* / %` → unary → primary.

use super::{ParseErrorKind, Parser};
use crate::ast::{AstNode, NodeKind};
use crate::token::{Token, TokenKind};

fn binary(kind: NodeKind, left: AstNode, operator: &str, right: AstNode) -> AstNode {
    AstNode::branch(
        kind,
        vec![left, AstNode::leaf(NodeKind::Operator, operator), right],
    )
}

fn is_increment(token: &Token) -> bool {
    token.is_operator("++") || token.is_operator("--")
}

impl<'a> Parser<'a> {
    pub(super) fn parse_expression(&mut self) -> AstNode {
        self.parse_ternary()
    }

    /// `cond ? a : b`, right-associative.
    fn parse_ternary(&mut self) -> AstNode {
        let condition = self.parse_logical_or();
        if !self.cursor.check(TokenKind::Operator, "?") {
            return condition;
        }
        self.cursor.advance();

        self.nested(|parser| {
            let if_true = parser.parse_expression();
            parser.expect(TokenKind::Operator, Some(":"));
            let if_false = parser.parse_ternary();
            AstNode::branch(NodeKind::Ternary, vec![condition, if_true, if_false])
        })
    }

    fn parse_logical_or(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::LogicalOr, &["||"], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::LogicalAnd, &["&&"], Self::parse_bitwise_or)
    }

    fn parse_bitwise_or(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::BitwiseOr, &["|"], Self::parse_bitwise_xor)
    }

    fn parse_bitwise_xor(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::BitwiseXor, &["^"], Self::parse_bitwise_and)
    }

    fn parse_bitwise_and(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::BitwiseAnd, &["&"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::Binary, &["==", "!="], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> AstNode {
        self.parse_left_assoc(
            NodeKind::Binary,
            &["<", ">", "<=", ">="],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::Binary, &["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> AstNode {
        self.parse_left_assoc(NodeKind::Binary, &["*", "/", "%"], Self::parse_unary)
    }

    fn parse_left_assoc(
        &mut self,
        kind: NodeKind,
        operators: &[&str],
        operand: fn(&mut Self) -> AstNode,
    ) -> AstNode {
        let mut left = operand(self);
        while let Some(operator) = self.take_binary_operator(operators) {
            let right = operand(self);
            left = binary(kind, left, &operator.text, right);
        }
        left
    }

    fn take_binary_operator(&mut self, operators: &[&str]) -> Option<&'a Token> {
        let token = self
            .cursor
            .current()
            .filter(|t| t.kind == TokenKind::Operator && operators.contains(&t.text.as_str()))?;

        // `| |` and `& &` are left for the logical levels
        if matches!(token.text.as_str(), "|" | "&")
            && self.cursor.check_at(1, TokenKind::Operator, &token.text)
        {
            return None;
        }

        self.cursor.advance();
        Some(token)
    }

    fn parse_unary(&mut self) -> AstNode {
        let Some(token) = self
            .cursor
            .current()
            .filter(|t| t.kind == TokenKind::Operator)
        else {
            return self.parse_primary();
        };

        match token.text.as_str() {
            "++" | "--" => self.parse_increment_decrement(token),
            "*" | "&" | "+" | "-" | "!" | "~" => {
                self.cursor.advance();
                let operand = self.nested(Self::parse_unary);
                AstNode::branch(
                    NodeKind::Unary,
                    vec![AstNode::leaf(NodeKind::Operator, token.text.as_str()), operand],
                )
            }
            _ => self.parse_primary(),
        }
    }

    /// `++`/`--` reached at the unary level.
    ///
    /// Prefix when an identifier (or `(` identifier) follows. Postfix when
    /// the token before it is an identifier: the cursor steps back and the
    /// identifier is re-read together with the operator. Anything else is
    /// reported and skipped.
    fn parse_increment_decrement(&mut self, operator: &'a Token) -> AstNode {
        let operand_follows = self
            .cursor
            .peek(1)
            .is_some_and(|t| t.kind == TokenKind::Identifier)
            || (self.cursor.check_at(1, TokenKind::Separator, "(")
                && self
                    .cursor
                    .peek(2)
                    .is_some_and(|t| t.kind == TokenKind::Identifier));

        if operand_follows {
            self.cursor.advance();
            let operand = self.parse_primary();
            return AstNode::branch(
                NodeKind::PrefixIncDec,
                vec![
                    AstNode::leaf(NodeKind::Operator, operator.text.as_str()),
                    operand,
                ],
            );
        }

        if self
            .cursor
            .previous()
            .is_some_and(|t| t.kind == TokenKind::Identifier)
        {
            self.cursor.step_back();
            return self.parse_primary();
        }

        self.record(
            ParseErrorKind::MisplacedIncrement {
                operator: operator.text.clone(),
            },
            Some(operator.span),
        );
        self.cursor.advance();
        AstNode::error()
    }

    fn parse_primary(&mut self) -> AstNode {
        let Some(token) = self.cursor.current() else {
            self.record(ParseErrorKind::ExpectedExpression, None);
            return AstNode::error();
        };

        match token.kind {
            TokenKind::Number => {
                self.cursor.advance();
                AstNode::leaf(NodeKind::Number, token.text.as_str())
            }
            TokenKind::StringOrCharLiteral => {
                self.cursor.advance();
                AstNode::leaf(NodeKind::StringLiteral, token.text.as_str())
            }
            TokenKind::Identifier => {
                if self.cursor.check_at(1, TokenKind::Separator, "(") {
                    return self.nested(Self::parse_function_call);
                }
                self.cursor.advance();
                let identifier = AstNode::leaf(NodeKind::Identifier, token.text.as_str());

                match self.cursor.current().filter(|t| is_increment(t)) {
                    Some(operator) => {
                        self.cursor.advance();
                        AstNode::branch(
                            NodeKind::PostfixIncDec,
                            vec![
                                identifier,
                                AstNode::leaf(NodeKind::Operator, operator.text.as_str()),
                            ],
                        )
                    }
                    None => identifier,
                }
            }
            TokenKind::Separator if token.text == "(" => self.nested(|parser| {
                parser.cursor.advance();
                let inner = parser.parse_expression();
                parser.expect_separator(")");
                inner
            }),
            _ => {
                self.record(
                    ParseErrorKind::InvalidExpression {
                        found: token.describe(),
                    },
                    Some(token.span),
                );
                self.cursor.advance();
                AstNode::error()
            }
        }
    }

    /// `name(arg, ...)`; the cursor is on `name` and `(` follows.
    fn parse_function_call(&mut self) -> AstNode {
        let name = self.expect(TokenKind::Identifier, None);
        self.expect_separator("(");

        let mut arguments = AstNode::new(NodeKind::Arguments);
        while self
            .cursor
            .current()
            .is_some_and(|t| !t.is_separator(")") && !t.is_separator(";"))
        {
            arguments.push(self.parse_expression());
            if self.cursor.check(TokenKind::Separator, ",") {
                self.cursor.advance();
            }
        }
        self.expect_separator(")");

        AstNode::branch(
            NodeKind::FunctionCall,
            vec![
                AstNode::new(NodeKind::FunctionName)
                    .with_optional_value(name.map(|t| t.text.as_str())),
                arguments,
            ],
        )
    }
}
