//! FILENAME: parser/src/parser.rs
//! PURPOSE: Flat builder that converts a stream of Tokens into an
//! operand/operator chain, then hands the chain to the treeifier.
//! CONTEXT: This is the second stage of the compilation pipeline. The chain
//! strictly alternates operand/operator; parenthesized runs recurse through
//! the same builder and come back as single SubExpression operands, so the
//! treeifier never sees a paren.
//!
//! GRAMMAR:
//!   equation --> chain
//!   chain    --> operand (OPERATOR operand)*
//!   operand  --> NUMBER | PARAM | FUNCTION | RAND
//!              | "(" chain? ")"
//!              | "-" operand
//!
//! Unary minus is rewritten as an implicit-zero subtraction: "-x" parses
//! as the single operand "0 - x".

use crate::ast::{BinaryOperator, ChainItem, Node};
use crate::grammar::Grammar;
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};
use crate::treeify::treeify;

/// Compile errors with descriptive messages.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// The flat builder. Walks a token slice once, resolving function
/// references against the grammar as it goes.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    grammar: &'a Grammar,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], grammar: &'a Grammar) -> Self {
        Parser {
            tokens,
            pos: 0,
            grammar,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Builds one alternating chain. Inside parens the chain ends at the
    /// matching close paren (which is consumed); at the top level it ends
    /// with the token stream.
    pub fn parse_chain(&mut self, in_subexpression: bool) -> ParseResult<Vec<ChainItem>> {
        let mut chain = Vec::new();

        loop {
            chain.push(ChainItem::Operand(self.parse_operand()?));

            match self.peek() {
                None => {
                    if in_subexpression {
                        return Err(ParseError::new("missing a closing parenthesis"));
                    }
                    return Ok(chain);
                }
                Some(token) if token.kind == TokenKind::CloseParen => {
                    if in_subexpression {
                        self.advance();
                        return Ok(chain);
                    }
                    return Err(ParseError::new("unmatched closing parenthesis"));
                }
                Some(_) => {
                    chain.push(ChainItem::Operator(self.parse_operator()?));
                }
            }
        }
    }

    /// Parses a single operand: a value leaf, a parenthesized
    /// subexpression, or a unary minus folded into an implicit-zero
    /// subtraction.
    fn parse_operand(&mut self) -> ParseResult<Node> {
        let token = self
            .advance()
            .ok_or_else(|| ParseError::new("expected a value, found the end of the equation"))?;

        match token.kind {
            TokenKind::Number => {
                let value: f64 = token.text.parse().map_err(|_| {
                    ParseError::new(format!("could not parse {:?} into a number", token.text))
                })?;
                Ok(Node::Literal(value))
            }
            TokenKind::Param => {
                let index: u8 = token.text.parse().map_err(|_| {
                    ParseError::new(format!(
                        "could not parse {:?} into a parameter index",
                        token.text
                    ))
                })?;
                if !(1..=9).contains(&index) {
                    return Err(ParseError::new(format!(
                        "parameter index must be between 1 and 9, got {}",
                        index
                    )));
                }
                Ok(Node::Param(index))
            }
            TokenKind::Function => match self.grammar.resolve(&token.text) {
                // Compile-time resolution: the node keeps the callback it
                // was bound to, even if the grammar changes afterwards.
                Some(callback) => Ok(Node::Function {
                    name: token.text.clone(),
                    callback,
                }),
                // The reserved tier scalar, unless the host registered a
                // "tier" function of its own.
                None if token.text == "tier" => Ok(Node::Tier),
                None => Err(ParseError::new(format!(
                    "unknown function call: ${}",
                    token.text
                ))),
            },
            TokenKind::Rand => Ok(Node::Rand),
            TokenKind::OpenParen => self.parse_subexpression(),
            TokenKind::Operator if token.text == "-" => {
                // Unary minus: fold "0 - operand" into a single operand so
                // the chain keeps alternating and the negation binds
                // tighter than any surrounding operator.
                let operand = self.parse_operand()?;
                Ok(Node::Operator {
                    op: BinaryOperator::Subtract,
                    left: Box::new(Node::Literal(0.0)),
                    right: Box::new(operand),
                })
            }
            TokenKind::Operator => Err(ParseError::new(format!(
                "expected a value, found the operator {:?}",
                token.text
            ))),
            TokenKind::CloseParen => Err(ParseError::new(
                "expected a value, found a closing parenthesis",
            )),
        }
    }

    /// Parses the run between an already-consumed '(' and its matching ')'.
    fn parse_subexpression(&mut self) -> ParseResult<Node> {
        // "()" evaluates to zero rather than being rejected.
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::CloseParen {
                self.advance();
                return Ok(Node::SubExpression(Box::new(Node::Literal(0.0))));
            }
        }

        let chain = self.parse_chain(true)?;
        Ok(Node::SubExpression(Box::new(treeify(chain))))
    }

    /// Parses a single binary operator token.
    fn parse_operator(&mut self) -> ParseResult<BinaryOperator> {
        let token = self.advance().ok_or_else(|| {
            ParseError::new("expected an operator, found the end of the equation")
        })?;

        if token.kind != TokenKind::Operator {
            return Err(ParseError::new(format!(
                "expected an operator, found the {:?} token {:?}",
                token.kind, token.text
            )));
        }

        let mut chars = token.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => BinaryOperator::from_char(ch)
                .ok_or_else(|| ParseError::new(format!("invalid operator text: {}", ch))),
            _ => Err(ParseError::new(format!(
                "operator text can only be one character, was given {:?}",
                token.text
            ))),
        }
    }
}

/// Compiles equation text against a grammar. `Ok(None)` means the text
/// held no tokens at all (an empty equation).
pub fn parse(input: &str, grammar: &Grammar) -> ParseResult<Option<Node>> {
    let tokens = tokenize(input)?;
    parse_tokens(&tokens, grammar)
}

/// Compiles an already-lexed token list against a grammar.
pub fn parse_tokens(tokens: &[Token], grammar: &Grammar) -> ParseResult<Option<Node>> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut parser = Parser::new(tokens, grammar);
    let chain = parser.parse_chain(false)?;
    Ok(Some(treeify(chain)))
}
