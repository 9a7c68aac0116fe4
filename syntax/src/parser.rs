//! The language parser.
//!
//! This is a handwritten, recursive descent parser. This is done both for speed
//! and simplicity, since the language syntax is tiny:
//!
//! ```text
//! program  := fragment*
//! fragment := TEXT | "${" expr "}"
//! expr     := STRING | IDENTIFIER | IDENTIFIER "(" arglist? ")"
//! arglist  := expr ("," expr)*
//! ```
//!
//! A `STRING` is a quoted string inside an expression, and is itself parsed as
//! a program.
use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::source::*;
use crate::tokens::*;
use log::debug;

/// The deepest expressions may be nested, counting both call arguments and
/// quoted strings.
pub const MAX_DEPTH: usize = 128;

/// Parse the given source text into a syntax tree.
pub fn parse(file: impl Into<SourceFile>) -> Result<Node, ParseError> {
    let file = file.into();
    let tokens = tokenize(&file)?;

    Parser::new(&file, tokens).parse_file()
}

struct Parser<'a> {
    file: &'a SourceFile,
    tokens: Vec<TokenInfo>,
    cursor: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(file: &'a SourceFile, tokens: Vec<TokenInfo>) -> Self {
        debug_assert_eq!(tokens.last().map(|info| &info.token), Some(&Token::EndOfFile));

        Self {
            file,
            tokens,
            cursor: 0,
            depth: 0,
        }
    }

    /// Get the current token.
    fn current_token(&self) -> &TokenInfo {
        &self.tokens[self.cursor]
    }

    /// Consume the current token, moving to the next token in the file.
    ///
    /// The final end of file token is never moved past.
    fn consume_token(&mut self) -> TokenInfo {
        let current = self.tokens[self.cursor].clone();

        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }

        current
    }

    /// If the current token matches the given token, consume it, otherwise raise an error.
    fn expect_token(&mut self, token: Token) -> Result<TokenInfo, ParseError> {
        let actual = self.consume_token();

        if actual.token == token {
            Ok(actual)
        } else {
            Err(self.error_at(
                format!("expected token: {:?}, instead got {:?}", token, actual.token),
                actual.span,
            ))
        }
    }

    fn parse_file(&mut self) -> Result<Node, ParseError> {
        let start = self.current_token().span.start;
        let program = self.parse_program(&Token::EndOfFile, start)?;
        self.expect_token(Token::EndOfFile)?;

        Ok(program)
    }

    /// Parse a sequence of fragments up to the given terminating token, without consuming it.
    fn parse_program(&mut self, terminator: &Token, start: Position) -> Result<Node, ParseError> {
        let mut fragments = Vec::new();

        loop {
            match &self.current_token().token {
                token if token == terminator => break,
                Token::Text(_) => fragments.push(self.parse_text()?),
                Token::ExprOpen => fragments.push(self.parse_interpolation()?),
                token => return Err(self.error(format!("unexpected token: {:?}", token))),
            }
        }

        Ok(Node::concat(fragments, start))
    }

    fn parse_text(&mut self) -> Result<Node, ParseError> {
        let info = self.consume_token();

        match info.token {
            Token::Text(value) => Ok(Node::literal(value, info.span.start)),
            token => Err(self.error_at(format!("expected text, instead got {:?}", token), info.span)),
        }
    }

    fn parse_interpolation(&mut self) -> Result<Node, ParseError> {
        self.expect_token(Token::ExprOpen)?;
        let expr = self.parse_expression()?;
        self.expect_token(Token::ExprClose)?;

        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        debug!("parse expr, starting at {:?}", self.current_token().token);

        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("expression nested too deeply, the limit is {} levels", MAX_DEPTH)));
        }

        self.depth += 1;
        let result = self.parse_expression_inner();
        self.depth -= 1;

        result
    }

    fn parse_expression_inner(&mut self) -> Result<Node, ParseError> {
        match &self.current_token().token {
            Token::QuoteOpen => self.parse_quoted_string(),
            Token::Identifier(_) => self.parse_identifier_expr(),
            Token::ExprOpen => Err(self.error("unexpected '${' in expression, nested interpolations must be quoted")),
            token => Err(self.error(format!("expected expression, instead got {:?}", token))),
        }
    }

    fn parse_quoted_string(&mut self) -> Result<Node, ParseError> {
        let open = self.expect_token(Token::QuoteOpen)?;
        let program = self.parse_program(&Token::QuoteClose, open.span.start)?;
        self.expect_token(Token::QuoteClose)?;

        Ok(program)
    }

    fn parse_identifier_expr(&mut self) -> Result<Node, ParseError> {
        let info = self.consume_token();
        let name = match info.token {
            Token::Identifier(name) => name,
            token => return Err(self.error_at(format!("expected identifier, instead got {:?}", token), info.span)),
        };

        if self.current_token().token == Token::LeftParen {
            Ok(Node::Call {
                func: name,
                args: self.parse_args()?,
                pos: info.span.start,
            })
        } else {
            Ok(Node::VariableAccess {
                name,
                pos: info.span.start,
            })
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect_token(Token::LeftParen)?;
        let mut args = Vec::new();

        if self.current_token().token == Token::RightParen {
            self.consume_token();
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            let next = self.consume_token();
            match next.token {
                Token::Comma => continue,
                Token::RightParen => return Ok(args),
                token => return Err(self.error_at(
                    format!("expected either ',' or ')', instead got {:?}", token),
                    next.span,
                )),
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(message, self.current_token().span)
    }

    fn error_at(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::new(message, span, self.file.clone())
    }
}
