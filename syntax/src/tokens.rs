use crate::source::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct TokenInfo {
    pub token: Token,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A run of literal text, either at the top level or inside a nested string.
    Text(String),
    /// Opens an interpolated expression, `${`.
    ExprOpen,
    /// Closes an interpolated expression, `}`.
    ExprClose,
    /// A double quote beginning a nested string inside an expression.
    QuoteOpen,
    /// A double quote ending a nested string.
    QuoteClose,
    /// A variable or function name, possibly dotted.
    Identifier(String),
    /// Opens a function argument list.
    LeftParen,
    /// Closes a function argument list.
    RightParen,
    /// Separates function arguments.
    Comma,
    /// Indicates the end of input has been reached and no more tokens will be produced.
    EndOfFile,
}
