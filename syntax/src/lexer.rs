//! Splits interpolation source text into a stream of tokens.
use crate::error::ParseError;
use crate::source::*;
use crate::tokens::*;
use log::trace;

/// Possible "modes" a lexer can be in.
///
/// Interpolated text cannot be tokenized context-free: `${` and `"` only have a meaning in the right context. The lexer
/// keeps a stack of modes that it pushes and pops as expressions and nested strings open and close.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexerMode {
    /// Text mode: everything is literal text until `${`. The lexer starts and ends in this mode.
    Text,

    /// Expression mode: the lexer enters this mode after `${` and leaves it at the matching `}`.
    Expression,

    /// Quoted string mode: a double-quoted string nested inside of an expression. Behaves like text mode, but ends at
    /// the closing quote instead of at the end of input.
    QuotedString,
}

/// Tokenize an entire source file.
///
/// The returned tokens always end with a single [`Token::EndOfFile`].
pub fn tokenize(file: &SourceFile) -> Result<Vec<TokenInfo>, ParseError> {
    let mut lexer = Lexer::from(file);
    let mut tokens = Vec::new();

    loop {
        let info = lexer.lex()?;
        let done = info.token == Token::EndOfFile;

        tokens.push(info);

        if done {
            return Ok(tokens);
        }
    }
}

/// Tokenizes a file into a series of tokens.
pub struct Lexer<'a> {
    cursor: SourceCursor<'a>,
    modes: Vec<LexerMode>,
}

impl<'a> From<&'a SourceFile> for Lexer<'a> {
    fn from(file: &'a SourceFile) -> Self {
        Self {
            cursor: SourceCursor::from(file),
            modes: vec![LexerMode::Text],
        }
    }
}

impl<'a> Lexer<'a> {
    /// Get the file being lexed.
    #[inline]
    pub fn file(&self) -> &'a SourceFile {
        self.cursor.file()
    }

    /// Get the mode the next token will be lexed in.
    pub fn mode(&self) -> LexerMode {
        self.modes.last().copied().unwrap_or(LexerMode::Text)
    }

    /// Advance to the next token in the source.
    ///
    /// Once the end of the input is reached, every further call returns [`Token::EndOfFile`].
    pub fn lex(&mut self) -> Result<TokenInfo, ParseError> {
        self.cursor.mark();

        let token = match self.mode() {
            LexerMode::Text => self.lex_text()?,
            LexerMode::Expression => self.lex_expression()?,
            LexerMode::QuotedString => self.lex_quoted_string()?,
        };

        Ok(self.create_token(token))
    }

    fn create_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.cursor.span(), self.file().clone())
    }

    fn push_mode(&mut self, mode: LexerMode) {
        trace!("lexer entering {:?} mode at {}", mode, self.cursor.pos());
        self.modes.push(mode);
    }

    fn pop_mode(&mut self) {
        if self.modes.len() > 1 {
            let mode = self.modes.pop();
            trace!("lexer leaving {:?} mode at {}", mode, self.cursor.pos());
        }
    }

    /// Consume `${` if it is next in the input.
    fn eat_expr_open(&mut self) -> bool {
        if self.cursor.peek() == Some('$') && self.cursor.peek_second() == Some('{') {
            self.cursor.advance();
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn lex_text(&mut self) -> Result<Token, ParseError> {
        let mut text = String::new();

        loop {
            match self.cursor.peek() {
                Some('$') if self.cursor.peek_second() == Some('{') => break,
                Some(c) => {
                    self.cursor.advance();
                    text.push(c);
                },
                None => break,
            }
        }

        if !text.is_empty() {
            return Ok(Token::Text(text));
        }

        if self.eat_expr_open() {
            self.push_mode(LexerMode::Expression);
            return Ok(Token::ExprOpen);
        }

        Ok(Token::EndOfFile)
    }

    fn lex_quoted_string(&mut self) -> Result<Token, ParseError> {
        let mut text = String::new();

        loop {
            match self.cursor.peek() {
                Some('$') if self.cursor.peek_second() == Some('{') => break,
                Some('"') => break,

                // The only character escapes recognized are \" and \\, so for all other characters we just proceed as
                // normal.
                Some('\\') => {
                    self.cursor.advance();

                    match self.cursor.peek() {
                        Some(c @ '"') | Some(c @ '\\') => {
                            self.cursor.advance();
                            text.push(c);
                        },
                        _ => text.push('\\'),
                    }
                },

                Some(c) => {
                    self.cursor.advance();
                    text.push(c);
                },

                None => return Err(self.create_error("unexpected end of input, expecting end of string '\"'")),
            }
        }

        if !text.is_empty() {
            return Ok(Token::Text(text));
        }

        if self.eat_expr_open() {
            self.push_mode(LexerMode::Expression);
            return Ok(Token::ExprOpen);
        }

        // Only a closing quote can be left.
        self.cursor.advance();
        self.pop_mode();

        Ok(Token::QuoteClose)
    }

    fn lex_expression(&mut self) -> Result<Token, ParseError> {
        // Ignore whitespace between tokens.
        while let Some(c) = self.cursor.peek() {
            if !c.is_whitespace() {
                break;
            }

            self.cursor.advance();
        }

        self.cursor.mark();

        match self.cursor.advance() {
            Some('(') => Ok(Token::LeftParen),
            Some(')') => Ok(Token::RightParen),
            Some(',') => Ok(Token::Comma),

            Some('"') => {
                self.push_mode(LexerMode::QuotedString);
                Ok(Token::QuoteOpen)
            },

            Some('}') => {
                self.pop_mode();
                Ok(Token::ExprClose)
            },

            // An interpolation can only be nested inside of a quoted string.
            Some('$') if self.cursor.peek() == Some('{') => {
                self.cursor.advance();
                Err(self.create_error("unexpected '${' in expression, nested interpolations must be quoted"))
            },

            Some(c) if is_identifier_char(c) => Ok(self.lex_identifier(c)),

            Some(c) => Err(self.create_error(format!("unexpected character {:?} in expression", c))),

            None => Err(self.create_error("unexpected end of input, expecting '}'")),
        }
    }

    fn lex_identifier(&mut self, first: char) -> Token {
        let mut name = String::new();
        name.push(first);

        while let Some(c) = self.cursor.peek() {
            if !is_identifier_char(c) {
                break;
            }

            self.cursor.advance();
            name.push(c);
        }

        Token::Identifier(name)
    }

    fn create_token(&self, token: Token) -> TokenInfo {
        TokenInfo {
            token,
            span: self.cursor.span(),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    match c {
        '_' | '-' | '.' | '*' => true,
        c => c.is_alphanumeric(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_tokens {
        (
            $($source:expr => [
                $($token:expr,)*
            ];)*
        ) => {
            $({
                use $crate::tokens::Token::*;
                let file = SourceFile::from($source);
                let tokens = tokenize(&file).unwrap();
                let actual: Vec<Token> = tokens.into_iter().map(|info| info.token).collect();
                assert_eq!(actual, vec![$($token,)* EndOfFile]);
            })*
        };
    }

    fn lex_error(source: &str) -> ParseError {
        tokenize(&SourceFile::from(source)).unwrap_err()
    }

    #[test]
    fn test_plain_text() {
        assert_tokens! {
            "" => [];
            "foo" => [
                Text("foo".into()),
            ];
            "cost: $5 {not code} \"quoted\"" => [
                Text("cost: $5 {not code} \"quoted\"".into()),
            ];
        }
    }

    #[test]
    fn test_expressions() {
        assert_tokens! {
            "foo ${var.bar}" => [
                Text("foo ".into()),
                ExprOpen,
                Identifier("var.bar".into()),
                ExprClose,
            ];
            "${ foo( bar ,baz ) }!" => [
                ExprOpen,
                Identifier("foo".into()),
                LeftParen,
                Identifier("bar".into()),
                Comma,
                Identifier("baz".into()),
                RightParen,
                ExprClose,
                Text("!".into()),
            ];
            "${a}${b}" => [
                ExprOpen,
                Identifier("a".into()),
                ExprClose,
                ExprOpen,
                Identifier("b".into()),
                ExprClose,
            ];
        }
    }

    #[test]
    fn test_nested_strings() {
        assert_tokens! {
            r#"foo ${"bar ${baz}"}"# => [
                Text("foo ".into()),
                ExprOpen,
                QuoteOpen,
                Text("bar ".into()),
                ExprOpen,
                Identifier("baz".into()),
                ExprClose,
                QuoteClose,
                ExprClose,
            ];
            r#"${""}"# => [
                ExprOpen,
                QuoteOpen,
                QuoteClose,
                ExprClose,
            ];
            r#"${"say \"hi\" \\ \n}"}"# => [
                ExprOpen,
                QuoteOpen,
                Text("say \"hi\" \\ \\n}".into()),
                QuoteClose,
                ExprClose,
            ];
        }
    }

    #[test]
    fn test_token_spans() {
        let file = SourceFile::from("ab\n${x}");
        let tokens = tokenize(&file).unwrap();

        assert_eq!(tokens[0].span.start, Position { line: 1, column: 1, offset: 0 });
        assert_eq!(tokens[1].span.start, Position { line: 2, column: 1, offset: 3 });
        assert_eq!(tokens[2].span.start, Position { line: 2, column: 3, offset: 5 });
        assert_eq!(tokens[2].span.end, Position { line: 2, column: 4, offset: 6 });
    }

    #[test]
    fn test_bare_nested_expression_is_an_error() {
        assert!(lex_error("foo ${bar ${baz}}").message.contains("nested interpolations must be quoted"));
        assert!(lex_error("foo ${${baz}}").message.contains("nested interpolations must be quoted"));
        assert!(lex_error(r#"${"a ${b ${c}}"}"#).message.contains("nested interpolations must be quoted"));
    }

    #[test]
    fn test_unterminated_input() {
        assert!(lex_error("foo ${bar").message.contains("expecting '}'"));
        assert!(lex_error(r#"${"bar"#).message.contains("end of string"));
        assert!(lex_error(r#"${""#).message.contains("end of string"));
    }

    #[test]
    fn test_unexpected_character() {
        let error = lex_error("${foo + bar}");

        assert!(error.message.contains("'+'"));
        assert_eq!(error.pos(), Position { line: 1, column: 7, offset: 6 });
    }
}
