use crate::source::*;
use std::error::Error;
use std::fmt;

/// Describes an error that occurred in lexing or parsing.
#[derive(Clone)]
pub struct ParseError {
    /// The error message. This is a string instead of an enum because the
    /// messages can be highly specific.
    pub message: String,

    /// The span in the source the error occurred in.
    pub span: Span,

    /// The source file the error occurred in.
    pub file: SourceFile,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, file: SourceFile) -> Self {
        Self {
            message: message.into(),
            span,
            file,
        }
    }

    /// Get the position the error starts at.
    pub fn pos(&self) -> Position {
        self.span.start
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}\n{}:{}:{}",
            self.message,
            self.file.name(),
            self.span.start.line,
            self.span.start.column,
        )?;

        let source = self.file.source();
        let line_start = source[..self.span.start.offset]
            .rfind('\n')
            .map(|offset| offset + 1)
            .unwrap_or(0);
        let line_end = source[self.span.start.offset..]
            .find('\n')
            .map(|offset| offset + self.span.start.offset)
            .unwrap_or_else(|| source.len());
        let line = source[line_start..line_end].trim_end_matches('\r');

        // Underline the span, or just its first line if it spans several.
        let width = if self.span.end.line == self.span.start.line {
            self.span.end.column.saturating_sub(self.span.start.column)
        } else {
            source[self.span.start.offset..line_end].trim_end_matches('\r').chars().count()
        };

        writeln!(f, "| {}", line)?;
        writeln!(f, "| {}{}", " ".repeat(self.span.start.column.saturating_sub(1)), "^".repeat(width.max(1)))?;

        Ok(())
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Error for ParseError {}
