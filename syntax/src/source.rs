//! Abstractions over reading files and source code used in the parser.

use std::fmt;
use std::fs;
use std::io;
use std::iter::Peekable;
use std::path::Path;
use std::str::CharIndices;

/// A reference to a location in a source file. Useful for error messages.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// The line number. Begins at 1.
    pub line: usize,

    /// The column position in the current line, counted in characters. Begins at 1.
    pub column: usize,

    /// Byte offset from the beginning of the file.
    pub offset: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of characters in a source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The starting position.
    pub start: Position,

    /// The ending position.
    pub end: Position,
}

impl From<Position> for Span {
    fn from(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// Holds information about a source file being parsed in memory.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: Option<String>,
    buffer: String,
}

impl SourceFile {
    /// Create a new file map using an in-memory buffer.
    pub fn buffer(name: impl Into<Option<String>>, buffer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: buffer.into(),
        }
    }

    /// Create an in-memory file with the given name.
    pub fn named(name: impl Into<String>, buffer: impl Into<String>) -> Self {
        Self::buffer(Some(name.into()), buffer)
    }

    /// Open a file as a file map.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let name = path.file_name().map(|s| s.to_string_lossy().into_owned());

        fs::read_to_string(path).map(|string| Self::buffer(name, string))
    }

    /// Get the name of the file.
    pub fn name(&self) -> &str {
        self.name
            .as_ref()
            .map(String::as_str)
            .unwrap_or("<unknown>")
    }

    pub fn source(&self) -> &str {
        &self.buffer
    }

    /// Get the length of the file in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl From<&str> for SourceFile {
    fn from(source: &str) -> Self {
        Self::buffer(None, source)
    }
}

impl From<String> for SourceFile {
    fn from(source: String) -> Self {
        Self::buffer(None, source)
    }
}

/// A character cursor over a source file that keeps track of the current position.
pub(crate) struct SourceCursor<'a> {
    file: &'a SourceFile,
    chars: Peekable<CharIndices<'a>>,
    pos: Position,
    mark: Position,
}

impl<'a> From<&'a SourceFile> for SourceCursor<'a> {
    fn from(file: &'a SourceFile) -> Self {
        Self {
            file,
            chars: file.source().char_indices().peekable(),
            pos: Position::default(),
            mark: Position::default(),
        }
    }
}

impl<'a> SourceCursor<'a> {
    pub(crate) fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// Get the position of the next character to be read.
    pub(crate) fn pos(&self) -> Position {
        self.pos
    }

    /// Remember the current position as the start of the next span.
    pub(crate) fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Get the span from the last mark up to the current position.
    pub(crate) fn span(&self) -> Span {
        Span {
            start: self.mark,
            end: self.pos,
        }
    }

    pub(crate) fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peek at the character after the next one without consuming anything.
    pub(crate) fn peek_second(&self) -> Option<char> {
        self.file.source()[self.pos.offset..].chars().nth(1)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let (offset, c) = self.chars.next()?;

        self.pos.offset = offset + c.len_utf8();

        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }

        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_from_string() {
        let file = SourceFile::from("hello world");
        let mut cursor = SourceCursor::from(&file);

        for expected in "hello world".chars() {
            assert_eq!(cursor.advance(), Some(expected));
        }

        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.pos().offset, 11);
    }

    #[test]
    fn test_positions_track_lines_and_characters() {
        let file = SourceFile::from("a\nbé c");
        let mut cursor = SourceCursor::from(&file);

        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.pos(), Position { line: 2, column: 1, offset: 2 });

        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.pos(), Position { line: 2, column: 3, offset: 5 });
        assert_eq!(cursor.peek(), Some(' '));
        assert_eq!(cursor.peek_second(), Some('c'));
    }

    #[test]
    fn test_unnamed_file() {
        assert_eq!(SourceFile::from("x").name(), "<unknown>");
        assert_eq!(SourceFile::named("input", "x").name(), "input");
    }
}
