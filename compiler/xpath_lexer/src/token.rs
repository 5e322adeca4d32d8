//! Tokens produced by the tokenizer.
//!
//! A [`Token`] owns its lexeme bytes so that it outlives the buffer window
//! it was scanned from. Records are recycled through
//! [`TokenPool`](crate::TokenPool) to keep the lexeme allocations warm.

mod kind;

use std::borrow::Cow;
use std::fmt;

pub use kind::TokenKind;

/// Half-open range of logical stream offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    #[inline]
    pub const fn new(start: u64, end: u64) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn len(self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A point in the input: logical byte offset plus 1-based line and column.
///
/// Columns count bytes, not characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub offset: u64,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Offset 0, line 1, column 1.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

bitflags::bitflags! {
    /// Trivia context preceding a token.
    ///
    /// Comments and whitespace are never emitted, so these flags are the only
    /// trace of them a consumer sees.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TokenFlags: u8 {
        /// Spaces or tabs preceded this token.
        const SPACE_BEFORE = 1 << 0;
        /// A line break preceded this token.
        const NEWLINE_BEFORE = 1 << 1;
        /// A comment preceded this token.
        const COMMENT_BEFORE = 1 << 2;
        /// First token on its line.
        const LINE_START = 1 << 3;
        /// Nothing separated this token from the previous one.
        const ADJACENT = 1 << 4;
    }
}

impl TokenFlags {
    #[inline]
    pub const fn has_space_before(self) -> bool {
        self.contains(Self::SPACE_BEFORE)
    }

    #[inline]
    pub const fn has_newline_before(self) -> bool {
        self.contains(Self::NEWLINE_BEFORE)
    }

    #[inline]
    pub const fn has_comment_before(self) -> bool {
        self.contains(Self::COMMENT_BEFORE)
    }

    #[inline]
    pub const fn is_line_start(self) -> bool {
        self.contains(Self::LINE_START)
    }

    #[inline]
    pub const fn is_adjacent(self) -> bool {
        self.contains(Self::ADJACENT)
    }
}

/// One lexical token.
///
/// `line` and `column` locate the first byte of the lexeme. An [`Eof`]
/// token has an empty lexeme and a zero-length span at the end of input.
///
/// [`Eof`]: TokenKind::Eof
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Vec<u8>,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    pub flags: TokenFlags,
}

impl Token {
    /// An empty token of `kind` at the start of input.
    pub fn new(kind: TokenKind) -> Self {
        Token {
            kind,
            lexeme: Vec::new(),
            span: Span::default(),
            line: Position::START.line,
            column: Position::START.column,
            flags: TokenFlags::empty(),
        }
    }

    /// The lexeme as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.lexeme)
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.span.start,
            line: self.line,
            column: self.column,
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Clear every field, keeping the lexeme allocation.
    pub(crate) fn reset(&mut self) {
        self.kind = TokenKind::Eof;
        self.lexeme.clear();
        self.span = Span::default();
        self.line = Position::START.line;
        self.column = Position::START.column;
        self.flags = TokenFlags::empty();
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(TokenKind::Eof)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} @ {} ({}:{})",
            self.kind,
            self.text(),
            self.span,
            self.line,
            self.column
        )
    }
}
