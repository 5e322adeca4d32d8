//! Errors surfaced by [`Tokenizer::next_token`](crate::Tokenizer::next_token).
//!
//! Three families, all returned synchronously and never retried:
//! - `Io`: the byte source failed
//! - `Lexical`: malformed input, with a [`LexErrorKind`] and the
//!   [`Position`] of the offending lexeme or comment start
//! - `Configuration`: the buffer window cannot hold the input
//!
//! End of input is not an error; it is the [`Eof`](crate::TokenKind::Eof)
//! token.

use std::io;

use xpath_lexer_core::ReaderError;

use crate::Position;

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("failed to read input: {0}")]
    Io(#[source] io::Error),

    #[error("{kind} at {position}")]
    Lexical {
        kind: LexErrorKind,
        position: Position,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A previous call failed; the tokenizer's cursor state is no longer
    /// meaningful.
    #[error("tokenizer already failed and cannot continue")]
    Poisoned,
}

/// What was malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// End of input before the closing quote.
    #[error("unterminated string literal")]
    UnterminatedLiteral,
    /// End of input inside `(: ... :)`.
    #[error("unterminated comment")]
    UnterminatedComment,
    /// `$` not followed by a name.
    #[error("`$` must be followed by a variable name")]
    InvalidVariableName,
    /// `a:b:c`.
    #[error("name contains more than one `:`")]
    MultipleColonsInName,
    /// `5e`, `1.5E+`.
    #[error("exponent must contain at least one digit")]
    MissingExponentDigits,
    /// A byte that only exists as the first half of a two-byte operator.
    #[error("`{}` must be followed by `{}`", char::from(*.found), char::from(*.expected))]
    MalformedOperator { found: u8, expected: u8 },
    /// A byte that starts no token.
    #[error("unexpected byte {byte:#04x}")]
    UnexpectedByte { byte: u8 },
    /// `Q{` without a closing `}` and local name.
    #[error("malformed `Q{{uri}}local` name")]
    MalformedUriQualifiedName,
}

/// The buffer window cannot be set up, or cannot hold a token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("buffer size must be positive, got {size}")]
    InvalidBufferSize { size: usize },

    #[error(
        "token starting at offset {offset} does not fit in the {buffer_size}-byte buffer window"
    )]
    TokenExceedsBuffer { buffer_size: usize, offset: u64 },
}

impl LexError {
    #[cold]
    pub(crate) fn lexical(kind: LexErrorKind, position: Position) -> Self {
        LexError::Lexical { kind, position }
    }

    /// The lexical error kind, if this is a lexical error.
    pub fn kind(&self) -> Option<LexErrorKind> {
        match self {
            LexError::Lexical { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Where a lexical error was detected.
    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::Lexical { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl From<ReaderError> for LexError {
    #[cold]
    fn from(err: ReaderError) -> Self {
        match err {
            ReaderError::Io(io) => LexError::Io(io),
            ReaderError::InvalidBufferSize { size } => {
                ConfigError::InvalidBufferSize { size }.into()
            }
            ReaderError::TokenExceedsBuffer {
                buffer_size,
                offset,
            } => ConfigError::TokenExceedsBuffer {
                buffer_size,
                offset,
            }
            .into(),
        }
    }
}
