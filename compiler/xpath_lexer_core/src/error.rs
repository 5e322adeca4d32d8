//! Errors raised by the buffer window.

use std::io;

/// Failure while maintaining the two-buffer window.
///
/// Partial reads are not errors: a short read marks the end of the stream.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// The underlying [`Source`](crate::Source) failed.
    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),

    /// Buffers must hold at least one byte.
    #[error("buffer size must be positive, got {size}")]
    InvalidBufferSize { size: usize },

    /// A single lexeme (plus its lookahead) needs more than two buffers.
    ///
    /// The window never reloads a buffer that the lexeme start still points
    /// into, so a token longer than one buffer cannot be represented.
    #[error("token starting at offset {offset} does not fit in the {buffer_size}-byte buffer window")]
    TokenExceedsBuffer { buffer_size: usize, offset: u64 },
}
