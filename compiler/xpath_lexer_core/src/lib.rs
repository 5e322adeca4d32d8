//! Low-level streaming window for the `XPath` lexer.
//!
//! This crate knows nothing about `XPath`. It provides:
//! - [`Source`]: where bytes come from (memory, files, any `io::Read`)
//! - [`CharClassifier`]: whitespace and name-character predicates
//! - [`DualBufferReader`]: two fixed-size buffers sliding over the stream,
//!   with a lexeme-start cursor and a forward cursor addressed by logical
//!   (unbounded) byte offsets
//!
//! The grammar-aware tokenizer lives in `xpath_lexer`.

mod char_class;
mod dual_buffer;
mod error;
mod source;

pub use char_class::{CharClassifier, XmlChars};
pub use dual_buffer::{DualBufferReader, EOF_SENTINEL};
pub use error::ReaderError;
pub use source::{ReadSource, SliceSource, Source};
