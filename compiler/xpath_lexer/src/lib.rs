//! Streaming `XPath`/`XQuery` tokenizer.
//!
//! Input is pulled from a [`Source`] through a two-buffer window
//! ([`xpath_lexer_core::DualBufferReader`]), so arbitrarily long inputs are
//! tokenized in constant memory. Tokens are classified against a
//! per-version [`Grammar`]: `XPath` 1.0, 2.0, 3.0 and 3.1 share one scanning
//! engine and differ only in vocabulary and feature toggles.
//!
//! ```text
//! Tokenizer::next_token
//!   -> DualBufferReader (advance / retreat / current byte)
//!   -> KeywordTrie walk in lock-step with name scanning
//!   -> TokenPool::acquire, populate, return
//! ```

mod config;
mod grammar;
mod lex_error;
mod token;
mod token_pool;
mod tokenizer;
mod trie;
mod vocabulary;

use std::sync::Once;

pub use config::{LexerConfig, DEFAULT_BUFFER_SIZE};
pub use grammar::{Features, Grammar, UnknownVersion, XPathVersion};
pub use lex_error::{ConfigError, LexError, LexErrorKind};
pub use token::{Position, Span, Token, TokenFlags, TokenKind};
pub use token_pool::TokenPool;
pub use tokenizer::Tokenizer;
pub use trie::{KeywordTrie, NodeId, TrieWalk};
pub use xpath_lexer_core::{CharClassifier, ReadSource, SliceSource, Source, XmlChars};

/// Tokenize an in-memory input, stopping before `Eof`.
///
/// The window is sized so that any token in `input` fits, which means both
/// buffers are as large as the input. This helper does not stream; use a
/// [`Tokenizer`] with a fixed [`LexerConfig::buffer_size`] to bound memory.
pub fn tokenize(input: &[u8], version: XPathVersion) -> Result<Vec<Token>, LexError> {
    let config = LexerConfig::new(version)
        .with_buffer_size(DEFAULT_BUFFER_SIZE.max(input.len().saturating_add(2)));
    Tokenizer::new(SliceSource::new(input), &config)?.collect()
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
/// Enable with `RUST_LOG=xpath_lexer=trace` to see every token, or
/// `RUST_LOG=xpath_lexer_core=trace` for buffer loads.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
