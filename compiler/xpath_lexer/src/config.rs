//! Tokenizer configuration.

use crate::{ConfigError, XPathVersion};

/// Size of each of the two window buffers unless configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Construction parameters for a [`Tokenizer`](crate::Tokenizer).
///
/// `buffer_size` bounds the longest token the tokenizer can scan: every
/// token must be shorter than one buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LexerConfig {
    pub buffer_size: usize,
    pub version: XPathVersion,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            version: XPathVersion::default(),
        }
    }
}

impl LexerConfig {
    pub fn new(version: XPathVersion) -> Self {
        LexerConfig {
            version,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: XPathVersion) -> Self {
        self.version = version;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize {
                size: self.buffer_size,
            });
        }
        Ok(())
    }
}
