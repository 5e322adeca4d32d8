//! Free list of token records.
//!
//! Tokens own a growable lexeme buffer. Handing released tokens back out
//! lets a long tokenization run reuse a handful of allocations instead of
//! allocating one per token.

use crate::Token;

/// Unbounded free list of [`Token`] records. Not shared between threads.
#[derive(Debug, Default)]
pub struct TokenPool {
    free: Vec<Token>,
    allocated: usize,
}

impl TokenPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a reset token, reusing a released record when one is available.
    pub fn acquire(&mut self) -> Token {
        if let Some(token) = self.free.pop() {
            return token;
        }
        self.allocated += 1;
        Token::default()
    }

    /// Return a token to the free list. Its lexeme is cleared but its
    /// allocation kept.
    pub fn release(&mut self, mut token: Token) {
        token.reset();
        self.free.push(token);
    }

    /// Records waiting in the free list.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Records this pool has allocated over its lifetime.
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
