use pretty_assertions::assert_eq;

use super::*;
use crate::{Span, TokenKind};

#[test]
fn acquire_allocates_when_empty() {
    let mut pool = TokenPool::new();
    let token = pool.acquire();
    assert_eq!(token, Token::default());
    assert_eq!(pool.allocated(), 1);
    assert_eq!(pool.available(), 0);
}

#[test]
fn released_token_is_reused() {
    let mut pool = TokenPool::new();
    let mut token = pool.acquire();
    token.kind = TokenKind::StringLiteral;
    token.lexeme.extend_from_slice(b"'a fairly long string literal'");
    token.span = Span::new(0, 30);
    let capacity = token.lexeme.capacity();

    pool.release(token);
    assert_eq!(pool.available(), 1);

    let reused = pool.acquire();
    assert_eq!(pool.allocated(), 1);
    assert_eq!(pool.available(), 0);
    assert_eq!(reused.kind, TokenKind::Eof);
    assert!(reused.lexeme.is_empty());
    assert_eq!(reused.lexeme.capacity(), capacity);
    assert_eq!(reused.span, Span::default());
}

#[test]
fn pool_is_unbounded() {
    let mut pool = TokenPool::new();
    let tokens: Vec<Token> = (0..100).map(|_| pool.acquire()).collect();
    for token in tokens {
        pool.release(token);
    }
    assert_eq!(pool.available(), 100);
    assert_eq!(pool.allocated(), 100);
}

#[test]
fn foreign_tokens_are_accepted() {
    let mut pool = TokenPool::new();
    pool.release(Token::new(TokenKind::Comma));
    assert_eq!(pool.available(), 1);
    assert_eq!(pool.acquire().kind, TokenKind::Eof);
    assert_eq!(pool.allocated(), 0);
}
