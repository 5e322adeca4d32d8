//! End-to-end tokenizing through the public API: whole expressions,
//! streaming sources, and constant-memory operation.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::io::{self, Read};

use pretty_assertions::assert_eq;
use xpath_lexer::{
    init_tracing, tokenize, ConfigError, LexError, LexErrorKind, LexerConfig, ReadSource, SliceSource,
    TokenKind as K, Tokenizer, XPathVersion, DEFAULT_BUFFER_SIZE,
};

fn kinds(input: &str, version: XPathVersion) -> Vec<K> {
    tokenize(input.as_bytes(), version)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Hands out at most `chunk` bytes per read, like a pipe.
struct Trickle<'a> {
    bytes: &'a [u8],
    chunk: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        Ok(n)
    }
}

// === Expressions ===

#[test]
fn location_path_1_0() {
    assert_eq!(
        kinds("/bookstore/book[price > 35.00]/title", XPathVersion::V1_0),
        vec![
            K::Slash,
            K::Identifier,
            K::Slash,
            K::Identifier,
            K::LeftBracket,
            K::Identifier,
            K::GreaterThan,
            K::DecimalLiteral,
            K::RightBracket,
            K::Slash,
            K::Identifier,
        ]
    );
}

#[test]
fn abbreviated_steps_1_0() {
    assert_eq!(
        kinds("//para[@type='warning'][5]/../text()", XPathVersion::V1_0),
        vec![
            K::DoubleSlash,
            K::Identifier,
            K::LeftBracket,
            K::AtSign,
            K::Identifier,
            K::EqualTo,
            K::StringLiteral,
            K::RightBracket,
            K::LeftBracket,
            K::IntegerLiteral,
            K::RightBracket,
            K::Slash,
            K::ParentStep,
            K::Slash,
            K::FunctionName,
            K::LeftParen,
            K::RightParen,
        ]
    );
}

#[test]
fn quantified_expression_2_0() {
    assert_eq!(
        kinds(
            "every $b in //book satisfies $b/@price instance of xs:decimal",
            XPathVersion::V2_0
        ),
        vec![
            K::Every,
            K::VariableReference,
            K::In,
            K::DoubleSlash,
            K::Identifier,
            K::Satisfies,
            K::VariableReference,
            K::Slash,
            K::AtSign,
            K::Identifier,
            K::Instance,
            K::Of,
            K::QName,
        ]
    );
}

#[test]
fn inline_function_and_arrow_3_0() {
    assert_eq!(
        kinds(
            "let $f := function($x) { $x * 2 } return (1, 2) ! $f(.) => sum()",
            XPathVersion::V3_0
        ),
        vec![
            K::Let,
            K::VariableReference,
            K::Assign,
            K::Function,
            K::LeftParen,
            K::VariableReference,
            K::RightParen,
            K::LeftBrace,
            K::VariableReference,
            K::Star,
            K::IntegerLiteral,
            K::RightBrace,
            K::Return,
            K::LeftParen,
            K::IntegerLiteral,
            K::Comma,
            K::IntegerLiteral,
            K::RightParen,
            K::SimpleMap,
            K::VariableReference,
            K::LeftParen,
            K::ContextItem,
            K::RightParen,
            K::Arrow,
            K::FunctionName,
            K::LeftParen,
            K::RightParen,
        ]
    );
}

#[test]
fn maps_and_lookups_3_1() {
    assert_eq!(
        kinds(
            "map:get(map { 'k': [1, 2] }, 'k')?1 || 'x'",
            XPathVersion::V3_1
        ),
        vec![
            K::FunctionName,
            K::LeftParen,
            K::Map,
            K::LeftBrace,
            K::StringLiteral,
            K::Colon,
            K::LeftBracket,
            K::IntegerLiteral,
            K::Comma,
            K::IntegerLiteral,
            K::RightBracket,
            K::RightBrace,
            K::Comma,
            K::StringLiteral,
            K::RightParen,
            K::Lookup,
            K::IntegerLiteral,
            K::Concat,
            K::StringLiteral,
        ]
    );
}

#[test]
fn version_names_parse() {
    let version: XPathVersion = "3.1".parse().unwrap();
    assert_eq!(version, XPathVersion::V3_1);
    assert_eq!(" 2.0 ".parse::<XPathVersion>().unwrap(), XPathVersion::V2_0);
    let err = "4.0".parse::<XPathVersion>().unwrap_err();
    assert!(err.to_string().contains("4.0"));
}

// === Streaming ===

#[test]
fn trickling_reader_matches_slice() {
    let input = "for $i in 1 to 3 (: loop :) return concat('a''b', $i)";
    let expected = tokenize(input.as_bytes(), XPathVersion::V3_1).unwrap();

    let source = ReadSource::new(Trickle {
        bytes: input.as_bytes(),
        chunk: 3,
    });
    let config = LexerConfig::default().with_buffer_size(16);
    let actual: Vec<_> = Tokenizer::new(source, &config)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn long_stream_in_constant_memory() {
    init_tracing();
    let input = "a + 1 (: c :) ".repeat(20_000);
    let config = LexerConfig::default().with_buffer_size(32);
    let mut lexer = Tokenizer::new(SliceSource::from(input.as_str()), &config).unwrap();

    let mut count = 0usize;
    loop {
        let token = lexer.next_token().unwrap();
        if token.is_eof() {
            assert_eq!(token.span.start, input.len() as u64);
            break;
        }
        count += 1;
        lexer.release(token);
    }
    assert_eq!(count, 60_000);
    assert_eq!(lexer.pool().allocated(), 1);
}

#[test]
fn tokenize_fits_tokens_beyond_default_buffer() {
    let literal = format!("'{}'", "x".repeat(3 * DEFAULT_BUFFER_SIZE));
    let input = format!("concat({literal}, 1)");
    let tokens = tokenize(input.as_bytes(), XPathVersion::V3_1).unwrap();
    assert_eq!(tokens[2].kind, K::StringLiteral);
    assert_eq!(tokens[2].lexeme.len(), literal.len());

    let streaming = Tokenizer::new(SliceSource::from(input.as_str()), &LexerConfig::default())
        .unwrap()
        .collect::<Result<Vec<_>, _>>();
    assert!(matches!(
        streaming,
        Err(LexError::Configuration(ConfigError::TokenExceedsBuffer { .. }))
    ));
}

#[test]
fn error_reports_line_and_column() {
    let input = "1 +\n  2 +\n  'open";
    let err = tokenize(input.as_bytes(), XPathVersion::V2_0).unwrap_err();
    assert_eq!(err.kind(), Some(LexErrorKind::UnterminatedLiteral));
    let at = err.position().unwrap();
    assert_eq!((at.line, at.column, at.offset), (3, 3, 12));
    assert_eq!(
        err.to_string(),
        "unterminated string literal at 3:3"
    );
}

#[test]
fn io_errors_surface() {
    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    let result = Tokenizer::new(ReadSource::new(Failing), &LexerConfig::default());
    assert!(matches!(result, Err(LexError::Io(_))));
}
