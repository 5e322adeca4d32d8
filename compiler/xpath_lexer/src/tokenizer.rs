//! Version-aware tokenizer over a [`DualBufferReader`].
//!
//! One engine serves every `XPath` version: the [`Grammar`] picked at
//! construction supplies the reserved-word trie and the [`Features`] that
//! switch individual constructs on.
//!
//! # Scanning
//!
//! Each call skips trivia (whitespace and, from 2.0 on, nested `(: :)`
//! comments), marks the lexeme start, then dispatches on the first
//! significant byte. Every scanner consumes its bytes by advancing the
//! reader's forward cursor; the lexeme is `[lexeme_begin, forward)` and is
//! copied into a pooled [`Token`] once the kind is known.
//!
//! Lookahead never exceeds two bytes past the lexeme, and backtracking
//! never goes below the lexeme start, so every token shorter than one
//! buffer can be scanned regardless of where the buffer boundaries fall.
//!
//! # Failure
//!
//! There is no recovery. The first error poisons the tokenizer and every
//! later call returns [`LexError::Poisoned`].

use tracing::{debug, trace};
use xpath_lexer_core::{CharClassifier, DualBufferReader, Source, XmlChars};

use crate::{
    Features, Grammar, LexError, LexErrorKind, LexerConfig, Position, Span, Token, TokenFlags,
    TokenKind, TokenPool,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Active,
    /// `Eof` has been returned at least once.
    Exhausted,
    Poisoned,
}

/// Pull-based tokenizer. Call [`next_token`](Self::next_token) until it
/// returns an [`Eof`](TokenKind::Eof) token, or iterate.
pub struct Tokenizer<S, C = XmlChars> {
    reader: DualBufferReader<S>,
    classifier: C,
    grammar: &'static Grammar,
    pool: TokenPool,
    /// Line of the reader's lexeme start.
    line: u32,
    /// Column of the reader's lexeme start.
    column: u32,
    /// A token has already been emitted on the current line.
    line_has_token: bool,
    state: State,
}

impl<S: Source> Tokenizer<S> {
    /// Tokenizer using the XML 1.0 character classes.
    pub fn new(source: S, config: &LexerConfig) -> Result<Self, LexError> {
        Self::with_classifier(source, config, XmlChars)
    }
}

impl<S: Source, C: CharClassifier> Tokenizer<S, C> {
    #[tracing::instrument(level = "debug", skip_all, fields(
        version = %config.version,
        buffer_size = config.buffer_size,
    ))]
    pub fn with_classifier(source: S, config: &LexerConfig, classifier: C) -> Result<Self, LexError> {
        config.validate()?;
        let reader = DualBufferReader::new(source, config.buffer_size)?;
        let grammar = Grammar::for_version(config.version);
        debug!(features = ?grammar.features(), "tokenizer ready");
        Ok(Tokenizer {
            reader,
            classifier,
            grammar,
            pool: TokenPool::new(),
            line: 1,
            column: 1,
            line_has_token: false,
            state: State::Active,
        })
    }

    /// Scan the next token.
    ///
    /// Returns an `Eof` token at end of input, and again on every later
    /// call.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.state == State::Poisoned {
            return Err(LexError::Poisoned);
        }
        match self.scan() {
            Ok(token) => {
                trace!(kind = ?token.kind, span = %token.span, "token");
                if token.is_eof() {
                    self.state = State::Exhausted;
                }
                Ok(token)
            }
            Err(err) => {
                debug!(error = %err, "tokenizing failed");
                self.state = State::Poisoned;
                Err(err)
            }
        }
    }

    /// Hand a token back so its lexeme buffer can be reused.
    pub fn release(&mut self, token: Token) {
        self.pool.release(token);
    }

    pub fn grammar(&self) -> &'static Grammar {
        self.grammar
    }

    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    /// Where the next token's trivia starts.
    pub fn lexeme_position(&self) -> Position {
        Position {
            offset: self.reader.lexeme_begin(),
            line: self.line,
            column: self.column,
        }
    }

    /// Consume the tokenizer, returning the byte source.
    pub fn into_source(self) -> S {
        self.reader.into_source()
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        let mut flags = self.skip_trivia()?;
        let start = self.lexeme_position();
        if !self.line_has_token {
            flags |= TokenFlags::LINE_START;
        }
        if start.offset > 0
            && !flags.intersects(
                TokenFlags::SPACE_BEFORE | TokenFlags::NEWLINE_BEFORE | TokenFlags::COMMENT_BEFORE,
            )
        {
            flags |= TokenFlags::ADJACENT;
        }

        let kind = if self.reader.is_eof() {
            TokenKind::Eof
        } else {
            self.scan_token(start)?
        };

        let mut token = self.pool.acquire();
        token.kind = kind;
        self.reader.slice_lexeme_into(&mut token.lexeme);
        token.span = Span::new(start.offset, self.reader.position());
        token.line = start.line;
        token.column = start.column;
        token.flags = flags;

        self.advance_position(&token.lexeme);
        self.line_has_token = true;
        self.reader.mark_lexeme_start()?;
        Ok(token)
    }

    /// The lookahead byte, or `None` at end of input.
    #[inline]
    fn peek(&self) -> Option<u8> {
        if self.reader.is_eof() {
            None
        } else {
            Some(self.reader.current_byte())
        }
    }

    #[inline]
    fn eat_while(&mut self, pred: fn(&C, u8) -> bool) -> Result<(), LexError> {
        while let Some(b) = self.peek() {
            if !pred(&self.classifier, b) {
                break;
            }
            self.reader.advance(1)?;
        }
        Ok(())
    }

    /// Move the tracked line and column past an emitted lexeme.
    fn advance_position(&mut self, lexeme: &[u8]) {
        match memchr::memrchr(b'\n', lexeme) {
            Some(last) => {
                self.line += memchr::memchr_iter(b'\n', lexeme).count() as u32;
                self.column = (lexeme.len() - last) as u32;
            }
            None => self.column += lexeme.len() as u32,
        }
    }

    // ─── Trivia ─────────────────────────────────────────────────────────

    fn skip_trivia(&mut self) -> Result<TokenFlags, LexError> {
        let comments = self.grammar.supports(Features::COMMENTS);
        let mut flags = TokenFlags::empty();
        while let Some(b) = self.peek() {
            if self.classifier.is_whitespace(b) {
                flags |= if b == b'\n' || b == b'\r' {
                    TokenFlags::NEWLINE_BEFORE
                } else {
                    TokenFlags::SPACE_BEFORE
                };
                self.consume_trivia_byte()?;
                continue;
            }
            if b == b'(' && comments {
                self.reader.advance(1)?;
                let opens_comment = self.peek() == Some(b':');
                self.reader.retreat(1);
                if opens_comment {
                    self.skip_comment()?;
                    flags |= TokenFlags::COMMENT_BEFORE;
                    continue;
                }
            }
            break;
        }
        Ok(flags)
    }

    /// Skip one `(: ... :)` comment, including nested ones.
    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start = self.lexeme_position();
        // `(:`
        self.consume_trivia_byte()?;
        self.consume_trivia_byte()?;
        let mut depth = 1u32;
        while depth > 0 {
            let Some(b) = self.peek() else {
                return Err(LexError::lexical(LexErrorKind::UnterminatedComment, start));
            };
            self.consume_trivia_byte()?;
            match (b, self.peek()) {
                (b'(', Some(b':')) => {
                    self.consume_trivia_byte()?;
                    depth += 1;
                }
                (b':', Some(b')')) => {
                    self.consume_trivia_byte()?;
                    depth -= 1;
                }
                _ => {}
            }
        }
        trace!(offset = start.offset, "skipped comment");
        Ok(())
    }

    /// Consume the lookahead byte as trivia and restart the lexeme after it.
    fn consume_trivia_byte(&mut self) -> Result<(), LexError> {
        let b = self.reader.current_byte();
        self.reader.advance(1)?;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
            self.line_has_token = false;
        } else {
            self.column += 1;
        }
        self.reader.mark_lexeme_start()?;
        Ok(())
    }

    // ─── Dispatch ───────────────────────────────────────────────────────

    fn scan_token(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let features = self.grammar.features();
        let b = self.reader.current_byte();
        match b {
            b'"' | b'\'' => self.string(b, start),
            b'.' => self.dot(start),
            b'$' if features.contains(Features::VARIABLE_REFERENCES) => self.variable(start),
            b'/' => self.pair(b'/', TokenKind::DoubleSlash, TokenKind::Slash),
            b'=' if features.contains(Features::ARROW_OPERATOR) => {
                self.pair(b'>', TokenKind::Arrow, TokenKind::EqualTo)
            }
            b'=' => self.single(TokenKind::EqualTo),
            b'!' => self.bang(start),
            b'<' => self.less(),
            b'>' => self.greater(),
            b':' => self.colon(),
            b'|' if features.contains(Features::STRING_CONCAT) => {
                self.pair(b'|', TokenKind::Concat, TokenKind::Union)
            }
            b'|' => self.single(TokenKind::Union),
            b'?' => self.question(start),
            b'#' if features.contains(Features::INLINE_FUNCTIONS) => self.single(TokenKind::Hash),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'(' => self.single(TokenKind::LeftParen),
            b')' => self.single(TokenKind::RightParen),
            b'[' => self.single(TokenKind::LeftBracket),
            b']' => self.single(TokenKind::RightBracket),
            b'{' => self.single(TokenKind::LeftBrace),
            b'}' => self.single(TokenKind::RightBrace),
            b'@' => self.single(TokenKind::AtSign),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            _ if self.classifier.is_digit(b) => self.number(start),
            _ if self.classifier.is_name_start(b) => self.eq_name(start),
            _ => Err(LexError::lexical(
                LexErrorKind::UnexpectedByte { byte: b },
                start,
            )),
        }
    }

    // ─── Operators ──────────────────────────────────────────────────────

    #[inline]
    fn single(&mut self, kind: TokenKind) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?;
        Ok(kind)
    }

    /// One byte, extended to `paired` when `second` follows.
    fn pair(&mut self, second: u8, paired: TokenKind, alone: TokenKind) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?;
        if self.peek() == Some(second) {
            self.reader.advance(1)?;
            Ok(paired)
        } else {
            Ok(alone)
        }
    }

    fn bang(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?; // consume '!'
        if self.peek() == Some(b'=') {
            self.reader.advance(1)?;
            return Ok(TokenKind::NotEqualTo);
        }
        if self.grammar.supports(Features::SIMPLE_MAP_OPERATOR) {
            return Ok(TokenKind::SimpleMap);
        }
        Err(LexError::lexical(
            LexErrorKind::MalformedOperator {
                found: b'!',
                expected: b'=',
            },
            start,
        ))
    }

    fn less(&mut self) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?; // consume '<'
        let kind = match self.peek() {
            Some(b'=') => TokenKind::LessThanEqualTo,
            Some(b'<') => TokenKind::NodeBefore,
            _ => return Ok(TokenKind::LessThan),
        };
        self.reader.advance(1)?;
        Ok(kind)
    }

    fn greater(&mut self) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?; // consume '>'
        let kind = match self.peek() {
            Some(b'=') => TokenKind::GreaterThanEqualTo,
            Some(b'>') => TokenKind::NodeAfter,
            _ => return Ok(TokenKind::GreaterThan),
        };
        self.reader.advance(1)?;
        Ok(kind)
    }

    fn colon(&mut self) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?; // consume ':'
        let kind = match self.peek() {
            Some(b':') => TokenKind::AxisSeparator,
            Some(b'=') => TokenKind::Assign,
            _ => return Ok(TokenKind::Colon),
        };
        self.reader.advance(1)?;
        Ok(kind)
    }

    /// `?` is a lookup when it directly precedes a key specifier, otherwise
    /// an occurrence indicator or placeholder.
    fn question(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let features = self.grammar.features();
        self.reader.advance(1)?; // consume '?'
        if features.contains(Features::LOOKUP_OPERATOR) {
            if let Some(next) = self.peek() {
                if next == b'('
                    || next == b'*'
                    || self.classifier.is_digit(next)
                    || self.classifier.is_name_start(next)
                {
                    return Ok(TokenKind::Lookup);
                }
            }
        }
        if features.contains(Features::OCCURRENCE_INDICATORS) {
            return Ok(TokenKind::QuestionMark);
        }
        Err(LexError::lexical(
            LexErrorKind::UnexpectedByte { byte: b'?' },
            start,
        ))
    }

    // ─── Names ──────────────────────────────────────────────────────────

    /// A name, or with braced URI literals, `Q{uri}local`.
    fn eq_name(&mut self, start: Position) -> Result<TokenKind, LexError> {
        if self.reader.current_byte() == b'Q'
            && self.grammar.supports(Features::BRACED_URI_LITERALS)
        {
            self.reader.advance(1)?;
            if self.peek() == Some(b'{') {
                return self.braced_uri_name(start);
            }
            self.reader.retreat(1);
        }
        self.name(start)
    }

    /// Maximal name, walking the trie in lock-step.
    ///
    /// With qualified names, one `:` is part of the name when a name start
    /// follows it. A `:` followed by anything else (`::`, `:=`, `:*`) ends
    /// the name and is left for the next token.
    fn name(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let grammar = self.grammar;
        let qualified = grammar.supports(Features::QUALIFIED_NAMES);
        let mut walk = grammar.trie().walk();
        let mut colons = 0u32;

        while let Some(b) = self.peek() {
            if self.classifier.is_name_char(b) {
                walk.step(b);
                self.reader.advance(1)?;
                continue;
            }
            if b == b':' && qualified {
                self.reader.advance(1)?;
                if self.peek().is_some_and(|next| self.classifier.is_name_start(next)) {
                    if colons == 1 {
                        return Err(LexError::lexical(
                            LexErrorKind::MultipleColonsInName,
                            start,
                        ));
                    }
                    colons += 1;
                    walk.step(b':');
                    continue;
                }
                self.reader.retreat(1);
            }
            break;
        }

        Ok(match walk.terminal() {
            Some(kind) => kind,
            None if colons == 1 => TokenKind::QName,
            None => TokenKind::Identifier,
        })
    }

    /// `Q{uri}local`, entered with the forward cursor on `{`.
    fn braced_uri_name(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let malformed = || LexError::lexical(LexErrorKind::MalformedUriQualifiedName, start);
        self.reader.advance(1)?; // consume '{'
        loop {
            match self.peek() {
                None | Some(b'{') => return Err(malformed()),
                Some(b'}') => {
                    self.reader.advance(1)?;
                    break;
                }
                Some(_) => self.reader.advance(1)?,
            }
        }
        match self.peek() {
            Some(b) if self.classifier.is_name_start(b) => {}
            _ => return Err(malformed()),
        }
        self.eat_while(C::is_name_char)?;
        Ok(TokenKind::UriQualifiedName)
    }

    /// `$name`. Reserved words are valid variable names.
    fn variable(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?; // consume '$'
        match self.peek() {
            Some(b) if self.classifier.is_name_start(b) => {}
            _ => {
                return Err(LexError::lexical(
                    LexErrorKind::InvalidVariableName,
                    start,
                ))
            }
        }
        self.eq_name(start)?;
        Ok(TokenKind::VariableReference)
    }

    // ─── Numbers ────────────────────────────────────────────────────────

    fn number(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.eat_while(C::is_digit)?;
        let mut kind = TokenKind::IntegerLiteral;
        if self.peek() == Some(b'.') {
            self.reader.advance(1)?;
            self.eat_while(C::is_digit)?;
            kind = TokenKind::DecimalLiteral;
        }
        self.exponent(kind, start)
    }

    /// `.`, `..`, or a decimal starting with `.`.
    fn dot(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.reader.advance(1)?; // consume '.'
        match self.peek() {
            Some(b) if self.classifier.is_digit(b) => {
                self.eat_while(C::is_digit)?;
                self.exponent(TokenKind::DecimalLiteral, start)
            }
            Some(b'.') => {
                self.reader.advance(1)?;
                Ok(TokenKind::ParentStep)
            }
            _ => Ok(TokenKind::ContextItem),
        }
    }

    /// Optional `e`/`E` [`+`/`-`] digits, turning `kind` into a double.
    fn exponent(&mut self, kind: TokenKind, start: Position) -> Result<TokenKind, LexError> {
        if !self.grammar.supports(Features::EXPONENT_LITERALS)
            || !matches!(self.peek(), Some(b'e' | b'E'))
        {
            return Ok(kind);
        }
        self.reader.advance(1)?;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.reader.advance(1)?;
        }
        if !self.peek().is_some_and(|b| self.classifier.is_digit(b)) {
            return Err(LexError::lexical(
                LexErrorKind::MissingExponentDigits,
                start,
            ));
        }
        self.eat_while(C::is_digit)?;
        Ok(TokenKind::DoubleLiteral)
    }

    // ─── Strings ────────────────────────────────────────────────────────

    /// Quoted literal. With escaped quotes a doubled delimiter is content.
    fn string(&mut self, quote: u8, start: Position) -> Result<TokenKind, LexError> {
        let escapes = self.grammar.supports(Features::ESCAPED_QUOTES);
        self.reader.advance(1)?; // opening quote
        loop {
            if !self.reader.eat_until(quote)? {
                return Err(LexError::lexical(
                    LexErrorKind::UnterminatedLiteral,
                    start,
                ));
            }
            self.reader.advance(1)?; // closing quote, or first of a pair
            if escapes && self.peek() == Some(quote) {
                self.reader.advance(1)?;
                continue;
            }
            return Ok(TokenKind::StringLiteral);
        }
    }
}

impl<S: Source, C: CharClassifier> Iterator for Tokenizer<S, C> {
    type Item = Result<Token, LexError>;

    /// Tokens up to, not including, `Eof`. An error is yielded once and
    /// ends the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Active {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.pool.release(token);
                None
            }
            other => Some(other),
        }
    }
}
