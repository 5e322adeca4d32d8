use std::fmt;

/// Token kinds across all supported `XPath` versions.
///
/// Reserved words each get their own kind. Which of them a tokenizer
/// recognizes depends on the grammar version; in older versions the same
/// text scans as an [`Identifier`](TokenKind::Identifier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// End of input. Repeats on every call once reached.
    Eof,

    // === Names ===
    /// Unprefixed name that is not a reserved word.
    Identifier,
    /// `prefix:local`.
    QName,
    /// `Q{uri}local`.
    UriQualifiedName,
    /// `$name` or `$prefix:local`, lexeme includes the `$`.
    VariableReference,
    /// `child`, `ancestor-or-self`, ...
    AxisName,
    /// Built-in function or node-type test name.
    FunctionName,

    // === Literals ===
    IntegerLiteral,
    DecimalLiteral,
    DoubleLiteral,
    /// Quoted literal, lexeme includes both quotes.
    StringLiteral,

    // === Keywords (1.0) ===
    And,
    Or,
    Div,
    Mod,

    // === Keywords (2.0) ===
    Instance,
    Of,
    Cast,
    Castable,
    As,
    Treat,
    Return,
    For,
    In,
    Some,
    Every,
    If,
    Then,
    Else,
    To,
    Satisfies,
    Intersect,
    Except,
    Idiv,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Is,
    Typeswitch,
    Case,
    Default,
    At,
    Where,
    Order,
    By,
    Ascending,
    Descending,
    Stable,
    Collation,
    Import,
    Schema,
    Module,
    Preserve,
    Strip,

    // === Keywords (3.0) ===
    Function,
    Let,
    Map,
    Array,

    // === Operators ===
    /// `/`
    Slash,
    /// `//`
    DoubleSlash,
    /// `=`
    EqualTo,
    /// `=>`
    Arrow,
    /// `!=`
    NotEqualTo,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqualTo,
    /// `>>`
    NodeAfter,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqualTo,
    /// `<<`
    NodeBefore,
    /// `:`
    Colon,
    /// `::`
    AxisSeparator,
    /// `:=`
    Assign,
    /// `|` or the keyword `union`.
    Union,
    /// `||`
    Concat,
    /// `!`
    SimpleMap,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `?` as an occurrence indicator or argument placeholder.
    QuestionMark,
    /// `?` as the lookup operator.
    Lookup,
    /// `#` in a named function reference.
    Hash,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `@`
    AtSign,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    ContextItem,
    /// `..`
    ParentStep,
}

impl TokenKind {
    /// Source text of a reserved word kind.
    ///
    /// `Union` is reported as `union`; its `|` spelling is an operator.
    pub fn keyword_str(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Div => "div",
            TokenKind::Mod => "mod",
            TokenKind::Instance => "instance",
            TokenKind::Of => "of",
            TokenKind::Cast => "cast",
            TokenKind::Castable => "castable",
            TokenKind::As => "as",
            TokenKind::Treat => "treat",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Some => "some",
            TokenKind::Every => "every",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::To => "to",
            TokenKind::Satisfies => "satisfies",
            TokenKind::Union => "union",
            TokenKind::Intersect => "intersect",
            TokenKind::Except => "except",
            TokenKind::Idiv => "idiv",
            TokenKind::Eq => "eq",
            TokenKind::Ne => "ne",
            TokenKind::Lt => "lt",
            TokenKind::Le => "le",
            TokenKind::Gt => "gt",
            TokenKind::Ge => "ge",
            TokenKind::Is => "is",
            TokenKind::Typeswitch => "typeswitch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::At => "at",
            TokenKind::Where => "where",
            TokenKind::Order => "order",
            TokenKind::By => "by",
            TokenKind::Ascending => "ascending",
            TokenKind::Descending => "descending",
            TokenKind::Stable => "stable",
            TokenKind::Collation => "collation",
            TokenKind::Import => "import",
            TokenKind::Schema => "schema",
            TokenKind::Module => "module",
            TokenKind::Preserve => "preserve",
            TokenKind::Strip => "strip",
            TokenKind::Function => "function",
            TokenKind::Let => "let",
            TokenKind::Map => "map",
            TokenKind::Array => "array",
            _ => return None,
        };
        Some(text)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.keyword_str().is_some()
    }

    /// Kinds whose lexeme is always a name: identifiers, qualified names,
    /// axis and function names, and reserved words. `Union` is excluded
    /// because it is also spelled `|`.
    pub fn is_name(self) -> bool {
        match self {
            TokenKind::Identifier
            | TokenKind::QName
            | TokenKind::UriQualifiedName
            | TokenKind::AxisName
            | TokenKind::FunctionName => true,
            TokenKind::Union => false,
            other => other.is_keyword(),
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::DecimalLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::StringLiteral
        )
    }

    /// Human-readable name for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::QName => "qualified name",
            TokenKind::UriQualifiedName => "URI-qualified name",
            TokenKind::VariableReference => "variable reference",
            TokenKind::AxisName => "axis name",
            TokenKind::FunctionName => "function name",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::DecimalLiteral => "decimal literal",
            TokenKind::DoubleLiteral => "double literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Slash => "/",
            TokenKind::DoubleSlash => "//",
            TokenKind::EqualTo => "=",
            TokenKind::Arrow => "=>",
            TokenKind::NotEqualTo => "!=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanEqualTo => ">=",
            TokenKind::NodeAfter => ">>",
            TokenKind::LessThan => "<",
            TokenKind::LessThanEqualTo => "<=",
            TokenKind::NodeBefore => "<<",
            TokenKind::Colon => ":",
            TokenKind::AxisSeparator => "::",
            TokenKind::Assign => ":=",
            TokenKind::Union => "|",
            TokenKind::Concat => "||",
            TokenKind::SimpleMap => "!",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::QuestionMark | TokenKind::Lookup => "?",
            TokenKind::Hash => "#",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::AtSign => "@",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::ContextItem => ".",
            TokenKind::ParentStep => "..",
            keyword => keyword.keyword_str().unwrap_or("keyword"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
