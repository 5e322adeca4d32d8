//! Reserved-word tables, one layer per `XPath` version.
//!
//! A grammar's trie holds every layer introduced at or before its version.
//! Layers only add words; none removes or reclassifies an earlier one.

use crate::{TokenKind, XPathVersion};

type Words = &'static [(&'static str, TokenKind)];

const AXES: Words = &[
    ("ancestor", TokenKind::AxisName),
    ("ancestor-or-self", TokenKind::AxisName),
    ("attribute", TokenKind::AxisName),
    ("child", TokenKind::AxisName),
    ("descendant", TokenKind::AxisName),
    ("descendant-or-self", TokenKind::AxisName),
    ("following", TokenKind::AxisName),
    ("following-sibling", TokenKind::AxisName),
    ("namespace", TokenKind::AxisName),
    ("parent", TokenKind::AxisName),
    ("preceding", TokenKind::AxisName),
    ("preceding-sibling", TokenKind::AxisName),
    ("self", TokenKind::AxisName),
];

const OPERATOR_WORDS_1_0: Words = &[
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("div", TokenKind::Div),
    ("mod", TokenKind::Mod),
];

/// Core function library and node-type tests.
const FUNCTIONS_1_0: &[&str] = &[
    // node set
    "last",
    "position",
    "count",
    "id",
    "local-name",
    "namespace-uri",
    "name",
    // string
    "string",
    "concat",
    "starts-with",
    "contains",
    "substring-before",
    "substring-after",
    "substring",
    "string-length",
    "normalize-space",
    "translate",
    // boolean
    "boolean",
    "not",
    "true",
    "false",
    "lang",
    // number
    "number",
    "sum",
    "floor",
    "ceiling",
    "round",
    // node tests
    "node",
    "text",
    "comment",
    "processing-instruction",
];

const KEYWORDS_2_0: Words = &[
    ("instance", TokenKind::Instance),
    ("of", TokenKind::Of),
    ("cast", TokenKind::Cast),
    ("castable", TokenKind::Castable),
    ("as", TokenKind::As),
    ("treat", TokenKind::Treat),
    ("return", TokenKind::Return),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("some", TokenKind::Some),
    ("every", TokenKind::Every),
    ("if", TokenKind::If),
    ("then", TokenKind::Then),
    ("else", TokenKind::Else),
    ("to", TokenKind::To),
    ("satisfies", TokenKind::Satisfies),
    ("union", TokenKind::Union),
    ("intersect", TokenKind::Intersect),
    ("except", TokenKind::Except),
    ("idiv", TokenKind::Idiv),
    ("eq", TokenKind::Eq),
    ("ne", TokenKind::Ne),
    ("lt", TokenKind::Lt),
    ("le", TokenKind::Le),
    ("gt", TokenKind::Gt),
    ("ge", TokenKind::Ge),
    ("is", TokenKind::Is),
    ("typeswitch", TokenKind::Typeswitch),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("at", TokenKind::At),
    ("where", TokenKind::Where),
    ("order", TokenKind::Order),
    ("by", TokenKind::By),
    ("ascending", TokenKind::Ascending),
    ("descending", TokenKind::Descending),
    ("stable", TokenKind::Stable),
    ("collation", TokenKind::Collation),
    ("import", TokenKind::Import),
    ("schema", TokenKind::Schema),
    ("module", TokenKind::Module),
    ("preserve", TokenKind::Preserve),
    ("strip", TokenKind::Strip),
];

const FUNCTIONS_2_0: &[&str] = &[
    // sequences
    "deep-equal",
    "exactly-one",
    "zero-or-one",
    "one-or-more",
    "copy-of",
    "distinct-values",
    "index-of",
    "insert-before",
    "remove",
    "reverse",
    "subsequence",
    "empty",
    "exists",
    "avg",
    "max",
    "min",
    "data",
    "doc",
    "collection",
    "root",
    // strings
    "upper-case",
    "lower-case",
    "ends-with",
    "string-join",
    "matches",
    "replace",
    "tokenize",
    "abs",
    "round-half-to-even",
    // kind tests
    "element",
    "document-node",
    "schema-element",
    "schema-attribute",
    "empty-sequence",
    "item",
];

const KEYWORDS_3_0: Words = &[
    ("function", TokenKind::Function),
    ("let", TokenKind::Let),
    ("map", TokenKind::Map),
    ("array", TokenKind::Array),
];

const FUNCTIONS_3_0: &[&str] = &[
    "function-lookup",
    "function-name",
    "function-arity",
    "for-each",
    "for-each-pair",
    "filter",
    "fold-left",
    "fold-right",
    "head",
    "tail",
    "innermost",
    "outermost",
    "has-children",
    "path",
    "format-integer",
    "serialize",
    "parse-xml",
];

const FUNCTIONS_3_1: &[&str] = &[
    "map:merge",
    "map:size",
    "map:keys",
    "map:contains",
    "map:get",
    "map:find",
    "map:put",
    "map:entry",
    "map:remove",
    "map:for-each",
    "array:size",
    "array:get",
    "array:put",
    "array:append",
    "array:subarray",
    "array:remove",
    "array:insert-before",
    "array:head",
    "array:tail",
    "array:reverse",
    "array:join",
    "array:flatten",
    "array:for-each",
    "array:filter",
    "array:fold-left",
    "array:fold-right",
    "array:sort",
    "parse-json",
    "json-doc",
    "json-to-xml",
    "xml-to-json",
    "sort",
];

/// One version's additions to the vocabulary.
struct Layer {
    since: XPathVersion,
    words: Words,
    functions: &'static [&'static str],
}

const LAYERS: &[Layer] = &[
    Layer {
        since: XPathVersion::V1_0,
        words: AXES,
        functions: FUNCTIONS_1_0,
    },
    Layer {
        since: XPathVersion::V1_0,
        words: OPERATOR_WORDS_1_0,
        functions: &[],
    },
    Layer {
        since: XPathVersion::V2_0,
        words: KEYWORDS_2_0,
        functions: FUNCTIONS_2_0,
    },
    Layer {
        since: XPathVersion::V3_0,
        words: KEYWORDS_3_0,
        functions: FUNCTIONS_3_0,
    },
    Layer {
        since: XPathVersion::V3_1,
        words: &[],
        functions: FUNCTIONS_3_1,
    },
];

/// Every reserved word recognized by `version`, with its kind.
pub(crate) fn words(version: XPathVersion) -> impl Iterator<Item = (&'static str, TokenKind)> {
    LAYERS
        .iter()
        .filter(move |layer| layer.since <= version)
        .flat_map(|layer| {
            let functions = layer
                .functions
                .iter()
                .map(|&name| (name, TokenKind::FunctionName));
            layer.words.iter().copied().chain(functions)
        })
}
