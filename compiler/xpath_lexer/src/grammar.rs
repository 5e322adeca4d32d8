//! Grammar descriptors: one scanning engine, parameterized per version.
//!
//! A [`Grammar`] is the reserved-word trie plus a set of [`Features`]
//! toggles for the version. Each later version is a superset of the one
//! before it, both in vocabulary and in features.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::{vocabulary, KeywordTrie};

/// Supported `XPath` language versions, oldest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XPathVersion {
    #[cfg_attr(feature = "serde", serde(rename = "1.0"))]
    V1_0,
    #[cfg_attr(feature = "serde", serde(rename = "2.0"))]
    V2_0,
    #[cfg_attr(feature = "serde", serde(rename = "3.0"))]
    V3_0,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "3.1"))]
    V3_1,
}

impl XPathVersion {
    pub const ALL: [XPathVersion; 4] = [
        XPathVersion::V1_0,
        XPathVersion::V2_0,
        XPathVersion::V3_0,
        XPathVersion::V3_1,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            XPathVersion::V1_0 => "1.0",
            XPathVersion::V2_0 => "2.0",
            XPathVersion::V3_0 => "3.0",
            XPathVersion::V3_1 => "3.1",
        }
    }

    /// Lexical features available in this version.
    pub fn features(self) -> Features {
        let mut features = Features::empty();
        if self >= XPathVersion::V2_0 {
            features |= Features::COMMENTS
                | Features::VARIABLE_REFERENCES
                | Features::QUALIFIED_NAMES
                | Features::ESCAPED_QUOTES
                | Features::EXPONENT_LITERALS
                | Features::OCCURRENCE_INDICATORS;
        }
        if self >= XPathVersion::V3_0 {
            features |= Features::INLINE_FUNCTIONS
                | Features::ARROW_OPERATOR
                | Features::SIMPLE_MAP_OPERATOR
                | Features::LOOKUP_OPERATOR
                | Features::BRACED_URI_LITERALS;
        }
        if self >= XPathVersion::V3_1 {
            features |= Features::STRING_CONCAT;
        }
        features
    }
}

impl fmt::Display for XPathVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version string that names no supported `XPath` version.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported XPath version `{0}` (expected 1.0, 2.0, 3.0 or 3.1)")]
pub struct UnknownVersion(pub String);

impl FromStr for XPathVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(XPathVersion::V1_0),
            "2" | "2.0" => Ok(XPathVersion::V2_0),
            "3" | "3.0" => Ok(XPathVersion::V3_0),
            "3.1" => Ok(XPathVersion::V3_1),
            other => Err(UnknownVersion(other.to_owned())),
        }
    }
}

bitflags::bitflags! {
    /// Lexical constructs that differ between versions.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        /// `(: ... :)`, nestable.
        const COMMENTS = 1 << 0;
        /// `$name`.
        const VARIABLE_REFERENCES = 1 << 1;
        /// `prefix:local` scanned as one token.
        const QUALIFIED_NAMES = 1 << 2;
        /// `''` and `""` inside string literals.
        const ESCAPED_QUOTES = 1 << 3;
        /// `1.5e3` double literals.
        const EXPONENT_LITERALS = 1 << 4;
        /// `?` as an occurrence indicator.
        const OCCURRENCE_INDICATORS = 1 << 5;
        /// `#` in `name#arity` references.
        const INLINE_FUNCTIONS = 1 << 6;
        /// `=>`.
        const ARROW_OPERATOR = 1 << 7;
        /// Bare `!`.
        const SIMPLE_MAP_OPERATOR = 1 << 8;
        /// `?key`, `?1`, `?(...)`, `?*`.
        const LOOKUP_OPERATOR = 1 << 9;
        /// `Q{uri}local`.
        const BRACED_URI_LITERALS = 1 << 10;
        /// `||`.
        const STRING_CONCAT = 1 << 11;
    }
}

/// Vocabulary and features for one `XPath` version.
#[derive(Debug)]
pub struct Grammar {
    version: XPathVersion,
    features: Features,
    trie: KeywordTrie,
}

impl Grammar {
    /// The shared grammar for `version`, built on first use.
    pub fn for_version(version: XPathVersion) -> &'static Grammar {
        static GRAMMARS: [OnceLock<Grammar>; 4] =
            [OnceLock::new(), OnceLock::new(), OnceLock::new(), OnceLock::new()];
        GRAMMARS[version as usize].get_or_init(|| Grammar::build(version))
    }

    /// Build an unshared grammar. Prefer [`Grammar::for_version`].
    pub fn build(version: XPathVersion) -> Grammar {
        let trie = KeywordTrie::from_words(vocabulary::words(version));
        tracing::debug!(
            %version,
            words = trie.len(),
            nodes = trie.node_count(),
            "built keyword trie"
        );
        Grammar {
            version,
            features: version.features(),
            trie,
        }
    }

    #[inline]
    pub fn version(&self) -> XPathVersion {
        self.version
    }

    #[inline]
    pub fn features(&self) -> Features {
        self.features
    }

    #[inline]
    pub fn supports(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }

    #[inline]
    pub fn trie(&self) -> &KeywordTrie {
        &self.trie
    }
}
