//! Byte-keyed trie mapping reserved words to token kinds.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; all edges share
//! one `FxHashMap` keyed by `(parent, byte)`. The tokenizer walks the trie
//! in lock-step with its name scan and asks for the terminal kind only once
//! the name has ended, so classification is by exact match: `ancestor` is
//! an axis name but `ancestors` is not.

use rustc_hash::FxHashMap;

use crate::TokenKind;

/// Index of a trie node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct KeywordTrie {
    /// Terminal kind per node, indexed by `NodeId`.
    terminals: Vec<Option<TokenKind>>,
    edges: FxHashMap<(NodeId, u8), NodeId>,
    words: usize,
}

impl KeywordTrie {
    /// A trie with only the root node.
    pub fn new() -> Self {
        KeywordTrie {
            terminals: vec![None],
            edges: FxHashMap::default(),
            words: 0,
        }
    }

    /// Build a trie from `(word, kind)` pairs. Later duplicates win.
    pub fn from_words<W: AsRef<[u8]>>(words: impl IntoIterator<Item = (W, TokenKind)>) -> Self {
        let mut trie = KeywordTrie::new();
        for (word, kind) in words {
            trie.insert(word, kind);
        }
        trie
    }

    /// Insert `word`, marking its last node terminal with `kind`.
    ///
    /// Re-inserting a word replaces its kind.
    pub fn insert(&mut self, word: impl AsRef<[u8]>, kind: TokenKind) {
        let mut node = NodeId::ROOT;
        for &byte in word.as_ref() {
            let terminals = &mut self.terminals;
            node = *self.edges.entry((node, byte)).or_insert_with(|| {
                let child = NodeId(terminals.len() as u32);
                terminals.push(None);
                child
            });
        }
        if self.terminals[node.index()].replace(kind).is_none() {
            self.words += 1;
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// One-step child lookup.
    #[inline]
    pub fn traverse(&self, node: NodeId, byte: u8) -> Option<NodeId> {
        self.edges.get(&(node, byte)).copied()
    }

    /// Kind recorded at `node`, if a word ends there.
    #[inline]
    pub fn terminal(&self, node: NodeId) -> Option<TokenKind> {
        self.terminals.get(node.index()).copied().flatten()
    }

    /// Exact-match lookup of a whole word.
    pub fn lookup(&self, word: impl AsRef<[u8]>) -> Option<TokenKind> {
        let mut walk = self.walk();
        for &byte in word.as_ref() {
            walk.step(byte);
        }
        walk.terminal()
    }

    /// Start a lock-step walk from the root.
    #[inline]
    pub fn walk(&self) -> TrieWalk<'_> {
        TrieWalk {
            trie: self,
            node: Some(NodeId::ROOT),
        }
    }

    /// Number of words stored.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.terminals.len()
    }
}

impl Default for KeywordTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of an in-progress byte-by-byte walk.
///
/// Once a byte has no edge the walk is dead and stays dead; the scan that
/// drives it keeps going, and the result is simply "not a reserved word".
#[derive(Clone, Copy, Debug)]
pub struct TrieWalk<'t> {
    trie: &'t KeywordTrie,
    node: Option<NodeId>,
}

impl TrieWalk<'_> {
    #[inline]
    pub fn step(&mut self, byte: u8) {
        self.node = self.node.and_then(|node| self.trie.traverse(node, byte));
    }

    #[inline]
    pub fn terminal(&self) -> Option<TokenKind> {
        self.node.and_then(|node| self.trie.terminal(node))
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.node.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
