use pretty_assertions::assert_eq;

use super::*;

fn axes() -> KeywordTrie {
    KeywordTrie::from_words([
        ("ancestor", TokenKind::AxisName),
        ("ancestor-or-self", TokenKind::AxisName),
        ("and", TokenKind::And),
    ])
}

#[test]
fn empty_trie() {
    let trie = KeywordTrie::new();
    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 1);
    assert_eq!(trie.lookup("a"), None);
    assert_eq!(trie.lookup(""), None);
}

#[test]
fn exact_match_only() {
    let trie = axes();
    assert_eq!(trie.lookup("ancestor"), Some(TokenKind::AxisName));
    assert_eq!(trie.lookup("ancestor-or-self"), Some(TokenKind::AxisName));
    assert_eq!(trie.lookup("and"), Some(TokenKind::And));
    assert_eq!(trie.lookup("ancestors"), None);
    assert_eq!(trie.lookup("ancestor-or"), None);
}

#[test]
fn prefix_is_not_terminal() {
    let trie = axes();
    assert_eq!(trie.lookup("an"), None);
    assert_eq!(trie.lookup("ances"), None);
}

#[test]
fn shared_prefixes_share_nodes() {
    let trie = axes();
    // "an" shared, "cestor" + "-or-self" + "d"
    assert_eq!(trie.node_count(), 1 + 2 + 6 + 8 + 1);
    assert_eq!(trie.len(), 3);
}

#[test]
fn reinsert_overwrites_kind() {
    let mut trie = axes();
    trie.insert("and", TokenKind::Identifier);
    assert_eq!(trie.lookup("and"), Some(TokenKind::Identifier));
    assert_eq!(trie.len(), 3);
}

#[test]
fn traverse_step_by_step() {
    let trie = axes();
    let a = trie.traverse(trie.root(), b'a').unwrap();
    let n = trie.traverse(a, b'n').unwrap();
    assert_eq!(trie.terminal(n), None);
    let d = trie.traverse(n, b'd').unwrap();
    assert_eq!(trie.terminal(d), Some(TokenKind::And));
    assert_eq!(trie.traverse(d, b'x'), None);
}

#[test]
fn walk_dies_and_stays_dead() {
    let trie = axes();
    let mut walk = trie.walk();
    for &b in b"anx" {
        walk.step(b);
    }
    assert!(walk.is_dead());
    walk.step(b'd');
    assert!(walk.is_dead());
    assert_eq!(walk.terminal(), None);
}

#[test]
fn colon_is_an_ordinary_edge() {
    let trie = KeywordTrie::from_words([("map:merge", TokenKind::FunctionName)]);
    assert_eq!(trie.lookup("map:merge"), Some(TokenKind::FunctionName));
    assert_eq!(trie.lookup("map"), None);
}

#[test]
fn shared_across_threads() {
    let trie = axes();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| trie.lookup("ancestor-or-self")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(TokenKind::AxisName));
        }
    });
}
