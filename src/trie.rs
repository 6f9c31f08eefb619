//! A trie over the five-symbol DNA alphabet, keyed by fixed-length strings of bases.
//!
//! The source this engine is modeled on indexes a 256-wide child array per node so the
//! byte-dispatch stays branch-free regardless of alphabet. That wastes 251 empty slots
//! per node for our five-symbol alphabet, so nodes here hold a 5-slot array instead (see
//! the redesign notes this module follows); the lookup semantics — first character
//! forced exact, at most one mismatch afterward — are unchanged.
//!
//! Nodes live in a flat arena (`Vec<Node<V>>`) addressed by index rather than behind
//! owned pointers, so dropping a `Trie` is an ordinary `Vec` drop with no recursive
//! node-by-node teardown.

use common::base::Base;

const ALPHABET_SIZE: usize = 5;

fn symbol_index(c: u8) -> Option<usize> {
    match Base::from_char(c as char)? {
        Base::A => Some(0),
        Base::C => Some(1),
        Base::G => Some(2),
        Base::T => Some(3),
        Base::N => Some(4),
    }
}

struct Node<V> {
    children: [Option<usize>; ALPHABET_SIZE],
    values: Vec<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Node {
            children: [None; ALPHABET_SIZE],
            values: Vec::new(),
        }
    }
}

/// A 5-ary trie mapping fixed-length DNA substrings to value multisets.
pub struct Trie<V> {
    nodes: Vec<Node<V>>,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::new()],
        }
    }

    /// Discards all nodes and returns the trie to the empty state.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::new());
    }

    fn allocate(&mut self) -> usize {
        self.nodes.push(Node::new());
        self.nodes.len() - 1
    }

    /// Appends `value` to the multiset stored at the node reached by `key`'s byte path,
    /// creating nodes as needed. Keys outside {A, C, G, T, N} are a caller bug, not a
    /// runtime condition the trie needs to recover from: the matcher that owns this
    /// trie only ever keys it with bases already validated by the loader.
    pub fn insert(&mut self, key: &str, value: V) {
        let mut current = 0usize;
        for b in key.bytes() {
            let idx = symbol_index(b).expect("trie keys must be over {A, C, G, T, N}");
            current = match self.nodes[current].children[idx] {
                Some(n) => n,
                None => {
                    let n = self.allocate();
                    self.nodes[current].children[idx] = Some(n);
                    n
                }
            };
        }
        self.nodes[current].values.push(value);
    }
}

impl<V: Clone> Trie<V> {
    /// Finds all values reachable from `key`: the first character must match exactly;
    /// `exact_only = false` additionally allows exactly one mismatch at any later
    /// position. Order is unspecified; duplicates from distinct paths are preserved.
    pub fn find(&self, key: &str, exact_only: bool) -> Vec<V> {
        let mut out = Vec::new();
        if key.is_empty() {
            out.extend(self.nodes[0].values.iter().cloned());
            return out;
        }

        let bytes = key.as_bytes();
        let Some(idx0) = symbol_index(bytes[0]) else {
            return out;
        };
        let Some(first_child) = self.nodes[0].children[idx0] else {
            return out;
        };

        let budget = if exact_only { 0 } else { 1 };
        self.collect(first_child, &bytes[1..], budget, &mut out);
        out
    }

    fn collect(&self, node: usize, remaining: &[u8], budget: u8, out: &mut Vec<V>) {
        if remaining.is_empty() {
            out.extend(self.nodes[node].values.iter().cloned());
            return;
        }

        let exact_idx = symbol_index(remaining[0]);
        if let Some(idx) = exact_idx {
            if let Some(child) = self.nodes[node].children[idx] {
                self.collect(child, &remaining[1..], budget, out);
            }
        }

        if budget > 0 {
            for (idx, child) in self.nodes[node].children.iter().enumerate() {
                if Some(idx) == exact_idx {
                    continue;
                }
                if let Some(child) = child {
                    self.collect(*child, &remaining[1..], 0, out);
                }
            }
        }
    }
}
