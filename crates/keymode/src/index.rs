//! Character trie mapping chord codes to values.
//!
//! Each node owns its children in an ordered map, so a pre-order walk visits
//! stored values in ascending lexicographic order of their full code. The
//! index is built once and then only queried.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised when populating a [`PrefixIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The empty code has no node of its own to hold a value.
    #[error("cannot index an empty chord code")]
    EmptyCode,
}

/// A single trie node.
#[derive(Debug, Clone)]
struct Node<V> {
    /// Children keyed by the next character of the code.
    children: BTreeMap<char, Node<V>>,
    /// Value stored for the code that ends at this node.
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

/// Prefix tree over chord codes.
#[derive(Debug, Clone)]
pub struct PrefixIndex<V> {
    /// Root node; corresponds to the empty prefix.
    root: Node<V>,
    /// Number of stored values.
    len: usize,
}

impl<V> Default for PrefixIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixIndex<V> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Store `value` under `code`, returning the value it replaced.
    pub fn add(&mut self, code: &str, value: V) -> Result<Option<V>, IndexError> {
        if code.is_empty() {
            return Err(IndexError::EmptyCode);
        }
        let mut node = &mut self.root;
        for c in code.chars() {
            node = node.children.entry(c).or_default();
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Value stored exactly at `code`, if any.
    pub fn get(&self, code: &str) -> Option<&V> {
        self.node(code).and_then(|n| n.value.as_ref())
    }

    /// All values stored at or below `prefix`, ordered by full code.
    pub fn completions(&self, prefix: &str) -> Completions<'_, V> {
        Completions {
            stack: self.node(prefix).into_iter().collect(),
        }
    }

    /// True if at least one stored code starts with `prefix`.
    pub fn has_completion(&self, prefix: &str) -> bool {
        self.completions(prefix).next().is_some()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walk down to the node for `prefix`.
    fn node(&self, prefix: &str) -> Option<&Node<V>> {
        prefix
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

/// Iterator over the values beneath a prefix, see [`PrefixIndex::completions`].
#[derive(Debug)]
pub struct Completions<'a, V> {
    /// Nodes still to visit; the next node to visit is on top.
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iterator for Completions<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children.values().rev());
            if let Some(v) = node.value.as_ref() {
                return Some(v);
            }
        }
        None
    }
}
