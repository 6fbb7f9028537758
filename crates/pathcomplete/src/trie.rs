//! Prefix tree over 7-bit byte strings.
//!
//! Keys are treated as byte sequences restricted to the range 0-127; a byte
//! outside that range is rejected up front rather than stored (see
//! [`CompletionError::KeyOutOfRange`]). Children live in a `BTreeMap` keyed
//! by byte value, so every traversal visits subtrees in ascending byte order
//! and match lists come out byte-lexicographically sorted without an extra
//! sort pass.
//!
//! Nodes are only ever created while inserting a validated key, and an
//! insertion always runs to completion, so every node sits on the path of
//! at least one inserted key. Nothing is ever pruned; with insert-only
//! usage no node can become unreachable.

use std::collections::BTreeMap;

use crate::error::{CompletionError, Result};

/// One node of the prefix tree: sparse per-byte children plus an end-of-key
/// marker set when some inserted key ends exactly here.
#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    terminal: bool,
}

/// The prefix tree. Owns the root node and a count of distinct keys.
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
    key_count: usize,
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key`, creating nodes along its byte path as needed.
    ///
    /// Strictly additive: existing nodes and terminal markers are never
    /// unset. Inserting the same key twice changes nothing after the first
    /// time. The key is validated before any node is touched, so a rejected
    /// key leaves the tree exactly as it was.
    pub fn insert(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;

        let mut node = &mut self.root;
        for &byte in key.as_bytes() {
            node = node.children.entry(byte).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.key_count += 1;
        }
        Ok(())
    }

    /// Returns every inserted key starting with `prefix`, in ascending byte
    /// order, including `prefix` itself when it was inserted as a complete
    /// key.
    ///
    /// The walk down to the prefix node creates nothing; if any byte of the
    /// prefix has no child the result is empty. The match list is built
    /// fresh for this call, so consecutive searches never see each other's
    /// results.
    pub fn search_by_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        validate_key(prefix)?;

        let mut node = &self.root;
        for &byte in prefix.as_bytes() {
            match node.children.get(&byte) {
                Some(child) => node = child,
                None => return Ok(Vec::new()),
            }
        }

        let mut scratch = prefix.as_bytes().to_vec();
        let mut matches = Vec::new();
        collect_matches(node, &mut scratch, &mut matches);
        Ok(matches)
    }

    /// Every inserted key, in ascending byte order.
    ///
    /// Equivalent to `search_by_prefix("")` but infallible, since there is
    /// no input to validate.
    pub fn keys(&self) -> Vec<String> {
        let mut scratch = Vec::new();
        let mut matches = Vec::new();
        collect_matches(&self.root, &mut scratch, &mut matches);
        matches
    }

    /// Returns true if `key` was inserted as a complete key.
    ///
    /// A key containing bytes outside the 7-bit range simply has no path in
    /// the tree, so this never needs to fail.
    pub fn contains(&self, key: &str) -> bool {
        let mut node = &self.root;
        for &byte in key.as_bytes() {
            match node.children.get(&byte) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.terminal
    }

    /// Number of distinct keys inserted.
    pub fn len(&self) -> usize {
        self.key_count
    }

    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }
}

/// Depth-first enumeration below `node`, ascending byte order.
///
/// `scratch` holds the bytes consumed so far. Each step pushes one byte
/// before descending and pops it on the way back, so sibling subtrees never
/// observe each other's bytes.
fn collect_matches(node: &TrieNode, scratch: &mut Vec<u8>, matches: &mut Vec<String>) {
    if node.terminal {
        // Every stored byte is 7-bit, so the buffer is always valid UTF-8.
        matches.push(String::from_utf8_lossy(scratch).into_owned());
    }
    for (&byte, child) in &node.children {
        scratch.push(byte);
        collect_matches(child, scratch, matches);
        scratch.pop();
    }
}

/// Rejects the first byte of `key` outside the supported 0-127 range.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if let Some(offset) = key.bytes().position(|byte| !byte.is_ascii()) {
        return Err(CompletionError::KeyOutOfRange {
            byte: key.as_bytes()[offset],
            offset,
        });
    }
    Ok(())
}
