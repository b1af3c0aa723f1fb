//! Character trie engine.
//!
//! [`Trie`] owns the root [`Node`] and the count of stored keys. Every path
//! from the root spells a prefix of some stored key; a node whose payload is
//! set marks the end of a key. Insertion creates missing nodes on demand and
//! removal prunes nodes that end up both childless and without a payload.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::{non_empty, Result};
use crate::node::Node;

// =============================================================================
// Configuration
// =============================================================================

/// Mismatch budget used by [`CorrectionConfig::default`].
pub const DEFAULT_MAX_DISTANCE: usize = 1;

/// Parameters for approximate matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectionConfig {
    /// Largest number of positional mismatches a reported key may have.
    pub max_distance: usize,
    /// Stop after this many corrections. `None` collects all of them.
    pub limit: Option<usize>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            limit: None,
        }
    }
}

// =============================================================================
// Trie
// =============================================================================

/// A map from non-empty strings to values, indexed one `char` per edge.
///
/// Keys are enumerated in lexicographic `char` order.
#[derive(Clone)]
pub struct Trie<V> {
    root: Node<V>,
    /// Number of terminal nodes reachable from `root`.
    size: usize,
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            size: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The root node. It stands for the empty prefix and is never terminal.
    #[inline]
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Node at the end of `prefix`, or `None` if no stored key passes
    /// through it. The empty prefix yields the root.
    pub fn node(&self, prefix: &str) -> Option<&Node<V>> {
        descend(&self.root, prefix.chars())
    }

    fn node_mut(&mut self, path: impl IntoIterator<Item = char>) -> Option<&mut Node<V>> {
        let mut current = &mut self.root;
        for c in path {
            current = current.child_mut(c)?;
        }
        Some(current)
    }

    /// Stores `value` under `key`, creating any missing nodes along the way.
    ///
    /// Returns the payload previously stored under `key`.
    pub fn put(&mut self, key: &str, value: V) -> Result<Option<V>> {
        let key = non_empty("put", "key", key)?;

        let mut current = &mut self.root;
        for c in key.chars() {
            current = current.child_or_insert(c);
        }
        let old = current.replace_value(value);
        if old.is_none() {
            self.size += 1;
        }
        trace!(key, replaced = old.is_some(), size = self.size, "put");
        Ok(old)
    }

    pub fn get(&self, key: &str) -> Result<Option<&V>> {
        let key = non_empty("get", "key", key)?;
        Ok(self.node(key).and_then(Node::value))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut V>> {
        let key = non_empty("get_mut", "key", key)?;
        Ok(self.node_mut(key.chars()).and_then(Node::value_mut))
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        let key = non_empty("contains", "key", key)?;
        Ok(self.node(key).is_some_and(Node::is_terminal))
    }

    /// Whether `word` is a stored key.
    pub fn check_spelling(&self, word: &str) -> Result<bool> {
        let word = non_empty("check_spelling", "word", word)?;
        let found = self.node(word).is_some_and(Node::is_terminal);
        debug!(word, found, "spelling check");
        Ok(found)
    }

    /// Removes `key` and returns its payload, pruning the branch it leaves
    /// behind.
    pub fn remove(&mut self, key: &str) -> Result<Option<V>> {
        let key = non_empty("remove", "key", key)?;
        Ok(self.remove_entry(key).map(|(value, _)| value))
    }

    /// Removes `key`, pruning the branch it leaves behind.
    ///
    /// Returns `true` when pruning reached the root and left it without
    /// children, i.e. the trie is structurally empty again. A key that holds
    /// no payload is a no-op returning `false`.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let key = non_empty("delete", "key", key)?;
        Ok(self
            .remove_entry(key)
            .is_some_and(|(_, emptied_root)| emptied_root))
    }

    fn remove_entry(&mut self, key: &str) -> Option<(V, bool)> {
        let path: Vec<char> = key.chars().collect();

        // Descend, recording for each ancestor whether it survives losing the
        // child on this path: the root always does, as does any node that is
        // terminal or has another child.
        let mut survives: Vec<bool> = Vec::with_capacity(path.len());
        let mut current = &self.root;
        for &c in &path {
            let keep =
                survives.is_empty() || current.is_terminal() || current.child_count() > 1;
            survives.push(keep);
            current = current.child(c)?;
        }
        if !current.is_terminal() {
            return None;
        }
        let keep_target = !current.is_leaf();

        let value = self.node_mut(path.iter().copied())?.take_value()?;
        self.size -= 1;
        trace!(key, size = self.size, "removed");

        if keep_target {
            return Some((value, false));
        }

        // Unwind to the deepest surviving ancestor; everything below it on the
        // path is now childless and non-terminal.
        let mut depth = path.len();
        while let Some(keep) = survives.pop() {
            depth -= 1;
            if keep {
                break;
            }
        }
        let anchor = self.node_mut(path[..depth].iter().copied())?;
        anchor.remove_child(path[depth]);
        debug!(key, pruned = path.len() - depth, anchor_depth = depth, "pruned branch");

        let emptied_root = depth == 0 && self.root.is_leaf();
        Some((value, emptied_root))
    }

    /// Longest stored key that is a prefix of `s`, or `""` if there is none.
    pub fn longest_prefix_of(&self, s: &str) -> Result<String> {
        let s = non_empty("longest_prefix_of", "s", s)?;

        let mut current = &self.root;
        let mut longest = 0usize;
        for (i, c) in s.char_indices() {
            match current.child(c) {
                Some(next) => current = next,
                None => break,
            }
            if current.is_terminal() {
                longest = i + c.len_utf8();
            }
        }
        Ok(s[..longest].to_owned())
    }

    /// All stored keys starting with `prefix`. Empty if no key does.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = non_empty("keys_with_prefix", "prefix", prefix)?;
        Ok(self.iter_prefix(prefix).map(|(key, _)| key).collect())
    }

    /// Completions of `prefix`; same as [`Trie::keys_with_prefix`].
    pub fn autocomplete(&self, prefix: &str) -> Result<Vec<String>> {
        self.keys_with_prefix(prefix)
    }

    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Number of stored keys starting with `prefix`. The empty prefix counts
    /// every key.
    pub fn count_words_with_prefix(&self, prefix: &str) -> usize {
        self.node(prefix).map_or(0, Node::terminal_count)
    }

    /// Stored keys within `max_distance` positional mismatches of `word`,
    /// excluding `word` itself.
    pub fn get_corrections(&self, word: &str, max_distance: usize) -> Result<Vec<String>> {
        self.get_corrections_with(
            word,
            &CorrectionConfig {
                max_distance,
                ..CorrectionConfig::default()
            },
        )
    }

    /// Breadth-first search for keys that differ from `word` by at least one
    /// and at most `config.max_distance` character substitutions.
    ///
    /// A candidate's character at position `i` is compared to `word`'s
    /// character at `i`; positions past the end of `word` always mismatch.
    /// Insertions and deletions are not considered. Results come out
    /// shortest key first.
    pub fn get_corrections_with(&self, word: &str, config: &CorrectionConfig) -> Result<Vec<String>> {
        let word = non_empty("get_corrections", "word", word)?;
        let target: Vec<char> = word.chars().collect();
        let limit = config.limit.unwrap_or(usize::MAX);

        let mut corrections = Vec::new();
        let mut queue: VecDeque<Candidate<'_, V>> = VecDeque::new();
        queue.push_back(Candidate {
            node: &self.root,
            path: String::new(),
            depth: 0,
            distance: 0,
        });

        while let Some(candidate) = queue.pop_front() {
            if corrections.len() >= limit {
                break;
            }
            if candidate.node.is_terminal() && candidate.distance > 0 {
                corrections.push(candidate.path.clone());
            }

            let expected = target.get(candidate.depth);
            for (c, child) in candidate.node.children() {
                let distance = candidate.distance + usize::from(expected != Some(&c));
                if distance > config.max_distance {
                    continue;
                }
                let mut path = String::with_capacity(candidate.path.len() + c.len_utf8());
                path.push_str(&candidate.path);
                path.push(c);
                queue.push_back(Candidate {
                    node: child,
                    path,
                    depth: candidate.depth + 1,
                    distance,
                });
            }
        }

        debug!(
            word,
            max_distance = config.max_distance,
            found = corrections.len(),
            "corrections"
        );
        Ok(corrections)
    }

    /// Depth-first iterator over all `(key, value)` pairs in key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(String::new(), &self.root)
    }

    /// Depth-first iterator over the pairs whose key starts with `prefix`.
    pub fn iter_prefix(&self, prefix: &str) -> Iter<'_, V> {
        match self.node(prefix) {
            Some(node) => Iter::new(prefix.to_owned(), node),
            None => Iter::empty(),
        }
    }
}

fn descend<V>(from: &Node<V>, path: impl IntoIterator<Item = char>) -> Option<&Node<V>> {
    let mut current = from;
    for c in path {
        current = current.child(c)?;
    }
    Some(current)
}

/// Queue entry for the corrections search.
struct Candidate<'a, V> {
    node: &'a Node<V>,
    path: String,
    /// Characters in `path`.
    depth: usize,
    distance: usize,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for Trie<V> {
    /// Empty keys cannot be stored and are skipped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Err(err) = self.put(key.as_ref(), value) {
                debug!(%err, "skipping key");
            }
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, V> {
    /// Key of the node most recently popped; truncated and extended in place.
    path: String,
    /// `(parent key length, edge, node)` still to visit.
    stack: Vec<(usize, Option<char>, &'a Node<V>)>,
}

impl<'a, V> Iter<'a, V> {
    fn new(path: String, node: &'a Node<V>) -> Self {
        Self {
            stack: vec![(path.len(), None, node)],
            path,
        }
    }

    fn empty() -> Self {
        Self {
            path: String::new(),
            stack: Vec::new(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((len, edge, node)) = self.stack.pop() {
            self.path.truncate(len);
            if let Some(c) = edge {
                self.path.push(c);
            }
            let here = self.path.len();
            // Reverse push so the smallest edge is visited next.
            for (c, child) in node.children().rev() {
                self.stack.push((here, Some(c), child));
            }
            if let Some(value) = node.value() {
                return Some((self.path.clone(), value));
            }
        }
        None
    }
}
