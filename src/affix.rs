//! Suffix counting and prefix existence over a [`Trie`].
//!
//! Both queries only read through the trie's public traversal API and accept
//! the empty string: every key ends with `""` and the root is the path of
//! `""`.

use crate::trie::Trie;

/// Number of stored keys ending with `pattern`.
///
/// Suffixes are not indexed, so this scans every key.
pub fn count_words_with_suffix<V>(trie: &Trie<V>, pattern: &str) -> usize {
    trie.iter().filter(|(key, _)| key.ends_with(pattern)).count()
}

/// Whether some path spells `prefix`, terminal or not.
///
/// Unlike [`Trie::contains`], no key has to end at `prefix`.
pub fn has_prefix<V>(trie: &Trie<V>, prefix: &str) -> bool {
    trie.node(prefix).is_some()
}
