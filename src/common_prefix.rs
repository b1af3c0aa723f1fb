//! Longest common prefix of a list of strings.

use tracing::debug;

use crate::error::Result;
use crate::trie::Trie;

/// Longest prefix shared by every string in `strings`.
///
/// The strings are loaded into a fresh [`Trie`]; the candidate then grows one
/// character of the first string at a time while the trie has the edge and
/// every input still starts with it. An empty list yields `""`.
///
/// # Errors
///
/// [`TrieError::InvalidArgument`](crate::TrieError::InvalidArgument) if any
/// string is empty.
pub fn find_longest_common_word<S: AsRef<str>>(strings: &[S]) -> Result<String> {
    let mut trie: Trie<()> = Trie::new();
    for s in strings {
        let s = s.as_ref();
        if !trie.contains(s)? {
            trie.put(s, ())?;
        }
    }

    let Some(first) = strings.first() else {
        return Ok(String::new());
    };
    let first: &str = first.as_ref();

    let mut current = trie.root();
    let mut prefix = String::with_capacity(first.len());
    for c in first.chars() {
        let Some(next) = current.child(c) else {
            break;
        };
        prefix.push(c);
        if !strings.iter().all(|s| s.as_ref().starts_with(prefix.as_str())) {
            prefix.pop();
            break;
        }
        current = next;
    }

    debug!(inputs = strings.len(), keys = trie.len(), prefix = %prefix, "common prefix");
    Ok(prefix)
}
