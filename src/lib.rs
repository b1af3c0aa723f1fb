//! # char-trie
//!
//! A character-indexed prefix tree mapping non-empty strings to values.
//!
//! Besides exact lookup the trie answers prefix queries (enumeration,
//! counting, longest stored prefix) and approximate matches counted as
//! positional character substitutions. [`affix`] and [`common_prefix`] build
//! suffix counting, prefix existence and longest-common-prefix on top of the
//! trie's public traversal API.
//!
//! ## Example
//!
//! ```rust
//! use char_trie::Trie;
//!
//! let mut trie: Trie<u32> = Trie::new();
//! trie.put("cat", 1)?;
//! trie.put("cats", 4)?;
//! trie.put("can", 2)?;
//!
//! assert_eq!(trie.get("cat")?, Some(&1));
//! assert_eq!(trie.count_words_with_prefix("ca"), 3);
//! assert_eq!(trie.longest_prefix_of("catsup")?, "cats");
//!
//! trie.delete("cat")?;
//! assert_eq!(trie.get("cats")?, Some(&4));
//! assert_eq!(trie.get_corrections("cap", 1)?, vec!["can"]);
//! # Ok::<(), char_trie::TrieError>(())
//! ```

pub mod affix;
pub mod common_prefix;
mod error;
mod node;
mod trie;

pub use affix::{count_words_with_suffix, has_prefix};
pub use common_prefix::find_longest_common_word;
pub use error::{Result, TrieError};
pub use node::{Children, Node};
pub use trie::{CorrectionConfig, Iter, Trie, DEFAULT_MAX_DISTANCE};

#[cfg(test)]
mod proptests;
