use thiserror::Error;

/// Errors returned by trie operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// A key or prefix argument was empty where a non-empty string is required.
    #[error("illegal argument for {op}: {arg} must be a non-empty string")]
    InvalidArgument {
        op: &'static str,
        arg: &'static str,
    },
}

pub type Result<T, E = TrieError> = std::result::Result<T, E>;

/// Rejects the empty string for operation `op`.
#[inline]
pub(crate) fn non_empty<'a>(op: &'static str, arg: &'static str, s: &'a str) -> Result<&'a str> {
    if s.is_empty() {
        return Err(TrieError::InvalidArgument { op, arg });
    }
    Ok(s)
}
