//! Trie vertex.
//!
//! A node is a passive container: a map from one character to the child it
//! leads to, plus the payload of the key that ends here (if any). All mutation
//! goes through [`Trie`](crate::Trie); outside the crate nodes are read-only.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// A node in the character trie.
///
/// Children are kept in a `BTreeMap`, so traversal visits edges in `char`
/// order and every enumeration the trie produces is deterministic.
///
/// Dropping and cloning walk the subtree with an explicit stack, so key
/// length never bounds the call depth.
pub struct Node<V> {
    children: BTreeMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Node<V> {
    pub(crate) fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }

    /// Payload of the key ending at this node.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Whether a key ends at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Child reached through the edge labelled `c`.
    #[inline]
    pub fn child(&self, c: char) -> Option<&Node<V>> {
        self.children.get(&c)
    }

    /// Outgoing edges in `char` order.
    pub fn children(&self) -> Children<'_, V> {
        Children {
            inner: self.children.iter(),
        }
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of terminal nodes in the subtree rooted here, this node included.
    pub fn terminal_count(&self) -> usize {
        let mut count = 0usize;
        let mut stack: Vec<&Node<V>> = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_terminal() {
                count += 1;
            }
            stack.extend(node.children.values());
        }
        count
    }

    // === Engine-only mutation ===

    #[inline]
    pub(crate) fn child_mut(&mut self, c: char) -> Option<&mut Node<V>> {
        self.children.get_mut(&c)
    }

    #[inline]
    pub(crate) fn child_or_insert(&mut self, c: char) -> &mut Node<V> {
        self.children.entry(c).or_insert_with(Node::new)
    }

    #[inline]
    pub(crate) fn remove_child(&mut self, c: char) -> Option<Node<V>> {
        self.children.remove(&c)
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    #[inline]
    pub(crate) fn replace_value(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    #[inline]
    pub(crate) fn take_value(&mut self) -> Option<V> {
        self.value.take()
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<V>> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

/// A source node whose copy is being assembled, with the edges not yet copied.
struct CloneFrame<'a, V> {
    edge: char,
    pending: Children<'a, V>,
    copy: Node<V>,
}

impl<'a, V: Clone> CloneFrame<'a, V> {
    fn new(edge: char, source: &'a Node<V>) -> Self {
        Self {
            edge,
            pending: source.children(),
            copy: Node {
                children: BTreeMap::new(),
                value: source.value.clone(),
            },
        }
    }
}

impl<V: Clone> Clone for Node<V> {
    fn clone(&self) -> Self {
        // The bottom frame is `self`; its edge label is never read.
        let mut stack = vec![CloneFrame::new('\0', self)];
        while let Some(frame) = stack.last_mut() {
            if let Some((c, child)) = frame.pending.next() {
                stack.push(CloneFrame::new(c, child));
                continue;
            }
            if stack.len() == 1 {
                break;
            }
            if let Some(done) = stack.pop() {
                if let Some(parent) = stack.last_mut() {
                    parent.copy.children.insert(done.edge, done.copy);
                }
            }
        }
        stack.pop().map_or_else(Node::new, |root| root.copy)
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Node<V> {
    /// Shallow: lists outgoing edges rather than nesting whole subtrees.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("edges", &self.children.keys().collect::<Vec<_>>())
            .field("terminals", &self.terminal_count())
            .finish()
    }
}

/// Iterator over a node's outgoing edges.
pub struct Children<'a, V> {
    inner: btree_map::Iter<'a, char, Node<V>>,
}

impl<'a, V> Iterator for Children<'a, V> {
    type Item = (char, &'a Node<V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&c, node)| (c, node))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> DoubleEndedIterator for Children<'a, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(&c, node)| (c, node))
    }
}

impl<'a, V> ExactSizeIterator for Children<'a, V> {}
