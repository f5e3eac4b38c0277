use alloc::sync::Arc;

use super::level::Level;

// Inline capacity of the stacks used for traversal and predecessor search.
// Heights beyond this spill to the heap.
#[cfg(test)]
pub(crate) const INLINE_DEPTH: usize = 4;
#[cfg(not(test))]
pub(crate) const INLINE_DEPTH: usize = 32;

/// An internal node. Nodes are never mutated once linked into a tree, so any
/// number of tree versions may share them.
pub(crate) struct Node<T> {
    pub(crate) key: T,
    pub(crate) level: Level,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

/// A subtree: either the empty sentinel or a shared internal node.
pub(crate) enum Link<T> {
    Empty,
    Node(Arc<Node<T>>),
}

/// Which child of a node to follow.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl<T> Node<T> {
    /// Returns the child on `side`.
    #[inline]
    pub(crate) fn child(&self, side: Side) -> &Link<T> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl<T> Clone for Link<T> {
    #[inline]
    fn clone(&self) -> Self {
        match self {
            Link::Empty => Link::Empty,
            Link::Node(node) => Link::Node(Arc::clone(node)),
        }
    }
}

impl<T> From<Node<T>> for Link<T> {
    #[inline]
    fn from(node: Node<T>) -> Self {
        Link::Node(Arc::new(node))
    }
}

impl<T> Link<T> {
    pub(crate) const EMPTY: Self = Link::Empty;

    /// Allocates a new internal node.
    #[inline]
    pub(crate) fn new(key: T, level: Level, left: Link<T>, right: Link<T>) -> Self {
        Node { key, level, left, right }.into()
    }

    /// Allocates a level-one leaf.
    #[inline]
    pub(crate) fn leaf(key: T) -> Self {
        Self::new(key, Level::ONE, Link::Empty, Link::Empty)
    }

    #[cfg(test)]
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, Link::Empty)
    }

    #[inline]
    pub(crate) fn level(&self) -> Level {
        match self {
            Link::Empty => Level::ZERO,
            Link::Node(node) => node.level,
        }
    }

    /// The left subtree. The sentinel is its own left child.
    #[inline]
    pub(crate) fn left(&self) -> &Link<T> {
        match self {
            Link::Empty => self,
            Link::Node(node) => &node.left,
        }
    }

    /// The right subtree. The sentinel is its own right child.
    #[inline]
    pub(crate) fn right(&self) -> &Link<T> {
        match self {
            Link::Empty => self,
            Link::Node(node) => &node.right,
        }
    }

    #[inline]
    pub(crate) fn node(&self) -> Option<&Node<T>> {
        match self {
            Link::Empty => None,
            Link::Node(node) => Some(&**node),
        }
    }

    /// Returns true if both links are the sentinel or point at the same node.
    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Link::Empty, Link::Empty) => true,
            (Link::Node(a), Link::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Walks to the outermost node on `side` and returns its key.
    pub(crate) fn extreme(&self, side: Side) -> Option<&T> {
        let mut node = self.node()?;
        while let Link::Node(child) = node.child(side) {
            node = &**child;
        }
        Some(&node.key)
    }
}

impl<T: Clone> Link<T> {
    /// Rebuilds the root with its right subtree replaced by `f(right)`.
    ///
    /// The root is shared unchanged when `f` hands back the same subtree.
    pub(crate) fn map_right<F>(self, f: F) -> Self
    where
        F: FnOnce(Link<T>) -> Link<T>,
    {
        let Link::Node(node) = &self else {
            return self;
        };
        let right = f(node.right.clone());
        if right.ptr_eq(&node.right) {
            return self;
        }
        Link::new(node.key.clone(), node.level, node.left.clone(), right)
    }

    /// Returns a copy of the root with its level replaced.
    pub(crate) fn with_level(&self, level: Level) -> Self {
        match self {
            Link::Empty => Link::Empty,
            Link::Node(node) => Link::new(node.key.clone(), level, node.left.clone(), node.right.clone()),
        }
    }
}
