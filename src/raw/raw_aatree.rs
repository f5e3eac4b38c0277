use alloc::sync::Arc;
use core::cmp::Ordering;
use core::iter::FusedIterator;

use log::debug;
use smallvec::SmallVec;

use super::balance::{rebalance_after_unset, skew, split};
use super::node::{INLINE_DEPTH, Link, Node, Side};
use super::path::{Branch, Frame, Path};
use crate::error::InvariantError;

/// The persistent AA-tree backing `AATreeSet` and `AATreeMap`.
///
/// Searches take a probe `FnMut(&T) -> Ordering` that compares the wanted
/// key against a stored element, so the same core serves both sets (where the
/// element is the key) and maps (where it is a key/value pair).
pub(crate) struct RawAATree<T> {
    /// Root of this version. Shared with every version derived from it.
    root: Link<T>,
    /// Number of elements reachable from `root`.
    len: usize,
}

impl<T> Clone for RawAATree<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> RawAATree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            root: Link::EMPTY,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if both trees share the same root.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        self.root.ptr_eq(&other.root)
    }

    /// Finds the element `probe` reports as equal, without building a path.
    pub(crate) fn get_by<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut link = &self.root;
        while let Link::Node(node) = link {
            match probe(&node.key) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(&node.key),
            }
        }
        None
    }

    /// Descends towards the element `probe` is looking for, recording every
    /// step. The head of the returned path is `Here` when the element exists.
    pub(crate) fn select_by<F>(&self, mut probe: F) -> Path<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut link = &self.root;
        let mut path = None;
        while let Link::Node(node) = link {
            let branch = Branch::from(probe(&node.key));
            path = Some(Frame::new(branch, Arc::clone(node), path));
            match branch {
                Branch::Left => link = &node.left,
                Branch::Right => link = &node.right,
                Branch::Here => break,
            }
        }
        path
    }

    /// Returns the smallest element.
    pub(crate) fn first(&self) -> Option<&T> {
        self.root.extreme(Side::Left)
    }

    /// Returns the largest element.
    pub(crate) fn last(&self) -> Option<&T> {
        self.root.extreme(Side::Right)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        fn depth<T>(link: &Link<T>) -> usize {
            match link.node() {
                None => 0,
                Some(node) => 1 + depth(&node.left).max(depth(&node.right)),
            }
        }
        depth(&self.root)
    }

    /// Returns an in-order iterator over the elements.
    pub(crate) fn iter(&self) -> RawIter<'_, T> {
        RawIter {
            stack: SmallVec::new(),
            next: self.root.node(),
            remaining: self.len,
        }
    }

    /// Checks every structural invariant and the stored length, using `cmp` to
    /// verify that in-order elements strictly increase.
    pub(crate) fn validate_by<F>(&self, mut cmp: F) -> Result<(), InvariantError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let result = Self::check_levels(&self.root).and_then(|()| {
            let mut count = 0;
            let mut previous: Option<&T> = None;
            for element in self.iter_unbounded() {
                if let Some(previous) = previous {
                    if cmp(previous, element) != Ordering::Less {
                        return Err(InvariantError::OutOfOrder { position: count });
                    }
                }
                previous = Some(element);
                count += 1;
            }
            if count == self.len {
                Ok(())
            } else {
                Err(InvariantError::SizeMismatch {
                    reported: self.len,
                    actual: count,
                })
            }
        });
        if let Err(error) = &result {
            debug!("validate: {error}");
        }
        result
    }

    fn check_levels(link: &Link<T>) -> Result<(), InvariantError> {
        let Some(node) = link.node() else {
            return Ok(());
        };
        let level = node.level;
        let left = link.left().level();
        let right = link.right().level();
        let below = level.pred();
        if left != below {
            return Err(InvariantError::LeftLevel {
                parent: level.get(),
                child: left.get(),
            });
        }
        if right != level && right != below {
            return Err(InvariantError::RightLevel {
                parent: level.get(),
                child: right.get(),
            });
        }
        if right == level && link.right().right().level() >= level {
            return Err(InvariantError::DoubleHorizontal { level: level.get() });
        }
        Self::check_levels(&node.left)?;
        Self::check_levels(&node.right)
    }

    // Iterates by structure alone, so a corrupted length cannot cut it short.
    fn iter_unbounded(&self) -> RawIter<'_, T> {
        RawIter {
            stack: SmallVec::new(),
            next: self.root.node(),
            remaining: usize::MAX,
        }
    }
}

impl<T: Clone> RawAATree<T> {
    /// Rebuilds the tree along `path` with `key` stored at its head.
    ///
    /// A `Here` head replaces the stored element in place; any other path
    /// inserts a new leaf. Each ancestor is copied and repaired with one
    /// skew followed by one split.
    pub(crate) fn set(&self, path: Path<T>, key: T) -> Self {
        let (mut tree, mut path, len) = match path {
            Some(head) if head.is_here() => {
                let node = &head.node;
                let replaced = Link::new(key, node.level, node.left.clone(), node.right.clone());
                (replaced, head.parent.clone(), self.len)
            }
            path => (Link::leaf(key), path, self.len + 1),
        };
        while let Some(frame) = path {
            tree = split(skew(frame.rebuild(tree).into()));
            path = frame.parent.clone();
        }
        Self { root: tree, len }
    }

    /// Rebuilds the tree without the element at `head`.
    ///
    /// A node with a left subtree trades places with its in-order
    /// predecessor, which is always a leaf. A node with only a right child is
    /// replaced by that child. The rebuilt ancestors are then repaired from
    /// the bottom up.
    pub(crate) fn unset(&self, head: &Arc<Frame<T>>) -> Self {
        assert!(head.is_here(), "`RawAATree::unset()` - `head` is not on an element!");
        let target = &head.node;
        let mut path = head.parent.clone();

        match (&target.left, &target.right) {
            (Link::Node(left), _) => {
                let mut spine: SmallVec<[&Arc<Node<T>>; INLINE_DEPTH]> = SmallVec::new();
                let mut predecessor = left;
                while let Link::Node(right) = &predecessor.right {
                    spine.push(predecessor);
                    predecessor = right;
                }
                let swapped = Node {
                    key: predecessor.key.clone(),
                    level: target.level,
                    left: target.left.clone(),
                    right: target.right.clone(),
                };
                path = Some(Frame::new(Branch::Left, Arc::new(swapped), path));
                for node in spine {
                    path = Some(Frame::new(Branch::Right, Arc::clone(node), path));
                }
            }
            (Link::Empty, Link::Node(right)) => {
                path = Some(Frame::new(Branch::Right, Arc::clone(right), path));
            }
            (Link::Empty, Link::Empty) => {}
        }

        let mut tree = Link::EMPTY;
        while let Some(frame) = path {
            tree = rebalance_after_unset(frame.rebuild(tree));
            path = frame.parent.clone();
        }
        Self {
            root: tree,
            len: self.len - 1,
        }
    }
}

/// An in-order iterator driven by an explicit stack of pending ancestors.
pub(crate) struct RawIter<'a, T> {
    stack: SmallVec<[&'a Node<T>; INLINE_DEPTH]>,
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<T> Clone for RawIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T> Default for RawIter<'_, T> {
    fn default() -> Self {
        Self {
            stack: SmallVec::new(),
            next: None,
            remaining: 0,
        }
    }
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(node) = self.next {
            self.stack.push(node);
            self.next = node.left.node();
        }
        let node = self.stack.pop()?;
        self.next = node.right.node();
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RawIter<'_, T> {}

impl<T> FusedIterator for RawIter<'_, T> {}
