//! Root-to-position paths through a tree.
//!
//! A path is a linked list of immutable frames, newest (deepest) first. It is
//! built top-down by a search and consumed bottom-up when a tree is rebuilt.
//! Frames are shared, so stepping a cursor never copies its ancestors.

use alloc::sync::Arc;
use core::cmp::Ordering;

use super::node::{Link, Node, Side};

/// Where a frame sits relative to its node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Branch {
    /// Positioned in the node's left subtree.
    Left,
    /// At the node itself.
    Here,
    /// Positioned in the node's right subtree.
    Right,
}

impl From<Ordering> for Branch {
    #[inline]
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Branch::Left,
            Ordering::Equal => Branch::Here,
            Ordering::Greater => Branch::Right,
        }
    }
}

impl From<Side> for Branch {
    #[inline]
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Branch::Left,
            Side::Right => Branch::Right,
        }
    }
}

pub(crate) struct Frame<T> {
    pub(crate) branch: Branch,
    pub(crate) node: Arc<Node<T>>,
    pub(crate) parent: Path<T>,
}

/// A possibly empty path. `None` is the path into an empty tree.
pub(crate) type Path<T> = Option<Arc<Frame<T>>>;

impl<T> Frame<T> {
    #[inline]
    pub(crate) fn new(branch: Branch, node: Arc<Node<T>>, parent: Path<T>) -> Arc<Self> {
        Arc::new(Self { branch, node, parent })
    }

    #[inline]
    pub(crate) fn is_here(&self) -> bool {
        self.branch == Branch::Here
    }

    /// The same position moved onto the node itself.
    fn here(&self) -> Arc<Self> {
        Self::new(Branch::Here, Arc::clone(&self.node), self.parent.clone())
    }
}

impl<T: Clone> Frame<T> {
    /// Copies this frame's node with `child` plugged in on the side the path
    /// descended.
    pub(crate) fn rebuild(&self, child: Link<T>) -> Node<T> {
        let node = &self.node;
        let (left, right) = match self.branch {
            Branch::Right => (node.left.clone(), child),
            Branch::Left | Branch::Here => (child, node.right.clone()),
        };
        Node {
            key: node.key.clone(),
            level: node.level,
            left,
            right,
        }
    }
}

/// Returns the in-order successor of the position at `head`.
#[inline]
pub(crate) fn next<T>(head: &Arc<Frame<T>>) -> Path<T> {
    step(head, Side::Right)
}

/// Returns the in-order predecessor of the position at `head`.
#[inline]
pub(crate) fn previous<T>(head: &Arc<Frame<T>>) -> Path<T> {
    step(head, Side::Left)
}

fn step<T>(head: &Arc<Frame<T>>, toward: Side) -> Path<T> {
    let away = Branch::from(toward.opposite());

    // Between a node and its subtree on the `away` side: the node is next.
    if head.branch == away {
        return Some(head.here());
    }

    match head.node.child(toward) {
        Link::Empty => {
            let mut frame = Some(head);
            while let Some(current) = frame {
                if current.branch == away {
                    return Some(current.here());
                }
                frame = current.parent.as_ref();
            }
            None
        }
        Link::Node(child) => {
            let mut parent = Frame::new(Branch::from(toward), Arc::clone(&head.node), head.parent.clone());
            let mut node = Arc::clone(child);
            loop {
                let inner = match node.child(toward.opposite()) {
                    Link::Node(inner) => Arc::clone(inner),
                    Link::Empty => break,
                };
                parent = Frame::new(away, node, Some(parent));
                node = inner;
            }
            Some(Frame::new(Branch::Here, node, Some(parent)))
        }
    }
}

/// A cursor position: either on a stored element or between two elements,
/// remembering the key that was searched for.
pub(crate) enum Position<T, Q> {
    Found(Arc<Frame<T>>),
    Vacant { path: Path<T>, key: Q },
}

impl<T, Q> Position<T, Q> {
    pub(crate) fn new(path: Path<T>, key: Q) -> Self {
        match path {
            Some(head) if head.is_here() => Position::Found(head),
            path => Position::Vacant { path, key },
        }
    }

    #[inline]
    pub(crate) fn is_found(&self) -> bool {
        matches!(self, Position::Found(_))
    }

    fn head(&self) -> Option<&Arc<Frame<T>>> {
        match self {
            Position::Found(head) => Some(head),
            Position::Vacant { path, .. } => path.as_ref(),
        }
    }

    pub(crate) fn next(&self) -> Option<Self> {
        next(self.head()?).map(Position::Found)
    }

    pub(crate) fn previous(&self) -> Option<Self> {
        previous(self.head()?).map(Position::Found)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::raw::level::Level;

    //       4@2 ---> 6@2
    //      /         /   \
    //    2@1 -> 3  5@1   7@1
    fn sample() -> Link<i32> {
        let left = Link::new(2, Level::ONE, Link::Empty, Link::leaf(3));
        let right = Link::new(6, Level::new(2), Link::leaf(5), Link::leaf(7));
        Link::new(4, Level::new(2), left, right)
    }

    fn search(root: &Link<i32>, key: i32) -> Path<i32> {
        let mut link = root;
        let mut path = None;
        while let Link::Node(node) = link {
            let branch = Branch::from(key.cmp(&node.key));
            path = Some(Frame::new(branch, Arc::clone(node), path));
            match branch {
                Branch::Left => link = &node.left,
                Branch::Right => link = &node.right,
                Branch::Here => break,
            }
        }
        path
    }

    fn walk(mut path: Path<i32>, step: fn(&Arc<Frame<i32>>) -> Path<i32>) -> Vec<i32> {
        let mut keys = Vec::new();
        while let Some(head) = path {
            if head.is_here() {
                keys.push(head.node.key);
            }
            path = step(&head);
        }
        keys
    }

    #[test]
    fn next_from_every_key() {
        let root = sample();
        for key in 2..=7 {
            let head = search(&root, key).expect("key is present");
            let successor = next(&head).map(|frame| frame.node.key);
            let expected = if key < 7 { Some(key + 1) } else { None };
            assert_eq!(successor, expected, "next({key})");
        }
    }

    #[test]
    fn previous_from_every_key() {
        let root = sample();
        for key in 2..=7 {
            let head = search(&root, key).expect("key is present");
            let predecessor = previous(&head).map(|frame| frame.node.key);
            let expected = if key > 2 { Some(key - 1) } else { None };
            assert_eq!(predecessor, expected, "previous({key})");
        }
    }

    #[test]
    fn stepping_from_vacant_positions() {
        let root = sample();
        assert_eq!(walk(search(&root, 0), next), [2, 3, 4, 5, 6, 7]);
        assert_eq!(walk(search(&root, 100), previous), [7, 6, 5, 4, 3, 2]);
        assert!(walk(search(&root, 100), next).is_empty());
        assert!(walk(search(&root, 0), previous).is_empty());
    }

    #[test]
    fn position_tracks_found_and_vacant() {
        let root = sample();
        let found = Position::new(search(&root, 5), 5);
        assert!(found.is_found());

        let vacant = Position::new(search(&root, 10), 10);
        assert!(!vacant.is_found());
        assert!(vacant.next().is_none());
        let Some(Position::Found(head)) = vacant.previous() else {
            panic!("expected a found position");
        };
        assert_eq!(head.node.key, 7);

        let empty: Position<i32, i32> = Position::new(None, 1);
        assert!(empty.next().is_none());
        assert!(empty.previous().is_none());
    }

    #[test]
    fn rebuild_plugs_child_on_branch_side() {
        let root = sample();
        let head = search(&root, 5).expect("key is present");
        let parent = head.parent.as_ref().expect("5 has a parent");
        assert_eq!(parent.branch, Branch::Left);
        let rebuilt = parent.rebuild(Link::Empty);
        assert_eq!(rebuilt.key, 6);
        assert!(rebuilt.left.is_empty());
        assert!(!rebuilt.right.is_empty());
    }
}
