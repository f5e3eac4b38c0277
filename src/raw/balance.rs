//! Local rotations that restore the AA-tree invariants.
//!
//! Every function here is pure: the input subtree is left untouched and any
//! rotated node is freshly allocated.

use log::trace;

use super::node::{Link, Node};

/// Removes a left horizontal link by rotating right.
///
/// ```text
///     L <- T              L -> T
///    / \    \    ==>     /    / \
///   A   B    R          A    B   R
/// ```
pub(crate) fn skew<T: Clone>(tree: Link<T>) -> Link<T> {
    let Link::Node(node) = &tree else {
        return tree;
    };
    let Link::Node(left) = &node.left else {
        return tree;
    };
    if left.level != node.level {
        return tree;
    }
    trace!("skew: rotating right at level {}", node.level.get());
    let lowered = Link::new(node.key.clone(), node.level, left.right.clone(), node.right.clone());
    Link::new(left.key.clone(), left.level, left.left.clone(), lowered)
}

/// Removes a double right horizontal link by rotating left and raising the
/// middle node one level.
///
/// ```text
///                              R
///   T -> R -> X               / \
///  /    /          ==>       T   X
/// A    B                    / \
///                          A   B
/// ```
pub(crate) fn split<T: Clone>(tree: Link<T>) -> Link<T> {
    let Link::Node(node) = &tree else {
        return tree;
    };
    let Link::Node(right) = &node.right else {
        return tree;
    };
    if right.right.level() != node.level {
        return tree;
    }
    let raised = right.level.succ();
    trace!("split: raising node to level {}", raised.get());
    let lowered = Link::new(node.key.clone(), node.level, node.left.clone(), right.left.clone());
    Link::new(right.key.clone(), raised, lowered, right.right.clone())
}

/// Restores the invariants at `node` after one of its subtrees lost a key.
///
/// When a child has dropped more than one level below `node`, the node is
/// demoted and then repaired with a fixed sequence of three skews and two
/// splits. A single skew/split pair is not enough here.
pub(crate) fn rebalance_after_unset<T: Clone>(mut node: Node<T>) -> Link<T> {
    let floor = node.level.pred();
    if node.left.level() >= floor && node.right.level() >= floor {
        return node.into();
    }

    trace!("unset: demoting node from level {} to {}", node.level.get(), floor.get());
    node.level = floor;
    if node.right.level() > floor {
        node.right = node.right.with_level(floor);
    }

    let tree = skew(Link::from(node));
    let tree = tree.map_right(skew);
    let tree = tree.map_right(|right| right.map_right(skew));
    let tree = split(tree);
    tree.map_right(split)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::*;
    use crate::raw::level::Level;

    fn render(link: &Link<i32>) -> String {
        match link.node() {
            None => String::from("."),
            Some(node) => format!(
                "({} {}@{} {})",
                render(&node.left),
                node.key,
                node.level.get(),
                render(&node.right)
            ),
        }
    }

    fn node(key: i32, level: u8, left: Link<i32>, right: Link<i32>) -> Link<i32> {
        Link::new(key, Level::new(level), left, right)
    }

    #[test]
    fn skew_rotates_left_horizontal_link() {
        let tree = node(2, 1, Link::leaf(1), Link::Empty);
        assert_eq!(render(&skew(tree)), "(. 1@1 (. 2@1 .))");
    }

    #[test]
    fn skew_keeps_valid_subtree() {
        let tree = node(2, 2, Link::leaf(1), Link::leaf(3));
        let skewed = skew(tree.clone());
        assert!(skewed.ptr_eq(&tree));
        assert!(skew(Link::<i32>::EMPTY).is_empty());
    }

    #[test]
    fn skew_moves_inner_grandchild() {
        let left = node(2, 2, Link::leaf(1), Link::leaf(3));
        let tree = node(4, 2, left, Link::leaf(5));
        assert_eq!(
            render(&skew(tree)),
            "((. 1@1 .) 2@2 ((. 3@1 .) 4@2 (. 5@1 .)))"
        );
    }

    #[test]
    fn split_raises_middle_of_right_chain() {
        let tree = node(1, 1, Link::Empty, node(2, 1, Link::Empty, Link::leaf(3)));
        assert_eq!(render(&split(tree)), "((. 1@1 .) 2@2 (. 3@1 .))");
    }

    #[test]
    fn split_keeps_single_horizontal_link() {
        let tree = node(1, 1, Link::Empty, Link::leaf(2));
        assert!(split(tree.clone()).ptr_eq(&tree));
        assert!(split(Link::<i32>::EMPTY).is_empty());
    }

    #[test]
    fn rebalance_leaves_balanced_node_alone() {
        let balanced = Node {
            key: 2,
            level: Level::new(2),
            left: Link::leaf(1),
            right: Link::leaf(3),
        };
        assert_eq!(render(&rebalance_after_unset(balanced)), "((. 1@1 .) 2@2 (. 3@1 .))");
    }

    #[test]
    fn rebalance_demotes_after_left_leaf_removed() {
        // 2@2 lost its left leaf; its right child 3@1 now forms a
        // horizontal link after the demotion.
        let damaged = Node {
            key: 2,
            level: Level::new(2),
            left: Link::Empty,
            right: Link::leaf(3),
        };
        assert_eq!(render(&rebalance_after_unset(damaged)), "(. 2@1 (. 3@1 .))");
    }

    #[test]
    fn rebalance_caps_overshooting_right_child() {
        // 2@2 lost its left leaf while 4@2 hung off it horizontally. After
        // the demotion 4 is capped to level one and the chain is repaired.
        let damaged = Node {
            key: 2,
            level: Level::new(2),
            left: Link::Empty,
            right: node(4, 2, Link::leaf(3), Link::leaf(5)),
        };
        assert_eq!(
            render(&rebalance_after_unset(damaged)),
            "((. 2@1 .) 3@2 (. 4@1 (. 5@1 .)))"
        );
    }
}
