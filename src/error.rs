use thiserror::Error;

/// A broken structural invariant, reported by `validate`.
///
/// A correctly built tree never produces one of these; they exist so that
/// tests and debugging sessions can check a tree's shape directly.
///
/// # Examples
///
/// ```
/// use aa_tree::AATreeSet;
///
/// let set = AATreeSet::new().insert([5, 3, 8, 1, 4]);
/// assert_eq!(set.validate(), Ok(()));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum InvariantError {
    /// A left child is not exactly one level below its parent.
    #[error("left child at level {child} under a node at level {parent}")]
    LeftLevel { parent: u8, child: u8 },
    /// A right child is neither level with nor one below its parent.
    #[error("right child at level {child} under a node at level {parent}")]
    RightLevel { parent: u8, child: u8 },
    /// Two consecutive right links stay on the same level.
    #[error("two consecutive horizontal right links at level {level}")]
    DoubleHorizontal { level: u8 },
    /// In-order elements stop strictly increasing.
    #[error("element at position {position} is not greater than its predecessor")]
    OutOfOrder { position: usize },
    /// The stored length disagrees with the number of reachable elements.
    #[error("tree reports {reported} elements but holds {actual}")]
    SizeMismatch { reported: usize, actual: usize },
}
