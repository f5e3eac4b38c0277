use core::fmt;

use super::AATreeSet;
use crate::compare::{Comparator, Natural};
use crate::raw::Position;

/// A position in an [`AATreeSet`]: either on an element, or between two
/// elements where a searched-for value would go.
///
/// This `struct` is created by [`AATreeSet::select`] and by stepping another
/// cursor with [`next`] or [`previous`]. Stepping starts from the cursor's
/// current position, so walking `k` elements costs O(k + log n) rather than
/// a fresh search per step.
///
/// [`next`]: Cursor::next
/// [`previous`]: Cursor::previous
///
/// # Examples
///
/// ```
/// use aa_tree::AATreeSet;
///
/// let set = AATreeSet::from([10, 20, 30]);
///
/// let mut walked = Vec::new();
/// let mut cursor = set.select(0).next();
/// while let Some(at) = cursor {
///     walked.push(*at.key());
///     cursor = at.next();
/// }
/// assert_eq!(walked, [10, 20, 30]);
/// ```
pub struct Cursor<'a, T, C = Natural> {
    owner: &'a AATreeSet<T, C>,
    position: Position<T, T>,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(super) fn new(owner: &'a AATreeSet<T, C>, position: Position<T, T>) -> Self {
        Self { owner, position }
    }

    /// Returns `true` if the cursor sits on an element of the set.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.position.is_found()
    }

    /// Returns the element under the cursor, or the searched-for value when
    /// the cursor sits between elements.
    #[must_use]
    pub fn key(&self) -> &T {
        match &self.position {
            Position::Found(head) => &head.node.key,
            Position::Vacant { key, .. } => key,
        }
    }

    /// Moves to the smallest element greater than the cursor's position.
    ///
    /// Returns `None` past the last element.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.position.next().map(|position| Self::new(self.owner, position))
    }

    /// Moves to the largest element smaller than the cursor's position.
    ///
    /// Returns `None` before the first element.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.position.previous().map(|position| Self::new(self.owner, position))
    }

    /// Returns the set this cursor points into.
    #[must_use]
    pub fn owner(&self) -> &'a AATreeSet<T, C> {
        self.owner
    }
}

impl<T: Clone, C: Comparator<T>> Cursor<'_, T, C> {
    /// Returns a version of the owning set that holds the cursor's key.
    ///
    /// On an element this is the owning set itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([1, 3]);
    /// let grown = set.select(2).add();
    /// assert_eq!(grown.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn add(self) -> AATreeSet<T, C> {
        match self.position {
            Position::Found(_) => self.owner.clone(),
            Position::Vacant { path, key } => self.owner.derive(self.owner.raw.set(path, key)),
        }
    }

    /// Returns a version of the owning set without the element under the
    /// cursor.
    ///
    /// Between elements this is the owning set itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([1, 2, 3]);
    /// let second = set.select(1).next().expect("2 follows 1");
    /// let shrunk = second.remove();
    /// assert_eq!(shrunk.keys().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    #[must_use]
    pub fn remove(self) -> AATreeSet<T, C> {
        match &self.position {
            Position::Found(head) => self.owner.derive(self.owner.raw.unset(head)),
            Position::Vacant { .. } => self.owner.clone(),
        }
    }
}

impl<T, C> Clone for Cursor<'_, T, C>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let position = match &self.position {
            Position::Found(head) => Position::Found(head.clone()),
            Position::Vacant { path, key } => Position::Vacant {
                path: path.clone(),
                key: key.clone(),
            },
        };
        Self::new(self.owner, position)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("found", &self.is_found())
            .field("key", self.key())
            .finish()
    }
}
