use alloc::sync::Arc;
use core::fmt;
use core::iter::FusedIterator;

use crate::compare::{Comparator, Natural};
use crate::error::InvariantError;
use crate::raw::{Position, RawAATree, RawIter};

mod cursor;

pub use cursor::Cursor;

/// A persistent ordered set based on an AA-tree.
///
/// Sets are immutable values. [`add`] and [`remove`] leave `self` untouched and
/// return a new version that shares every subtree it did not change, so
/// keeping old versions around is cheap and they stay valid forever. Cloning
/// a set is O(1).
///
/// Elements are ordered by the set's [`Comparator`], which defaults to the
/// element type's [`Ord`]. Point operations take O(log n) time.
///
/// [`add`]: AATreeSet::add
/// [`remove`]: AATreeSet::remove
///
/// # Examples
///
/// ```
/// use aa_tree::AATreeSet;
///
/// let empty = AATreeSet::new();
/// let books = empty
///     .add("A Dance With Dragons")
///     .add("To Kill a Mockingbird")
///     .add("The Odyssey")
///     .add("The Great Gatsby");
///
/// // Check for a specific one.
/// if !books.contains(&"The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// // Remove a book. The old version still has it.
/// let fewer = books.remove(&"The Odyssey");
/// assert!(books.contains(&"The Odyssey"));
/// assert!(!fewer.contains(&"The Odyssey"));
/// assert!(empty.is_empty());
///
/// // Iterate over everything.
/// for book in &fewer {
///     println!("{book}");
/// }
/// ```
///
/// A `AATreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use aa_tree::AATreeSet;
///
/// let set = AATreeSet::from([1, 2, 3]);
/// ```
pub struct AATreeSet<T, C = Natural> {
    raw: RawAATree<T>,
    comparator: Arc<C>,
}

/// An iterator over the items of a `AATreeSet`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`AATreeSet`].
/// See its documentation for more.
///
/// [`keys`]: AATreeSet::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, T: 'a> {
    inner: RawIter<'a, T>,
}

impl<T> AATreeSet<T> {
    /// Makes a new, empty `AATreeSet` ordered by `T`'s [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set: AATreeSet<i32> = AATreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> AATreeSet<T, C> {
    /// Makes a new, empty `AATreeSet` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let by_len = AATreeSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// let set = by_len.insert(["ccc", "a", "bb"]);
    /// assert_eq!(set.keys().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawAATree::new(),
            comparator: Arc::new(comparator),
        }
    }

    fn derive(&self, raw: RawAATree<T>) -> Self {
        Self {
            raw,
            comparator: Arc::clone(&self.comparator),
        }
    }

    /// Returns the comparator that orders this set.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let v = AATreeSet::new();
    /// assert_eq!(v.len(), 0);
    /// assert_eq!(v.add(1).len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if both sets are the very same version, sharing one
    /// root. Sets that merely hold equal elements may still return `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([1, 2]);
    /// assert!(set.add(2).ptr_eq(&set));
    /// assert!(!set.add(3).ptr_eq(&set));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.raw.ptr_eq(&other.raw)
    }

    /// Returns the first (smallest) element in the set.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns the last (largest) element in the set.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Returns the number of nodes on the longest path from the root.
    ///
    /// An AA-tree holding `n` elements is never taller than `2 * log2(n + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets a fresh iterator that visits the elements in ascending order.
    ///
    /// Each call starts a new traversal; the iterator itself is single-pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([3, 1, 2]);
    /// let mut keys = set.keys();
    /// assert_eq!(keys.next(), Some(&1));
    /// assert_eq!(keys.next(), Some(&2));
    /// assert_eq!(keys.next(), Some(&3));
    /// assert_eq!(keys.next(), None);
    /// ```
    pub fn keys(&self) -> Keys<'_, T> {
        Keys { inner: self.raw.iter() }
    }

    /// Same as [`keys`](AATreeSet::keys).
    pub fn iter(&self) -> Keys<'_, T> {
        self.keys()
    }
}

impl<T, C: Comparator<T>> AATreeSet<T, C> {
    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the stored element equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.get_by(|element| self.comparator.compare(value, element))
    }

    /// Places a cursor at `value`, or between its neighbours if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([1, 3, 4, 5, 8]);
    /// let cursor = set.select(6);
    /// assert!(!cursor.is_found());
    /// assert_eq!(cursor.next().map(|c| *c.key()), Some(8));
    /// assert_eq!(cursor.previous().map(|c| *c.key()), Some(5));
    /// ```
    pub fn select(&self, value: T) -> Cursor<'_, T, C> {
        let path = self.raw.select_by(|element| self.comparator.compare(&value, element));
        Cursor::new(self, Position::new(path, value))
    }

    /// Checks the tree's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found. A set built only through
    /// this crate's API always validates.
    pub fn validate(&self) -> Result<(), InvariantError> {
        self.raw.validate_by(|a, b| self.comparator.compare(a, b))
    }
}

impl<T: Clone, C: Comparator<T>> AATreeSet<T, C> {
    /// Returns a version of the set that also holds `value`.
    ///
    /// If the set already contains an equal element, the result is this same
    /// version and the stored element is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::new();
    /// let one = set.add(2);
    /// assert_eq!(one.len(), 1);
    /// assert_eq!(one.add(2).len(), 1);
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn add(&self, value: T) -> Self {
        self.select(value).add()
    }

    /// Returns a version of the set without `value`.
    ///
    /// If the set holds no equal element, the result is this same version.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::from([1, 2]);
    /// assert_eq!(set.remove(&2).len(), 1);
    /// assert_eq!(set.remove(&3).len(), 2);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn remove(&self, value: &T) -> Self {
        let path = self.raw.select_by(|element| self.comparator.compare(value, element));
        match path {
            Some(head) if head.is_here() => self.derive(self.raw.unset(&head)),
            _ => self.clone(),
        }
    }

    /// Adds every element of `values` in turn, returning the final version.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeSet;
    ///
    /// let set = AATreeSet::new().insert([5, 3, 8, 1, 4]);
    /// assert_eq!(set.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    /// ```
    #[must_use]
    pub fn insert<I>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().fold(self.clone(), |set, value| set.add(value))
    }
}

impl<T, C> Clone for AATreeSet<T, C> {
    fn clone(&self) -> Self {
        self.derive(self.raw.clone())
    }
}

impl<T> Default for AATreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AATreeSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for AATreeSet<T, C> {
    /// Formats the set as `AATreeSet {1, 2, 3}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AATreeSet {")?;
        for (index, key) in self.keys().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(key, f)?;
        }
        f.write_str("}")
    }
}

impl<T: PartialEq, C> PartialEq for AATreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.keys().eq(other.keys())
    }
}

impl<T: Eq, C> Eq for AATreeSet<T, C> {}

impl<T: Ord + Clone> FromIterator<T> for AATreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new().insert(iter)
    }
}

impl<T: Clone, C: Comparator<T>> Extend<T> for AATreeSet<T, C> {
    /// Replaces `self` with a version holding the extra elements. Clones
    /// taken earlier keep seeing the old version.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        *self = self.insert(iter);
    }
}

impl<T: Ord + Clone, const N: usize> From<[T; N]> for AATreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        Self::new().insert(arr)
    }
}

impl<'a, T, C> IntoIterator for &'a AATreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = Keys<'a, T>;

    fn into_iter(self) -> Keys<'a, T> {
        self.keys()
    }
}

impl<'a, T> Iterator for Keys<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Keys<'_, T> {}

impl<T> FusedIterator for Keys<'_, T> {}

impl<T> Clone for Keys<'_, T> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Keys<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Keys<'_, T> {
    /// Creates an empty `aatree_set::Keys`.
    ///
    /// ```
    /// use aa_tree::aatree_set;
    ///
    /// let iter: aatree_set::Keys<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Keys {
            inner: RawIter::default(),
        }
    }
}
