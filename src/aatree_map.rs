use alloc::sync::Arc;
use core::fmt;
use core::iter::FusedIterator;

use crate::compare::{Comparator, Natural};
use crate::error::InvariantError;
use crate::raw::{Position, RawAATree, RawIter};

mod cursor;

pub use cursor::Cursor;

/// A persistent ordered map based on an AA-tree.
///
/// Maps are immutable values, exactly like [`AATreeSet`](crate::AATreeSet):
/// [`insert`] and [`remove`] return a new version and leave `self` untouched.
/// Entries are ordered by the map's [`Comparator`] applied to the keys.
///
/// [`insert`]: AATreeMap::insert
/// [`remove`]: AATreeMap::remove
///
/// # Examples
///
/// ```
/// use aa_tree::AATreeMap;
///
/// let reviews = AATreeMap::new()
///     .insert("Office Space", "Deals with real issues in the workplace.")
///     .insert("Pulp Fiction", "Masterpiece.")
///     .insert("The Godfather", "Very enjoyable.");
///
/// // Replacing a value yields a new version; the old one keeps its review.
/// let revised = reviews.insert("The Godfather", "Even better the second time.");
/// assert_eq!(reviews.get(&"The Godfather"), Some(&"Very enjoyable."));
/// assert_eq!(revised.get(&"The Godfather"), Some(&"Even better the second time."));
/// assert_eq!(revised.len(), 3);
///
/// for (movie, review) in &revised {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
pub struct AATreeMap<K, V, C = Natural> {
    raw: RawAATree<(K, V)>,
    comparator: Arc<C>,
}

/// An iterator over the entries of a `AATreeMap`, sorted by key.
///
/// This `struct` is created by the [`iter`] method on [`AATreeMap`].
///
/// [`iter`]: AATreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a, V: 'a> {
    inner: RawIter<'a, (K, V)>,
}

/// An iterator over the keys of a `AATreeMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`AATreeMap`].
///
/// [`keys`]: AATreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `AATreeMap`, in key order.
///
/// This `struct` is created by the [`values`] method on [`AATreeMap`].
///
/// [`values`]: AATreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<K, V> AATreeMap<K, V> {
    /// Makes a new, empty `AATreeMap` ordered by `K`'s [`Ord`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> AATreeMap<K, V, C> {
    /// Makes a new, empty `AATreeMap` ordered by `comparator` on its keys.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawAATree::new(),
            comparator: Arc::new(comparator),
        }
    }

    fn derive(&self, raw: RawAATree<(K, V)>) -> Self {
        Self {
            raw,
            comparator: Arc::clone(&self.comparator),
        }
    }

    /// Returns the comparator that orders this map's keys.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if both maps are the very same version.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.raw.ptr_eq(&other.raw)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|(k, v)| (k, v))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|(k, v)| (k, v))
    }

    /// Returns the number of nodes on the longest path from the root.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: self.raw.iter() }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C: Comparator<K>> AATreeMap<K, V, C> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeMap;
    ///
    /// let map = AATreeMap::from([(1, "a")]);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value matching `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.raw
            .get_by(|(stored, _)| self.comparator.compare(key, stored))
            .map(|(k, v)| (k, v))
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Places a cursor at `key`, or between its neighbours if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeMap;
    ///
    /// let map = AATreeMap::from([(1, "a"), (5, "e")]);
    /// let cursor = map.select(3);
    /// assert!(!cursor.is_found());
    /// assert_eq!(cursor.next().and_then(|c| c.value().copied()), Some("e"));
    /// ```
    pub fn select(&self, key: K) -> Cursor<'_, K, V, C> {
        let path = self.raw.select_by(|(stored, _)| self.comparator.compare(&key, stored));
        Cursor::new(self, Position::new(path, key))
    }

    /// Checks the tree's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self) -> Result<(), InvariantError> {
        self.raw.validate_by(|(a, _), (b, _)| self.comparator.compare(a, b))
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> AATreeMap<K, V, C> {
    /// Returns a version of the map with `key` bound to `value`.
    ///
    /// An existing entry for `key` is replaced in place; the length stays
    /// the same.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeMap;
    ///
    /// let map = AATreeMap::new().insert(37, "a");
    /// let map = map.insert(37, "b");
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        self.select(key).insert(value)
    }

    /// Returns a version of the map without `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeMap;
    ///
    /// let map = AATreeMap::from([(1, "a")]);
    /// assert!(map.remove(&1).is_empty());
    /// assert_eq!(map.remove(&2).len(), 1);
    /// ```
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let path = self.raw.select_by(|(stored, _)| self.comparator.compare(key, stored));
        match path {
            Some(head) if head.is_here() => self.derive(self.raw.unset(&head)),
            _ => self.clone(),
        }
    }
}

impl<K, V, C> Clone for AATreeMap<K, V, C> {
    fn clone(&self) -> Self {
        self.derive(self.raw.clone())
    }
}

impl<K, V> Default for AATreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AATreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AATreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AATreeMap<K, V, C> {}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for AATreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> Extend<(K, V)> for AATreeMap<K, V, C> {
    /// Replaces `self` with a version holding the extra entries. Later
    /// entries win over earlier ones with the same key.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            *self = self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V: Clone, const N: usize> From<[(K, V); N]> for AATreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a AATreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    fn default() -> Self {
        Iter {
            inner: RawIter::default(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
