use core::fmt;

use super::AATreeMap;
use crate::compare::{Comparator, Natural};
use crate::raw::Position;

/// A position in an [`AATreeMap`]: either on an entry, or between two entries
/// where a searched-for key would go.
///
/// This `struct` is created by [`AATreeMap::select`].
pub struct Cursor<'a, K, V, C = Natural> {
    owner: &'a AATreeMap<K, V, C>,
    position: Position<(K, V), K>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(super) fn new(owner: &'a AATreeMap<K, V, C>, position: Position<(K, V), K>) -> Self {
        Self { owner, position }
    }

    /// Returns `true` if the cursor sits on an entry.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.position.is_found()
    }

    /// Returns the key of the entry under the cursor, or the searched-for key
    /// when the cursor sits between entries.
    #[must_use]
    pub fn key(&self) -> &K {
        match &self.position {
            Position::Found(head) => &head.node.key.0,
            Position::Vacant { key, .. } => key,
        }
    }

    /// Returns the value under the cursor, if it sits on an entry.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        match &self.position {
            Position::Found(head) => Some(&head.node.key.1),
            Position::Vacant { .. } => None,
        }
    }

    /// Moves to the entry with the smallest key greater than the cursor's
    /// position.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.position.next().map(|position| Self::new(self.owner, position))
    }

    /// Moves to the entry with the largest key smaller than the cursor's
    /// position.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.position.previous().map(|position| Self::new(self.owner, position))
    }

    /// Returns the map this cursor points into.
    #[must_use]
    pub fn owner(&self) -> &'a AATreeMap<K, V, C> {
        self.owner
    }
}

impl<K: Clone, V: Clone, C: Comparator<K>> Cursor<'_, K, V, C> {
    /// Returns a version of the owning map with the cursor's key bound to
    /// `value`, replacing the value of an existing entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use aa_tree::AATreeMap;
    ///
    /// let map = AATreeMap::from([(1, "a"), (2, "b")]);
    /// let updated = map.select(1).next().expect("2 follows 1").insert("B");
    /// assert_eq!(updated.get(&2), Some(&"B"));
    /// assert_eq!(map.get(&2), Some(&"b"));
    /// ```
    #[must_use]
    pub fn insert(self, value: V) -> AATreeMap<K, V, C> {
        let raw = &self.owner.raw;
        let next = match self.position {
            Position::Found(head) => {
                let key = head.node.key.0.clone();
                raw.set(Some(head), (key, value))
            }
            Position::Vacant { path, key } => raw.set(path, (key, value)),
        };
        self.owner.derive(next)
    }

    /// Returns a version of the owning map without the entry under the
    /// cursor. Between entries this is the owning map itself.
    #[must_use]
    pub fn remove(self) -> AATreeMap<K, V, C> {
        match &self.position {
            Position::Found(head) => self.owner.derive(self.owner.raw.unset(head)),
            Position::Vacant { .. } => self.owner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("found", &self.is_found())
            .field("key", self.key())
            .field("value", &self.value())
            .finish()
    }
}
