type RawLevel = u8;

/// The AA-tree level of a node. The empty sentinel sits at level zero and
/// every leaf at level one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub(crate) struct Level(RawLevel);

impl Level {
    pub(crate) const MAX: RawLevel = RawLevel::MAX;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[cfg(test)]
    #[inline]
    pub(crate) const fn new(level: RawLevel) -> Self {
        Self(level)
    }

    #[inline]
    pub(crate) const fn get(self) -> RawLevel {
        self.0
    }

    /// The level one above `self`.
    #[inline]
    pub(crate) const fn succ(self) -> Self {
        assert!(self.0 < Self::MAX, "`Level::succ()` - `level` == `Level::MAX`!");
        Self(self.0 + 1)
    }

    /// The level one below `self`.
    #[inline]
    pub(crate) const fn pred(self) -> Self {
        assert!(self.0 > 0, "`Level::pred()` - `level` == `Level::ZERO`!");
        Self(self.0 - 1)
    }
}
