use core::cmp::Ordering;

/// A total order over `T`.
///
/// Every tree keeps the comparator it was built with. It must stay a stable
/// total order for the tree's whole life; a comparator that changes its mind
/// leaves the tree's contents unspecified, though never unsound.
///
/// Any `Fn(&T, &T) -> Ordering` is a comparator.
///
/// # Examples
///
/// ```
/// use aa_tree::AATreeSet;
///
/// let set = AATreeSet::with_comparator(|a: &i32, b: &i32| b.cmp(a)).insert([1, 3, 2]);
/// assert_eq!(set.keys().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The default comparator: the key type's own [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
