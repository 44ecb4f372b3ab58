use std::cmp::Ordering;

/// A strict weak ordering over keys.
///
/// The map derives key equality from the ordering relation: two keys are the
/// same key exactly when `compare` returns `Ordering::Equal`, and `PartialEq`
/// on `K` is never consulted. A comparator that orders strings by length,
/// for example, makes every pair of equal-length strings the same key.
pub trait Comparator<K> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Orders keys by their `Ord` instance. This is the default comparator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline(always)]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}
