//! The two call-shapes an update can take.
//!
//! A point-style updater sees the current value of a node and the left end of
//! the range that node covers. A range-style updater also sees the right end,
//! which is what range-add over a sum needs (`v + delta * (right - left + 1)`).
//!
//! Updaters are stored as lazy tasks and copied onto both children of a node
//! during push-down. Each copy owns its own clone of the closure and whatever
//! it captured, so the closures must be `Clone + 'static`.

use std::fmt;

/// Point-style updater: `(current, left) -> new`.
pub trait PointFn<Q>: Fn(&Q, usize) -> Q {
    /// Clone the closure, including its captured state, into a new box.
    fn clone_box(&self) -> Box<dyn PointFn<Q>>;
}

impl<Q, F> PointFn<Q> for F
where
    F: Fn(&Q, usize) -> Q + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn PointFn<Q>> {
        return Box::new(self.clone());
    }
}

/// Range-style updater: `(current, left, right) -> new`.
pub trait RangeFn<Q>: Fn(&Q, usize, usize) -> Q {
    /// Clone the closure, including its captured state, into a new box.
    fn clone_box(&self) -> Box<dyn RangeFn<Q>>;
}

impl<Q, F> RangeFn<Q> for F
where
    F: Fn(&Q, usize, usize) -> Q + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn RangeFn<Q>> {
        return Box::new(self.clone());
    }
}

/// An update function tagged with its call-shape.
///
/// ```
/// use range_tree::{LazyRangeTree, Sum, Updater};
///
/// let mut tree: LazyRangeTree<i64, Sum<i64>> = LazyRangeTree::from_vec(vec![1, 2, 3]);
/// let delta = 10;
/// tree.update(Updater::range(move |v: &Sum<i64>, l, r| Sum(v.0 + delta * (r - l + 1) as i64)), 0, 1);
/// assert_eq!(tree.query(0, 2), Some(Sum(26)));
/// ```
pub enum Updater<Q> {
    Point(Box<dyn PointFn<Q>>),
    Range(Box<dyn RangeFn<Q>>),
}

impl<Q> Updater<Q> {
    /// Tag `f` as a point-style updater.
    pub fn point<F>(f: F) -> Updater<Q>
    where
        F: Fn(&Q, usize) -> Q + Clone + 'static,
    {
        return Updater::Point(Box::new(f));
    }

    /// Tag `f` as a range-style updater.
    pub fn range<F>(f: F) -> Updater<Q>
    where
        F: Fn(&Q, usize, usize) -> Q + Clone + 'static,
    {
        return Updater::Range(Box::new(f));
    }

    /// Apply to the value of a node covering `[left, right]`.
    pub fn apply(&self, value: &Q, left: usize, right: usize) -> Q {
        return match self {
            Updater::Point(f) => f(value, left),
            Updater::Range(f) => f(value, left, right),
        };
    }

    /// Whether this updater only sees the left boundary.
    pub fn is_point(&self) -> bool {
        return matches!(self, Updater::Point(_));
    }

    /// Whether this updater sees both boundaries.
    pub fn is_range(&self) -> bool {
        return matches!(self, Updater::Range(_));
    }
}

impl<Q> Clone for Updater<Q> {
    fn clone(&self) -> Self {
        return match self {
            Updater::Point(f) => Updater::Point((**f).clone_box()),
            Updater::Range(f) => Updater::Range((**f).clone_box()),
        };
    }
}

impl<Q> fmt::Debug for Updater<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Updater::Point(_) => f.write_str("Updater::Point(..)"),
            Updater::Range(_) => f.write_str("Updater::Range(..)"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_shape() {
        let point: Updater<i64> = Updater::point(|v: &i64, l| v + l as i64);
        let range: Updater<i64> = Updater::range(|v: &i64, l, r| v + (r - l + 1) as i64);

        assert!(point.is_point());
        assert!(range.is_range());
        assert_eq!(point.apply(&100, 3, 9), 103);
        assert_eq!(range.apply(&100, 3, 9), 107);
    }

    #[test]
    fn clone_copies_captured_state() {
        use std::cell::Cell;

        let counter = Cell::new(0i64);
        let original: Updater<i64> = Updater::point(move |v: &i64, _| {
            counter.set(counter.get() + 1);
            v + counter.get()
        });
        assert_eq!(original.apply(&0, 0, 0), 1);
        assert_eq!(original.apply(&0, 0, 0), 2);

        // The copy starts from the captured state at clone time and diverges.
        let copy = original.clone();
        assert_eq!(copy.apply(&0, 0, 0), 3);
        assert_eq!(copy.apply(&0, 0, 0), 4);
        assert_eq!(original.apply(&0, 0, 0), 3);
    }

    #[test]
    fn clone_copies_range_closure() {
        use std::cell::Cell;

        let calls = Cell::new(0i64);
        let original: Updater<i64> = Updater::range(move |v: &i64, l, r| {
            calls.set(calls.get() + 1);
            v + (r - l) as i64 * calls.get()
        });
        assert_eq!(original.apply(&0, 0, 1), 1);

        let copy = original.clone();
        assert!(copy.is_range());
        assert_eq!(copy.apply(&0, 0, 1), 2);
        assert_eq!(copy.apply(&0, 0, 1), 3);
        assert_eq!(original.apply(&0, 0, 1), 2);
    }

    #[test]
    fn debug_shows_shape() {
        let point: Updater<i64> = Updater::point(|v: &i64, _| *v);
        assert_eq!(format!("{:?}", point), "Updater::Point(..)");
    }
}
