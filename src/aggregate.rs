//! Aggregates stored at the nodes of a [`RangeTree`](crate::RangeTree).
//!
//! An aggregate is lifted from a single base element and merged with
//! [`Aggregate::combine`]. The merge must be associative but need not be
//! commutative: the tree always combines the left subtree's result first.
//!
//! A handful of common aggregates are provided:
//!
//! - [`Sum`]: arithmetic sum
//! - [`Min`] / [`Max`]: smallest / largest element
//! - [`Gcd`]: greatest common divisor of unsigned integers
//! - [`Count`]: number of elements, regardless of their value

use std::ops::Add;

/// A value that can be built from one `Base` element and merged with another.
///
/// Require for all a, b, c: `a.combine(&b.combine(&c)) == a.combine(&b).combine(&c)`.
/// There is no identity element; an empty range is represented by `None`.
pub trait Aggregate<Base>: Clone {
    /// Build the aggregate of a single element.
    fn lift(base: &Base) -> Self;

    /// Merge `self` (covering the left range) with `other` (the right range).
    fn combine(&self, other: &Self) -> Self;
}

/// Sum of the elements in a range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sum<T>(pub T);

impl<T: Copy + Add<Output = T>> Aggregate<T> for Sum<T> {
    fn lift(base: &T) -> Self {
        return Sum(*base);
    }

    fn combine(&self, other: &Self) -> Self {
        return Sum(self.0 + other.0);
    }
}

/// Smallest element in a range. Ties keep the leftmost element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Min<T>(pub T);

impl<T: Copy + PartialOrd> Aggregate<T> for Min<T> {
    fn lift(base: &T) -> Self {
        return Min(*base);
    }

    fn combine(&self, other: &Self) -> Self {
        if other.0 < self.0 {
            return *other;
        }
        return *self;
    }
}

/// Largest element in a range. Ties keep the leftmost element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Max<T>(pub T);

impl<T: Copy + PartialOrd> Aggregate<T> for Max<T> {
    fn lift(base: &T) -> Self {
        return Max(*base);
    }

    fn combine(&self, other: &Self) -> Self {
        if other.0 > self.0 {
            return *other;
        }
        return *self;
    }
}

/// Greatest common divisor of a range. `gcd(0, x) == x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gcd(pub u64);

impl Aggregate<u64> for Gcd {
    fn lift(base: &u64) -> Self {
        return Gcd(*base);
    }

    fn combine(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.0, other.0);
        while b != 0 {
            (a, b) = (b, a % b);
        }
        return Gcd(a);
    }
}

/// Number of elements in a range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Count(pub usize);

impl<B> Aggregate<B> for Count {
    fn lift(_: &B) -> Self {
        return Count(1);
    }

    fn combine(&self, other: &Self) -> Self {
        return Count(self.0 + other.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_aggregate() {
        let a = Sum::<i64>::lift(&5);
        let b = Sum::<i64>::lift(&-3);
        assert_eq!(a.combine(&b), Sum(2));
    }

    #[test]
    fn min_max_aggregate() {
        assert_eq!(Min(4).combine(&Min(2)), Min(2));
        assert_eq!(Min(2).combine(&Min(4)), Min(2));
        assert_eq!(Max(4).combine(&Max(2)), Max(4));
        assert_eq!(Max(2.5f64).combine(&Max(7.0)), Max(7.0));
    }

    #[test]
    fn gcd_aggregate() {
        assert_eq!(Gcd(12).combine(&Gcd(18)), Gcd(6));
        assert_eq!(Gcd(0).combine(&Gcd(9)), Gcd(9));
        assert_eq!(Gcd(7).combine(&Gcd(0)), Gcd(7));
        assert_eq!(Gcd(17).combine(&Gcd(5)), Gcd(1));
    }

    #[test]
    fn count_aggregate() {
        let a: Count = Aggregate::<&str>::lift(&"x");
        let b = Count(3);
        assert_eq!(Aggregate::<&str>::combine(&a, &b), Count(4));
    }

    #[test]
    fn aggregates_are_associative() {
        let values = [12u64, 18, 30, 7, 0, 42];
        for a in values {
            for b in values {
                for c in values {
                    let (a, b, c) = (Gcd(a), Gcd(b), Gcd(c));
                    assert_eq!(a.combine(&b.combine(&c)), a.combine(&b).combine(&c));
                    let (x, y, z) = (Min(a.0), Min(b.0), Min(c.0));
                    assert_eq!(x.combine(&y.combine(&z)), x.combine(&y).combine(&z));
                }
            }
        }
    }
}
