//! Range Tree - a generic segment tree with lazy propagation.
//!
//! Answers associative range queries over a fixed-size sequence and applies
//! point or range updates, deferring update work until it is observed.
//!
//! # Quick Start
//!
//! ```
//! use range_tree::{LazyRangeTree, Min, Sum, Updater};
//!
//! // Sum with range-add
//! let mut sums: LazyRangeTree<i64, Sum<i64>> = LazyRangeTree::from_vec(vec![1, 2, 3, 4, 5]);
//! assert_eq!(sums.query(0, 4), Some(Sum(15)));
//! sums.update(Updater::range(|v: &Sum<i64>, l, r| Sum(v.0 + 10 * (r - l + 1) as i64)), 1, 3);
//! assert_eq!(sums.query(1, 3), Some(Sum(39)));
//!
//! // Min with point-assign
//! let mut mins: LazyRangeTree<i64, Min<i64>> = LazyRangeTree::from_vec(vec![5, 3, 8, 1, 9]);
//! mins.update_at(|_: &Min<i64>, _| Min(0), 3);
//! assert_eq!(mins.query(2, 4), Some(Min(0)));
//! ```

pub mod aggregate;
pub mod error;
pub mod range_tree;
pub mod updater;

pub use aggregate::Aggregate;
pub use aggregate::Count;
pub use aggregate::Gcd;
pub use aggregate::Max;
pub use aggregate::Min;
pub use aggregate::Sum;
pub use error::BuildError;
pub use error::RangeError;
pub use range_tree::EagerRangeTree;
pub use range_tree::LazyRangeTree;
pub use range_tree::RangeTree;
pub use updater::Updater;
