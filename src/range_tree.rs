//! Segment tree over a fixed-size sequence with lazily propagated updates.
//!
//! # Layout
//!
//! Nodes live in a flat array using the implicit 1-indexed heap layout: node
//! `v` has children `2v` and `2v + 1`. The root covers `[0, len - 1]` and every
//! node covering `[lo, hi]` with `lo < hi` splits at `mid = (lo + hi) / 2` into
//! `[lo, mid]` and `[mid + 1, hi]`. Ranges are never stored; they are recomputed
//! on the way down, identically for build, query and update. `4 * len + 1`
//! slots are always enough for this layout.
//!
//! ```text
//!                 1: [0, 4]
//!               /          \
//!         2: [0, 2]        3: [3, 4]
//!         /      \          /     \
//!    4: [0, 1]  5: [2]   6: [3]   7: [4]
//!     /    \
//!  8: [0]  9: [1]
//! ```
//!
//! # Lazy propagation
//!
//! With `LAZY = true` every node also owns a FIFO queue of pending
//! [`Updater`]s. An update whose range contains a node's whole range queues
//! itself there instead of descending. Before a node is read or updated its
//! queue is pushed down: each task, in order, is applied to the node's own
//! value and a copy is appended to both children's queues (leaves just apply).
//!
//! A queued task has not reached the node it sits at nor anything below it.
//! The node an update queues itself at is pushed down on the spot, so its
//! parent recombines from a current value; only the copies handed to its
//! children stay deferred.
//!
//! With `LAZY = false` a contained update walks the whole covered subtree
//! instead, applying the updater to every node and recombining on the way up.
//! Both modes give identical results as long as the updater distributes over
//! [`Aggregate::combine`] for the boundaries it is handed.
//!
//! # Operations
//!
//! - `query(left, right)` / `query_at(pos)`: O(log n)
//! - `update(updater, left, right)` / `update_at(f, pos)`: O(log n) lazy,
//!   O(size of range) eager
//! - construction: O(n)
//!
//! Out-of-range positions and `left > right` are contract violations and
//! panic; the `try_*` variants report them as [`RangeError`] instead.

use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;
use tracing::debug;
use tracing::trace;

use crate::aggregate::Aggregate;
use crate::error::BuildError;
use crate::error::RangeError;
use crate::updater::Updater;

/// Tasks a node's queue holds inline before spilling to the heap.
pub const TASK_INLINE: usize = 2;

/// Index of the root node.
const ROOT: usize = 1;

type TaskQueue<Q> = SmallVec<[Updater<Q>; TASK_INLINE]>;

/// A segment tree over `len` elements of type `B`, aggregated as `Q`.
///
/// `LAZY` selects lazy propagation (the default) or eager subtree rebuilds.
pub struct RangeTree<B, Q, const LAZY: bool = true> {
    len: usize,
    values: Vec<Option<Q>>,
    /// Pending tasks per node. Empty when `LAZY` is false.
    tasks: Vec<TaskQueue<Q>>,
    _base: PhantomData<fn(&B) -> Q>,
}

/// A tree that defers contained updates as queued tasks.
pub type LazyRangeTree<B, Q> = RangeTree<B, Q, true>;

/// A tree that applies contained updates to the whole subtree immediately.
pub type EagerRangeTree<B, Q> = RangeTree<B, Q, false>;

fn midpoint(lo: usize, hi: usize) -> usize {
    return lo + (hi - lo) / 2;
}

impl<B, Q: Aggregate<B>, const LAZY: bool> RangeTree<B, Q, LAZY> {
    /// Build a tree of `len` default elements.
    pub fn new(len: usize) -> Self
    where
        B: Default,
    {
        let items: Vec<B> = std::iter::repeat_with(B::default).take(len).collect();
        return Self::build(&items);
    }

    /// Build a tree of `len` copies of `value`.
    pub fn with_value(len: usize, value: B) -> Self
    where
        B: Clone,
    {
        return Self::build(&vec![value; len]);
    }

    /// Build a tree over `items`, leaf `i` lifted from `items[i]`.
    pub fn from_vec(items: Vec<B>) -> Self {
        return Self::build(&items);
    }

    /// Build a tree over `items`, which must hold exactly `len` elements.
    pub fn from_sequence(len: usize, items: Vec<B>) -> Result<Self, BuildError> {
        if items.len() != len {
            return Err(BuildError::LengthMismatch {
                expected: len,
                got: items.len(),
            });
        }
        return Ok(Self::build(&items));
    }

    /// Combine two partial results, left first. `None` means "no elements".
    fn combine_options(left: Option<&Q>, right: Option<&Q>) -> Option<Q> {
        return match (left, right) {
            (Some(l), Some(r)) => Some(l.combine(r)),
            (Some(l), None) => Some(l.clone()),
            (None, Some(r)) => Some(r.clone()),
            (None, None) => None,
        };
    }

    fn build(items: &[B]) -> Self {
        let len = items.len();
        let capacity = 4 * len + 1;

        let mut values = Vec::with_capacity(capacity);
        values.resize_with(capacity, || None);
        let mut tasks = Vec::new();
        if LAZY {
            tasks.resize_with(capacity, TaskQueue::new);
        }

        let mut tree = RangeTree {
            len,
            values,
            tasks,
            _base: PhantomData,
        };
        if len > 0 {
            tree.build_node(ROOT, 0, len - 1, items);
        }
        debug!(len, lazy = LAZY, "built range tree");
        return tree;
    }

    fn build_node(&mut self, node: usize, lo: usize, hi: usize, items: &[B]) {
        if lo == hi {
            self.values[node] = Some(Q::lift(&items[lo]));
            return;
        }
        let mid = midpoint(lo, hi);
        self.build_node(2 * node, lo, mid, items);
        self.build_node(2 * node + 1, mid + 1, hi, items);
        self.merge_children(node);
    }

    /// Number of elements in the sequence.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    pub fn is_lazy(&self) -> bool {
        return LAZY;
    }

    /// Total number of tasks queued across all nodes.
    pub fn pending_tasks(&self) -> usize {
        return self.tasks.iter().map(|queue| queue.len()).sum();
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), RangeError> {
        if left > right {
            return Err(RangeError::Inverted { left, right });
        }
        if right >= self.len {
            return Err(RangeError::OutOfBounds {
                pos: right,
                len: self.len,
            });
        }
        return Ok(());
    }

    fn merge_children(&mut self, node: usize) {
        let merged = Self::combine_options(
            self.values[2 * node].as_ref(),
            self.values[2 * node + 1].as_ref(),
        );
        self.values[node] = merged;
    }

    fn apply_updater(&mut self, updater: &Updater<Q>, node: usize, lo: usize, hi: usize) {
        let Some(value) = &self.values[node] else {
            unreachable!("node {} [{}, {}] was never built", node, lo, hi);
        };
        let next = updater.apply(value, lo, hi);
        self.values[node] = Some(next);
    }

    /// Apply this node's queued tasks to its value and hand copies to its
    /// children. Leaves apply and drop.
    fn push_down(&mut self, node: usize, lo: usize, hi: usize) {
        if self.tasks[node].is_empty() {
            return;
        }
        let queue = std::mem::take(&mut self.tasks[node]);
        for task in queue {
            self.apply_updater(&task, node, lo, hi);
            if lo != hi {
                self.tasks[2 * node].push(task.clone());
                self.tasks[2 * node + 1].push(task);
            }
        }
    }

    /// Aggregate of element `pos`.
    pub fn query_at(&mut self, pos: usize) -> Option<Q> {
        return self.query(pos, pos);
    }

    /// Aggregate of the elements in `[left, right]`, combined left to right.
    ///
    /// Panics if `left > right` or `right >= len`.
    pub fn query(&mut self, left: usize, right: usize) -> Option<Q> {
        return match self.try_query(left, right) {
            Ok(result) => result,
            Err(err) => panic!("query: {}", err),
        };
    }

    pub fn try_query_at(&mut self, pos: usize) -> Result<Option<Q>, RangeError> {
        return self.try_query(pos, pos);
    }

    pub fn try_query(&mut self, left: usize, right: usize) -> Result<Option<Q>, RangeError> {
        self.check_range(left, right)?;
        return Ok(self.query_node(ROOT, 0, self.len - 1, left, right));
    }

    /// Aggregate of the whole sequence, `None` when empty.
    pub fn total(&mut self) -> Option<Q> {
        if self.len == 0 {
            return None;
        }
        return self.query(0, self.len - 1);
    }

    /// Current aggregate of every single element, in order.
    pub fn to_vec(&mut self) -> Vec<Q> {
        return (0..self.len).filter_map(|pos| self.query_at(pos)).collect();
    }

    fn query_node(
        &mut self,
        node: usize,
        lo: usize,
        hi: usize,
        left: usize,
        right: usize,
    ) -> Option<Q> {
        if LAZY {
            self.push_down(node, lo, hi);
        }
        if hi < left || lo > right {
            return None;
        }
        if left <= lo && hi <= right {
            return self.values[node].clone();
        }
        let mid = midpoint(lo, hi);
        let from_left = self.query_node(2 * node, lo, mid, left, right);
        let from_right = self.query_node(2 * node + 1, mid + 1, hi, left, right);
        return Self::combine_options(from_left.as_ref(), from_right.as_ref());
    }

    /// Apply a point-style `f` to element `pos`.
    ///
    /// Panics if `pos >= len`.
    pub fn update_at<F>(&mut self, f: F, pos: usize)
    where
        F: Fn(&Q, usize) -> Q + Clone + 'static,
    {
        self.update(Updater::point(f), pos, pos);
    }

    /// Apply `updater` to every element in `[left, right]`.
    ///
    /// Panics if `left > right` or `right >= len`.
    pub fn update(&mut self, updater: Updater<Q>, left: usize, right: usize) {
        if let Err(err) = self.try_update(updater, left, right) {
            panic!("update: {}", err);
        }
    }

    pub fn try_update_at<F>(&mut self, f: F, pos: usize) -> Result<(), RangeError>
    where
        F: Fn(&Q, usize) -> Q + Clone + 'static,
    {
        return self.try_update(Updater::point(f), pos, pos);
    }

    pub fn try_update(
        &mut self,
        updater: Updater<Q>,
        left: usize,
        right: usize,
    ) -> Result<(), RangeError> {
        self.check_range(left, right)?;
        self.update_node(&updater, ROOT, 0, self.len - 1, left, right);
        return Ok(());
    }

    fn update_node(
        &mut self,
        updater: &Updater<Q>,
        node: usize,
        lo: usize,
        hi: usize,
        left: usize,
        right: usize,
    ) {
        if LAZY {
            self.push_down(node, lo, hi);
        }
        if hi < left || lo > right {
            return;
        }
        if left <= lo && hi <= right {
            if LAZY {
                trace!(node, lo, hi, "queued lazy task");
                self.tasks[node].push(updater.clone());
                // The parent recombines from this value on the way back up.
                self.push_down(node, lo, hi);
            } else {
                trace!(node, lo, hi, "rebuilding subtree");
                self.rebuild(updater, node, lo, hi);
            }
            return;
        }
        let mid = midpoint(lo, hi);
        self.update_node(updater, 2 * node, lo, mid, left, right);
        self.update_node(updater, 2 * node + 1, mid + 1, hi, left, right);
        self.merge_children(node);
    }

    fn rebuild(&mut self, updater: &Updater<Q>, node: usize, lo: usize, hi: usize) {
        self.apply_updater(updater, node, lo, hi);
        if lo == hi {
            return;
        }
        let mid = midpoint(lo, hi);
        self.rebuild(updater, 2 * node, lo, mid);
        self.rebuild(updater, 2 * node + 1, mid + 1, hi);
        self.merge_children(node);
    }
}

impl<B, Q: Aggregate<B>, const LAZY: bool> From<Vec<B>> for RangeTree<B, Q, LAZY> {
    fn from(items: Vec<B>) -> Self {
        return Self::from_vec(items);
    }
}

impl<B, Q: Aggregate<B>, const LAZY: bool> FromIterator<B> for RangeTree<B, Q, LAZY> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        return Self::from_vec(iter.into_iter().collect());
    }
}

// Manual implementation because `B` is only a marker and need not be `Clone`.
impl<B, Q: Clone, const LAZY: bool> Clone for RangeTree<B, Q, LAZY> {
    fn clone(&self) -> Self {
        return RangeTree {
            len: self.len,
            values: self.values.clone(),
            tasks: self.tasks.clone(),
            _base: PhantomData,
        };
    }
}

impl<B, Q, const LAZY: bool> fmt::Debug for RangeTree<B, Q, LAZY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending: usize = self.tasks.iter().map(|queue| queue.len()).sum();
        return f
            .debug_struct("RangeTree")
            .field("len", &self.len)
            .field("lazy", &LAZY)
            .field("pending_tasks", &pending)
            .finish();
    }
}
