//! Errors reported by [`RangeTree`](crate::RangeTree).

use thiserror::Error;

/// A query or update addressed positions the tree does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A position is past the end of the sequence (or the tree is empty).
    #[error("index {pos} out of bounds (len {len})")]
    OutOfBounds { pos: usize, len: usize },
    /// The left end of the range is past its right end.
    #[error("range [{left}, {right}] has left > right")]
    Inverted { left: usize, right: usize },
}

/// A tree could not be built from the given input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The sequence does not have the declared number of elements.
    #[error("sequence has {got} elements, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },
}
