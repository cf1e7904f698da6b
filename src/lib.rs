//! Shape transforms for small dense arrays of rank 1 through 4.
//!
//! Arrays are owned, row-major [`DenseArray`] buffers. Every operation either
//! reads the row-major stride invariant or re-establishes it in a freshly
//! allocated output; [`replace`] is the only in-place write.
//!
//! # Core Types
//!
//! - [`DenseArray`]: flat buffer plus a rank 1-4 dimension vector
//! - [`Axis`] / [`FlipAxes`]: named axis selectors (X is the fastest axis)
//! - [`Jagged`]: ragged nested representation of the same content
//! - [`ResampleOps`]: numeric capability consumed by the generic resize path
//!
//! # Operations
//!
//! ## Partitioning
//!
//! - [`slice`]: lazy rank-(R-1) arrays along axis 0
//! - [`fuse`]: the inverse, tolerating ragged input by zero padding
//! - [`circular_shift`], [`circular_shift_with_step`], [`split`]: sliding windows and tiles
//!
//! ## Geometry
//!
//! - [`rotate`], [`rotate_2d`]: quarter-turn rotations about a named axis
//! - [`flip`], [`flip_1d`]: reflections about a set of axes
//!
//! ## Resampling
//!
//! - [`resize`]: trend-preserving resample for floating point arrays
//! - [`resize_with`]: the same algorithm for any type with [`ResampleOps`]
//!
//! ## Regions and ragged data
//!
//! - [`replace`], [`extract`]: write or read a rectangular region
//! - [`to_jagged`], [`from_jagged`]: dense <-> ragged conversion
//!
//! # Example
//!
//! ```rust
//! use dense_transform::{rotate_2d, DenseArray};
//!
//! let a = DenseArray::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
//! let r = rotate_2d(&a, 90).unwrap();
//! assert_eq!(r.dims(), &[3, 2]);
//! assert_eq!(r.data(), &[4, 1, 5, 2, 6, 3]);
//! ```
//!
//! # Resampling Example
//!
//! ```rust
//! use dense_transform::{resize, DenseArray};
//!
//! let a = DenseArray::from_vec(vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0], &[6]).unwrap();
//! let shrunk = resize(&a, &[3]).unwrap();
//! assert_eq!(shrunk.data(), &[1.0, 5.0, 9.0]);
//! ```

mod array;
mod axis;
pub mod compare;
pub mod config;
mod copy;
mod flip;
mod jagged;
mod region;
pub mod resize;
mod rotate;
mod slice;
mod validate;
mod window;

// ============================================================================
// Array model
// ============================================================================
pub use array::{row_major_strides, DenseArray};
pub use axis::{Axis, FlipAxes};

// ============================================================================
// Operations
// ============================================================================
pub use flip::{flip, flip_1d};
pub use jagged::{from_jagged, to_jagged, Jagged};
pub use region::{extract, replace};
pub use resize::{
    resize, resize_slice, resize_slice_with, resize_with, ComplexOps, FloatOps, NumericOps,
    ResampleOps,
};
pub use rotate::{rotate, rotate_2d};
pub use slice::{fuse, slice, Slices};
pub use window::{circular_shift, circular_shift_with_step, split, Windows};

// ============================================================================
// Comparison
// ============================================================================
pub use compare::{ApproxComparer, DefaultEpsilon};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array transforms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A required array or sequence was empty.
    #[error("missing required argument `{0}`")]
    NullArgument(&'static str),

    /// A size, offset, step or extent lies outside its valid bounds.
    #[error("`{param}` = {value} is outside the valid range [{min}, {max}]")]
    InvalidRange {
        param: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The element type has no fixed byte width usable for block copies.
    #[error("element type `{0}` has no fixed byte width")]
    UnsupportedElementType(&'static str),

    /// Rotation angle is not a multiple of 90 degrees.
    #[error("angle {0} is not a multiple of 90 degrees")]
    InvalidAngle(i32),

    /// Axis selector is not valid for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: String, rank: usize },

    /// Operand ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Buffer length and dims disagree.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// The element count of a shape does not fit in `usize`.
    #[error("element count of shape {0:?} overflows usize")]
    SizeOverflow(Vec<usize>),

    /// Failed to convert an interpolation weight into the element type.
    #[error("failed to convert scalar weight into the element type")]
    ScalarConversion,
}

impl TransformError {
    pub(crate) fn range(param: impl Into<String>, value: usize, min: i64, max: i64) -> Self {
        TransformError::InvalidRange {
            param: param.into(),
            value: value as i64,
            min,
            max,
        }
    }
}

/// Result type for array transforms.
pub type Result<T> = std::result::Result<T, TransformError>;
