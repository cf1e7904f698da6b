//! Epsilon-tolerant equality for floating point values and arrays.
//!
//! [`ApproxComparer`] carries an absolute tolerance chosen at run time.
//! `DenseArray` also implements [`approx::AbsDiffEq`] and
//! [`approx::RelativeEq`], so the `approx` assertion macros work on whole
//! arrays.

use approx::{AbsDiffEq, RelativeEq};
use num_traits::Float;

use crate::array::DenseArray;
use crate::config::{DEFAULT_EPSILON_F32, DEFAULT_EPSILON_F64};

/// Per-type default tolerance.
pub trait DefaultEpsilon: Float {
    fn default_epsilon() -> Self;
}

impl DefaultEpsilon for f64 {
    fn default_epsilon() -> f64 {
        DEFAULT_EPSILON_F64
    }
}

impl DefaultEpsilon for f32 {
    fn default_epsilon() -> f32 {
        DEFAULT_EPSILON_F32
    }
}

/// Absolute-tolerance comparer.
///
/// Two values are equal when they compare equal exactly or differ by at most
/// `epsilon`. NaN never equals anything, itself included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxComparer<T> {
    epsilon: T,
}

impl<T: Float> ApproxComparer<T> {
    pub fn new(epsilon: T) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    pub fn eq(&self, a: T, b: T) -> bool {
        a == b || (a - b).abs() <= self.epsilon
    }

    pub fn eq_slices(&self, a: &[T], b: &[T]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.eq(x, y))
    }

    /// Equal dims and element-wise equal data.
    pub fn eq_arrays(&self, a: &DenseArray<T>, b: &DenseArray<T>) -> bool {
        a.dims() == b.dims() && self.eq_slices(a.data(), b.data())
    }
}

impl<T: DefaultEpsilon> Default for ApproxComparer<T> {
    fn default() -> Self {
        Self::new(T::default_epsilon())
    }
}

impl<T> AbsDiffEq for DenseArray<T>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.dims() == other.dims()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for DenseArray<T>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.dims() == other.dims()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
