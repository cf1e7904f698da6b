//! Trend-preserving resampling.
//!
//! The 1-D primitive has three regimes:
//!
//! - **expand** (`new > len`): output `x` sits at the continuous source
//!   position `pos = x * (len - 1) / (new - 1)`. Positions within
//!   [`SNAP_TOLERANCE`] of a cell, or past the last cell, copy that cell;
//!   anything else interpolates linearly between `floor(pos)` and
//!   `floor(pos) + 1`.
//! - **shrink** (`new < len`): output `x` covers the source span
//!   `[x * ratio, (x + 1) * ratio)` with `ratio = len / new`. Every covered
//!   cell contributes its value weighted by the covered fraction of the cell
//!   and the sum is divided by `ratio` (area-weighted box downsampling).
//! - **equal**: verbatim copy.
//!
//! Both the floating point path ([`resize_slice`]) and the generic path
//! ([`resize_slice_with`]) evaluate the same sampling plan in the same order,
//! so for `f64` with [`FloatOps`] they produce bit-identical results.
//!
//! Higher ranks resample one axis at a time, innermost axis first. Every
//! axis is resampled independently, so the order does not change the result.

use std::ops::Range;

use num_complex::Complex;
use num_traits::Float;

use crate::array::{DenseArray, Dims};
use crate::axis::param_name;
use crate::config::SNAP_TOLERANCE;
use crate::validate::{check_dims, check_same_rank};
use crate::{Result, TransformError};

// ============================================================================
// Numeric capability
// ============================================================================

/// Arithmetic needed to resample values of type `T`.
///
/// Implement this for value types that are not plain floats. The four
/// operations must behave like vector-space arithmetic over `f64` scalars for
/// the resampled output to be meaningful.
pub trait ResampleOps<T> {
    fn add(&self, a: &T, b: &T) -> T;
    fn sub(&self, a: &T, b: &T) -> T;
    fn scale(&self, a: &T, factor: f64) -> T;
    fn div(&self, a: &T, divisor: f64) -> T;
}

/// Ordinary arithmetic for any `num_traits::Float`.
///
/// A factor that cannot be represented in `F` becomes NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatOps;

impl<F: Float> ResampleOps<F> for FloatOps {
    fn add(&self, a: &F, b: &F) -> F {
        *a + *b
    }

    fn sub(&self, a: &F, b: &F) -> F {
        *a - *b
    }

    fn scale(&self, a: &F, factor: f64) -> F {
        *a * num_traits::cast(factor).unwrap_or_else(F::nan)
    }

    fn div(&self, a: &F, divisor: f64) -> F {
        *a / num_traits::cast(divisor).unwrap_or_else(F::nan)
    }
}

/// Component-wise arithmetic for complex values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplexOps;

impl<F: Float> ResampleOps<Complex<F>> for ComplexOps {
    fn add(&self, a: &Complex<F>, b: &Complex<F>) -> Complex<F> {
        *a + *b
    }

    fn sub(&self, a: &Complex<F>, b: &Complex<F>) -> Complex<F> {
        *a - *b
    }

    fn scale(&self, a: &Complex<F>, factor: f64) -> Complex<F> {
        *a * num_traits::cast::<f64, F>(factor).unwrap_or_else(F::nan)
    }

    fn div(&self, a: &Complex<F>, divisor: f64) -> Complex<F> {
        *a / num_traits::cast::<f64, F>(divisor).unwrap_or_else(F::nan)
    }
}

/// Resample arithmetic supplied as four plain functions.
///
/// Non-capturing closures coerce to the field types:
///
/// ```rust
/// use dense_transform::{resize_slice_with, NumericOps};
///
/// let ops = NumericOps::<(f64, f64)> {
///     add: |a, b| (a.0 + b.0, a.1 + b.1),
///     sub: |a, b| (a.0 - b.0, a.1 - b.1),
///     scale: |a, f| (a.0 * f, a.1 * f),
///     div: |a, d| (a.0 / d, a.1 / d),
/// };
/// let out = resize_slice_with(&[(0.0, 0.0), (2.0, 4.0)], 3, &ops).unwrap();
/// assert_eq!(out[1], (1.0, 2.0));
/// ```
pub struct NumericOps<T> {
    pub add: fn(&T, &T) -> T,
    pub sub: fn(&T, &T) -> T,
    pub scale: fn(&T, f64) -> T,
    pub div: fn(&T, f64) -> T,
}

impl<T> Clone for NumericOps<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NumericOps<T> {}

impl<T> std::fmt::Debug for NumericOps<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericOps").finish_non_exhaustive()
    }
}

impl<T> ResampleOps<T> for NumericOps<T> {
    fn add(&self, a: &T, b: &T) -> T {
        (self.add)(a, b)
    }

    fn sub(&self, a: &T, b: &T) -> T {
        (self.sub)(a, b)
    }

    fn scale(&self, a: &T, factor: f64) -> T {
        (self.scale)(a, factor)
    }

    fn div(&self, a: &T, divisor: f64) -> T {
        (self.div)(a, divisor)
    }
}

// ============================================================================
// Sampling plan
// ============================================================================

/// How one output sample is built from the source line.
#[derive(Debug, Clone, PartialEq)]
enum Sample {
    /// Copy one source cell.
    Copy(usize),
    /// `src[lo] + (src[lo + 1] - src[lo]) * frac`.
    Lerp { lo: usize, frac: f64 },
    /// Weighted sum over a span divided by `ratio`.
    Area {
        first: Option<(usize, f64)>,
        full: Range<usize>,
        last: Option<(usize, f64)>,
        ratio: f64,
    },
}

fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() <= SNAP_TOLERANCE {
        r
    } else {
        v
    }
}

fn expand_sample(x: usize, len: usize, new_len: usize) -> Sample {
    if len == 1 {
        return Sample::Copy(0);
    }
    let pos = x as f64 * (len - 1) as f64 / (new_len - 1) as f64;
    let nearest = pos.round();
    if (pos - nearest).abs() <= SNAP_TOLERANCE {
        return Sample::Copy((nearest as usize).min(len - 1));
    }
    let lo = pos.floor() as usize;
    if lo + 1 >= len {
        return Sample::Copy(len - 1);
    }
    Sample::Lerp {
        lo,
        frac: pos - lo as f64,
    }
}

fn shrink_sample(x: usize, len: usize, new_len: usize) -> Sample {
    let ratio = len as f64 / new_len as f64;
    let start = snap(x as f64 * ratio);
    let end = snap((x + 1) as f64 * ratio);

    let s = start.floor();
    let lead = start - s;
    let (first, full_from) = if lead > 0.0 {
        (Some((s as usize, 1.0 - lead)), s as usize + 1)
    } else {
        (None, s as usize)
    };

    let e = end.floor();
    let tail = end - e;
    let e = e as usize;
    let last = if tail > 0.0 && e < len {
        Some((e, tail))
    } else {
        None
    };

    Sample::Area {
        first,
        full: full_from..e.min(len),
        last,
        ratio,
    }
}

fn plan(len: usize, new_len: usize) -> impl Iterator<Item = Sample> {
    (0..new_len).map(move |x| {
        if new_len > len {
            expand_sample(x, len, new_len)
        } else if new_len < len {
            shrink_sample(x, len, new_len)
        } else {
            Sample::Copy(x)
        }
    })
}

fn check_line<T>(src: &[T], new_len: usize) -> Result<()> {
    if src.is_empty() {
        return Err(TransformError::NullArgument("source"));
    }
    if new_len == 0 {
        return Err(TransformError::range("new_size", 0, 1, i64::MAX));
    }
    Ok(())
}

fn regime(len: usize, new_len: usize) -> &'static str {
    match new_len.cmp(&len) {
        std::cmp::Ordering::Greater => "expand",
        std::cmp::Ordering::Less => "shrink",
        std::cmp::Ordering::Equal => "copy",
    }
}

// ============================================================================
// 1-D primitives
// ============================================================================

fn real<F: Float>(v: f64) -> Result<F> {
    num_traits::cast(v).ok_or(TransformError::ScalarConversion)
}

/// Resample a line of floats to `new_len` samples.
pub fn resize_slice<F: Float>(src: &[F], new_len: usize) -> Result<Vec<F>> {
    check_line(src, new_len)?;
    log::trace!("resize_slice: {} -> {new_len} ({})", src.len(), regime(src.len(), new_len));
    let mut out = Vec::with_capacity(new_len);
    for sample in plan(src.len(), new_len) {
        let value = match sample {
            Sample::Copy(i) => src[i],
            Sample::Lerp { lo, frac } => src[lo] + (src[lo + 1] - src[lo]) * real::<F>(frac)?,
            Sample::Area {
                first,
                full,
                last,
                ratio,
            } => {
                let mut sum = F::zero();
                if let Some((i, w)) = first {
                    sum = sum + src[i] * real::<F>(w)?;
                }
                for v in &src[full] {
                    sum = sum + *v;
                }
                if let Some((i, w)) = last {
                    sum = sum + src[i] * real::<F>(w)?;
                }
                sum / real::<F>(ratio)?
            }
        };
        out.push(value);
    }
    Ok(out)
}

/// Resample a line of arbitrary values using `ops` for arithmetic.
pub fn resize_slice_with<T, O>(src: &[T], new_len: usize, ops: &O) -> Result<Vec<T>>
where
    T: Clone,
    O: ResampleOps<T> + ?Sized,
{
    check_line(src, new_len)?;
    log::trace!(
        "resize_slice_with: {} -> {new_len} ({})",
        src.len(),
        regime(src.len(), new_len)
    );
    let mut out = Vec::with_capacity(new_len);
    for sample in plan(src.len(), new_len) {
        let value = match sample {
            Sample::Copy(i) => src[i].clone(),
            Sample::Lerp { lo, frac } => {
                let delta = ops.sub(&src[lo + 1], &src[lo]);
                ops.add(&src[lo], &ops.scale(&delta, frac))
            }
            Sample::Area {
                first,
                full,
                last,
                ratio,
            } => {
                let mut acc: Option<T> = None;
                let mut push = |v: T| {
                    acc = Some(match acc.take() {
                        Some(sum) => ops.add(&sum, &v),
                        None => v,
                    });
                };
                if let Some((i, w)) = first {
                    push(ops.scale(&src[i], w));
                }
                for v in &src[full] {
                    push(v.clone());
                }
                if let Some((i, w)) = last {
                    push(ops.scale(&src[i], w));
                }
                match acc {
                    Some(sum) => ops.div(&sum, ratio),
                    None => return Err(TransformError::NullArgument("source")),
                }
            }
        };
        out.push(value);
    }
    Ok(out)
}

// ============================================================================
// N-D driver
// ============================================================================

fn check_new_dims(dims: &[usize], new_dims: &[usize]) -> Result<()> {
    check_same_rank(dims.len(), new_dims.len())?;
    let rank = dims.len();
    for (pos, &n) in new_dims.iter().enumerate() {
        if n == 0 {
            return Err(TransformError::range(
                param_name("new_size", rank, pos),
                n,
                1,
                i64::MAX,
            ));
        }
    }
    check_dims(new_dims)?;
    Ok(())
}

/// Resample every line of `data` along `axis` to `new_len` samples.
fn resample_axis<T: Clone>(
    data: &[T],
    dims: &[usize],
    axis: usize,
    new_len: usize,
    line_fn: &mut impl FnMut(&[T]) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let len = dims[axis];
    let outer: usize = dims[..axis].iter().product();
    let inner: usize = dims[axis + 1..].iter().product();
    let mut out = Vec::with_capacity(outer * new_len * inner);

    // Innermost axis: lines are contiguous
    if inner == 1 {
        for line in data.chunks_exact(len) {
            out.extend(line_fn(line)?);
        }
        return Ok(out);
    }

    let block = len * inner;
    let mut scratch = Vec::with_capacity(len);
    let mut lines: Vec<Vec<T>> = Vec::with_capacity(inner);
    for o in 0..outer {
        lines.clear();
        for i in 0..inner {
            scratch.clear();
            scratch.extend((0..len).map(|k| data[o * block + k * inner + i].clone()));
            lines.push(line_fn(&scratch)?);
        }
        for k in 0..new_len {
            out.extend(lines.iter().map(|line| line[k].clone()));
        }
    }
    Ok(out)
}

fn resize_axes<T: Clone>(
    a: &DenseArray<T>,
    new_dims: &[usize],
    mut line_fn: impl FnMut(&[T], usize) -> Result<Vec<T>>,
) -> Result<DenseArray<T>> {
    check_new_dims(a.dims(), new_dims)?;
    let mut dims = Dims::from_slice(a.dims());
    let mut data: Option<Vec<T>> = None;
    for axis in (0..a.rank()).rev() {
        let new_len = new_dims[axis];
        if dims[axis] == new_len {
            continue;
        }
        log::trace!("resize: axis {axis} {} -> {new_len}", dims[axis]);
        // Intermediate shapes mix old and new extents and may exceed both
        let mut next_dims = dims.clone();
        next_dims[axis] = new_len;
        check_dims(&next_dims)?;
        let current = data.as_deref().unwrap_or(a.data());
        let next = resample_axis(current, &dims, axis, new_len, &mut |line: &[T]| line_fn(line, new_len))?;
        dims = next_dims;
        data = Some(next);
    }
    Ok(match data {
        Some(data) => DenseArray::from_parts_unchecked(data, &dims),
        None => a.clone(),
    })
}

/// Resample a floating point array to `new_dims`.
///
/// `new_dims` has one positive entry per axis; axes whose length is unchanged
/// are copied verbatim.
pub fn resize<F: Float>(a: &DenseArray<F>, new_dims: &[usize]) -> Result<DenseArray<F>> {
    log::debug!("resize: dims={:?} -> {new_dims:?}", a.dims());
    resize_axes(a, new_dims, |line, n| resize_slice(line, n))
}

/// Resample an array of any value type using `ops` for arithmetic.
pub fn resize_with<T, O>(a: &DenseArray<T>, new_dims: &[usize], ops: &O) -> Result<DenseArray<T>>
where
    T: Clone,
    O: ResampleOps<T> + ?Sized,
{
    log::debug!("resize_with: dims={:?} -> {new_dims:?}", a.dims());
    resize_axes(a, new_dims, |line, n| resize_slice_with(line, n, ops))
}
