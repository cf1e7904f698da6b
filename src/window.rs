//! Sliding-window and tiling enumeration.
//!
//! Window start offsets along axis `k` run `0, step[k], 2 * step[k], ..` up to
//! `dims[k] - size[k]` inclusive. Positions are enumerated in row-major order,
//! so the outermost axis varies slowest. Partial windows are never produced.

use std::iter::FusedIterator;

use bytemuck::Pod;

use crate::array::{DenseArray, Dims};
use crate::config::MAX_RANK;
use crate::copy::{copy_box, BoxSide};
use crate::validate::{check_extents, check_fixed_width};
use crate::Result;

/// Lazy sequence of windows over a dense array.
///
/// Single-pass: call [`circular_shift`] or [`split`] again to start over.
#[derive(Debug)]
pub struct Windows<'a, T> {
    source: &'a DenseArray<T>,
    size: Dims,
    step: Dims,
    counts: Dims,
    next: usize,
    total: usize,
}

/// Every window of `size`, moving one element at a time along each axis.
pub fn circular_shift<'a, T: Pod>(a: &'a DenseArray<T>, size: &[usize]) -> Result<Windows<'a, T>> {
    let step = vec![1; size.len()];
    circular_shift_with_step(a, size, &step)
}

/// Windows of `size` advanced by `step` along each axis.
///
/// `size` and `step` carry one entry per axis, each in `[1, dims[k]]`.
pub fn circular_shift_with_step<'a, T: Pod>(
    a: &'a DenseArray<T>,
    size: &[usize],
    step: &[usize],
) -> Result<Windows<'a, T>> {
    check_fixed_width::<T>()?;
    check_extents("size", a.dims(), size)?;
    check_extents("step", a.dims(), step)?;

    let counts: Dims = a
        .dims()
        .iter()
        .zip(size.iter().zip(step))
        .map(|(&len, (&s, &st))| (len - s) / st + 1)
        .collect();
    let total = counts.iter().product();
    log::debug!(
        "circular_shift: dims={:?} size={size:?} step={step:?} windows={total}",
        a.dims()
    );
    Ok(Windows {
        source: a,
        size: Dims::from_slice(size),
        step: Dims::from_slice(step),
        counts,
        next: 0,
        total,
    })
}

/// Non-overlapping tiles of `size`; any remainder smaller than a tile is skipped.
pub fn split<'a, T: Pod>(a: &'a DenseArray<T>, size: &[usize]) -> Result<Windows<'a, T>> {
    circular_shift_with_step(a, size, size)
}

impl<T> Windows<'_, T> {
    /// Window extent shared by every item.
    pub fn window_dims(&self) -> &[usize] {
        &self.size
    }

    /// Origin of the window with linear position `n`.
    fn origin(&self, mut n: usize) -> [usize; MAX_RANK] {
        let mut origin = [0usize; MAX_RANK];
        for k in (0..self.counts.len()).rev() {
            origin[k] = (n % self.counts[k]) * self.step[k];
            n /= self.counts[k];
        }
        origin
    }
}

impl<T: Pod> Iterator for Windows<'_, T> {
    type Item = DenseArray<T>;

    fn next(&mut self) -> Option<DenseArray<T>> {
        if self.next >= self.total {
            return None;
        }
        let rank = self.size.len();
        let origin = self.origin(self.next);
        self.next += 1;

        let len: usize = self.size.iter().product();
        let mut data = vec![T::zeroed(); len];
        let zeros = [0usize; MAX_RANK];
        copy_box(
            &mut data,
            BoxSide::new(&self.size, &zeros[..rank]),
            self.source.data(),
            BoxSide::new(self.source.dims(), &origin[..rank]),
            &self.size,
        );
        Some(DenseArray::from_parts_unchecked(data, &self.size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: Pod> ExactSizeIterator for Windows<'_, T> {}

impl<T: Pod> FusedIterator for Windows<'_, T> {}
