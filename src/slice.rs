//! Partition along the outermost axis and recompose.

use std::borrow::Borrow;
use std::iter::FusedIterator;

use bytemuck::Pod;

use crate::array::{DenseArray, Dims};
use crate::config::MAX_RANK;
use crate::copy::{copy_box, BoxSide};
use crate::validate::{check_dims, check_fixed_width, check_rank, check_same_rank};
use crate::{Result, TransformError};

/// Lazy sequence of rank-(R-1) sub-arrays along axis 0.
///
/// Each item costs one contiguous block copy, paid only when the item is
/// pulled. The iterator is single-pass; start a new one with [`slice`] to
/// iterate again.
#[derive(Debug)]
pub struct Slices<'a, T> {
    source: &'a DenseArray<T>,
    item_dims: Dims,
    block: usize,
    next: usize,
}

/// Decompose `a` into its rows along axis 0.
///
/// Requires rank >= 2. Arguments are checked immediately; copies are deferred
/// to iteration.
pub fn slice<T: Pod>(a: &DenseArray<T>) -> Result<Slices<'_, T>> {
    check_fixed_width::<T>()?;
    check_rank(a.rank(), 2)?;
    log::debug!("slice: dims={:?}", a.dims());
    Ok(Slices {
        source: a,
        item_dims: Dims::from_slice(&a.dims()[1..]),
        block: a.strides()[0],
        next: 0,
    })
}

impl<T: Pod> Iterator for Slices<'_, T> {
    type Item = DenseArray<T>;

    fn next(&mut self) -> Option<DenseArray<T>> {
        if self.next >= self.source.dim(0) {
            return None;
        }
        let start = self.next * self.block;
        self.next += 1;
        let data = self.source.data()[start..start + self.block].to_vec();
        Some(DenseArray::from_parts_unchecked(data, &self.item_dims))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.dim(0) - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: Pod> ExactSizeIterator for Slices<'_, T> {}

impl<T: Pod> FusedIterator for Slices<'_, T> {}

/// Stack a sequence of equal-rank arrays along a new outermost axis.
///
/// Output extents are the maxima over all items, so ragged input is accepted:
/// an item smaller than the maximum leaves the rest of its row zeroed.
pub fn fuse<T, I>(items: I) -> Result<DenseArray<T>>
where
    T: Pod,
    I: IntoIterator,
    I::Item: Borrow<DenseArray<T>>,
{
    check_fixed_width::<T>()?;
    let items: Vec<I::Item> = items.into_iter().collect();
    let first = match items.first() {
        Some(first) => first.borrow(),
        None => return Err(TransformError::NullArgument("source")),
    };

    let item_rank = first.rank();
    if item_rank + 1 > MAX_RANK {
        return Err(TransformError::range(
            "rank",
            item_rank + 1,
            2,
            MAX_RANK as i64,
        ));
    }

    let mut out_dims = Dims::new();
    out_dims.push(items.len());
    out_dims.extend_from_slice(first.dims());
    for item in &items {
        let item = item.borrow();
        check_same_rank(item_rank, item.rank())?;
        for (max, &d) in out_dims[1..].iter_mut().zip(item.dims()) {
            *max = (*max).max(d);
        }
    }
    let total = check_dims(&out_dims)?;
    log::debug!("fuse: {} items into dims={:?}", items.len(), out_dims.as_slice());

    let mut data = vec![T::zeroed(); total];
    let mut origin = [0usize; MAX_RANK];
    let zeros = [0usize; MAX_RANK];
    for (i, item) in items.iter().enumerate() {
        let item = item.borrow();
        let mut src_dims = Dims::new();
        src_dims.push(1);
        src_dims.extend_from_slice(item.dims());
        origin[0] = i;
        copy_box(
            &mut data,
            BoxSide::new(&out_dims, &origin[..=item_rank]),
            item.data(),
            BoxSide::new(&src_dims, &zeros[..=item_rank]),
            &src_dims,
        );
    }
    Ok(DenseArray::from_parts_unchecked(data, &out_dims))
}
