//! Copy kernels over flat row-major buffers.
//!
//! Two shapes of copy cover every operation in the crate:
//!
//! - [`copy_box`]: move a rectangular box between two row-major buffers, one
//!   contiguous row (last axis) at a time, or in a single block when the box
//!   spans whole trailing axes of both buffers.
//! - [`gather_strided`]: materialize a permuted/reversed strided view of a
//!   buffer into a fresh row-major buffer.

use crate::array::row_major_strides;
use crate::config::MAX_RANK;

/// Geometry of one side of a box copy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoxSide<'a> {
    pub dims: &'a [usize],
    pub origin: &'a [usize],
}

impl<'a> BoxSide<'a> {
    pub fn new(dims: &'a [usize], origin: &'a [usize]) -> Self {
        Self { dims, origin }
    }
}

/// True when a box of `extent` placed at `origin` covers every trailing axis
/// of `dims` completely, so its rows are adjacent in memory.
fn spans_trailing_axes(side: &BoxSide<'_>, extent: &[usize]) -> bool {
    side.dims[1..] == extent[1..] && side.origin[1..].iter().all(|&o| o == 0)
}

fn base_offset(side: &BoxSide<'_>, strides: &[usize], outer: &[usize]) -> usize {
    let rank = side.dims.len();
    let mut offset = side.origin[rank - 1];
    for k in 0..rank - 1 {
        offset += (side.origin[k] + outer[k]) * strides[k];
    }
    offset
}

/// Copy the box `extent` from `src` (at `src.origin`) into `dst` (at
/// `dst.origin`). All ranks must agree and the box must fit on both sides;
/// callers validate this before calling.
pub(crate) fn copy_box<T: Copy>(
    dst: &mut [T],
    dst_side: BoxSide<'_>,
    src: &[T],
    src_side: BoxSide<'_>,
    extent: &[usize],
) {
    let rank = extent.len();
    debug_assert!((1..=MAX_RANK).contains(&rank));
    debug_assert_eq!(dst_side.dims.len(), rank);
    debug_assert_eq!(src_side.dims.len(), rank);

    let dst_strides = row_major_strides(dst_side.dims);
    let src_strides = row_major_strides(src_side.dims);

    // Fast path: the box is a single contiguous block on both sides
    if spans_trailing_axes(&dst_side, extent) && spans_trailing_axes(&src_side, extent) {
        let len: usize = extent.iter().product();
        let d0 = dst_side.origin[0] * dst_strides[0];
        let s0 = src_side.origin[0] * src_strides[0];
        log::trace!("copy_box: contiguous block of {len} elements");
        dst[d0..d0 + len].copy_from_slice(&src[s0..s0 + len]);
        return;
    }

    let row_len = extent[rank - 1];
    let rows: usize = extent[..rank - 1].iter().product();
    log::trace!("copy_box: {rows} rows of {row_len} elements");
    let mut outer = [0usize; MAX_RANK];
    for _ in 0..rows {
        let d = base_offset(&dst_side, &dst_strides, &outer);
        let s = base_offset(&src_side, &src_strides, &outer);
        dst[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
        for k in (0..rank - 1).rev() {
            outer[k] += 1;
            if outer[k] < extent[k] {
                break;
            }
            outer[k] = 0;
        }
    }
}

/// Read `src` through a strided view (`dims`, `strides`, `offset`) and return
/// the elements in row-major order of `dims`.
///
/// Strides may be negative; the caller guarantees every addressed offset lies
/// inside `src`.
pub(crate) fn gather_strided<T: Clone>(
    src: &[T],
    dims: &[usize],
    strides: &[isize],
    offset: isize,
) -> Vec<T> {
    let rank = dims.len();
    debug_assert_eq!(strides.len(), rank);
    let total: usize = dims.iter().product();
    let mut out = Vec::with_capacity(total);
    if total == 0 {
        return out;
    }

    let inner_len = dims[rank - 1];
    let inner_stride = strides[rank - 1];
    let mut idx = [0usize; MAX_RANK];
    let mut row_start = offset;
    for _ in 0..total / inner_len {
        let mut p = row_start;
        for _ in 0..inner_len {
            out.push(src[p as usize].clone());
            p += inner_stride;
        }
        // Advance the odometer over the outer axes
        for k in (0..rank - 1).rev() {
            idx[k] += 1;
            row_start += strides[k];
            if idx[k] < dims[k] {
                break;
            }
            row_start -= strides[k] * dims[k] as isize;
            idx[k] = 0;
        }
    }
    out
}
