//! Quarter-turn rotations about a named axis.
//!
//! A rotation turns one plane `(i, j)` of the array (`i < j`). One quarter
//! turn maps `out[i] = in[j]`, `out[j] = Bi - in[i]` (where `Bi = dims[i] - 1`)
//! and swaps the two extents. Two quarter turns reverse both axes; three map
//! `out[i] = Bj - in[j]`, `out[j] = in[i]`.
//!
//! Every turn is expressed as a permuted, partially reversed strided view of
//! the source and materialized with one gather.
//!
//! | rank | axis | plane    |
//! |------|------|----------|
//! | 2    | Z    | (Y, X)   |
//! | 3    | X    | (Z, Y)   |
//! | 3    | Y    | (Z, X)   |
//! | 3    | Z    | (Y, X)   |
//! | 4    | X    | (Z, Y)   |
//! | 4    | Y    | (Z, X)   |
//! | 4    | Z    | (Y, X)   |
//! | 4    | A    | (A, Z)   |
//!
//! Rank 2 and 3 angles are taken modulo 360. Rank 4 angles are taken modulo
//! 540 and mapped through a fixed table in which 360 acts as a half turn and
//! 450 as a three-quarter turn; see [`ROTATE_PERIOD_RANK4`].

use crate::array::DenseArray;
use crate::axis::Axis;
use crate::config::{MAX_RANK, ROTATE_PERIOD, ROTATE_PERIOD_RANK4};
use crate::copy::gather_strided;
use crate::validate::check_rank;
use crate::{Result, TransformError};

/// Rotate `a` by `angle` degrees (a multiple of 90) about `axis`.
///
/// `Axis::None` or an angle equivalent to zero returns a copy. Rank 2 accepts
/// `Axis::Z` (the normal of its only plane) and `Axis::None`.
pub fn rotate<T: Clone>(a: &DenseArray<T>, axis: Axis, angle: i32) -> Result<DenseArray<T>> {
    if angle % 90 != 0 {
        return Err(TransformError::InvalidAngle(angle));
    }
    let rank = a.rank();
    check_rank(rank, 2)?;
    let plane = rotation_plane(rank, axis)?;
    let turns = quarter_turns(rank, angle);
    log::debug!(
        "rotate: dims={:?} axis={axis} angle={angle} quarter_turns={turns}",
        a.dims()
    );
    match plane {
        Some(plane) if turns != 0 => Ok(turn_plane(a, plane, turns)),
        _ => Ok(a.clone()),
    }
}

/// Rotate the trailing (Y, X) plane; the same as `rotate(a, Axis::Z, angle)`.
pub fn rotate_2d<T: Clone>(a: &DenseArray<T>, angle: i32) -> Result<DenseArray<T>> {
    rotate(a, Axis::Z, angle)
}

/// Plane turned by a rotation about `axis`, `None` for `Axis::None`.
fn rotation_plane(rank: usize, axis: Axis) -> Result<Option<(usize, usize)>> {
    let plane = match (rank, axis) {
        (_, Axis::None) => return Ok(None),
        (2, Axis::Z) => (0, 1),
        (3, Axis::X) => (0, 1),
        (3, Axis::Y) => (0, 2),
        (3, Axis::Z) => (1, 2),
        (4, Axis::X) => (1, 2),
        (4, Axis::Y) => (1, 3),
        (4, Axis::Z) => (2, 3),
        (4, Axis::A) => (0, 1),
        _ => return Err(axis.invalid(rank)),
    };
    Ok(Some(plane))
}

/// Number of clockwise quarter turns (0-3) an angle stands for at `rank`.
fn quarter_turns(rank: usize, angle: i32) -> usize {
    if rank < 4 {
        return (angle.rem_euclid(ROTATE_PERIOD) / 90) as usize;
    }
    match angle.rem_euclid(ROTATE_PERIOD_RANK4) {
        90 => 1,
        180 | 360 => 2,
        270 | 450 => 3,
        _ => 0,
    }
}

/// Apply `turns` quarter turns in plane `(i, j)`.
fn turn_plane<T: Clone>(a: &DenseArray<T>, (i, j): (usize, usize), turns: usize) -> DenseArray<T> {
    let rank = a.rank();
    let mut dims = [0usize; MAX_RANK];
    let mut strides = [0isize; MAX_RANK];
    for k in 0..rank {
        dims[k] = a.dim(k);
        strides[k] = a.strides()[k] as isize;
    }
    let (si, sj) = (strides[i], strides[j]);
    let bi = a.dim(i) as isize - 1;
    let bj = a.dim(j) as isize - 1;

    let offset = match turns {
        1 => {
            dims.swap(i, j);
            strides[i] = sj;
            strides[j] = -si;
            bi * si
        }
        2 => {
            strides[i] = -si;
            strides[j] = -sj;
            bi * si + bj * sj
        }
        3 => {
            dims.swap(i, j);
            strides[i] = -sj;
            strides[j] = si;
            bj * sj
        }
        _ => unreachable!("quarter turns are reduced to 1..=3"),
    };

    let data = gather_strided(a.data(), &dims[..rank], &strides[..rank], offset);
    DenseArray::from_parts_unchecked(data, &dims[..rank])
}
