//! Eager argument validation shared by every operation.
//!
//! Every public operation validates its arguments here before allocating or
//! copying anything.

use crate::axis::param_name;
use crate::config::MAX_RANK;
use crate::{Result, TransformError};

/// Check that `rank` lies in `[min, MAX_RANK]`.
pub(crate) fn check_rank(rank: usize, min: usize) -> Result<()> {
    if rank < min || rank > MAX_RANK {
        return Err(TransformError::range("rank", rank, min as i64, MAX_RANK as i64));
    }
    Ok(())
}

/// Check rank bounds and that every extent is positive; returns the element
/// count, which must fit in `usize`.
pub(crate) fn check_dims(dims: &[usize]) -> Result<usize> {
    check_rank(dims.len(), 1)?;
    let mut total = 1usize;
    for (pos, &d) in dims.iter().enumerate() {
        if d == 0 {
            return Err(TransformError::range(
                param_name("dim", dims.len(), pos),
                d,
                1,
                i64::MAX,
            ));
        }
        total = total
            .checked_mul(d)
            .ok_or_else(|| TransformError::SizeOverflow(dims.to_vec()))?;
    }
    Ok(total)
}

/// Check that `value` lies in `[min, max]`; `max` may be negative when a
/// patch is larger than its destination.
pub(crate) fn check_in_range(param: impl FnOnce() -> String, value: usize, min: i64, max: i64) -> Result<()> {
    let v = value as i64;
    if v < min || v > max {
        return Err(TransformError::range(param(), value, min, max));
    }
    Ok(())
}

/// Check that both operands have the same rank.
pub(crate) fn check_same_rank(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(TransformError::RankMismatch(expected, actual));
    }
    Ok(())
}

/// Block copies need a non-zero byte width.
pub(crate) fn check_fixed_width<T>() -> Result<()> {
    if std::mem::size_of::<T>() == 0 {
        return Err(TransformError::UnsupportedElementType(
            std::any::type_name::<T>(),
        ));
    }
    Ok(())
}

/// Validate per-axis window or region extents: one entry per axis, each in
/// `[1, dims[k]]`.
pub(crate) fn check_extents(prefix: &str, dims: &[usize], extents: &[usize]) -> Result<()> {
    check_same_rank(dims.len(), extents.len())?;
    let rank = dims.len();
    for (pos, (&len, &e)) in dims.iter().zip(extents.iter()).enumerate() {
        check_in_range(|| param_name(prefix, rank, pos), e, 1, len as i64)?;
    }
    Ok(())
}

/// Validate per-axis offsets so that a box of `extents` fits inside `dims`.
pub(crate) fn check_offsets(dims: &[usize], offsets: &[usize], extents: &[usize]) -> Result<()> {
    check_same_rank(dims.len(), offsets.len())?;
    let rank = dims.len();
    for (pos, ((&len, &off), &e)) in dims.iter().zip(offsets).zip(extents).enumerate() {
        let max = len as i64 - e as i64;
        check_in_range(|| param_name("offset", rank, pos), off, 0, max)?;
    }
    Ok(())
}
