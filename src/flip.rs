//! Reflections about a set of named axes.
//!
//! Only the 1-D reversal touches elements directly. Higher ranks compose it
//! with [`slice`]/[`fuse`] and [`rotate`]:
//!
//! - X (fastest axis): slice, flip every item along its own X, fuse.
//! - Y (rank 2): rotate +90, flip X, rotate -90.
//! - X/Y at rank 3, X/Y/Z at rank 4: applied to every outer slab.
//! - Z (rank 3): rotate +90 about Y, flip X, rotate -90 about Y.
//! - A (rank 4): reverse the order of the outer blocks.

use bytemuck::Pod;

use crate::array::DenseArray;
use crate::axis::{Axis, FlipAxes};
use crate::rotate::{rotate, rotate_2d};
use crate::slice::{fuse, slice};
use crate::validate::{check_fixed_width, check_same_rank};
use crate::Result;

/// Reverse the element order of a rank 1 array.
pub fn flip_1d<T: Clone>(a: &DenseArray<T>) -> Result<DenseArray<T>> {
    check_same_rank(1, a.rank())?;
    let data: Vec<T> = a.data().iter().rev().cloned().collect();
    Ok(DenseArray::from_parts_unchecked(data, a.dims()))
}

/// Reflect `a` about every axis in `axes`.
///
/// Valid flag values depend on the rank: `X` for rank 1, `X | Y` for rank 2,
/// `X | Y | Z` for rank 3 and all four flags for rank 4. An empty set returns
/// a copy.
pub fn flip<T: Pod>(a: &DenseArray<T>, axes: FlipAxes) -> Result<DenseArray<T>> {
    check_fixed_width::<T>()?;
    axes.validate(a.rank())?;
    log::debug!("flip: dims={:?} axes={:#06b}", a.dims(), axes.bits());
    if axes.is_empty() {
        return Ok(a.clone());
    }
    match a.rank() {
        1 => flip_1d(a),
        2 => flip_2d(a, axes),
        3 => flip_3d(a, axes),
        _ => flip_4d(a, axes),
    }
}

/// Reverse the fastest axis at any rank.
fn flip_x<T: Pod>(a: &DenseArray<T>) -> Result<DenseArray<T>> {
    if a.rank() == 1 {
        return flip_1d(a);
    }
    let rows = slice(a)?
        .map(|row| flip_x(&row))
        .collect::<Result<Vec<_>>>()?;
    fuse(rows)
}

fn flip_2d<T: Pod>(a: &DenseArray<T>, axes: FlipAxes) -> Result<DenseArray<T>> {
    let mut out = a.clone();
    if axes.contains(FlipAxes::X) {
        out = flip_x(&out)?;
    }
    if axes.contains(FlipAxes::Y) {
        let turned = rotate_2d(&out, 90)?;
        out = rotate_2d(&flip_x(&turned)?, -90)?;
    }
    Ok(out)
}

fn flip_3d<T: Pod>(a: &DenseArray<T>, axes: FlipAxes) -> Result<DenseArray<T>> {
    let planar = FlipAxes::from_bits(axes.bits() & FlipAxes::XY.bits());
    let mut out = if planar.is_empty() {
        a.clone()
    } else {
        let slabs = slice(a)?
            .map(|slab| flip_2d(&slab, planar))
            .collect::<Result<Vec<_>>>()?;
        fuse(slabs)?
    };
    if axes.contains(FlipAxes::Z) {
        let turned = rotate(&out, Axis::Y, 90)?;
        out = rotate(&flip_x(&turned)?, Axis::Y, -90)?;
    }
    Ok(out)
}

fn flip_4d<T: Pod>(a: &DenseArray<T>, axes: FlipAxes) -> Result<DenseArray<T>> {
    let spatial = FlipAxes::from_bits(axes.bits() & !FlipAxes::A.bits());
    let mut blocks = slice(a)?
        .map(|block| {
            if spatial.is_empty() {
                Ok(block)
            } else {
                flip_3d(&block, spatial)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    if axes.contains(FlipAxes::A) {
        blocks.reverse();
    }
    fuse(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;

    fn matrix() -> DenseArray<i32> {
        DenseArray::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap()
    }

    #[test]
    fn test_flip_1d() {
        let v = DenseArray::from_vec(vec![1, 2, 3], &[3]).unwrap();
        assert_eq!(flip(&v, FlipAxes::X).unwrap().data(), &[3, 2, 1]);
        assert_eq!(flip(&v, FlipAxes::NONE).unwrap(), v);
        assert_eq!(flip_1d(&v).unwrap().data(), &[3, 2, 1]);
    }

    #[test]
    fn test_flip_1d_rejects_matrix() {
        assert_eq!(
            flip_1d(&matrix()).unwrap_err(),
            TransformError::RankMismatch(1, 2)
        );
    }

    #[test]
    fn test_flip_2d_x() {
        let f = flip(&matrix(), FlipAxes::X).unwrap();
        assert_eq!(f.dims(), &[2, 3]);
        assert_eq!(f.data(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_flip_2d_y() {
        let f = flip(&matrix(), FlipAxes::Y).unwrap();
        assert_eq!(f.dims(), &[2, 3]);
        assert_eq!(f.data(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_flip_2d_xy() {
        let f = flip(&matrix(), FlipAxes::XY).unwrap();
        assert_eq!(f.data(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_flip_invalid_flags() {
        assert!(matches!(
            flip(&matrix(), FlipAxes::Z),
            Err(TransformError::InvalidAxis { rank: 2, .. })
        ));
        assert!(flip(&matrix(), FlipAxes::from_bits(4)).is_err());
    }

    #[test]
    fn test_flip_3d_each_axis() {
        let a = DenseArray::from_fn(&[2, 3, 4], |i| (i[0] * 100 + i[1] * 10 + i[2]) as i32).unwrap();
        let fx = flip(&a, FlipAxes::X).unwrap();
        let fy = flip(&a, FlipAxes::Y).unwrap();
        let fz = flip(&a, FlipAxes::Z).unwrap();
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..4 {
                    let v = a[&[z, y, x][..]];
                    assert_eq!(fx[&[z, y, 3 - x][..]], v);
                    assert_eq!(fy[&[z, 2 - y, x][..]], v);
                    assert_eq!(fz[&[1 - z, y, x][..]], v);
                }
            }
        }
    }

    #[test]
    fn test_flip_4d_a_and_x() {
        let a = DenseArray::from_fn(&[3, 1, 2, 2], |i| (i[0] * 10 + i[2] * 2 + i[3]) as u32).unwrap();
        let f = flip(&a, FlipAxes::A | FlipAxes::X).unwrap();
        assert_eq!(f.dims(), a.dims());
        for w in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    assert_eq!(f[&[2 - w, 0, y, 1 - x][..]], a[&[w, 0, y, x][..]]);
                }
            }
        }
    }
}
