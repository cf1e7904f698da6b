//! In-place patching and rectangular sub-region extraction.

use bytemuck::Pod;

use crate::array::DenseArray;
use crate::copy::{copy_box, BoxSide};
use crate::validate::{check_extents, check_fixed_width, check_offsets, check_same_rank};
use crate::Result;

/// Overwrite the box of `dest` starting at `offsets` with `patch`.
///
/// The patch must have the destination's rank and fit entirely:
/// `0 <= offsets[k] <= dest.dim(k) - patch.dim(k)`. Nothing is written when
/// validation fails.
pub fn replace<T: Pod>(dest: &mut DenseArray<T>, patch: &DenseArray<T>, offsets: &[usize]) -> Result<()> {
    check_fixed_width::<T>()?;
    check_same_rank(dest.rank(), patch.rank())?;
    check_offsets(dest.dims(), offsets, patch.dims())?;
    log::debug!(
        "replace: dest={:?} patch={:?} offsets={offsets:?}",
        dest.dims(),
        patch.dims()
    );

    let dims = dest.dims().to_vec();
    let zeros = vec![0; patch.rank()];
    copy_box(
        dest.data_mut(),
        BoxSide::new(&dims, offsets),
        patch.data(),
        BoxSide::new(patch.dims(), &zeros),
        patch.dims(),
    );
    Ok(())
}

/// Copy the box of `lengths` starting at `offsets` out of `source`.
pub fn extract<T: Pod>(source: &DenseArray<T>, offsets: &[usize], lengths: &[usize]) -> Result<DenseArray<T>> {
    check_fixed_width::<T>()?;
    check_extents("length", source.dims(), lengths)?;
    check_offsets(source.dims(), offsets, lengths)?;
    log::debug!(
        "extract: source={:?} offsets={offsets:?} lengths={lengths:?}",
        source.dims()
    );

    let mut out = DenseArray::zeroed(lengths)?;
    let zeros = vec![0; lengths.len()];
    copy_box(
        out.data_mut(),
        BoxSide::new(lengths, &zeros),
        source.data(),
        BoxSide::new(source.dims(), offsets),
        lengths,
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransformError;

    #[test]
    fn test_replace_2d() {
        let mut dest = DenseArray::<i32>::zeroed(&[3, 4]).unwrap();
        let patch = DenseArray::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        replace(&mut dest, &patch, &[1, 2]).unwrap();
        assert_eq!(dest.data(), &[0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4]);
    }

    #[test]
    fn test_replace_whole_array() {
        let mut dest = DenseArray::<u8>::zeroed(&[2, 2]).unwrap();
        let patch = DenseArray::from_vec(vec![9, 8, 7, 6], &[2, 2]).unwrap();
        replace(&mut dest, &patch, &[0, 0]).unwrap();
        assert_eq!(dest, patch);
    }

    #[test]
    fn test_replace_out_of_bounds_leaves_dest() {
        let mut dest = DenseArray::from_vec(vec![1.0f32; 6], &[2, 3]).unwrap();
        let patch = DenseArray::from_vec(vec![0.0f32; 2], &[1, 2]).unwrap();
        let err = replace(&mut dest, &patch, &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidRange {
                param: "offset_x".into(),
                value: 2,
                min: 0,
                max: 1
            }
        );
        assert!(dest.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_replace_rank_mismatch() {
        let mut dest = DenseArray::<i16>::zeroed(&[2, 2]).unwrap();
        let patch = DenseArray::from_vec(vec![1i16], &[1]).unwrap();
        assert_eq!(
            replace(&mut dest, &patch, &[0]),
            Err(TransformError::RankMismatch(2, 1))
        );
    }

    #[test]
    fn test_extract_3d() {
        let a = DenseArray::from_fn(&[2, 3, 4], |i| (i[0] * 100 + i[1] * 10 + i[2]) as i32).unwrap();
        let e = extract(&a, &[1, 1, 2], &[1, 2, 2]).unwrap();
        assert_eq!(e.dims(), &[1, 2, 2]);
        assert_eq!(e.data(), &[112, 113, 122, 123]);
    }

    #[test]
    fn test_extract_validation() {
        let a = DenseArray::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        assert!(matches!(
            extract(&a, &[0, 0], &[0, 1]),
            Err(TransformError::InvalidRange { ref param, .. }) if param == "length_y"
        ));
        assert!(matches!(
            extract(&a, &[1, 0], &[2, 1]),
            Err(TransformError::InvalidRange { ref param, .. }) if param == "offset_y"
        ));
    }

    #[test]
    fn test_replace_then_extract() {
        let mut dest = DenseArray::from_fn(&[3, 3, 3, 3], |i| i.iter().sum::<usize>() as u64).unwrap();
        let patch = DenseArray::from_fn(&[2, 1, 2, 3], |i| 1000 + (i[0] * 6 + i[2] * 3 + i[3]) as u64).unwrap();
        replace(&mut dest, &patch, &[1, 2, 0, 0]).unwrap();
        assert_eq!(extract(&dest, &[1, 2, 0, 0], patch.dims()).unwrap(), patch);
        assert_eq!(dest[&[0, 0, 0, 0][..]], 0);
    }
}
