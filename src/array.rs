//! Owned row-major dense arrays of rank 1 through 4.

use std::ops::{Index, IndexMut};

use bytemuck::Zeroable;
use smallvec::SmallVec;

use crate::config::MAX_RANK;
use crate::validate::check_dims;
use crate::{Result, TransformError};

pub(crate) type Dims = SmallVec<[usize; MAX_RANK]>;

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// Owned dense array: one contiguous buffer plus a rank 1-4 shape.
///
/// The element at multi-index `(i0, .., i_{r-1})` lives at
/// `Σ ik * strides[k]` with row-major strides.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DenseArray<T> {
    data: Vec<T>,
    dims: Dims,
    strides: Dims,
}

impl<T: std::fmt::Debug> std::fmt::Debug for DenseArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseArray")
            .field("dims", &self.dims.as_slice())
            .field("data", &self.data)
            .finish()
    }
}

impl<T> DenseArray<T> {
    /// Wrap a row-major buffer. Fails if the rank is outside 1-4, an extent is
    /// zero, or the buffer length does not match the shape.
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        let total = check_dims(dims)?;
        if data.len() != total {
            return Err(TransformError::ShapeMismatch(vec![data.len()], dims.to_vec()));
        }
        Ok(Self::from_parts_unchecked(data, dims))
    }

    /// Build an array from validated parts.
    pub(crate) fn from_parts_unchecked(data: Vec<T>, dims: &[usize]) -> Self {
        debug_assert_eq!(data.len(), dims.iter().product::<usize>());
        Self {
            data,
            dims: Dims::from_slice(dims),
            strides: Dims::from_vec(row_major_strides(dims)),
        }
    }

    /// Create an array with values produced by a function.
    ///
    /// The function is called with indices in row-major iteration order.
    pub fn from_fn(dims: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Result<Self> {
        let total = check_dims(dims)?;
        let rank = dims.len();
        let mut data = Vec::with_capacity(total);
        let mut idx = [0usize; MAX_RANK];
        for _ in 0..total {
            data.push(f(&idx[..rank]));
            for d in (0..rank).rev() {
                idx[d] += 1;
                if idx[d] < dims[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        Ok(Self::from_parts_unchecked(data, dims))
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Extent of axis `axis`; panics if `axis >= rank`.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a validated array; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Flat buffer offset of a multi-index, or `None` when out of bounds.
    pub fn offset_of(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.dims.len() {
            return None;
        }
        let mut offset = 0;
        for ((&i, &d), &s) in indices.iter().zip(&self.dims).zip(&self.strides) {
            if i >= d {
                return None;
            }
            offset += i * s;
        }
        Some(offset)
    }

    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        let o = self.offset_of(indices)?;
        Some(&self.data[o])
    }

    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut T> {
        let o = self.offset_of(indices)?;
        Some(&mut self.data[o])
    }

    /// Iterate over all elements in memory order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> DenseArray<U> {
        DenseArray::from_parts_unchecked(self.data.iter().map(f).collect(), &self.dims)
    }
}

impl<T: Clone> DenseArray<T> {
    /// Create an array filled with `value`.
    pub fn filled(dims: &[usize], value: T) -> Result<Self> {
        let total = check_dims(dims)?;
        Ok(Self::from_parts_unchecked(vec![value; total], dims))
    }
}

impl<T: Zeroable + Clone> DenseArray<T> {
    /// Create an all-zero array.
    pub fn zeroed(dims: &[usize]) -> Result<Self> {
        Self::filled(dims, T::zeroed())
    }
}

impl<T> Index<&[usize]> for DenseArray<T> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &T {
        match self.offset_of(indices) {
            Some(o) => &self.data[o],
            None => panic!(
                "index {:?} out of bounds for dims {:?}",
                indices,
                self.dims.as_slice()
            ),
        }
    }
}

impl<T> IndexMut<&[usize]> for DenseArray<T> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut T {
        match self.offset_of(indices) {
            Some(o) => &mut self.data[o],
            None => panic!(
                "index {:?} out of bounds for dims {:?}",
                indices,
                self.dims.as_slice()
            ),
        }
    }
}

impl<'a, T> IntoIterator for &'a DenseArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[3, 4]), vec![4, 1]);
        assert_eq!(row_major_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(row_major_strides(&[5]), vec![1]);
        assert!(row_major_strides(&[]).is_empty());
    }

    #[test]
    fn test_from_vec() {
        let a = DenseArray::from_vec(vec![1, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        assert_eq!(a.rank(), 2);
        assert_eq!(a.dims(), &[2, 3]);
        assert_eq!(a.strides(), &[3, 1]);
        assert_eq!(a.len(), 6);
        assert_eq!(a[&[1, 2][..]], 6);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = DenseArray::from_vec(vec![1, 2, 3], &[2, 2]).unwrap_err();
        assert_eq!(err, TransformError::ShapeMismatch(vec![3], vec![2, 2]));
    }

    #[test]
    fn test_from_vec_rank_limits() {
        assert!(DenseArray::from_vec(vec![0; 32], &[2, 2, 2, 2, 2]).is_err());
        assert!(DenseArray::<i32>::from_vec(vec![], &[]).is_err());
        assert!(DenseArray::<i32>::from_vec(vec![], &[0]).is_err());
    }

    #[test]
    fn test_element_count_overflow() {
        let err = DenseArray::<u8>::from_vec(vec![], &[1 << 63, 2]).unwrap_err();
        assert_eq!(err, TransformError::SizeOverflow(vec![1 << 63, 2]));
        assert!(matches!(
            DenseArray::filled(&[usize::MAX, usize::MAX], 0u8),
            Err(TransformError::SizeOverflow(_))
        ));
        assert!(DenseArray::from_fn(&[1 << 32, 1 << 32, 2], |_| 0u8).is_err());
    }

    #[test]
    fn test_from_fn_row_major() {
        let t = DenseArray::from_fn(&[2, 3], |idx| idx[0] * 3 + idx[1]).unwrap();
        assert_eq!(t.data(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_from_fn_4d() {
        let t = DenseArray::from_fn(&[2, 3, 4, 5], |idx| {
            idx[0] * 1000 + idx[1] * 100 + idx[2] * 10 + idx[3]
        })
        .unwrap();
        assert_eq!(t.strides(), &[60, 20, 5, 1]);
        assert_eq!(t[&[1, 2, 3, 4][..]], 1234);
        assert_eq!(t.offset_of(&[1, 0, 0, 0]), Some(60));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut t = DenseArray::<f64>::zeroed(&[2, 2]).unwrap();
        assert!(t.get(&[2, 0]).is_none());
        assert!(t.get(&[0]).is_none());
        *t.get_mut(&[1, 1]).unwrap() = 4.0;
        assert_eq!(t.data(), &[0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_index_mut() {
        let mut t = DenseArray::filled(&[2, 3], 0u8).unwrap();
        t[&[1usize, 2] as &[usize]] = 9;
        assert_eq!(t.get(&[1, 2]), Some(&9));
    }

    #[test]
    #[should_panic]
    fn test_index_panics_out_of_bounds() {
        let t = DenseArray::filled(&[2, 3], 0u8).unwrap();
        let _ = t[&[2usize, 0] as &[usize]];
    }

    #[test]
    fn test_map_keeps_shape() {
        let t = DenseArray::from_fn(&[3, 2], |idx| (idx[0] + idx[1]) as i32).unwrap();
        let m = t.map(|&v| v as f64 * 0.5);
        assert_eq!(m.dims(), &[3, 2]);
        assert_eq!(m.data(), &[0.0, 0.5, 0.5, 1.0, 1.0, 1.5]);
    }
}
