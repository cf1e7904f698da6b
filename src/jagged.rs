//! Conversion between dense arrays and ragged nested rows.
//!
//! A [`Jagged`] tree of depth `d` corresponds to a dense array of rank `d`:
//! the root lists entries of axis 0 and every [`Jagged::Values`] leaf is a row
//! along the fastest axis. Rows may differ in length and any row may be
//! missing (`None`); missing and short rows read as `T::default()` when the
//! tree is made dense.

use crate::array::{row_major_strides, DenseArray};
use crate::config::MAX_RANK;
use crate::validate::check_dims;
use crate::{Result, TransformError};

/// Ragged nested rows of `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Jagged<T> {
    /// Innermost row.
    Values(Vec<T>),
    /// Nested rows; `None` marks a missing row.
    Rows(Vec<Option<Jagged<T>>>),
}

impl<T> Jagged<T> {
    /// Rows of plain values (depth 2).
    pub fn from_nested2(rows: Vec<Vec<T>>) -> Self {
        Jagged::Rows(rows.into_iter().map(|r| Some(Jagged::Values(r))).collect())
    }

    /// Planes of rows of plain values (depth 3).
    pub fn from_nested3(planes: Vec<Vec<Vec<T>>>) -> Self {
        Jagged::Rows(
            planes
                .into_iter()
                .map(|p| Some(Jagged::from_nested2(p)))
                .collect(),
        )
    }

    pub fn values(&self) -> Option<&[T]> {
        match self {
            Jagged::Values(v) => Some(v),
            Jagged::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> Option<&[Option<Jagged<T>>]> {
        match self {
            Jagged::Values(_) => None,
            Jagged::Rows(r) => Some(r),
        }
    }

    /// Nesting depth. A [`Jagged::Rows`] without any present child counts as
    /// rows of empty value rows (depth 2).
    pub fn depth(&self) -> usize {
        match self {
            Jagged::Values(_) => 1,
            Jagged::Rows(rows) => 1 + rows.iter().flatten().map(Jagged::depth).max().unwrap_or(1),
        }
    }

    /// Number of entries at the top level.
    pub fn len(&self) -> usize {
        match self {
            Jagged::Values(v) => v.len(),
            Jagged::Rows(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth that every present descendant agrees on, or `None` when the
    /// subtree holds no values at all.
    fn uniform_depth(&self) -> Result<Option<usize>> {
        let rows = match self {
            Jagged::Values(_) => return Ok(Some(1)),
            Jagged::Rows(rows) => rows,
        };
        let mut depth: Option<usize> = None;
        for child in rows.iter().flatten() {
            if let Some(d) = child.uniform_depth()? {
                match depth {
                    Some(prev) if prev != d => return Err(TransformError::RankMismatch(prev, d)),
                    _ => depth = Some(d),
                }
            }
        }
        Ok(depth.map(|d| d + 1))
    }

    /// Widen `extents` to cover this subtree starting at `level`.
    fn measure(&self, level: usize, extents: &mut [usize]) {
        if level >= extents.len() {
            return;
        }
        extents[level] = extents[level].max(self.len());
        if let Jagged::Rows(rows) = self {
            for child in rows.iter().flatten() {
                child.measure(level + 1, extents);
            }
        }
    }
}

impl<T> From<Vec<T>> for Jagged<T> {
    fn from(values: Vec<T>) -> Self {
        Jagged::Values(values)
    }
}

/// Dense array to ragged rows.
///
/// With `trim_trailing_defaults`, every innermost row drops its trailing run
/// of `T::default()` and every outer level drops trailing rows left empty.
/// Defaults before the last non-default value are kept.
pub fn to_jagged<T>(a: &DenseArray<T>, trim_trailing_defaults: bool) -> Jagged<T>
where
    T: Clone + Default + PartialEq,
{
    log::debug!("to_jagged: dims={:?} trim={trim_trailing_defaults}", a.dims());
    let zero = T::default();
    build(a.data(), a.dims(), trim_trailing_defaults, &zero)
}

fn build<T: Clone + PartialEq>(data: &[T], dims: &[usize], trim: bool, zero: &T) -> Jagged<T> {
    if dims.len() == 1 {
        let mut row = data.to_vec();
        if trim {
            let keep = row.iter().rposition(|v| v != zero).map_or(0, |p| p + 1);
            row.truncate(keep);
        }
        return Jagged::Values(row);
    }
    let block: usize = dims[1..].iter().product();
    let mut rows: Vec<Option<Jagged<T>>> = data
        .chunks_exact(block)
        .map(|chunk| Some(build(chunk, &dims[1..], trim, zero)))
        .collect();
    if trim {
        while matches!(rows.last(), Some(Some(row)) if row.is_empty()) {
            rows.pop();
        }
    }
    Jagged::Rows(rows)
}

/// Ragged rows to a dense array.
///
/// Without `extents` the output covers the longest row at every depth. With
/// `extents` (one entry per depth) the output has exactly that shape and
/// anything beyond it is dropped. Cells no row reaches hold `T::default()`.
pub fn from_jagged<T>(j: &Jagged<T>, extents: Option<&[usize]>) -> Result<DenseArray<T>>
where
    T: Clone + Default,
{
    let depth = j.uniform_depth()?;
    if let Some(d) = depth {
        if d > MAX_RANK {
            return Err(TransformError::range("rank", d, 1, MAX_RANK as i64));
        }
    }

    let dims: Vec<usize> = match (extents, depth) {
        (Some(e), Some(d)) if e.len() != d => return Err(TransformError::RankMismatch(d, e.len())),
        (Some(e), _) => {
            if e.is_empty() || e.len() > MAX_RANK {
                return Err(TransformError::range("rank", e.len(), 1, MAX_RANK as i64));
            }
            e.to_vec()
        }
        (None, Some(d)) => {
            let mut measured = vec![0; d];
            j.measure(0, &mut measured);
            measured
        }
        (None, None) => return Err(TransformError::range("extents", 0, 1, i64::MAX)),
    };
    if let Some(&zero) = dims.iter().find(|&&e| e == 0) {
        return Err(TransformError::range("extents", zero, 1, i64::MAX));
    }
    log::debug!("from_jagged: depth={depth:?} dims={dims:?}");

    let total = check_dims(&dims)?;
    let strides = row_major_strides(&dims);
    let mut data = vec![T::default(); total];
    scatter(j, 0, 0, &dims, &strides, &mut data);
    DenseArray::from_vec(data, &dims)
}

fn scatter<T: Clone>(
    node: &Jagged<T>,
    level: usize,
    base: usize,
    dims: &[usize],
    strides: &[usize],
    data: &mut [T],
) {
    if level >= dims.len() {
        return;
    }
    match node {
        Jagged::Values(values) if level + 1 == dims.len() => {
            for (slot, v) in data[base..base + dims[level]].iter_mut().zip(values) {
                *slot = v.clone();
            }
        }
        Jagged::Values(_) => {}
        Jagged::Rows(rows) => {
            for (i, child) in rows.iter().take(dims[level]).enumerate() {
                if let Some(child) = child {
                    scatter(child, level + 1, base + i * strides[level], dims, strides, data);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        let j = Jagged::from_nested2(vec![vec![1, 2], vec![3]]);
        assert_eq!(j.depth(), 2);
        assert_eq!(j.len(), 2);
        assert!(j.values().is_none());
        assert_eq!(j.rows().unwrap()[1].as_ref().unwrap().values(), Some(&[3][..]));
        assert_eq!(Jagged::from(vec![1.0]).depth(), 1);
        assert_eq!(Jagged::<u8>::Rows(vec![None]).depth(), 2);
        assert_eq!(Jagged::from_nested3(vec![vec![vec![1u8]]]).depth(), 3);
    }

    #[test]
    fn test_to_jagged_untrimmed() {
        let a = DenseArray::from_vec(vec![1, 0, 0, 0], &[2, 2]).unwrap();
        assert_eq!(
            to_jagged(&a, false),
            Jagged::from_nested2(vec![vec![1, 0], vec![0, 0]])
        );
    }

    #[test]
    fn test_to_jagged_trims_trailing_defaults_only() {
        let a = DenseArray::from_vec(vec![1, 0, 2, 0, 3, 0, 0, 0, 0, 0, 0, 0], &[3, 4]).unwrap();
        assert_eq!(
            to_jagged(&a, true),
            Jagged::from_nested2(vec![vec![1, 0, 2], vec![3]])
        );
    }

    #[test]
    fn test_to_jagged_keeps_interior_empty_rows() {
        let a = DenseArray::from_vec(vec![0, 0, 5, 0], &[2, 2]).unwrap();
        assert_eq!(
            to_jagged(&a, true),
            Jagged::from_nested2(vec![vec![], vec![5]])
        );
    }

    #[test]
    fn test_from_jagged_implicit_extents() {
        let j = Jagged::from_nested2(vec![vec![1, 2, 3], vec![4]]);
        let a = from_jagged(&j, None).unwrap();
        assert_eq!(a.dims(), &[2, 3]);
        assert_eq!(a.data(), &[1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn test_from_jagged_missing_rows() {
        let j = Jagged::Rows(vec![None, Some(Jagged::Values(vec![7, 8]))]);
        let a = from_jagged(&j, None).unwrap();
        assert_eq!(a.data(), &[0, 0, 7, 8]);
    }

    #[test]
    fn test_from_jagged_explicit_extents_clip_and_pad() {
        let j = Jagged::from_nested2(vec![vec![1, 2, 3], vec![4]]);
        let a = from_jagged(&j, Some(&[3, 2])).unwrap();
        assert_eq!(a.dims(), &[3, 2]);
        assert_eq!(a.data(), &[1, 2, 4, 0, 0, 0]);
    }

    #[test]
    fn test_from_jagged_errors() {
        let j = Jagged::from_nested2(vec![vec![1, 2]]);
        assert_eq!(
            from_jagged(&j, Some(&[1])),
            Err(TransformError::RankMismatch(2, 1))
        );
        assert!(matches!(
            from_jagged(&j, Some(&[1, 0])),
            Err(TransformError::InvalidRange { ref param, .. }) if param == "extents"
        ));

        let mixed = Jagged::Rows(vec![
            Some(Jagged::Values(vec![1])),
            Some(Jagged::from_nested2(vec![vec![2]])),
        ]);
        assert_eq!(from_jagged(&mixed, None), Err(TransformError::RankMismatch(1, 2)));

        let empty = Jagged::<i32>::Rows(vec![Some(Jagged::Values(vec![]))]);
        assert!(matches!(
            from_jagged(&empty, None),
            Err(TransformError::InvalidRange { ref param, .. }) if param == "extents"
        ));
    }

    #[test]
    fn test_from_jagged_extents_overflow() {
        let j = Jagged::from_nested2(vec![vec![1u8]]);
        assert_eq!(
            from_jagged(&j, Some(&[1 << 63, 2])),
            Err(TransformError::SizeOverflow(vec![1 << 63, 2]))
        );
    }

    #[test]
    fn test_from_jagged_too_deep() {
        let mut j = Jagged::Values(vec![1u8]);
        for _ in 0..4 {
            j = Jagged::Rows(vec![Some(j)]);
        }
        assert_eq!(j.depth(), 5);
        assert!(matches!(
            from_jagged(&j, None),
            Err(TransformError::InvalidRange { ref param, value: 5, .. }) if param == "rank"
        ));
    }

    #[test]
    fn test_roundtrip_3d() {
        let j = Jagged::from_nested3(vec![
            vec![vec![1, 2], vec![3]],
            vec![vec![4, 5, 6]],
        ]);
        let a = from_jagged(&j, None).unwrap();
        assert_eq!(a.dims(), &[2, 2, 3]);
        assert_eq!(to_jagged(&a, true), j);
    }
}
