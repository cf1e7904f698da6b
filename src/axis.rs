//! Named axis selectors.
//!
//! Axes are named from the fastest-varying end of the dimension vector: for
//! an array of rank `r`, `X` is axis `r - 1`, `Y` is `r - 2`, `Z` is `r - 3`
//! and `A` is `r - 4`. A label is only a position selector into `dims`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::{Result, TransformError};

/// A named axis (or no axis) of a rank 1-4 array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// No axis; selects the identity for rotations.
    #[default]
    None,
    X,
    Y,
    Z,
    A,
}

impl Axis {
    /// Distance of this label from the fastest axis, `None` for [`Axis::None`].
    fn depth(self) -> Option<usize> {
        match self {
            Axis::None => None,
            Axis::X => Some(0),
            Axis::Y => Some(1),
            Axis::Z => Some(2),
            Axis::A => Some(3),
        }
    }

    /// Position of this axis inside a dimension vector of the given rank.
    pub fn position(self, rank: usize) -> Result<usize> {
        match self.depth() {
            Some(depth) if depth < rank => Ok(rank - 1 - depth),
            _ => Err(self.invalid(rank)),
        }
    }

    /// Label of the axis sitting at `position` in an array of `rank`.
    pub fn at_position(rank: usize, position: usize) -> Axis {
        match rank.checked_sub(position + 1) {
            Some(0) => Axis::X,
            Some(1) => Axis::Y,
            Some(2) => Axis::Z,
            Some(3) => Axis::A,
            _ => Axis::None,
        }
    }

    /// Lower-case label used in parameter names (`size_x`, `offset_y`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Axis::None => "none",
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::A => "a",
        }
    }

    pub(crate) fn invalid(self, rank: usize) -> TransformError {
        TransformError::InvalidAxis {
            axis: self.to_string(),
            rank,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::None => "None",
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
            Axis::A => "A",
        };
        f.write_str(name)
    }
}

/// Parameter name for the axis at `position`, e.g. `param_name("size", 2, 1) == "size_x"`.
pub(crate) fn param_name(prefix: &str, rank: usize, position: usize) -> String {
    format!("{prefix}_{}", Axis::at_position(rank, position).label())
}

/// Bit-flag set of axes to reflect.
///
/// Built from the associated constants and `|`, or from raw bits with
/// [`FlipAxes::from_bits`]. Raw values are validated against the array rank
/// when the flip runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlipAxes(u8);

impl FlipAxes {
    pub const NONE: FlipAxes = FlipAxes(0);
    pub const X: FlipAxes = FlipAxes(1);
    pub const Y: FlipAxes = FlipAxes(2);
    pub const XY: FlipAxes = FlipAxes(3);
    pub const Z: FlipAxes = FlipAxes(4);
    pub const A: FlipAxes = FlipAxes(8);

    /// Wrap raw flag bits without validation.
    pub const fn from_bits(bits: u8) -> Self {
        FlipAxes(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: FlipAxes) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check that no flag names an axis the rank does not have.
    pub(crate) fn validate(self, rank: usize) -> Result<()> {
        let limit = 1u16 << rank.min(4);
        if u16::from(self.0) < limit {
            Ok(())
        } else {
            Err(TransformError::InvalidAxis {
                axis: format!("{:#06b}", self.0),
                rank,
            })
        }
    }
}

impl BitOr for FlipAxes {
    type Output = FlipAxes;

    fn bitor(self, rhs: FlipAxes) -> FlipAxes {
        FlipAxes(self.0 | rhs.0)
    }
}

impl BitOrAssign for FlipAxes {
    fn bitor_assign(&mut self, rhs: FlipAxes) {
        self.0 |= rhs.0;
    }
}
