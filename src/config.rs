//! Crate-wide constants.
//!
//! All tolerances and limits live here so that the numeric behavior of the
//! crate can be audited in one place. Run-time tolerance choices go through
//! [`ApproxComparer::new`](crate::ApproxComparer::new).

/// Highest supported array rank.
pub const MAX_RANK: usize = 4;

/// Absolute distance under which a continuous resample position is treated
/// as lying exactly on a source cell.
pub const SNAP_TOLERANCE: f64 = 1e-6;

/// Default comparer tolerance for `f64`.
pub const DEFAULT_EPSILON_F64: f64 = 1e-6;

/// Default comparer tolerance for `f32`.
pub const DEFAULT_EPSILON_F32: f32 = 1e-5;

/// Angle period used to normalize rank 2 and rank 3 rotations.
pub const ROTATE_PERIOD: i32 = 360;

/// Angle period used to normalize rank 4 rotations.
///
/// The rank 4 quarter-turn table is keyed on the angle modulo 540, so
/// `rotate(a, θ)` and `rotate(a, θ + 540)` agree while `rotate(a, 360)` is a
/// half turn rather than the identity.
pub const ROTATE_PERIOD_RANK4: i32 = 540;
