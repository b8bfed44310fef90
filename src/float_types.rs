// Re-export parry for the crate's float size
pub use parry3d_f64 as parry3d;

/// Scalar type of every field value and coordinate.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used for geometric degeneracy checks.
/// Defaults to `1e-9`, but can be overridden:
///  1) **Build-time**: set env var `FREP_TOLERANCE` (e.g. `FREP_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    1e-9
}

/// Returns the current tolerance.
/// If not set yet, it tries `FREP_TOLERANCE` (parsed as `Real`) and
/// falls back to [`default_tolerance`].
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("FREP_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `frep::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Linear remap of `value` from `[from_min, from_max]` to `[to_min, to_max]`.
///
/// The caller guarantees `from_min != from_max`.
#[inline]
pub fn remap(value: Real, from_min: Real, from_max: Real, to_min: Real, to_max: Real) -> Real {
    let t = (value - from_min) / (from_max - from_min);
    to_min + (to_max - to_min) * t
}

/// Linear interpolation `(1 - t)·a + t·b`.
///
/// `t = 0` returns `a` and `t = 1` returns `b` unchanged, even when the other
/// operand is infinite.
#[inline]
pub fn lerp(a: Real, b: Real, t: Real) -> Real {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        (1.0 - t) * a + t * b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_hits_both_ends() {
        assert_eq!(remap(0.0, 0.0, 3.0, -1.0, 1.0), -1.0);
        assert_eq!(remap(3.0, 0.0, 3.0, -1.0, 1.0), 1.0);
        assert!((remap(1.5, 0.0, 3.0, -1.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn lerp_is_exact_at_the_endpoints() {
        let (a, b) = (0.1, 0.7);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert!((lerp(a, b, 0.5) - 0.4).abs() < 1e-12);
        assert_eq!(lerp(-1.0, Real::INFINITY, 0.0), -1.0);
    }

    #[test]
    fn tolerance_is_positive() {
        assert!(tolerance() >= Real::EPSILON);
    }
}
