//! Value ranges and the `[-1, 1]` normalization applied to raw distances

use crate::float_types::{Real, remap};

/// Closed range `[min, max]` spanned by a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Real,
    pub max: Real,
}

impl Interval {
    /// Full scan over `values`; `None` for an empty slice.
    pub fn from_values(values: &[Real]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// All values were equal, so the range collapsed to a point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    #[inline]
    pub fn length(&self) -> Real {
        self.max - self.min
    }

    /// Map `value` linearly from this interval onto `[-1, 1]`.
    ///
    /// A degenerate interval maps everything to `0`.
    #[inline]
    pub fn to_signed_unit(&self, value: Real) -> Real {
        if self.is_degenerate() {
            0.0
        } else {
            remap(value, self.min, self.max, -1.0, 1.0)
        }
    }
}

/// Remap `values` in place onto `[-1, 1]`, then subtract `iso`.
///
/// The interval is taken over the whole slice before any value is touched.
/// Returns the interval that was used, or `None` for an empty slice.
pub fn normalize(values: &mut [Real], iso: Real) -> Option<Interval> {
    let interval = Interval::from_values(values)?;
    for v in values.iter_mut() {
        *v = interval.to_signed_unit(*v) - iso;
    }
    Some(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_spans_all_values() {
        let interval = Interval::from_values(&[2.0, -1.0, 5.0, 0.0]).unwrap();
        assert_eq!(interval, Interval { min: -1.0, max: 5.0 });
        assert_eq!(interval.length(), 6.0);
        assert!(Interval::from_values(&[]).is_none());
    }

    #[test]
    fn normalize_maps_extremes_to_unit_bounds() {
        let mut values = vec![0.0, 1.0, 2.0, 3.0];
        normalize(&mut values, 0.0).unwrap();

        let expected = [-1.0, -1.0 / 3.0, 1.0 / 3.0, 1.0];
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12, "{v} != {e}");
        }
        assert_eq!(values[0], -1.0);
        assert_eq!(values[3], 1.0);
    }

    #[test]
    fn iso_shifts_every_sample() {
        let mut values = vec![0.0, 4.0];
        normalize(&mut values, 0.25).unwrap();
        assert_eq!(values, vec![-1.25, 0.75]);
    }

    #[test]
    fn degenerate_range_maps_to_minus_iso() {
        let mut values = vec![7.0; 5];
        let interval = normalize(&mut values, 0.3).unwrap();
        assert!(interval.is_degenerate());
        assert!(values.iter().all(|&v| v == -0.3));
    }
}
