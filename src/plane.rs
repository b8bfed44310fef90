//! Half-space planes used to trim fields

use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Vector3};

/// A plane through `origin` with (not necessarily unit) `normal`.
///
/// A point `p` is **trimmed** when it lies behind the plane, i.e.
/// `(origin - p) · normal > 0`. Points on the plane are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimPlane {
    pub origin: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl TrimPlane {
    pub const fn new(origin: Point3<Real>, normal: Vector3<Real>) -> Self {
        Self { origin, normal }
    }

    /// Plane `n·p = w` in Hessian form; `normal` is normalized first.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let normal = normal.normalize();
        Self {
            origin: Point3::from(normal * w),
            normal,
        }
    }

    /// Plane through three points, normal following the right-hand rule
    /// `(p2 - p1) × (p3 - p1)`. `None` for collinear points.
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Option<Self> {
        let normal = (p2 - p1).cross(&(p3 - p1));
        if normal.norm_squared() < tolerance() * tolerance() {
            return None;
        }
        Some(Self {
            origin: p1,
            normal: normal.normalize(),
        })
    }

    /// `true` when `point` lies strictly on the trimmed side.
    #[inline]
    pub fn trims(&self, point: &Point3<Real>) -> bool {
        (self.origin - point).dot(&self.normal) > 0.0
    }

    /// Signed distance to the plane, positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        let len = self.normal.norm();
        if len == 0.0 {
            return 0.0;
        }
        (point - self.origin).dot(&self.normal) / len
    }

    /// Flip the kept and trimmed sides.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_behind_the_normal_are_trimmed() {
        let plane = TrimPlane::new(Point3::new(0.0, 0.0, 1.0), Vector3::z());
        assert!(plane.trims(&Point3::new(5.0, 5.0, 0.0)));
        assert!(!plane.trims(&Point3::new(5.0, 5.0, 2.0)));
        assert!(!plane.trims(&Point3::new(5.0, 5.0, 1.0)), "on-plane points are kept");
    }

    #[test]
    fn flip_swaps_sides() {
        let mut plane = TrimPlane::new(Point3::origin(), Vector3::x());
        let p = Point3::new(-1.0, 0.0, 0.0);
        assert!(plane.trims(&p));
        plane.flip();
        assert!(!plane.trims(&p));
    }

    #[test]
    fn from_points_uses_right_hand_rule() {
        let plane = TrimPlane::from_points(
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
        )
        .unwrap();
        assert_eq!(plane.normal, Vector3::z());
        assert!((plane.signed_distance(&Point3::new(3.0, 3.0, 5.0)) - 3.0).abs() < 1e-12);

        assert!(
            TrimPlane::from_points(Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn hessian_form_places_the_origin_on_the_plane() {
        let plane = TrimPlane::from_normal(Vector3::new(0.0, 2.0, 0.0), 3.0);
        assert_eq!(plane.origin, Point3::new(0.0, 3.0, 0.0));
        assert!(plane.signed_distance(&Point3::new(7.0, 3.0, -1.0)).abs() < 1e-12);
    }
}
