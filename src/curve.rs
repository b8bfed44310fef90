//! Curve inputs for distance fields.
//!
//! Closest-point queries run against a linear proxy of each curve. Only
//! curves that are already piecewise linear (lines, polylines, degree-1
//! NURBS) have one; everything else is rejected rather than silently
//! approximated.

use crate::float_types::{
    Real,
    parry3d::{query::PointQuery, shape::Polyline as ParryPolyline},
};
use nalgebra::{Point3, Vector3};

/// A curve supplied as distance-field reference geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    /// Straight segment between two points.
    Line { start: Point3<Real>, end: Point3<Real> },
    /// Connected segments through the given points, in order.
    Polyline(Vec<Point3<Real>>),
    /// Circular arc in the plane through `center` perpendicular to `normal`.
    Arc {
        center: Point3<Real>,
        normal: Vector3<Real>,
        radius: Real,
        start_angle: Real,
        sweep: Real,
    },
    /// Non-rational B-spline given by its control polygon.
    Nurbs {
        control_points: Vec<Point3<Real>>,
        degree: usize,
    },
}

impl Curve {
    /// Vertices of the linear proxy, or the reason the curve has none.
    pub fn to_polyline(&self) -> Result<Vec<Point3<Real>>, String> {
        let points = match self {
            Curve::Line { start, end } => vec![*start, *end],
            Curve::Polyline(points) => points.clone(),
            Curve::Arc { .. } => return Err("arcs have no exact polyline form".to_string()),
            Curve::Nurbs {
                control_points,
                degree,
            } => {
                if *degree != 1 {
                    return Err(format!("NURBS of degree {degree} is not linear"));
                }
                control_points.clone()
            },
        };

        if points.len() < 2 {
            return Err(format!(
                "a polyline needs at least 2 points, got {}",
                points.len()
            ));
        }
        if points
            .iter()
            .any(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err("polyline has a NaN or infinite coordinate".to_string());
        }
        Ok(points)
    }
}

/// Linear proxy of a [`Curve`] answering closest-point queries.
#[derive(Clone)]
pub struct CurveProxy {
    polyline: ParryPolyline,
}

impl CurveProxy {
    /// Reduce `curve` to its proxy.
    pub fn new(curve: &Curve) -> Result<Self, String> {
        let vertices = curve.to_polyline()?;
        Ok(Self {
            polyline: ParryPolyline::new(vertices, None),
        })
    }

    /// Closest point on the proxy to `point`.
    pub fn closest_point(&self, point: &Point3<Real>) -> Point3<Real> {
        self.polyline.project_local_point(point, false).point
    }

    /// Euclidean distance from `point` to the proxy.
    pub fn distance(&self, point: &Point3<Real>) -> Real {
        (self.closest_point(point) - point).norm()
    }

    pub fn segment_count(&self) -> usize {
        self.polyline.num_segments()
    }
}

impl std::fmt::Debug for CurveProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveProxy")
            .field("segments", &self.segment_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_distance_is_perpendicular_inside_and_radial_past_the_ends() {
        let proxy = CurveProxy::new(&Curve::Line {
            start: Point3::new(0.0, 0.0, 0.0),
            end: Point3::new(2.0, 0.0, 0.0),
        })
        .unwrap();

        assert!((proxy.distance(&Point3::new(1.0, 3.0, 0.0)) - 3.0).abs() < 1e-12);
        assert!((proxy.distance(&Point3::new(5.0, 4.0, 0.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn polyline_picks_the_nearest_segment() {
        let proxy = CurveProxy::new(&Curve::Polyline(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]))
        .unwrap();
        assert_eq!(proxy.segment_count(), 2);

        let closest = proxy.closest_point(&Point3::new(2.0, 0.5, 0.0));
        assert!((closest - Point3::new(1.0, 0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn degree_one_nurbs_is_its_control_polygon() {
        let points = vec![Point3::origin(), Point3::new(0.0, 0.0, 1.0)];
        let curve = Curve::Nurbs {
            control_points: points.clone(),
            degree: 1,
        };
        assert_eq!(curve.to_polyline().unwrap(), points);
    }

    #[test]
    fn non_linear_curves_are_rejected() {
        let arc = Curve::Arc {
            center: Point3::origin(),
            normal: Vector3::z(),
            radius: 1.0,
            start_angle: 0.0,
            sweep: 1.0,
        };
        assert!(arc.to_polyline().is_err());

        let cubic = Curve::Nurbs {
            control_points: vec![Point3::origin(); 4],
            degree: 3,
        };
        assert!(cubic.to_polyline().unwrap_err().contains("degree 3"));

        assert!(Curve::Polyline(vec![Point3::origin()]).to_polyline().is_err());
    }
}
