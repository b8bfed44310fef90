//! Distance-field construction.
//!
//! Every builder follows the same three steps over the vertices of a target
//! topology:
//!
//! 1. measure a raw, non-negative distance from each vertex to a reference
//!    (points, curves, another mesh) or take caller-supplied values,
//! 2. remap the values linearly from their observed `[min, max]` onto
//!    `[-1, 1]`,
//! 3. subtract the iso-offset, so that `iso` moves the zero level-set outward
//!    (larger `iso` grows the inside region).
//!
//! The per-vertex measurement runs through [`evaluator::fill`], and the
//! normalization only starts once every raw distance exists, so the result
//! does not depend on scheduling.
//!
//! **Mathematical Foundation**: for raw distances `d_i` with range
//! `[m, M]`, `m < M`, the stored sample is
//!
//! ```text
//! s_i = 2 · (d_i - m) / (M - m) - 1 - iso
//! ```
//!
//! When `m == M` every sample becomes `-iso` and a warning is logged.
//!
//! Targets are always an `Arc<IndexedMesh>`, which the resulting
//! [`SampledMeshField`] keeps. The raw measurements ([`point_distances`],
//! [`curve_distances`], [`mesh_distances`]) and the reference of
//! [`from_mesh`] accept any [`MeshTopology`].

pub mod interval;

pub use interval::{Interval, normalize};

use crate::curve::{Curve, CurveProxy};
use crate::errors::{FieldError, Result};
use crate::evaluator;
use crate::field::SampledMeshField;
use crate::float_types::Real;
use crate::mesh::{IndexedMesh, MeshTopology};
use crate::point_index::{PlanarPointIndex, PointIndex};
use nalgebra::Point3;
use std::sync::Arc;

/// Reference geometry accepted by [`build`].
#[derive(Debug, Clone, Copy)]
pub enum DistanceSource<'a> {
    Points(&'a [Point3<Real>]),
    Curves(&'a [Curve]),
    Mesh(&'a IndexedMesh),
    Values(&'a [Real]),
}

impl DistanceSource<'_> {
    /// Short name used in errors and log records.
    pub const fn kind(&self) -> &'static str {
        match self {
            DistanceSource::Points(_) => "points",
            DistanceSource::Curves(_) => "curves",
            DistanceSource::Mesh(_) => "mesh",
            DistanceSource::Values(_) => "values",
        }
    }
}

/// Build a normalized distance field on `target` from any [`DistanceSource`].
pub fn build(target: &Arc<IndexedMesh>, source: DistanceSource<'_>, iso: Real) -> Result<SampledMeshField> {
    match source {
        DistanceSource::Points(points) => from_points(target, points, iso),
        DistanceSource::Curves(curves) => from_curves(target, curves, iso),
        DistanceSource::Mesh(reference) => from_mesh(target, reference, iso),
        DistanceSource::Values(values) => from_values(target, values.to_vec(), iso),
    }
}

/// Distance field from a point cloud.
///
/// The nearest reference point is selected by its `(x, y)` projection, while
/// the distance to it is the full 3D Euclidean distance. For point sets that
/// vary in `z` the selected point can therefore differ from the true 3D
/// nearest; use [`from_points_with_index`] with a
/// [`SpatialPointIndex`](crate::point_index::SpatialPointIndex) to select in
/// 3D instead.
///
/// ## Errors
/// - [`FieldError::EmptyReferenceSet`] if `points` is empty
/// - [`FieldError::InvalidCoordinate`] if a point has a NaN or infinite component
pub fn from_points(target: &Arc<IndexedMesh>, points: &[Point3<Real>], iso: Real) -> Result<SampledMeshField> {
    check_points(points)?;
    let index = PlanarPointIndex::new(points);
    from_points_with_index(target, points, &index, iso)
}

/// Distance field from a point cloud, selecting nearest points through `index`.
///
/// `index` must have been built over `points`, in the same order.
///
/// ## Errors
/// - [`FieldError::EmptyReferenceSet`] if `points` is empty
/// - [`FieldError::InvalidCoordinate`] if a point has a NaN or infinite component
/// - [`FieldError::DimensionMismatch`] if `index` does not hold one entry per point
/// - [`FieldError::UnresolvedNearest`] if `index` gives no usable answer for a vertex
pub fn from_points_with_index<I>(
    target: &Arc<IndexedMesh>,
    points: &[Point3<Real>],
    index: &I,
    iso: Real,
) -> Result<SampledMeshField>
where
    I: PointIndex + ?Sized,
{
    check_points(points)?;
    if index.len() != points.len() {
        return Err(FieldError::DimensionMismatch {
            expected: points.len(),
            found: index.len(),
        });
    }

    tracing::debug!(vertices = target.vertex_count(), points = points.len(), "measuring point distances");
    let distances = point_distances(target.as_ref(), points, index)?;
    finish(target, distances, iso, "points")
}

/// Raw distance from each vertex of `target` to the point `index` selects for it.
///
/// ## Errors
/// [`FieldError::UnresolvedNearest`] for the first vertex whose lookup gives
/// no index, or an index past the end of `points`.
pub fn point_distances<T, I>(target: &T, points: &[Point3<Real>], index: &I) -> Result<Vec<Real>>
where
    T: MeshTopology + ?Sized,
    I: PointIndex + ?Sized,
{
    let mut distances = vec![None; target.vertex_count()];
    evaluator::fill(&mut distances, |v| {
        let position = target.vertex_position(v);
        index
            .nearest(&position)
            .and_then(|i| points.get(i))
            .map(|nearest| (position - nearest).norm())
    });
    resolved(distances, "points")
}

/// Raw curve distances together with the curve that produced each one.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveDistances {
    /// Distance from each vertex to its closest curve.
    pub distances: Vec<Real>,
    /// Index into the input curve list of the closest curve, per vertex.
    pub closest_curve: Vec<usize>,
}

/// Distance from every vertex of `target` to the closest of `curves`.
///
/// Each curve is reduced to its polyline proxy first. On exact ties the curve
/// that comes first in `curves` wins.
///
/// ## Errors
/// - [`FieldError::EmptyReferenceSet`] if `curves` is empty
/// - [`FieldError::ShapeMismatch`] naming the first curve with no polyline form
pub fn curve_distances<T>(target: &T, curves: &[Curve]) -> Result<CurveDistances>
where
    T: MeshTopology + ?Sized,
{
    if curves.is_empty() {
        return Err(FieldError::EmptyReferenceSet { kind: "curves" });
    }

    let proxies = curves
        .iter()
        .enumerate()
        .map(|(index, curve)| {
            CurveProxy::new(curve).map_err(|reason| FieldError::ShapeMismatch { index, reason })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::trace!(
        curves = proxies.len(),
        segments = proxies.iter().map(CurveProxy::segment_count).sum::<usize>(),
        "reduced curves to polyline proxies"
    );

    let mut closest = vec![(Real::INFINITY, 0usize); target.vertex_count()];
    evaluator::fill(&mut closest, |v| {
        let position = target.vertex_position(v);
        let mut best = (Real::INFINITY, 0);
        for (c, proxy) in proxies.iter().enumerate() {
            let distance = proxy.distance(&position);
            if distance < best.0 {
                best = (distance, c);
            }
        }
        best
    });

    let (distances, closest_curve) = closest.into_iter().unzip();
    Ok(CurveDistances {
        distances,
        closest_curve,
    })
}

/// Distance field from a set of curves.
///
/// ## Errors
/// Same as [`curve_distances`].
pub fn from_curves(target: &Arc<IndexedMesh>, curves: &[Curve], iso: Real) -> Result<SampledMeshField> {
    tracing::debug!(vertices = target.vertex_count(), curves = curves.len(), "measuring curve distances");
    let CurveDistances { distances, .. } = curve_distances(target.as_ref(), curves)?;
    finish(target, distances, iso, "curves")
}

/// Distance field from the surface of another mesh.
///
/// Distances are measured to the closest point on `reference`'s triangles, or
/// to its nearest vertex when it has no faces.
///
/// ## Errors
/// Same as [`mesh_distances`].
pub fn from_mesh<R>(target: &Arc<IndexedMesh>, reference: &R, iso: Real) -> Result<SampledMeshField>
where
    R: MeshTopology + ?Sized,
{
    tracing::debug!(
        vertices = target.vertex_count(),
        reference_vertices = reference.vertex_count(),
        "measuring mesh distances"
    );
    let distances = mesh_distances(target.as_ref(), reference)?;
    finish(target, distances, iso, "mesh")
}

/// Raw distance from each vertex of `target` to the surface of `reference`.
///
/// ## Errors
/// - [`FieldError::EmptyReferenceSet`] if `reference` has no vertices
/// - [`FieldError::UnresolvedNearest`] if `reference` finds no closest point
///   for some vertex
pub fn mesh_distances<T, R>(target: &T, reference: &R) -> Result<Vec<Real>>
where
    T: MeshTopology + ?Sized,
    R: MeshTopology + ?Sized,
{
    if reference.vertex_count() == 0 {
        return Err(FieldError::EmptyReferenceSet { kind: "mesh" });
    }

    let mut distances = vec![None; target.vertex_count()];
    evaluator::fill(&mut distances, |v| {
        let position = target.vertex_position(v);
        reference
            .closest_point(&position)
            .map(|surface| surface.distance_to(&position))
    });
    resolved(distances, "mesh")
}

/// Unwrap per-vertex lookups, failing on the lowest unresolved vertex.
fn resolved(distances: Vec<Option<Real>>, kind: &'static str) -> Result<Vec<Real>> {
    distances
        .into_iter()
        .enumerate()
        .map(|(vertex, d)| d.ok_or(FieldError::UnresolvedNearest { kind, vertex }))
        .collect()
}

/// Field from caller-supplied per-vertex values, normalized like a distance.
///
/// ## Errors
/// - [`FieldError::EmptyReferenceSet`] if `values` is empty
/// - [`FieldError::DimensionMismatch`] unless there is one value per vertex of `target`
pub fn from_values(target: &Arc<IndexedMesh>, values: Vec<Real>, iso: Real) -> Result<SampledMeshField> {
    if values.is_empty() {
        return Err(FieldError::EmptyReferenceSet { kind: "values" });
    }
    let expected = target.vertex_count();
    if values.len() != expected {
        return Err(FieldError::DimensionMismatch {
            expected,
            found: values.len(),
        });
    }
    finish(target, values, iso, "values")
}

fn check_points(points: &[Point3<Real>]) -> Result<()> {
    if points.is_empty() {
        return Err(FieldError::EmptyReferenceSet { kind: "points" });
    }
    match points
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        Some(index) => Err(FieldError::InvalidCoordinate { index }),
        None => Ok(()),
    }
}

fn finish(target: &Arc<IndexedMesh>, mut values: Vec<Real>, iso: Real, kind: &'static str) -> Result<SampledMeshField> {
    match normalize(&mut values, iso) {
        Some(interval) if interval.is_degenerate() => tracing::warn!(
            kind,
            value = interval.min,
            iso,
            "DegenerateRange: every raw distance is equal, all samples set to -iso"
        ),
        Some(interval) => tracing::debug!(
            kind,
            vertices = values.len(),
            min = interval.min,
            max = interval.max,
            iso,
            "built distance field"
        ),
        None => tracing::debug!(kind, "target topology has no vertices, built an empty field"),
    }
    SampledMeshField::with_values(Arc::clone(target), values)
}
