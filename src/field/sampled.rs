//! Scalar fields stored as one sample per mesh vertex

use crate::errors::{FieldError, Result};
use crate::field::ScalarField;
use crate::float_types::Real;
use crate::mesh::{IndexedMesh, MeshTopology};
use nalgebra::Point3;
use std::sync::Arc;

/// A [`ScalarField`] backed by per-vertex samples on a shared topology.
///
/// The sample array always has exactly one value per vertex. Writes replace
/// the whole array at once; cloned fields and [`snapshot`](Self::snapshot)s
/// taken earlier keep seeing the values they were created with.
///
/// **Evaluation**: a query that coincides with a vertex returns that vertex's
/// sample exactly. Any other query is projected onto the closest triangle and
/// the three corner samples are blended with barycentric weights, which is
/// continuous across shared edges. A faceless topology falls back to the
/// nearest vertex, and an empty topology evaluates to `+∞` (everywhere
/// outside). A query with a NaN coordinate evaluates to NaN; one with an
/// infinite coordinate is infinitely far away and evaluates to `+∞`.
///
/// Targets are always [`IndexedMesh`]es. Other [`MeshTopology`]
/// implementations can still serve as distance references through
/// [`builder::from_mesh`](crate::builder::from_mesh).
#[derive(Debug, Clone)]
pub struct SampledMeshField {
    topology: Arc<IndexedMesh>,
    samples: Arc<[Real]>,
}

impl SampledMeshField {
    /// Zero-filled field sized to `topology`.
    pub fn new(topology: Arc<IndexedMesh>) -> Self {
        let samples = vec![0.0; topology.vertex_count()].into();
        Self { topology, samples }
    }

    /// Field initialised from `values`.
    ///
    /// ## Errors
    /// [`FieldError::DimensionMismatch`] unless there is one value per vertex.
    pub fn with_values(topology: Arc<IndexedMesh>, values: Vec<Real>) -> Result<Self> {
        let mut field = Self::new(topology);
        field.set(values)?;
        Ok(field)
    }

    /// Caller guarantees one sample per vertex.
    pub(crate) fn from_parts(topology: Arc<IndexedMesh>, samples: Vec<Real>) -> Self {
        debug_assert_eq!(samples.len(), topology.vertex_count());
        Self {
            topology,
            samples: samples.into(),
        }
    }

    /// Replace every sample.
    ///
    /// Taking `&mut self` means no reader can be evaluating this instance while
    /// it is written.
    ///
    /// ## Errors
    /// [`FieldError::DimensionMismatch`] unless there is one value per vertex.
    /// The field is left untouched on error.
    pub fn set(&mut self, values: Vec<Real>) -> Result<()> {
        let expected = self.topology.vertex_count();
        if values.len() != expected {
            return Err(FieldError::DimensionMismatch {
                expected,
                found: values.len(),
            });
        }
        self.samples = values.into();
        Ok(())
    }

    #[inline]
    pub fn samples(&self) -> &[Real] {
        &self.samples
    }

    /// Shared handle on the current sample array.
    pub fn snapshot(&self) -> Arc<[Real]> {
        Arc::clone(&self.samples)
    }

    #[inline]
    pub fn topology(&self) -> &Arc<IndexedMesh> {
        &self.topology
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.samples.len()
    }
}

impl ScalarField for SampledMeshField {
    fn value_at(&self, point: &Point3<Real>) -> Real {
        if point.coords.iter().any(|c| c.is_nan()) {
            return Real::NAN;
        }
        if point.coords.iter().any(|c| c.is_infinite()) {
            return Real::INFINITY;
        }
        if let Some(v) = self.topology.vertex_at(point) {
            return self.samples[v];
        }
        match self.topology.closest_point(point) {
            Some(surface_point) => surface_point.interpolate(&self.samples),
            None => Real::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Arc<IndexedMesh> {
        Arc::new(IndexedMesh::grid(1.0, 1.0, 1, 1))
    }

    #[test]
    fn new_field_is_zero_filled() {
        let field = SampledMeshField::new(square());
        assert_eq!(field.samples(), &[0.0; 4]);
    }

    #[test]
    fn set_rejects_wrong_lengths_and_keeps_old_values() {
        let mut field = SampledMeshField::with_values(square(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();

        let err = field.set(vec![0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            FieldError::DimensionMismatch {
                expected: 4,
                found: 3
            }
        );
        assert_eq!(field.samples(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(field.set(Vec::new()).is_err());
    }

    #[test]
    fn snapshot_survives_a_later_set() {
        let mut field = SampledMeshField::with_values(square(), vec![1.0; 4]).unwrap();
        let before = field.snapshot();
        field.set(vec![2.0; 4]).unwrap();
        assert_eq!(&*before, &[1.0; 4]);
        assert_eq!(field.samples(), &[2.0; 4]);
    }

    #[test]
    fn interpolates_inside_a_face() {
        // Samples equal to x, so the linear interpolant reproduces x on the square.
        let field = SampledMeshField::with_values(square(), vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let value = field.value_at(&Point3::new(0.3, 0.6, 0.0));
        assert!((value - 0.3).abs() < 1e-12);

        // Off-surface queries use the projection onto the surface.
        let value = field.value_at(&Point3::new(0.7, 0.2, 4.0));
        assert!((value - 0.7).abs() < 1e-12);
    }

    #[test]
    fn empty_topology_is_everywhere_outside() {
        let mesh = Arc::new(IndexedMesh::from_points(Vec::new()).unwrap());
        let field = SampledMeshField::new(mesh);
        assert_eq!(field.value_at(&Point3::origin()), Real::INFINITY);
    }

    #[test]
    fn non_finite_queries_do_not_reach_the_mesh() {
        let mesh = Arc::new(IndexedMesh::grid(2.0, 2.0, 2, 2));
        let field = SampledMeshField::with_values(mesh, (0..9).map(|i| i as Real).collect()).unwrap();

        assert!(field.value_at(&Point3::new(Real::NAN, 0.0, 0.0)).is_nan());
        assert_eq!(field.value_at(&Point3::new(Real::INFINITY, 0.0, 0.0)), Real::INFINITY);
        assert_eq!(field.value_at(&Point3::new(0.0, Real::NEG_INFINITY, 1.0)), Real::INFINITY);
    }

    #[test]
    fn faceless_topology_uses_the_nearest_vertex() {
        let mesh = Arc::new(
            IndexedMesh::from_points(vec![Point3::origin(), Point3::new(10.0, 0.0, 0.0)]).unwrap(),
        );
        let field = SampledMeshField::with_values(mesh, vec![-1.0, 1.0]).unwrap();
        assert_eq!(field.value_at(&Point3::new(8.0, 1.0, 0.0)), 1.0);
    }
}
