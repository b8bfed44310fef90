//! Traits defining batch evaluation for dependency inversion

use crate::field::ScalarField;
use crate::float_types::Real;
use crate::mesh::MeshTopology;
use nalgebra::Point3;

/// Core batch evaluation trait.
///
/// Every implementation writes `out[i]` exactly once from a computation that
/// depends only on `i` and read-only shared inputs, so results are identical
/// whatever the scheduling or thread count.
pub trait EvalOps {
    /// Fill every slot of `out` with `value(index)`.
    fn fill<T, G>(&self, out: &mut [T], value: G)
    where
        T: Send,
        G: Fn(usize) -> T + Sync + Send;

    /// Evaluate `field` at each of `points`; result `i` belongs to `points[i]`.
    fn evaluate_points<F>(&self, field: &F, points: &[Point3<Real>]) -> Vec<Real>
    where
        F: ScalarField + ?Sized,
    {
        let mut out = vec![0.0; points.len()];
        self.fill(&mut out, |i| field.value_at(&points[i]));
        out
    }

    /// Evaluate `field` at every vertex of `mesh`, in vertex order.
    fn evaluate_vertices<F, T>(&self, field: &F, mesh: &T) -> Vec<Real>
    where
        F: ScalarField + ?Sized,
        T: MeshTopology + ?Sized,
    {
        let mut out = vec![0.0; mesh.vertex_count()];
        self.fill(&mut out, |i| field.value_at(&mesh.vertex_position(i)));
        out
    }
}
