//! Boolean-style combinators over scalar fields.
//!
//! The lazy combinators ([`union`], [`intersection`], [`trim`], [`lerp`])
//! return [`Field`] nodes that keep their operands by shared ownership and
//! evaluate them at each query. The baked variants ([`blend`],
//! [`blend_batch`], [`trim_onto`]) evaluate once per vertex of a target mesh
//! and store the result as a new [`SampledMeshField`].
//!
//! **Mathematical Foundation**: with negative meaning inside,
//! ```text
//! union(a, b)(p)        = min(a(p), b(p))      inside either
//! intersection(a, b)(p) = max(a(p), b(p))      inside both
//! blend(a, b, t)(p)     = (1 - t)·a(p) + t·b(p)
//! ```

use crate::errors::{FieldError, Result};
use crate::evaluator;
use crate::field::{Field, SampledMeshField, ScalarField, trim_value};
use crate::float_types::{Real, lerp as lerp_values};
use crate::mesh::IndexedMesh;
use crate::plane::TrimPlane;
use std::sync::Arc;

/// `min(a, b)`: inside either operand.
pub fn union(a: impl Into<Arc<Field>>, b: impl Into<Arc<Field>>) -> Field {
    Field::Union(a.into(), b.into())
}

/// `max(a, b)`: inside both operands.
pub fn intersection(a: impl Into<Arc<Field>>, b: impl Into<Arc<Field>>) -> Field {
    Field::Intersection(a.into(), b.into())
}

/// `value` wherever any of `planes` trims the query point, `field` elsewhere.
///
/// Planes are tested in order and the first hit short-circuits. With no
/// planes the result always equals `field`.
pub fn trim(field: impl Into<Arc<Field>>, planes: impl Into<Arc<[TrimPlane]>>, value: Real) -> Field {
    Field::Trim {
        field: field.into(),
        planes: planes.into(),
        value,
    }
}

/// Lazy `(1 - t)·from + t·to`.
pub fn lerp(from: impl Into<Arc<Field>>, to: impl Into<Arc<Field>>, t: Real) -> Field {
    Field::Blend {
        from: from.into(),
        to: to.into(),
        t,
    }
}

/// Blend `f0` and `f1` at every vertex of `mesh` and store the result.
///
/// `t = 0` reproduces `f0`'s vertex values and `t = 1` reproduces `f1`'s.
/// Parameters outside `[0, 1]` extrapolate.
pub fn blend<F0, F1>(mesh: &Arc<IndexedMesh>, f0: &F0, f1: &F1, t: Real) -> SampledMeshField
where
    F0: ScalarField + ?Sized,
    F1: ScalarField + ?Sized,
{
    tracing::debug!(vertices = mesh.vertices().len(), t, "baking blend");
    bake(mesh, |p| lerp_values(f0.value_at(p), f1.value_at(p), t))
}

/// One baked blend per `(meshes[i], ts[i])` pair.
///
/// The fields share no mutable state; each bake runs in parallel over its
/// own vertices.
///
/// ## Errors
/// [`FieldError::DimensionMismatch`] if `meshes` and `ts` differ in length.
pub fn blend_batch<F0, F1>(
    meshes: &[Arc<IndexedMesh>],
    f0: &F0,
    f1: &F1,
    ts: &[Real],
) -> Result<Vec<SampledMeshField>>
where
    F0: ScalarField + ?Sized,
    F1: ScalarField + ?Sized,
{
    if meshes.len() != ts.len() {
        return Err(FieldError::DimensionMismatch {
            expected: meshes.len(),
            found: ts.len(),
        });
    }
    Ok(meshes
        .iter()
        .zip(ts)
        .map(|(mesh, &t)| blend(mesh, f0, f1, t))
        .collect())
}

/// Evaluate the trim of `field` at every vertex of `mesh` and store the result.
pub fn trim_onto<F>(mesh: &Arc<IndexedMesh>, field: &F, planes: &[TrimPlane], value: Real) -> SampledMeshField
where
    F: ScalarField + ?Sized,
{
    tracing::debug!(vertices = mesh.vertices().len(), planes = planes.len(), "baking trim");
    bake(mesh, |p| trim_value(planes, value, p, || field.value_at(p)))
}

fn bake<G>(mesh: &Arc<IndexedMesh>, value: G) -> SampledMeshField
where
    G: Fn(&nalgebra::Point3<Real>) -> Real + Sync + Send,
{
    let vertices = mesh.vertices();
    let mut samples = vec![0.0; vertices.len()];
    evaluator::fill(&mut samples, |i| value(&vertices[i]));
    SampledMeshField::from_parts(Arc::clone(mesh), samples)
}
