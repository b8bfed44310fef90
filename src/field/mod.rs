//! Scalar fields `ℝ³ → ℝ` and the expression DAG that combines them.
//!
//! Sign convention everywhere: negative is inside, positive is outside, and
//! the zero level-set is the implicit surface.

pub mod sampled;

pub use sampled::SampledMeshField;

use crate::float_types::{Real, lerp};
use crate::plane::TrimPlane;
use nalgebra::Point3;
use std::sync::Arc;

/// A continuous function from 3D position to a real value.
///
/// Implementations are pure: evaluating never mutates state, so a field can
/// be shared across threads and queried concurrently.
pub trait ScalarField: Send + Sync {
    fn value_at(&self, point: &Point3<Real>) -> Real;
}

impl<F> ScalarField for F
where
    F: Fn(&Point3<Real>) -> Real + Send + Sync,
{
    #[inline]
    fn value_at(&self, point: &Point3<Real>) -> Real {
        self(point)
    }
}

/// A node of an immutable field expression.
///
/// Leaves are constants and sampled mesh fields; inner nodes hold their
/// operands by shared ownership and evaluate them lazily at each query. The
/// graph is assembled bottom-up from existing nodes and never modified, so it
/// cannot contain cycles.
#[derive(Debug, Clone)]
pub enum Field {
    /// The same value everywhere.
    Constant(Real),
    /// Per-vertex samples on a mesh.
    Sampled(Arc<SampledMeshField>),
    /// `min(a, b)`: inside either operand.
    Union(Arc<Field>, Arc<Field>),
    /// `max(a, b)`: inside both operands.
    Intersection(Arc<Field>, Arc<Field>),
    /// `value` behind any of `planes`, `field` elsewhere.
    Trim {
        field: Arc<Field>,
        planes: Arc<[TrimPlane]>,
        value: Real,
    },
    /// `(1 - t)·from + t·to`.
    Blend {
        from: Arc<Field>,
        to: Arc<Field>,
        t: Real,
    },
}

impl Field {
    /// Number of nodes reachable from this one, counting shared nodes once per path.
    pub fn node_count(&self) -> usize {
        match self {
            Field::Constant(_) | Field::Sampled(_) => 1,
            Field::Union(a, b) | Field::Intersection(a, b) => 1 + a.node_count() + b.node_count(),
            Field::Trim { field, .. } => 1 + field.node_count(),
            Field::Blend { from, to, .. } => 1 + from.node_count() + to.node_count(),
        }
    }
}

impl ScalarField for Field {
    fn value_at(&self, point: &Point3<Real>) -> Real {
        match self {
            Field::Constant(value) => *value,
            Field::Sampled(field) => field.value_at(point),
            Field::Union(a, b) => a.value_at(point).min(b.value_at(point)),
            Field::Intersection(a, b) => a.value_at(point).max(b.value_at(point)),
            Field::Trim {
                field,
                planes,
                value,
            } => trim_value(planes, *value, point, || field.value_at(point)),
            Field::Blend { from, to, t } => lerp(from.value_at(point), to.value_at(point), *t),
        }
    }
}

/// `value` if any plane trims `point`, otherwise the result of `inner`.
///
/// `inner` runs only for untrimmed points. Lazy and baked trims both go
/// through here.
#[inline]
pub(crate) fn trim_value<G>(planes: &[TrimPlane], value: Real, point: &Point3<Real>, inner: G) -> Real
where
    G: FnOnce() -> Real,
{
    if planes.iter().any(|plane| plane.trims(point)) {
        value
    } else {
        inner()
    }
}

impl From<SampledMeshField> for Field {
    fn from(field: SampledMeshField) -> Self {
        Field::Sampled(Arc::new(field))
    }
}

impl From<Arc<SampledMeshField>> for Field {
    fn from(field: Arc<SampledMeshField>) -> Self {
        Field::Sampled(field)
    }
}

impl From<SampledMeshField> for Arc<Field> {
    fn from(field: SampledMeshField) -> Self {
        Arc::new(Field::from(field))
    }
}

impl From<Real> for Field {
    fn from(value: Real) -> Self {
        Field::Constant(value)
    }
}
