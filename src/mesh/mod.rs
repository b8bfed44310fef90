//! `IndexedMesh` topology and the `MeshTopology` trait consumed by fields and builders

use crate::errors::{FieldError, Result};
use crate::float_types::{
    Real,
    parry3d::{
        bounding_volume::Aabb,
        query::{PointQuery, PointQueryWithLocation},
        shape::{TriMesh, Triangle},
    },
    tolerance,
};
use crate::point_index::SpatialPointIndex;
use nalgebra::Point3;
use std::sync::OnceLock;

pub mod connectivity;
pub mod shapes;

pub use connectivity::Connectivity;

/// Read-only view of a discretized surface: vertex positions, a closest-point
/// query, and adjacency.
pub trait MeshTopology: Send + Sync {
    fn vertex_count(&self) -> usize;

    /// Position of vertex `index`. Panics if `index >= vertex_count()`.
    fn vertex_position(&self, index: usize) -> Point3<Real>;

    /// Closest point on the surface to `point`, or `None` for an empty
    /// topology or a query with a non-finite coordinate.
    fn closest_point(&self, point: &Point3<Real>) -> Option<SurfacePoint>;

    /// One-ring neighbours of vertex `index`.
    fn vertex_neighbors(&self, index: usize) -> &[usize];
}

/// Which topological feature a [`SurfacePoint`] resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceFeature {
    /// The query snapped to a vertex (faceless topology).
    Vertex(usize),
    /// The query projected into a triangle; `weights` are the barycentric
    /// coordinates of the projection with respect to `corners`.
    Face {
        face: usize,
        corners: [usize; 3],
        weights: [Real; 3],
    },
}

/// Result of a closest-point query on a [`MeshTopology`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub point: Point3<Real>,
    pub feature: SurfaceFeature,
}

impl SurfacePoint {
    /// Euclidean distance from `query` to this surface point.
    #[inline]
    pub fn distance_to(&self, query: &Point3<Real>) -> Real {
        (self.point - query).norm()
    }

    /// Interpolate per-vertex `samples` at this surface point.
    pub fn interpolate(&self, samples: &[Real]) -> Real {
        match self.feature {
            SurfaceFeature::Vertex(v) => samples[v],
            SurfaceFeature::Face {
                corners, weights, ..
            } => {
                weights[0] * samples[corners[0]]
                    + weights[1] * samples[corners[1]]
                    + weights[2] * samples[corners[2]]
            },
        }
    }
}

/// A triangle mesh stored as a shared vertex array plus index triples.
///
/// Spatial acceleration structures (a parry `TriMesh` for closest-point
/// queries, a k-d tree over the vertices) and adjacency tables are built
/// lazily on first use and cached; the geometry itself is immutable after
/// construction.
pub struct IndexedMesh {
    vertices: Vec<Point3<Real>>,
    faces: Vec<[usize; 3]>,

    /// Lazily calculated AABB that spans `vertices`.
    bounding_box: OnceLock<Aabb>,

    /// Parry surface used for closest-point queries, `None` when parry rejects the faces.
    surface: OnceLock<Option<TriMesh>>,

    /// k-d tree over the vertex positions.
    vertex_index: OnceLock<SpatialPointIndex>,

    connectivity: OnceLock<Connectivity>,
}

impl IndexedMesh {
    /// Build a mesh from vertex positions and triangles.
    ///
    /// ## Errors
    /// - [`FieldError::InvalidCoordinate`] if a vertex has a NaN or infinite component
    /// - [`FieldError::InvalidFaceIndex`] if a face references a missing vertex
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<[usize; 3]>) -> Result<Self> {
        if let Some(index) = vertices
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(FieldError::InvalidCoordinate { index });
        }

        let vertex_count = vertices.len();
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&v| v >= vertex_count) {
                return Err(FieldError::InvalidFaceIndex {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }

        Ok(Self::from_trusted(vertices, faces))
    }

    /// Skips validation; callers guarantee finite vertices and in-range faces.
    pub(crate) const fn from_trusted(vertices: Vec<Point3<Real>>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            bounding_box: OnceLock::new(),
            surface: OnceLock::new(),
            vertex_index: OnceLock::new(),
            connectivity: OnceLock::new(),
        }
    }

    /// Build a mesh from polygons of arbitrary size, fan-triangulating each one.
    ///
    /// Polygons with fewer than three indices are skipped.
    pub fn from_polygons(vertices: Vec<Point3<Real>>, polygons: &[Vec<usize>]) -> Result<Self> {
        let mut faces = Vec::with_capacity(polygons.len());
        for (i, polygon) in polygons.iter().enumerate() {
            if polygon.len() < 3 {
                tracing::debug!(polygon = i, len = polygon.len(), "skipping degenerate polygon");
                continue;
            }
            for k in 1..polygon.len() - 1 {
                faces.push([polygon[0], polygon[k], polygon[k + 1]]);
            }
        }
        Self::new(vertices, faces)
    }

    /// A point cloud: vertices without faces.
    pub fn from_points(vertices: Vec<Point3<Real>>) -> Result<Self> {
        Self::new(vertices, Vec::new())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis aligned bounding box of the vertices (cached after first call)
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            if self.vertices.is_empty() {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins.x = mins.x.min(v.x);
                mins.y = mins.y.min(v.y);
                mins.z = mins.z.min(v.z);
                maxs.x = maxs.x.max(v.x);
                maxs.y = maxs.y.max(v.y);
                maxs.z = maxs.z.max(v.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Adjacency tables (cached after first call)
    pub fn connectivity(&self) -> &Connectivity {
        self.connectivity
            .get_or_init(|| Connectivity::build(self.vertices.len(), &self.faces))
    }

    /// k-d tree over the vertex positions (cached after first call)
    pub fn vertex_index(&self) -> &SpatialPointIndex {
        self.vertex_index
            .get_or_init(|| SpatialPointIndex::new(&self.vertices))
    }

    /// Convert the faces of this mesh to a Parry `TriMesh`.
    ///
    /// Returns `None` for a faceless mesh, or if Parry returns a `TriMeshBuilderError`.
    pub fn to_trimesh(&self) -> Option<TriMesh> {
        if self.faces.is_empty() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let indices: Vec<[u32; 3]> = self
            .faces
            .iter()
            .map(|f| [f[0] as u32, f[1] as u32, f[2] as u32])
            .collect();
        match TriMesh::new(self.vertices.clone(), indices) {
            Ok(trimesh) => Some(trimesh),
            Err(err) => {
                tracing::warn!(?err, "parry rejected the mesh, using per-triangle queries");
                None
            },
        }
    }

    fn surface(&self) -> Option<&TriMesh> {
        self.surface.get_or_init(|| self.to_trimesh()).as_ref()
    }

    /// Index of the vertex exactly at `point`, if there is one.
    pub fn vertex_at(&self, point: &Point3<Real>) -> Option<usize> {
        match self.vertex_index().nearest_with_distance(point) {
            Some((i, d2)) if d2 == 0.0 && self.vertices[i] == *point => Some(i),
            _ => None,
        }
    }

    /// Closest triangle by exhaustive scan; first face wins ties.
    fn closest_face_scan(&self, point: &Point3<Real>) -> Option<(usize, Point3<Real>)> {
        let mut best: Option<(usize, Point3<Real>, Real)> = None;
        for (i, f) in self.faces.iter().enumerate() {
            let tri = Triangle::new(self.vertices[f[0]], self.vertices[f[1]], self.vertices[f[2]]);
            let projected = tri.project_local_point(point, false).point;
            let d2 = (projected - point).norm_squared();
            if best.is_none_or(|(_, _, least)| d2 < least) {
                best = Some((i, projected, d2));
            }
        }
        best.map(|(i, p, _)| (i, p))
    }

    fn face_point(&self, face: usize, projected: Point3<Real>) -> SurfacePoint {
        let corners = self.faces[face];
        let weights = barycentric(
            &projected,
            &self.vertices[corners[0]],
            &self.vertices[corners[1]],
            &self.vertices[corners[2]],
        );
        SurfacePoint {
            point: projected,
            feature: SurfaceFeature::Face {
                face,
                corners,
                weights,
            },
        }
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn vertex_position(&self, index: usize) -> Point3<Real> {
        self.vertices[index]
    }

    fn closest_point(&self, point: &Point3<Real>) -> Option<SurfacePoint> {
        if self.vertices.is_empty() || !point.coords.iter().all(|c| c.is_finite()) {
            return None;
        }

        if self.faces.is_empty() {
            let (v, _) = self.vertex_index().nearest_with_distance(point)?;
            return Some(SurfacePoint {
                point: self.vertices[v],
                feature: SurfaceFeature::Vertex(v),
            });
        }

        match self.surface() {
            Some(trimesh) => {
                let (projection, (face, _)) =
                    trimesh.project_local_point_and_get_location(point, false);
                Some(self.face_point(face as usize, projection.point))
            },
            None => {
                let (face, projected) = self.closest_face_scan(point)?;
                Some(self.face_point(face, projected))
            },
        }
    }

    fn vertex_neighbors(&self, index: usize) -> &[usize] {
        self.connectivity().vertex_neighbors(index)
    }
}

impl std::fmt::Debug for IndexedMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedMesh")
            .field("vertices", &self.vertices.len())
            .field("faces", &self.faces.len())
            .finish()
    }
}

/// **Mathematical Foundation: Barycentric Coordinates**
///
/// For a point `p` in the plane of triangle `(a, b, c)`:
/// ```text
/// v₀ = b - a,  v₁ = c - a,  v₂ = p - a
/// denom = (v₀·v₀)(v₁·v₁) - (v₀·v₁)²
/// β = ((v₁·v₁)(v₂·v₀) - (v₀·v₁)(v₂·v₁)) / denom
/// γ = ((v₀·v₀)(v₂·v₁) - (v₀·v₁)(v₂·v₀)) / denom
/// α = 1 - β - γ
/// ```
///
/// Weights are clamped to `[0, 1]` and renormalized. A degenerate (sliver or
/// collapsed) triangle gives all weight to the corner nearest to `p`.
pub fn barycentric(
    p: &Point3<Real>,
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
) -> [Real; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    if d00 * d11 <= 0.0 || denom <= tolerance() * d00 * d11 {
        let d = [(p - a).norm_squared(), (p - b).norm_squared(), (p - c).norm_squared()];
        let mut nearest = 0;
        for k in 1..3 {
            if d[k] < d[nearest] {
                nearest = k;
            }
        }
        let mut weights = [0.0; 3];
        weights[nearest] = 1.0;
        return weights;
    }

    let beta = ((d11 * d20 - d01 * d21) / denom).clamp(0.0, 1.0);
    let gamma = ((d00 * d21 - d01 * d20) / denom).clamp(0.0, 1.0);
    let alpha = (1.0 - beta - gamma).max(0.0);

    let sum = alpha + beta + gamma;
    [alpha / sum, beta / sum, gamma / sum]
}
