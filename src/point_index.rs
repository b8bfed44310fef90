//! Nearest-neighbour lookup over a fixed set of reference points.
//!
//! [`PointIndex`] is the seam the distance builders consume; the two
//! implementations here wrap a `kiddo` k-d tree, either over the full 3D
//! coordinates or over their projection onto the XY plane.
//!
//! The trees are immutable and balanced once from the whole point slice, so
//! any number of points may share a coordinate value or coincide.

use crate::float_types::Real;
use kiddo::SquaredEuclidean;
use nalgebra::Point3;

type Tree<const K: usize> = kiddo::immutable::float::kdtree::ImmutableKdTree<Real, u64, K, 32>;

/// A nearest-neighbour index over reference points.
pub trait PointIndex: Send + Sync {
    /// Index (in insertion order) of the reference point closest to `query`,
    /// or `None` when the index is empty or the query is not finite.
    fn nearest(&self, query: &Point3<Real>) -> Option<usize>;

    /// Number of reference points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// k-d tree over the XY projection of the reference points.
///
/// Queries are projected the same way, so the returned neighbour is the
/// closest point in plan view, not necessarily in space.
pub struct PlanarPointIndex {
    tree: Option<Tree<2>>,
    len: usize,
}

impl PlanarPointIndex {
    pub fn new(points: &[Point3<Real>]) -> Self {
        let coords: Vec<[Real; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        let tree = (!coords.is_empty()).then(|| Tree::<2>::new_from_slice(&coords));
        Self {
            tree,
            len: points.len(),
        }
    }
}

impl std::fmt::Debug for PlanarPointIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanarPointIndex").field("len", &self.len).finish()
    }
}

impl PointIndex for PlanarPointIndex {
    fn nearest(&self, query: &Point3<Real>) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        if !(query.x.is_finite() && query.y.is_finite()) {
            return None;
        }
        let nearest = tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        #[allow(clippy::cast_possible_truncation)]
        let item = nearest.item as usize;
        Some(item)
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// k-d tree over full 3D coordinates.
pub struct SpatialPointIndex {
    tree: Option<Tree<3>>,
    len: usize,
}

impl SpatialPointIndex {
    pub fn new(points: &[Point3<Real>]) -> Self {
        let coords: Vec<[Real; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
        let tree = (!coords.is_empty()).then(|| Tree::<3>::new_from_slice(&coords));
        Self {
            tree,
            len: points.len(),
        }
    }

    /// Closest reference point together with its squared distance to `query`.
    pub fn nearest_with_distance(&self, query: &Point3<Real>) -> Option<(usize, Real)> {
        let tree = self.tree.as_ref()?;
        if !query.coords.iter().all(|c| c.is_finite()) {
            return None;
        }
        let nearest = tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y, query.z]);
        #[allow(clippy::cast_possible_truncation)]
        let item = nearest.item as usize;
        Some((item, nearest.distance))
    }
}

impl std::fmt::Debug for SpatialPointIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialPointIndex").field("len", &self.len).finish()
    }
}

impl PointIndex for SpatialPointIndex {
    fn nearest(&self, query: &Point3<Real>) -> Option<usize> {
        self.nearest_with_distance(query).map(|(i, _)| i)
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_index_ignores_height() {
        let points = vec![Point3::new(0.0, 0.0, 100.0), Point3::new(5.0, 0.0, 0.0)];
        let index = PlanarPointIndex::new(&points);

        // Spatially the second point is closer, in plan view the first one is.
        assert_eq!(index.nearest(&Point3::new(1.0, 0.0, 0.0)), Some(0));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn spatial_index_reports_squared_distance() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)];
        let index = SpatialPointIndex::new(&points);

        let (i, d2) = index
            .nearest_with_distance(&Point3::new(3.0, 4.0, 1.0))
            .unwrap();
        assert_eq!(i, 1);
        assert!((d2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn repeated_coordinates_are_indexed() {
        // A 20 × 20 lattice plus 300 copies of one point.
        let mut points: Vec<_> = (0..400)
            .map(|i| Point3::new((i % 20) as Real, (i / 20) as Real, 0.0))
            .collect();
        points.extend(std::iter::repeat_n(Point3::new(50.0, 50.0, 0.0), 300));

        let spatial = SpatialPointIndex::new(&points);
        let planar = PlanarPointIndex::new(&points);
        let (i, d2) = spatial
            .nearest_with_distance(&Point3::new(3.2, 7.1, 0.0))
            .unwrap();
        assert_eq!(i, 7 * 20 + 3);
        assert!((d2 - 0.05).abs() < 1e-12);
        assert!(planar.nearest(&Point3::new(49.0, 49.5, 3.0)).unwrap() >= 400);
    }

    #[test]
    fn non_finite_queries_have_no_neighbour() {
        let index = SpatialPointIndex::new(&[Point3::origin()]);
        assert_eq!(index.nearest(&Point3::new(Real::NAN, 0.0, 0.0)), None);
        assert_eq!(index.nearest(&Point3::new(0.0, Real::INFINITY, 0.0)), None);
    }

    #[test]
    fn empty_index_has_no_neighbour() {
        let index = SpatialPointIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.nearest(&Point3::origin()), None);
    }
}
