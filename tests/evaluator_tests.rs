mod support;

use frep::{
    algebra,
    builder,
    evaluator::{self, EvalOps, SerialEvalOps},
    field::{Field, ScalarField},
    float_types::Real,
    mesh::{IndexedMesh, MeshTopology},
    plane::TrimPlane,
};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

fn composite(mesh: &Arc<IndexedMesh>) -> Field {
    let a = builder::from_points(mesh, &[Point3::new(0.0, 1.0, 0.0)], 0.0).unwrap();
    let b = builder::from_points(mesh, &[Point3::new(0.0, -1.0, 0.0)], 0.2).unwrap();
    algebra::trim(
        algebra::lerp(algebra::union(a.clone(), b.clone()), algebra::intersection(a, b), 0.25),
        vec![TrimPlane::new(Point3::new(0.0, 0.0, 0.8), -Vector3::z())],
        1.0,
    )
}

fn spiral(n: usize) -> Vec<Point3<Real>> {
    (0..n)
        .map(|i| {
            let t = i as Real * 0.013;
            Point3::new(1.3 * t.cos(), 1.3 * t.sin(), (t * 0.1).sin())
        })
        .collect()
}

#[test]
fn vertex_batch_matches_pointwise_evaluation() {
    let sphere = Arc::new(IndexedMesh::sphere(1.0, 24, 12));
    let field = composite(&sphere);

    let batch = evaluator::evaluate_vertices(&field, sphere.as_ref());
    assert_eq!(batch.len(), sphere.vertex_count());
    for (v, value) in batch.iter().enumerate() {
        assert_eq!(value.to_bits(), field.value_at(&sphere.vertex_position(v)).to_bits());
    }
}

#[test]
fn results_land_in_input_order() {
    let points = spiral(300);
    let field = |p: &Point3<Real>| p.x + 10.0 * p.y;
    let values = evaluator::evaluate_points(&field, &points);
    for (p, value) in points.iter().zip(&values) {
        assert_eq!(*value, p.x + 10.0 * p.y);
    }
}

#[test]
fn empty_batches_are_fine() {
    let field = Field::Constant(1.0);
    assert!(evaluator::evaluate_points(&field, &[]).is_empty());
    assert!(SerialEvalOps::new().evaluate_points(&field, &[]).is_empty());
}

#[test]
fn fill_writes_arbitrary_slot_types() {
    let mut out = vec![(0.0, 0usize); 17];
    evaluator::fill(&mut out, |i| (i as Real * 0.5, i % 3));
    assert_eq!(out[16], (8.0, 1));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_and_serial_are_bit_identical() {
    use frep::evaluator::ParallelEvalOps;

    let sphere = Arc::new(IndexedMesh::sphere(1.0, 32, 16));
    let field = composite(&sphere);

    for n in [0, 1, 2, 63, 64, 65, 1000, 4099] {
        let points = spiral(n);
        let serial = SerialEvalOps::new().evaluate_points(&field, &points);
        for ops in [ParallelEvalOps::new(), ParallelEvalOps::with_min_len(1), ParallelEvalOps::with_min_len(0)] {
            let parallel = ops.evaluate_points(&field, &points);
            assert_eq!(serial.len(), parallel.len());
            for (s, p) in serial.iter().zip(&parallel) {
                assert_eq!(s.to_bits(), p.to_bits(), "n = {n}, min_len = {}", ops.min_len());
            }
        }
    }

    let serial = SerialEvalOps::new().evaluate_vertices(&field, sphere.as_ref());
    let parallel = ParallelEvalOps::with_min_len(3).evaluate_vertices(&field, sphere.as_ref());
    assert!(serial.iter().zip(&parallel).all(|(s, p)| s.to_bits() == p.to_bits()));
}
