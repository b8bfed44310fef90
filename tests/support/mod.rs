//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use frep::{float_types::Real, mesh::IndexedMesh};
use nalgebra::Point3;
use std::sync::Arc;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Faceless topology with vertices `(x, 0, 0)` for each `x` in `xs`.
pub fn points_on_x(xs: &[Real]) -> Arc<IndexedMesh> {
    let vertices = xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect();
    Arc::new(IndexedMesh::from_points(vertices).expect("finite coordinates"))
}

/// Shared `cols × rows` grid over `[0, size]²`.
pub fn plate(size: Real, cells: usize) -> Arc<IndexedMesh> {
    Arc::new(IndexedMesh::grid(size, size, cells, cells))
}

/// Smallest and largest value of a slice.
pub fn min_max(values: &[Real]) -> (Real, Real) {
    values
        .iter()
        .fold((Real::INFINITY, Real::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
