//! A multithreaded **function representation (F-Rep)** library: implicit
//! geometry defined as the zero level-set of scalar fields sampled on
//! triangle meshes.
//!
//! Fields are built as normalized distances from reference geometry (points,
//! curves, other meshes or raw values) to the vertices of a target mesh,
//! combined with *union*, *intersection*, half-space *trim* and linear
//! *blend*, and evaluated anywhere in space. Negative values are inside,
//! positive values outside.
//!
//! ```rust
//! use std::sync::Arc;
//! use frep::{algebra, builder, mesh::IndexedMesh, ScalarField};
//! use nalgebra::Point3;
//!
//! let plate = Arc::new(IndexedMesh::grid(10.0, 10.0, 10, 10));
//! let near_corner = builder::from_points(&plate, &[Point3::origin()], 0.0)?;
//! let near_edge = builder::from_points(&plate, &[Point3::new(10.0, 5.0, 0.0)], 0.0)?;
//!
//! let both = algebra::union(near_corner, near_edge);
//! assert_eq!(both.value_at(&Point3::origin()), -1.0);
//! # Ok::<(), frep::FieldError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **parallel**: use rayon for per-vertex evaluation and distance computation
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` import/export of topologies

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod algebra;
pub mod builder;
pub mod curve;
pub mod errors;
pub mod evaluator;
pub mod field;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod plane;
pub mod point_index;

pub use curve::Curve;
pub use errors::FieldError;
pub use field::{Field, SampledMeshField, ScalarField};
pub use mesh::{IndexedMesh, MeshTopology};
pub use plane::TrimPlane;
