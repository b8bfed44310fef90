//! Primitive `IndexedMesh`es used as sampling targets and distance references

use crate::float_types::Real;
use crate::mesh::IndexedMesh;
use nalgebra::Point3;
use std::f64::consts::{PI, TAU};

impl IndexedMesh {
    /// A flat rectangular grid in the XY plane at `z = 0`, spanning
    /// `[0, width] × [0, length]` with `cols × rows` cells, each split into
    /// two triangles.
    ///
    /// ## **Vertex Indexing Strategy**
    /// ```text
    /// Vertex (i, j) has index j * (cols + 1) + i
    ///
    ///   (0,1)---(1,1)
    ///     |   /   |
    ///   (0,0)---(1,0)
    /// ```
    /// Zero `cols` or `rows` is clamped to one cell.
    pub fn grid(width: Real, length: Real, cols: usize, rows: usize) -> IndexedMesh {
        let cols = cols.max(1);
        let rows = rows.max(1);

        let mut vertices = Vec::with_capacity((cols + 1) * (rows + 1));
        for j in 0..=rows {
            let y = length * j as Real / rows as Real;
            for i in 0..=cols {
                let x = width * i as Real / cols as Real;
                vertices.push(Point3::new(x, y, 0.0));
            }
        }

        let stride = cols + 1;
        let mut faces = Vec::with_capacity(cols * rows * 2);
        for j in 0..rows {
            for i in 0..cols {
                let v00 = j * stride + i;
                let v10 = v00 + 1;
                let v01 = v00 + stride;
                let v11 = v01 + 1;
                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
            }
        }

        IndexedMesh::from_trusted(vertices, faces)
    }

    /// Axis-aligned box spanning `[0, width] × [0, length] × [0, height]`.
    ///
    /// ```text
    /// Vertex Layout (8 vertices total):
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    /// Each quad face is split into two outward-wound triangles.
    pub fn cuboid(width: Real, length: Real, height: Real) -> IndexedMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),          // 0: origin
            Point3::new(width, 0.0, 0.0),        // 1: +X
            Point3::new(width, length, 0.0),     // 2: +X+Y
            Point3::new(0.0, length, 0.0),       // 3: +Y
            Point3::new(0.0, 0.0, height),       // 4: +Z
            Point3::new(width, 0.0, height),     // 5: +X+Z
            Point3::new(width, length, height),  // 6: +X+Y+Z
            Point3::new(0.0, length, height),    // 7: +Y+Z
        ];

        let quads: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // Bottom face
            [4, 5, 6, 7], // Top face
            [0, 1, 5, 4], // Front face
            [3, 7, 6, 2], // Back face
            [0, 4, 7, 3], // Left face
            [1, 2, 6, 5], // Right face
        ];

        let faces = quads
            .iter()
            .flat_map(|q| [[q[0], q[1], q[2]], [q[0], q[2], q[3]]])
            .collect();

        IndexedMesh::from_trusted(vertices, faces)
    }

    /// Cube with side `width` anchored at the origin.
    pub fn cube(width: Real) -> IndexedMesh {
        Self::cuboid(width, width, width)
    }

    /// UV sphere centred on the origin with poles on the Y axis.
    ///
    /// `segments` is clamped to at least 3 and `stacks` to at least 2.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> IndexedMesh {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::with_capacity(2 + (stacks - 1) * segments);
        vertices.push(Point3::new(0.0, radius, 0.0));

        for j in 1..stacks {
            let phi = j as Real / stacks as Real * PI;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();

            for i in 0..segments {
                let theta = i as Real / segments as Real * TAU;
                vertices.push(Point3::new(
                    ring_radius * theta.cos(),
                    y,
                    ring_radius * theta.sin(),
                ));
            }
        }

        vertices.push(Point3::new(0.0, -radius, 0.0));

        let north_pole = 0;
        let south_pole = vertices.len() - 1;
        let mut faces = Vec::new();

        // Top cap
        for i in 0..segments {
            let next_i = (i + 1) % segments;
            faces.push([north_pole, 1 + next_i, 1 + i]);
        }

        // Middle section quads (split into triangles)
        for j in 1..stacks - 1 {
            let ring_start = 1 + (j - 1) * segments;
            let next_ring_start = 1 + j * segments;

            for i in 0..segments {
                let next_i = (i + 1) % segments;

                let v1 = ring_start + i;
                let v2 = ring_start + next_i;
                let v3 = next_ring_start + i;
                let v4 = next_ring_start + next_i;

                faces.push([v1, v3, v2]);
                faces.push([v2, v3, v4]);
            }
        }

        // Bottom cap
        let last_ring_start = 1 + (stacks - 2) * segments;
        for i in 0..segments {
            let next_i = (i + 1) % segments;
            faces.push([last_ring_start + i, last_ring_start + next_i, south_pole]);
        }

        IndexedMesh::from_trusted(vertices, faces)
    }
}
