use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::IndexedMesh;
use nalgebra::{Point3, Vector3};
use std::io::{Cursor, Read, Seek};

/// Unit facet normal by the right-hand rule, zero for a degenerate facet.
fn facet_normal(tri: &[Point3<Real>; 3]) -> Vector3<Real> {
    let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
    n.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

fn facets(mesh: &IndexedMesh) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
    let vertices = mesh.vertices();
    mesh.faces()
        .iter()
        .map(move |f| [vertices[f[0]], vertices[f[1]], vertices[f[2]]])
}

/// Export to ASCII STL
///
/// ```rust
/// # use frep::mesh::IndexedMesh;
/// let mesh = IndexedMesh::cube(1.0);
/// let text = frep::io::to_stl_ascii(&mesh, "cube");
/// assert!(text.starts_with("solid cube"));
/// ```
pub fn to_stl_ascii(mesh: &IndexedMesh, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    for tri in facets(mesh) {
        let n = facet_normal(&tri);
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for p in &tri {
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Coordinates are narrowed to `f32`, as the format requires.
pub fn to_stl_binary(mesh: &IndexedMesh) -> Result<Vec<u8>, IoError> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    #[allow(clippy::cast_possible_truncation)]
    let triangles: Vec<Triangle> = facets(mesh)
        .map(|tri| {
            let n = facet_normal(&tri);
            Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            }
        })
        .collect();

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl IndexedMesh {
    /// Read an ASCII or binary STL. Coincident corners are merged into shared
    /// vertices, so adjacency is recovered.
    pub fn from_stl<R: Read + Seek>(reader: &mut R) -> Result<Self, IoError> {
        let stl = stl_io::read_stl(reader)?;
        let vertices: Vec<Point3<Real>> = stl
            .vertices
            .iter()
            .map(|v| Point3::new(Real::from(v[0]), Real::from(v[1]), Real::from(v[2])))
            .collect();
        let faces: Vec<[usize; 3]> = stl.faces.iter().map(|f| f.vertices).collect();
        tracing::debug!(vertices = vertices.len(), faces = faces.len(), "read STL");
        Ok(Self::new(vertices, faces)?)
    }

    /// [`from_stl`](Self::from_stl) over an in-memory buffer.
    pub fn from_stl_bytes(bytes: &[u8]) -> Result<Self, IoError> {
        if bytes.is_empty() {
            return Err(IoError::MalformedInput("empty STL buffer".to_string()));
        }
        Self::from_stl(&mut Cursor::new(bytes))
    }

    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> Result<Vec<u8>, IoError> {
        self::to_stl_binary(self)
    }
}
