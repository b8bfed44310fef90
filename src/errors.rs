//! Construction errors

/// All the ways building a field, a topology or a combinator can fail.
///
/// Every variant is raised before a field is published, so evaluation itself
/// never has to report an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// A sample array does not have one value per topology vertex
    #[error("(DimensionMismatch) expected {expected} values, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A distance builder was handed zero reference elements
    #[error("(EmptyReferenceSet) the {kind} reference contains no elements")]
    EmptyReferenceSet { kind: &'static str },

    /// A curve could not be reduced to the polyline used for closest-point queries
    #[error("(ShapeMismatch) curve {index} cannot be reduced to a polyline: {reason}")]
    ShapeMismatch { index: usize, reason: String },

    /// A face references a vertex that does not exist
    #[error(
        "(InvalidFaceIndex) face {face} references vertex {vertex}, but the mesh has {vertex_count} vertices"
    )]
    InvalidFaceIndex {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// A reference lookup gave no usable nearest element for a target vertex
    #[error("(UnresolvedNearest) the {kind} reference gave no valid nearest element for vertex {vertex}")]
    UnresolvedNearest { kind: &'static str, vertex: usize },

    /// A vertex or reference coordinate is NaN or infinite
    #[error("(InvalidCoordinate) coordinate {index} has a NaN or infinite component")]
    InvalidCoordinate { index: usize },
}

pub type Result<T> = std::result::Result<T, FieldError>;
