//! Reading and writing topologies from mesh files

#[cfg(feature = "stl-io")]
mod stl;

#[cfg(feature = "stl-io")]
pub use stl::{to_stl_ascii, to_stl_binary};

use crate::errors::FieldError;

/// Generic I/O and format-conversion errors.
///
/// Most formats are behind cargo feature flags; with a feature disabled the
/// corresponding entry points do not exist.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),

    /// The file parsed but does not describe a valid topology
    #[error("Invalid topology: {0}")]
    Topology(#[from] FieldError),
}
