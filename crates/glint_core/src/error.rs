//! Construction-time validation errors.

use thiserror::Error;

/// Rejected triangle-mesh topology.
///
/// Raised when a mesh is built, never during rendering: queries assume the
/// index buffer was validated up front.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}
