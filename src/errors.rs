//! Recoverable, data-dependent failures

use std::fmt::Display;

/// All the data-dependent failures an algorithm might report.
///
/// Precondition violations (wrong draw mode, mismatched buffer lengths, indices past
/// the vertex count) are programming errors and panic instead; see the individual
/// algorithm docs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// (ZeroArea) The reference mesh has no surface area to sample from,
    /// either because it has no triangles or every triangle is degenerate
    ZeroArea,
    /// (MissingAttribute) A vertex attribute expected on the mesh was not found,
    /// or was found with a different value type
    MissingAttribute(String),
    /// (AttributeSizeMismatch) A vertex attribute holds a different number of
    /// values than the mesh has vertices
    AttributeSizeMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
    /// (IndexOutOfBounds) A shape references a vertex index past the vertex count
    IndexOutOfBounds {
        shape_index: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::ZeroArea => {
                write!(f, "(ZeroArea) Total triangle area of the mesh is zero")
            },
            GeometryError::MissingAttribute(id) => {
                write!(f, "(MissingAttribute) Vertex attribute '{}' not found on mesh", id)
            },
            GeometryError::AttributeSizeMismatch { id, expected, actual } => write!(
                f,
                "(AttributeSizeMismatch) Vertex attribute '{}' holds {} values, mesh has {} vertices",
                id, actual, expected
            ),
            GeometryError::IndexOutOfBounds { shape_index, index, vertex_count } => write!(
                f,
                "(IndexOutOfBounds) Shape {} references index {}, mesh has {} vertices",
                shape_index, index, vertex_count
            ),
        }
    }
}
