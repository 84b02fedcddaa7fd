#![allow(dead_code)]

//! Shared mesh builders for the integration tests.

use meshtri::float_types::Real;
use meshtri::mesh::{DrawMode, MeshInstance, VertexAttribute, attr_id};
use nalgebra::Point3;

/// Mesh with the given positions and no shapes.
pub fn mesh_with_positions(positions: Vec<Point3<Real>>) -> MeshInstance {
    let mut mesh = MeshInstance::new();
    mesh.set_vertex_count(positions.len());
    mesh.add_attribute(VertexAttribute::new(attr_id::POSITION, positions));
    mesh
}

/// Mesh with one indexed shape of the given draw mode.
pub fn shape_mesh(
    draw_mode: DrawMode,
    positions: Vec<Point3<Real>>,
    indices: Vec<u32>,
) -> MeshInstance {
    let mut mesh = mesh_with_positions(positions);
    mesh.create_shape(draw_mode).set_indices(indices);
    mesh
}

/// A closed tetrahedron as a triangle list, outward winding.
pub fn tetrahedron() -> MeshInstance {
    let positions = vec![
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
    ];
    shape_mesh(
        DrawMode::Triangles,
        positions,
        vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
    )
}

/// Two disjoint triangles in the z = 0 plane with a 1:3 area ratio. The larger
/// triangle lies entirely at x >= 10.
pub fn unequal_triangle_pair() -> MeshInstance {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(13.0, 0.0, 0.0),
        Point3::new(10.0, 2.0, 0.0),
    ];
    shape_mesh(DrawMode::Triangles, positions, vec![0, 1, 2, 3, 4, 5])
}
