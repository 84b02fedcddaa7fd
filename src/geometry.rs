//! Pure geometry algorithms over a mesh/shape/attribute snapshot.
//!
//! Every function here reads the mesh through the triangle iterators and the
//! vertex attributes by index; none of them touch GPU state or keep caches. The
//! only mutations are the explicit output parameters (normal buffers, index
//! buffers, connectivity maps).

use crate::float_types::{Real, tolerance};
use crate::mesh::{DrawMode, MeshInstance, Shape, VertexAttribute, attr_id};
use crate::triangle::{Triangle, TriangleData};
use nalgebra::{Point3, Vector3};
use std::ops::{Add, Mul};

/// Binds every vertex index to the set of triangular faces that touch it.
/// Built by [`compute_connectivity`]; invalidated by any topology edit.
pub type MeshConnectivityMap = Vec<Vec<Triangle>>;

/// An axis-aligned bounding box.
///
/// The empty box is inverted (`mins` at `MAX`, `maxs` at `-MAX`), so growing it
/// by any point produces that point exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Aabb { mins, maxs }
    }

    pub fn empty() -> Self {
        Aabb {
            mins: Point3::new(Real::MAX, Real::MAX, Real::MAX),
            maxs: Point3::new(-Real::MAX, -Real::MAX, -Real::MAX),
        }
    }

    pub fn grow(&mut self, point: &Point3<Real>) {
        self.mins.x = self.mins.x.min(point.x);
        self.mins.y = self.mins.y.min(point.y);
        self.mins.z = self.mins.z.min(point.z);
        self.maxs.x = self.maxs.x.max(point.x);
        self.maxs.y = self.maxs.y.max(point.y);
        self.maxs.z = self.maxs.z.max(point.z);
    }

    pub fn contains(&self, point: &Point3<Real>) -> bool {
        point.x >= self.mins.x
            && point.x <= self.maxs.x
            && point.y >= self.mins.y
            && point.y <= self.maxs.y
            && point.z >= self.mins.z
            && point.z <= self.maxs.z
    }
}

/// True iff the shape's draw mode is one of TRIANGLES, TRIANGLE_STRIP or TRIANGLE_FAN.
pub const fn is_triangle_shape(shape: &Shape) -> bool {
    shape.draw_mode().is_triangle()
}

/// True when the mesh has shapes and every one of them is triangle-mode.
pub fn is_triangle_mesh(mesh: &MeshInstance) -> bool {
    !mesh.shapes().is_empty() && mesh.shapes().iter().all(is_triangle_shape)
}

/// The number of triangles a single shape encodes; zero for non-triangle modes.
pub fn shape_triangle_count(shape: &Shape) -> usize {
    let len = shape.indices().len();
    match shape.draw_mode() {
        DrawMode::Triangles => len / 3,
        DrawMode::TriangleStrip | DrawMode::TriangleFan => len.saturating_sub(2),
        _ => 0,
    }
}

/// The total number of triangles over all triangle-mode shapes of the mesh.
pub fn triangle_count(mesh: &MeshInstance) -> usize {
    mesh.shapes().iter().map(shape_triangle_count).sum()
}

/// Computes the normal of a triangular face as `cross(p0 - p1, p0 - p2)`.
///
/// The result is intentionally **not** normalized: its magnitude is twice the
/// triangle's area, which is exactly the weight [`compute_normals`] wants when
/// accumulating face normals into shared vertices.
pub fn compute_triangle_normal(vertices: &TriangleData<Point3<Real>>) -> Vector3<Real> {
    let edge1 = vertices.first() - vertices.second();
    let edge2 = vertices.first() - vertices.third();
    edge1.cross(&edge2)
}

/// Recomputes all vertex normals of a triangular mesh.
///
/// Every triangle's unnormalized face normal is added to the normal slot of each
/// of its three vertices, so vertices shared between triangles receive an
/// area-weighted blend. Afterwards every slot is normalized to unit length.
///
/// Degenerate triangles contribute a zero vector. A vertex touched only by
/// degenerate triangles (or by none at all) normalizes to NaN; detecting that is
/// deliberately left to the caller.
///
/// `out_normals` is a caller-owned buffer, typically written back into the mesh
/// afterwards with [`MeshInstance::add_attribute`].
///
/// # Panics
/// Panics when `out_normals` is not the same length as `positions`.
pub fn compute_normals(
    mesh: &MeshInstance,
    positions: &VertexAttribute<Point3<Real>>,
    out_normals: &mut VertexAttribute<Vector3<Real>>,
) {
    assert_eq!(
        positions.len(),
        out_normals.len(),
        "normal buffer must match the position buffer in length"
    );

    for normal in out_normals.data_mut() {
        *normal = Vector3::zeros();
    }

    for triangle in mesh.triangles() {
        let face_normal = compute_triangle_normal(&triangle.vertex_data(positions));
        for index in triangle.indices() {
            out_normals[index as usize] += face_normal;
        }
    }

    for normal in out_normals.data_mut() {
        let _ = normal.normalize_mut();
    }
}

/// Computes the bounding box of a mesh from its position data.
///
/// Indices are not considered: every stored vertex is visited, whether or not a
/// shape references it. An empty mesh yields the inverted [`Aabb::empty`] box.
///
/// # Panics
/// Panics when the mesh has no position attribute.
pub fn compute_bounding_box(mesh: &MeshInstance) -> Aabb {
    let positions = mesh.attribute::<Point3<Real>>(attr_id::POSITION);
    let mut bounds = Aabb::empty();
    for point in positions.data() {
        bounds.grow(point);
    }
    bounds
}

/// Computes the bounding box of a single shape, visiting only the vertices its
/// index buffer references. The shape must belong to the mesh.
///
/// # Panics
/// Panics when the mesh has no position attribute or an index is out of range.
pub fn compute_shape_bounding_box(mesh: &MeshInstance, shape: &Shape) -> Aabb {
    let positions = mesh.attribute::<Point3<Real>>(attr_id::POSITION);
    let mut bounds = Aabb::empty();
    for &index in shape.indices() {
        bounds.grow(&positions[index as usize]);
    }
    bounds
}

/// Reverses the winding order of every triangle in every triangle-mode shape:
/// a triangle with vertices A, B, C reads back as C, B, A afterwards.
///
/// The rewrite happens in place, per draw mode:
/// - list: the first and third slot of each 3-index group are swapped
/// - fan: the buffer behind the shared fan start is reversed
/// - strip: the whole buffer is reversed
///
/// Applying the call twice restores every index buffer exactly. Iterators and
/// connectivity maps built before the call are invalid afterwards.
///
/// # Panics
/// Panics when the mesh has no indices.
pub fn reverse_winding_order(mesh: &mut MeshInstance) {
    assert!(
        mesh.has_indices(),
        "winding reversal requires an indexed mesh"
    );
    for shape in mesh.shapes_mut() {
        match shape.draw_mode() {
            DrawMode::Triangles => {
                for group in shape.indices_mut().chunks_exact_mut(3) {
                    group.swap(0, 2);
                }
            },
            DrawMode::TriangleFan => {
                let indices = shape.indices_mut();
                if indices.len() > 1 {
                    indices[1..].reverse();
                }
            },
            DrawMode::TriangleStrip => {
                shape.indices_mut().reverse();
            },
            _ => {},
        }
    }
}

/// Replaces the shape's index buffer with the sequential range
/// `[offset, offset + vertex_count)`. With `closed` set, one extra index equal to
/// `offset` is appended, closing a line loop.
///
/// This is how a mesh without authored indices receives its identity index
/// buffer before the other algorithms run.
pub fn generate_indices(shape: &mut Shape, vertex_count: usize, closed: bool, offset: u32) {
    let mut indices = Vec::with_capacity(vertex_count + closed as usize);
    indices.extend(offset..offset + vertex_count as u32);
    if closed {
        indices.push(offset);
    }
    shape.set_indices(indices);
}

/// Builds the map that binds every vertex index to its incident triangles.
///
/// The map is cleared, resized to the mesh's vertex count and populated in one
/// pass over all triangles. This is an O(triangles) operation with no
/// incremental update; build it for tooling queries, not per frame, and rebuild
/// after any topology edit.
///
/// # Panics
/// Panics when the mesh has no indices.
pub fn compute_connectivity(mesh: &MeshInstance, out_connectivity_map: &mut MeshConnectivityMap) {
    assert!(
        mesh.has_indices(),
        "connectivity requires an indexed mesh"
    );
    out_connectivity_map.clear();
    out_connectivity_map.resize(mesh.vertex_count(), Vec::new());
    for triangle in mesh.triangles() {
        for index in triangle.indices() {
            out_connectivity_map[index as usize].push(triangle);
        }
    }
}

/// The surface area of a triangle: half the magnitude of its cross-product
/// normal. Degenerate (collinear or coincident) triangles have zero area.
pub fn compute_triangle_area(vertices: &TriangleData<Point3<Real>>) -> Real {
    compute_triangle_normal(vertices).norm() * 0.5
}

/// Computes the area of every triangle in the mesh into `out_areas` and returns
/// the total. The mesh is expected to carry position data in `positions`.
pub fn compute_area(
    mesh: &MeshInstance,
    positions: &VertexAttribute<Point3<Real>>,
    out_areas: &mut Vec<Real>,
) -> Real {
    out_areas.clear();
    let mut total = 0.0;
    for triangle in mesh.triangles() {
        let area = compute_triangle_area(&triangle.vertex_data(positions));
        out_areas.push(area);
        total += area;
    }
    total
}

/// Ray/triangle intersection after Möller–Trumbore.
///
/// Back-facing triangles are never reported: a triangle whose normal points the
/// same way as the ray is rejected before the barycentric solve, making the test
/// asymmetric with respect to winding. Rays parallel to the triangle plane
/// (|det| below [`tolerance`](crate::float_types::tolerance)) and hits at or
/// behind the ray origin are rejected as well.
///
/// Returns the intersection point. Callers that need barycentric coordinates at
/// the hit use [`compute_barycentric`] on the returned point.
pub fn intersect(
    ray_origin: &Point3<Real>,
    ray_direction: &Vector3<Real>,
    vertices: &TriangleData<Point3<Real>>,
) -> Option<Point3<Real>> {
    let epsilon = tolerance();
    let edge1 = vertices.second() - vertices.first();
    let edge2 = vertices.third() - vertices.first();

    // Cull triangles facing away from the ray
    if edge1.cross(&edge2).dot(ray_direction) > 0.0 {
        return None;
    }

    let h = ray_direction.cross(&edge2);
    let det = edge1.dot(&h);
    if det.abs() < epsilon {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray_origin - vertices.first();
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * ray_direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    // Hit must lie strictly in front of the ray origin
    let t = inv_det * edge2.dot(&q);
    if t <= epsilon {
        return None;
    }
    Some(ray_origin + ray_direction * t)
}

/// Computes the barycentric coordinates of a point with respect to a triangle.
///
/// Returns `(u, v, w)` where `u` weights the second vertex, `v` the third and
/// `w = 1 - u - v` the first, matching [`interpolate_vertex_attr`].
pub fn compute_barycentric(
    point: &Point3<Real>,
    triangle: &TriangleData<Point3<Real>>,
) -> Vector3<Real> {
    let edge1 = triangle.second() - triangle.first();
    let edge2 = triangle.third() - triangle.first();
    let to_point = point - triangle.first();

    let d00 = edge1.dot(&edge1);
    let d01 = edge1.dot(&edge2);
    let d11 = edge2.dot(&edge2);
    let d20 = to_point.dot(&edge1);
    let d21 = to_point.dot(&edge2);
    let denominator = d00 * d11 - d01 * d01;

    let u = (d11 * d20 - d01 * d21) / denominator;
    let v = (d00 * d21 - d01 * d20) / denominator;
    Vector3::new(u, v, 1.0 - u - v)
}

/// Interpolates triangle vertex values with barycentric coordinates:
/// `v0 * (1 - u - v) + v1 * u + v2 * v`, with `u = coords.x` and `v = coords.y`.
///
/// Works for any vector-valued attribute (normals, UVs, colors); positions are
/// affine points and go through [`interpolate_position`] instead.
pub fn interpolate_vertex_attr<T>(values: &TriangleData<T>, coords: &Vector3<Real>) -> T
where
    T: Copy + Add<Output = T> + Mul<Real, Output = T>,
{
    *values.first() * (1.0 - coords.x - coords.y)
        + *values.second() * coords.x
        + *values.third() * coords.y
}

/// Barycentric interpolation of triangle vertex positions.
pub fn interpolate_position(
    values: &TriangleData<Point3<Real>>,
    coords: &Vector3<Real>,
) -> Point3<Real> {
    Point3::from(
        values.first().coords * (1.0 - coords.x - coords.y)
            + values.second().coords * coords.x
            + values.third().coords * coords.y,
    )
}
