//! Surface-area-weighted random point scattering.
//!
//! The sampler turns the triangle iterator and the geometry utilities into a
//! mesh-generation feature: pick a triangle with probability proportional to its
//! area, pick a uniform point inside it, and interpolate every attribute the
//! reference mesh carries at that point.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::geometry::{
    compute_triangle_area, generate_indices, interpolate_position, interpolate_vertex_attr,
    triangle_count,
};
use crate::mesh::{DrawMode, MeshInstance, VertexAttribute, attr_id};
use crate::triangle::Triangle;
use nalgebra::{Point3, Vector3, Vector4};
use rand::Rng;
use rand::distributions::Standard;

/// An ordered mapping from ascending cumulative area to the triangle that ends
/// at that boundary. Built fresh per sampling session; the total surface area is
/// the last key.
#[derive(Debug, Clone)]
pub struct CumulativeAreaMap {
    entries: Vec<(Real, Triangle)>,
}

impl CumulativeAreaMap {
    /// Accumulates [`compute_triangle_area`] over every triangle of the mesh.
    ///
    /// Fails with [`GeometryError::ZeroArea`] when the total is not strictly
    /// positive — a mesh with no triangle shapes, or one where every triangle is
    /// degenerate, cannot be sampled.
    pub fn build(
        mesh: &MeshInstance,
        positions: &VertexAttribute<Point3<Real>>,
    ) -> Result<Self, GeometryError> {
        let mut entries = Vec::with_capacity(triangle_count(mesh));
        let mut running_total = 0.0;
        for triangle in mesh.triangles() {
            running_total += compute_triangle_area(&triangle.vertex_data(positions));
            entries.push((running_total, triangle));
        }
        if running_total <= 0.0 {
            return Err(GeometryError::ZeroArea);
        }
        Ok(CumulativeAreaMap { entries })
    }

    /// The total surface area of the mapped mesh.
    pub fn total_area(&self) -> Real {
        self.entries.last().map_or(0.0, |(key, _)| *key)
    }

    /// Selects the triangle for a draw in `[0, total_area())`.
    ///
    /// Lower-bound lookup with a fixed tie rule: a draw exactly equal to a
    /// cumulative boundary selects the *later* triangle. Zero-area triangles
    /// share their boundary with the previous entry and therefore never win.
    pub fn select(&self, value: Real) -> &Triangle {
        let position = self.entries.partition_point(|(key, _)| *key <= value);
        let position = position.min(self.entries.len() - 1);
        &self.entries[position].1
    }
}

/// Scatters `count` points uniformly across the surface of `reference`, each
/// fully attributed by barycentric interpolation from the triangle it lands in.
///
/// The reference mesh must carry a position attribute; its normal attribute and
/// every `UV{n}` / `Color{n}` channel found next to it are interpolated into the
/// result as well. The returned mesh holds `count` vertices and a single
/// [`DrawMode::Points`] shape with sequential indices.
///
/// Randomness comes from the caller's generator, so tests can seed it for
/// reproducible distributions.
///
/// Fails with [`GeometryError::MissingAttribute`] when an expected channel does
/// not resolve, and with [`GeometryError::ZeroArea`] for a degenerate or empty
/// reference mesh; nothing is written in either case.
pub fn scatter_points<R: Rng + ?Sized>(
    reference: &MeshInstance,
    count: usize,
    rng: &mut R,
) -> Result<MeshInstance, GeometryError> {
    let positions = reference
        .find_attribute::<Point3<Real>>(attr_id::POSITION)
        .ok_or_else(|| GeometryError::MissingAttribute(attr_id::POSITION.to_string()))?;
    let normals = reference.find_attribute::<Vector3<Real>>(attr_id::NORMAL);

    // Every channel detected here must resolve, or the whole operation fails.
    let mut uv_channels: Vec<(String, &VertexAttribute<Vector3<Real>>)> = Vec::new();
    loop {
        let id = attr_id::uv(uv_channels.len());
        match reference.find_attribute::<Vector3<Real>>(&id) {
            Some(attribute) => uv_channels.push((id, attribute)),
            None => break,
        }
    }
    let mut color_channels: Vec<(String, &VertexAttribute<Vector4<Real>>)> = Vec::new();
    loop {
        let id = attr_id::color(color_channels.len());
        match reference.find_attribute::<Vector4<Real>>(&id) {
            Some(attribute) => color_channels.push((id, attribute)),
            None => break,
        }
    }

    let area_map = CumulativeAreaMap::build(reference, positions)?;
    let total_area = area_map.total_area();

    let mut out_positions = Vec::with_capacity(count);
    let mut out_normals = normals.map(|_| Vec::with_capacity(count));
    let mut out_uvs: Vec<Vec<Vector3<Real>>> =
        uv_channels.iter().map(|_| Vec::with_capacity(count)).collect();
    let mut out_colors: Vec<Vec<Vector4<Real>>> =
        color_channels.iter().map(|_| Vec::with_capacity(count)).collect();

    for _ in 0..count {
        let draw: Real = rng.sample(Standard);
        let triangle = area_map.select(draw * total_area);

        // Uniform point in the unit triangle: fold samples past the diagonal back
        let mut u: Real = rng.sample(Standard);
        let mut v: Real = rng.sample(Standard);
        if u + v >= 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        let coordinates = Vector3::new(u, v, 1.0 - u - v);

        out_positions.push(interpolate_position(
            &triangle.vertex_data(positions),
            &coordinates,
        ));
        if let (Some(attribute), Some(out)) = (normals, out_normals.as_mut()) {
            out.push(interpolate_vertex_attr(
                &triangle.vertex_data(attribute),
                &coordinates,
            ));
        }
        for ((_, attribute), out) in uv_channels.iter().zip(out_uvs.iter_mut()) {
            out.push(interpolate_vertex_attr(
                &triangle.vertex_data(attribute),
                &coordinates,
            ));
        }
        for ((_, attribute), out) in color_channels.iter().zip(out_colors.iter_mut()) {
            out.push(interpolate_vertex_attr(
                &triangle.vertex_data(attribute),
                &coordinates,
            ));
        }
    }

    let mut scattered = MeshInstance::new();
    scattered.set_vertex_count(count);
    let shape = scattered.create_shape(DrawMode::Points);
    generate_indices(shape, count, false, 0);
    scattered.add_attribute(VertexAttribute::new(attr_id::POSITION, out_positions));
    if let Some(data) = out_normals {
        scattered.add_attribute(VertexAttribute::new(attr_id::NORMAL, data));
    }
    for ((id, _), data) in uv_channels.into_iter().zip(out_uvs) {
        scattered.add_attribute(VertexAttribute::new(id, data));
    }
    for ((id, _), data) in color_channels.into_iter().zip(out_colors) {
        scattered.add_attribute(VertexAttribute::new(id, data));
    }
    Ok(scattered)
}
