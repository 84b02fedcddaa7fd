//! Mesh data model: draw modes, shapes, vertex attributes and the mesh instance

use crate::errors::GeometryError;
use crate::triangle::MeshTriangles;
use std::any::Any;
use std::fmt::Debug;

/// Ids of the vertex attributes every generator and sampler agrees on.
pub mod attr_id {
    /// Vertex position, stored as `Point3<Real>`
    pub const POSITION: &str = "Position";
    /// Vertex normal, stored as `Vector3<Real>`
    pub const NORMAL: &str = "Normal";

    /// Id of UV channel `channel`, e.g. `"UV0"`
    pub fn uv(channel: usize) -> String {
        format!("UV{}", channel)
    }

    /// Id of color channel `channel`, e.g. `"Color0"`
    pub fn color(channel: usize) -> String {
        format!("Color{}", channel)
    }
}

/// Topology interpretation of a shape's index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    #[default]
    Unknown,
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl DrawMode {
    /// True for the three triangle encodings; everything else is rejected by
    /// triangle-processing code.
    pub const fn is_triangle(self) -> bool {
        matches!(
            self,
            DrawMode::Triangles | DrawMode::TriangleStrip | DrawMode::TriangleFan
        )
    }
}

/// One topology unit inside a mesh: a draw mode plus an ordered index buffer.
///
/// An empty index buffer means the shape has not been indexed yet; use
/// [`generate_indices`](crate::geometry::generate_indices) to synthesize the
/// sequential identity range before running algorithms that require indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shape {
    draw_mode: DrawMode,
    indices: Vec<u32>,
}

impl Shape {
    pub const fn new(draw_mode: DrawMode) -> Self {
        Shape {
            draw_mode,
            indices: Vec::new(),
        }
    }

    pub fn with_indices(draw_mode: DrawMode, indices: Vec<u32>) -> Self {
        Shape { draw_mode, indices }
    }

    pub const fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, draw_mode: DrawMode) {
        self.draw_mode = draw_mode;
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Mutable access to the index buffer. Editing topology invalidates any
    /// connectivity map built from it; iterators cannot outlive the borrow.
    pub fn indices_mut(&mut self) -> &mut Vec<u32> {
        &mut self.indices
    }

    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = indices;
    }

    pub fn has_indices(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Iterate the triangles encoded by this shape's index buffer.
    ///
    /// # Panics
    /// Panics if the draw mode is not one of the three triangle modes; check with
    /// [`DrawMode::is_triangle`] first when the mode is data-driven.
    pub fn triangles(&self) -> crate::triangle::ShapeTriangles<'_> {
        crate::triangle::ShapeTriangles::new(self)
    }
}

/// A typed, named array of per-vertex values (position, normal, UV, color, ...).
///
/// After any successful mesh update `data.len()` equals the owning mesh's vertex
/// count; [`MeshInstance::validate`] reports violations explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute<T> {
    id: String,
    data: Vec<T>,
}

impl<T> VertexAttribute<T> {
    pub fn new(id: impl Into<String>, data: Vec<T>) -> Self {
        VertexAttribute {
            id: id.into(),
            data,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Vec<T> {
        &mut self.data
    }

    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> std::ops::Index<usize> for VertexAttribute<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> std::ops::IndexMut<usize> for VertexAttribute<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

/// Object-safe view over a [`VertexAttribute`] of any value type, so a mesh can
/// own a heterogeneous attribute set and hand out typed borrows on access.
trait AnyAttribute: Any {
    fn id(&self) -> &str;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyAttribute for VertexAttribute<T> {
    fn id(&self) -> &str {
        VertexAttribute::id(self)
    }

    fn len(&self) -> usize {
        VertexAttribute::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// CPU-side mesh data: a vertex count, the per-vertex attribute set and the
/// shapes drawn from it.
///
/// The instance only stores data; pushing it to GPU-resident buffers is the
/// owner's concern and happens outside this crate.
#[derive(Default)]
pub struct MeshInstance {
    vertex_count: usize,
    shapes: Vec<Shape>,
    attributes: Vec<Box<dyn AnyAttribute>>,
}

impl MeshInstance {
    pub fn new() -> Self {
        MeshInstance::default()
    }

    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn set_vertex_count(&mut self, count: usize) {
        self.vertex_count = count;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Appends a new shape and returns a mutable reference for population.
    pub fn create_shape(&mut self, draw_mode: DrawMode) -> &mut Shape {
        self.shapes.push(Shape::new(draw_mode));
        self.shapes.last_mut().expect("shape was just pushed")
    }

    /// Adds an attribute, replacing any existing attribute with the same id.
    pub fn add_attribute<T: 'static>(&mut self, attribute: VertexAttribute<T>) {
        if let Some(position) = self.attributes.iter().position(|a| a.id() == attribute.id()) {
            self.attributes[position] = Box::new(attribute);
        } else {
            self.attributes.push(Box::new(attribute));
        }
    }

    /// Returns the attribute with the given id, creating an empty one when absent.
    ///
    /// # Panics
    /// Panics when an attribute with this id exists but holds a different value type.
    pub fn get_or_create_attribute<T: 'static>(&mut self, id: &str) -> &mut VertexAttribute<T> {
        let position = match self.attributes.iter().position(|a| a.id() == id) {
            Some(position) => position,
            None => {
                self.attributes
                    .push(Box::new(VertexAttribute::<T>::new(id, Vec::new())));
                self.attributes.len() - 1
            },
        };
        self.attributes[position]
            .as_any_mut()
            .downcast_mut::<VertexAttribute<T>>()
            .unwrap_or_else(|| panic!("attribute '{}' exists with a different value type", id))
    }

    /// Looks up an attribute by id and value type.
    pub fn find_attribute<T: 'static>(&self, id: &str) -> Option<&VertexAttribute<T>> {
        self.attributes
            .iter()
            .find(|a| a.id() == id)
            .and_then(|a| a.as_any().downcast_ref::<VertexAttribute<T>>())
    }

    pub fn find_attribute_mut<T: 'static>(&mut self, id: &str) -> Option<&mut VertexAttribute<T>> {
        self.attributes
            .iter_mut()
            .find(|a| a.id() == id)
            .and_then(|a| a.as_any_mut().downcast_mut::<VertexAttribute<T>>())
    }

    /// Like [`find_attribute`](Self::find_attribute) but asserts presence; use for
    /// attributes the mesh is known to carry.
    ///
    /// # Panics
    /// Panics when the attribute is missing or holds a different value type.
    pub fn attribute<T: 'static>(&self, id: &str) -> &VertexAttribute<T> {
        self.find_attribute(id)
            .unwrap_or_else(|| panic!("mesh has no '{}' attribute of the requested type", id))
    }

    /// True when the mesh has shapes and every shape carries an index buffer.
    pub fn has_indices(&self) -> bool {
        !self.shapes.is_empty() && self.shapes.iter().all(Shape::has_indices)
    }

    /// Checks the attribute-length and index-range invariants.
    ///
    /// Owners call this after populating or editing mesh data, before handing the
    /// mesh to the algorithms in [`geometry`](crate::geometry) and
    /// [`sampling`](crate::sampling); those trust their inputs.
    pub fn validate(&self) -> Result<(), GeometryError> {
        for attribute in &self.attributes {
            if attribute.len() != self.vertex_count {
                return Err(GeometryError::AttributeSizeMismatch {
                    id: attribute.id().to_string(),
                    expected: self.vertex_count,
                    actual: attribute.len(),
                });
            }
        }
        for (shape_index, shape) in self.shapes.iter().enumerate() {
            if let Some(&index) = shape.indices().iter().find(|&&i| i as usize >= self.vertex_count) {
                return Err(GeometryError::IndexOutOfBounds {
                    shape_index,
                    index,
                    vertex_count: self.vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Iterate every triangle of every triangle-mode shape as one lazy sequence.
    /// Shapes with other draw modes are skipped; a mesh without triangle shapes
    /// yields an immediately empty sequence.
    pub fn triangles(&self) -> MeshTriangles<'_> {
        MeshTriangles::new(self)
    }
}

impl Debug for MeshInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshInstance")
            .field("vertex_count", &self.vertex_count)
            .field("shapes", &self.shapes)
            .field(
                "attributes",
                &self.attributes.iter().map(|a| a.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
