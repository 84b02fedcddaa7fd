//! Triangle views over shape index buffers, and the iterators that produce them.
//!
//! A shape encodes its triangles as a list (three indices per triangle), a fan
//! (first index shared by every triangle) or a strip (overlapping three-index
//! windows). [`ShapeTriangles`] walks one shape with the strategy its draw mode
//! implies; [`MeshTriangles`] concatenates every triangle-mode shape of a mesh
//! into a single sequence.
//!
//! Both are lazy, forward-only and non-restartable: construct a new iterator to
//! walk the mesh again. They borrow the mesh read-only, so the borrow checker
//! enforces the invalidation rule — topology edits require re-creation.

use crate::mesh::{DrawMode, MeshInstance, Shape, VertexAttribute};

/// Per-vertex values of one triangle: a read view constructed on demand from a
/// [`VertexAttribute`], not owned mesh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriangleData<T> {
    data: [T; 3],
}

impl<T> TriangleData<T> {
    pub const fn new(first: T, second: T, third: T) -> Self {
        TriangleData {
            data: [first, second, third],
        }
    }

    /// The value belonging to the first vertex of the triangle
    pub const fn first(&self) -> &T {
        &self.data[0]
    }

    /// The value belonging to the second vertex of the triangle
    pub const fn second(&self) -> &T {
        &self.data[1]
    }

    /// The value belonging to the third vertex of the triangle
    pub const fn third(&self) -> &T {
        &self.data[2]
    }
}

impl<T> std::ops::Index<usize> for TriangleData<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> std::ops::IndexMut<usize> for TriangleData<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> From<[T; 3]> for TriangleData<T> {
    fn from(data: [T; 3]) -> Self {
        TriangleData { data }
    }
}

/// The three vertex indices of one triangle inside a single shape, plus the
/// triangle's position in that shape's sequence. A value type; never owns data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeTriangle {
    triangle_index: usize,
    indices: [u32; 3],
}

impl ShapeTriangle {
    pub const fn new(triangle_index: usize, indices: [u32; 3]) -> Self {
        ShapeTriangle {
            triangle_index,
            indices,
        }
    }

    /// The index of the triangle in the shape
    pub const fn triangle_index(&self) -> usize {
        self.triangle_index
    }

    /// The vertex indices of this triangle
    pub const fn indices(&self) -> [u32; 3] {
        self.indices
    }

    pub const fn first_index(&self) -> u32 {
        self.indices[0]
    }

    pub const fn second_index(&self) -> u32 {
        self.indices[1]
    }

    pub const fn third_index(&self) -> u32 {
        self.indices[2]
    }

    /// Reads the triangle's three values of a vertex attribute, for example its
    /// positions, normals or colors.
    pub fn vertex_data<T: Clone>(&self, attribute: &VertexAttribute<T>) -> TriangleData<T> {
        TriangleData::new(
            attribute[self.indices[0] as usize].clone(),
            attribute[self.indices[1] as usize].clone(),
            attribute[self.indices[2] as usize].clone(),
        )
    }

    /// Writes a value to each of the triangle's three vertex slots of an attribute.
    pub fn set_vertex_data<T: Clone>(
        &self,
        attribute: &mut VertexAttribute<T>,
        data: TriangleData<T>,
    ) {
        attribute[self.indices[0] as usize] = data.first().clone();
        attribute[self.indices[1] as usize] = data.second().clone();
        attribute[self.indices[2] as usize] = data.third().clone();
    }
}

/// A [`ShapeTriangle`] tagged with the index of the mesh shape it came from.
/// Produced only by [`MeshTriangles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    shape_index: usize,
    shape_triangle: ShapeTriangle,
}

impl Triangle {
    pub(crate) const fn new(shape_index: usize, shape_triangle: ShapeTriangle) -> Self {
        Triangle {
            shape_index,
            shape_triangle,
        }
    }

    /// The index of the shape within the mesh this triangle belongs to
    pub const fn shape_index(&self) -> usize {
        self.shape_index
    }

    pub const fn triangle_index(&self) -> usize {
        self.shape_triangle.triangle_index()
    }

    pub const fn indices(&self) -> [u32; 3] {
        self.shape_triangle.indices()
    }

    pub const fn first_index(&self) -> u32 {
        self.shape_triangle.first_index()
    }

    pub const fn second_index(&self) -> u32 {
        self.shape_triangle.second_index()
    }

    pub const fn third_index(&self) -> u32 {
        self.shape_triangle.third_index()
    }

    pub fn vertex_data<T: Clone>(&self, attribute: &VertexAttribute<T>) -> TriangleData<T> {
        self.shape_triangle.vertex_data(attribute)
    }

    pub fn set_vertex_data<T: Clone>(
        &self,
        attribute: &mut VertexAttribute<T>,
        data: TriangleData<T>,
    ) {
        self.shape_triangle.set_vertex_data(attribute, data)
    }
}

/// Index-walking strategy, fixed by the shape's draw mode at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Three indices per triangle, step 3
    List,
    /// First index shared by every triangle, step 1
    Fan,
    /// Overlapping three-index windows, step 1
    Strip,
}

/// Iterates the triangles encoded by one shape's index buffer.
///
/// Trailing indices that do not complete a triangle are ignored; a buffer with
/// fewer indices than one triangle needs yields nothing.
#[derive(Debug, Clone)]
pub struct ShapeTriangles<'a> {
    indices: &'a [u32],
    strategy: Strategy,
    /// Position of the next triangle's window in the index buffer
    cursor: usize,
    triangle_index: usize,
}

impl<'a> ShapeTriangles<'a> {
    /// # Panics
    /// Constructing from a shape whose draw mode is not a triangle mode is a
    /// programming error and panics.
    pub fn new(shape: &'a Shape) -> Self {
        let strategy = match shape.draw_mode() {
            DrawMode::Triangles => Strategy::List,
            DrawMode::TriangleFan => Strategy::Fan,
            DrawMode::TriangleStrip => Strategy::Strip,
            mode => panic!("cannot iterate triangles of a {:?} shape", mode),
        };
        ShapeTriangles {
            indices: shape.indices(),
            strategy,
            // The fan start lives at index 0 and is never part of the window
            cursor: match strategy {
                Strategy::Fan => 1,
                _ => 0,
            },
            triangle_index: 0,
        }
    }

    /// Triangles left to yield, derived purely from draw mode and buffer length.
    fn remaining(&self) -> usize {
        match self.strategy {
            Strategy::List => self.indices.len().saturating_sub(self.cursor) / 3,
            Strategy::Fan => self.indices.len().saturating_sub(self.cursor + 1),
            Strategy::Strip => self.indices.len().saturating_sub(self.cursor + 2),
        }
    }
}

impl Iterator for ShapeTriangles<'_> {
    type Item = ShapeTriangle;

    fn next(&mut self) -> Option<ShapeTriangle> {
        if self.remaining() == 0 {
            return None;
        }
        let cursor = self.cursor;
        let indices = match self.strategy {
            Strategy::List => {
                self.cursor += 3;
                [
                    self.indices[cursor],
                    self.indices[cursor + 1],
                    self.indices[cursor + 2],
                ]
            },
            Strategy::Fan => {
                self.cursor += 1;
                [
                    self.indices[0],
                    self.indices[cursor],
                    self.indices[cursor + 1],
                ]
            },
            Strategy::Strip => {
                self.cursor += 1;
                [
                    self.indices[cursor],
                    self.indices[cursor + 1],
                    self.indices[cursor + 2],
                ]
            },
        };
        let triangle = ShapeTriangle::new(self.triangle_index, indices);
        self.triangle_index += 1;
        Some(triangle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ShapeTriangles<'_> {}

/// Iterates all triangles of all triangle-mode shapes in a mesh as one linear
/// sequence, tagging each with its shape index. Shapes with other draw modes are
/// skipped; a mesh without any triangle-mode shape is immediately exhausted,
/// which is a valid state rather than an error.
#[derive(Debug, Clone)]
pub struct MeshTriangles<'a> {
    mesh: &'a MeshInstance,
    /// Index of the shape `current` walks; past the end once exhausted
    shape_index: usize,
    current: Option<ShapeTriangles<'a>>,
}

impl<'a> MeshTriangles<'a> {
    pub const fn new(mesh: &'a MeshInstance) -> Self {
        MeshTriangles {
            mesh,
            shape_index: 0,
            current: None,
        }
    }
}

impl Iterator for MeshTriangles<'_> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        loop {
            if let Some(iterator) = &mut self.current {
                if let Some(shape_triangle) = iterator.next() {
                    return Some(Triangle::new(self.shape_index, shape_triangle));
                }
                self.current = None;
                self.shape_index += 1;
            }
            let shapes = self.mesh.shapes();
            while self.shape_index < shapes.len()
                && !shapes[self.shape_index].draw_mode().is_triangle()
            {
                self.shape_index += 1;
            }
            if self.shape_index >= shapes.len() {
                return None;
            }
            self.current = Some(shapes[self.shape_index].triangles());
        }
    }
}
