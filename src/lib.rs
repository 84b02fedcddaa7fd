//! A triangle-topology abstraction and geometry-processing library for indexed meshes.
//!
//! A [`MeshInstance`](mesh::MeshInstance) owns a set of named vertex attributes and one
//! or more [`Shape`](mesh::Shape)s, each pairing a draw mode with an index buffer.
//! The iterator layer ([`triangle`]) presents every triangle-encoded shape — triangle
//! list, fan, or strip — as one lazy sequence of index triples, and the algorithms in
//! [`geometry`] and [`sampling`] are built on top of that sequence:
//!
//! - normal recomputation with area-weighted accumulation over shared vertices
//! - bounding-box computation (whole mesh or per shape)
//! - connectivity-map construction (vertex index → incident triangles)
//! - winding-order reversal and sequential index generation
//! - ray/triangle intersection (Möller–Trumbore, back-face culled)
//! - barycentric coordinates and vertex-attribute interpolation
//! - surface-area-weighted random point scattering
//!
//! # Features
//! - **f64**: use f64 as Real (default)
//! - **f32**: use f32 as Real, conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod mesh;
pub mod sampling;
pub mod triangle;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::GeometryError;
pub use mesh::{DrawMode, MeshInstance, Shape, VertexAttribute};
pub use triangle::{MeshTriangles, ShapeTriangle, ShapeTriangles, Triangle, TriangleData};
