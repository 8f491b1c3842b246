//! Core mesh data structures.
//!
//! This module provides the indexed triangle mesh snapshot consumed by the
//! connectivity and topology algorithms.
//!
//! # Overview
//!
//! The primary type is [`TriMesh`]: an ordered array of vertex positions and
//! an ordered array of oriented triangles. Vertex identity is the array index
//! and is stable for the lifetime of the mesh. Algorithms in
//! [`crate::algo`] also accept the raw `positions`/`faces` slices directly.
//!
//! # Index Types
//!
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//!
//! # Construction
//!
//! ```
//! use knitmesh::mesh::{build_from_triangles, shapes, TriMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mesh: TriMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let grid: TriMesh = shapes::plane(10, 10).unwrap();
//! ```

mod builder;
mod index;
pub mod shapes;
mod trimesh;

pub use builder::{build_from_triangles, validate_indices};
pub use index::{FaceId, VertexId};
pub use trimesh::TriMesh;
