//! # Knitmesh
//!
//! Topology and connectivity engine for interactive seam stitching on
//! triangle meshes.
//!
//! Knitmesh turns a mesh snapshot (vertex positions plus triangles) into a
//! spring graph for a force-layout solver, stitches pairs of curves on that
//! graph into seams, and reports the mesh's Betti numbers.
//!
//! ## Features
//!
//! - **Disjoint sets**: union-find over arbitrary hashable keys
//! - **Connectivity graph**: adjacency with rest lengths and a squared-distance cutoff
//! - **Seam matching**: hop-shortest paths paired index by index
//! - **Betti numbers**: `(b0, b1, b2)` for non-manifold triangle soups
//! - **Editing session**: [`editor::SeamEditor`] ties the pieces together
//!
//! ## Quick Start
//!
//! ```
//! use knitmesh::prelude::*;
//!
//! let mesh = shapes::plane(10, 10).unwrap();
//! let graph = build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD);
//! assert_eq!(graph.num_edges(), 220);
//!
//! let betti = compute_betti(mesh.positions(), mesh.faces()).unwrap();
//! assert_eq!(betti.as_tuple(), (1, 0, 0));
//! ```
//!
//! ## Stitching Seams
//!
//! ```
//! use knitmesh::prelude::*;
//!
//! let mesh = shapes::plane(10, 10).unwrap();
//! let mut graph = build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD);
//!
//! // Top row onto bottom row.
//! let seam = match_seams(
//!     &mut graph,
//!     VertexId::new(0),
//!     VertexId::new(10),
//!     VertexId::new(110),
//!     VertexId::new(120),
//! )
//! .unwrap();
//! assert_eq!(seam.len(), 11);
//! assert_eq!(graph.seam_links().len(), 11);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod editor;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use knitmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        analyze, bfs, bfs_shortest_path, build_graph, compute_betti, match_seams, BettiNumbers,
        BfsOptions, ConnectivityGraph, DisjointSet, GraphOptions, HopResult, SeamMatch,
    };
    pub use crate::editor::{EditorOptions, SeamEditor};
    pub use crate::error::{MeshError, Result, SeamError};
    pub use crate::mesh::{build_from_triangles, shapes, FaceId, TriMesh, VertexId};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mesh = build_from_triangles(&vertices, &faces).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);

        // Every pair of corners is an edge.
        let graph = build_graph(mesh.positions(), mesh.faces(), f64::INFINITY);
        assert_eq!(graph.num_edges(), 6);
        assert!(graph.is_valid());

        let betti = compute_betti(mesh.positions(), mesh.faces()).unwrap();
        assert_eq!(betti.as_tuple(), (1, 0, 1));
        assert_eq!(betti.euler_characteristic(), 2);
    }
}
