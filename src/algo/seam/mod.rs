//! Seam matching: hop-shortest paths and curve stitching.
//!
//! A seam joins two open curves of a mesh vertex for vertex. Each curve is
//! the hop-shortest path between two picked vertices in the
//! [`ConnectivityGraph`](crate::algo::connectivity::ConnectivityGraph); the
//! curves can only be stitched when both paths have the same vertex count.
//!
//! # Available Operations
//!
//! - [`bfs`]: hop distances from a source, optionally bounded by a radius
//! - [`bfs_shortest_path`]: one hop-shortest path between two vertices
//! - [`match_seams`]: pair two paths and record seam links on the graph
//!
//! # Example
//!
//! ```
//! use knitmesh::algo::connectivity::build_graph;
//! use knitmesh::algo::seam::match_seams;
//! use knitmesh::mesh::{shapes, VertexId};
//!
//! let mesh = shapes::plane(10, 10).unwrap();
//! let mut graph = build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD);
//!
//! // Stitch the top row onto the bottom row.
//! let seam = match_seams(
//!     &mut graph,
//!     VertexId::new(0),
//!     VertexId::new(10),
//!     VertexId::new(110),
//!     VertexId::new(120),
//! )
//! .unwrap();
//!
//! assert_eq!(seam.len(), 11);
//! assert_eq!(graph.seam_links().len(), 11);
//! assert_eq!(seam.bridge_triangles().len(), 20);
//! ```

mod bfs;
mod matcher;

pub use bfs::{bfs, bfs_shortest_path, BfsOptions};
pub use matcher::{find_seam_match, match_seams, SeamMatch};

use crate::mesh::VertexId;

/// Result of a breadth-first search.
///
/// Holds the hop distance and BFS parent of every vertex the search reached.
#[derive(Debug, Clone)]
pub struct HopResult {
    /// Hop distance from the source. `None` if not reached.
    distances: Vec<Option<usize>>,

    /// BFS parent. `None` for the source and for unreached vertices.
    predecessors: Vec<Option<VertexId>>,
}

impl HopResult {
    pub(crate) fn new(distances: Vec<Option<usize>>, predecessors: Vec<Option<VertexId>>) -> Self {
        Self {
            distances,
            predecessors,
        }
    }

    /// Hop distance to a vertex, if it was reached.
    #[inline]
    pub fn distance(&self, v: VertexId) -> Option<usize> {
        self.distances.get(v.index()).copied().flatten()
    }

    /// Check if a vertex was reached.
    #[inline]
    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distance(v).is_some()
    }

    /// Number of reached vertices, the source included.
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Number of vertices in the searched graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if the searched graph was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Iterate over reached vertices with their hop distances.
    pub fn reached(&self) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (VertexId::new(i), d)))
    }

    /// Walk parent pointers back from `target` to the source.
    ///
    /// Returns `None` if `target` was not reached. The path includes both the
    /// source and the target.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        let hops = self.distance(target)?;

        let mut path = Vec::with_capacity(hops + 1);
        let mut current = target;
        path.push(current);
        while let Some(pred) = self.predecessors[current.index()] {
            path.push(pred);
            current = pred;
        }

        path.reverse();
        debug_assert_eq!(path.len(), hops + 1);
        Some(path)
    }
}
