//! Filtered vertex-adjacency graph.
//!
//! The connectivity graph is the spring network handed to an external
//! force-layout solver: one undirected edge per triangle side, weighted by the
//! edge's rest length in the snapshot the graph was built from.
//!
//! A squared-distance threshold rejects edges whose endpoints are adjacent in
//! index space but far apart in space. Generated grids produce such edges at
//! their wrap-around boundaries; the threshold removes them with a purely
//! local test.
//!
//! # Example
//!
//! ```
//! use knitmesh::algo::connectivity::{ConnectivityGraph, GraphOptions};
//! use knitmesh::mesh::{shapes, VertexId};
//!
//! let mesh = shapes::plane(4, 4).unwrap();
//! let options = GraphOptions::default().with_threshold(shapes::PLANE_THRESHOLD);
//! let graph = ConnectivityGraph::build(mesh.positions(), mesh.faces(), &options);
//!
//! // Only the axis-aligned lattice survives: 2 * 4 * 5 edges.
//! assert_eq!(graph.num_edges(), 40);
//! assert_eq!(graph.degree(VertexId::new(0)), 2);
//! ```

use std::collections::BTreeMap;

use nalgebra::Point3;

use crate::mesh::VertexId;

/// Options for graph extraction.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Squared-distance cutoff. Edges with `dist² >= threshold` are rejected.
    /// `f64::INFINITY` keeps every edge.
    pub threshold: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            threshold: f64::INFINITY,
        }
    }
}

impl GraphOptions {
    /// Set the squared-distance cutoff.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Per-edge data stored on both directions of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    /// Edge length when the edge was first added.
    pub rest_length: f64,
    /// Whether the edge pushes its endpoints apart instead of holding them.
    /// Mesh edges are always springs.
    pub repel: bool,
}

/// A synthetic zero-length edge joining two stitched seam vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeamLink {
    /// Vertex on the first seam path.
    pub a: VertexId,
    /// Matching vertex on the second seam path.
    pub b: VertexId,
}

/// Undirected, weighted vertex adjacency derived from triangle indices.
///
/// Invariant: `u -> v` exists iff `v -> u` exists, with the same record.
/// All mutation goes through [`add_edge`](Self::add_edge) and
/// [`add_seam_link`](Self::add_seam_link).
#[derive(Debug, Clone)]
pub struct ConnectivityGraph {
    /// Node positions, one per mesh vertex.
    positions: Vec<Point3<f64>>,
    /// Neighbor maps, ordered by neighbor index.
    adjacency: Vec<BTreeMap<u32, EdgeRecord>>,
    /// Squared-distance cutoff captured at creation.
    threshold: f64,
    /// Seam links in insertion order.
    seam_links: Vec<SeamLink>,
    num_edges: usize,
    rejected: usize,
}

impl ConnectivityGraph {
    /// Create a graph over the given nodes with no edges.
    pub fn new(positions: Vec<Point3<f64>>, options: &GraphOptions) -> Self {
        let n = positions.len();
        Self {
            positions,
            adjacency: vec![BTreeMap::new(); n],
            threshold: options.threshold,
            seam_links: Vec::new(),
            num_edges: 0,
            rejected: 0,
        }
    }

    /// Extract the graph of a mesh snapshot.
    ///
    /// Every triangle `(a, b, c)` contributes the edges `(a, b)`, `(b, c)` and
    /// `(c, a)`. The first triangle to introduce an edge fixes its rest length.
    pub fn build(positions: &[Point3<f64>], faces: &[[u32; 3]], options: &GraphOptions) -> Self {
        let mut graph = Self::new(positions.to_vec(), options);
        for &[a, b, c] in faces {
            graph.add_edge(a.into(), b.into());
            graph.add_edge(b.into(), c.into());
            graph.add_edge(c.into(), a.into());
        }

        log::debug!(
            "extracted graph: {} nodes, {} edges, {} rejected by threshold {}",
            graph.num_vertices(),
            graph.num_edges,
            graph.rejected,
            graph.threshold
        );
        graph
    }

    /// Add the undirected edge `(u, v)`.
    ///
    /// Idempotent: an existing edge is left untouched. An edge whose squared
    /// length reaches the threshold is silently dropped. Returns whether a new
    /// edge was inserted.
    ///
    /// Both indices must be below [`num_vertices`](Self::num_vertices).
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        let n = self.positions.len();
        debug_assert!(u.index() < n && v.index() < n, "edge {:?}-{:?} out of range", u, v);
        if u.index() >= n || v.index() >= n {
            log::warn!("ignoring edge {:?}-{:?}: graph has {} nodes", u, v, n);
            return false;
        }
        if u == v || self.adjacency[u.index()].contains_key(&v.raw()) {
            return false;
        }

        let dist_sq = (self.positions[u.index()] - self.positions[v.index()]).norm_squared();
        if dist_sq >= self.threshold {
            self.rejected += 1;
            return false;
        }

        let record = EdgeRecord {
            rest_length: dist_sq.sqrt(),
            repel: false,
        };
        self.adjacency[u.index()].insert(v.raw(), record);
        self.adjacency[v.index()].insert(u.raw(), record);
        self.num_edges += 1;
        true
    }

    /// Record a zero-length seam link between two vertices.
    ///
    /// Seam links are kept apart from the mesh edges: they feed the layout
    /// solver but do not change hop distances.
    pub fn add_seam_link(&mut self, a: VertexId, b: VertexId) {
        debug_assert!(a.index() < self.positions.len() && b.index() < self.positions.len());
        self.seam_links.push(SeamLink { a, b });
    }

    // ==================== Accessors ====================

    /// Number of nodes.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of undirected mesh edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Number of `add_edge` calls dropped by the threshold.
    #[inline]
    pub fn rejected_edges(&self) -> usize {
        self.rejected
    }

    /// Squared-distance cutoff captured at creation.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Seam links in insertion order.
    #[inline]
    pub fn seam_links(&self) -> &[SeamLink] {
        &self.seam_links
    }

    /// Get the record of edge `(u, v)`, if present.
    pub fn edge(&self, u: VertexId, v: VertexId) -> Option<&EdgeRecord> {
        self.adjacency.get(u.index())?.get(&v.raw())
    }

    /// Check whether `(u, v)` is an edge.
    #[inline]
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.edge(u, v).is_some()
    }

    /// Number of mesh edges at `v`.
    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.adjacency[v.index()].len()
    }

    /// Iterate over the neighbors of `v` in ascending index order.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, &EdgeRecord)> + '_ {
        self.adjacency[v.index()]
            .iter()
            .map(|(&w, record)| (VertexId::from(w), record))
    }

    /// Iterate over every undirected edge once, as `(u, v, record)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, &EdgeRecord)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, map)| {
            map.range((u as u32 + 1)..)
                .map(move |(&v, record)| (VertexId::new(u), VertexId::from(v), record))
        })
    }

    /// Node positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Position of a node.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Move a node. Rest lengths keep their extraction-time values.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, position: Point3<f64>) {
        self.positions[v.index()] = position;
    }

    /// Check the symmetric-adjacency invariant.
    pub fn is_valid(&self) -> bool {
        let mut directed = 0;
        for (u, map) in self.adjacency.iter().enumerate() {
            for (&v, record) in map {
                directed += 1;
                match self.adjacency.get(v as usize).and_then(|m| m.get(&(u as u32))) {
                    Some(back) if back == record => {}
                    _ => return false,
                }
            }
        }
        directed == 2 * self.num_edges
    }
}

/// Extract a connectivity graph from raw mesh arrays.
///
/// Shorthand for [`ConnectivityGraph::build`] with an explicit threshold.
pub fn build_graph(positions: &[Point3<f64>], faces: &[[u32; 3]], threshold: f64) -> ConnectivityGraph {
    ConnectivityGraph::build(positions, faces, &GraphOptions::default().with_threshold(threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::shapes;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn create_single_triangle() -> ConnectivityGraph {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        build_graph(&positions, &[[0, 1, 2]], f64::INFINITY)
    }

    #[test]
    fn test_triangle_edges() {
        let graph = create_single_triangle();
        assert_eq!(graph.num_edges(), 3);
        assert!((graph.edge(v(0), v(1)).unwrap().rest_length - 3.0).abs() < 1e-12);
        assert!((graph.edge(v(2), v(0)).unwrap().rest_length - 4.0).abs() < 1e-12);
        assert!((graph.edge(v(1), v(2)).unwrap().rest_length - 5.0).abs() < 1e-12);
        assert!(!graph.edge(v(0), v(1)).unwrap().repel);
        assert!(graph.is_valid());
    }

    #[test]
    fn test_symmetric_records() {
        let graph = create_single_triangle();
        for (a, b, record) in graph.edges() {
            assert!(a < b);
            assert_eq!(graph.edge(b, a), Some(record));
        }
        assert_eq!(graph.edges().count(), 3);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut graph = create_single_triangle();
        let before = *graph.edge(v(0), v(1)).unwrap();

        // Moving a node does not rewrite the existing rest length.
        graph.set_position(v(1), Point3::new(10.0, 0.0, 0.0));
        assert!(!graph.add_edge(v(0), v(1)));
        assert!(!graph.add_edge(v(1), v(0)));

        assert_eq!(*graph.edge(v(0), v(1)).unwrap(), before);
        assert_eq!(graph.num_edges(), 3);
    }

    #[test]
    fn test_first_writer_wins() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let mut graph = ConnectivityGraph::new(positions, &GraphOptions::default());
        assert!(graph.add_edge(v(0), v(1)));
        graph.set_position(v(1), Point3::new(2.0, 0.0, 0.0));
        assert!(!graph.add_edge(v(1), v(0)));
        assert!((graph.edge(v(1), v(0)).unwrap().rest_length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_rejects_long_edges() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(100.0, 0.0, 0.0),
        ];
        // The second triangle spans a far-away vertex.
        let graph = build_graph(&positions, &[[0, 1, 2], [1, 3, 2]], 4.0);

        assert!(graph.contains_edge(v(0), v(1)));
        assert!(graph.contains_edge(v(1), v(2)));
        assert!(!graph.contains_edge(v(1), v(3)));
        assert!(!graph.contains_edge(v(3), v(2)));
        assert_eq!(graph.degree(v(3)), 0);
        assert_eq!(graph.rejected_edges(), 2);
        assert!(graph.is_valid());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let mut graph = ConnectivityGraph::new(positions, &GraphOptions::default().with_threshold(4.0));
        assert!(!graph.add_edge(v(0), v(1)));
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut graph = create_single_triangle();
        assert!(!graph.add_edge(v(1), v(1)));
        assert_eq!(graph.degree(v(1)), 2);
    }

    #[test]
    fn test_plane_lattice() {
        let mesh = shapes::plane(10, 10).unwrap();
        let graph = build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD);

        // Horizontal + vertical lattice edges; every diagonal rejected.
        assert_eq!(graph.num_edges(), 2 * 10 * 11);
        assert_eq!(graph.degree(v(0)), 2);
        assert_eq!(graph.degree(v(12)), 4);
        for (_, _, record) in graph.edges() {
            assert!((record.rest_length - 1.0).abs() < 1e-12);
        }

        let unfiltered = build_graph(mesh.positions(), mesh.faces(), f64::INFINITY);
        assert_eq!(unfiltered.num_edges(), 2 * 10 * 11 + 100);
    }

    #[test]
    fn test_neighbors_sorted() {
        let mesh = shapes::plane(2, 2).unwrap();
        let graph = build_graph(mesh.positions(), mesh.faces(), f64::INFINITY);
        let ids: Vec<_> = graph.neighbors(v(4)).map(|(w, _)| w.index()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_seam_links_do_not_touch_adjacency() {
        let mut graph = create_single_triangle();
        graph.add_seam_link(v(0), v(2));
        assert_eq!(graph.seam_links(), &[SeamLink { a: v(0), b: v(2) }]);
        assert_eq!(graph.num_edges(), 3);
    }
}
