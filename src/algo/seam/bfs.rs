//! Breadth-first search over the connectivity graph.
//!
//! Hop counts ignore rest lengths: the first time BFS reaches a vertex is
//! along a path with the fewest edges, which is what seam matching needs to
//! pair the two curves vertex for vertex.

use std::collections::VecDeque;

use crate::algo::connectivity::ConnectivityGraph;
use crate::mesh::VertexId;

use super::HopResult;

/// Options for breadth-first search.
#[derive(Debug, Clone, Default)]
pub struct BfsOptions {
    /// Hop radius. Vertices at this distance are reached but not expanded,
    /// so nothing farther gets a distance. `None` for no limit.
    pub max_hops: Option<usize>,

    /// Target vertex for early termination.
    pub target: Option<VertexId>,
}

impl BfsOptions {
    /// Limit the search to `max_hops` edges from the source.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    /// Stop once `target` is dequeued.
    pub fn with_target(mut self, target: VertexId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Compute hop distances from `source`.
///
/// An out-of-range source yields a result where nothing is reachable.
///
/// # Example
///
/// ```
/// use knitmesh::algo::connectivity::build_graph;
/// use knitmesh::algo::seam::{bfs, BfsOptions};
/// use knitmesh::mesh::{shapes, VertexId};
///
/// let mesh = shapes::plane(4, 4).unwrap();
/// let graph = build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD);
///
/// let result = bfs(&graph, VertexId::new(0), &BfsOptions::default().with_max_hops(1));
/// assert_eq!(result.reachable_count(), 3);
/// ```
pub fn bfs(graph: &ConnectivityGraph, source: VertexId, options: &BfsOptions) -> HopResult {
    let n = graph.num_vertices();
    let mut distances: Vec<Option<usize>> = vec![None; n];
    let mut predecessors: Vec<Option<VertexId>> = vec![None; n];

    if source.index() >= n {
        return HopResult::new(distances, predecessors);
    }

    let mut queue = VecDeque::new();
    distances[source.index()] = Some(0);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        if options.target == Some(u) {
            break;
        }

        let dist_u = distances[u.index()].unwrap_or(0);
        if let Some(max_hops) = options.max_hops {
            if dist_u >= max_hops {
                continue;
            }
        }

        for (w, _) in graph.neighbors(u) {
            if distances[w.index()].is_none() {
                distances[w.index()] = Some(dist_u + 1);
                predecessors[w.index()] = Some(u);
                queue.push_back(w);
            }
        }
    }

    HopResult::new(distances, predecessors)
}

/// Shortest hop path from `src` to `dst`, both included.
///
/// Returns an empty path when either endpoint is out of range or `dst` is
/// unreachable from `src`. `src == dst` yields `[src]`.
pub fn bfs_shortest_path(graph: &ConnectivityGraph, src: VertexId, dst: VertexId) -> Vec<VertexId> {
    if src.index() >= graph.num_vertices() || dst.index() >= graph.num_vertices() {
        return Vec::new();
    }
    bfs(graph, src, &BfsOptions::default().with_target(dst))
        .path_to(dst)
        .unwrap_or_default()
}
