//! Pairing two seam paths.

use crate::algo::connectivity::{ConnectivityGraph, SeamLink};
use crate::error::SeamError;
use crate::mesh::VertexId;

use super::bfs::bfs_shortest_path;

/// Two equal-length paths stitched index by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeamMatch {
    path1: Vec<VertexId>,
    path2: Vec<VertexId>,
}

impl SeamMatch {
    /// The first curve, from its source to its destination.
    #[inline]
    pub fn path1(&self) -> &[VertexId] {
        &self.path1
    }

    /// The second curve, from its source to its destination.
    #[inline]
    pub fn path2(&self) -> &[VertexId] {
        &self.path2
    }

    /// Number of stitched vertex pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.path1.len()
    }

    /// Always `false`: a match holds at least one pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path1.is_empty()
    }

    /// One zero-length link per index: `(path1[i], path2[i])`.
    pub fn links(&self) -> impl Iterator<Item = SeamLink> + '_ {
        self.path1
            .iter()
            .zip(&self.path2)
            .map(|(&a, &b)| SeamLink { a, b })
    }

    /// Triangle strip bridging the two curves.
    ///
    /// For each step `i` with `a = path1[i-1]`, `b = path1[i]`,
    /// `x = path2[i-1]` and `y = path2[i]`, yields `(a, b, x)` and `(b, x, y)`.
    pub fn bridge_triangles(&self) -> Vec<[VertexId; 3]> {
        let mut triangles = Vec::with_capacity(2 * self.len().saturating_sub(1));
        for (p, q) in self.path1.windows(2).zip(self.path2.windows(2)) {
            let (a, b) = (p[0], p[1]);
            let (x, y) = (q[0], q[1]);
            triangles.push([a, b, x]);
            triangles.push([b, x, y]);
        }
        triangles
    }
}

/// Compute the seam between `src1 -> dst1` and `src2 -> dst2` without
/// touching the graph.
///
/// # Errors
///
/// - [`SeamError::NoPath`] if either destination is unreachable (or an
///   endpoint is out of range)
/// - [`SeamError::MismatchedLength`] if the paths differ in vertex count
pub fn find_seam_match(
    graph: &ConnectivityGraph,
    src1: VertexId,
    dst1: VertexId,
    src2: VertexId,
    dst2: VertexId,
) -> Result<SeamMatch, SeamError> {
    let path1 = bfs_shortest_path(graph, src1, dst1);
    if path1.is_empty() {
        return Err(SeamError::NoPath {
            src: src1.raw(),
            dst: dst1.raw(),
        });
    }
    let path2 = bfs_shortest_path(graph, src2, dst2);
    if path2.is_empty() {
        return Err(SeamError::NoPath {
            src: src2.raw(),
            dst: dst2.raw(),
        });
    }
    if path1.len() != path2.len() {
        return Err(SeamError::MismatchedLength {
            len1: path1.len(),
            len2: path2.len(),
        });
    }

    Ok(SeamMatch { path1, path2 })
}

/// Match two seam paths and record their links on the graph.
///
/// On success every pair `(path1[i], path2[i])` is appended to the graph's
/// seam links. On failure the graph is unchanged.
pub fn match_seams(
    graph: &mut ConnectivityGraph,
    src1: VertexId,
    dst1: VertexId,
    src2: VertexId,
    dst2: VertexId,
) -> Result<SeamMatch, SeamError> {
    let seam = find_seam_match(graph, src1, dst1, src2, dst2)?;
    for link in seam.links() {
        graph.add_seam_link(link.a, link.b);
    }

    log::debug!(
        "stitched {} vertex pairs: {:?} -> {:?} onto {:?} -> {:?}",
        seam.len(),
        src1,
        dst1,
        src2,
        dst2
    );
    Ok(seam)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::connectivity::build_graph;
    use crate::mesh::shapes;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn create_grid(w: usize, h: usize) -> ConnectivityGraph {
        let mesh = shapes::plane(w, h).unwrap();
        build_graph(mesh.positions(), mesh.faces(), shapes::PLANE_THRESHOLD)
    }

    #[test]
    fn test_top_onto_bottom() {
        let mut graph = create_grid(10, 10);
        let seam = match_seams(&mut graph, v(0), v(10), v(110), v(120)).unwrap();

        let top: Vec<_> = (0..=10).map(v).collect();
        let bottom: Vec<_> = (110..=120).map(v).collect();
        assert_eq!(seam.path1(), top.as_slice());
        assert_eq!(seam.path2(), bottom.as_slice());

        let links = graph.seam_links();
        assert_eq!(links.len(), 11);
        assert_eq!(links[0], SeamLink { a: v(0), b: v(110) });
        assert_eq!(links[10], SeamLink { a: v(10), b: v(120) });
    }

    #[test]
    fn test_bridge_triangles() {
        let mut graph = create_grid(2, 1);
        // Top row 0-1-2 onto bottom row 3-4-5.
        let seam = match_seams(&mut graph, v(0), v(2), v(3), v(5)).unwrap();
        assert_eq!(
            seam.bridge_triangles(),
            vec![
                [v(0), v(1), v(3)],
                [v(1), v(3), v(4)],
                [v(1), v(2), v(4)],
                [v(2), v(4), v(5)],
            ]
        );
    }

    #[test]
    fn test_mismatched_length() {
        let mut graph = create_grid(10, 10);
        let result = match_seams(&mut graph, v(0), v(10), v(110), v(115));
        assert_eq!(result, Err(SeamError::MismatchedLength { len1: 11, len2: 6 }));
        assert!(graph.seam_links().is_empty());
    }

    #[test]
    fn test_no_path() {
        let mut graph = create_grid(3, 3);
        let result = match_seams(&mut graph, v(0), v(3), v(12), v(40));
        assert_eq!(result, Err(SeamError::NoPath { src: 12, dst: 40 }));
        assert!(graph.seam_links().is_empty());
    }

    #[test]
    fn test_single_vertex_seam() {
        let mut graph = create_grid(2, 2);
        let seam = match_seams(&mut graph, v(0), v(0), v(8), v(8)).unwrap();
        assert_eq!(seam.len(), 1);
        assert!(seam.bridge_triangles().is_empty());
        assert_eq!(graph.seam_links(), &[SeamLink { a: v(0), b: v(8) }]);
    }

    #[test]
    fn test_find_is_pure() {
        let graph = create_grid(4, 4);
        let seam = find_seam_match(&graph, v(0), v(4), v(20), v(24)).unwrap();
        assert_eq!(seam.len(), 5);
        assert!(graph.seam_links().is_empty());
    }
}
