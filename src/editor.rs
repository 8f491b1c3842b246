//! Interactive seam-stitching session.
//!
//! [`SeamEditor`] owns one mesh snapshot together with its connectivity
//! graph and the seams added so far. A viewer drives it from its event
//! handlers (dragging handles, picking seam endpoints, solver ticks) and
//! reads back the spring network for its force-layout solver.
//!
//! # Example
//!
//! ```
//! use knitmesh::editor::{EditorOptions, LinkKind, SeamEditor};
//! use knitmesh::mesh::{shapes, VertexId};
//!
//! let mesh = shapes::plane(10, 10).unwrap();
//! let options = EditorOptions::default().with_threshold(shapes::PLANE_THRESHOLD);
//! let mut editor = SeamEditor::new(mesh, options).unwrap();
//!
//! for v in [0, 10, 110, 120] {
//!     editor.select(VertexId::new(v));
//! }
//! editor.add_seam_from_selection().unwrap();
//!
//! let links = editor.layout_links();
//! assert_eq!(links.iter().filter(|l| l.kind == LinkKind::Seam).count(), 11);
//! assert_eq!(editor.seam_triangles().len(), 20);
//! ```

use std::collections::VecDeque;

use nalgebra::Point3;

use crate::algo::connectivity::{ConnectivityGraph, GraphOptions};
use crate::algo::seam::{bfs, match_seams, BfsOptions, HopResult, SeamMatch};
use crate::algo::topology::{analyze, BettiNumbers, TopologyAnalysis};
use crate::error::{MeshError, Result, SeamError};
use crate::mesh::{TriMesh, VertexId};

/// Number of picked handles that define a seam: two endpoints per curve.
pub const SEAM_SELECTION: usize = 4;

/// Options for an editing session.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Squared-distance cutoff for graph edges, in the mesh's own units.
    pub threshold: f64,

    /// Rescale the mesh so its largest extent equals this size.
    /// The threshold is scaled along with it.
    pub normalize_to: Option<f64>,

    /// Hop radius reported around a dragged vertex. `0` disables it.
    pub spread: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            threshold: f64::INFINITY,
            normalize_to: None,
            spread: 1,
        }
    }
}

impl EditorOptions {
    /// Set the squared-distance cutoff.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Normalize the mesh to the given size on load.
    pub fn with_normalize_to(mut self, size: f64) -> Self {
        self.normalize_to = Some(size);
        self
    }

    /// Set the drag influence radius.
    pub fn with_spread(mut self, spread: usize) -> Self {
        self.spread = spread;
        self
    }
}

/// What a layout link stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A mesh edge holding its rest length.
    Edge,
    /// A seam link pulling two vertices together.
    Seam,
}

/// A spring for the external force-layout solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutLink {
    /// First endpoint.
    pub source: VertexId,
    /// Second endpoint.
    pub target: VertexId,
    /// Target distance between the endpoints.
    pub rest_length: f64,
    /// Edge or seam.
    pub kind: LinkKind,
}

/// A mesh being relaxed and stitched.
#[derive(Debug, Clone)]
pub struct SeamEditor {
    faces: Vec<[u32; 3]>,
    graph: ConnectivityGraph,
    spread: usize,
    seams: Vec<SeamMatch>,
    /// Bridging triangles of every seam, drawn as the seam's own geometry.
    seam_triangles: Vec<[VertexId; 3]>,
    /// Most recent picks, oldest first.
    selection: VecDeque<VertexId>,
}

impl SeamEditor {
    /// Start a session on `mesh`.
    ///
    /// # Errors
    ///
    /// Fails if `options.normalize_to` is not a positive size.
    pub fn new(mut mesh: TriMesh, options: EditorOptions) -> Result<Self> {
        let mut threshold = options.threshold;
        if let Some(size) = options.normalize_to {
            let scale = mesh.normalize(size)?;
            threshold *= scale * scale;
        }

        let graph = ConnectivityGraph::build(
            mesh.positions(),
            mesh.faces(),
            &GraphOptions::default().with_threshold(threshold),
        );
        log::info!(
            "loaded mesh: {} vertices, {} faces, {} springs",
            mesh.num_vertices(),
            mesh.num_faces(),
            graph.num_edges()
        );

        Ok(Self {
            faces: mesh.faces,
            graph,
            spread: options.spread,
            seams: Vec::new(),
            seam_triangles: Vec::new(),
            selection: VecDeque::with_capacity(SEAM_SELECTION + 1),
        })
    }

    // ==================== Accessors ====================

    /// Current vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        self.graph.positions()
    }

    /// Mesh triangles.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// The spring graph.
    #[inline]
    pub fn graph(&self) -> &ConnectivityGraph {
        &self.graph
    }

    /// Seams in the order they were added.
    #[inline]
    pub fn seams(&self) -> &[SeamMatch] {
        &self.seams
    }

    /// Bridging triangles of all seams.
    #[inline]
    pub fn seam_triangles(&self) -> &[[VertexId; 3]] {
        &self.seam_triangles
    }

    /// Currently picked handles, oldest first.
    pub fn selection(&self) -> Vec<VertexId> {
        self.selection.iter().copied().collect()
    }

    // ==================== Editing ====================

    /// Move one vertex.
    ///
    /// Returns the hop neighborhood of `v` within the configured spread, for
    /// the solver to weight, or `None` when the spread is zero or the vertex
    /// did not move. Rest lengths are not changed; see [`reextract`](Self::reextract).
    ///
    /// # Panics
    /// Panics if `v` is out of range.
    pub fn drag_vertex(&mut self, v: VertexId, position: Point3<f64>) -> Option<HopResult> {
        let delta = position - *self.graph.position(v);
        self.graph.set_position(v, position);

        if self.spread == 0 || delta.norm_squared() <= 0.0 {
            return None;
        }
        Some(bfs(&self.graph, v, &BfsOptions::default().with_max_hops(self.spread)))
    }

    /// Replace all positions, e.g. after a solver tick.
    pub fn apply_positions(&mut self, positions: &[Point3<f64>]) -> Result<()> {
        if positions.len() != self.graph.num_vertices() {
            return Err(MeshError::invalid_param(
                "positions",
                positions.len(),
                "must match the vertex count",
            ));
        }
        for (i, &p) in positions.iter().enumerate() {
            self.graph.set_position(VertexId::new(i), p);
        }
        Ok(())
    }

    /// Rebuild the graph from the current positions.
    ///
    /// Rest lengths are re-measured and the threshold re-applied; seam links
    /// are carried over.
    pub fn reextract(&mut self) {
        let options = GraphOptions::default().with_threshold(self.graph.threshold());
        let mut graph = ConnectivityGraph::build(self.graph.positions(), &self.faces, &options);
        for link in self.graph.seam_links() {
            graph.add_seam_link(link.a, link.b);
        }
        self.graph = graph;
    }

    /// Pick a handle. Only the last [`SEAM_SELECTION`] picks are kept.
    pub fn select(&mut self, v: VertexId) {
        self.selection.push_back(v);
        if self.selection.len() > SEAM_SELECTION {
            self.selection.pop_front();
        }
    }

    /// Stitch the curve `src1 -> dst1` onto `src2 -> dst2`.
    ///
    /// On success the seam links are added to the graph and the bridging
    /// triangles to [`seam_triangles`](Self::seam_triangles).
    pub fn add_seam(
        &mut self,
        src1: VertexId,
        dst1: VertexId,
        src2: VertexId,
        dst2: VertexId,
    ) -> std::result::Result<&SeamMatch, SeamError> {
        let seam = match_seams(&mut self.graph, src1, dst1, src2, dst2)?;
        self.seam_triangles.extend(seam.bridge_triangles());
        self.seams.push(seam);
        Ok(&self.seams[self.seams.len() - 1])
    }

    /// Stitch using the current selection as `src1, dst1, src2, dst2`.
    pub fn add_seam_from_selection(&mut self) -> std::result::Result<&SeamMatch, SeamError> {
        let selected = self.selection.len();
        let [src1, dst1, src2, dst2] = match self.selection.make_contiguous() {
            &mut [a, b, c, d] => [a, b, c, d],
            _ => return Err(SeamError::IncompleteSelection { selected }),
        };
        self.add_seam(src1, dst1, src2, dst2)
    }

    /// Springs for the force-layout solver.
    ///
    /// Every mesh edge appears once with its rest length, followed by every
    /// seam link with a rest length of zero.
    pub fn layout_links(&self) -> Vec<LayoutLink> {
        let edges = self.graph.edges().map(|(source, target, record)| LayoutLink {
            source,
            target,
            rest_length: record.rest_length,
            kind: LinkKind::Edge,
        });
        let seams = self.graph.seam_links().iter().map(|link| LayoutLink {
            source: link.a,
            target: link.b,
            rest_length: 0.0,
            kind: LinkKind::Seam,
        });
        edges.chain(seams).collect()
    }

    // ==================== Topology ====================

    /// Betti numbers of the mesh.
    pub fn betti(&self) -> Result<BettiNumbers> {
        Ok(self.analyze()?.betti)
    }

    /// Betti numbers with incidence counts.
    pub fn analyze(&self) -> Result<TopologyAnalysis> {
        analyze(self.positions(), &self.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::shapes;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn create_editor(w: usize, h: usize) -> SeamEditor {
        let options = EditorOptions::default().with_threshold(shapes::PLANE_THRESHOLD);
        SeamEditor::new(shapes::plane(w, h).unwrap(), options).unwrap()
    }

    #[test]
    fn test_layout_links() {
        let editor = create_editor(3, 3);
        let links = editor.layout_links();
        assert_eq!(links.len(), 2 * 3 * 4);
        for link in &links {
            assert_eq!(link.kind, LinkKind::Edge);
            assert!(link.source < link.target);
            assert!((link.rest_length - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalize_scales_threshold() {
        let options = EditorOptions::default()
            .with_threshold(shapes::PLANE_THRESHOLD)
            .with_normalize_to(1.0);
        let editor = SeamEditor::new(shapes::plane(4, 2).unwrap(), options).unwrap();

        // Scale 1/4: unit cells become 0.25 and the threshold follows.
        assert!((editor.graph().threshold() - 2.0 / 16.0).abs() < 1e-12);
        let (_, _, record) = editor.graph().edges().next().unwrap();
        assert!((record.rest_length - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_drag_reports_neighborhood() {
        let mut editor = create_editor(4, 4);
        let center = v(12);
        let region = editor.drag_vertex(center, Point3::new(0.0, 0.0, 1.0)).unwrap();

        assert_eq!(region.reachable_count(), 5);
        assert_eq!(region.distance(center), Some(0));
        assert_eq!(editor.positions()[12], Point3::new(0.0, 0.0, 1.0));

        // Rest lengths keep their extraction-time values.
        assert!((editor.graph().edge(center, v(13)).unwrap().rest_length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_drag_without_motion() {
        let mut editor = create_editor(2, 2);
        let here = editor.positions()[4];
        assert!(editor.drag_vertex(v(4), here).is_none());
    }

    #[test]
    fn test_reextract_measures_current_positions() {
        let mut editor = create_editor(2, 2);
        editor.add_seam(v(0), v(2), v(6), v(8)).unwrap();

        let mut moved = editor.positions().to_vec();
        for p in &mut moved {
            p.x *= 0.5;
        }
        editor.apply_positions(&moved).unwrap();
        editor.reextract();

        let record = editor.graph().edge(v(0), v(1)).unwrap();
        assert!((record.rest_length - 0.5).abs() < 1e-12);
        assert_eq!(editor.graph().seam_links().len(), 3);
    }

    #[test]
    fn test_apply_positions_length_mismatch() {
        let mut editor = create_editor(2, 2);
        assert!(editor.apply_positions(&[Point3::origin()]).is_err());
    }

    #[test]
    fn test_selection_keeps_last_four() {
        let mut editor = create_editor(10, 10);
        for i in [5, 0, 10, 110, 120] {
            editor.select(v(i));
        }
        assert_eq!(editor.selection(), vec![v(0), v(10), v(110), v(120)]);

        let seam = editor.add_seam_from_selection().unwrap();
        assert_eq!(seam.len(), 11);
    }

    #[test]
    fn test_incomplete_selection() {
        let mut editor = create_editor(3, 3);
        editor.select(v(0));
        editor.select(v(3));
        assert_eq!(
            editor.add_seam_from_selection().unwrap_err(),
            SeamError::IncompleteSelection { selected: 2 }
        );
    }

    #[test]
    fn test_failed_seam_leaves_state() {
        let mut editor = create_editor(10, 10);
        let err = editor.add_seam(v(0), v(10), v(110), v(114)).unwrap_err();
        assert!(matches!(err, SeamError::MismatchedLength { .. }));
        assert!(editor.seams().is_empty());
        assert!(editor.seam_triangles().is_empty());
        assert!(editor.layout_links().iter().all(|l| l.kind == LinkKind::Edge));
    }

    #[test]
    fn test_betti_independent_of_seams() {
        let mut editor = create_editor(4, 4);
        assert_eq!(editor.betti().unwrap().as_tuple(), (1, 0, 0));
        editor.add_seam(v(0), v(4), v(20), v(24)).unwrap();
        assert_eq!(editor.betti().unwrap().as_tuple(), (1, 0, 0));
    }
}
