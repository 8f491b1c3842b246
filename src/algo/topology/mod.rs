//! Betti numbers of a triangulated surface.
//!
//! The mesh is treated as a 2-dimensional simplicial complex and its Betti
//! numbers are computed from three disjoint-set universes:
//!
//! - **vertices**, joined along every edge, give `b0`
//! - **canonical faces**, joined across every shared edge, give the
//!   face-connected pieces of the surface
//! - **oriented faces** (two per face), joined where sheets meet with
//!   compatible orientation, give the sides of those pieces
//!
//! `b2` is the number of oriented-face components minus the number of face
//! components, and `b1` follows from the Euler characteristic
//! `V - E + F = b0 - b1 + b2`.
//!
//! # Example
//!
//! ```
//! use knitmesh::algo::topology::compute_betti;
//! use knitmesh::mesh::shapes;
//!
//! let torus = shapes::torus(2.0, 0.5, 12, 8).unwrap();
//! let betti = compute_betti(torus.positions(), torus.faces()).unwrap();
//! assert_eq!(betti.as_tuple(), (1, 2, 1));
//! ```

mod incidence;

use std::fmt;

use nalgebra::Point3;

pub use incidence::{
    canonical, oriented, CanonicalFace, EdgeIncidence, IncidenceTable, OrientedFace,
};

use crate::algo::disjoint_set::DisjointSet;
use crate::error::Result;
use crate::mesh::validate_indices;

/// The Betti numbers `(b0, b1, b2)` of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BettiNumbers {
    /// Connected components.
    pub b0: i64,
    /// Independent loops.
    pub b1: i64,
    /// Enclosed voids.
    pub b2: i64,
}

impl BettiNumbers {
    /// The numbers as a `(b0, b1, b2)` tuple.
    #[inline]
    pub fn as_tuple(self) -> (i64, i64, i64) {
        (self.b0, self.b1, self.b2)
    }

    /// `b0 - b1 + b2`.
    #[inline]
    pub fn euler_characteristic(self) -> i64 {
        self.b0 - self.b1 + self.b2
    }
}

impl fmt::Display for BettiNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.b0, self.b1, self.b2)
    }
}

/// Counts gathered while computing Betti numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyAnalysis {
    /// Number of vertices, isolated ones included.
    pub vertices: usize,
    /// Number of distinct edges.
    pub edges: usize,
    /// Number of distinct (canonical) faces.
    pub faces: usize,
    /// Edges with a single incident face.
    pub boundary_edges: usize,
    /// Edges with three or more incident faces.
    pub non_manifold_edges: usize,
    /// Non-manifold edges whose sheets could not be ordered by angle.
    pub unordered_edges: usize,
    /// The Betti numbers.
    pub betti: BettiNumbers,
}

/// Compute `(b0, b1, b2)` of the mesh snapshot.
///
/// # Errors
///
/// Returns [`MeshError::InvalidVertexIndex`](crate::error::MeshError::InvalidVertexIndex)
/// if a face references a vertex outside `positions`.
pub fn compute_betti(positions: &[Point3<f64>], faces: &[[u32; 3]]) -> Result<BettiNumbers> {
    Ok(analyze(positions, faces)?.betti)
}

/// Compute Betti numbers along with the incidence counts they derive from.
pub fn analyze(positions: &[Point3<f64>], faces: &[[u32; 3]]) -> Result<TopologyAnalysis> {
    validate_indices(positions.len(), faces)?;

    let table = IncidenceTable::build(positions, faces);

    let mut vertex_set = DisjointSet::new(0..positions.len() as u32);
    let mut face_set = DisjointSet::new(table.faces().iter().copied());
    let mut side_set = DisjointSet::new(table.faces().iter().flat_map(|&face| {
        [OrientedFace { face, sign: 1 }, OrientedFace { face, sign: -1 }]
    }));

    for entry in table.edges() {
        let [e0, e1] = entry.edge;
        vertex_set.union(&e0, &e1)?;

        let ws = &entry.opposite;
        if let [w] = ws.as_slice() {
            // No opposite sheet: both sides of the face meet here.
            let side = OrientedFace {
                face: canonical([e0, e1, *w]),
                sign: 1,
            };
            side_set.union(&side, &side.flipped())?;
            continue;
        }

        for (i, &w1) in ws.iter().enumerate() {
            let w2 = ws[(i + 1) % ws.len()];
            side_set.union(&oriented([e0, e1, w1]), &oriented([e0, w2, e1]))?;
            face_set.union(&canonical([e0, e1, w1]), &canonical([e0, e1, w2]))?;
        }
    }

    let v = positions.len() as i64;
    let e = table.edges().len() as i64;
    let f = table.faces().len() as i64;
    let b0 = vertex_set.component_count() as i64;
    let b2 = side_set.component_count() as i64 - face_set.component_count() as i64;
    let b1 = e + b0 + b2 - v - f;

    if b1 < 0 {
        log::warn!("negative b1 = {}: mesh incidence is inconsistent", b1);
    }
    log::debug!("V={} E={} F={} -> betti ({}, {}, {})", v, e, f, b0, b1, b2);

    Ok(TopologyAnalysis {
        vertices: positions.len(),
        edges: table.edges().len(),
        faces: table.faces().len(),
        boundary_edges: table.num_boundary_edges(),
        non_manifold_edges: table.num_non_manifold_edges(),
        unordered_edges: table.num_unordered_edges(),
        betti: BettiNumbers { b0, b1, b2 },
    })
}
