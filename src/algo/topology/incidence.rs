//! Edge/face incidence of a triangle soup.
//!
//! Faces are identified by their sorted vertex triple, so `(a, b, c)` and
//! `(b, c, a)` collapse into one canonical face. Every unordered edge records
//! the opposite vertex of each canonical face containing it; edges with three
//! or more opposite vertices (non-manifold) are ordered by dihedral angle so
//! that consecutive entries are geometrically adjacent sheets.

use std::collections::{HashMap, HashSet};

use nalgebra::{Point3, Vector3};

/// A triangle identified by its vertex indices in ascending order.
pub type CanonicalFace = [u32; 3];

/// Projections shorter than this are treated as degenerate.
const DEGENERATE_EPS: f64 = 1e-12;

/// A canonical face with the parity of the permutation that sorted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrientedFace {
    /// Sorted vertex triple.
    pub face: CanonicalFace,
    /// `1` for an even permutation of `face`, `-1` for an odd one.
    pub sign: i8,
}

impl OrientedFace {
    /// The same face with the opposite orientation.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            face: self.face,
            sign: -self.sign,
        }
    }
}

/// Sort a triangle's indices ascending.
#[inline]
pub fn canonical(mut tri: [u32; 3]) -> CanonicalFace {
    tri.sort_unstable();
    tri
}

/// Sort a triangle with at most three swaps, flipping the sign on each.
///
/// ```
/// use knitmesh::algo::topology::oriented;
///
/// assert_eq!(oriented([0, 1, 2]).sign, 1);
/// assert_eq!(oriented([1, 2, 0]).sign, 1);
/// assert_eq!(oriented([0, 2, 1]).sign, -1);
/// assert_eq!(oriented([2, 0, 1]).face, [0, 1, 2]);
/// ```
pub fn oriented(mut tri: [u32; 3]) -> OrientedFace {
    let mut sign = 1;
    for (i, j) in [(0, 1), (1, 2), (0, 1)] {
        if tri[i] > tri[j] {
            tri.swap(i, j);
            sign = -sign;
        }
    }
    OrientedFace { face: tri, sign }
}

/// One unordered edge and the opposite vertices of its incident faces.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeIncidence {
    /// Edge endpoints, `edge[0] < edge[1]`.
    pub edge: [u32; 2],
    /// Third vertex of every canonical face containing the edge.
    pub opposite: Vec<u32>,
}

impl EdgeIncidence {
    /// Only one face uses this edge.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.opposite.len() == 1
    }

    /// Three or more faces share this edge.
    #[inline]
    pub fn is_non_manifold(&self) -> bool {
        self.opposite.len() >= 3
    }
}

/// Canonical faces and edge incidence of a mesh snapshot.
#[derive(Debug, Clone)]
pub struct IncidenceTable {
    /// Deduplicated canonical faces, in first-seen order.
    pub(crate) faces: Vec<CanonicalFace>,
    /// Edges in first-seen order.
    pub(crate) edges: Vec<EdgeIncidence>,
    /// Non-manifold edges left in insertion order because an angle was undefined.
    pub(crate) unordered: usize,
}

impl IncidenceTable {
    /// Build the table, ordering non-manifold edges by dihedral angle.
    ///
    /// Every face index must be below `positions.len()`.
    pub fn build(positions: &[Point3<f64>], faces: &[[u32; 3]]) -> Self {
        let mut seen: HashSet<CanonicalFace> = HashSet::with_capacity(faces.len());
        let canonical_faces: Vec<CanonicalFace> = faces
            .iter()
            .map(|&f| canonical(f))
            .filter(|f| seen.insert(*f))
            .collect();

        let mut index: HashMap<[u32; 2], usize> = HashMap::with_capacity(canonical_faces.len() * 2);
        let mut edges: Vec<EdgeIncidence> = Vec::new();
        for &[v0, v1, v2] in &canonical_faces {
            for (a, b, w) in [(v0, v1, v2), (v1, v2, v0), (v2, v0, v1)] {
                let key = if a < b { [a, b] } else { [b, a] };
                let slot = *index.entry(key).or_insert_with(|| {
                    edges.push(EdgeIncidence {
                        edge: key,
                        opposite: Vec::with_capacity(2),
                    });
                    edges.len() - 1
                });
                edges[slot].opposite.push(w);
            }
        }

        let mut unordered = 0;
        for entry in edges.iter_mut().filter(|e| e.is_non_manifold()) {
            if !sort_by_dihedral_angle(positions, entry) {
                log::warn!(
                    "edge {:?}: an incident face is collinear with the edge, keeping insertion order",
                    entry.edge
                );
                unordered += 1;
            }
        }

        Self {
            faces: canonical_faces,
            edges,
            unordered,
        }
    }

    /// Deduplicated canonical faces.
    #[inline]
    pub fn faces(&self) -> &[CanonicalFace] {
        &self.faces
    }

    /// All edges with their incidence lists.
    #[inline]
    pub fn edges(&self) -> &[EdgeIncidence] {
        &self.edges
    }

    /// Number of boundary edges.
    pub fn num_boundary_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// Number of non-manifold edges.
    pub fn num_non_manifold_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_non_manifold()).count()
    }

    /// Number of non-manifold edges that could not be ordered by angle.
    #[inline]
    pub fn num_unordered_edges(&self) -> usize {
        self.unordered
    }
}

/// Unit component of `d` orthogonal to the unit vector `line`.
fn orthogonal_unit(d: Vector3<f64>, line: &Vector3<f64>) -> Option<Vector3<f64>> {
    (d - line * line.dot(&d)).try_normalize(DEGENERATE_EPS)
}

/// Reorder `entry.opposite` by rotation angle around the edge, measured from
/// the first opposite vertex.
///
/// Returns `false` and leaves the list untouched when the edge has no length
/// or an opposite vertex lies on the edge line.
fn sort_by_dihedral_angle(positions: &[Point3<f64>], entry: &mut EdgeIncidence) -> bool {
    let origin = positions[entry.edge[0] as usize];
    let Some(line) = (positions[entry.edge[1] as usize] - origin).try_normalize(DEGENERATE_EPS) else {
        return false;
    };
    let Some(base) = orthogonal_unit(positions[entry.opposite[0] as usize] - origin, &line) else {
        return false;
    };

    let mut keyed: Vec<(f64, u32)> = Vec::with_capacity(entry.opposite.len());
    keyed.push((0.0, entry.opposite[0]));
    for &w in &entry.opposite[1..] {
        let Some(d) = orthogonal_unit(positions[w as usize] - origin, &line) else {
            return false;
        };
        let angle = line.dot(&base.cross(&d)).atan2(base.dot(&d));
        keyed.push((angle, w));
    }

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    entry.opposite = keyed.into_iter().map(|(_, w)| w).collect();
    true
}
