//! Indexed triangle mesh snapshot.
//!
//! [`TriMesh`] is the in-memory mesh the engine operates on: an ordered list
//! of vertex positions and an ordered list of oriented triangles. The engine
//! reads positions and may update them, but never changes the vertex count.

use nalgebra::{Point3, Vector3};

use super::index::{FaceId, VertexId};
use crate::error::{MeshError, Result};

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex positions; a vertex's identity is its index here.
    pub(crate) positions: Vec<Point3<f64>>,

    /// Oriented triangles as vertex index triples.
    pub(crate) faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(num_vertices),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles (as given, before deduplication).
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// All vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// All triangles.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Move a vertex. Connectivity is untouched.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, position: Point3<f64>) {
        self.positions[v.index()] = position;
    }

    /// Get the three vertices of a face, in winding order.
    #[inline]
    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        let [a, b, c] = self.faces[f.index()];
        [a.into(), b.into(), c.into()]
    }

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.positions.len()).map(VertexId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    // ==================== Geometry ====================

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.positions.first()?;
        let bounds = self
            .positions
            .iter()
            .fold((first, first), |(min, max), p| (min.inf(p), max.sup(p)));
        Some(bounds)
    }

    /// Center the mesh on the origin and scale it uniformly so that its
    /// largest bounding-box extent equals `target_size`.
    ///
    /// Returns the applied scale factor. A squared-distance threshold chosen
    /// for the unscaled mesh must be multiplied by `scale * scale`.
    /// A mesh with zero extent is only centered and reports a scale of `1.0`.
    pub fn normalize(&mut self, target_size: f64) -> Result<f64> {
        if !(target_size.is_finite() && target_size > 0.0) {
            return Err(MeshError::invalid_param(
                "target_size",
                target_size,
                "must be positive and finite",
            ));
        }
        let Some((min, max)) = self.bounding_box() else {
            return Ok(1.0);
        };

        let center: Vector3<f64> = (min.coords + max.coords) * 0.5;
        let extent = (max - min).max();
        let scale = if extent > 0.0 { target_size / extent } else { 1.0 };

        for p in &mut self.positions {
            *p = Point3::from((p.coords - center) * scale);
        }

        log::debug!(
            "normalized mesh: extent {:.4} -> {:.4} (scale {:.4})",
            extent,
            extent * scale,
            scale
        );
        Ok(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_single_triangle() -> TriMesh {
        TriMesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(2.0, 2.0, 0.0),
            ],
            faces: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn test_accessors() {
        let mesh = create_single_triangle();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(
            mesh.face_vertices(FaceId::new(0)),
            [VertexId::new(0), VertexId::new(1), VertexId::new(2)]
        );
        assert_eq!(mesh.vertex_ids().count(), 3);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = create_single_triangle();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(4.0, 2.0, 0.0));

        assert!(TriMesh::new().bounding_box().is_none());
    }

    #[test]
    fn test_normalize() {
        let mut mesh = create_single_triangle();
        let scale = mesh.normalize(10.0).unwrap();
        assert!((scale - 2.5).abs() < 1e-12);

        let (min, max) = mesh.bounding_box().unwrap();
        assert!((max.x - min.x - 10.0).abs() < 1e-12);
        assert!((min.x + 5.0).abs() < 1e-12);
        assert!((min.y + 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_rejects_bad_target() {
        let mut mesh = create_single_triangle();
        assert!(mesh.normalize(0.0).is_err());
        assert!(mesh.normalize(f64::NAN).is_err());
    }

    #[test]
    fn test_set_position() {
        let mut mesh = create_single_triangle();
        mesh.set_position(VertexId::new(2), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(*mesh.position(VertexId::new(2)), Point3::new(1.0, 1.0, 1.0));
    }
}
