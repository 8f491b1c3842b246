//! Mesh construction utilities.
//!
//! This module builds validated [`TriMesh`] snapshots from face-vertex lists
//! as handed over by a model loader.

use nalgebra::Point3;

use super::trimesh::TriMesh;
use crate::error::{MeshError, Result};

/// Build a triangle mesh from vertices and triangle faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of triangle faces, each as [v0, v1, v2] indices
///
/// # Returns
/// A mesh, or an error if a face is out of range or repeats a vertex.
///
/// # Example
/// ```
/// use knitmesh::mesh::{build_from_triangles, TriMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: TriMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_triangles(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Result<TriMesh> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    if vertices.len() > u32::MAX as usize {
        return Err(MeshError::invalid_param(
            "vertices",
            vertices.len(),
            "vertex count exceeds u32 index range",
        ));
    }

    let mut mesh = TriMesh::with_capacity(vertices.len(), faces.len());
    mesh.positions.extend_from_slice(vertices);

    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        mesh.faces.push([face[0] as u32, face[1] as u32, face[2] as u32]);
    }

    Ok(mesh)
}

/// Check that every face index of a raw snapshot is in range.
///
/// The engine's free functions take raw slices; this is the check they run
/// before indexing positions.
pub fn validate_indices(num_vertices: usize, faces: &[[u32; 3]]) -> Result<()> {
    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.iter().find(|&&vi| vi as usize >= num_vertices) {
            return Err(MeshError::InvalidVertexIndex {
                face: fi,
                vertex: vi as usize,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_vertices() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_build_single_triangle() {
        let mesh = build_from_triangles(&triangle_vertices(), &[[0, 1, 2]]).unwrap();
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_empty_mesh() {
        let result = build_from_triangles(&triangle_vertices(), &[]);
        assert_eq!(result, Err(MeshError::EmptyMesh));
    }

    #[test]
    fn test_invalid_index() {
        let result = build_from_triangles(&triangle_vertices(), &[[0, 1, 5]]);
        assert_eq!(result, Err(MeshError::InvalidVertexIndex { face: 0, vertex: 5 }));
    }

    #[test]
    fn test_degenerate_face() {
        let result = build_from_triangles(&triangle_vertices(), &[[0, 1, 2], [1, 1, 2]]);
        assert_eq!(result, Err(MeshError::DegenerateFace { face: 1 }));
    }

    #[test]
    fn test_validate_indices() {
        assert!(validate_indices(3, &[[0, 1, 2]]).is_ok());
        assert_eq!(
            validate_indices(3, &[[0, 1, 2], [2, 3, 0]]),
            Err(MeshError::InvalidVertexIndex { face: 1, vertex: 3 })
        );
    }
}
