//! Procedural meshes.
//!
//! Generated shapes serve as default scenes and as fixtures with known
//! topology:
//!
//! | Shape           | b0 | b1 | b2 |
//! |-----------------|----|----|----|
//! | [`plane`]       | 1  | 0  | 0  |
//! | [`tetrahedron`] | 1  | 0  | 1  |
//! | [`cylinder`]    | 1  | 1  | 0  |
//! | [`torus`]       | 1  | 2  | 1  |

use std::f64::consts::TAU;

use nalgebra::Point3;

use super::trimesh::TriMesh;
use crate::error::{MeshError, Result};

/// Squared-distance threshold for [`plane`] meshes with unit cells.
///
/// Cell diagonals have a squared length of exactly `2.0` and are rejected,
/// leaving the axis-aligned lattice as the spring graph.
pub const PLANE_THRESHOLD: f64 = 2.0;

/// A flat `width × height` grid of unit cells in the XY plane, centered on
/// the origin.
///
/// Vertices are numbered row-major starting at the top-left corner, so the
/// top row is `0..=width` and the bottom row ends at `(width + 1) * (height + 1) - 1`.
/// Each cell contributes the triangles `(a, b, d)` and `(b, c, d)` where `a`
/// is its top-left, `b` bottom-left, `c` bottom-right and `d` top-right corner.
pub fn plane(width: usize, height: usize) -> Result<TriMesh> {
    if width == 0 {
        return Err(MeshError::invalid_param("width", width, "must be at least 1"));
    }
    if height == 0 {
        return Err(MeshError::invalid_param("height", height, "must be at least 1"));
    }

    let cols = width + 1;
    let rows = height + 1;
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;

    let mut mesh = TriMesh::with_capacity(cols * rows, width * height * 2);

    for iy in 0..rows {
        let y = iy as f64 - half_h;
        for ix in 0..cols {
            let x = ix as f64 - half_w;
            mesh.positions.push(Point3::new(x, -y, 0.0));
        }
    }

    for iy in 0..height {
        for ix in 0..width {
            let a = (ix + cols * iy) as u32;
            let b = (ix + cols * (iy + 1)) as u32;
            let c = (ix + 1 + cols * (iy + 1)) as u32;
            let d = (ix + 1 + cols * iy) as u32;
            mesh.faces.push([a, b, d]);
            mesh.faces.push([b, c, d]);
        }
    }

    Ok(mesh)
}

/// A closed tetrahedron with consistently oriented faces.
pub fn tetrahedron() -> TriMesh {
    TriMesh {
        positions: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ],
        faces: vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ],
    }
}

/// An open tube of `segments` quads around and `stacks` quads along Z.
pub fn cylinder(radius: f64, height: f64, segments: usize, stacks: usize) -> Result<TriMesh> {
    if segments < 3 {
        return Err(MeshError::invalid_param("segments", segments, "must be at least 3"));
    }
    if stacks == 0 {
        return Err(MeshError::invalid_param("stacks", stacks, "must be at least 1"));
    }

    let mut mesh = TriMesh::with_capacity(segments * (stacks + 1), segments * stacks * 2);
    for j in 0..=stacks {
        let z = height * j as f64 / stacks as f64;
        for i in 0..segments {
            let t = TAU * i as f64 / segments as f64;
            mesh.positions.push(Point3::new(radius * t.cos(), radius * t.sin(), z));
        }
    }

    let idx = |i: usize, j: usize| (j * segments + i % segments) as u32;
    for j in 0..stacks {
        for i in 0..segments {
            let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        }
    }

    Ok(mesh)
}

/// A closed torus around the Z axis.
///
/// Indices wrap around in both directions, so the last ring and column are
/// joined to the first ones.
pub fn torus(major: f64, minor: f64, segments: usize, rings: usize) -> Result<TriMesh> {
    if segments < 3 {
        return Err(MeshError::invalid_param("segments", segments, "must be at least 3"));
    }
    if rings < 3 {
        return Err(MeshError::invalid_param("rings", rings, "must be at least 3"));
    }

    let mut mesh = TriMesh::with_capacity(segments * rings, segments * rings * 2);
    for i in 0..segments {
        let u = TAU * i as f64 / segments as f64;
        for j in 0..rings {
            let v = TAU * j as f64 / rings as f64;
            let r = major + minor * v.cos();
            mesh.positions.push(Point3::new(r * u.cos(), r * u.sin(), minor * v.sin()));
        }
    }

    let idx = |i: usize, j: usize| ((i % segments) * rings + j % rings) as u32;
    for i in 0..segments {
        for j in 0..rings {
            let (a, b, c, d) = (idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1));
            mesh.faces.push([a, b, c]);
            mesh.faces.push([a, c, d]);
        }
    }

    Ok(mesh)
}
