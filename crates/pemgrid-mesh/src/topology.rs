//! Face topology queries.
//!
//! Builds face-to-cell adjacency from the cell vertex lists. Faces are
//! matched through a canonical key (the sorted global vertex indices), so
//! two cells share a face exactly when they share all of its vertices.

use std::collections::HashMap;

use pemgrid_types::CellId;

use crate::triangulation::{face_local_vertices, Triangulation};

/// A cell face addressed as `(cell, local face index)`.
pub type CellFace = (CellId, usize);

/// Precomputed neighbor information for a triangulation.
///
/// Built on demand; it is not kept in sync with later mesh edits.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each cell and local face, the neighboring cell face, if any.
    neighbors: Vec<Vec<Option<CellFace>>>,
}

impl Topology {
    /// Build topology from a triangulation.
    pub fn build(tria: &Triangulation) -> Self {
        let nf = tria.faces_per_cell();
        let local: Vec<Vec<usize>> = (0..nf)
            .map(|f| face_local_vertices(tria.dim, f))
            .collect();

        // Key: sorted vertex indices of the face
        let mut face_map: HashMap<Vec<u32>, Vec<CellFace>> = HashMap::new();
        for (ci, cell) in tria.cells.iter().enumerate() {
            for (f, lv) in local.iter().enumerate() {
                let mut key: Vec<u32> = lv.iter().map(|&i| cell.vertices[i].0).collect();
                key.sort_unstable();
                face_map
                    .entry(key)
                    .or_default()
                    .push((CellId(ci as u32), f));
            }
        }

        let mut neighbors = vec![vec![None; nf]; tria.n_cells()];
        for sharing in face_map.values() {
            if let [a, b] = sharing.as_slice() {
                neighbors[a.0.index()][a.1] = Some(*b);
                neighbors[b.0.index()][b.1] = Some(*a);
            }
        }

        Self { neighbors }
    }

    /// The cell face on the other side of `(c, face)`, or `None` on the boundary.
    pub fn neighbor(&self, c: CellId, face: usize) -> Option<CellFace> {
        self.neighbors[c.index()][face]
    }

    /// Returns true if `(c, face)` lies on the domain boundary.
    pub fn is_boundary(&self, c: CellId, face: usize) -> bool {
        self.neighbors[c.index()][face].is_none()
    }

    /// All boundary faces, in cell order.
    pub fn boundary_faces(&self) -> Vec<CellFace> {
        let mut out = Vec::new();
        for (ci, faces) in self.neighbors.iter().enumerate() {
            for (f, n) in faces.iter().enumerate() {
                if n.is_none() {
                    out.push((CellId(ci as u32), f));
                }
            }
        }
        out
    }

    /// All internal faces, each reported once as `(lower cell side, higher cell side)`.
    pub fn internal_faces(&self) -> Vec<(CellFace, CellFace)> {
        let mut out = Vec::new();
        for (ci, faces) in self.neighbors.iter().enumerate() {
            let c = CellId(ci as u32);
            for (f, n) in faces.iter().enumerate() {
                if let Some(other) = n {
                    if other.0 > c {
                        out.push(((c, f), *other));
                    }
                }
            }
        }
        out
    }

    /// Number of boundary faces.
    pub fn boundary_face_count(&self) -> usize {
        self.neighbors
            .iter()
            .flatten()
            .filter(|n| n.is_none())
            .count()
    }
}
