//! Core quad/hex triangulation type.
//!
//! Cells are tensor-product elements (quadrilaterals in 2D, hexahedra in 3D)
//! whose vertices are stored in lexicographic order: the local vertex index
//! `i` has bit `d` set when the vertex sits on the high side along axis `d`.
//!
//! ```text
//!   2D          2 ───── 3
//!               │       │        face 0: x-low   face 1: x-high
//!               │       │        face 2: y-low   face 3: y-high
//!               0 ───── 1        (3D adds face 4: z-low, face 5: z-high)
//! ```
//!
//! Face `2d + s` is the side with coordinate `s` (0 = low, 1 = high) along
//! axis `d`. Every cell carries one material tag and one optional boundary
//! tag per face.

use std::collections::BTreeSet;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use pemgrid_types::{BoundaryId, CellId, MaterialId, PemgridError, PemgridResult, VertexId};

use crate::topology::Topology;

/// A single quad/hex cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Vertex indices in lexicographic order (`2^dim` entries).
    pub vertices: Vec<VertexId>,
    /// Material tag.
    pub material_id: MaterialId,
    /// Boundary tag per local face (`2 * dim` entries). `None` on untagged faces.
    pub face_ids: Vec<Option<BoundaryId>>,
}

/// A conforming quad (2D) or hex (3D) mesh with material and boundary tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    /// Spatial dimension (2 or 3).
    pub dim: usize,
    /// Vertex coordinates. `z = 0` for 2D meshes.
    pub vertices: Vec<DVec3>,
    /// Cells.
    pub cells: Vec<Cell>,
}

/// Local vertex indices (lexicographic) that make up local face `face`.
pub fn face_local_vertices(dim: usize, face: usize) -> Vec<usize> {
    let axis = face / 2;
    let side = face % 2;
    (0..1usize << dim)
        .filter(|v| (v >> axis) & 1 == side)
        .collect()
}

impl Triangulation {
    /// Creates an empty triangulation of the given dimension.
    pub fn new(dim: usize) -> Self {
        assert!(dim == 2 || dim == 3, "Dimension must be 2 or 3");
        Self {
            dim,
            vertices: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Returns true if the triangulation holds neither vertices nor cells.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.cells.is_empty()
    }

    /// Removes all vertices and cells, keeping the dimension.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.cells.clear();
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Vertices per cell: 4 in 2D, 8 in 3D.
    #[inline]
    pub fn vertices_per_cell(&self) -> usize {
        1 << self.dim
    }

    /// Faces per cell: 4 in 2D, 6 in 3D.
    #[inline]
    pub fn faces_per_cell(&self) -> usize {
        2 * self.dim
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, p: DVec3) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(p);
        id
    }

    /// Adds a cell with all faces untagged and returns its index.
    pub fn add_cell(&mut self, vertices: Vec<VertexId>, material_id: MaterialId) -> CellId {
        let id = CellId(self.cells.len() as u32);
        self.cells.push(Cell {
            vertices,
            material_id,
            face_ids: vec![None; 2 * self.dim],
        });
        id
    }

    #[inline]
    pub fn vertex(&self, v: VertexId) -> DVec3 {
        self.vertices[v.index()]
    }

    #[inline]
    pub fn cell(&self, c: CellId) -> &Cell {
        &self.cells[c.index()]
    }

    /// Global vertex indices of local face `face` of cell `c`.
    pub fn face_vertices(&self, c: CellId, face: usize) -> Vec<VertexId> {
        let cell = &self.cells[c.index()];
        face_local_vertices(self.dim, face)
            .into_iter()
            .map(|lv| cell.vertices[lv])
            .collect()
    }

    /// Arithmetic mean of the cell's vertices.
    pub fn cell_center(&self, c: CellId) -> DVec3 {
        let cell = &self.cells[c.index()];
        let sum: DVec3 = cell.vertices.iter().map(|&v| self.vertex(v)).sum();
        sum / cell.vertices.len() as f64
    }

    /// Arithmetic mean of the vertices of local face `face` of cell `c`.
    pub fn face_center(&self, c: CellId, face: usize) -> DVec3 {
        let verts = self.face_vertices(c, face);
        let sum: DVec3 = verts.iter().map(|&v| self.vertex(v)).sum();
        sum / verts.len() as f64
    }

    /// Sets the boundary tag of one cell face.
    pub fn set_face_id(&mut self, c: CellId, face: usize, id: Option<BoundaryId>) {
        self.cells[c.index()].face_ids[face] = id;
    }

    /// Sets the material tag of every cell.
    pub fn set_all_material_ids(&mut self, material_id: MaterialId) {
        for cell in &mut self.cells {
            cell.material_id = material_id;
        }
    }

    /// Tags every boundary face for which `tag` returns `Some`.
    ///
    /// The closure receives the face center and the local face index.
    /// Faces for which it returns `None` keep their current tag.
    pub fn tag_boundary_faces<F>(&mut self, tag: F)
    where
        F: Fn(DVec3, usize) -> Option<BoundaryId>,
    {
        let topology = Topology::build(self);
        for (c, face) in topology.boundary_faces() {
            if let Some(id) = tag(self.face_center(c, face), face) {
                self.set_face_id(c, face, Some(id));
            }
        }
    }

    /// Distinct material tags over all cells.
    pub fn material_ids(&self) -> BTreeSet<MaterialId> {
        self.cells.iter().map(|c| c.material_id).collect()
    }

    /// Number of cells carrying `material_id`.
    pub fn count_cells_with_material(&self, material_id: MaterialId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.material_id == material_id)
            .count()
    }

    /// Distinct tags found on boundary faces.
    pub fn boundary_ids(&self) -> BTreeSet<BoundaryId> {
        let topology = Topology::build(self);
        topology
            .boundary_faces()
            .into_iter()
            .filter_map(|(c, f)| self.cells[c.index()].face_ids[f])
            .collect()
    }

    /// Distinct tags found on internal faces (material interfaces).
    pub fn interface_ids(&self) -> BTreeSet<BoundaryId> {
        let topology = Topology::build(self);
        topology
            .internal_faces()
            .into_iter()
            .filter_map(|((c, f), _)| self.cells[c.index()].face_ids[f])
            .collect()
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut lo = DVec3::splat(f64::INFINITY);
        let mut hi = DVec3::splat(f64::NEG_INFINITY);
        for &p in &self.vertices {
            lo = lo.min(p);
            hi = hi.max(p);
        }
        (lo, hi)
    }

    /// Shortest cell edge length. `f64::INFINITY` for an empty mesh.
    pub fn min_edge_length(&self) -> f64 {
        let mut min = f64::INFINITY;
        for cell in &self.cells {
            for axis in 0..self.dim {
                for lv in 0..cell.vertices.len() {
                    if (lv >> axis) & 1 == 0 {
                        let a = self.vertex(cell.vertices[lv]);
                        let b = self.vertex(cell.vertices[lv | (1 << axis)]);
                        min = min.min(a.distance(b));
                    }
                }
            }
        }
        min
    }

    /// Multiplies every coordinate by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.vertices {
            *p *= factor;
        }
    }

    /// Validates structural integrity.
    ///
    /// Checks:
    /// - Dimension is 2 or 3
    /// - Every cell has `2^dim` vertices and `2 * dim` face slots
    /// - Vertex indices are within bounds and not repeated within a cell
    /// - 2D meshes lie in the z = 0 plane
    pub fn validate(&self) -> PemgridResult<()> {
        if self.dim != 2 && self.dim != 3 {
            return Err(PemgridError::InvalidMesh(format!(
                "Unsupported dimension {}",
                self.dim
            )));
        }

        let n = self.vertices.len();
        let nv = self.vertices_per_cell();
        let nf = self.faces_per_cell();

        for (i, cell) in self.cells.iter().enumerate() {
            if cell.vertices.len() != nv {
                return Err(PemgridError::InvalidMesh(format!(
                    "Cell {} has {} vertices, expected {}",
                    i,
                    cell.vertices.len(),
                    nv
                )));
            }
            if cell.face_ids.len() != nf {
                return Err(PemgridError::InvalidMesh(format!(
                    "Cell {} has {} face slots, expected {}",
                    i,
                    cell.face_ids.len(),
                    nf
                )));
            }
            for &v in &cell.vertices {
                if v.index() >= n {
                    return Err(PemgridError::InvalidMesh(format!(
                        "Cell {} references vertex {} (vertex count: {})",
                        i, v.0, n
                    )));
                }
            }
            let mut sorted = cell.vertices.clone();
            sorted.sort();
            sorted.dedup();
            if sorted.len() != nv {
                return Err(PemgridError::InvalidMesh(format!(
                    "Cell {} has repeated vertex indices",
                    i
                )));
            }
        }

        if self.dim == 2 {
            if let Some(i) = self.vertices.iter().position(|p| p.z != 0.0) {
                return Err(PemgridError::InvalidMesh(format!(
                    "Vertex {} of a 2D mesh has non-zero z",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Checks the tagging contract consumed by solvers: every boundary face
    /// carries a boundary tag, and tagged internal faces agree on both sides.
    pub fn validate_tagging(&self) -> PemgridResult<()> {
        let topology = Topology::build(self);

        for (c, f) in topology.boundary_faces() {
            if self.cells[c.index()].face_ids[f].is_none() {
                return Err(PemgridError::InvalidMesh(format!(
                    "Boundary face {} of cell {} has no boundary id",
                    f, c.0
                )));
            }
        }

        for ((ca, fa), (cb, fb)) in topology.internal_faces() {
            let a = self.cells[ca.index()].face_ids[fa];
            let b = self.cells[cb.index()].face_ids[fb];
            if a != b {
                return Err(PemgridError::InvalidMesh(format!(
                    "Internal face between cells {} and {} is tagged {:?} / {:?}",
                    ca.0, cb.0, a, b
                )));
            }
        }

        Ok(())
    }
}
