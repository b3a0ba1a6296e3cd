//! Mesh validation and summaries.
//!
//! Checks a triangulation against the tagging contract solvers rely on,
//! catching data-level errors early with clear diagnostics.

use std::collections::BTreeMap;

use serde::Serialize;
use pemgrid_mesh::{Topology, Triangulation};
use pemgrid_types::{BoundaryId, MaterialId, PemgridError, PemgridResult};

/// Validates a mesh that is about to be handed to a solver.
///
/// Checks:
/// - The mesh has at least one cell
/// - Structural integrity (vertex counts, index ranges, 2D planarity)
/// - Every boundary face carries a boundary id
/// - Tagged internal faces carry the same id on both sides
pub fn validate_mesh(tria: &Triangulation) -> PemgridResult<()> {
    if tria.n_cells() == 0 {
        return Err(PemgridError::InvalidMesh("Mesh has no cells".into()));
    }
    tria.validate()?;
    tria.validate_tagging()?;
    Ok(())
}

/// Tags every untagged boundary face with `id`. Returns the number of faces tagged.
pub fn fill_untagged_boundary(tria: &mut Triangulation, id: BoundaryId) -> usize {
    let topology = Topology::build(tria);
    let mut filled = 0;
    for (c, f) in topology.boundary_faces() {
        if tria.cell(c).face_ids[f].is_none() {
            tria.set_face_id(c, f, Some(id));
            filled += 1;
        }
    }
    filled
}

/// Compact description of a mesh's size and tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshSummary {
    pub dim: usize,
    pub n_vertices: usize,
    pub n_cells: usize,
    /// Cell count per material id.
    pub materials: BTreeMap<MaterialId, usize>,
    /// Boundary face count per boundary id.
    pub boundary_faces: BTreeMap<BoundaryId, usize>,
    /// Internal tagged face count per interface id.
    pub interface_faces: BTreeMap<BoundaryId, usize>,
    pub untagged_boundary_faces: usize,
    pub bounding_box: [[f64; 3]; 2],
}

impl MeshSummary {
    pub fn of(tria: &Triangulation) -> Self {
        let topology = Topology::build(tria);

        let mut materials = BTreeMap::new();
        for cell in &tria.cells {
            *materials.entry(cell.material_id).or_insert(0) += 1;
        }

        let mut boundary_faces = BTreeMap::new();
        let mut untagged_boundary_faces = 0;
        for (c, f) in topology.boundary_faces() {
            match tria.cell(c).face_ids[f] {
                Some(id) => *boundary_faces.entry(id).or_insert(0) += 1,
                None => untagged_boundary_faces += 1,
            }
        }

        let mut interface_faces = BTreeMap::new();
        for ((c, f), _) in topology.internal_faces() {
            if let Some(id) = tria.cell(c).face_ids[f] {
                *interface_faces.entry(id).or_insert(0) += 1;
            }
        }

        let (lo, hi) = if tria.n_vertices() == 0 {
            (glam::DVec3::ZERO, glam::DVec3::ZERO)
        } else {
            tria.bounding_box()
        };

        Self {
            dim: tria.dim,
            n_vertices: tria.n_vertices(),
            n_cells: tria.n_cells(),
            materials,
            boundary_faces,
            interface_faces,
            untagged_boundary_faces,
            bounding_box: [lo.to_array(), hi.to_array()],
        }
    }
}

impl std::fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{}D mesh: {} cells, {} vertices",
            self.dim, self.n_cells, self.n_vertices
        )?;
        writeln!(
            f,
            "  bounding box: [{:.6e}, {:.6e}, {:.6e}] .. [{:.6e}, {:.6e}, {:.6e}]",
            self.bounding_box[0][0],
            self.bounding_box[0][1],
            self.bounding_box[0][2],
            self.bounding_box[1][0],
            self.bounding_box[1][1],
            self.bounding_box[1][2]
        )?;
        for (id, count) in &self.materials {
            writeln!(f, "  material {:>3}: {} cells", id, count)?;
        }
        for (id, count) in &self.boundary_faces {
            writeln!(f, "  boundary {:>3}: {} faces", id, count)?;
        }
        for (id, count) in &self.interface_faces {
            writeln!(f, "  interface {:>2}: {} faces", id, count)?;
        }
        if self.untagged_boundary_faces > 0 {
            writeln!(f, "  untagged boundary faces: {}", self.untagged_boundary_faces)?;
        }
        Ok(())
    }
}
