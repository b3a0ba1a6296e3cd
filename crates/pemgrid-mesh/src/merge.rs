//! Merging of triangulations that touch along shared faces.
//!
//! Vertices of the second mesh that coincide with vertices of the first are
//! welded through a uniform spatial hash. Face tags are kept; a face that
//! becomes internal must carry the same tag on both sides (or on one side
//! only, in which case it is copied to the other).

use std::collections::HashMap;

use glam::DVec3;
use pemgrid_types::constants::WELD_TOLERANCE;
use pemgrid_types::{PemgridError, PemgridResult, VertexId};

use crate::topology::Topology;
use crate::triangulation::{Cell, Triangulation};

/// Uniform grid over vertex positions used to find coincident vertices.
struct WeldGrid {
    inv_cell_size: f64,
    grid: HashMap<(i64, i64, i64), Vec<u32>>,
}

impl WeldGrid {
    fn new(cell_size: f64) -> Self {
        Self {
            inv_cell_size: 1.0 / cell_size,
            grid: HashMap::new(),
        }
    }

    fn cell_key(&self, p: DVec3) -> (i64, i64, i64) {
        let q = (p * self.inv_cell_size).floor();
        (q.x as i64, q.y as i64, q.z as i64)
    }

    fn insert(&mut self, p: DVec3, v: u32) {
        let key = self.cell_key(p);
        self.grid.entry(key).or_default().push(v);
    }

    /// Finds a stored vertex within `tol` of `p`, searching the 27 surrounding cells.
    fn find(&self, p: DVec3, vertices: &[DVec3], tol: f64) -> Option<u32> {
        let (cx, cy, cz) = self.cell_key(p);
        for dx in -1..=1_i64 {
            for dy in -1..=1_i64 {
                for dz in -1..=1_i64 {
                    if let Some(candidates) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) {
                        if let Some(&v) = candidates
                            .iter()
                            .find(|&&v| vertices[v as usize].distance(p) <= tol)
                        {
                            return Some(v);
                        }
                    }
                }
            }
        }
        None
    }
}

/// Merges `b` into a copy of `a`, welding coincident vertices.
///
/// # Errors
/// - `InvalidMesh` if the dimensions differ, or if a welded face carries two
///   different tags.
pub fn merge_triangulations(a: &Triangulation, b: &Triangulation) -> PemgridResult<Triangulation> {
    if a.dim != b.dim {
        return Err(PemgridError::InvalidMesh(format!(
            "Cannot merge a {}D mesh with a {}D mesh",
            a.dim, b.dim
        )));
    }

    let mut merged = a.clone();
    if b.is_empty() {
        return Ok(merged);
    }
    if a.is_empty() {
        return Ok(b.clone());
    }

    let h = a.min_edge_length().min(b.min_edge_length());
    let tol = if h.is_finite() { WELD_TOLERANCE * h } else { WELD_TOLERANCE };
    let mut grid = WeldGrid::new(tol.max(f64::MIN_POSITIVE) * 2.0);
    for (i, &p) in a.vertices.iter().enumerate() {
        grid.insert(p, i as u32);
    }

    let mut remap = Vec::with_capacity(b.n_vertices());
    let mut welded = 0usize;
    for &p in &b.vertices {
        match grid.find(p, &merged.vertices, tol) {
            Some(v) => {
                remap.push(VertexId(v));
                welded += 1;
            }
            None => {
                let id = merged.add_vertex(p);
                grid.insert(p, id.0);
                remap.push(id);
            }
        }
    }

    for cell in &b.cells {
        merged.cells.push(Cell {
            vertices: cell.vertices.iter().map(|v| remap[v.index()]).collect(),
            material_id: cell.material_id,
            face_ids: cell.face_ids.clone(),
        });
    }

    harmonize_internal_tags(&mut merged)?;

    tracing::trace!(
        welded,
        vertices = merged.n_vertices(),
        cells = merged.n_cells(),
        "merged triangulations"
    );

    Ok(merged)
}

/// Makes both sides of every internal face carry the same tag.
fn harmonize_internal_tags(tria: &mut Triangulation) -> PemgridResult<()> {
    let topology = Topology::build(tria);
    for ((ca, fa), (cb, fb)) in topology.internal_faces() {
        let ta = tria.cells[ca.index()].face_ids[fa];
        let tb = tria.cells[cb.index()].face_ids[fb];
        match (ta, tb) {
            (Some(x), Some(y)) if x != y => {
                return Err(PemgridError::InvalidMesh(format!(
                    "Welded face between cells {} and {} has conflicting tags {} and {}",
                    ca.0, cb.0, x, y
                )));
            }
            (Some(x), None) => tria.set_face_id(cb, fb, Some(x)),
            (None, Some(y)) => tria.set_face_id(ca, fa, Some(y)),
            _ => {}
        }
    }
    Ok(())
}
