//! Catalyst agglomerate: a spherical core wrapped in a thin ionomer film,
//! meshed as a 2D cross-section.
//!
//! The disk is an O-grid (see [`DiskSpec`]). The core boundary is the
//! regular polygon inscribed in the core circle whose corners sit on the
//! O-grid rays, so a cell belongs to the core exactly when its center lies
//! inside that polygon. Construction assigns materials through
//! [`reset_material_ids`] as well, which is what makes re-deriving them
//! after refinement reproduce the original regions.

use std::f64::consts::PI;

use glam::DVec3;
use pemgrid_mesh::generators::{disk_o_grid, DiskSpec};
use pemgrid_mesh::Triangulation;
use pemgrid_types::constants::{BID_AGGLOMERATE_SURFACE, MAT_AGGLOMERATE_CORE, MAT_AGGLOMERATE_FILM};
use pemgrid_types::{CellId, PemgridResult};

use crate::config::AgglomerateConfig;

fn disk_spec(cfg: &AgglomerateConfig) -> DiskSpec {
    DiskSpec {
        center: DVec3::ZERO,
        inner_radius: cfg.core_radius,
        outer_radius: cfg.core_radius + cfg.film_thickness,
        square_cells: cfg.core_cells,
        inner_rings: cfg.core_rings,
        outer_rings: cfg.film_cells,
    }
}

/// Regular polygon inscribed in the core circle.
struct CorePolygon {
    /// Outward unit normals of the polygon edges.
    normals: Vec<DVec3>,
    /// Distance from the center to every edge.
    apothem: f64,
}

impl CorePolygon {
    fn new(spec: &DiskSpec) -> Self {
        let n = spec.angular_segments();
        let half_sector = PI / n as f64;
        let normals = (0..n)
            .map(|k| {
                let theta = spec.start_angle() + 2.0 * half_sector * k as f64 + half_sector;
                DVec3::new(theta.cos(), theta.sin(), 0.0)
            })
            .collect();
        Self {
            normals,
            apothem: spec.inner_radius * half_sector.cos(),
        }
    }

    fn contains(&self, p: DVec3) -> bool {
        self.normals.iter().all(|nk| nk.dot(p) < self.apothem)
    }
}

/// Builds the agglomerate cross-section: core material 1, film material 2,
/// outer film surface tagged 1.
pub fn build(cfg: &AgglomerateConfig) -> PemgridResult<Triangulation> {
    let mut tria = disk_o_grid(&disk_spec(cfg))?;
    tria.tag_boundary_faces(|_, _| Some(BID_AGGLOMERATE_SURFACE));
    reset_material_ids(cfg, &mut tria);
    Ok(tria)
}

/// Re-derives every cell's material from its position: core if the cell
/// center lies inside the core polygon, film otherwise. Idempotent.
pub fn reset_material_ids(cfg: &AgglomerateConfig, tria: &mut Triangulation) {
    let polygon = CorePolygon::new(&disk_spec(cfg));
    for c in 0..tria.n_cells() {
        let id = CellId(c as u32);
        let material = if polygon.contains(tria.cell_center(id)) {
            MAT_AGGLOMERATE_CORE
        } else {
            MAT_AGGLOMERATE_FILM
        };
        tria.cells[c].material_id = material;
    }
}
