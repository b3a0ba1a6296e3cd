//! Unit-cube domains used as benchmarks and pipeline fixtures.

use pemgrid_mesh::generators::hyper_cube;
use pemgrid_mesh::Triangulation;
use pemgrid_types::constants::{BID_SYMMETRY, MAT_DEFAULT};
use pemgrid_types::{BoundaryId, PemgridResult};

/// `[0, 1]^dim` as one cell: material 1, every boundary face 0.
pub fn build_hyper_cube(dim: usize) -> PemgridResult<Triangulation> {
    let mut tria = hyper_cube(dim, 0.0, 1.0)?;
    tria.set_all_material_ids(MAT_DEFAULT);
    tria.tag_boundary_faces(|_, _| Some(BID_SYMMETRY));
    Ok(tria)
}

/// `[0, 1]^dim` as one cell: material 1, faces numbered 1 to `2 * dim`
/// (x-low, x-high, y-low, y-high, z-low, z-high).
pub fn build_grid_test(dim: usize) -> PemgridResult<Triangulation> {
    let mut tria = hyper_cube(dim, 0.0, 1.0)?;
    tria.set_all_material_ids(MAT_DEFAULT);
    tria.tag_boundary_faces(|_, face| Some(BoundaryId(face as u16 + 1)));
    Ok(tria)
}
