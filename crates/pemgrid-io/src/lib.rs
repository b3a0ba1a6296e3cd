//! # pemgrid-io
//!
//! Mesh import, export, and validation.
//!
//! Reads foreign meshes (Gmsh 2.2 ASCII `.msh`, serialized `.json`),
//! normalizes coordinates into centimeters, and checks meshes against the
//! material/boundary tagging contract consumed by solvers.

pub mod gmsh;
pub mod json;
pub mod units;
pub mod validator;

use std::path::Path;

use pemgrid_mesh::Triangulation;
use pemgrid_types::{BoundaryId, PemgridError, PemgridResult};

pub use gmsh::GmshLoader;
pub use json::{load_json, save_json};
pub use units::LengthUnit;
pub use validator::{validate_mesh, MeshSummary};

/// Imports a mesh file, choosing the reader by extension.
///
/// Coordinates are scaled from `unit` into centimeters. Material and
/// boundary ids embedded in the file are kept as-is; boundary faces the file
/// leaves untagged get id 0.
///
/// # Errors
/// `ImportFailure` for a missing file, an unknown extension, malformed
/// content, or unsupported element types.
pub fn import_mesh(path: &Path, unit: LengthUnit) -> PemgridResult<Triangulation> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let mut tria = match extension.as_deref() {
        Some("msh") => GmshLoader::load(path)?,
        Some("json") => load_json(path)?,
        _ => {
            return Err(PemgridError::import(
                path,
                "unsupported file extension (expected .msh or .json)",
            ))
        }
    };
    tria.validate()
        .map_err(|e| PemgridError::import(path, e.to_string()))?;

    tria.scale(unit.to_cm());

    let defaulted = validator::fill_untagged_boundary(&mut tria, BoundaryId::SYMMETRY);
    if defaulted > 0 {
        tracing::warn!(
            path = %path.display(),
            faces = defaulted,
            "untagged boundary faces in imported mesh defaulted to 0"
        );
    }

    tracing::info!(
        path = %path.display(),
        unit = %unit,
        dim = tria.dim,
        cells = tria.n_cells(),
        "imported mesh"
    );
    Ok(tria)
}
