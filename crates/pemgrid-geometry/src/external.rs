//! Geometry read from an external mesh file.

use std::path::PathBuf;

use pemgrid_io::import_mesh;
use pemgrid_mesh::Triangulation;
use pemgrid_types::{PemgridError, PemgridResult};

use crate::config::ExternalConfig;

/// Imports the configured mesh file, keeping its embedded ids.
///
/// # Errors
/// `ImportFailure` if no file is configured, the import fails, or the file
/// holds a mesh of a different dimension than `dim`.
pub fn build(cfg: &ExternalConfig, dim: usize) -> PemgridResult<Triangulation> {
    let path = cfg
        .path
        .as_ref()
        .ok_or_else(|| PemgridError::import(PathBuf::new(), "no mesh file configured (external.path)"))?;
    let tria = import_mesh(path, cfg.length_unit)?;
    if tria.dim != dim {
        return Err(PemgridError::import(
            path,
            format!(
                "file holds a {}D mesh but a {}D grid was requested",
                tria.dim, dim
            ),
        ));
    }
    Ok(tria)
}
