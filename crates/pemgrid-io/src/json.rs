//! JSON mesh files: a serialized [`Triangulation`].

use std::fs;
use std::path::Path;

use pemgrid_mesh::Triangulation;
use pemgrid_types::{PemgridError, PemgridResult};

/// Reads a triangulation from a JSON file.
///
/// # Errors
/// `ImportFailure` if the file cannot be read or does not hold a valid
/// triangulation.
pub fn load_json<P: AsRef<Path>>(path: P) -> PemgridResult<Triangulation> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| PemgridError::import(path, format!("cannot read file: {}", e)))?;
    let tria: Triangulation = serde_json::from_str(&content)
        .map_err(|e| PemgridError::import(path, format!("malformed JSON mesh: {}", e)))?;
    tria.validate()
        .map_err(|e| PemgridError::import(path, e.to_string()))?;
    Ok(tria)
}

/// Writes a triangulation as pretty-printed JSON.
pub fn save_json<P: AsRef<Path>>(tria: &Triangulation, path: P) -> PemgridResult<()> {
    let json = to_json_string(tria)?;
    fs::write(path, json)?;
    Ok(())
}

/// Serializes a triangulation to a pretty-printed JSON string.
pub fn to_json_string(tria: &Triangulation) -> PemgridResult<String> {
    serde_json::to_string_pretty(tria).map_err(|e| PemgridError::Serialization(e.to_string()))
}
