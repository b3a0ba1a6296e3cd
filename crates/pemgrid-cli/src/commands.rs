//! CLI command implementations.

use std::path::Path;

use pemgrid_geometry::GridConfig;
use pemgrid_io::{import_mesh, load_json, save_json, validate_mesh, LengthUnit, MeshSummary};
use pemgrid_mesh::Triangulation;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// List registered geometry kinds.
pub fn list() -> CommandResult {
    println!("Registered geometries");
    println!("─────────────────────");
    for name in pemgrid_geometry::global().names() {
        println!("  {name}");
    }
    Ok(())
}

/// Generate a grid from a config file.
pub fn generate(config_path: &str, output_path: Option<&str>) -> CommandResult {
    println!("pemgrid Generate");
    println!("────────────────");
    println!("Config:   {config_path}");

    let config = GridConfig::load(config_path)?;
    config.validate_common()?;
    println!("Geometry: {}", config.geometry);
    println!();

    let mut generator = pemgrid_geometry::global().create(&config.geometry)?;
    generator.configure(&config)?;

    let mut tria = Triangulation::new(config.dimension);
    generator.generate_grid(&mut tria)?;

    print!("{}", MeshSummary::of(&tria));

    if let Some(path) = output_path {
        save_json(&tria, path)?;
        println!();
        println!("Mesh written to: {path}");
    }

    Ok(())
}

/// Print a summary of a mesh file.
pub fn inspect(path: &str) -> CommandResult {
    println!("pemgrid Mesh Inspector");
    println!("──────────────────────");
    println!();

    let tria = read_mesh(path)?;
    print!("{}", MeshSummary::of(&tria));
    Ok(())
}

/// Validate a config or a mesh.
pub fn validate(path: &str) -> CommandResult {
    println!("pemgrid Validator");
    println!("─────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = GridConfig::load(path)?;
        config.validate_common()?;
        let mut generator = pemgrid_geometry::global().create(&config.geometry)?;
        match generator.configure(&config) {
            Ok(()) => println!("✅ Config is valid ({}, {}D).", config.geometry, config.dimension),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") || path.ends_with(".msh") {
        println!("Validating mesh: {path}");
        let tria = read_mesh(path)?;
        match validate_mesh(&tria) {
            Ok(()) => println!(
                "✅ Mesh is valid ({}D, {} cells, {} vertices).",
                tria.dim,
                tria.n_cells(),
                tria.n_vertices()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config), .json or .msh (mesh).");
    }

    Ok(())
}

/// Reads a JSON mesh as stored, or imports a Gmsh file in centimeters.
fn read_mesh(path: &str) -> Result<Triangulation, Box<dyn std::error::Error>> {
    if path.ends_with(".json") {
        Ok(load_json(path)?)
    } else {
        Ok(import_mesh(Path::new(path), LengthUnit::Cm)?)
    }
}
