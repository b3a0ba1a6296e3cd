//! Grid generation parameters.
//!
//! Every field has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! geometry = "PemfcMPL"
//! dimension = 2
//! initial_refinements = 1
//!
//! [layers]
//! cathode_mpl = { thickness = 0.0, cells = 0 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use pemgrid_io::LengthUnit;
use pemgrid_types::constants::*;
use pemgrid_types::{PemgridError, PemgridResult, Scalar};

/// Thickness (cm) and transverse cell count of one layer.
///
/// A layer with zero thickness is left out of the mesh; its cell count is
/// then ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    pub thickness: Scalar,
    pub cells: usize,
}

impl LayerParams {
    pub const fn new(thickness: Scalar, cells: usize) -> Self {
        Self { thickness, cells }
    }

    /// A zero-thickness layer.
    pub const fn omitted() -> Self {
        Self::new(0.0, 0)
    }

    pub fn is_omitted(&self) -> bool {
        self.thickness == 0.0
    }

    fn validate(&self, name: &str) -> PemgridResult<()> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(PemgridError::InvalidLayerParameters(format!(
                "{} thickness must be finite and >= 0 (got {})",
                name, self.thickness
            )));
        }
        if !self.is_omitted() && self.cells == 0 {
            return Err(PemgridError::InvalidLayerParameters(format!(
                "{} has thickness {} but no cells",
                name, self.thickness
            )));
        }
        Ok(())
    }
}

/// Parameters of the layered cathode and full-cell stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub cathode_gdl: LayerParams,
    pub cathode_mpl: LayerParams,
    pub cathode_cl: LayerParams,
    pub membrane: LayerParams,
    pub anode_cl: LayerParams,
    pub anode_mpl: LayerParams,
    pub anode_gdl: LayerParams,

    /// Cells along y, across the full rib + channel height.
    pub cells_tall: usize,

    /// Height (cm) of the channel part of each outer plate face.
    pub channel_width: Scalar,

    /// Height (cm) of the rib part of each outer plate face, from y = 0.
    pub rib_width: Scalar,

    /// Extrusion depth (cm) in z for 3D stacks.
    pub depth: Scalar,

    /// Cells along z for 3D stacks.
    pub cells_deep: usize,
}

impl Default for LayerConfig {
    fn default() -> Self {
        let gdl = LayerParams::new(DEFAULT_GDL_THICKNESS, DEFAULT_GDL_CELLS);
        let mpl = LayerParams::new(DEFAULT_MPL_THICKNESS, DEFAULT_MPL_CELLS);
        let cl = LayerParams::new(DEFAULT_CL_THICKNESS, DEFAULT_CL_CELLS);
        Self {
            cathode_gdl: gdl,
            cathode_mpl: mpl,
            cathode_cl: cl,
            membrane: LayerParams::new(DEFAULT_MEMBRANE_THICKNESS, DEFAULT_MEMBRANE_CELLS),
            anode_cl: cl,
            anode_mpl: mpl,
            anode_gdl: gdl,
            cells_tall: DEFAULT_CELLS_TALL,
            channel_width: DEFAULT_CHANNEL_WIDTH,
            rib_width: DEFAULT_RIB_WIDTH,
            depth: DEFAULT_DEPTH,
            cells_deep: DEFAULT_CELLS_DEEP,
        }
    }
}

impl LayerConfig {
    /// Total stack height (cm).
    pub fn height(&self) -> Scalar {
        self.rib_width + self.channel_width
    }

    /// Checks each layer, then the parameters shared by all of them.
    pub fn validate(&self) -> PemgridResult<()> {
        let layers = [
            ("cathode GDL", &self.cathode_gdl),
            ("cathode MPL", &self.cathode_mpl),
            ("cathode CL", &self.cathode_cl),
            ("membrane", &self.membrane),
            ("anode CL", &self.anode_cl),
            ("anode MPL", &self.anode_mpl),
            ("anode GDL", &self.anode_gdl),
        ];
        for (name, layer) in layers {
            layer.validate(name)?;
        }

        if self.cells_tall == 0 {
            return Err(PemgridError::InvalidLayerParameters(
                "cells_tall must be >= 1".into(),
            ));
        }
        for (name, value) in [
            ("channel_width", self.channel_width),
            ("rib_width", self.rib_width),
            ("depth", self.depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PemgridError::InvalidLayerParameters(format!(
                    "{} must be positive (got {})",
                    name, value
                )));
            }
        }
        if self.cells_deep == 0 {
            return Err(PemgridError::InvalidLayerParameters(
                "cells_deep must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the agglomerate (core + ionomer film) geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgglomerateConfig {
    /// Core radius (cm).
    pub core_radius: Scalar,
    /// Film thickness (cm).
    pub film_thickness: Scalar,
    /// Cells along one side of the core's central square.
    pub core_cells: usize,
    /// Radial cell layers between the central square and the core surface.
    pub core_rings: usize,
    /// Radial cell layers across the film.
    pub film_cells: usize,
}

impl Default for AgglomerateConfig {
    fn default() -> Self {
        Self {
            core_radius: DEFAULT_CORE_RADIUS,
            film_thickness: DEFAULT_FILM_THICKNESS,
            core_cells: DEFAULT_CORE_CELLS,
            core_rings: DEFAULT_CORE_RINGS,
            film_cells: DEFAULT_FILM_CELLS,
        }
    }
}

impl AgglomerateConfig {
    pub fn validate(&self) -> PemgridResult<()> {
        for (name, value) in [
            ("core_radius", self.core_radius),
            ("film_thickness", self.film_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PemgridError::InvalidLayerParameters(format!(
                    "{} must be positive (got {})",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("core_cells", self.core_cells),
            ("core_rings", self.core_rings),
            ("film_cells", self.film_cells),
        ] {
            if value == 0 {
                return Err(PemgridError::InvalidLayerParameters(format!(
                    "{} must be >= 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Parameters of the external mesh importer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    /// Mesh file (`.msh` or `.json`).
    pub path: Option<PathBuf>,
    /// Length unit of the coordinates in the file.
    pub length_unit: LengthUnit,
}

/// Complete grid generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Registered geometry name.
    pub geometry: String,

    /// Spatial dimension (2 or 3).
    pub dimension: usize,

    /// Uniform refinements applied after construction.
    pub initial_refinements: u32,

    pub layers: LayerConfig,
    pub agglomerate: AgglomerateConfig,
    pub external: ExternalConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            geometry: "HyperCube".to_string(),
            dimension: 2,
            initial_refinements: 0,
            layers: LayerConfig::default(),
            agglomerate: AgglomerateConfig::default(),
            external: ExternalConfig::default(),
        }
    }
}

impl GridConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> PemgridResult<Self> {
        toml::from_str(content).map_err(|e| PemgridError::InvalidConfig(e.to_string()))
    }

    /// Reads a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> PemgridResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml_string(&self) -> PemgridResult<String> {
        toml::to_string_pretty(self).map_err(|e| PemgridError::Serialization(e.to_string()))
    }

    /// Checks the parameters every geometry shares.
    pub fn validate_common(&self) -> PemgridResult<()> {
        if self.dimension != 2 && self.dimension != 3 {
            return Err(PemgridError::InvalidLayerParameters(format!(
                "dimension must be 2 or 3 (got {})",
                self.dimension
            )));
        }
        check_refinements(self.initial_refinements)
    }
}

/// Rejects refinement counts above [`MAX_INITIAL_REFINEMENTS`].
pub fn check_refinements(times: u32) -> PemgridResult<()> {
    if times > MAX_INITIAL_REFINEMENTS {
        return Err(PemgridError::InvalidLayerParameters(format!(
            "initial_refinements must be <= {} (got {})",
            MAX_INITIAL_REFINEMENTS, times
        )));
    }
    Ok(())
}
