//! Grid generators.
//!
//! A [`GridGenerator`] is a named, configurable instance of one
//! [`Geometry`] variant. Instances are normally obtained from a
//! [`GeometryRegistry`](crate::GeometryRegistry), which clones a registered
//! prototype under the requested name.
//!
//! Each instance fills exactly one mesh:
//!
//! ```text
//!   Unconstructed ──generate_grid──▶ Generated
//! ```

use pemgrid_mesh::{refine_global, Triangulation};
use pemgrid_types::{PemgridError, PemgridResult};

use crate::agglomerate;
use crate::config::{check_refinements, AgglomerateConfig, ExternalConfig, GridConfig, LayerConfig};
use crate::cube;
use crate::external;
use crate::layers::{LayerStack, StackKind};

/// Registry names of the built-in geometries.
pub mod names {
    pub const HYPER_CUBE: &str = "HyperCube";
    pub const GRID_TEST: &str = "GridTest";
    /// Its prototype has no file path, so an instance must be configured
    /// with `external.path` before `generate_grid` can succeed.
    pub const GRID_EXTERNAL: &str = "GridExternal";
    pub const CATHODE_MPL: &str = "CathodeMPL";
    pub const PEMFC_MPL: &str = "PemfcMPL";
    pub const AGGLOMERATE: &str = "Agglomerate";
}

/// Every supported geometry, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Unit square/cube, material 1, all boundary faces 0.
    HyperCube,
    /// One-cell fixture with every face tagged distinctly.
    GridTest,
    /// Mesh read from a file, ids trusted.
    External(ExternalConfig),
    /// Cathode GDL, MPL, CL, and membrane.
    CathodeMpl(LayerConfig),
    /// Cathode, membrane, and anode.
    PemfcMpl(LayerConfig),
    /// Core and film cross-section (2D only).
    Agglomerate(AgglomerateConfig),
}

/// Lifecycle of a generator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Unconstructed,
    Generated,
}

/// A named geometry instance that can fill one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGenerator {
    name: String,
    geometry: Geometry,
    initial_refinements: u32,
    state: GenerationState,
}

impl GridGenerator {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            initial_refinements: 0,
            state: GenerationState::Unconstructed,
        }
    }

    /// Prototypes of the built-in geometries with default parameters, in
    /// registration order.
    pub fn builtins() -> Vec<Self> {
        vec![
            Self::new(names::HYPER_CUBE, Geometry::HyperCube),
            Self::new(names::GRID_TEST, Geometry::GridTest),
            Self::new(names::GRID_EXTERNAL, Geometry::External(ExternalConfig::default())),
            Self::new(names::CATHODE_MPL, Geometry::CathodeMpl(LayerConfig::default())),
            Self::new(names::PEMFC_MPL, Geometry::PemfcMpl(LayerConfig::default())),
            Self::new(
                names::AGGLOMERATE,
                Geometry::Agglomerate(AgglomerateConfig::default()),
            ),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn initial_refinements(&self) -> u32 {
        self.initial_refinements
    }

    /// A fresh, unconstructed instance carrying `name` and this instance's
    /// parameters.
    pub fn clone_by_name(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            geometry: self.geometry.clone(),
            initial_refinements: self.initial_refinements,
            state: GenerationState::Unconstructed,
        }
    }

    /// Applies the sections of `config` this geometry uses.
    ///
    /// All values are validated before anything is changed.
    ///
    /// # Errors
    /// - `AlreadyGenerated` once the grid has been built.
    /// - `InvalidLayerParameters` for invalid geometric parameters.
    pub fn configure(&mut self, config: &GridConfig) -> PemgridResult<()> {
        self.ensure_unconstructed()?;
        config.validate_common()?;

        let geometry = match &self.geometry {
            Geometry::HyperCube => Geometry::HyperCube,
            Geometry::GridTest => Geometry::GridTest,
            Geometry::External(_) => Geometry::External(config.external.clone()),
            Geometry::CathodeMpl(_) => {
                LayerStack::new(StackKind::Cathode, &config.layers)?;
                Geometry::CathodeMpl(config.layers.clone())
            }
            Geometry::PemfcMpl(_) => {
                LayerStack::new(StackKind::FullCell, &config.layers)?;
                Geometry::PemfcMpl(config.layers.clone())
            }
            Geometry::Agglomerate(_) => {
                config.agglomerate.validate()?;
                Geometry::Agglomerate(config.agglomerate.clone())
            }
        };

        self.geometry = geometry;
        self.initial_refinements = config.initial_refinements;
        tracing::debug!(
            name = %self.name,
            initial_refinements = self.initial_refinements,
            "configured generator"
        );
        Ok(())
    }

    /// Sets the number of uniform refinements applied after construction.
    ///
    /// # Errors
    /// `AlreadyGenerated`, or `InvalidLayerParameters` above
    /// [`MAX_INITIAL_REFINEMENTS`](pemgrid_types::constants::MAX_INITIAL_REFINEMENTS).
    pub fn set_initial_refinements(&mut self, times: u32) -> PemgridResult<()> {
        self.ensure_unconstructed()?;
        check_refinements(times)?;
        self.initial_refinements = times;
        Ok(())
    }

    /// Fills the empty mesh `tria` with this geometry, in `tria.dim`
    /// dimensions, and tags every cell and boundary face.
    ///
    /// On error `tria` is left untouched.
    ///
    /// # Errors
    /// - `AlreadyGenerated` on a second call.
    /// - `MeshNotEmpty` if `tria` holds vertices or cells.
    /// - `InvalidLayerParameters`, `UnsupportedDimension`, or `ImportFailure`
    ///   from the geometry itself.
    pub fn generate_grid(&mut self, tria: &mut Triangulation) -> PemgridResult<()> {
        self.ensure_unconstructed()?;
        if !tria.is_empty() {
            return Err(PemgridError::MeshNotEmpty);
        }

        let dim = tria.dim;
        let mut grid = self.build(dim)?;
        refine_global(&mut grid, self.initial_refinements);

        *tria = grid;
        self.state = GenerationState::Generated;

        tracing::info!(
            name = %self.name,
            dim,
            cells = tria.n_cells(),
            vertices = tria.n_vertices(),
            materials = ?tria.material_ids(),
            "generated grid"
        );
        Ok(())
    }

    /// Re-derives cell materials from position (agglomerate only).
    ///
    /// # Errors
    /// `InvalidConfig` for geometries whose materials are not a function of
    /// position.
    pub fn reset_material_ids(&self, tria: &mut Triangulation) -> PemgridResult<()> {
        match &self.geometry {
            Geometry::Agglomerate(cfg) => {
                agglomerate::reset_material_ids(cfg, tria);
                Ok(())
            }
            _ => Err(PemgridError::InvalidConfig(format!(
                "Geometry '{}' does not derive materials from position",
                self.name
            ))),
        }
    }

    fn ensure_unconstructed(&self) -> PemgridResult<()> {
        match self.state {
            GenerationState::Unconstructed => Ok(()),
            GenerationState::Generated => Err(PemgridError::AlreadyGenerated(self.name.clone())),
        }
    }

    fn build(&self, dim: usize) -> PemgridResult<Triangulation> {
        match &self.geometry {
            Geometry::HyperCube => cube::build_hyper_cube(dim),
            Geometry::GridTest => cube::build_grid_test(dim),
            Geometry::External(cfg) => external::build(cfg, dim),
            Geometry::CathodeMpl(cfg) => LayerStack::new(StackKind::Cathode, cfg)?.build(dim),
            Geometry::PemfcMpl(cfg) => LayerStack::new(StackKind::FullCell, cfg)?.build(dim),
            Geometry::Agglomerate(cfg) => {
                if dim != 2 {
                    return Err(PemgridError::UnsupportedDimension {
                        geometry: self.name.clone(),
                        dim,
                    });
                }
                agglomerate::build(cfg)
            }
        }
    }
}
