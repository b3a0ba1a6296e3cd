//! # pemgrid-geometry
//!
//! Named mesh-geometry generators for fuel-cell simulations.
//!
//! Each generator builds a tagged triangulation of a fuel-cell
//! cross-section (or a test domain): every cell gets a material id and
//! every boundary face a boundary id from the numbering tables in
//! [`pemgrid_types::constants`].
//!
//! ## Key Types
//!
//! - [`GeometryRegistry`] — Name-to-prototype registry; [`global()`] holds the built-ins.
//! - [`GridGenerator`] — A configurable instance of one [`Geometry`].
//! - [`GridConfig`] — TOML-loadable generation parameters.
//! - [`LayerStack`] — Layered stack construction with zero-thickness elision.

pub mod agglomerate;
pub mod config;
pub mod cube;
pub mod external;
pub mod generator;
pub mod layers;
pub mod registry;

pub use config::{AgglomerateConfig, ExternalConfig, GridConfig, LayerConfig, LayerParams};
pub use generator::{names, GenerationState, Geometry, GridGenerator};
pub use layers::{LayerStack, StackKind};
pub use registry::{global, GeometryRegistry};
