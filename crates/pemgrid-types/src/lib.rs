//! # pemgrid-types
//!
//! Shared identifiers, error types, and numbering constants
//! for the pemgrid geometry toolbox.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other pemgrid crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{PemgridError, PemgridResult};
pub use ids::{BoundaryId, CellId, MaterialId, VertexId};
pub use scalar::Scalar;
