//! Error types for pemgrid.
//!
//! All crates return `PemgridResult<T>` from fallible operations.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for pemgrid.
#[derive(Debug, Error)]
pub enum PemgridError {
    /// No geometry is registered under the requested name.
    #[error("Unknown geometry kind '{requested}'. Available: {}", .known.join(", "))]
    UnknownGeometryKind {
        requested: String,
        known: Vec<String>,
    },

    /// Two prototypes were registered under the same name.
    #[error("Geometry kind '{0}' is already registered")]
    DuplicateRegistration(String),

    /// `generate_grid` was called twice on one generator instance.
    #[error("Generator '{0}' has already generated its grid")]
    AlreadyGenerated(String),

    /// `generate_grid` was handed a triangulation that already holds cells.
    #[error("Target triangulation is not empty")]
    MeshNotEmpty,

    /// Layer thicknesses, cell counts, or related geometric parameters are invalid.
    #[error("Invalid layer parameters: {0}")]
    InvalidLayerParameters(String),

    /// The geometry cannot be built in the requested spatial dimension.
    #[error("Geometry '{geometry}' does not support dimension {dim}")]
    UnsupportedDimension { geometry: String, dim: usize },

    /// An external mesh file is missing or malformed.
    #[error("Failed to import mesh from {}: {message}", .path.display())]
    ImportFailure { path: PathBuf, message: String },

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PemgridError {
    /// Shorthand for an [`PemgridError::ImportFailure`] at `path`.
    pub fn import(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ImportFailure {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for `Result<T, PemgridError>`.
pub type PemgridResult<T> = Result<T, PemgridError>;
