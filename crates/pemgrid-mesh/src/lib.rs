//! # pemgrid-mesh
//!
//! Quad/hex triangulations with per-cell material tags and per-face
//! boundary tags — the meshing kernel underneath the geometry generators.
//!
//! ## Key Types
//!
//! - [`Triangulation`] — Vertices, lexicographically ordered cells, and tags.
//! - [`Topology`] — Face adjacency (boundary vs. internal faces).
//! - Structured generators (boxes, O-grid disks), merging of touching
//!   sub-meshes, and uniform refinement that preserves every tag.

pub mod generators;
pub mod merge;
pub mod refine;
pub mod topology;
pub mod triangulation;

pub use merge::merge_triangulations;
pub use refine::refine_global;
pub use topology::Topology;
pub use triangulation::{Cell, Triangulation};
