//! Numbering tables and geometric defaults.
//!
//! Material and boundary identifiers are a contract with the downstream
//! solvers and must never be renumbered. Lengths are in centimeters.

use crate::ids::{BoundaryId, MaterialId};

// ─── Material identifiers ─────────────────────────────────────────────

/// Single-region domains (HyperCube, GridTest) and the agglomerate core.
pub const MAT_DEFAULT: MaterialId = MaterialId(1);
pub const MAT_AGGLOMERATE_CORE: MaterialId = MaterialId(1);
pub const MAT_AGGLOMERATE_FILM: MaterialId = MaterialId(2);

pub const MAT_CATHODE_GDL: MaterialId = MaterialId(2);
pub const MAT_CATHODE_MPL: MaterialId = MaterialId(3);
pub const MAT_CATHODE_CL: MaterialId = MaterialId(4);
pub const MAT_MEMBRANE: MaterialId = MaterialId(5);
pub const MAT_ANODE_CL: MaterialId = MaterialId(6);
pub const MAT_ANODE_MPL: MaterialId = MaterialId(7);
pub const MAT_ANODE_GDL: MaterialId = MaterialId(8);

// ─── Boundary identifiers ─────────────────────────────────────────────

pub const BID_SYMMETRY: BoundaryId = BoundaryId::SYMMETRY;

pub const BID_CATHODE_PLATE: BoundaryId = BoundaryId(1);
pub const BID_CATHODE_CHANNEL: BoundaryId = BoundaryId(2);
pub const BID_CATHODE_GDL_MPL: BoundaryId = BoundaryId(9);
pub const BID_CATHODE_MPL_CL: BoundaryId = BoundaryId(10);
pub const BID_CATHODE_CL_MEMBRANE: BoundaryId = BoundaryId(4);
pub const BID_ANODE_CL_MEMBRANE: BoundaryId = BoundaryId(5);
pub const BID_ANODE_CL_MPL: BoundaryId = BoundaryId(11);
pub const BID_ANODE_MPL_GDL: BoundaryId = BoundaryId(12);
pub const BID_ANODE_PLATE: BoundaryId = BoundaryId(7);
pub const BID_ANODE_CHANNEL: BoundaryId = BoundaryId(8);

/// Outer surface of the agglomerate thin film.
pub const BID_AGGLOMERATE_SURFACE: BoundaryId = BoundaryId(1);

// ─── Layer defaults ───────────────────────────────────────────────────

pub const DEFAULT_GDL_THICKNESS: f64 = 2.0e-2;
pub const DEFAULT_MPL_THICKNESS: f64 = 2.0e-3;
pub const DEFAULT_CL_THICKNESS: f64 = 1.0e-3;
pub const DEFAULT_MEMBRANE_THICKNESS: f64 = 2.0e-2;

pub const DEFAULT_GDL_CELLS: usize = 4;
pub const DEFAULT_MPL_CELLS: usize = 1;
pub const DEFAULT_CL_CELLS: usize = 1;
pub const DEFAULT_MEMBRANE_CELLS: usize = 4;

/// Cells along the stack height (y).
pub const DEFAULT_CELLS_TALL: usize = 6;

/// Width of the gas channel and of the bipolar-plate rib (the stack height
/// is their sum).
pub const DEFAULT_CHANNEL_WIDTH: f64 = 0.1;
pub const DEFAULT_RIB_WIDTH: f64 = 0.1;

/// Out-of-plane extent of 3D layered stacks.
pub const DEFAULT_DEPTH: f64 = 0.1;
pub const DEFAULT_CELLS_DEEP: usize = 1;

// ─── Agglomerate defaults ─────────────────────────────────────────────

pub const DEFAULT_CORE_RADIUS: f64 = 1.0e-4;
pub const DEFAULT_FILM_THICKNESS: f64 = 1.0e-5;
pub const DEFAULT_CORE_CELLS: usize = 4;
pub const DEFAULT_CORE_RINGS: usize = 2;
pub const DEFAULT_FILM_CELLS: usize = 1;

/// Upper bound on uniform refinements after construction; each one
/// multiplies the cell count by `2^dim`.
pub const MAX_INITIAL_REFINEMENTS: u32 = 8;

// ─── Tolerances ───────────────────────────────────────────────────────

/// Relative tolerance (w.r.t. the smallest edge) for welding coincident vertices.
pub const WELD_TOLERANCE: f64 = 1.0e-6;
