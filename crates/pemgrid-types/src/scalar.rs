//! Scalar type alias for mesh coordinates.
//!
//! Layer thicknesses go down to 1e-3 cm and the agglomerate film to
//! 1e-5 cm, so coordinates are kept in double precision.

/// The floating-point type used for coordinates and lengths.
pub type Scalar = f64;
