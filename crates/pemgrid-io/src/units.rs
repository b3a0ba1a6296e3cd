//! Length units accepted by the mesh importer.
//!
//! Every generator works in centimeters; imported coordinates are scaled
//! into centimeters on load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use pemgrid_types::PemgridError;

/// Length unit of an external mesh file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Meters.
    M,
    /// Centimeters.
    #[default]
    Cm,
    /// Millimeters.
    Mm,
    /// Micrometers.
    Um,
}

impl LengthUnit {
    /// Factor that converts a length in this unit to centimeters.
    pub fn to_cm(self) -> f64 {
        match self {
            Self::M => 100.0,
            Self::Cm => 1.0,
            Self::Mm => 0.1,
            Self::Um => 1.0e-4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "m",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Um => "um",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = PemgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" => Ok(Self::M),
            "cm" => Ok(Self::Cm),
            "mm" => Ok(Self::Mm),
            "um" | "µm" => Ok(Self::Um),
            other => Err(PemgridError::InvalidConfig(format!(
                "Unknown length unit '{}' (expected m, cm, mm or um)",
                other
            ))),
        }
    }
}
