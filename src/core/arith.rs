//! Arithmetic precision selection.
//!
//! The decoder can run fixed-point, double-precision or (by default)
//! single-precision floating point. The probe reports the first two as
//! independent flags; this module folds them into a single variant so the
//! "both selected" state cannot reach consumers.

use serde::{Deserialize, Serialize};

use super::errors::RegistryError;

pub const FIXED_MACRO: &str = "LIBA52_FIXED";
pub const DOUBLE_MACRO: &str = "LIBA52_DOUBLE";

/// Sample arithmetic used by the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticMode {
    /// Fixed-point samples (`LIBA52_FIXED`)
    Fixed,
    /// Double-precision floats (`LIBA52_DOUBLE`)
    Double,
    /// Single-precision floats, selected when neither flag is present
    #[default]
    Single,
}

impl ArithmeticMode {
    /// Fold the two independent probe flags into one mode.
    pub fn from_flags(fixed: bool, double: bool) -> Result<Self, RegistryError> {
        match (fixed, double) {
            (true, true) => Err(RegistryError::MutuallyExclusive {
                group: "arithmetic precision",
                first: FIXED_MACRO.to_string(),
                second: DOUBLE_MACRO.to_string(),
            }),
            (true, false) => Ok(ArithmeticMode::Fixed),
            (false, true) => Ok(ArithmeticMode::Double),
            (false, false) => Ok(ArithmeticMode::Single),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, ArithmeticMode::Fixed)
    }

    pub fn is_double(&self) -> bool {
        matches!(self, ArithmeticMode::Double)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticMode::Fixed => "fixed",
            ArithmeticMode::Double => "double",
            ArithmeticMode::Single => "single",
        }
    }

    /// Sample type the decoder uses in this mode.
    pub fn sample_type(&self) -> &'static str {
        match self {
            ArithmeticMode::Fixed => "int32_t",
            ArithmeticMode::Double => "double",
            ArithmeticMode::Single => "float",
        }
    }
}

impl std::fmt::Display for ArithmeticMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ArithmeticMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(ArithmeticMode::Fixed),
            "double" => Ok(ArithmeticMode::Double),
            "single" | "float" => Ok(ArithmeticMode::Single),
            _ => Err(format!(
                "invalid arithmetic mode '{}', valid values: fixed, double, single",
                s
            )),
        }
    }
}
