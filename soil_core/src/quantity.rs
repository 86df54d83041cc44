//! # Phase Quantities
//!
//! The closed set of twelve scalar properties the phase solver reasons about.
//!
//! | Symbol       | Quantity                  | Units  |
//! |--------------|---------------------------|--------|
//! | `w`          | Water content             | -      |
//! | `Gs`         | Specific gravity          | -      |
//! | `e`          | Void ratio                | -      |
//! | `n`          | Porosity                  | -      |
//! | `Sr`         | Degree of saturation      | -      |
//! | `na`         | Air content               | -      |
//! | `rho_bulk`   | Bulk density              | Mg/m³  |
//! | `rho_dry`    | Dry density               | Mg/m³  |
//! | `gamma_bulk` | Bulk unit weight          | kN/m³  |
//! | `gamma_dry`  | Dry unit weight           | kN/m³  |
//! | `gamma_sat`  | Saturated unit weight     | kN/m³  |
//! | `gamma_sub`  | Submerged unit weight     | kN/m³  |
//!
//! ## Example
//!
//! ```rust
//! use soil_core::quantity::Quantity;
//!
//! let q: Quantity = "Gs".parse().unwrap();
//! assert_eq!(q, Quantity::SpecificGravity);
//! assert_eq!(q.name(), "Specific Gravity");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// One of the twelve named geotechnical quantities.
///
/// Serialized using its short symbol (`"w"`, `"Gs"`, `"gamma_bulk"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "w")]
    WaterContent,
    #[serde(rename = "Gs")]
    SpecificGravity,
    #[serde(rename = "e")]
    VoidRatio,
    #[serde(rename = "n")]
    Porosity,
    #[serde(rename = "Sr")]
    Saturation,
    #[serde(rename = "na")]
    AirContent,
    #[serde(rename = "rho_bulk")]
    BulkDensity,
    #[serde(rename = "rho_dry")]
    DryDensity,
    #[serde(rename = "gamma_bulk")]
    BulkUnitWeight,
    #[serde(rename = "gamma_dry")]
    DryUnitWeight,
    #[serde(rename = "gamma_sat")]
    SaturatedUnitWeight,
    #[serde(rename = "gamma_sub")]
    SubmergedUnitWeight,
}

impl Quantity {
    /// All quantities in canonical display order.
    pub const ALL: [Quantity; 12] = [
        Quantity::WaterContent,
        Quantity::SpecificGravity,
        Quantity::VoidRatio,
        Quantity::Porosity,
        Quantity::Saturation,
        Quantity::AirContent,
        Quantity::BulkDensity,
        Quantity::DryDensity,
        Quantity::BulkUnitWeight,
        Quantity::DryUnitWeight,
        Quantity::SaturatedUnitWeight,
        Quantity::SubmergedUnitWeight,
    ];

    /// Short symbol, identical to the serialized form.
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::WaterContent => "w",
            Quantity::SpecificGravity => "Gs",
            Quantity::VoidRatio => "e",
            Quantity::Porosity => "n",
            Quantity::Saturation => "Sr",
            Quantity::AirContent => "na",
            Quantity::BulkDensity => "rho_bulk",
            Quantity::DryDensity => "rho_dry",
            Quantity::BulkUnitWeight => "gamma_bulk",
            Quantity::DryUnitWeight => "gamma_dry",
            Quantity::SaturatedUnitWeight => "gamma_sat",
            Quantity::SubmergedUnitWeight => "gamma_sub",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::WaterContent => "Water Content",
            Quantity::SpecificGravity => "Specific Gravity",
            Quantity::VoidRatio => "Void Ratio",
            Quantity::Porosity => "Porosity",
            Quantity::Saturation => "Degree of Saturation",
            Quantity::AirContent => "Air Content",
            Quantity::BulkDensity => "Bulk Density",
            Quantity::DryDensity => "Dry Density",
            Quantity::BulkUnitWeight => "Bulk Unit Weight",
            Quantity::DryUnitWeight => "Dry Unit Weight",
            Quantity::SaturatedUnitWeight => "Saturated Unit Weight",
            Quantity::SubmergedUnitWeight => "Submerged Unit Weight",
        }
    }

    /// Units in the model's unit system (empty for dimensionless ratios).
    pub fn units(&self) -> &'static str {
        match self {
            Quantity::BulkDensity | Quantity::DryDensity => "Mg/m³",
            Quantity::BulkUnitWeight
            | Quantity::DryUnitWeight
            | Quantity::SaturatedUnitWeight
            | Quantity::SubmergedUnitWeight => "kN/m³",
            _ => "-",
        }
    }

    /// LaTeX symbol for front ends that typeset the derivation log.
    pub fn latex(&self) -> &'static str {
        match self {
            Quantity::WaterContent => "w",
            Quantity::SpecificGravity => "G_s",
            Quantity::VoidRatio => "e",
            Quantity::Porosity => "n",
            Quantity::Saturation => "S_r",
            Quantity::AirContent => "n_a",
            Quantity::BulkDensity => r"\rho_{bulk}",
            Quantity::DryDensity => r"\rho_{dry}",
            Quantity::BulkUnitWeight => r"\gamma_{bulk}",
            Quantity::DryUnitWeight => r"\gamma_{dry}",
            Quantity::SaturatedUnitWeight => r"\gamma_{sat}",
            Quantity::SubmergedUnitWeight => r"\gamma'",
        }
    }

    /// Comma-separated list of accepted symbols, for error messages.
    pub fn symbol_list() -> String {
        Quantity::ALL
            .iter()
            .map(|q| q.symbol())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Quantity {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(q) = Quantity::ALL.iter().find(|q| q.symbol() == trimmed) {
            return Ok(*q);
        }
        // Aliases seen in textbooks and older inputs
        match trimmed {
            "S" => Ok(Quantity::Saturation),
            "gamma_prime" | "gamma_submerged" => Ok(Quantity::SubmergedUnitWeight),
            _ => Err(CalcError::unknown_quantity(trimmed, Quantity::symbol_list())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip() {
        for q in Quantity::ALL {
            let parsed: Quantity = q.symbol().parse().unwrap();
            assert_eq!(parsed, q);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("S".parse::<Quantity>().unwrap(), Quantity::Saturation);
        assert_eq!(" gamma_prime ".parse::<Quantity>().unwrap(), Quantity::SubmergedUnitWeight);
    }

    #[test]
    fn test_unknown_symbol() {
        let err = "phi".parse::<Quantity>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_QUANTITY");
        assert!(err.to_string().contains("gamma_sub"));
    }

    #[test]
    fn test_serialized_as_symbol() {
        let json = serde_json::to_string(&Quantity::BulkUnitWeight).unwrap();
        assert_eq!(json, "\"gamma_bulk\"");
        let q: Quantity = serde_json::from_str("\"Sr\"").unwrap();
        assert_eq!(q, Quantity::Saturation);
    }

    #[test]
    fn test_units() {
        assert_eq!(Quantity::DryDensity.units(), "Mg/m³");
        assert_eq!(Quantity::SubmergedUnitWeight.units(), "kN/m³");
        assert_eq!(Quantity::Porosity.units(), "-");
    }
}
