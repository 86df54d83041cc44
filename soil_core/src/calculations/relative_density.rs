//! # Relative Density
//!
//! Where a granular soil sits between its loosest and densest states:
//!
//! ```text
//! Dr = (e_max - e) / (e_max - e_min)
//! ```
//!
//! ## Density Classification
//!
//! | Dr          | State        |
//! |-------------|--------------|
//! | < 0.15      | Very Loose   |
//! | 0.15 – 0.35 | Loose        |
//! | 0.35 – 0.65 | Medium Dense |
//! | 0.65 – 0.85 | Dense        |
//! | ≥ 0.85      | Very Dense   |
//!
//! ## Example
//!
//! ```rust
//! use soil_core::calculations::relative_density::{relative_density, DensityState};
//!
//! let result = relative_density(0.5, 0.8, 0.3).unwrap();
//! assert!((result.dr - 0.6).abs() < 1e-12);
//! assert_eq!(result.state, DensityState::MediumDense);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Density state bands, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityState {
    VeryLoose,
    Loose,
    MediumDense,
    Dense,
    VeryDense,
}

impl DensityState {
    /// Classify a relative density.
    pub fn classify(dr: f64) -> Self {
        if dr < 0.15 {
            DensityState::VeryLoose
        } else if dr < 0.35 {
            DensityState::Loose
        } else if dr < 0.65 {
            DensityState::MediumDense
        } else if dr < 0.85 {
            DensityState::Dense
        } else {
            DensityState::VeryDense
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DensityState::VeryLoose => "Very Loose",
            DensityState::Loose => "Loose",
            DensityState::MediumDense => "Medium Dense",
            DensityState::Dense => "Dense",
            DensityState::VeryDense => "Very Dense",
        }
    }
}

impl fmt::Display for DensityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Input parameters for a relative density calculation.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Sand fill", "e": 0.5, "e_max": 0.8, "e_min": 0.3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeDensityInput {
    /// User label
    #[serde(default)]
    pub label: String,
    /// Current void ratio
    pub e: f64,
    /// Void ratio in the loosest state
    pub e_max: f64,
    /// Void ratio in the densest state
    pub e_min: f64,
}

impl RelativeDensityInput {
    /// Validate input parameters: e_max > e_min > 0, all finite.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("e", self.e), ("e_max", self.e_max), ("e_min", self.e_min)] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
            }
        }
        if self.e_min <= 0.0 {
            return Err(CalcError::invalid_input(
                "e_min",
                self.e_min.to_string(),
                "Minimum void ratio must be positive",
            ));
        }
        if self.e_max <= self.e_min {
            return Err(CalcError::invalid_input(
                "e_max",
                self.e_max.to_string(),
                format!("Maximum void ratio must exceed minimum void ratio ({})", self.e_min),
            ));
        }
        Ok(())
    }

    /// Calculate relative density and classification.
    pub fn calculate(&self) -> CalcResult<RelativeDensityResult> {
        self.validate()?;
        let dr = (self.e_max - self.e) / (self.e_max - self.e_min);
        Ok(RelativeDensityResult {
            dr,
            state: DensityState::classify(dr),
        })
    }
}

/// Results from a relative density calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeDensityResult {
    /// Relative density Dr (fraction; may fall outside 0..1 when e is
    /// outside [e_min, e_max])
    pub dr: f64,
    /// Density classification
    pub state: DensityState,
}

impl RelativeDensityResult {
    /// Dr as a percentage
    pub fn dr_percent(&self) -> f64 {
        self.dr * 100.0
    }
}

/// Relative density from the current, maximum and minimum void ratios.
///
/// # Returns
///
/// * `Ok(RelativeDensityResult)` - Dr and its density state
/// * `Err(CalcError::InvalidInput)` - If `e_max <= e_min` or `e_min <= 0`
pub fn relative_density(e: f64, e_max: f64, e_min: f64) -> CalcResult<RelativeDensityResult> {
    RelativeDensityInput {
        label: String::new(),
        e,
        e_max,
        e_min,
    }
    .calculate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_dense() {
        let result = relative_density(0.5, 0.8, 0.3).unwrap();
        assert!((result.dr - 0.60).abs() < 1e-12);
        assert_eq!(result.state, DensityState::MediumDense);
        assert_eq!(result.state.to_string(), "Medium Dense");
        assert!((result.dr_percent() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(DensityState::classify(0.0), DensityState::VeryLoose);
        assert_eq!(DensityState::classify(0.149), DensityState::VeryLoose);
        assert_eq!(DensityState::classify(0.15), DensityState::Loose);
        assert_eq!(DensityState::classify(0.35), DensityState::MediumDense);
        assert_eq!(DensityState::classify(0.65), DensityState::Dense);
        assert_eq!(DensityState::classify(0.85), DensityState::VeryDense);
        assert_eq!(DensityState::classify(1.2), DensityState::VeryDense);
        assert_eq!(DensityState::classify(-0.3), DensityState::VeryLoose);
    }

    #[test]
    fn test_loosest_and_densest() {
        assert_eq!(relative_density(0.8, 0.8, 0.3).unwrap().dr, 0.0);
        assert_eq!(relative_density(0.3, 0.8, 0.3).unwrap().dr, 1.0);
    }

    #[test]
    fn test_invalid_bounds() {
        let err = relative_density(0.5, 0.3, 0.3).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(relative_density(0.5, 0.2, 0.3).is_err());
        assert!(relative_density(0.5, 0.8, 0.0).is_err());
        assert!(relative_density(0.5, -0.1, -0.5).is_err());
        assert!(relative_density(f64::NAN, 0.8, 0.3).is_err());
    }

    #[test]
    fn test_serialization() {
        let input = RelativeDensityInput {
            label: "Sand".to_string(),
            e: 0.6,
            e_max: 0.9,
            e_min: 0.4,
        };
        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: RelativeDensityInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let result = input.calculate().unwrap();
        let out = serde_json::to_value(result).unwrap();
        assert_eq!(out["state"], "medium_dense");
    }
}
