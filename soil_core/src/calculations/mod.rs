//! # Soil Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate` - Pure calculation function returning `CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`phase`] - Phase relationship solver (w, Gs, e, n, Sr, densities, unit weights)
//! - [`relative_density`] - Relative density and density classification

pub mod phase;
pub mod relative_density;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use phase::{
    solve, solve_values, solve_with, DerivationStep, PhaseInput, PhaseResult, RuleSet, SaturationCondition,
    SolveOutcome, SolverOptions,
};
pub use relative_density::{relative_density, DensityState, RelativeDensityInput, RelativeDensityResult};

/// Enum wrapper for all calculation types, for batch JSON input.
///
/// ```json
/// [
///   { "type": "Phase", "label": "S1", "n": 0.4 },
///   { "type": "RelativeDensity", "e": 0.5, "e_max": 0.8, "e_min": 0.3 }
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Phase relationship solve
    Phase(PhaseInput),
    /// Relative density
    RelativeDensity(RelativeDensityInput),
}

/// Result matching a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Phase(PhaseResult),
    RelativeDensity(RelativeDensityResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Phase(p) => &p.label,
            CalculationItem::RelativeDensity(r) => &r.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Phase(_) => "Phase",
            CalculationItem::RelativeDensity(_) => "RelativeDensity",
        }
    }

    /// Run the calculation
    pub fn run(&self, options: &SolverOptions) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Phase(input) => phase::calculate(input, options).map(CalculationOutput::Phase),
            CalculationItem::RelativeDensity(input) => input.calculate().map(CalculationOutput::RelativeDensity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_json() {
        let json = r#"[
            {"type": "Phase", "label": "S1", "n": 0.4},
            {"type": "RelativeDensity", "label": "Fill", "e": 0.5, "e_max": 0.8, "e_min": 0.3}
        ]"#;
        let items: Vec<CalculationItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label(), "S1");
        assert_eq!(items[1].calc_type(), "RelativeDensity");

        let opts = SolverOptions::default();
        match items[0].run(&opts).unwrap() {
            CalculationOutput::Phase(result) => assert!((result.values.e.unwrap() - 0.6667).abs() < 1e-4),
            other => panic!("unexpected output {:?}", other),
        }
        match items[1].run(&opts).unwrap() {
            CalculationOutput::RelativeDensity(result) => assert_eq!(result.state, DensityState::MediumDense),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_invalid_item_errors() {
        let item = CalculationItem::RelativeDensity(RelativeDensityInput {
            label: String::new(),
            e: 0.5,
            e_max: 0.3,
            e_min: 0.4,
        });
        assert!(item.run(&SolverOptions::default()).is_err());
    }
}
