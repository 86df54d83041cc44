//! # soil_core - Soil Phase Relationship Engine
//!
//! `soil_core` is the computational heart of Terrastat. Give it whatever subset
//! of the twelve phase quantities you know for a soil sample and it derives the
//! rest, keeping a step-by-step log of every formula it applied. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every derived value records the identity and substitution used
//!
//! ## Quick Start
//!
//! ```rust
//! use soil_core::{solve, PhaseInput, Quantity};
//!
//! let input = PhaseInput::new("Sample A")
//!     .with(Quantity::WaterContent, 0.20)
//!     .with(Quantity::SpecificGravity, 2.70)
//!     .with(Quantity::VoidRatio, 0.6667);
//!
//! let result = solve(&input);
//! let sr = result.values.sr.unwrap();
//! assert!((sr - 0.81).abs() < 1e-3);
//!
//! for step in &result.log {
//!     println!("{}", step.display_line());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Phase solver and relative density
//! - [`identities`] - Identity formulas, registry and formula finder
//! - [`quantity`] - The twelve phase quantities
//! - [`values`] - Partial snapshot of known quantities
//! - [`units`] - Type-safe density and unit weight wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON input files and atomic result saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod identities;
pub mod quantity;
pub mod units;
pub mod values;

// Re-export commonly used types at crate root for convenience
pub use calculations::phase::{
    calculate, check_consistency, solve, solve_values, solve_with, ConsistencyWarning, DerivationStep, PhaseInput,
    PhaseResult, RuleSet, SaturationCondition, SolveOutcome, SolverOptions,
};
pub use calculations::relative_density::{relative_density, DensityState, RelativeDensityInput, RelativeDensityResult};
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_batch, load_phase_input, save_json};
pub use identities::{find_formulas, FormulaSearch, Identity};
pub use quantity::Quantity;
pub use values::PhaseValues;
