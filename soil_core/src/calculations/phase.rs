//! # Phase Relationship Solver
//!
//! Given any subset of the twelve phase quantities, repeatedly applies the
//! identities in [`identities::registry`](crate::identities::registry) to
//! fill in every value they determine, and records each derivation.
//!
//! ## Algorithm
//!
//! Bounded fixed-point propagation:
//!
//! 1. Seed a working snapshot with the caller's values (plus Sr = 1 or
//!    Sr = 0 when the soil is declared saturated or dry).
//! 2. Each pass walks the rule list in order. A rule fires when all its
//!    inputs are known, its target is unknown, and its formula is defined
//!    (no zero denominator, finite result). Firing writes the target and appends a
//!    [`DerivationStep`]. Later rules in the same pass see the new value.
//! 3. Stop after a pass that derives nothing, or after [`MAX_PASSES`].
//!
//! Known values are never overwritten. If the caller supplies redundant
//! values that disagree (say `e` and `n`), the supplied ones are kept as-is;
//! the disagreement is reported as a [`ConsistencyWarning`] and nothing else.
//!
//! ## Example
//!
//! ```rust
//! use soil_core::calculations::phase::{solve, PhaseInput, SaturationCondition};
//! use soil_core::quantity::Quantity;
//!
//! let mut input = PhaseInput::new("Sample A");
//! input.values.gs = Some(2.70);
//! input.values.e = Some(0.6667);
//! input.condition = SaturationCondition::FullySaturated;
//!
//! let result = solve(&input);
//! let gamma_bulk = result.values.gamma_bulk.unwrap();
//! let gamma_sub = result.values.gamma_sub.unwrap();
//! assert!((gamma_sub - (gamma_bulk - 9.81)).abs() < 1e-9);
//! assert!(result.step_for(Quantity::SubmergedUnitWeight).is_some());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::CalcResult;
use crate::identities::registry::{Identity, ALL_IDENTITIES, STANDARD_IDENTITIES};
use crate::identities::format_number;
use crate::quantity::Quantity;
use crate::values::PhaseValues;

/// Upper bound on propagation passes.
pub const MAX_PASSES: usize = 15;

/// Relative tolerance for consistency warnings.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-3;

// ============================================================================
// Input
// ============================================================================

/// Declared moisture state of the soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationCondition {
    /// No assumption; Sr is whatever the caller supplied (or unknown)
    #[default]
    PartiallySaturated,
    /// Forces Sr = 1
    FullySaturated,
    /// Forces Sr = 0
    Dry,
}

impl SaturationCondition {
    /// Value of Sr this condition forces, if any
    pub fn forced_saturation(&self) -> Option<f64> {
        match self {
            SaturationCondition::PartiallySaturated => None,
            SaturationCondition::FullySaturated => Some(1.0),
            SaturationCondition::Dry => Some(0.0),
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SaturationCondition::PartiallySaturated => "Partially Saturated",
            SaturationCondition::FullySaturated => "Fully Saturated (Sr = 1)",
            SaturationCondition::Dry => "Dry (Sr = 0)",
        }
    }
}

/// Which identities the solver applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// The ten standard identities
    #[default]
    Standard,
    /// Standard identities followed by the density and unit-weight extensions
    Extended,
}

impl RuleSet {
    /// Ordered rule list for this set
    pub fn identities(&self) -> &'static [Identity] {
        match self {
            RuleSet::Standard => STANDARD_IDENTITIES,
            RuleSet::Extended => ALL_IDENTITIES,
        }
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    pub rule_set: RuleSet,
    /// Pass cap, clamped to `1..=MAX_PASSES`
    pub max_passes: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            rule_set: RuleSet::Standard,
            max_passes: MAX_PASSES,
        }
    }
}

impl SolverOptions {
    /// Options using the extended rule set
    pub fn extended() -> Self {
        SolverOptions {
            rule_set: RuleSet::Extended,
            ..Self::default()
        }
    }

    fn pass_cap(&self) -> usize {
        self.max_passes.clamp(1, MAX_PASSES)
    }
}

/// Input for one phase calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Borehole 3, 2.5 m",
///   "w": 0.2,
///   "Gs": 2.70,
///   "e": 0.6667,
///   "condition": "partially_saturated"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseInput {
    /// User label for this sample
    #[serde(default)]
    pub label: String,

    /// Known quantities
    #[serde(flatten)]
    pub values: PhaseValues,

    /// Declared moisture state
    #[serde(default)]
    pub condition: SaturationCondition,
}

impl PhaseInput {
    /// Create an empty input
    pub fn new(label: impl Into<String>) -> Self {
        PhaseInput {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Create an input from known values
    pub fn from_values(values: PhaseValues) -> Self {
        PhaseInput {
            values,
            ..Self::default()
        }
    }

    /// Builder: set a known quantity
    pub fn with(mut self, quantity: Quantity, value: f64) -> Self {
        self.values.set(quantity, Some(value));
        self
    }

    /// Builder: set the saturation condition
    pub fn with_condition(mut self, condition: SaturationCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Reject non-finite values.
    pub fn validate(&self) -> CalcResult<()> {
        self.values.validate()
    }

    /// The snapshot the solver starts from: supplied values plus the Sr
    /// forced by the saturation condition.
    pub fn seeded_values(&self) -> PhaseValues {
        let mut values = self.values;
        if let Some(sr) = self.condition.forced_saturation() {
            values.set(Quantity::Saturation, Some(sr));
        }
        values
    }
}

// ============================================================================
// Output
// ============================================================================

/// One derived quantity, in the order derivation happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationStep {
    /// Quantity derived
    pub quantity: Quantity,
    /// Identity that produced it
    pub identity: Identity,
    /// Symbolic right-hand side, e.g. `n / (1 - n)`
    pub formula: String,
    /// Right-hand side with numbers, e.g. `0.4 / (1 - 0.4)`
    pub substituted: String,
    /// Resulting value
    pub value: f64,
    /// 1-based pass in which the derivation happened
    pub pass: usize,
}

impl DerivationStep {
    /// Full one-line display: `e = n / (1 - n) = 0.4 / (1 - 0.4) = 0.6667`
    pub fn display_line(&self) -> String {
        format!(
            "{} = {} = {} = {}",
            self.quantity.symbol(),
            self.formula,
            self.substituted,
            format_number(self.value)
        )
    }
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveOutcome {
    /// At least one quantity was derived
    Derived,
    /// Nothing could be derived from the inputs; not an error
    InsufficientData,
}

/// A held value that an applicable identity disagrees with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyWarning {
    pub quantity: Quantity,
    pub identity: Identity,
    /// Value kept by the solver
    pub held: f64,
    /// Value the identity gives from the other held values
    pub recomputed: f64,
}

impl ConsistencyWarning {
    /// Human-readable message
    pub fn message(&self) -> String {
        format!(
            "{} = {} disagrees with {} = {} ({})",
            self.quantity.symbol(),
            format_number(self.held),
            self.identity.metadata().formula_plain,
            format_number(self.recomputed),
            self.identity.metadata().name
        )
    }
}

/// Result of a phase calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    /// Final snapshot: inputs plus everything derived
    pub values: PhaseValues,
    /// Derivations in order
    pub log: Vec<DerivationStep>,
    /// Passes performed (including the final pass that derived nothing)
    pub passes: usize,
    pub outcome: SolveOutcome,
    /// Non-blocking disagreements between held values
    pub warnings: Vec<ConsistencyWarning>,
}

impl PhaseResult {
    /// Whether nothing could be derived
    pub fn is_insufficient(&self) -> bool {
        self.outcome == SolveOutcome::InsufficientData
    }

    /// Quantities derived by the solver, in derivation order
    pub fn derived_quantities(&self) -> Vec<Quantity> {
        self.log.iter().map(|s| s.quantity).collect()
    }

    /// The step that derived a quantity, if it was derived
    pub fn step_for(&self, quantity: Quantity) -> Option<&DerivationStep> {
        self.log.iter().find(|s| s.quantity == quantity)
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Solve with the standard rule set.
pub fn solve(input: &PhaseInput) -> PhaseResult {
    solve_with(input, &SolverOptions::default())
}

/// Solve with explicit options.
pub fn solve_with(input: &PhaseInput, options: &SolverOptions) -> PhaseResult {
    let initial = input.seeded_values();
    let rules = options.rule_set.identities();
    let cap = options.pass_cap();

    let mut values = initial;
    let mut log: Vec<DerivationStep> = Vec::new();
    let mut passes = 0;
    let mut changed = true;

    while changed && passes < cap {
        changed = false;
        passes += 1;

        for identity in rules {
            let target = identity.target();
            if values.is_known(target) {
                continue;
            }
            let Some(value) = identity.evaluate(&values) else {
                continue;
            };

            let step = DerivationStep {
                quantity: target,
                identity: *identity,
                formula: identity.metadata().formula_plain.to_string(),
                substituted: identity.substitute(&values),
                value,
                pass: passes,
            };
            debug!(pass = passes, quantity = %target, value, identity = ?identity, "derived");

            values.set(target, Some(value));
            log.push(step);
            changed = true;
        }

        debug!(pass = passes, derived = log.len(), "pass complete");
    }

    if changed {
        warn!(passes, "pass cap reached before fixed point");
    }

    let outcome = if log.is_empty() {
        SolveOutcome::InsufficientData
    } else {
        SolveOutcome::Derived
    };

    let warnings = check_consistency(&values, rules);
    for w in &warnings {
        warn!(quantity = %w.quantity, held = w.held, recomputed = w.recomputed, "inconsistent input");
    }

    PhaseResult {
        values,
        log,
        passes,
        outcome,
        warnings,
    }
}

/// `solve(initial) -> (final, log)` over a bare snapshot, standard rules.
pub fn solve_values(initial: &PhaseValues) -> (PhaseValues, Vec<DerivationStep>) {
    let result = solve(&PhaseInput::from_values(*initial));
    (result.values, result.log)
}

/// Validate, then solve.
///
/// # Returns
///
/// * `Ok(PhaseResult)` - Including the insufficient-data outcome
/// * `Err(CalcError)` - If an input is NaN or infinite
pub fn calculate(input: &PhaseInput, options: &SolverOptions) -> CalcResult<PhaseResult> {
    input.validate()?;
    Ok(solve_with(input, options))
}

/// Re-evaluate every rule whose inputs and target are all known and report
/// the targets that disagree with their identity.
pub fn check_consistency(values: &PhaseValues, rules: &[Identity]) -> Vec<ConsistencyWarning> {
    rules
        .iter()
        .filter_map(|identity| {
            let held = values.get(identity.target())?;
            let recomputed = identity.evaluate(values)?;
            if disagrees(held, recomputed) {
                Some(ConsistencyWarning {
                    quantity: identity.target(),
                    identity: *identity,
                    held,
                    recomputed,
                })
            } else {
                None
            }
        })
        .collect()
}

fn disagrees(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff > 1e-9 && diff > CONSISTENCY_TOLERANCE * scale
}
