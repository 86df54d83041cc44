/// Property-based tests for the phase solver.
/// Verifies propagation terminates, never overwrites inputs, and reaches a fixed point.

use proptest::prelude::*;
use soil_core::calculations::phase::MAX_PASSES;
use soil_core::{solve, solve_with, Identity, PhaseInput, PhaseValues, Quantity, SaturationCondition, SolverOptions};

// ============================================================================
// Test Strategies
// ============================================================================

/// Any subset of plausible primary quantities
fn partial_values() -> impl Strategy<Value = PhaseValues> {
    (
        prop::option::of(0.0f64..0.8),
        prop::option::of(2.5f64..2.9),
        prop::option::of(0.2f64..1.5),
        prop::option::of(0.15f64..0.6),
        prop::option::of(0.0f64..=1.0),
        prop::option::of(14.0f64..22.0),
    )
        .prop_map(|(w, gs, e, n, sr, gamma_bulk)| PhaseValues {
            w,
            gs,
            e,
            n,
            sr,
            gamma_bulk,
            ..PhaseValues::default()
        })
}

fn condition() -> impl Strategy<Value = SaturationCondition> {
    prop_oneof![
        Just(SaturationCondition::PartiallySaturated),
        Just(SaturationCondition::FullySaturated),
        Just(SaturationCondition::Dry),
    ]
}

fn options() -> impl Strategy<Value = SolverOptions> {
    prop_oneof![Just(SolverOptions::default()), Just(SolverOptions::extended())]
}

fn relative_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

// ============================================================================
// Solver Properties
// ============================================================================

proptest! {
    /// Same input, same result
    #[test]
    fn prop_solve_is_deterministic(values in partial_values(), cond in condition(), opts in options()) {
        let input = PhaseInput::from_values(values).with_condition(cond);
        prop_assert_eq!(solve_with(&input, &opts), solve_with(&input, &opts));
    }

    /// Propagation never exceeds the pass cap
    #[test]
    fn prop_passes_bounded(values in partial_values(), cond in condition(), opts in options()) {
        let input = PhaseInput::from_values(values).with_condition(cond);
        let result = solve_with(&input, &opts);
        prop_assert!(result.passes >= 1);
        prop_assert!(result.passes <= MAX_PASSES);
        for step in &result.log {
            prop_assert!(step.pass >= 1 && step.pass <= result.passes);
        }
    }

    /// Seeded values survive unchanged and are never logged as derived
    #[test]
    fn prop_known_values_never_overwritten(values in partial_values(), cond in condition(), opts in options()) {
        let input = PhaseInput::from_values(values).with_condition(cond);
        let seeded = input.seeded_values();
        let result = solve_with(&input, &opts);

        for (quantity, value) in seeded.known() {
            prop_assert_eq!(result.values.get(quantity), Some(value));
            prop_assert!(result.step_for(quantity).is_none());
        }
    }

    /// Each quantity is derived at most once, and every logged value is in the snapshot
    #[test]
    fn prop_log_matches_snapshot(values in partial_values(), opts in options()) {
        let result = solve_with(&PhaseInput::from_values(values), &opts);
        let mut seen = Vec::new();
        for step in &result.log {
            prop_assert!(!seen.contains(&step.quantity));
            seen.push(step.quantity);
            prop_assert_eq!(result.values.get(step.quantity), Some(step.value));
        }
    }

    /// Solving the output again derives nothing
    #[test]
    fn prop_solution_is_fixed_point(values in partial_values(), cond in condition()) {
        let first = solve(&PhaseInput::from_values(values).with_condition(cond));
        let second = solve(&PhaseInput::from_values(first.values));
        prop_assert!(second.log.is_empty());
        prop_assert_eq!(second.values, first.values);
    }

    /// Dry soil never back-computes e through Sr
    #[test]
    fn prop_dry_never_divides_by_saturation(w in 0.0f64..0.5, gs in 2.5f64..2.9) {
        let input = PhaseInput::new("dry")
            .with(Quantity::WaterContent, w)
            .with(Quantity::SpecificGravity, gs)
            .with_condition(SaturationCondition::Dry);
        let result = solve(&input);
        prop_assert!(result.log.iter().all(|s| s.identity != Identity::VoidRatioFromSaturation));
        prop_assert_eq!(result.values.sr, Some(0.0));
        prop_assert_eq!(result.values.e, None);
    }

    /// A consistent (w, Gs, e) base solves without warnings and satisfies
    /// gamma_bulk = gamma_dry·(1 + w)
    #[test]
    fn prop_consistent_base(w in 0.05f64..0.6, gs in 2.5f64..2.9, e in 0.3f64..1.5) {
        let input = PhaseInput::new("base")
            .with(Quantity::WaterContent, w)
            .with(Quantity::SpecificGravity, gs)
            .with(Quantity::VoidRatio, e);
        let result = solve_with(&input, &SolverOptions::extended());

        prop_assert!(result.warnings.is_empty());
        let gamma_bulk = result.values.gamma_bulk.unwrap();
        let gamma_dry = result.values.gamma_dry.unwrap();
        prop_assert!(relative_eq(gamma_bulk, gamma_dry * (1.0 + w)));
        let n = result.values.n.unwrap();
        prop_assert!(relative_eq(n, e / (1.0 + e)));
    }
}
