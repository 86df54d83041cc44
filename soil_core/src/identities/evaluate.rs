//! # Identity Evaluation
//!
//! Binds each [`Identity`] to its formula in [`phase`](super::phase) and to
//! a number-substituted display string for derivation logs.

use super::phase;
use super::registry::Identity;
use crate::quantity::Quantity;
use crate::units::{GAMMA_W, RHO_W};
use crate::values::PhaseValues;

/// Format a number for substituted formulas: at most four decimals, no
/// trailing zeros.
pub fn format_number(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Most inputs any identity takes.
const MAX_INPUTS: usize = 3;

/// Inputs of an identity, read from `values`.
///
/// `None` if any input is unknown. Slots are in the order of
/// [`Identity::inputs`]; unused trailing slots are zero.
fn read_inputs(identity: Identity, values: &PhaseValues) -> Option<[f64; MAX_INPUTS]> {
    let mut x = [0.0; MAX_INPUTS];
    for (slot, q) in x.iter_mut().zip(identity.inputs()) {
        *slot = values.get(*q)?;
    }
    Some(x)
}

impl Identity {
    /// Evaluate this identity against a snapshot.
    ///
    /// Returns `None` when an input is unknown, when a denominator is zero,
    /// when the result overflows to infinity or NaN, or when an extra
    /// condition does not hold (the submerged-from-bulk identity requires
    /// Sr == 1 exactly). Whether the target is already known is the
    /// caller's concern.
    pub fn evaluate(&self, values: &PhaseValues) -> Option<f64> {
        let x = read_inputs(*self, values)?;
        let value = match self {
            Identity::BulkDensityFromUnitWeight => Some(phase::density_from_unit_weight(x[0])),
            Identity::VoidRatioFromPorosity => phase::void_ratio_from_porosity(x[0]),
            Identity::PorosityFromVoidRatio => phase::porosity_from_void_ratio(x[0]),
            Identity::SaturationFromWaterContent => phase::saturation(x[0], x[1], x[2]),
            Identity::VoidRatioFromSaturation => phase::void_ratio_from_saturation(x[0], x[1], x[2]),
            Identity::WaterContentFromSaturation => phase::water_content(x[0], x[1], x[2]),
            Identity::DryUnitWeight => phase::dry_unit_weight(x[0], x[1]),
            Identity::BulkUnitWeight => phase::bulk_unit_weight(x[0], x[1], x[2]),
            Identity::SubmergedFromBulkUnitWeight => {
                // Exact comparison: Sr is 1.0 only when forced or supplied as such
                if x[1] == 1.0 {
                    Some(phase::submerged_unit_weight(x[0]))
                } else {
                    None
                }
            }
            Identity::AirContent => Some(phase::air_content(x[0], x[1])),
            Identity::DryDensityFromUnitWeight => Some(phase::density_from_unit_weight(x[0])),
            Identity::DryDensityFromBulkDensity => phase::dry_density_from_bulk(x[0], x[1]),
            Identity::BulkDensityFromDryDensity => Some(phase::bulk_density_from_dry(x[0], x[1])),
            Identity::DryDensity => phase::dry_density(x[0], x[1]),
            Identity::VoidRatioFromDryDensity => phase::void_ratio_from_dry_density(x[0], x[1]),
            Identity::VoidRatioFromBulkDensity => phase::void_ratio_from_bulk_density(x[0], x[1], x[2]),
            Identity::DryUnitWeightFromBulk => phase::dry_unit_weight_from_bulk(x[0], x[1]),
            Identity::VoidRatioFromDryUnitWeight => phase::void_ratio_from_dry_unit_weight(x[0], x[1]),
            Identity::SaturatedUnitWeight => phase::saturated_unit_weight(x[0], x[1]),
            Identity::SubmergedFromSaturatedUnitWeight => Some(phase::submerged_unit_weight(x[0])),
            Identity::DryUnitWeightFromPorosity => Some(phase::dry_unit_weight_from_porosity(x[0], x[1])),
            Identity::BulkUnitWeightFromWaterContent => {
                phase::bulk_unit_weight_from_water_content(x[0], x[1], x[2])
            }
            Identity::SubmergedFromSolids => phase::submerged_unit_weight_from_solids(x[0], x[1]),
            Identity::SaturatedFromDryUnitWeight => Some(phase::saturated_from_dry(x[0], x[1])),
            Identity::VoidRatioFromSaturatedUnitWeight => {
                phase::void_ratio_from_saturated_unit_weight(x[0], x[1])
            }
            Identity::PorosityFromUnitWeights => Some(phase::porosity_from_unit_weights(x[0], x[1])),
        };
        value.filter(|v| v.is_finite())
    }

    /// The plain formula with the current input values substituted.
    ///
    /// Unknown inputs are left as their symbol.
    ///
    /// ```rust
    /// use soil_core::identities::registry::Identity;
    /// use soil_core::quantity::Quantity;
    /// use soil_core::values::PhaseValues;
    ///
    /// let v = PhaseValues::new().with(Quantity::Porosity, 0.4);
    /// assert_eq!(Identity::VoidRatioFromPorosity.substitute(&v), "0.4 / (1 - 0.4)");
    /// ```
    pub fn substitute(&self, values: &PhaseValues) -> String {
        let v = |q: Quantity| {
            values
                .get(q)
                .map(format_number)
                .unwrap_or_else(|| q.symbol().to_string())
        };
        let gw = format_number(GAMMA_W.0);
        let rw = format_number(RHO_W.0);

        use Quantity::*;
        match self {
            Identity::BulkDensityFromUnitWeight => format!("{} / {}", v(BulkUnitWeight), gw),
            Identity::VoidRatioFromPorosity => format!("{0} / (1 - {0})", v(Porosity)),
            Identity::PorosityFromVoidRatio => format!("{0} / (1 + {0})", v(VoidRatio)),
            Identity::SaturationFromWaterContent => {
                format!("{}·{} / {}", v(WaterContent), v(SpecificGravity), v(VoidRatio))
            }
            Identity::VoidRatioFromSaturation => {
                format!("{}·{} / {}", v(WaterContent), v(SpecificGravity), v(Saturation))
            }
            Identity::WaterContentFromSaturation => {
                format!("{}·{} / {}", v(Saturation), v(VoidRatio), v(SpecificGravity))
            }
            Identity::DryUnitWeight => format!("{}·{} / (1 + {})", v(SpecificGravity), gw, v(VoidRatio)),
            Identity::BulkUnitWeight => format!(
                "({} + {}·{})·{} / (1 + {2})",
                v(SpecificGravity),
                v(Saturation),
                v(VoidRatio),
                gw
            ),
            Identity::SubmergedFromBulkUnitWeight => format!("{} - {}", v(BulkUnitWeight), gw),
            Identity::AirContent => format!("{}·(1 - {})", v(Porosity), v(Saturation)),
            Identity::DryDensityFromUnitWeight => format!("{} / {}", v(DryUnitWeight), gw),
            Identity::DryDensityFromBulkDensity => format!("{} / (1 + {})", v(BulkDensity), v(WaterContent)),
            Identity::BulkDensityFromDryDensity => format!("{}·(1 + {})", v(DryDensity), v(WaterContent)),
            Identity::DryDensity => format!("{}·{} / (1 + {})", v(SpecificGravity), rw, v(VoidRatio)),
            Identity::VoidRatioFromDryDensity => {
                format!("{}·{} / {} - 1", v(SpecificGravity), rw, v(DryDensity))
            }
            Identity::VoidRatioFromBulkDensity => format!(
                "{}·(1 + {})·{} / {} - 1",
                v(SpecificGravity),
                v(WaterContent),
                rw,
                v(BulkDensity)
            ),
            Identity::DryUnitWeightFromBulk => format!("{} / (1 + {})", v(BulkUnitWeight), v(WaterContent)),
            Identity::VoidRatioFromDryUnitWeight => {
                format!("{}·{} / {} - 1", v(SpecificGravity), gw, v(DryUnitWeight))
            }
            Identity::SaturatedUnitWeight => {
                format!("({} + {})·{} / (1 + {1})", v(SpecificGravity), v(VoidRatio), gw)
            }
            Identity::SubmergedFromSaturatedUnitWeight => format!("{} - {}", v(SaturatedUnitWeight), gw),
            Identity::DryUnitWeightFromPorosity => {
                format!("{}·{}·(1 - {})", v(SpecificGravity), gw, v(Porosity))
            }
            Identity::BulkUnitWeightFromWaterContent => format!(
                "{}·{}·(1 + {}) / (1 + {})",
                v(SpecificGravity),
                gw,
                v(WaterContent),
                v(VoidRatio)
            ),
            Identity::SubmergedFromSolids => {
                format!("({} - 1)·{} / (1 + {})", v(SpecificGravity), gw, v(VoidRatio))
            }
            Identity::SaturatedFromDryUnitWeight => {
                format!("{} + {}·{}", v(DryUnitWeight), v(Porosity), gw)
            }
            Identity::VoidRatioFromSaturatedUnitWeight => format!(
                "({}·{1} - {2}) / ({2} - {1})",
                v(SpecificGravity),
                gw,
                v(SaturatedUnitWeight)
            ),
            Identity::PorosityFromUnitWeights => format!(
                "({} - {}) / {}",
                v(SaturatedUnitWeight),
                v(DryUnitWeight),
                gw
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identities::registry::ALL_IDENTITIES;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.4), "0.4");
        assert_eq!(format_number(9.81), "9.81");
        assert_eq!(format_number(2.0 / 3.0), "0.6667");
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn test_evaluate_requires_all_inputs() {
        let v = PhaseValues::new().with(Quantity::WaterContent, 0.2).with(Quantity::SpecificGravity, 2.7);
        assert!(Identity::SaturationFromWaterContent.evaluate(&v).is_none());
        let v = v.with(Quantity::VoidRatio, 0.6667);
        let sr = Identity::SaturationFromWaterContent.evaluate(&v).unwrap();
        assert!((sr - 0.81).abs() < 1e-3);
    }

    #[test]
    fn test_submerged_requires_exact_saturation() {
        let v = PhaseValues::new().with(Quantity::BulkUnitWeight, 20.0).with(Quantity::Saturation, 0.999);
        assert!(Identity::SubmergedFromBulkUnitWeight.evaluate(&v).is_none());
        let v = v.with(Quantity::Saturation, 1.0);
        let sub = Identity::SubmergedFromBulkUnitWeight.evaluate(&v).unwrap();
        assert!((sub - 10.19).abs() < 1e-9);
    }

    #[test]
    fn test_zero_saturation_guard() {
        let v = PhaseValues::new()
            .with(Quantity::WaterContent, 0.1)
            .with(Quantity::SpecificGravity, 2.65)
            .with(Quantity::Saturation, 0.0);
        assert!(Identity::VoidRatioFromSaturation.evaluate(&v).is_none());
    }

    #[test]
    fn test_overflow_is_not_a_value() {
        let v = PhaseValues::new()
            .with(Quantity::WaterContent, 1e300)
            .with(Quantity::SpecificGravity, 1e10)
            .with(Quantity::VoidRatio, 0.5);
        assert!(Identity::SaturationFromWaterContent.evaluate(&v).is_none());

        let v = PhaseValues::new().with(Quantity::SpecificGravity, f64::MAX).with(Quantity::Porosity, -1.0);
        assert!(Identity::DryUnitWeightFromPorosity.evaluate(&v).is_none());
    }

    #[test]
    fn test_substitution_strings() {
        let v = PhaseValues::new()
            .with(Quantity::SpecificGravity, 2.7)
            .with(Quantity::VoidRatio, 0.5)
            .with(Quantity::Saturation, 1.0);
        assert_eq!(Identity::DryUnitWeight.substitute(&v), "2.7·9.81 / (1 + 0.5)");
        assert_eq!(Identity::BulkUnitWeight.substitute(&v), "(2.7 + 1·0.5)·9.81 / (1 + 0.5)");
        assert_eq!(Identity::SaturatedUnitWeight.substitute(&v), "(2.7 + 0.5)·9.81 / (1 + 0.5)");
    }

    #[test]
    fn test_substitute_leaves_unknown_symbols() {
        let v = PhaseValues::new();
        assert_eq!(Identity::AirContent.substitute(&v), "n·(1 - Sr)");
        for id in ALL_IDENTITIES {
            assert!(!id.substitute(&v).is_empty());
        }
    }
}
