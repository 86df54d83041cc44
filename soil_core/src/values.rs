//! # Phase Values
//!
//! [`PhaseValues`] is the snapshot the solver works over: one optional
//! scalar per [`Quantity`]. `None` means unknown.
//!
//! ## JSON Example
//!
//! Unknown quantities are omitted on output and may be omitted on input:
//!
//! ```json
//! { "w": 0.2, "Gs": 2.70, "e": 0.6667 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::quantity::Quantity;

/// Optional value for each of the twelve phase quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, rename = "Gs", alias = "gs", skip_serializing_if = "Option::is_none")]
    pub gs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<f64>,
    #[serde(default, rename = "Sr", alias = "sr", alias = "S", skip_serializing_if = "Option::is_none")]
    pub sr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub na: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho_bulk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rho_dry: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_bulk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_dry: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_sat: Option<f64>,
    #[serde(
        default,
        alias = "gamma_prime",
        alias = "gamma_submerged",
        skip_serializing_if = "Option::is_none"
    )]
    pub gamma_sub: Option<f64>,
}

impl PhaseValues {
    /// Create an empty snapshot (everything unknown).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    ///
    /// ```rust
    /// use soil_core::quantity::Quantity;
    /// use soil_core::values::PhaseValues;
    ///
    /// let v = PhaseValues::new()
    ///     .with(Quantity::SpecificGravity, 2.70)
    ///     .with(Quantity::VoidRatio, 0.6667);
    /// assert_eq!(v.get(Quantity::SpecificGravity), Some(2.70));
    /// ```
    pub fn with(mut self, quantity: Quantity, value: f64) -> Self {
        *self.slot_mut(quantity) = Some(value);
        self
    }

    /// Value of a quantity, if known
    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::WaterContent => self.w,
            Quantity::SpecificGravity => self.gs,
            Quantity::VoidRatio => self.e,
            Quantity::Porosity => self.n,
            Quantity::Saturation => self.sr,
            Quantity::AirContent => self.na,
            Quantity::BulkDensity => self.rho_bulk,
            Quantity::DryDensity => self.rho_dry,
            Quantity::BulkUnitWeight => self.gamma_bulk,
            Quantity::DryUnitWeight => self.gamma_dry,
            Quantity::SaturatedUnitWeight => self.gamma_sat,
            Quantity::SubmergedUnitWeight => self.gamma_sub,
        }
    }

    /// Overwrite (or clear) a quantity.
    ///
    /// The solver never calls this on a known quantity; callers assembling
    /// input may.
    pub fn set(&mut self, quantity: Quantity, value: Option<f64>) {
        *self.slot_mut(quantity) = value;
    }

    fn slot_mut(&mut self, quantity: Quantity) -> &mut Option<f64> {
        match quantity {
            Quantity::WaterContent => &mut self.w,
            Quantity::SpecificGravity => &mut self.gs,
            Quantity::VoidRatio => &mut self.e,
            Quantity::Porosity => &mut self.n,
            Quantity::Saturation => &mut self.sr,
            Quantity::AirContent => &mut self.na,
            Quantity::BulkDensity => &mut self.rho_bulk,
            Quantity::DryDensity => &mut self.rho_dry,
            Quantity::BulkUnitWeight => &mut self.gamma_bulk,
            Quantity::DryUnitWeight => &mut self.gamma_dry,
            Quantity::SaturatedUnitWeight => &mut self.gamma_sat,
            Quantity::SubmergedUnitWeight => &mut self.gamma_sub,
        }
    }

    /// Whether a quantity is known
    pub fn is_known(&self, quantity: Quantity) -> bool {
        self.get(quantity).is_some()
    }

    /// Known quantities with their values, in canonical order.
    pub fn known(&self) -> Vec<(Quantity, f64)> {
        Quantity::ALL
            .iter()
            .filter_map(|q| self.get(*q).map(|v| (*q, v)))
            .collect()
    }

    /// Quantities still unknown, in canonical order.
    pub fn unknown(&self) -> Vec<Quantity> {
        Quantity::ALL
            .iter()
            .copied()
            .filter(|q| !self.is_known(*q))
            .collect()
    }

    /// Number of known quantities
    pub fn known_count(&self) -> usize {
        Quantity::ALL.iter().filter(|q| self.is_known(**q)).count()
    }

    /// Fill every unknown slot in `self` from `other`; known slots win.
    pub fn fill_from(&mut self, other: &PhaseValues) {
        for q in Quantity::ALL {
            if !self.is_known(q) {
                self.set(q, other.get(q));
            }
        }
    }

    /// Reject NaN and infinite values.
    ///
    /// Physically odd but finite inputs (negative void ratio, Sr > 1) are
    /// accepted; the solver trusts whatever it is given.
    pub fn validate(&self) -> CalcResult<()> {
        for (q, v) in self.known() {
            if !v.is_finite() {
                return Err(CalcError::invalid_input(q.symbol(), v.to_string(), "Value must be a finite number"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_every_quantity() {
        let mut v = PhaseValues::new();
        for (i, q) in Quantity::ALL.iter().enumerate() {
            v.set(*q, Some(i as f64));
        }
        for (i, q) in Quantity::ALL.iter().enumerate() {
            assert_eq!(v.get(*q), Some(i as f64));
        }
        assert_eq!(v.known_count(), 12);
        assert!(v.unknown().is_empty());
    }

    #[test]
    fn test_json_uses_symbols_and_skips_unknowns() {
        let v = PhaseValues::new()
            .with(Quantity::SpecificGravity, 2.7)
            .with(Quantity::Saturation, 1.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"Gs":2.7,"Sr":1.0}"#);

        let parsed: PhaseValues = serde_json::from_str(r#"{"n": 0.4, "gamma_bulk": 18.0}"#).unwrap();
        assert_eq!(parsed.n, Some(0.4));
        assert_eq!(parsed.gamma_bulk, Some(18.0));
        assert_eq!(parsed.known_count(), 2);
    }

    #[test]
    fn test_fill_from_keeps_known() {
        let mut a = PhaseValues::new().with(Quantity::VoidRatio, 0.5);
        let b = PhaseValues::new()
            .with(Quantity::VoidRatio, 0.9)
            .with(Quantity::WaterContent, 0.1);
        a.fill_from(&b);
        assert_eq!(a.e, Some(0.5));
        assert_eq!(a.w, Some(0.1));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let v = PhaseValues::new().with(Quantity::Porosity, f64::NAN);
        let err = v.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(PhaseValues::new().with(Quantity::Porosity, -0.1).validate().is_ok());
    }
}
