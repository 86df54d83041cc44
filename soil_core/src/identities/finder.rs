//! # Formula Finder
//!
//! Symbolic lookup: given the quantities a user *has* and the one they
//! *want*, list every identity that gets there directly. No numbers are
//! involved.
//!
//! ## Example
//!
//! ```rust
//! use soil_core::identities::finder::find_formulas;
//! use soil_core::quantity::Quantity;
//!
//! let search = find_formulas(
//!     Quantity::DryUnitWeight,
//!     &[Quantity::SpecificGravity, Quantity::VoidRatio],
//! );
//! assert!(search.is_found());
//! assert_eq!(search.matches[0].formula_plain, "Gs·γw / (1 + e)");
//! ```

use serde::{Deserialize, Serialize};

use super::registry::{Identity, ALL_IDENTITIES};
use crate::quantity::Quantity;

/// One identity that yields the target from the known quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaMatch {
    pub identity: Identity,
    pub name: String,
    pub description: String,
    pub formula_plain: String,
    pub formula_latex: String,
}

impl FormulaMatch {
    fn from_identity(identity: Identity) -> Self {
        let meta = identity.metadata();
        FormulaMatch {
            identity,
            name: meta.name.to_string(),
            description: meta.description.to_string(),
            formula_plain: meta.formula_plain.to_string(),
            formula_latex: meta.formula_latex.to_string(),
        }
    }
}

/// Result of a formula search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaSearch {
    /// Quantity the user wants
    pub target: Quantity,
    /// Identities whose inputs are all known, in registry order
    pub matches: Vec<FormulaMatch>,
    /// When nothing matches: the input sets that would, one per identity
    pub hints: Vec<Vec<Quantity>>,
}

impl FormulaSearch {
    /// Whether at least one direct formula was found
    pub fn is_found(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Find every identity producing `target` from a subset of `known`.
pub fn find_formulas(target: Quantity, known: &[Quantity]) -> FormulaSearch {
    let candidates: Vec<Identity> = ALL_IDENTITIES
        .iter()
        .copied()
        .filter(|id| id.target() == target)
        .collect();

    let matches: Vec<FormulaMatch> = candidates
        .iter()
        .filter(|id| id.inputs().iter().all(|q| known.contains(q)))
        .map(|id| FormulaMatch::from_identity(*id))
        .collect();

    let hints = if matches.is_empty() {
        candidates.iter().map(|id| id.inputs().to_vec()).collect()
    } else {
        Vec::new()
    };

    FormulaSearch { target, matches, hints }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Quantity::*;

    #[test]
    fn test_void_ratio_from_porosity() {
        let search = find_formulas(VoidRatio, &[Porosity]);
        assert_eq!(search.matches.len(), 1);
        assert_eq!(search.matches[0].identity, Identity::VoidRatioFromPorosity);
        assert!(search.hints.is_empty());
    }

    #[test]
    fn test_multiple_matches_in_registry_order() {
        let search = find_formulas(DryUnitWeight, &[SpecificGravity, VoidRatio, Porosity]);
        let ids: Vec<_> = search.matches.iter().map(|m| m.identity).collect();
        assert_eq!(ids, vec![Identity::DryUnitWeight, Identity::DryUnitWeightFromPorosity]);
    }

    #[test]
    fn test_submerged_from_solids() {
        let search = find_formulas(SubmergedUnitWeight, &[SpecificGravity, VoidRatio]);
        assert!(search.is_found());
        assert_eq!(search.matches[0].identity, Identity::SubmergedFromSolids);
    }

    #[test]
    fn test_hints_when_nothing_matches() {
        let search = find_formulas(Saturation, &[WaterContent]);
        assert!(!search.is_found());
        assert_eq!(search.hints, vec![vec![WaterContent, SpecificGravity, VoidRatio]]);
    }

    #[test]
    fn test_underived_quantity_has_no_hints() {
        let search = find_formulas(SpecificGravity, &[VoidRatio]);
        assert!(!search.is_found());
        assert!(search.hints.is_empty());
    }
}
