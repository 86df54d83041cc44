//! # Identity Registry
//!
//! Central registry of the phase identities the solver and the formula finder
//! work from. Each identity has metadata: the quantity it produces, the
//! quantities it needs, display formulas and a textbook reference.
//!
//! ## Architecture
//!
//! - Type-safe identification via the [`Identity`] enum
//! - Full metadata for derivation logs, formula lookup and documentation
//! - Two ordered rule lists: [`STANDARD_IDENTITIES`] (the ten identities the
//!   solver applies by default) and [`ALL_IDENTITIES`] (standard first, then
//!   the extended density and unit-weight identities)
//!
//! ## Usage
//!
//! ```rust
//! use soil_core::identities::registry::Identity;
//! use soil_core::quantity::Quantity;
//!
//! let meta = Identity::VoidRatioFromPorosity.metadata();
//! assert_eq!(meta.target, Quantity::VoidRatio);
//! assert_eq!(meta.formula_plain, "n / (1 - n)");
//! ```

use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;

// ============================================================================
// References
// ============================================================================

/// Textbook source of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Craig's Soil Mechanics
    Craig { edition: u8, section: &'static str },
    /// Das, Principles of Geotechnical Engineering
    Das { edition: u8, section: &'static str },
    /// Follows directly from the definitions of the quantities involved
    Definition,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Craig { edition, section } => {
                format!("Craig's Soil Mechanics {}ed, Section {}", edition, section)
            }
            Reference::Das { edition, section } => {
                format!("Das, Principles of Geotechnical Engineering {}ed, Section {}", edition, section)
            }
            Reference::Definition => "By definition".to_string(),
        }
    }
}

// ============================================================================
// Identity Categories
// ============================================================================

/// Categories for grouping identities in documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityCategory {
    /// e, n, na
    VolumeRatios,
    /// Se = wGs and its rearrangements
    WaterContent,
    /// ρbulk, ρdry
    Densities,
    /// γbulk, γdry, γsat, γ'
    UnitWeights,
}

impl IdentityCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            IdentityCategory::VolumeRatios => "Volume Ratios",
            IdentityCategory::WaterContent => "Water Content and Saturation",
            IdentityCategory::Densities => "Densities",
            IdentityCategory::UnitWeights => "Unit Weights",
        }
    }

    /// Sort order for documentation
    pub fn sort_order(&self) -> u8 {
        match self {
            IdentityCategory::VolumeRatios => 0,
            IdentityCategory::WaterContent => 1,
            IdentityCategory::Densities => 2,
            IdentityCategory::UnitWeights => 3,
        }
    }

    /// All categories in sort order
    pub fn all() -> [IdentityCategory; 4] {
        [
            IdentityCategory::VolumeRatios,
            IdentityCategory::WaterContent,
            IdentityCategory::Densities,
            IdentityCategory::UnitWeights,
        ]
    }
}

// ============================================================================
// Identity Metadata
// ============================================================================

/// Complete metadata for a phase identity.
#[derive(Debug, Clone)]
pub struct IdentityMetadata {
    /// Human-readable name (e.g., "Void Ratio from Porosity")
    pub name: &'static str,
    /// Brief description
    pub description: &'static str,
    /// Right-hand side in plain text, as shown in derivation logs
    pub formula_plain: &'static str,
    /// Full identity in LaTeX
    pub formula_latex: &'static str,
    /// Quantity this identity produces
    pub target: Quantity,
    /// Quantities that must be known
    pub inputs: &'static [Quantity],
    /// Extra conditions beyond "inputs known"
    pub assumptions: &'static [&'static str],
    /// Category for grouping
    pub category: IdentityCategory,
    /// Textbook reference
    pub reference: Reference,
    /// Function in `identities/phase.rs` implementing the identity
    pub source_function: &'static str,
}

// ============================================================================
// Identity Enum
// ============================================================================

/// All phase identities known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Identity {
    // -------------------------------------------------------------------------
    // Standard rule set (solver default, in evaluation order)
    // -------------------------------------------------------------------------
    /// ρbulk = γbulk / γw
    BulkDensityFromUnitWeight,
    /// e = n / (1 - n)
    VoidRatioFromPorosity,
    /// n = e / (1 + e)
    PorosityFromVoidRatio,
    /// Sr = wGs / e
    SaturationFromWaterContent,
    /// e = wGs / Sr
    VoidRatioFromSaturation,
    /// w = Sr·e / Gs
    WaterContentFromSaturation,
    /// γdry = Gs·γw / (1 + e)
    DryUnitWeight,
    /// γbulk = (Gs + Sr·e)γw / (1 + e)
    BulkUnitWeight,
    /// γ' = γbulk - γw, saturated soil only
    SubmergedFromBulkUnitWeight,
    /// na = n(1 - Sr)
    AirContent,

    // -------------------------------------------------------------------------
    // Extended rule set
    // -------------------------------------------------------------------------
    /// ρdry = γdry / γw
    DryDensityFromUnitWeight,
    /// ρdry = ρbulk / (1 + w)
    DryDensityFromBulkDensity,
    /// ρbulk = ρdry(1 + w)
    BulkDensityFromDryDensity,
    /// ρdry = Gs·ρw / (1 + e)
    DryDensity,
    /// e = Gs·ρw / ρdry - 1
    VoidRatioFromDryDensity,
    /// e = Gs(1 + w)ρw / ρbulk - 1
    VoidRatioFromBulkDensity,
    /// γdry = γbulk / (1 + w)
    DryUnitWeightFromBulk,
    /// e = Gs·γw / γdry - 1
    VoidRatioFromDryUnitWeight,
    /// γsat = (Gs + e)γw / (1 + e)
    SaturatedUnitWeight,
    /// γ' = γsat - γw
    SubmergedFromSaturatedUnitWeight,
    /// γdry = Gs·γw(1 - n)
    DryUnitWeightFromPorosity,
    /// γbulk = Gs·γw(1 + w) / (1 + e)
    BulkUnitWeightFromWaterContent,
    /// γ' = (Gs - 1)γw / (1 + e)
    SubmergedFromSolids,
    /// γsat = γdry + n·γw
    SaturatedFromDryUnitWeight,
    /// e = (Gs·γw - γsat) / (γsat - γw)
    VoidRatioFromSaturatedUnitWeight,
    /// n = (γsat - γdry) / γw
    PorosityFromUnitWeights,
}

use Quantity::*;

impl Identity {
    /// Get the full metadata for this identity
    pub fn metadata(&self) -> IdentityMetadata {
        match self {
            Identity::BulkDensityFromUnitWeight => IdentityMetadata {
                name: "Bulk Density from Bulk Unit Weight",
                description: "Converts bulk unit weight to bulk density",
                formula_plain: "gamma_bulk / γw",
                formula_latex: r"\rho_{bulk} = \frac{\gamma_{bulk}}{\gamma_w}",
                target: BulkDensity,
                inputs: &[BulkUnitWeight],
                assumptions: &[],
                category: IdentityCategory::Densities,
                reference: Reference::Definition,
                source_function: "density_from_unit_weight",
            },

            Identity::VoidRatioFromPorosity => IdentityMetadata {
                name: "Void Ratio from Porosity",
                description: "Conversion from porosity to void ratio",
                formula_plain: "n / (1 - n)",
                formula_latex: r"e = \frac{n}{1 - n}",
                target: VoidRatio,
                inputs: &[Porosity],
                assumptions: &["n < 1"],
                category: IdentityCategory::VolumeRatios,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "void_ratio_from_porosity",
            },

            Identity::PorosityFromVoidRatio => IdentityMetadata {
                name: "Porosity from Void Ratio",
                description: "Conversion from void ratio to porosity",
                formula_plain: "e / (1 + e)",
                formula_latex: r"n = \frac{e}{1 + e}",
                target: Porosity,
                inputs: &[VoidRatio],
                assumptions: &[],
                category: IdentityCategory::VolumeRatios,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "porosity_from_void_ratio",
            },

            Identity::SaturationFromWaterContent => IdentityMetadata {
                name: "Degree of Saturation",
                description: "Rearranged from Se = wGs",
                formula_plain: "w·Gs / e",
                formula_latex: r"S_r = \frac{w G_s}{e}",
                target: Saturation,
                inputs: &[WaterContent, SpecificGravity, VoidRatio],
                assumptions: &["e ≠ 0"],
                category: IdentityCategory::WaterContent,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "saturation",
            },

            Identity::VoidRatioFromSaturation => IdentityMetadata {
                name: "Void Ratio from Saturation",
                description: "From the fundamental relationship Se = wGs",
                formula_plain: "w·Gs / Sr",
                formula_latex: r"e = \frac{w G_s}{S_r}",
                target: VoidRatio,
                inputs: &[WaterContent, SpecificGravity, Saturation],
                assumptions: &["Sr ≠ 0 (undefined for dry soil)"],
                category: IdentityCategory::WaterContent,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "void_ratio_from_saturation",
            },

            Identity::WaterContentFromSaturation => IdentityMetadata {
                name: "Water Content from Saturation",
                description: "Rearranged from Se = wGs",
                formula_plain: "Sr·e / Gs",
                formula_latex: r"w = \frac{S_r e}{G_s}",
                target: WaterContent,
                inputs: &[Saturation, VoidRatio, SpecificGravity],
                assumptions: &["Gs ≠ 0"],
                category: IdentityCategory::WaterContent,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "water_content",
            },

            Identity::DryUnitWeight => IdentityMetadata {
                name: "Dry Unit Weight",
                description: "Basic definition using void ratio",
                formula_plain: "Gs·γw / (1 + e)",
                formula_latex: r"\gamma_{dry} = \frac{G_s \gamma_w}{1 + e}",
                target: DryUnitWeight,
                inputs: &[SpecificGravity, VoidRatio],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "dry_unit_weight",
            },

            Identity::BulkUnitWeight => IdentityMetadata {
                name: "Bulk Unit Weight",
                description: "General unit weight relationship using saturation",
                formula_plain: "(Gs + Sr·e)·γw / (1 + e)",
                formula_latex: r"\gamma_{bulk} = \frac{(G_s + S_r e)\gamma_w}{1 + e}",
                target: BulkUnitWeight,
                inputs: &[SpecificGravity, VoidRatio, Saturation],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "bulk_unit_weight",
            },

            Identity::SubmergedFromBulkUnitWeight => IdentityMetadata {
                name: "Submerged Unit Weight from Bulk Unit Weight",
                description: "Archimedes' principle; the bulk unit weight of a saturated soil is its saturated unit weight",
                formula_plain: "gamma_bulk - γw",
                formula_latex: r"\gamma' = \gamma_{bulk} - \gamma_w",
                target: SubmergedUnitWeight,
                inputs: &[BulkUnitWeight, Saturation],
                assumptions: &["Sr = 1 exactly (fully saturated)"],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Craig { edition: 8, section: "3.1" },
                source_function: "submerged_unit_weight",
            },

            Identity::AirContent => IdentityMetadata {
                name: "Air Content",
                description: "Fraction of total volume occupied by air",
                formula_plain: "n·(1 - Sr)",
                formula_latex: r"n_a = n (1 - S_r)",
                target: AirContent,
                inputs: &[Porosity, Saturation],
                assumptions: &[],
                category: IdentityCategory::VolumeRatios,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "air_content",
            },

            Identity::DryDensityFromUnitWeight => IdentityMetadata {
                name: "Dry Density from Dry Unit Weight",
                description: "Converts dry unit weight to dry density",
                formula_plain: "gamma_dry / γw",
                formula_latex: r"\rho_{dry} = \frac{\gamma_{dry}}{\gamma_w}",
                target: DryDensity,
                inputs: &[DryUnitWeight],
                assumptions: &[],
                category: IdentityCategory::Densities,
                reference: Reference::Definition,
                source_function: "density_from_unit_weight",
            },

            Identity::DryDensityFromBulkDensity => IdentityMetadata {
                name: "Dry Density from Bulk Density",
                description: "Removes the mass of pore water from the bulk density",
                formula_plain: "rho_bulk / (1 + w)",
                formula_latex: r"\rho_{dry} = \frac{\rho_{bulk}}{1 + w}",
                target: DryDensity,
                inputs: &[BulkDensity, WaterContent],
                assumptions: &[],
                category: IdentityCategory::Densities,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "dry_density_from_bulk",
            },

            Identity::BulkDensityFromDryDensity => IdentityMetadata {
                name: "Bulk Density from Dry Density",
                description: "Adds the mass of pore water to the dry density",
                formula_plain: "rho_dry·(1 + w)",
                formula_latex: r"\rho_{bulk} = \rho_{dry}(1 + w)",
                target: BulkDensity,
                inputs: &[DryDensity, WaterContent],
                assumptions: &[],
                category: IdentityCategory::Densities,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "bulk_density_from_dry",
            },

            Identity::DryDensity => IdentityMetadata {
                name: "Dry Density",
                description: "Basic definition using void ratio",
                formula_plain: "Gs·ρw / (1 + e)",
                formula_latex: r"\rho_{dry} = \frac{G_s \rho_w}{1 + e}",
                target: DryDensity,
                inputs: &[SpecificGravity, VoidRatio],
                assumptions: &[],
                category: IdentityCategory::Densities,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "dry_density",
            },

            Identity::VoidRatioFromDryDensity => IdentityMetadata {
                name: "Void Ratio from Dry Density",
                description: "Back-calculated from dry density",
                formula_plain: "Gs·ρw / rho_dry - 1",
                formula_latex: r"e = \frac{G_s \rho_w}{\rho_{dry}} - 1",
                target: VoidRatio,
                inputs: &[SpecificGravity, DryDensity],
                assumptions: &["rho_dry ≠ 0"],
                category: IdentityCategory::Densities,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "void_ratio_from_dry_density",
            },

            Identity::VoidRatioFromBulkDensity => IdentityMetadata {
                name: "Void Ratio from Bulk Density",
                description: "Back-calculated directly from bulk density and water content",
                formula_plain: "Gs·(1 + w)·ρw / rho_bulk - 1",
                formula_latex: r"e = \frac{G_s (1 + w) \rho_w}{\rho_{bulk}} - 1",
                target: VoidRatio,
                inputs: &[BulkDensity, SpecificGravity, WaterContent],
                assumptions: &["rho_bulk ≠ 0"],
                category: IdentityCategory::Densities,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "void_ratio_from_bulk_density",
            },

            Identity::DryUnitWeightFromBulk => IdentityMetadata {
                name: "Dry Unit Weight from Bulk Unit Weight",
                description: "Derived from bulk unit weight and water content",
                formula_plain: "gamma_bulk / (1 + w)",
                formula_latex: r"\gamma_{dry} = \frac{\gamma_{bulk}}{1 + w}",
                target: DryUnitWeight,
                inputs: &[BulkUnitWeight, WaterContent],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "dry_unit_weight_from_bulk",
            },

            Identity::VoidRatioFromDryUnitWeight => IdentityMetadata {
                name: "Void Ratio from Dry Unit Weight",
                description: "Back-calculated from dry unit weight",
                formula_plain: "Gs·γw / gamma_dry - 1",
                formula_latex: r"e = \frac{G_s \gamma_w}{\gamma_{dry}} - 1",
                target: VoidRatio,
                inputs: &[SpecificGravity, DryUnitWeight],
                assumptions: &["gamma_dry ≠ 0"],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "void_ratio_from_dry_unit_weight",
            },

            Identity::SaturatedUnitWeight => IdentityMetadata {
                name: "Saturated Unit Weight",
                description: "Bulk unit weight with all voids filled with water",
                formula_plain: "(Gs + e)·γw / (1 + e)",
                formula_latex: r"\gamma_{sat} = \frac{(G_s + e)\gamma_w}{1 + e}",
                target: SaturatedUnitWeight,
                inputs: &[SpecificGravity, VoidRatio],
                assumptions: &["Sr = 1 in the saturated state"],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Craig { edition: 8, section: "1.4" },
                source_function: "saturated_unit_weight",
            },

            Identity::SubmergedFromSaturatedUnitWeight => IdentityMetadata {
                name: "Submerged Unit Weight",
                description: "Archimedes' principle for submerged soil",
                formula_plain: "gamma_sat - γw",
                formula_latex: r"\gamma' = \gamma_{sat} - \gamma_w",
                target: SubmergedUnitWeight,
                inputs: &[SaturatedUnitWeight],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Craig { edition: 8, section: "3.1" },
                source_function: "submerged_unit_weight",
            },

            Identity::DryUnitWeightFromPorosity => IdentityMetadata {
                name: "Dry Unit Weight from Porosity",
                description: "Using porosity instead of void ratio",
                formula_plain: "Gs·γw·(1 - n)",
                formula_latex: r"\gamma_{dry} = G_s \gamma_w (1 - n)",
                target: DryUnitWeight,
                inputs: &[SpecificGravity, Porosity],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "dry_unit_weight_from_porosity",
            },

            Identity::BulkUnitWeightFromWaterContent => IdentityMetadata {
                name: "Bulk Unit Weight from Water Content",
                description: "General unit weight relationship using water content",
                formula_plain: "Gs·γw·(1 + w) / (1 + e)",
                formula_latex: r"\gamma_{bulk} = \frac{G_s \gamma_w (1 + w)}{1 + e}",
                target: BulkUnitWeight,
                inputs: &[SpecificGravity, VoidRatio, WaterContent],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "bulk_unit_weight_from_water_content",
            },

            Identity::SubmergedFromSolids => IdentityMetadata {
                name: "Submerged Unit Weight from Solids",
                description: "Standard submerged unit weight formula",
                formula_plain: "(Gs - 1)·γw / (1 + e)",
                formula_latex: r"\gamma' = \frac{(G_s - 1)\gamma_w}{1 + e}",
                target: SubmergedUnitWeight,
                inputs: &[SpecificGravity, VoidRatio],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Craig { edition: 8, section: "3.1" },
                source_function: "submerged_unit_weight_from_solids",
            },

            Identity::SaturatedFromDryUnitWeight => IdentityMetadata {
                name: "Saturated Unit Weight from Dry Unit Weight",
                description: "Relation between saturated and dry states",
                formula_plain: "gamma_dry + n·γw",
                formula_latex: r"\gamma_{sat} = \gamma_{dry} + n \gamma_w",
                target: SaturatedUnitWeight,
                inputs: &[DryUnitWeight, Porosity],
                assumptions: &[],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "saturated_from_dry",
            },

            Identity::VoidRatioFromSaturatedUnitWeight => IdentityMetadata {
                name: "Void Ratio from Saturated Unit Weight",
                description: "Back-calculated from saturated unit weight",
                formula_plain: "(Gs·γw - gamma_sat) / (gamma_sat - γw)",
                formula_latex: r"e = \frac{G_s \gamma_w - \gamma_{sat}}{\gamma_{sat} - \gamma_w}",
                target: VoidRatio,
                inputs: &[SpecificGravity, SaturatedUnitWeight],
                assumptions: &["gamma_sat ≠ γw"],
                category: IdentityCategory::UnitWeights,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "void_ratio_from_saturated_unit_weight",
            },

            Identity::PorosityFromUnitWeights => IdentityMetadata {
                name: "Porosity from Unit Weights",
                description: "Difference between saturated and dry states",
                formula_plain: "(gamma_sat - gamma_dry) / γw",
                formula_latex: r"n = \frac{\gamma_{sat} - \gamma_{dry}}{\gamma_w}",
                target: Porosity,
                inputs: &[SaturatedUnitWeight, DryUnitWeight],
                assumptions: &[],
                category: IdentityCategory::VolumeRatios,
                reference: Reference::Das { edition: 9, section: "3.3" },
                source_function: "porosity_from_unit_weights",
            },
        }
    }

    /// Quantity this identity produces
    pub fn target(&self) -> Quantity {
        self.metadata().target
    }

    /// Quantities this identity needs
    pub fn inputs(&self) -> &'static [Quantity] {
        self.metadata().inputs
    }

    /// Whether the solver applies this identity by default
    pub fn is_standard(&self) -> bool {
        STANDARD_IDENTITIES.contains(self)
    }

    /// Get all identities in a given category
    pub fn in_category(category: IdentityCategory) -> Vec<Identity> {
        ALL_IDENTITIES
            .iter()
            .filter(|id| id.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all identities producing a given quantity
    pub fn producing(target: Quantity) -> Vec<Identity> {
        ALL_IDENTITIES
            .iter()
            .filter(|id| id.target() == target)
            .copied()
            .collect()
    }
}

/// The ten identities the solver applies by default, in evaluation order.
pub static STANDARD_IDENTITIES: &[Identity] = &[
    Identity::BulkDensityFromUnitWeight,
    Identity::VoidRatioFromPorosity,
    Identity::PorosityFromVoidRatio,
    Identity::SaturationFromWaterContent,
    Identity::VoidRatioFromSaturation,
    Identity::WaterContentFromSaturation,
    Identity::DryUnitWeight,
    Identity::BulkUnitWeight,
    Identity::SubmergedFromBulkUnitWeight,
    Identity::AirContent,
];

/// Every identity in the registry, standard ones first, in evaluation order.
pub static ALL_IDENTITIES: &[Identity] = &[
    // Standard
    Identity::BulkDensityFromUnitWeight,
    Identity::VoidRatioFromPorosity,
    Identity::PorosityFromVoidRatio,
    Identity::SaturationFromWaterContent,
    Identity::VoidRatioFromSaturation,
    Identity::WaterContentFromSaturation,
    Identity::DryUnitWeight,
    Identity::BulkUnitWeight,
    Identity::SubmergedFromBulkUnitWeight,
    Identity::AirContent,
    // Densities
    Identity::DryDensityFromUnitWeight,
    Identity::DryDensityFromBulkDensity,
    Identity::BulkDensityFromDryDensity,
    Identity::DryDensity,
    Identity::VoidRatioFromDryDensity,
    Identity::VoidRatioFromBulkDensity,
    // Unit weights
    Identity::DryUnitWeightFromBulk,
    Identity::VoidRatioFromDryUnitWeight,
    Identity::SaturatedUnitWeight,
    Identity::SubmergedFromSaturatedUnitWeight,
    Identity::DryUnitWeightFromPorosity,
    Identity::BulkUnitWeightFromWaterContent,
    Identity::SubmergedFromSolids,
    Identity::SaturatedFromDryUnitWeight,
    Identity::VoidRatioFromSaturatedUnitWeight,
    Identity::PorosityFromUnitWeights,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the identity reference document in Markdown.
///
/// ```rust
/// use soil_core::identities::registry::generate_identities_markdown;
///
/// let markdown = generate_identities_markdown();
/// assert!(markdown.contains("Phase Identities Reference"));
/// assert!(markdown.contains("Void Ratio from Porosity"));
/// ```
pub fn generate_identities_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Phase Identities Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-identities`

Every identity the phase solver and the formula finder use. Constants:
γw = 9.81 kN/m³, ρw = 1.0 Mg/m³.

Identities marked *standard* are applied by the solver by default; the rest
are applied only with the extended rule set.

---

"#);

    for category in IdentityCategory::all() {
        let identities = Identity::in_category(category);
        if identities.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for identity in identities {
            let meta = identity.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!(
                "**Formula:** `{} = {}`\n\n",
                meta.target.symbol(),
                meta.formula_plain
            ));
            output.push_str(&format!(
                "**Rule set:** {}\n\n",
                if identity.is_standard() { "standard" } else { "extended" }
            ));

            output.push_str("| Symbol | Quantity | Units |\n");
            output.push_str("|--------|----------|-------|\n");
            for q in std::iter::once(&meta.target).chain(meta.inputs.iter()) {
                output.push_str(&format!("| {} | {} | {} |\n", q.symbol(), q.name(), q.units()));
            }
            output.push('\n');

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`](phase.rs)\n\n",
                meta.source_function
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Identities:** {}\n- **Standard:** {}\n",
        ALL_IDENTITIES.len(),
        STANDARD_IDENTITIES.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_identities_have_metadata() {
        assert_eq!(ALL_IDENTITIES.len(), 26);
        assert_eq!(STANDARD_IDENTITIES.len(), 10);

        for id in ALL_IDENTITIES {
            let meta = id.metadata();
            assert!(!meta.name.is_empty(), "Identity {:?} has no name", id);
            assert!(!meta.formula_plain.is_empty(), "Identity {:?} has no formula", id);
            assert!(!meta.inputs.is_empty(), "Identity {:?} has no inputs", id);
            assert!(!meta.inputs.contains(&meta.target), "Identity {:?} needs its own target", id);
        }
    }

    #[test]
    fn test_standard_prefix_of_all() {
        assert_eq!(&ALL_IDENTITIES[..STANDARD_IDENTITIES.len()], STANDARD_IDENTITIES);
    }

    #[test]
    fn test_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for id in ALL_IDENTITIES {
            assert!(seen.insert(*id), "Identity {:?} listed twice", id);
        }
    }

    #[test]
    fn test_producing() {
        let void_ratio = Identity::producing(Quantity::VoidRatio);
        assert!(void_ratio.contains(&Identity::VoidRatioFromPorosity));
        assert!(void_ratio.contains(&Identity::VoidRatioFromSaturation));
        assert_eq!(Identity::producing(Quantity::AirContent), vec![Identity::AirContent]);
    }

    #[test]
    fn test_citation() {
        let craig = Reference::Craig { edition: 8, section: "1.4" };
        assert_eq!(craig.citation(), "Craig's Soil Mechanics 8ed, Section 1.4");
        assert_eq!(Reference::Definition.citation(), "By definition");
    }

    #[test]
    fn test_markdown_covers_every_category() {
        let md = generate_identities_markdown();
        for cat in IdentityCategory::all() {
            assert!(md.contains(cat.display_name()));
        }
        assert!(md.contains("**Total Identities:** 26"));
    }
}
