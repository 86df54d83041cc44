//! # Phase Relationship Formulas
//!
//! Closed-form identities between the volume/mass ratios and the densities
//! and unit weights of a three-phase (solids, water, air) soil element.
//!
//! ## Notation
//!
//! - `w` = Water content (mass of water / mass of solids)
//! - `Gs` = Specific gravity of solids
//! - `e` = Void ratio (Vv / Vs)
//! - `n` = Porosity (Vv / V)
//! - `Sr` = Degree of saturation (Vw / Vv)
//! - `na` = Air content (Va / V)
//! - `ρ` = Density (Mg/m³), `γ` = Unit weight (kN/m³)
//! - `ρw` = 1.0 Mg/m³, `γw` = 9.81 kN/m³
//!
//! ## Division Guards
//!
//! Every formula that divides returns `Option<f64>` and yields `None` when
//! its denominator is exactly zero. Callers treat `None` as "not derivable".
//!
//! ## References
//!
//! - Craig's Soil Mechanics, 8th Edition, Chapter 1
//! - Das, Principles of Geotechnical Engineering, Chapter 3

use crate::units::{KnPerM3, MgPerM3, GAMMA_W, RHO_W};

/// Divide, returning `None` when the denominator is zero.
#[inline]
fn guarded_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

// =============================================================================
// VOLUME RATIOS
// =============================================================================

/// Void ratio from porosity: e = n / (1 - n)
#[inline]
pub fn void_ratio_from_porosity(n: f64) -> Option<f64> {
    guarded_div(n, 1.0 - n)
}

/// Porosity from void ratio: n = e / (1 + e)
#[inline]
pub fn porosity_from_void_ratio(e: f64) -> Option<f64> {
    guarded_div(e, 1.0 + e)
}

/// Air content: na = n(1 - Sr)
///
/// Fraction of the total volume occupied by air.
#[inline]
pub fn air_content(n: f64, sr: f64) -> f64 {
    n * (1.0 - sr)
}

/// Porosity from saturated and dry unit weights: n = (γsat - γdry) / γw
#[inline]
pub fn porosity_from_unit_weights(gamma_sat: f64, gamma_dry: f64) -> f64 {
    (gamma_sat - gamma_dry) / GAMMA_W.0
}

// =============================================================================
// WATER CONTENT AND SATURATION (Se = wGs)
// =============================================================================

/// Degree of saturation: Sr = wGs / e
#[inline]
pub fn saturation(w: f64, gs: f64, e: f64) -> Option<f64> {
    guarded_div(w * gs, e)
}

/// Void ratio from saturation: e = wGs / Sr
///
/// Undefined for a dry soil (Sr = 0), where any void ratio satisfies Se = wGs.
#[inline]
pub fn void_ratio_from_saturation(w: f64, gs: f64, sr: f64) -> Option<f64> {
    guarded_div(w * gs, sr)
}

/// Water content from saturation: w = Sr·e / Gs
#[inline]
pub fn water_content(sr: f64, e: f64, gs: f64) -> Option<f64> {
    guarded_div(sr * e, gs)
}

// =============================================================================
// DENSITIES
// =============================================================================

/// Density from unit weight: ρ = γ / γw (·ρw)
#[inline]
pub fn density_from_unit_weight(gamma: f64) -> f64 {
    MgPerM3::from(KnPerM3(gamma)).0
}

/// Dry density from bulk density: ρdry = ρbulk / (1 + w)
#[inline]
pub fn dry_density_from_bulk(rho_bulk: f64, w: f64) -> Option<f64> {
    guarded_div(rho_bulk, 1.0 + w)
}

/// Bulk density from dry density: ρbulk = ρdry(1 + w)
#[inline]
pub fn bulk_density_from_dry(rho_dry: f64, w: f64) -> f64 {
    (MgPerM3(rho_dry) * (1.0 + w)).0
}

/// Dry density: ρdry = Gs·ρw / (1 + e)
#[inline]
pub fn dry_density(gs: f64, e: f64) -> Option<f64> {
    guarded_div(gs * RHO_W.0, 1.0 + e)
}

/// Void ratio from dry density: e = Gs·ρw / ρdry - 1
#[inline]
pub fn void_ratio_from_dry_density(gs: f64, rho_dry: f64) -> Option<f64> {
    guarded_div(gs * RHO_W.0, rho_dry).map(|r| r - 1.0)
}

/// Void ratio from bulk density: e = Gs(1 + w)ρw / ρbulk - 1
#[inline]
pub fn void_ratio_from_bulk_density(rho_bulk: f64, gs: f64, w: f64) -> Option<f64> {
    guarded_div(gs * (1.0 + w) * RHO_W.0, rho_bulk).map(|r| r - 1.0)
}

// =============================================================================
// UNIT WEIGHTS
// =============================================================================

/// Dry unit weight: γdry = Gs·γw / (1 + e)
#[inline]
pub fn dry_unit_weight(gs: f64, e: f64) -> Option<f64> {
    guarded_div(gs * GAMMA_W.0, 1.0 + e)
}

/// Dry unit weight from porosity: γdry = Gs·γw(1 - n)
#[inline]
pub fn dry_unit_weight_from_porosity(gs: f64, n: f64) -> f64 {
    gs * GAMMA_W.0 * (1.0 - n)
}

/// Dry unit weight from bulk unit weight: γdry = γbulk / (1 + w)
#[inline]
pub fn dry_unit_weight_from_bulk(gamma_bulk: f64, w: f64) -> Option<f64> {
    guarded_div(gamma_bulk, 1.0 + w)
}

/// Bulk unit weight: γbulk = (Gs + Sr·e)γw / (1 + e)
#[inline]
pub fn bulk_unit_weight(gs: f64, e: f64, sr: f64) -> Option<f64> {
    guarded_div((gs + sr * e) * GAMMA_W.0, 1.0 + e)
}

/// Bulk unit weight from water content: γbulk = Gs·γw(1 + w) / (1 + e)
#[inline]
pub fn bulk_unit_weight_from_water_content(gs: f64, e: f64, w: f64) -> Option<f64> {
    guarded_div(gs * GAMMA_W.0 * (1.0 + w), 1.0 + e)
}

/// Saturated unit weight: γsat = (Gs + e)γw / (1 + e)
///
/// This is [`bulk_unit_weight`] with Sr = 1.
#[inline]
pub fn saturated_unit_weight(gs: f64, e: f64) -> Option<f64> {
    bulk_unit_weight(gs, e, 1.0)
}

/// Saturated unit weight from dry state: γsat = γdry + n·γw
#[inline]
pub fn saturated_from_dry(gamma_dry: f64, n: f64) -> f64 {
    (KnPerM3(gamma_dry) + GAMMA_W * n).0
}

/// Submerged (buoyant) unit weight: γ' = γ - γw
///
/// Only meaningful when `gamma` is the unit weight of a fully saturated soil.
#[inline]
pub fn submerged_unit_weight(gamma: f64) -> f64 {
    (KnPerM3(gamma) - GAMMA_W).0
}

/// Submerged unit weight from solids: γ' = (Gs - 1)γw / (1 + e)
#[inline]
pub fn submerged_unit_weight_from_solids(gs: f64, e: f64) -> Option<f64> {
    guarded_div((gs - 1.0) * GAMMA_W.0, 1.0 + e)
}

/// Void ratio from dry unit weight: e = Gs·γw / γdry - 1
#[inline]
pub fn void_ratio_from_dry_unit_weight(gs: f64, gamma_dry: f64) -> Option<f64> {
    guarded_div(gs * GAMMA_W.0, gamma_dry).map(|r| r - 1.0)
}

/// Void ratio from saturated unit weight: e = (Gs·γw - γsat) / (γsat - γw)
#[inline]
pub fn void_ratio_from_saturated_unit_weight(gs: f64, gamma_sat: f64) -> Option<f64> {
    guarded_div(gs * GAMMA_W.0 - gamma_sat, gamma_sat - GAMMA_W.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-3;

    #[test]
    fn test_void_ratio_porosity_inverse() {
        let e = void_ratio_from_porosity(0.4).unwrap();
        assert!((e - 0.6667).abs() < TOL);
        let n = porosity_from_void_ratio(e).unwrap();
        assert!((n - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_porosity_of_one_is_undefined() {
        assert!(void_ratio_from_porosity(1.0).is_none());
    }

    #[test]
    fn test_se_equals_wgs() {
        // S·e = w·Gs for every rearrangement
        let sr = saturation(0.2, 2.70, 0.6667).unwrap();
        assert!((sr - 0.8100).abs() < TOL);
        let e = void_ratio_from_saturation(0.2, 2.70, sr).unwrap();
        assert!((e - 0.6667).abs() < 1e-9);
        let w = water_content(sr, e, 2.70).unwrap();
        assert!((w - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_dry_soil_void_ratio_undefined() {
        assert!(void_ratio_from_saturation(0.1, 2.65, 0.0).is_none());
        assert!(water_content(1.0, 0.5, 0.0).is_none());
    }

    #[test]
    fn test_dry_unit_weight() {
        // 2.70 * 9.81 / 1.6667 = 15.892
        let g = dry_unit_weight(2.70, 0.6667).unwrap();
        assert!((g - 15.886).abs() < 0.01);
        // Porosity form agrees with void-ratio form
        let n = porosity_from_void_ratio(0.6667).unwrap();
        assert!((dry_unit_weight_from_porosity(2.70, n) - g).abs() < 1e-9);
    }

    #[test]
    fn test_saturated_forms_agree() {
        let gs = 2.65;
        let e = 0.55;
        let sat = saturated_unit_weight(gs, e).unwrap();
        let dry = dry_unit_weight(gs, e).unwrap();
        let n = porosity_from_void_ratio(e).unwrap();
        assert!((saturated_from_dry(dry, n) - sat).abs() < 1e-9);
        assert!((porosity_from_unit_weights(sat, dry) - n).abs() < 1e-9);
        let back = void_ratio_from_saturated_unit_weight(gs, sat).unwrap();
        assert!((back - e).abs() < 1e-9);
    }

    #[test]
    fn test_submerged_forms_agree() {
        let sat = saturated_unit_weight(2.70, 0.6).unwrap();
        let sub = submerged_unit_weight(sat);
        let direct = submerged_unit_weight_from_solids(2.70, 0.6).unwrap();
        assert!((sub - direct).abs() < 1e-9);
    }

    #[test]
    fn test_density_relations() {
        let rho_dry = dry_density(2.70, 0.5).unwrap();
        assert!((rho_dry - 1.8).abs() < 1e-12);
        let rho_bulk = bulk_density_from_dry(rho_dry, 0.1);
        assert!((dry_density_from_bulk(rho_bulk, 0.1).unwrap() - rho_dry).abs() < 1e-12);
        assert!((void_ratio_from_dry_density(2.70, rho_dry).unwrap() - 0.5).abs() < 1e-12);
        assert!((void_ratio_from_bulk_density(rho_bulk, 2.70, 0.1).unwrap() - 0.5).abs() < 1e-12);
        assert!((density_from_unit_weight(19.62) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_air_content() {
        assert!((air_content(0.4, 0.81) - 0.076).abs() < 1e-12);
        assert_eq!(air_content(0.4, 1.0), 0.0);
    }
}
