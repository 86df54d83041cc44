//! # Unit Types
//!
//! Lightweight newtype wrappers for the two dimensional families the phase
//! relations mix: mass density and unit weight. Everything else the solver
//! handles (w, Gs, e, n, Sr, na) is a dimensionless ratio and stays `f64`.
//!
//! ## Unit System
//!
//! - Density: megagrams per cubic metre (Mg/m³, numerically equal to g/cm³)
//! - Unit weight: kilonewtons per cubic metre (kN/m³)
//!
//! Conversion between the two uses the model's water constants, so that
//! `γ / γw = ρ / ρw` holds exactly: 1 Mg/m³ ↔ 9.81 kN/m³.
//!
//! ## Example
//!
//! ```rust
//! use soil_core::units::{KnPerM3, MgPerM3};
//!
//! let gamma = KnPerM3(19.62);
//! let rho: MgPerM3 = gamma.into();
//! assert!((rho.0 - 2.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Density of water, ρw
pub const RHO_W: MgPerM3 = MgPerM3(1.0);

/// Unit weight of water, γw
pub const GAMMA_W: KnPerM3 = KnPerM3(9.81);

// ============================================================================
// Density
// ============================================================================

/// Mass density in Mg/m³ (g/cm³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MgPerM3(pub f64);

// ============================================================================
// Unit Weight
// ============================================================================

/// Unit weight in kN/m³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM3(pub f64);

impl From<KnPerM3> for MgPerM3 {
    fn from(gamma: KnPerM3) -> Self {
        MgPerM3(gamma.0 / GAMMA_W.0 * RHO_W.0)
    }
}

impl From<MgPerM3> for KnPerM3 {
    fn from(rho: MgPerM3) -> Self {
        KnPerM3(rho.0 / RHO_W.0 * GAMMA_W.0)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl Add for KnPerM3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        KnPerM3(self.0 + rhs.0)
    }
}

impl Sub for KnPerM3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        KnPerM3(self.0 - rhs.0)
    }
}

/// Scaling by a dimensionless ratio
impl Mul<f64> for KnPerM3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        KnPerM3(self.0 * rhs)
    }
}

/// Scaling by a dimensionless ratio
impl Mul<f64> for MgPerM3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        MgPerM3(self.0 * rhs)
    }
}
