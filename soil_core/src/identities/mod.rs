//! # Phase Identities
//!
//! Every physical identity between the twelve phase quantities lives here.
//! Having them in one place enables:
//! - Verification against textbook references
//! - One registry shared by the solver, the formula finder and the docs
//! - Consistent zero-denominator guarding
//!
//! ## Modules
//!
//! - [`phase`] - The closed-form formulas themselves
//! - [`registry`] - Identity metadata and the ordered rule lists
//! - [`evaluate`] - Binding identities to snapshots (evaluation and substituted display)
//! - [`finder`] - Formula lookup by target and known quantities
//!
//! ## Constants
//!
//! - γw = 9.81 kN/m³
//! - ρw = 1.0 Mg/m³

pub mod evaluate;
pub mod finder;
pub mod phase;
pub mod registry;

pub use evaluate::format_number;

pub use finder::{find_formulas, FormulaMatch, FormulaSearch};

pub use registry::{
    generate_identities_markdown,
    Identity,
    IdentityCategory,
    IdentityMetadata,
    Reference,
    ALL_IDENTITIES,
    STANDARD_IDENTITIES,
};
