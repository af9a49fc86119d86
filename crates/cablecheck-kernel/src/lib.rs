//! # Cablecheck Kernel
//!
//! Table-driven cable selection and compliance validation.
//!
//! Reference data is loaded once into an immutable [`Catalogue`] and then
//! borrowed by every query. Two paths share it as their single source of
//! truth: selection (requirement in, ranked candidates out) and
//! validation (untrusted claim in, auditable verdict out).
//!
//! Loading is the only fallible step. Every query afterwards is total and
//! reports absence through `Option` or an `unverifiable` verdict.
//!
//! ## Architecture
//!
//! ```text
//! CapacityTable           ← size → rated amps under one reference method
//!     │
//! ReferenceTables         ← per-family tables + alias resolution
//!     │
//! Catalogue               ← family records over the tables, versioned + digested
//!     │
//!     ├── SuitabilityEvaluator  ← CircuitRequirement → ranked CandidateResult
//!     │       │
//!     │   CostEstimator         ← installed cost, practical run length
//!     │
//!     └── ComplianceValidator   ← ComplianceClaim → ComplianceVerdict
//! ```

pub mod alias;
pub mod audit;
pub mod catalogue;
pub mod compliance;
pub mod data;
pub mod error;
pub mod estimator;
pub mod evaluator;
pub mod family;
pub mod ids;
pub mod requirement;
pub mod table;
pub mod units;

pub use alias::{AliasRule, FamilyMatch};
pub use catalogue::{Catalogue, CatalogueDocument};
pub use compliance::{
    CLAIM_TOLERANCE_AMPS, ClaimAssertion, ClaimReport, ComplianceClaim, ComplianceValidator,
    ComplianceVerdict, Finding, ToleranceBand, Verdict,
};
pub use error::CatalogueError;
pub use estimator::{Alternative, CostEstimator};
pub use evaluator::{
    CandidateResult, CheckOutcomes, Exclusion, ExclusionReason, SelectionReport,
    SuitabilityCheck, SuitabilityEvaluator,
};
pub use family::{
    BuildingClass, CableFamily, FireClass, InstallationMethod, PricingProfile, SizePrice,
};
pub use ids::{FamilyId, TableId};
pub use requirement::CircuitRequirement;
pub use table::{CapacityRow, CapacityTable, ReferenceTables};
pub use units::{Amps, ConductorSize, Metres, Money, parse_amps_text, parse_size_text};
