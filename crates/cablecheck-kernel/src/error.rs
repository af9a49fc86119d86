//! Load-time errors.
//!
//! Only catalogue loading can fail. Every lookup, evaluation and
//! validation after load is total and reports absence through `Option`
//! or an `unverifiable` verdict instead.

use crate::ids::{FamilyId, TableId};
use crate::units::{Amps, ConductorSize};

/// Reference data that cannot be loaded or violates a data invariant.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalogue toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid decimal literal `{literal}` in built-in data for {family}")]
    InvalidLiteral { family: String, literal: String },

    #[error("catalogue version must not be empty")]
    EmptyVersion,

    #[error("duplicate family id: {0}")]
    DuplicateFamily(FamilyId),

    #[error("family {0} declares no installation methods")]
    NoInstallationMethods(FamilyId),

    #[error("family {0} has no capacity table")]
    MissingTable(FamilyId),

    #[error("family {family} has more than one capacity table ({first}, {second})")]
    DuplicateTable {
        family: FamilyId,
        first: TableId,
        second: TableId,
    },

    #[error("table {table} references unknown family {family}")]
    OrphanTable { table: TableId, family: FamilyId },

    #[error("table {table} is empty")]
    EmptyTable { table: TableId },

    #[error("table {table} is declared under a method its family does not support")]
    UnsupportedTableMethod { table: TableId },

    #[error("table {table} has non-positive size {size}")]
    NonPositiveSize { table: TableId, size: ConductorSize },

    #[error("table {table} sizes are not strictly increasing: {previous} then {next}")]
    SizesNotIncreasing {
        table: TableId,
        previous: ConductorSize,
        next: ConductorSize,
    },

    #[error(
        "table {table} capacity decreases from {previous_amps}A at {previous} to {next_amps}A at {next}"
    )]
    CapacityDecreases {
        table: TableId,
        previous: ConductorSize,
        previous_amps: Amps,
        next: ConductorSize,
        next_amps: Amps,
    },

    #[error("family {family} alias rule is invalid: {reason}")]
    InvalidAlias { family: FamilyId, reason: String },

    #[error("family {family} has a negative {field}")]
    NegativePrice {
        family: FamilyId,
        field: &'static str,
    },

    #[error("family {family} prices size {size}, which its table does not list")]
    PricedSizeNotInTable { family: FamilyId, size: ConductorSize },

    #[error("family {family} prices size {size} more than once")]
    DuplicateSizePrice { family: FamilyId, size: ConductorSize },

    #[error("family {0} base run length must be positive")]
    NonPositiveBaseLength(FamilyId),
}
