//! Cable Catalogue: family records layered over the Reference Table Store.
//!
//! A `Catalogue` is built once, validated completely, and never mutated.
//! The built-in data and any TOML document go through the same
//! constructor (`Catalogue::from_document`), so corrupt reference data is
//! rejected before it can answer a single query.

use crate::alias::AliasTable;
use crate::audit::{CATALOGUE_DIGEST_PREFIX, content_id};
use crate::data::builtin_document;
use crate::error::CatalogueError;
use crate::family::{CableFamily, InstallationMethod};
use crate::ids::FamilyId;
use crate::table::{CapacityTable, ReferenceTables};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

/// Serialized form of a catalogue (TOML or JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueDocument {
    pub version: String,
    pub families: Vec<CableFamily>,
    pub tables: Vec<CapacityTable>,
}

/// Validated, immutable reference data.
#[derive(Debug, Clone)]
pub struct Catalogue {
    version: String,
    digest: String,
    families: Vec<CableFamily>,
    tables: ReferenceTables,
}

impl Catalogue {
    /// The catalogue compiled into this crate.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_document(builtin_document()?)
    }

    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, CatalogueError> {
        let document: CatalogueDocument =
            toml::from_str(text).map_err(|source| CatalogueError::ParseToml {
                path: origin.to_string(),
                source,
            })?;
        Self::from_document(document)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogueError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogueError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    pub fn from_document(document: CatalogueDocument) -> Result<Self, CatalogueError> {
        if document.version.trim().is_empty() {
            return Err(CatalogueError::EmptyVersion);
        }

        let mut seen = BTreeSet::new();
        for family in &document.families {
            if !seen.insert(family.id.clone()) {
                return Err(CatalogueError::DuplicateFamily(family.id.clone()));
            }
            check_family(family)?;
        }

        let mut tables: BTreeMap<FamilyId, CapacityTable> = BTreeMap::new();
        for table in &document.tables {
            let Some(family) = document.families.iter().find(|f| f.id == table.family) else {
                return Err(CatalogueError::OrphanTable {
                    table: table.id.clone(),
                    family: table.family.clone(),
                });
            };
            if let Some(existing) = tables.get(&table.family) {
                return Err(CatalogueError::DuplicateTable {
                    family: table.family.clone(),
                    first: existing.id.clone(),
                    second: table.id.clone(),
                });
            }
            if !family.supports(table.method) {
                return Err(CatalogueError::UnsupportedTableMethod {
                    table: table.id.clone(),
                });
            }
            table.check()?;
            tables.insert(table.family.clone(), table.clone());
        }

        for family in &document.families {
            let Some(table) = tables.get(&family.id) else {
                return Err(CatalogueError::MissingTable(family.id.clone()));
            };
            check_size_prices(family, table)?;
        }

        let digest = content_id(CATALOGUE_DIGEST_PREFIX, &document);
        let aliases = AliasTable::new(
            document
                .families
                .iter()
                .map(|f| (f.id.clone(), f.aliases.clone()))
                .collect(),
        );

        info!(
            version = %document.version,
            families = document.families.len(),
            digest = %digest,
            "catalogue loaded"
        );

        Ok(Self {
            version: document.version,
            digest,
            families: document.families,
            tables: ReferenceTables::new(tables, aliases),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Content digest of the reference data this catalogue was built from.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Families in declaration order.
    pub fn families(&self) -> &[CableFamily] {
        &self.families
    }

    pub fn family(&self, id: &FamilyId) -> Option<&CableFamily> {
        self.families.iter().find(|f| &f.id == id)
    }

    pub fn families_supporting(&self, method: InstallationMethod) -> Vec<&CableFamily> {
        self.families.iter().filter(|f| f.supports(method)).collect()
    }

    /// Re-export the validated data as a document.
    pub fn document(&self) -> CatalogueDocument {
        CatalogueDocument {
            version: self.version.clone(),
            families: self.families.clone(),
            tables: self
                .families
                .iter()
                .filter_map(|f| self.tables.table_for(&f.id).cloned())
                .collect(),
        }
    }
}

fn check_family(family: &CableFamily) -> Result<(), CatalogueError> {
    if family.installation_methods.is_empty() {
        return Err(CatalogueError::NoInstallationMethods(family.id.clone()));
    }

    let invalid_alias = |reason: &str| CatalogueError::InvalidAlias {
        family: family.id.clone(),
        reason: reason.to_string(),
    };
    if family.aliases.is_empty() {
        return Err(invalid_alias("no alias rules"));
    }
    for rule in &family.aliases {
        if rule.all.is_empty() {
            return Err(invalid_alias("rule has no required keywords"));
        }
        for keyword in rule.all.iter().chain(rule.none.iter()) {
            if keyword.trim().is_empty() {
                return Err(invalid_alias("empty keyword"));
            }
            if *keyword != keyword.to_lowercase() {
                return Err(invalid_alias(&format!("keyword `{keyword}` is not lowercase")));
            }
        }
    }

    let pricing = &family.pricing;
    for (field, value) in [
        ("material cost", pricing.material_per_m),
        ("labour cost", pricing.labour_per_m),
        ("termination cost", pricing.per_termination),
    ] {
        if value < Decimal::ZERO {
            return Err(CatalogueError::NegativePrice {
                family: family.id.clone(),
                field,
            });
        }
    }

    if family.base_run_length_m <= Decimal::ZERO {
        return Err(CatalogueError::NonPositiveBaseLength(family.id.clone()));
    }
    Ok(())
}

fn check_size_prices(family: &CableFamily, table: &CapacityTable) -> Result<(), CatalogueError> {
    let mut priced = BTreeSet::new();
    for row in &family.pricing.by_size {
        if row.material_per_m < Decimal::ZERO {
            return Err(CatalogueError::NegativePrice {
                family: family.id.clone(),
                field: "size material cost",
            });
        }
        if table.capacity_of(row.size).is_none() {
            return Err(CatalogueError::PricedSizeNotInTable {
                family: family.id.clone(),
                size: row.size,
            });
        }
        if !priced.insert(row.size) {
            return Err(CatalogueError::DuplicateSizePrice {
                family: family.id.clone(),
                size: row.size,
            });
        }
    }
    Ok(())
}
