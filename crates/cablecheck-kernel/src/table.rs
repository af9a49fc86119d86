//! Reference Table Store.
//!
//! A capacity table maps conductor size to rated current under one
//! reference installation method. Rows are held in ascending size order
//! with non-decreasing capacity; both properties are checked once at load
//! (`CapacityTable::check`) so that lookups never have to.

use crate::alias::{AliasTable, FamilyMatch};
use crate::error::CatalogueError;
use crate::family::InstallationMethod;
use crate::ids::{FamilyId, TableId};
use crate::units::{Amps, ConductorSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRow {
    pub size: ConductorSize,
    pub amps: Amps,
}

/// Immutable size → rated current mapping for one family under one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityTable {
    pub id: TableId,
    pub family: FamilyId,
    pub method: InstallationMethod,
    pub rows: Vec<CapacityRow>,
}

impl CapacityTable {
    /// Verify the row invariants: non-empty, positive and strictly
    /// increasing sizes, non-decreasing capacity.
    pub fn check(&self) -> Result<(), CatalogueError> {
        if self.rows.is_empty() {
            return Err(CatalogueError::EmptyTable {
                table: self.id.clone(),
            });
        }
        for row in &self.rows {
            if !row.size.is_positive() {
                return Err(CatalogueError::NonPositiveSize {
                    table: self.id.clone(),
                    size: row.size,
                });
            }
        }
        for pair in self.rows.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.size <= prev.size {
                return Err(CatalogueError::SizesNotIncreasing {
                    table: self.id.clone(),
                    previous: prev.size,
                    next: next.size,
                });
            }
            if next.amps < prev.amps {
                return Err(CatalogueError::CapacityDecreases {
                    table: self.id.clone(),
                    previous: prev.size,
                    previous_amps: prev.amps,
                    next: next.size,
                    next_amps: next.amps,
                });
            }
        }
        Ok(())
    }

    pub fn capacity_of(&self, size: ConductorSize) -> Option<Amps> {
        self.rows
            .binary_search_by(|row| row.size.cmp(&size))
            .ok()
            .map(|idx| self.rows[idx].amps)
    }

    /// First size, in ascending order, whose capacity clears `required`.
    pub fn minimum_size_for(&self, required: Amps) -> Option<(ConductorSize, Amps)> {
        self.rows
            .iter()
            .find(|row| row.amps >= required)
            .map(|row| (row.size, row.amps))
    }

    pub fn sizes(&self) -> impl Iterator<Item = ConductorSize> + '_ {
        self.rows.iter().map(|row| row.size)
    }

    pub fn max_amps(&self) -> Amps {
        self.rows.last().map_or(0, |row| row.amps)
    }
}

/// All capacity tables plus the alias table used to reach them from text.
///
/// Built only by `Catalogue`, after every table has passed `check`.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    tables: BTreeMap<FamilyId, CapacityTable>,
    aliases: AliasTable,
}

impl ReferenceTables {
    pub(crate) fn new(tables: BTreeMap<FamilyId, CapacityTable>, aliases: AliasTable) -> Self {
        Self { tables, aliases }
    }

    pub fn table_for(&self, family: &FamilyId) -> Option<&CapacityTable> {
        self.tables.get(family)
    }

    pub fn capacity_of(&self, family: &FamilyId, size: ConductorSize) -> Option<Amps> {
        self.table_for(family)?.capacity_of(size)
    }

    pub fn table_id_for(&self, family: &FamilyId) -> Option<&TableId> {
        self.table_for(family).map(|table| &table.id)
    }

    /// `None` means no standard size suffices; callers must treat that as
    /// a hard failure, never substitute a default.
    pub fn minimum_size_for(
        &self,
        family: &FamilyId,
        required: Amps,
    ) -> Option<(ConductorSize, Amps)> {
        self.table_for(family)?.minimum_size_for(required)
    }

    pub fn sizes_of(&self, family: &FamilyId) -> Vec<ConductorSize> {
        self.table_for(family)
            .map(|table| table.sizes().collect())
            .unwrap_or_default()
    }

    /// Families with at least one size rated at or above `amps`.
    pub fn families_rated_for(&self, amps: Amps) -> Vec<FamilyId> {
        self.tables
            .values()
            .filter(|table| table.max_amps() >= amps)
            .map(|table| table.family.clone())
            .collect()
    }

    pub fn resolve_family(&self, text: &str) -> FamilyMatch {
        self.aliases.resolve(text)
    }

    pub fn tables(&self) -> impl Iterator<Item = &CapacityTable> {
        self.tables.values()
    }
}
