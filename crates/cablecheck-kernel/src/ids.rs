//! Identifiers for cable families and capacity tables.
//!
//! A `FamilyId` is the catalogue's canonical key (`swa-xlpe`,
//! `pvc-twin-earth`, …). Free text from outside the catalogue never
//! becomes a `FamilyId` directly; it goes through alias resolution first.
//!
//! A `TableId` is the human-readable reference of a capacity table
//! (`Table 4D4A`). It is carried into results for reporting and is never
//! used to branch logic.

use serde::{Deserialize, Serialize};

/// Canonical identifier of a cable family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(pub String);

impl FamilyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reporting identifier of a capacity table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let family = FamilyId::new("swa-xlpe");
        assert_eq!(serde_json::to_string(&family).unwrap(), "\"swa-xlpe\"");
        let table: TableId = serde_json::from_str("\"Table 4D4A\"").unwrap();
        assert_eq!(table.as_str(), "Table 4D4A");
        assert_eq!(table.to_string(), "Table 4D4A");
    }
}
