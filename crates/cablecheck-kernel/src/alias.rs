//! Free-text family resolution.
//!
//! Family names arriving from untrusted producers are matched against a
//! finite, explicitly enumerated alias table. A rule matches when every
//! `all` keyword is contained in the lowercased text and no `none`
//! keyword is. Text matching zero families is `Unknown`; text matching
//! more than one is `Ambiguous`. Neither is ever guessed into a family.

use crate::ids::FamilyId;
use serde::{Deserialize, Serialize};

/// One keyword rule for recognising a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub all: Vec<String>,
    #[serde(default)]
    pub none: Vec<String>,
}

impl AliasRule {
    pub fn new(all: &[&str], none: &[&str]) -> Self {
        Self {
            all: all.iter().map(|k| k.to_string()).collect(),
            none: none.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        !self.all.is_empty()
            && self.all.iter().all(|k| lowered.contains(k.as_str()))
            && !self.none.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Outcome of resolving free text to a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyMatch {
    Resolved(FamilyId),
    Unknown,
    Ambiguous(Vec<FamilyId>),
}

impl FamilyMatch {
    pub fn resolved(&self) -> Option<&FamilyId> {
        match self {
            Self::Resolved(id) => Some(id),
            Self::Unknown | Self::Ambiguous(_) => None,
        }
    }
}

/// Alias rules for every family, in catalogue order.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: Vec<(FamilyId, Vec<AliasRule>)>,
}

impl AliasTable {
    pub fn new(entries: Vec<(FamilyId, Vec<AliasRule>)>) -> Self {
        Self { entries }
    }

    pub fn rules_for(&self, family: &FamilyId) -> Option<&[AliasRule]> {
        self.entries
            .iter()
            .find(|(id, _)| id == family)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn resolve(&self, text: &str) -> FamilyMatch {
        let lowered = text.to_lowercase();
        let mut matched: Vec<FamilyId> = self
            .entries
            .iter()
            .filter(|(_, rules)| rules.iter().any(|rule| rule.matches(&lowered)))
            .map(|(id, _)| id.clone())
            .collect();

        match matched.len() {
            0 => FamilyMatch::Unknown,
            1 => FamilyMatch::Resolved(matched.remove(0)),
            _ => {
                matched.sort();
                FamilyMatch::Ambiguous(matched)
            }
        }
    }
}
