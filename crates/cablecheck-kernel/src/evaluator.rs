//! Suitability Evaluator.
//!
//! Four independent checks decide whether a family may be used for a
//! circuit at all:
//!
//! - installation method: the requirement's method is one the family supports
//! - environment: direct burial needs a burial-rated family, outdoor needs UV resistance
//! - fire: non-domestic buildings need low-smoke-zero-halogen or better
//! - application: the load classification fuzzy-matches an application tag
//!
//! A (family, size) pair is a candidate only when all four pass AND the
//! size's rated capacity is at least the protective-device rating.
//! Candidates are ordered by installed cost, then size, then family id.
//!
//! An empty result is an ordinary outcome ("no compliant cable found"),
//! not an error. `explain` additionally reports why each excluded family
//! was excluded.

use crate::catalogue::Catalogue;
use crate::estimator::{installed_cost_of, practical_length_of};
use crate::family::CableFamily;
use crate::ids::{FamilyId, TableId};
use crate::requirement::CircuitRequirement;
use crate::units::{Amps, ConductorSize, Metres, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest first word of a load classification that may be used for the
/// first-word fallback match.
pub const FIRST_WORD_MIN_CHARS: usize = 3;

/// The four suitability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitabilityCheck {
    InstallationMethod,
    Environmental,
    Fire,
    Application,
}

impl SuitabilityCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InstallationMethod => "installation_method",
            Self::Environmental => "environmental",
            Self::Fire => "fire",
            Self::Application => "application",
        }
    }
}

/// Per-check verdicts for one family against one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutcomes {
    pub installation_method: bool,
    pub environmental: bool,
    pub fire: bool,
    pub application: bool,
}

impl CheckOutcomes {
    pub fn all_pass(&self) -> bool {
        self.installation_method && self.environmental && self.fire && self.application
    }

    pub fn failed(&self) -> Vec<SuitabilityCheck> {
        [
            (SuitabilityCheck::InstallationMethod, self.installation_method),
            (SuitabilityCheck::Environmental, self.environmental),
            (SuitabilityCheck::Fire, self.fire),
            (SuitabilityCheck::Application, self.application),
        ]
        .into_iter()
        .filter_map(|(check, passed)| (!passed).then_some(check))
        .collect()
    }
}

pub fn installation_method_suitable(family: &CableFamily, requirement: &CircuitRequirement) -> bool {
    family.supports(requirement.installation_method)
}

pub fn environment_suitable(family: &CableFamily, requirement: &CircuitRequirement) -> bool {
    (!requirement.direct_burial || family.direct_burial)
        && (!requirement.outdoor || family.uv_resistant)
}

pub fn fire_compliant(family: &CableFamily, requirement: &CircuitRequirement) -> bool {
    family.fire_class >= requirement.building.minimum_fire_class()
}

pub fn application_suitable(family: &CableFamily, requirement: &CircuitRequirement) -> bool {
    application_matches(&family.application_tags, &requirement.load_classification)
}

/// Case-insensitive fuzzy match of a load classification against tags.
///
/// A tag matches when either string contains the other, or, failing that,
/// when the tag contains the classification's first word (if that word has
/// at least `FIRST_WORD_MIN_CHARS` characters). A blank classification or
/// an empty tag list never matches.
pub fn application_matches(tags: &[String], load_classification: &str) -> bool {
    let load = load_classification.trim().to_lowercase();
    if load.is_empty() {
        return false;
    }
    let first_word = load
        .split_whitespace()
        .next()
        .filter(|word| word.chars().count() >= FIRST_WORD_MIN_CHARS);

    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .any(|tag| {
            tag.contains(load.as_str())
                || load.contains(tag.as_str())
                || first_word.is_some_and(|word| tag.contains(word))
        })
}

pub fn run_checks(family: &CableFamily, requirement: &CircuitRequirement) -> CheckOutcomes {
    CheckOutcomes {
        installation_method: installation_method_suitable(family, requirement),
        environmental: environment_suitable(family, requirement),
        fire: fire_compliant(family, requirement),
        application: application_suitable(family, requirement),
    }
}

/// A suitable, electrically adequate (family, size) pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub family: FamilyId,
    pub family_name: String,
    pub size: ConductorSize,
    pub rated_amps: Amps,
    pub table_id: TableId,
    pub checks: CheckOutcomes,
    /// Installed cost for the requirement's run length.
    pub installed_cost: Money,
    /// Heuristic ceiling for this family/size, independent of the requirement.
    pub max_practical_length_m: Metres,
}

/// Why a family contributed no candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    FailedChecks {
        checks: Vec<SuitabilityCheck>,
    },
    NoAdequateSize {
        #[serde(rename = "maxAmps")]
        max_amps: Amps,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub family: FamilyId,
    #[serde(flatten)]
    pub reason: ExclusionReason,
}

/// Ordered candidates plus the reason every other family was excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionReport {
    pub catalogue_version: String,
    pub candidates: Vec<CandidateResult>,
    pub exclusions: Vec<Exclusion>,
}

impl SelectionReport {
    /// True when no pairing satisfied every constraint.
    pub fn no_compliant_cable(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SuitabilityEvaluator<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> SuitabilityEvaluator<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn evaluate(&self, requirement: &CircuitRequirement) -> Vec<CandidateResult> {
        self.explain(requirement).candidates
    }

    pub fn explain(&self, requirement: &CircuitRequirement) -> SelectionReport {
        let mut candidates = Vec::new();
        let mut exclusions = Vec::new();

        for family in self.catalogue.families() {
            let checks = run_checks(family, requirement);
            if !checks.all_pass() {
                let failed = checks.failed();
                debug!(family = %family.id, failed = ?failed, "family excluded");
                exclusions.push(Exclusion {
                    family: family.id.clone(),
                    reason: ExclusionReason::FailedChecks { checks: failed },
                });
                continue;
            }

            let Some(table) = self.catalogue.tables().table_for(&family.id) else {
                continue;
            };
            let before = candidates.len();
            candidates.extend(
                table
                    .rows
                    .iter()
                    .filter(|row| row.amps >= requirement.protective_device_rating)
                    .map(|row| CandidateResult {
                        family: family.id.clone(),
                        family_name: family.name.clone(),
                        size: row.size,
                        rated_amps: row.amps,
                        table_id: table.id.clone(),
                        checks,
                        installed_cost: installed_cost_of(
                            &family.pricing,
                            row.size,
                            requirement.run_length_m,
                        ),
                        max_practical_length_m: practical_length_of(
                            family.base_run_length_m,
                            row.size,
                        ),
                    }),
            );

            if candidates.len() == before {
                debug!(
                    family = %family.id,
                    max_amps = table.max_amps(),
                    required = requirement.protective_device_rating,
                    "family excluded: no adequate size"
                );
                exclusions.push(Exclusion {
                    family: family.id.clone(),
                    reason: ExclusionReason::NoAdequateSize {
                        max_amps: table.max_amps(),
                    },
                });
            }
        }

        candidates.sort_by(|a, b| {
            a.installed_cost
                .cmp(&b.installed_cost)
                .then_with(|| a.size.cmp(&b.size))
                .then_with(|| a.family.cmp(&b.family))
        });

        debug!(
            candidates = candidates.len(),
            excluded = exclusions.len(),
            "selection complete"
        );

        SelectionReport {
            catalogue_version: self.catalogue.version().to_string(),
            candidates,
            exclusions,
        }
    }
}
