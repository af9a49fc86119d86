//! Compliance Validator.
//!
//! Checks externally produced claims about cable capacity and minimum
//! conductor size against the reference tables. Producers of claims are
//! untrusted: family names are free text and are resolved through the
//! alias table, and anything that cannot be resolved to exactly one family
//! with a table entry for the claimed size is `unverifiable`.
//!
//! `unverifiable` means "cannot confirm". Callers must never treat it as
//! an implicit pass.
//!
//! Every verdict carries the authoritative value and table id when known,
//! and a deterministic audit id over the verdict and the catalogue digest.

use crate::alias::FamilyMatch;
use crate::audit::{VERDICT_AUDIT_PREFIX, content_id};
use crate::catalogue::Catalogue;
use crate::ids::{FamilyId, TableId};
use crate::units::{Amps, ConductorSize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Permitted deviation between a claimed and an authoritative capacity,
/// inclusive. Allows for derating variance between sources; it is not
/// derived from any calculation.
pub const CLAIM_TOLERANCE_AMPS: Amps = 5;

/// What a claim asserts about a (family, size) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClaimAssertion {
    /// "This size carries `claimed_amps`."
    Capacity {
        #[serde(rename = "claimedAmps")]
        claimed_amps: Decimal,
    },
    /// "This size is the minimum for a `device_rating` protective device."
    MinimumSizeForRating {
        #[serde(rename = "deviceRating")]
        device_rating: Amps,
    },
}

/// An external assertion about a cable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceClaim {
    /// Free-text family name as produced upstream.
    pub family: String,
    pub size: ConductorSize,
    pub assertion: ClaimAssertion,
}

impl ComplianceClaim {
    pub fn capacity(family: impl Into<String>, size: ConductorSize, claimed_amps: Decimal) -> Self {
        Self {
            family: family.into(),
            size,
            assertion: ClaimAssertion::Capacity { claimed_amps },
        }
    }

    pub fn minimum_size(family: impl Into<String>, size: ConductorSize, device_rating: Amps) -> Self {
        Self {
            family: family.into(),
            size,
            assertion: ClaimAssertion::MinimumSizeForRating { device_rating },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
    Unverifiable,
}

/// Classification of a verdict's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finding {
    WithinTolerance,
    CapacityOverstated,
    CapacityUnderstated,
    MatchesMinimum,
    Undersized,
    Oversized,
    NoStandardSize,
    UnknownFamily,
    AmbiguousFamily,
    MissingTableEntry,
}

impl Finding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WithinTolerance => "within_tolerance",
            Self::CapacityOverstated => "capacity_overstated",
            Self::CapacityUnderstated => "capacity_understated",
            Self::MatchesMinimum => "matches_minimum",
            Self::Undersized => "undersized",
            Self::Oversized => "oversized",
            Self::NoStandardSize => "no_standard_size",
            Self::UnknownFamily => "unknown_family",
            Self::AmbiguousFamily => "ambiguous_family",
            Self::MissingTableEntry => "missing_table_entry",
        }
    }

    pub fn verdict(self) -> Verdict {
        match self {
            Self::WithinTolerance | Self::MatchesMinimum => Verdict::Valid,
            Self::CapacityOverstated
            | Self::CapacityUnderstated
            | Self::Undersized
            | Self::Oversized
            | Self::NoStandardSize => Verdict::Invalid,
            Self::UnknownFamily | Self::AmbiguousFamily | Self::MissingTableEntry => {
                Verdict::Unverifiable
            }
        }
    }
}

/// Authoritative capacity ± tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToleranceBand {
    pub lower_amps: Amps,
    pub upper_amps: Amps,
}

impl ToleranceBand {
    pub fn around(authoritative: Amps) -> Self {
        Self {
            lower_amps: authoritative.saturating_sub(CLAIM_TOLERANCE_AMPS),
            upper_amps: authoritative.saturating_add(CLAIM_TOLERANCE_AMPS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceVerdict {
    /// Deterministic id over every other field.
    pub audit_id: String,
    pub verdict: Verdict,
    pub finding: Finding,
    pub claim: ComplianceClaim,
    pub resolved_family: Option<FamilyId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguous_families: Vec<FamilyId>,
    /// Capacity of the claimed size, or of the authoritative minimum size
    /// for minimum-size claims.
    pub authoritative_amps: Option<Amps>,
    /// Authoritative minimum size, for minimum-size claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authoritative_size: Option<ConductorSize>,
    pub table_id: Option<TableId>,
    /// Claimed minus authoritative, for capacity claims.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deviation_amps: Option<Decimal>,
    pub tolerance_amps: Amps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<ToleranceBand>,
    pub catalogue_digest: String,
}

impl ComplianceVerdict {
    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }
}

/// Batch outcome: verdicts in input order plus per-verdict counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReport {
    pub catalogue_version: String,
    pub catalogue_digest: String,
    /// "accepted" when no claim is invalid or unverifiable, else "rejected".
    pub result: String,
    pub valid: usize,
    pub invalid: usize,
    pub unverifiable: usize,
    pub verdicts: Vec<ComplianceVerdict>,
}

impl ClaimReport {
    pub fn is_accepted(&self) -> bool {
        self.result == "accepted"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ComplianceValidator<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> ComplianceValidator<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    /// Validate any claim.
    pub fn validate(&self, claim: &ComplianceClaim) -> ComplianceVerdict {
        let mut verdict = self.blank_verdict(claim);

        let family = match self.catalogue.tables().resolve_family(&claim.family) {
            FamilyMatch::Resolved(id) => id,
            FamilyMatch::Unknown => return self.finish(verdict, Finding::UnknownFamily),
            FamilyMatch::Ambiguous(ids) => {
                warn!(family = %claim.family, candidates = ?ids, "ambiguous family text");
                verdict.ambiguous_families = ids;
                return self.finish(verdict, Finding::AmbiguousFamily);
            }
        };
        verdict.table_id = self.catalogue.tables().table_id_for(&family).cloned();
        verdict.resolved_family = Some(family.clone());

        let Some(claimed_size_amps) = self.catalogue.tables().capacity_of(&family, claim.size)
        else {
            return self.finish(verdict, Finding::MissingTableEntry);
        };

        let finding = match &claim.assertion {
            ClaimAssertion::Capacity { claimed_amps } => {
                verdict.authoritative_amps = Some(claimed_size_amps);
                verdict.band = Some(ToleranceBand::around(claimed_size_amps));
                match claimed_amps.checked_sub(Decimal::from(claimed_size_amps)) {
                    Some(deviation) => {
                        verdict.deviation_amps = Some(deviation.normalize());
                        capacity_finding(deviation)
                    }
                    // Only a claim near Decimal::MIN can overflow.
                    None if claimed_amps.is_sign_negative() => Finding::CapacityUnderstated,
                    None => Finding::CapacityOverstated,
                }
            }
            ClaimAssertion::MinimumSizeForRating { device_rating } => {
                match self
                    .catalogue
                    .tables()
                    .minimum_size_for(&family, *device_rating)
                {
                    None => {
                        verdict.authoritative_amps = Some(claimed_size_amps);
                        Finding::NoStandardSize
                    }
                    Some((minimum, amps)) => {
                        verdict.authoritative_amps = Some(amps);
                        verdict.authoritative_size = Some(minimum);
                        if claim.size == minimum {
                            Finding::MatchesMinimum
                        } else if claim.size < minimum {
                            Finding::Undersized
                        } else {
                            Finding::Oversized
                        }
                    }
                }
            }
        };
        self.finish(verdict, finding)
    }

    /// Validate a capacity claim given as separate scalars.
    pub fn validate_capacity_claim(
        &self,
        family: &str,
        size: ConductorSize,
        claimed_amps: Decimal,
    ) -> ComplianceVerdict {
        self.validate(&ComplianceClaim::capacity(family, size, claimed_amps))
    }

    /// Smallest size of the family named by `family` rated for `rating`.
    ///
    /// `None` when the text does not resolve to exactly one family or when
    /// no standard size suffices. Callers must treat `None` as a hard
    /// failure.
    pub fn minimum_size_for_rating(
        &self,
        family: &str,
        rating: Amps,
    ) -> Option<(ConductorSize, Amps)> {
        let resolved = self.catalogue.tables().resolve_family(family);
        self.catalogue
            .tables()
            .minimum_size_for(resolved.resolved()?, rating)
    }

    pub fn validate_batch(&self, claims: &[ComplianceClaim]) -> ClaimReport {
        let verdicts: Vec<ComplianceVerdict> = claims.iter().map(|c| self.validate(c)).collect();
        let count = |v: Verdict| verdicts.iter().filter(|x| x.verdict == v).count();
        let (valid, invalid, unverifiable) = (
            count(Verdict::Valid),
            count(Verdict::Invalid),
            count(Verdict::Unverifiable),
        );
        let result = if invalid == 0 && unverifiable == 0 {
            "accepted"
        } else {
            "rejected"
        };
        ClaimReport {
            catalogue_version: self.catalogue.version().to_string(),
            catalogue_digest: self.catalogue.digest().to_string(),
            result: result.to_string(),
            valid,
            invalid,
            unverifiable,
            verdicts,
        }
    }

    fn blank_verdict(&self, claim: &ComplianceClaim) -> ComplianceVerdict {
        ComplianceVerdict {
            audit_id: String::new(),
            verdict: Verdict::Unverifiable,
            finding: Finding::UnknownFamily,
            claim: claim.clone(),
            resolved_family: None,
            ambiguous_families: Vec::new(),
            authoritative_amps: None,
            authoritative_size: None,
            table_id: None,
            deviation_amps: None,
            tolerance_amps: CLAIM_TOLERANCE_AMPS,
            band: None,
            catalogue_digest: self.catalogue.digest().to_string(),
        }
    }

    fn finish(&self, mut verdict: ComplianceVerdict, finding: Finding) -> ComplianceVerdict {
        verdict.finding = finding;
        verdict.verdict = finding.verdict();
        verdict.audit_id = content_id(VERDICT_AUDIT_PREFIX, &verdict);
        debug!(
            family = %verdict.claim.family,
            size = %verdict.claim.size,
            verdict = ?verdict.verdict,
            finding = ?verdict.finding,
            authoritative = ?verdict.authoritative_amps,
            "claim checked"
        );
        verdict
    }
}

fn capacity_finding(deviation: Decimal) -> Finding {
    if deviation.abs() <= Decimal::from(CLAIM_TOLERANCE_AMPS) {
        Finding::WithinTolerance
    } else if deviation > Decimal::ZERO {
        Finding::CapacityOverstated
    } else {
        Finding::CapacityUnderstated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn size(s: &str) -> ConductorSize {
        ConductorSize::new(dec(s))
    }

    #[test]
    fn armoured_35_overstated_claim_is_invalid() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        let verdict = validator.validate_capacity_claim("SWA cable", size("35"), dec("210"));
        assert_eq!(verdict.verdict, Verdict::Invalid);
        assert_eq!(verdict.finding, Finding::CapacityOverstated);
        assert_eq!(verdict.authoritative_amps, Some(137));
        assert_eq!(verdict.table_id, Some(TableId::new("Table 4D4A")));
        assert_eq!(verdict.deviation_amps, Some(dec("73")));
        assert_eq!(
            verdict.band,
            Some(ToleranceBand {
                lower_amps: 132,
                upper_amps: 142
            })
        );
    }

    #[test]
    fn twin_and_earth_exact_claim_is_valid() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        let verdict =
            validator.validate_capacity_claim("2.5mm PVC twin and earth", size("2.5"), dec("24"));
        assert_eq!(verdict.verdict, Verdict::Valid);
        assert_eq!(verdict.finding, Finding::WithinTolerance);
        assert_eq!(verdict.authoritative_amps, Some(24));
        assert_eq!(verdict.deviation_amps, Some(Decimal::ZERO));
        assert_eq!(verdict.resolved_family, Some(FamilyId::new("pvc-twin-earth")));
    }

    #[test]
    fn tolerance_is_inclusive_at_five() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        let check = |claimed: &str| {
            validator
                .validate_capacity_claim("swa", size("35"), dec(claimed))
                .verdict
        };
        assert_eq!(check("142"), Verdict::Valid);
        assert_eq!(check("132"), Verdict::Valid);
        assert_eq!(check("143"), Verdict::Invalid);
        assert_eq!(check("131"), Verdict::Invalid);
        assert_eq!(check("142.5"), Verdict::Invalid);
    }

    #[test]
    fn understated_claim_is_invalid() {
        let catalogue = Catalogue::builtin().unwrap();
        let verdict = ComplianceValidator::new(&catalogue).validate_capacity_claim(
            "armoured",
            size("70"),
            dec("150"),
        );
        assert_eq!(verdict.finding, Finding::CapacityUnderstated);
        assert_eq!(verdict.authoritative_amps, Some(201));
    }

    #[test]
    fn unknown_family_is_unverifiable_without_authority() {
        let catalogue = Catalogue::builtin().unwrap();
        let verdict = ComplianceValidator::new(&catalogue).validate_capacity_claim(
            "some future cable xyz",
            size("35"),
            dec("137"),
        );
        assert_eq!(verdict.verdict, Verdict::Unverifiable);
        assert_eq!(verdict.finding, Finding::UnknownFamily);
        assert_eq!(verdict.authoritative_amps, None);
        assert_eq!(verdict.table_id, None);
    }

    #[test]
    fn ambiguous_family_is_unverifiable() {
        let catalogue = Catalogue::builtin().unwrap();
        let verdict = ComplianceValidator::new(&catalogue).validate_capacity_claim(
            "SWA with MICC tails",
            size("2.5"),
            dec("26"),
        );
        assert_eq!(verdict.finding, Finding::AmbiguousFamily);
        assert_eq!(
            verdict.ambiguous_families,
            vec![FamilyId::new("micc"), FamilyId::new("swa-xlpe")]
        );
        assert_eq!(verdict.authoritative_amps, None);
    }

    #[test]
    fn missing_size_is_unverifiable_but_names_table() {
        let catalogue = Catalogue::builtin().unwrap();
        let verdict =
            ComplianceValidator::new(&catalogue).validate_capacity_claim("swa", size("3"), dec("30"));
        assert_eq!(verdict.verdict, Verdict::Unverifiable);
        assert_eq!(verdict.finding, Finding::MissingTableEntry);
        assert_eq!(verdict.authoritative_amps, None);
        assert_eq!(verdict.table_id, Some(TableId::new("Table 4D4A")));
    }

    #[test]
    fn minimum_size_for_armoured_200a() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        assert_eq!(
            validator.minimum_size_for_rating("SWA", 200),
            Some((ConductorSize::mm2(70), 201))
        );
        assert_eq!(validator.minimum_size_for_rating("SWA", 501), None);
        assert_eq!(validator.minimum_size_for_rating("unknown", 20), None);
    }

    #[test]
    fn minimum_size_claims() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);

        let exact = validator.validate(&ComplianceClaim::minimum_size("swa", size("70"), 200));
        assert_eq!(exact.finding, Finding::MatchesMinimum);
        assert_eq!(exact.authoritative_size, Some(ConductorSize::mm2(70)));
        assert_eq!(exact.authoritative_amps, Some(201));

        let small = validator.validate(&ComplianceClaim::minimum_size("swa", size("50"), 200));
        assert_eq!(small.finding, Finding::Undersized);
        assert_eq!(small.verdict, Verdict::Invalid);

        let large = validator.validate(&ComplianceClaim::minimum_size("swa", size("95"), 200));
        assert_eq!(large.finding, Finding::Oversized);

        let none = validator.validate(&ComplianceClaim::minimum_size(
            "pvc twin",
            size("16"),
            100,
        ));
        assert_eq!(none.finding, Finding::NoStandardSize);
        assert_eq!(none.verdict, Verdict::Invalid);
        assert_eq!(none.authoritative_size, None);
    }

    #[test]
    fn audit_id_is_deterministic_and_claim_sensitive() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        let a = validator.validate_capacity_claim("swa", size("35"), dec("210"));
        let b = validator.validate_capacity_claim("swa", size("35"), dec("210"));
        let c = validator.validate_capacity_claim("swa", size("35"), dec("211"));
        assert!(a.audit_id.starts_with("cv1_"));
        assert_eq!(a.audit_id, b.audit_id);
        assert_ne!(a.audit_id, c.audit_id);
    }

    #[test]
    fn extreme_claimed_capacities_are_judged() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);

        let low = validator.validate_capacity_claim("SWA", size("35"), Decimal::MIN);
        assert_eq!(low.verdict, Verdict::Invalid);
        assert_eq!(low.finding, Finding::CapacityUnderstated);
        assert_eq!(low.authoritative_amps, Some(137));
        assert_eq!(low.deviation_amps, None);

        let high = validator.validate_capacity_claim("SWA", size("35"), Decimal::MAX);
        assert_eq!(high.verdict, Verdict::Invalid);
        assert_eq!(high.finding, Finding::CapacityOverstated);
        assert_eq!(high.authoritative_amps, Some(137));
        assert!(high.audit_id.starts_with("cv1_"));
    }

    #[test]
    fn audit_id_ignores_size_spelling() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        let parse = |json: &str| serde_json::from_str::<ComplianceClaim>(json).unwrap();
        let a = validator.validate(&parse(
            r#"{"family": "SWA", "size": "35", "assertion": {"kind": "capacity", "claimedAmps": "210"}}"#,
        ));
        let b = validator.validate(&parse(
            r#"{"family": "SWA", "size": "35.0", "assertion": {"kind": "capacity", "claimedAmps": "210"}}"#,
        ));
        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.audit_id, b.audit_id);
    }

    #[test]
    fn batch_counts_and_result() {
        let catalogue = Catalogue::builtin().unwrap();
        let validator = ComplianceValidator::new(&catalogue);
        let claims = vec![
            ComplianceClaim::capacity("swa", size("35"), dec("137")),
            ComplianceClaim::capacity("pvc t&e", size("2.5"), dec("27")),
        ];
        let report = validator.validate_batch(&claims);
        assert!(report.is_accepted());
        assert_eq!(report.valid, 2);

        let mut claims = claims;
        claims.push(ComplianceClaim::capacity("swa", size("35"), dec("210")));
        claims.push(ComplianceClaim::capacity("mystery", size("35"), dec("210")));
        let report = validator.validate_batch(&claims);
        assert!(!report.is_accepted());
        assert_eq!((report.valid, report.invalid, report.unverifiable), (2, 1, 1));
        assert_eq!(report.verdicts.len(), 4);
        assert_eq!(report.verdicts[3].finding, Finding::UnknownFamily);
    }

    #[test]
    fn claim_json_shape() {
        let claim: ComplianceClaim = serde_json::from_str(
            r#"{"family": "SWA", "size": "35", "assertion": {"kind": "capacity", "claimedAmps": 210}}"#,
        )
        .unwrap();
        assert_eq!(claim, ComplianceClaim::capacity("SWA", size("35"), dec("210")));

        let claim: ComplianceClaim = serde_json::from_str(
            r#"{"family": "SWA", "size": 70, "assertion": {"kind": "minimum_size_for_rating", "deviceRating": 200}}"#,
        )
        .unwrap();
        assert_eq!(claim, ComplianceClaim::minimum_size("SWA", size("70"), 200));
    }
}
