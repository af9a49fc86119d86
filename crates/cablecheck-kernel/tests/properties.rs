//! Property-based tests over the built-in catalogue.
//!
//! Each property is checked for generated families, sizes, ratings and
//! requirements rather than hand-picked cases.

use cablecheck_kernel::evaluator::{
    application_suitable, environment_suitable, fire_compliant, installation_method_suitable,
    run_checks,
};
use cablecheck_kernel::{
    BuildingClass, CLAIM_TOLERANCE_AMPS, Catalogue, CircuitRequirement, ComplianceValidator,
    ConductorSize, FamilyId, FamilyMatch, InstallationMethod, SuitabilityEvaluator, Verdict,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::OnceLock;

fn catalogue() -> &'static Catalogue {
    static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();
    CATALOGUE.get_or_init(|| Catalogue::builtin().expect("built-in catalogue loads"))
}

/// Family id paired with free text that resolves to it.
const FAMILY_TEXT: &[(&str, &str)] = &[
    ("pvc-twin-earth", "PVC twin and earth"),
    ("xlpe-twin-earth", "XLPE Twin & Earth"),
    ("swa-xlpe", "SWA"),
    ("pvc-single", "6491X single PVC"),
    ("lszh-multicore", "LSZH multicore"),
    ("fp200", "FP200 Gold"),
    ("micc", "Pyro MICC"),
];

/// Text close to, but not matching, an alias keyword.
const NEAR_MISSES: &[&str] = &[
    "armour",
    "tw in pvc",
    "xlp",
    "unarmoured cable",
    "s w a",
    "mineral",
    "fp 200",
    "low-smoke",
    "t & e",
];

const LOADS: &[&str] = &[
    "lighting",
    "ring final circuit",
    "Fire alarm",
    "sub-main to garage",
    "EV charger",
    "socket outlets",
    "motor",
    "boiler house",
    "",
    "unclassified",
];

fn family_text() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop::sample::select(FAMILY_TEXT)
}

fn requirement() -> impl Strategy<Value = CircuitRequirement> {
    (
        prop::sample::select(vec![
            BuildingClass::Domestic,
            BuildingClass::Commercial,
            BuildingClass::Industrial,
            BuildingClass::HighRiseResidential,
        ]),
        prop::sample::select(InstallationMethod::ALL.to_vec()),
        any::<bool>(),
        any::<bool>(),
        prop::sample::select(LOADS),
        0u32..500,
        0u32..600,
    )
        .prop_map(
            |(building, method, outdoor, direct_burial, load, length, rating)| CircuitRequirement {
                building,
                installation_method: method,
                outdoor,
                direct_burial,
                load_classification: load.to_string(),
                run_length_m: Decimal::from(length),
                protective_device_rating: rating,
            },
        )
}

proptest! {
    /// Capacity never decreases as size increases within a family.
    #[test]
    fn prop_capacity_monotonic((id, _) in family_text(), i in 0usize..32, j in 0usize..32) {
        let family = FamilyId::new(id);
        let tables = catalogue().tables();
        let sizes = tables.sizes_of(&family);
        let (a, b) = (i % sizes.len(), j % sizes.len());
        let (lo, hi) = (a.min(b), a.max(b));
        prop_assert!(
            tables.capacity_of(&family, sizes[lo]) <= tables.capacity_of(&family, sizes[hi])
        );
    }

    /// The minimum size clears the rating and no smaller size does.
    #[test]
    fn prop_minimum_size_is_minimal((id, _) in family_text(), rating in 0u32..700) {
        let family = FamilyId::new(id);
        let tables = catalogue().tables();
        match tables.minimum_size_for(&family, rating) {
            Some((size, amps)) => {
                prop_assert!(amps >= rating);
                prop_assert_eq!(tables.capacity_of(&family, size), Some(amps));
                for smaller in tables.sizes_of(&family).into_iter().filter(|s| *s < size) {
                    let cap = tables.capacity_of(&family, smaller).unwrap_or(0);
                    prop_assert!(cap < rating);
                }
            }
            None => {
                for s in tables.sizes_of(&family) {
                    prop_assert!(tables.capacity_of(&family, s).unwrap_or(0) < rating);
                }
            }
        }
    }

    /// Every returned candidate passes all four checks again and is adequate.
    #[test]
    fn prop_selection_sound(req in requirement()) {
        let catalogue = catalogue();
        for candidate in SuitabilityEvaluator::new(catalogue).evaluate(&req) {
            let family = catalogue.family(&candidate.family).unwrap();
            prop_assert!(installation_method_suitable(family, &req));
            prop_assert!(environment_suitable(family, &req));
            prop_assert!(fire_compliant(family, &req));
            prop_assert!(application_suitable(family, &req));
            prop_assert!(run_checks(family, &req).all_pass());
            prop_assert!(candidate.rated_amps >= req.protective_device_rating);
            prop_assert_eq!(
                catalogue.tables().capacity_of(&candidate.family, candidate.size),
                Some(candidate.rated_amps)
            );
        }
    }

    /// Evaluation is a pure function of its input.
    #[test]
    fn prop_evaluate_idempotent(req in requirement()) {
        let evaluator = SuitabilityEvaluator::new(catalogue());
        prop_assert_eq!(evaluator.evaluate(&req), evaluator.evaluate(&req));
    }

    /// Within ±5 A is valid, beyond is invalid.
    #[test]
    fn prop_tolerance_boundary(
        (id, text) in family_text(),
        index in 0usize..32,
        offset in -40i64..=40,
    ) {
        let catalogue = catalogue();
        let family = FamilyId::new(id);
        let sizes = catalogue.tables().sizes_of(&family);
        let size = sizes[index % sizes.len()];
        let authoritative = catalogue.tables().capacity_of(&family, size).unwrap();
        let claimed = Decimal::from(authoritative) + Decimal::from(offset);

        let verdict = ComplianceValidator::new(catalogue).validate_capacity_claim(text, size, claimed);
        prop_assert_eq!(verdict.resolved_family.as_ref(), Some(&family));
        prop_assert_eq!(verdict.authoritative_amps, Some(authoritative));
        let expected = if offset.unsigned_abs() <= u64::from(CLAIM_TOLERANCE_AMPS) {
            Verdict::Valid
        } else {
            Verdict::Invalid
        };
        prop_assert_eq!(verdict.verdict, expected);
    }

    /// Text that resolves to no family is never judged.
    #[test]
    fn prop_unknown_family_unverifiable(
        text in prop_oneof![
            "[a-zA-Z0-9 &-]{0,24}",
            prop::sample::select(NEAR_MISSES).prop_map(str::to_string),
        ],
        tenths in 1u32..4000,
        claimed in 0u32..1000,
    ) {
        prop_assume!(catalogue().tables().resolve_family(&text) == FamilyMatch::Unknown);
        let size = ConductorSize::new(Decimal::new(i64::from(tenths), 1));
        let verdict = ComplianceValidator::new(catalogue())
            .validate_capacity_claim(&text, size, Decimal::from(claimed));
        prop_assert_eq!(verdict.verdict, Verdict::Unverifiable);
        prop_assert_eq!(verdict.authoritative_amps, None);
    }
}
