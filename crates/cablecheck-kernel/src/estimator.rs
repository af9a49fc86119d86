//! Cost & Run-Length Estimator.
//!
//! Installed cost:
//!
//! ```text
//! (material/m for the size + labour/m) × length + per_termination × TERMINATIONS_PER_RUN
//! ```
//!
//! `TERMINATIONS_PER_RUN` is fixed at 2, one termination at each circuit
//! end. It is a simplification: runs with joints, tee-offs or extra
//! glands cost more and are not modelled.
//!
//! Costs and lengths saturate at `Decimal::MAX` instead of overflowing.
//!
//! Maximum practical length is the family's base length scaled by a size
//! multiplier. It is a heuristic ceiling for guidance only. It is NOT a
//! voltage-drop calculation and must not be presented as a certified
//! maximum.

use crate::catalogue::Catalogue;
use crate::family::PricingProfile;
use crate::ids::FamilyId;
use crate::units::{ConductorSize, Metres, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Terminations charged per run: one at each end.
pub const TERMINATIONS_PER_RUN: u32 = 2;

/// Sizes at or above this (mm²) get `LARGE_SIZE_LENGTH_MULTIPLIER`.
pub const LARGE_SIZE_THRESHOLD_MM2: u32 = 10;
/// Sizes at or above this (mm²) get `MEDIUM_SIZE_LENGTH_MULTIPLIER`.
pub const MEDIUM_SIZE_THRESHOLD_MM2: u32 = 4;

pub const LARGE_SIZE_LENGTH_MULTIPLIER: Decimal = Decimal::TWO;
pub const MEDIUM_SIZE_LENGTH_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
pub const SMALL_SIZE_LENGTH_MULTIPLIER: Decimal = Decimal::ONE;

// Operands are non-negative, so overflow can only be upward.
fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::MAX)
}

/// Installed cost of `length` metres of `size` cable priced by `pricing`,
/// rounded to the penny. Negative lengths count as zero.
pub fn installed_cost_of(pricing: &PricingProfile, size: ConductorSize, length: Metres) -> Money {
    let length = length.max(Decimal::ZERO);
    let per_metre = saturating_add(pricing.material_rate(size), pricing.labour_per_m);
    let terminations = saturating_mul(
        pricing.per_termination,
        Decimal::from(TERMINATIONS_PER_RUN),
    );
    saturating_add(saturating_mul(per_metre, length), terminations)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

pub fn length_multiplier(size: ConductorSize) -> Decimal {
    let area = size.area();
    if area >= Decimal::from(LARGE_SIZE_THRESHOLD_MM2) {
        LARGE_SIZE_LENGTH_MULTIPLIER
    } else if area >= Decimal::from(MEDIUM_SIZE_THRESHOLD_MM2) {
        MEDIUM_SIZE_LENGTH_MULTIPLIER
    } else {
        SMALL_SIZE_LENGTH_MULTIPLIER
    }
}

pub fn practical_length_of(base_run_length: Metres, size: ConductorSize) -> Metres {
    saturating_mul(base_run_length, length_multiplier(size)).normalize()
}

/// Another family offering the same size for less.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub family: FamilyId,
    pub name: String,
    pub size: ConductorSize,
    pub installed_cost: Money,
    pub savings: Money,
}

/// Catalogue-aware front end over the pure cost functions.
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> CostEstimator<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    /// `None` when the family is unknown or has no such size.
    pub fn installed_cost(
        &self,
        family: &FamilyId,
        size: ConductorSize,
        length: Metres,
    ) -> Option<Money> {
        self.catalogue.tables().capacity_of(family, size)?;
        let family = self.catalogue.family(family)?;
        Some(installed_cost_of(&family.pricing, size, length))
    }

    pub fn max_practical_length(&self, family: &FamilyId, size: ConductorSize) -> Option<Metres> {
        self.catalogue.tables().capacity_of(family, size)?;
        let family = self.catalogue.family(family)?;
        Some(practical_length_of(family.base_run_length_m, size))
    }

    /// Families offering `size` whose installed cost over `length` is
    /// strictly below `family`'s and no more than `budget`, largest
    /// saving first.
    pub fn cheaper_alternatives(
        &self,
        family: &FamilyId,
        size: ConductorSize,
        length: Metres,
        budget: Money,
    ) -> Vec<Alternative> {
        let Some(baseline) = self.installed_cost(family, size, length) else {
            return Vec::new();
        };

        let mut alternatives: Vec<Alternative> = self
            .catalogue
            .families()
            .iter()
            .filter(|other| &other.id != family)
            .filter_map(|other| {
                let cost = self.installed_cost(&other.id, size, length)?;
                (cost < baseline && cost <= budget).then(|| Alternative {
                    family: other.id.clone(),
                    name: other.name.clone(),
                    size,
                    installed_cost: cost,
                    savings: baseline - cost,
                })
            })
            .collect();

        alternatives.sort_by(|a, b| {
            b.savings
                .cmp(&a.savings)
                .then_with(|| a.family.cmp(&b.family))
        });
        alternatives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::SizePrice;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn size(s: &str) -> ConductorSize {
        ConductorSize::new(dec(s))
    }

    fn pricing() -> PricingProfile {
        PricingProfile {
            material_per_m: dec("1.65"),
            labour_per_m: dec("2.50"),
            per_termination: dec("6.50"),
            by_size: vec![SizePrice {
                size: size("10"),
                material_per_m: dec("6.45"),
            }],
        }
    }

    fn cost(length: &str) -> Money {
        installed_cost_of(&pricing(), size("2.5"), dec(length))
    }

    #[test]
    fn installed_cost_charges_two_terminations() {
        // 4.15 × 20 + 6.50 × 2
        assert_eq!(cost("20"), dec("96"));
        assert_eq!(cost("0"), dec("13"));
    }

    #[test]
    fn negative_length_is_zero_length() {
        assert_eq!(cost("-15"), cost("0"));
    }

    #[test]
    fn installed_cost_rounds_to_the_penny() {
        // 4.15 × 22.5 = 93.375, plus 13
        assert_eq!(cost("22.5"), dec("106.38"));
    }

    #[test]
    fn installed_cost_uses_the_size_rate() {
        // (6.45 + 2.50) × 20 + 13
        assert_eq!(
            installed_cost_of(&pricing(), size("10"), dec("20")),
            dec("192")
        );
        assert!(installed_cost_of(&pricing(), size("10"), dec("20")) > cost("20"));
    }

    #[test]
    fn extreme_lengths_saturate() {
        assert_eq!(
            installed_cost_of(&pricing(), size("2.5"), Decimal::MAX),
            Decimal::MAX
        );
        assert_eq!(practical_length_of(Decimal::MAX, size("35")), Decimal::MAX);
    }

    #[test]
    fn multiplier_thresholds() {
        assert_eq!(length_multiplier(size("2.5")), Decimal::ONE);
        assert_eq!(length_multiplier(size("4")), dec("1.5"));
        assert_eq!(length_multiplier(size("6")), dec("1.5"));
        assert_eq!(length_multiplier(size("10")), Decimal::TWO);
        assert_eq!(length_multiplier(size("300")), Decimal::TWO);
    }

    #[test]
    fn practical_length_scales_base() {
        assert_eq!(practical_length_of(dec("50"), size("1.5")), dec("50"));
        assert_eq!(practical_length_of(dec("50"), size("4")), dec("75"));
        assert_eq!(practical_length_of(dec("100"), size("35")), dec("200"));
    }

    #[test]
    fn catalogue_lookups_require_a_table_entry() {
        let catalogue = Catalogue::builtin().unwrap();
        let estimator = CostEstimator::new(&catalogue);
        let swa = FamilyId::new("swa-xlpe");
        assert_eq!(
            estimator.max_practical_length(&swa, size("35")),
            Some(dec("200"))
        );
        assert_eq!(estimator.max_practical_length(&swa, size("3")), None);
        assert_eq!(
            estimator.installed_cost(&FamilyId::new("nope"), size("35"), dec("10")),
            None
        );
    }

    #[test]
    fn alternatives_are_cheaper_within_budget_and_sorted() {
        let catalogue = Catalogue::builtin().unwrap();
        let estimator = CostEstimator::new(&catalogue);
        let micc = FamilyId::new("micc");
        let alternatives =
            estimator.cheaper_alternatives(&micc, size("2.5"), dec("20"), dec("10000"));
        let baseline = estimator
            .installed_cost(&micc, size("2.5"), dec("20"))
            .unwrap();

        assert!(!alternatives.is_empty());
        assert!(alternatives.iter().all(|a| a.family != micc));
        assert!(alternatives.iter().all(|a| a.installed_cost < baseline));
        assert!(
            alternatives
                .windows(2)
                .all(|pair| pair[0].savings >= pair[1].savings)
        );
    }

    #[test]
    fn alternatives_respect_budget() {
        let catalogue = Catalogue::builtin().unwrap();
        let estimator = CostEstimator::new(&catalogue);
        let alternatives = estimator.cheaper_alternatives(
            &FamilyId::new("micc"),
            size("2.5"),
            dec("20"),
            Decimal::ZERO,
        );
        assert!(alternatives.is_empty());
    }
}
