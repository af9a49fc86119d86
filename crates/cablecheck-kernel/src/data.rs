//! Built-in reference data.
//!
//! Capacities are whole amperes under each table's reference method.
//! Prices are GBP, ex VAT. Sizes below 4 mm² use the family's base
//! material rate. Decimal literals are kept as text and parsed
//! when the catalogue is built, so a malformed literal is a load error
//! rather than a silent zero.

use crate::alias::AliasRule;
use crate::catalogue::CatalogueDocument;
use crate::error::CatalogueError;
use crate::family::{
    CableFamily, FireClass, InstallationMethod as M, PricingProfile, SizePrice,
};
use crate::ids::{FamilyId, TableId};
use crate::table::{CapacityRow, CapacityTable};
use crate::units::{Amps, ConductorSize};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const BUILTIN_VERSION: &str = "builtin-2025.1";

type Keywords = &'static [&'static str];

struct BuiltinFamily {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    methods: &'static [M],
    fire_class: FireClass,
    uv_resistant: bool,
    direct_burial: bool,
    application_tags: Keywords,
    material_per_m: &'static str,
    /// (size, material per metre) where it differs from `material_per_m`.
    size_rates: &'static [(&'static str, &'static str)],
    labour_per_m: &'static str,
    per_termination: &'static str,
    base_run_length_m: u32,
    voltage_rating_v: u32,
    conductor_temp_c: u32,
    aliases: &'static [(Keywords, Keywords)],
    table_id: &'static str,
    table_method: M,
    rows: &'static [(&'static str, Amps)],
}

const INDOOR_FIXED: &[M] = &[M::InsulatedWall, M::InConduit, M::InTrunking, M::ClippedDirect];
const INDOOR_AND_TRAY: &[M] = &[
    M::InsulatedWall,
    M::InConduit,
    M::InTrunking,
    M::ClippedDirect,
    M::FreeAir,
    M::CableTray,
];

const FAMILIES: &[BuiltinFamily] = &[
    BuiltinFamily {
        id: "pvc-twin-earth",
        name: "PVC Twin & Earth (6242Y)",
        description: "Flat twin and CPC, PVC insulated and sheathed, 70°C",
        methods: INDOOR_FIXED,
        fire_class: FireClass::Standard,
        uv_resistant: false,
        direct_burial: false,
        application_tags: &[
            "lighting",
            "ring final circuit",
            "radial circuit",
            "socket outlets",
            "immersion heater",
            "cooker",
            "shower",
        ],
        material_per_m: "1.65",
        size_rates: &[
            ("4", "2.45"),
            ("6", "3.85"),
            ("10", "6.45"),
            ("16", "9.80"),
        ],
        labour_per_m: "2.50",
        per_termination: "6.50",
        base_run_length_m: 50,
        voltage_rating_v: 500,
        conductor_temp_c: 70,
        aliases: &[
            (&["twin", "pvc"], &[]),
            (&["t&e", "pvc"], &[]),
            (&["6242y"], &[]),
        ],
        table_id: "Table 4D5",
        table_method: M::InConduit,
        rows: &[
            ("1", 15),
            ("1.5", 19),
            ("2.5", 24),
            ("4", 32),
            ("6", 41),
            ("10", 57),
            ("16", 76),
        ],
    },
    BuiltinFamily {
        id: "xlpe-twin-earth",
        name: "XLPE Twin & Earth LSZH (6242B)",
        description: "Flat twin and CPC, cross-linked polyethylene insulation, LSZH sheath, 90°C",
        methods: INDOOR_FIXED,
        fire_class: FireClass::LowSmokeZeroHalogen,
        uv_resistant: false,
        direct_burial: false,
        application_tags: &[
            "lighting",
            "ring final circuit",
            "radial circuit",
            "socket outlets",
            "small power",
            "cooker",
            "shower",
        ],
        material_per_m: "2.10",
        size_rates: &[
            ("4", "3.05"),
            ("6", "4.60"),
            ("10", "7.55"),
            ("16", "11.40"),
        ],
        labour_per_m: "2.50",
        per_termination: "6.50",
        base_run_length_m: 60,
        voltage_rating_v: 500,
        conductor_temp_c: 90,
        aliases: &[
            (&["twin", "xlpe"], &[]),
            (&["t&e", "xlpe"], &[]),
            (&["6242b"], &[]),
        ],
        table_id: "Table 4E2A",
        table_method: M::InConduit,
        rows: &[
            ("1", 19),
            ("1.5", 24),
            ("2.5", 33),
            ("4", 43),
            ("6", 56),
            ("10", 78),
            ("16", 104),
        ],
    },
    BuiltinFamily {
        id: "swa-xlpe",
        name: "SWA XLPE Armoured (6944X)",
        description: "Steel wire armoured, XLPE insulated, PVC sheathed, 0.6/1kV",
        methods: &[
            M::ClippedDirect,
            M::InGroundDuct,
            M::BuriedDirect,
            M::FreeAir,
            M::CableTray,
        ],
        fire_class: FireClass::Standard,
        uv_resistant: true,
        direct_burial: true,
        application_tags: &[
            "sub-main",
            "submain",
            "outdoor supply",
            "outbuilding",
            "garden",
            "ev charger",
            "distribution",
            "industrial power",
            "motor",
        ],
        material_per_m: "6.85",
        size_rates: &[
            ("4", "8.40"),
            ("6", "10.15"),
            ("10", "13.60"),
            ("16", "17.90"),
            ("25", "25.40"),
            ("35", "33.20"),
            ("50", "44.60"),
            ("70", "61.80"),
            ("95", "82.50"),
            ("120", "103.20"),
            ("150", "126.40"),
            ("185", "155.80"),
            ("240", "201.50"),
            ("300", "249.00"),
        ],
        labour_per_m: "6.00",
        per_termination: "35.00",
        base_run_length_m: 100,
        voltage_rating_v: 1000,
        conductor_temp_c: 90,
        aliases: &[
            (&["swa"], &[]),
            (&["steel wire armour"], &[]),
            (&["armoured"], &["unarmoured", "non-armoured"]),
        ],
        table_id: "Table 4D4A",
        table_method: M::ClippedDirect,
        rows: &[
            ("1.5", 19),
            ("2.5", 26),
            ("4", 35),
            ("6", 45),
            ("10", 62),
            ("16", 83),
            ("25", 110),
            ("35", 137),
            ("50", 165),
            ("70", 201),
            ("95", 245),
            ("120", 284),
            ("150", 324),
            ("185", 371),
            ("240", 436),
            ("300", 500),
        ],
    },
    BuiltinFamily {
        id: "pvc-single",
        name: "PVC Single Core (6491X)",
        description: "Single core PVC insulated, unsheathed, for enclosed wiring systems",
        methods: INDOOR_AND_TRAY,
        fire_class: FireClass::Standard,
        uv_resistant: false,
        direct_burial: false,
        application_tags: &[
            "conduit wiring",
            "trunking wiring",
            "meter tails",
            "distribution board tails",
            "industrial wiring",
            "lighting",
            "radial circuit",
        ],
        material_per_m: "0.95",
        size_rates: &[
            ("4", "1.45"),
            ("6", "2.10"),
            ("10", "3.40"),
            ("16", "5.20"),
            ("25", "7.90"),
            ("35", "10.80"),
            ("50", "14.60"),
            ("70", "20.50"),
            ("95", "27.80"),
            ("120", "35.20"),
            ("150", "43.50"),
            ("185", "53.90"),
            ("240", "70.10"),
            ("300", "87.40"),
        ],
        labour_per_m: "3.20",
        per_termination: "5.00",
        base_run_length_m: 75,
        voltage_rating_v: 750,
        conductor_temp_c: 70,
        aliases: &[(&["6491x"], &[]), (&["single", "pvc"], &[])],
        table_id: "Table 4D1A",
        table_method: M::InConduit,
        rows: &[
            ("1", 13),
            ("1.5", 16),
            ("2.5", 23),
            ("4", 30),
            ("6", 38),
            ("10", 52),
            ("16", 69),
            ("25", 90),
            ("35", 111),
            ("50", 133),
            ("70", 168),
            ("95", 201),
            ("120", 232),
            ("150", 258),
            ("185", 294),
            ("240", 344),
            ("300", 394),
        ],
    },
    BuiltinFamily {
        id: "lszh-multicore",
        name: "LSZH Multicore",
        description: "Low smoke zero halogen sheathed multicore, 70°C",
        methods: INDOOR_AND_TRAY,
        fire_class: FireClass::LowSmokeZeroHalogen,
        uv_resistant: false,
        direct_burial: false,
        application_tags: &[
            "commercial lighting",
            "lighting",
            "small power",
            "socket outlets",
            "radial circuit",
            "public building",
            "escape route",
            "data centre",
        ],
        material_per_m: "2.95",
        size_rates: &[
            ("4", "4.10"),
            ("6", "5.60"),
            ("10", "8.70"),
            ("16", "12.90"),
            ("25", "19.40"),
            ("35", "26.20"),
            ("50", "35.80"),
            ("70", "49.60"),
            ("95", "66.90"),
            ("120", "84.10"),
            ("150", "103.50"),
            ("185", "127.80"),
            ("240", "165.20"),
            ("300", "205.40"),
        ],
        labour_per_m: "3.00",
        per_termination: "8.00",
        base_run_length_m: 60,
        voltage_rating_v: 1000,
        conductor_temp_c: 70,
        aliases: &[
            (&["lszh"], &["twin", "t&e"]),
            (&["lsoh"], &["twin", "t&e"]),
            (&["low smoke"], &["twin", "t&e"]),
        ],
        table_id: "Table 4D2A",
        table_method: M::ClippedDirect,
        rows: &[
            ("1.5", 20),
            ("2.5", 27),
            ("4", 36),
            ("6", 46),
            ("10", 63),
            ("16", 85),
            ("25", 112),
            ("35", 138),
            ("50", 168),
            ("70", 213),
            ("95", 258),
            ("120", 299),
            ("150", 344),
            ("185", 392),
            ("240", 461),
            ("300", 530),
        ],
    },
    BuiltinFamily {
        id: "fp200",
        name: "Fire Resistant (FP200 type)",
        description: "Fire resistant screened cable for life-safety circuits",
        methods: INDOOR_AND_TRAY,
        fire_class: FireClass::FireResistant,
        uv_resistant: false,
        direct_burial: false,
        application_tags: &[
            "fire alarm",
            "emergency lighting",
            "life safety",
            "smoke extract",
            "sprinkler pump",
            "evacuation",
        ],
        material_per_m: "3.45",
        size_rates: &[
            ("4", "4.95"),
            ("6", "6.80"),
            ("10", "10.60"),
            ("16", "15.90"),
            ("25", "23.80"),
            ("35", "32.10"),
            ("50", "43.70"),
            ("70", "60.40"),
            ("95", "81.20"),
            ("120", "102.60"),
        ],
        labour_per_m: "3.50",
        per_termination: "12.00",
        base_run_length_m: 50,
        voltage_rating_v: 500,
        conductor_temp_c: 90,
        aliases: &[
            (&["fp200"], &[]),
            (&["fire resistant"], &[]),
            (&["fire-resistant"], &[]),
            (&["fire rated"], &[]),
        ],
        table_id: "Table 4E3A",
        table_method: M::ClippedDirect,
        rows: &[
            ("1.5", 24),
            ("2.5", 33),
            ("4", 45),
            ("6", 58),
            ("10", 80),
            ("16", 107),
            ("25", 135),
            ("35", 169),
            ("50", 207),
            ("70", 268),
            ("95", 328),
            ("120", 382),
        ],
    },
    BuiltinFamily {
        id: "micc",
        name: "Mineral Insulated Copper Clad (MICC)",
        description: "Mineral insulated, copper sheathed, LSZH oversheath",
        methods: &[M::ClippedDirect, M::FreeAir, M::CableTray],
        fire_class: FireClass::FireResistant,
        uv_resistant: true,
        direct_burial: true,
        application_tags: &[
            "fire alarm",
            "emergency lighting",
            "life safety",
            "high temperature",
            "boiler house",
            "heritage",
        ],
        material_per_m: "9.50",
        size_rates: &[
            ("4", "12.80"),
            ("6", "16.40"),
            ("10", "23.90"),
            ("16", "34.60"),
            ("25", "51.20"),
        ],
        labour_per_m: "7.50",
        per_termination: "28.00",
        base_run_length_m: 80,
        voltage_rating_v: 750,
        conductor_temp_c: 70,
        aliases: &[(&["micc"], &[]), (&["mineral insulated"], &[]), (&["pyro"], &[])],
        table_id: "Table 4G1A",
        table_method: M::ClippedDirect,
        rows: &[
            ("1", 18),
            ("1.5", 23),
            ("2.5", 31),
            ("4", 40),
            ("6", 51),
            ("10", 69),
            ("16", 91),
            ("25", 119),
        ],
    },
];

fn decimal(family: &str, literal: &str) -> Result<Decimal, CatalogueError> {
    Decimal::from_str(literal).map_err(|_| CatalogueError::InvalidLiteral {
        family: family.to_string(),
        literal: literal.to_string(),
    })
}

fn keywords(words: Keywords) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl BuiltinFamily {
    fn family(&self) -> Result<CableFamily, CatalogueError> {
        Ok(CableFamily {
            id: FamilyId::new(self.id),
            name: self.name.to_string(),
            description: self.description.to_string(),
            installation_methods: self.methods.to_vec(),
            fire_class: self.fire_class,
            uv_resistant: self.uv_resistant,
            direct_burial: self.direct_burial,
            application_tags: keywords(self.application_tags),
            pricing: PricingProfile {
                material_per_m: decimal(self.id, self.material_per_m)?,
                labour_per_m: decimal(self.id, self.labour_per_m)?,
                per_termination: decimal(self.id, self.per_termination)?,
                by_size: self
                    .size_rates
                    .iter()
                    .map(|(size, rate)| {
                        Ok(SizePrice {
                            size: ConductorSize::new(decimal(self.id, size)?),
                            material_per_m: decimal(self.id, rate)?,
                        })
                    })
                    .collect::<Result<Vec<_>, CatalogueError>>()?,
            },
            base_run_length_m: Decimal::from(self.base_run_length_m),
            voltage_rating_v: self.voltage_rating_v,
            conductor_temp_c: self.conductor_temp_c,
            aliases: self
                .aliases
                .iter()
                .map(|(all, none)| AliasRule {
                    all: keywords(all),
                    none: keywords(none),
                })
                .collect(),
        })
    }

    fn table(&self) -> Result<CapacityTable, CatalogueError> {
        let rows = self
            .rows
            .iter()
            .map(|(size, amps)| {
                Ok(CapacityRow {
                    size: ConductorSize::new(decimal(self.id, size)?),
                    amps: *amps,
                })
            })
            .collect::<Result<Vec<_>, CatalogueError>>()?;
        Ok(CapacityTable {
            id: TableId::new(self.table_id),
            family: FamilyId::new(self.id),
            method: self.table_method,
            rows,
        })
    }
}

/// The built-in catalogue as an unvalidated document.
pub fn builtin_document() -> Result<CatalogueDocument, CatalogueError> {
    let families = FAMILIES
        .iter()
        .map(BuiltinFamily::family)
        .collect::<Result<Vec<_>, _>>()?;
    let tables = FAMILIES
        .iter()
        .map(BuiltinFamily::table)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CatalogueDocument {
        version: BUILTIN_VERSION.to_string(),
        families,
        tables,
    })
}
