//! Cable family records and the closed symbol sets they are described by.
//!
//! Installation methods, fire-performance classes and building
//! classifications are enumerations rather than free strings, so a typo
//! in a requirement cannot silently fail to match a catalogue entry.

use crate::alias::AliasRule;
use crate::ids::FamilyId;
use crate::units::{ConductorSize, Metres, Money};
use serde::{Deserialize, Serialize};

/// Physical manner in which a cable is routed or fixed.
///
/// Each variant corresponds to a reference installation method code
/// (`reference_code`), which is what capacity tables are declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationMethod {
    /// Enclosed in conduit in a thermally insulating wall.
    InsulatedWall,
    /// Enclosed in conduit on or in a masonry wall.
    InConduit,
    /// Enclosed in trunking on a wall.
    InTrunking,
    /// Clipped direct to a surface.
    ClippedDirect,
    /// In ducts in the ground.
    InGroundDuct,
    /// Buried direct in the ground.
    BuriedDirect,
    /// In free air.
    FreeAir,
    /// On perforated or ventilated cable tray.
    CableTray,
}

impl InstallationMethod {
    pub const ALL: [InstallationMethod; 8] = [
        Self::InsulatedWall,
        Self::InConduit,
        Self::InTrunking,
        Self::ClippedDirect,
        Self::InGroundDuct,
        Self::BuriedDirect,
        Self::FreeAir,
        Self::CableTray,
    ];

    pub fn reference_code(self) -> &'static str {
        match self {
            Self::InsulatedWall => "A1",
            Self::InConduit => "B1",
            Self::InTrunking => "B2",
            Self::ClippedDirect => "C",
            Self::InGroundDuct => "D1",
            Self::BuriedDirect => "D2",
            Self::FreeAir => "E",
            Self::CableTray => "F",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InsulatedWall => "insulated_wall",
            Self::InConduit => "in_conduit",
            Self::InTrunking => "in_trunking",
            Self::ClippedDirect => "clipped_direct",
            Self::InGroundDuct => "in_ground_duct",
            Self::BuriedDirect => "buried_direct",
            Self::FreeAir => "free_air",
            Self::CableTray => "cable_tray",
        }
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.reference_code())
    }
}

impl std::str::FromStr for InstallationMethod {
    type Err = String;

    /// Accepts the snake_case name, a spaced/hyphenated variant of it, or
    /// the reference method code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == key || m.reference_code().eq_ignore_ascii_case(&key))
            .ok_or_else(|| format!("unknown installation method: {s}"))
    }
}

/// Behaviour under fire conditions. Ordered: `Standard < LowSmokeZeroHalogen < FireResistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireClass {
    Standard,
    LowSmokeZeroHalogen,
    FireResistant,
}

/// Classification of the building a circuit is installed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingClass {
    Domestic,
    Commercial,
    Industrial,
    HighRiseResidential,
}

impl BuildingClass {
    /// Minimum fire-performance class a cable must have in this building.
    pub fn minimum_fire_class(self) -> FireClass {
        match self {
            Self::Domestic => FireClass::Standard,
            Self::Commercial | Self::Industrial | Self::HighRiseResidential => {
                FireClass::LowSmokeZeroHalogen
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
            Self::HighRiseResidential => "high_rise_residential",
        }
    }
}

impl std::fmt::Display for BuildingClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildingClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "domestic" => Ok(Self::Domestic),
            "commercial" => Ok(Self::Commercial),
            "industrial" => Ok(Self::Industrial),
            "high_rise_residential" | "high_rise" => Ok(Self::HighRiseResidential),
            _ => Err(format!("unknown building class: {s}")),
        }
    }
}

/// Material cost per metre for one conductor size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizePrice {
    pub size: ConductorSize,
    pub material_per_m: Money,
}

/// Installed-cost inputs for a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingProfile {
    /// Cable material cost per metre for sizes without a `by_size` row.
    pub material_per_m: Money,
    /// Installation labour cost per metre.
    pub labour_per_m: Money,
    /// Fixed cost of terminating one end.
    pub per_termination: Money,
    /// Per-size material rates, overriding `material_per_m`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_size: Vec<SizePrice>,
}

impl PricingProfile {
    pub fn material_rate(&self, size: ConductorSize) -> Money {
        self.by_size
            .iter()
            .find(|row| row.size == size)
            .map_or(self.material_per_m, |row| row.material_per_m)
    }
}

/// A named conductor/insulation construction and everything the
/// evaluator needs to know about it apart from its capacity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableFamily {
    pub id: FamilyId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub installation_methods: Vec<InstallationMethod>,
    pub fire_class: FireClass,
    pub uv_resistant: bool,
    pub direct_burial: bool,
    #[serde(default)]
    pub application_tags: Vec<String>,
    pub pricing: PricingProfile,
    /// Practical run-length ceiling before the size multiplier is applied.
    pub base_run_length_m: Metres,
    pub voltage_rating_v: u32,
    pub conductor_temp_c: u32,
    /// Keyword rules used to recognise this family in free text.
    pub aliases: Vec<AliasRule>,
}

impl CableFamily {
    pub fn supports(&self, method: InstallationMethod) -> bool {
        self.installation_methods.contains(&method)
    }
}
