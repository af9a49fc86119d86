//! Scalar units shared by the tables, the catalogue and incoming claims.
//!
//! Sizes, money and lengths are decimals so that `2.5` compares exactly
//! and cost sums stay exact. Rated capacities and protective-device
//! ratings are whole amperes.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Whole amperes.
pub type Amps = u32;

/// Money in the catalogue's currency (GBP for the built-in data).
pub type Money = Decimal;

/// Length in metres.
pub type Metres = Decimal;

/// Conductor cross-sectional area in mm². Always normalized, so `35` and
/// `35.0` are the same size and serialize identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConductorSize(Decimal);

impl<'de> Deserialize<'de> for ConductorSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self::new)
    }
}

impl ConductorSize {
    pub fn new(mm2: Decimal) -> Self {
        Self(mm2.normalize())
    }

    /// Size from whole mm² (`ConductorSize::mm2(35)`).
    pub fn mm2(mm2: u32) -> Self {
        Self(Decimal::from(mm2))
    }

    pub fn area(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for ConductorSize {
    fn from(mm2: Decimal) -> Self {
        Self::new(mm2)
    }
}

impl std::fmt::Display for ConductorSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}mm²", self.0.normalize())
    }
}

impl FromStr for ConductorSize {
    type Err = String;

    /// Accepts `35`, `2.5`, `35mm²`, `35 mm2`, `35mm^2`, `2.5 sq mm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size_text(s).ok_or_else(|| format!("unrecognised conductor size: {s}"))
    }
}

fn size_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:mm\s*(?:²|2|\^2)?|sq\.?\s*mm|sqmm)?\s*$")
            .expect("size regex must compile")
    })
}

fn amps_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:a|amps?|amperes?)?\s*$")
            .expect("amps regex must compile")
    })
}

/// Parse a free-text conductor size as produced by an untrusted upstream.
pub fn parse_size_text(text: &str) -> Option<ConductorSize> {
    let caps = size_text_re().captures(text)?;
    Decimal::from_str(caps.get(1)?.as_str())
        .ok()
        .map(ConductorSize::new)
}

/// Parse a free-text current value (`210`, `210A`, `24.5 amps`).
pub fn parse_amps_text(text: &str) -> Option<Decimal> {
    let caps = amps_text_re().captures(text)?;
    Decimal::from_str(caps.get(1)?.as_str())
        .ok()
        .map(|d| d.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn size_equality_ignores_trailing_zeros() {
        assert_eq!(ConductorSize::new(dec("2.50")), ConductorSize::new(dec("2.5")));
        assert_eq!(ConductorSize::new(dec("35.0")), ConductorSize::mm2(35));
    }

    #[test]
    fn deserialized_sizes_are_normalized() {
        let size: ConductorSize = serde_json::from_str("\"35.00\"").unwrap();
        assert_eq!(serde_json::to_string(&size).unwrap(), "\"35\"");
    }

    #[test]
    fn size_ordering_is_numeric() {
        assert!(ConductorSize::new(dec("2.5")) < ConductorSize::mm2(4));
        assert!(ConductorSize::mm2(10) < ConductorSize::mm2(16));
    }

    #[test]
    fn size_text_variants() {
        for text in ["35", "35mm²", "35 mm2", "35mm^2", " 35 MM ", "35 sq mm"] {
            assert_eq!(
                parse_size_text(text),
                Some(ConductorSize::mm2(35)),
                "failed on {text:?}"
            );
        }
        assert_eq!(
            "2.5mm²".parse::<ConductorSize>().unwrap(),
            ConductorSize::new(dec("2.5"))
        );
    }

    #[test]
    fn size_text_rejects_garbage() {
        for text in ["", "abc", "-4", "4mm² twin", "4..5"] {
            assert_eq!(parse_size_text(text), None, "accepted {text:?}");
        }
    }

    #[test]
    fn amps_text_variants() {
        assert_eq!(parse_amps_text("210A"), Some(dec("210")));
        assert_eq!(parse_amps_text("210 amps"), Some(dec("210")));
        assert_eq!(parse_amps_text("24.5"), Some(dec("24.5")));
        assert_eq!(parse_amps_text("24 Amperes"), Some(dec("24")));
        assert_eq!(parse_amps_text("about 24A"), None);
    }

    #[test]
    fn size_display() {
        assert_eq!(ConductorSize::new(dec("2.50")).to_string(), "2.5mm²");
        assert_eq!(ConductorSize::mm2(70).to_string(), "70mm²");
    }
}
