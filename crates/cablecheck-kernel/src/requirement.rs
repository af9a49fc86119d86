//! Circuit requirements: what is being wired and where.

use crate::family::{BuildingClass, InstallationMethod};
use crate::units::{Amps, Metres};
use serde::{Deserialize, Serialize};

/// A fully populated description of one circuit.
///
/// Callers build this per request; nothing in it is looked up or defaulted
/// by the engine beyond the two environment flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitRequirement {
    pub building: BuildingClass,
    pub installation_method: InstallationMethod,
    #[serde(default)]
    pub outdoor: bool,
    #[serde(default)]
    pub direct_burial: bool,
    /// Free-text load classification, e.g. "ring final circuit".
    pub load_classification: String,
    pub run_length_m: Metres,
    pub protective_device_rating: Amps,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn deserializes_camel_case_with_default_flags() {
        let requirement: CircuitRequirement = serde_json::from_str(
            r#"{
                "building": "high_rise_residential",
                "installationMethod": "clipped_direct",
                "loadClassification": "Fire alarm",
                "runLengthM": "22.5",
                "protectiveDeviceRating": 6
            }"#,
        )
        .unwrap();
        assert_eq!(requirement.building, BuildingClass::HighRiseResidential);
        assert!(!requirement.outdoor);
        assert!(!requirement.direct_burial);
        assert_eq!(requirement.run_length_m, Decimal::new(225, 1));
    }

    #[test]
    fn numeric_run_length_is_accepted() {
        let requirement: CircuitRequirement = serde_json::from_str(
            r#"{
                "building": "domestic",
                "installationMethod": "in_conduit",
                "outdoor": true,
                "loadClassification": "lighting",
                "runLengthM": 30,
                "protectiveDeviceRating": 6
            }"#,
        )
        .unwrap();
        assert!(requirement.outdoor);
        assert_eq!(requirement.run_length_m, Decimal::from(30));
    }
}
