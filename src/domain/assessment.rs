//! Risk assessment result types.
//!
//! A single model run produces a `RiskResult`; the consolidator merges one
//! ASCVD and one PREVENT result into a `ConsolidatedRisk`; an `Assessment`
//! is the immutable record a caller persists.

use serde::{Deserialize, Serialize};

use super::patient::RiskInput;

/// Which risk model produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Model {
    /// Pooled-cohort-style equation
    Ascvd,
    /// PREVENT-style additive equation
    Prevent,
}

impl Model {
    /// Model ceiling for `risk_percent`.
    #[must_use]
    pub fn max_percent(self) -> f64 {
        match self {
            Self::Ascvd => 100.0,
            Self::Prevent => 50.0,
        }
    }

    /// Stable label used in storage and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascvd => "ascvd",
            Self::Prevent => "prevent",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-model categorical classification of a risk percentage.
///
/// `Normal`/`Elevated` are the pediatric screening labels; the consolidator
/// treats them as equivalent to the lowest/highest adult severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Low,
    Borderline,
    #[serde(rename = "Borderline Intermediate")]
    BorderlineIntermediate,
    Intermediate,
    High,
    Normal,
    Elevated,
}

impl Classification {
    /// Ordinal severity used by the consolidator (1 lowest, 4 highest).
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Low | Self::Normal => 1,
            Self::Borderline | Self::BorderlineIntermediate => 2,
            Self::Intermediate => 3,
            Self::High | Self::Elevated => 4,
        }
    }

    /// Stable label used in storage and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Borderline => "Borderline",
            Self::BorderlineIntermediate => "Borderline Intermediate",
            Self::Intermediate => "Intermediate",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
        }
    }

    /// Parse a stored label. Returns `None` for labels outside the known
    /// set; callers should flag those rather than silently accept them.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Borderline" => Some(Self::Borderline),
            "Borderline Intermediate" => Some(Self::BorderlineIntermediate),
            "Intermediate" => Some(Self::Intermediate),
            "High" => Some(Self::High),
            "Normal" => Some(Self::Normal),
            "Elevated" => Some(Self::Elevated),
            _ => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consolidated patient-facing risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk of cardiovascular disease
    Low,
    /// Moderate risk, monitoring recommended
    Moderate,
    /// High risk, intervention recommended
    High,
}

impl RiskLevel {
    /// Stable label used in storage and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Parse a stored label. Returns `None` for unknown labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Moderate" => Some(Self::Moderate),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a single model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    /// Which model produced this result
    pub model: Model,

    /// Risk percentage, one decimal place, clamped to [0, model ceiling]
    pub risk_percent: f64,

    /// Model- and band-specific classification
    pub classification: Classification,

    /// Human label for the formula that ran
    pub formula_name: String,

    /// Set only for pediatric results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

/// Merge of one ASCVD and one PREVENT result for the same input.
///
/// Created on demand from two already-computed results; never mutated and
/// never persisted by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedRisk {
    /// Final patient-facing risk level
    pub risk_level: RiskLevel,

    /// The ASCVD-style model output
    pub ascvd: RiskResult,

    /// The PREVENT-style model output
    pub prevent: RiskResult,

    /// Maximum of the two model percentages
    pub max_risk: f64,

    /// Fixed description of how the two models were merged
    pub methodology: String,
}

/// Immutable assessment record: the input snapshot plus both model outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// The patient snapshot that was scored
    pub input: RiskInput,

    /// The consolidated result, including both per-model results
    pub result: ConsolidatedRisk,

    /// Timestamp of the assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment record with a fresh identifier.
    #[must_use]
    pub fn new(input: RiskInput, result: ConsolidatedRisk) -> Self {
        Self {
            id: uuid_v4(),
            input,
            result,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using a CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so identifiers are unpredictable
/// on all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_ordinals() {
        assert_eq!(Classification::Low.ordinal(), 1);
        assert_eq!(Classification::Normal.ordinal(), 1);
        assert_eq!(Classification::Borderline.ordinal(), 2);
        assert_eq!(Classification::BorderlineIntermediate.ordinal(), 2);
        assert_eq!(Classification::Intermediate.ordinal(), 3);
        assert_eq!(Classification::High.ordinal(), 4);
        assert_eq!(Classification::Elevated.ordinal(), 4);
    }

    #[test]
    fn test_classification_label_roundtrip() {
        for c in [
            Classification::Low,
            Classification::Borderline,
            Classification::BorderlineIntermediate,
            Classification::Intermediate,
            Classification::High,
            Classification::Normal,
            Classification::Elevated,
        ] {
            assert_eq!(Classification::from_label(c.as_str()), Some(c));
        }
        assert_eq!(Classification::from_label("Critical"), None);
    }

    #[test]
    fn test_risk_level_labels() {
        assert_eq!(RiskLevel::from_label("Moderate"), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::from_label("moderate"), None);
        assert_eq!(RiskLevel::High.as_str(), "High");
    }

    #[test]
    fn test_model_ceilings() {
        assert!((Model::Ascvd.max_percent() - 100.0).abs() < f64::EPSILON);
        assert!((Model::Prevent.max_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
