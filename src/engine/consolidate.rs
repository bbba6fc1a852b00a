//! Consolidation of the two model outputs into one patient-facing level.

use crate::domain::{ConsolidatedRisk, Model, RiskLevel, RiskResult};
use crate::engine::EngineError;

/// Fixed description of the merge strategy, carried on every consolidated
/// result.
pub const METHODOLOGY: &str =
    "Maximum severity across pooled-cohort (ASCVD) and PREVENT model outputs";

/// Merge one ASCVD result and one PREVENT result for the same patient.
///
/// Severity is the maximum of the two classification ordinals; the final
/// level additionally escalates on the maximum risk percentage (>= 20
/// High, >= 10 Moderate). Pediatric labels participate through the same
/// ordinal mapping. The output is deterministic given the two inputs.
///
/// # Errors
/// Returns `ModelPairMismatch` unless the pair is exactly one ASCVD and
/// one PREVENT result; a missing or duplicated model is a caller bug.
pub fn consolidate(
    ascvd: &RiskResult,
    prevent: &RiskResult,
) -> Result<ConsolidatedRisk, EngineError> {
    if ascvd.model != Model::Ascvd || prevent.model != Model::Prevent {
        return Err(EngineError::ModelPairMismatch {
            ascvd: ascvd.model,
            prevent: prevent.model,
        });
    }

    let max_ordinal = ascvd
        .classification
        .ordinal()
        .max(prevent.classification.ordinal());
    let max_risk = ascvd.risk_percent.max(prevent.risk_percent);

    let risk_level = if max_ordinal >= 4 || max_risk >= 20.0 {
        RiskLevel::High
    } else if max_ordinal >= 3 || max_risk >= 10.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    Ok(ConsolidatedRisk {
        risk_level,
        ascvd: ascvd.clone(),
        prevent: prevent.clone(),
        max_risk,
        methodology: METHODOLOGY.to_string(),
    })
}
