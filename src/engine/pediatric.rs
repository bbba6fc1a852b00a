//! Pediatric screening score, used by both model entry points for ages
//! 1-17.
//!
//! This is a deliberately coarse linear score. Both variants attach a
//! disclaimer: these are screening tools only, not diagnostic.

use crate::domain::{Classification, Model, RiskInput, RiskResult};
use crate::engine::coefficients::{
    self, PEDIATRIC_DEFAULT_CHOLESTEROL, PEDIATRIC_ELEVATED_THRESHOLD,
    PEDIATRIC_PREVENT_AGE_SCALE, PEDIATRIC_PREVENT_BP_SCALE, PEDIATRIC_PREVENT_DIABETES_SCALE,
    PEDIATRIC_PREVENT_SMOKER_SCALE,
};

pub(crate) const DISCLAIMER: &str = "Pediatric formulas are screening tools only";

const ASCVD_VARIANT_NAME: &str = "Pediatric Screening Score (pooled-cohort variant)";
const PREVENT_VARIANT_NAME: &str = "Pediatric Screening Score (PREVENT variant)";

/// Score a pediatric input for the requested model entry point.
///
/// The caller is responsible for validating the input against the
/// pediatric band first.
pub(crate) fn score(input: &RiskInput, model: Model) -> RiskResult {
    let c = coefficients::pediatric(input.sex);
    let age = f64::from(input.age);
    let smoker = if input.is_smoker { 1.0 } else { 0.0 };
    let diabetic = if input.is_diabetic { 1.0 } else { 0.0 };

    let risk_fraction = match model {
        Model::Ascvd => {
            let cholesterol = input
                .total_cholesterol
                .unwrap_or(PEDIATRIC_DEFAULT_CHOLESTEROL);
            c.base_age * age
                + c.cholesterol * cholesterol
                + c.systolic_bp * input.systolic_bp
                + c.smoker * smoker
                + c.diabetes * diabetic
        }
        // The PREVENT variant scales the age, BP, smoker and diabetes
        // terms and omits the cholesterol term entirely.
        Model::Prevent => {
            c.base_age * PEDIATRIC_PREVENT_AGE_SCALE * age
                + c.systolic_bp * PEDIATRIC_PREVENT_BP_SCALE * input.systolic_bp
                + c.smoker * PEDIATRIC_PREVENT_SMOKER_SCALE * smoker
                + c.diabetes * PEDIATRIC_PREVENT_DIABETES_SCALE * diabetic
        }
    };

    let classification = if risk_fraction > PEDIATRIC_ELEVATED_THRESHOLD {
        Classification::Elevated
    } else {
        Classification::Normal
    };

    let formula_name = match model {
        Model::Ascvd => ASCVD_VARIANT_NAME,
        Model::Prevent => PREVENT_VARIANT_NAME,
    };

    RiskResult {
        model,
        risk_percent: super::finish_percent(risk_fraction * 100.0, model),
        classification,
        formula_name: formula_name.to_string(),
        disclaimer: Some(DISCLAIMER.to_string()),
    }
}
