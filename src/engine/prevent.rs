//! PREVENT-style estimator for the adult and elderly bands.
//!
//! An additive model over the same effective age as the ASCVD estimator,
//! with its own classification thresholds and a hard 50% ceiling.

use crate::domain::{AgeBand, Classification, Model, RiskInput, RiskResult, Sex};
use crate::engine::coefficients::{EFFECTIVE_AGE_CAP, PREVENT};
use crate::engine::{pediatric, EngineError};

const FORMULA_NAME: &str = "PREVENT Equations";

/// Score an input with the PREVENT-style model.
///
/// Routes pediatric inputs to the screening variant. Unlike the ASCVD
/// path, race is not consumed.
///
/// # Errors
/// Returns `InvalidInput` when the band-specific validation fails.
pub fn score_prevent(input: &RiskInput) -> Result<RiskResult, EngineError> {
    let band = AgeBand::from_age(input.age);
    input.validate(band)?;

    if band == AgeBand::Pediatric {
        return Ok(pediatric::score(input, Model::Prevent));
    }

    let vitals = input.adult_vitals()?;

    let effective_age = if band == AgeBand::Elderly {
        f64::from(input.age).min(EFFECTIVE_AGE_CAP)
    } else {
        f64::from(input.age)
    };

    let cholesterol_ratio = vitals.total_cholesterol / vitals.hdl_cholesterol;

    let diabetes_term = if input.is_diabetic {
        vitals
            .hba1c
            .map_or(PREVENT.diabetes_base, |hba1c| {
                PREVENT.diabetes_base + hba1c * PREVENT.diabetes_hba1c
            })
    } else {
        0.0
    };
    let smoker_term = if input.is_smoker { PREVENT.smoker } else { 0.0 };

    let mut risk = PREVENT.base_age * effective_age.ln() * effective_age
        + PREVENT.chol_ratio * cholesterol_ratio
        + PREVENT.sbp_per_20 * (vitals.systolic_bp / 20.0)
        + diabetes_term
        + smoker_term
        + (120.0 - vitals.egfr) * PREVENT.kidney;

    if input.sex == Sex::Male {
        risk *= PREVENT.male_multiplier;
    }
    if band == AgeBand::Elderly {
        risk *= PREVENT.elderly_multiplier;
    }
    risk = risk.min(PREVENT.cap);

    let percent = super::finish_percent(risk, Model::Prevent);

    Ok(RiskResult {
        model: Model::Prevent,
        risk_percent: percent,
        classification: classify(percent),
        formula_name: FORMULA_NAME.to_string(),
        disclaimer: None,
    })
}

/// PREVENT classification thresholds; distinct from the ASCVD table.
fn classify(percent: f64) -> Classification {
    if percent < 5.0 {
        Classification::Low
    } else if percent < 10.0 {
        Classification::BorderlineIntermediate
    } else if percent < 20.0 {
        Classification::Intermediate
    } else {
        Classification::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Race;

    fn baseline(sex: Sex, age: u32) -> RiskInput {
        RiskInput {
            age,
            sex,
            race: None,
            total_cholesterol: Some(213.0),
            hdl_cholesterol: Some(50.0),
            systolic_bp: 120.0,
            on_blood_pressure_medication: false,
            is_diabetic: false,
            is_smoker: false,
            egfr: Some(90.0),
            hba1c: None,
        }
    }

    #[test]
    fn test_reference_adult_male() {
        // 1.15 * (0.015*ln(55)*55 + 0.35*4.26 + 0.25*6 + 0.02*30) = 7.93
        let result = score_prevent(&baseline(Sex::Male, 55)).expect("Should score");
        assert!((result.risk_percent - 7.9).abs() < f64::EPSILON);
        assert_eq!(result.classification, Classification::BorderlineIntermediate);
    }

    #[test]
    fn test_race_not_required() {
        let result = score_prevent(&baseline(Sex::Female, 55)).expect("Should score");
        assert_eq!(result.model, Model::Prevent);
        assert!(result.disclaimer.is_none());
    }

    #[test]
    fn test_hard_cap_at_50() {
        let mut input = baseline(Sex::Male, 110);
        input.systolic_bp = 250.0;
        input.total_cholesterol = Some(400.0);
        input.hdl_cholesterol = Some(20.0);
        input.is_smoker = true;
        input.is_diabetic = true;
        input.hba1c = Some(15.0);
        input.egfr = Some(15.0);
        let result = score_prevent(&input).expect("Should score");
        assert!(result.risk_percent <= 50.0);
        assert_eq!(result.classification, Classification::High);
    }

    #[test]
    fn test_risk_in_model_range() {
        for sex in [Sex::Male, Sex::Female] {
            for age in [18, 45, 79, 85, 120] {
                let result = score_prevent(&baseline(sex, age)).expect("Should score");
                assert!((0.0..=50.0).contains(&result.risk_percent));
            }
        }
    }

    #[test]
    fn test_monotonic_in_systolic_bp() {
        let mut previous = f64::MIN;
        for sbp in [80.0, 100.0, 120.0, 160.0, 200.0, 250.0] {
            let mut input = baseline(Sex::Female, 50);
            input.systolic_bp = sbp;
            let result = score_prevent(&input).expect("Should score");
            assert!(result.risk_percent >= previous);
            previous = result.risk_percent;
        }
    }

    #[test]
    fn test_effective_age_cap_and_elderly_multiplier() {
        let at_85 = score_prevent(&baseline(Sex::Male, 85)).expect("Should score");
        let at_90 = score_prevent(&baseline(Sex::Male, 90)).expect("Should score");
        assert_eq!(at_85.risk_percent, at_90.risk_percent);

        let at_79 = score_prevent(&baseline(Sex::Male, 79)).expect("Should score");
        assert!(at_85.risk_percent > at_79.risk_percent);
    }

    #[test]
    fn test_kidney_term_increases_risk() {
        let healthy = score_prevent(&baseline(Sex::Female, 60)).expect("Should score");
        let mut impaired = baseline(Sex::Female, 60);
        impaired.egfr = Some(30.0);
        let impaired = score_prevent(&impaired).expect("Should score");
        assert!(impaired.risk_percent > healthy.risk_percent);
    }

    #[test]
    fn test_diabetes_term_uses_hba1c() {
        let mut controlled = baseline(Sex::Male, 60);
        controlled.is_diabetic = true;
        controlled.hba1c = Some(5.0);
        let controlled = score_prevent(&controlled).expect("Should score");

        let mut uncontrolled = baseline(Sex::Male, 60);
        uncontrolled.is_diabetic = true;
        uncontrolled.hba1c = Some(11.0);
        let uncontrolled = score_prevent(&uncontrolled).expect("Should score");

        assert!(uncontrolled.risk_percent > controlled.risk_percent);
    }

    #[test]
    fn test_male_multiplier() {
        let male = score_prevent(&baseline(Sex::Male, 60)).expect("Should score");
        let female = score_prevent(&baseline(Sex::Female, 60)).expect("Should score");
        assert!(male.risk_percent > female.risk_percent);
    }

    #[test]
    fn test_deterministic() {
        let mut input = baseline(Sex::Female, 72);
        input.race = Some(Race::AfricanAmerican);
        let first = score_prevent(&input).expect("Should score");
        let second = score_prevent(&input).expect("Should score");
        assert_eq!(first, second);
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(classify(4.9), Classification::Low);
        assert_eq!(classify(5.0), Classification::BorderlineIntermediate);
        assert_eq!(classify(9.9), Classification::BorderlineIntermediate);
        assert_eq!(classify(10.0), Classification::Intermediate);
        assert_eq!(classify(19.9), Classification::Intermediate);
        assert_eq!(classify(20.0), Classification::High);
    }
}
