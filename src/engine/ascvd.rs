//! Pooled-cohort-style (ASCVD) estimator for the adult and elderly bands.

use crate::domain::{AgeBand, Classification, Model, Race, RiskInput, RiskResult, ValidationErrors};
use crate::engine::coefficients::{self, BASELINE_SURVIVAL, EFFECTIVE_AGE_CAP, ELDERLY_ASCVD_FACTOR};
use crate::engine::{pediatric, EngineError};

const FORMULA_NAME: &str = "Pooled Cohort Equations (ASCVD)";

/// Score an input with the ASCVD-style model.
///
/// Routes pediatric inputs to the screening variant; adult and elderly
/// inputs run the log-linear hazard model for their (sex, race) group.
///
/// # Errors
/// Returns `InvalidInput` when the band-specific validation fails or when
/// `race` is missing for an adult/elderly input.
pub fn score_ascvd(input: &RiskInput) -> Result<RiskResult, EngineError> {
    let band = AgeBand::from_age(input.age);
    input.validate(band)?;

    if band == AgeBand::Pediatric {
        return Ok(pediatric::score(input, Model::Ascvd));
    }

    let race = require_race(input.race)?;
    let vitals = input.adult_vitals()?;
    let c = coefficients::ascvd(input.sex, race);

    // Effective-age capping happens before any log term; the elderly
    // correction factor applies after the risk transform.
    let effective_age = if band == AgeBand::Elderly {
        f64::from(input.age).min(EFFECTIVE_AGE_CAP)
    } else {
        f64::from(input.age)
    };

    let ln_age = effective_age.ln();
    let ln_total_chol = vitals.total_cholesterol.ln();
    let ln_hdl = vitals.hdl_cholesterol.ln();
    let ln_sbp = vitals.systolic_bp.ln();

    let (sbp_coef, sbp_age_coef) = if input.on_blood_pressure_medication {
        (c.ln_sbp_treated, c.ln_age_ln_sbp_treated)
    } else {
        (c.ln_sbp_untreated, c.ln_age_ln_sbp_untreated)
    };

    let smoker = if input.is_smoker { 1.0 } else { 0.0 };
    let diabetic = if input.is_diabetic { 1.0 } else { 0.0 };

    let sum = c.ln_age * ln_age
        + c.ln_age_squared * ln_age * ln_age
        + c.ln_total_chol * ln_total_chol
        + c.ln_age_ln_total_chol * ln_age * ln_total_chol
        + c.ln_hdl * ln_hdl
        + c.ln_age_ln_hdl * ln_age * ln_hdl
        + sbp_coef * ln_sbp
        + sbp_age_coef * ln_age * ln_sbp
        + c.smoker * smoker
        + c.ln_age_smoker * ln_age * smoker
        + c.diabetes * diabetic;

    let mut percent = (1.0 - BASELINE_SURVIVAL.powf((sum - c.mean_sum).exp())) * 100.0;
    if band == AgeBand::Elderly {
        percent *= ELDERLY_ASCVD_FACTOR;
    }
    let percent = super::finish_percent(percent, Model::Ascvd);

    Ok(RiskResult {
        model: Model::Ascvd,
        risk_percent: percent,
        classification: classify(percent),
        formula_name: FORMULA_NAME.to_string(),
        disclaimer: None,
    })
}

fn require_race(race: Option<Race>) -> Result<Race, EngineError> {
    race.ok_or_else(|| {
        let mut errors = ValidationErrors::default();
        errors.insert("race", "Race is required for ASCVD scoring at ages 18 and over");
        EngineError::InvalidInput(errors)
    })
}

/// ASCVD classification thresholds; distinct from the PREVENT table.
fn classify(percent: f64) -> Classification {
    if percent < 5.0 {
        Classification::Low
    } else if percent < 7.5 {
        Classification::Borderline
    } else if percent < 20.0 {
        Classification::Intermediate
    } else {
        Classification::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sex;

    fn baseline(sex: Sex, race: Race, age: u32) -> RiskInput {
        RiskInput {
            age,
            sex,
            race: Some(race),
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
    fn test_golden_fixture_white_male_55() {
        // Canonical pooled-cohort reference profile: classification must
        // land in the Low/Borderline range.
        let result = score_ascvd(&baseline(Sex::Male, Race::White, 55)).expect("Should score");
        assert!(
            matches!(
                result.classification,
                Classification::Low | Classification::Borderline
            ),
            "got {} at {}%",
            result.classification,
            result.risk_percent
        );
        assert!(result.risk_percent > 0.0 && result.risk_percent < 7.5);
        assert!(result.disclaimer.is_none());
    }

    #[test]
    fn test_risk_in_model_range() {
        for sex in [Sex::Male, Sex::Female] {
            for race in [Race::White, Race::AfricanAmerican] {
                for age in [18, 40, 60, 79, 85, 110] {
                    let mut input = baseline(sex, race, age);
                    input.is_smoker = true;
                    input.is_diabetic = true;
                    input.hba1c = Some(8.0);
                    input.systolic_bp = 180.0;
                    let result = score_ascvd(&input).expect("Should score");
                    assert!(
                        (0.0..=100.0).contains(&result.risk_percent),
                        "{sex:?}/{race:?}/{age}: {}",
                        result.risk_percent
                    );
                }
            }
        }
    }

    #[test]
    fn test_monotonic_in_systolic_bp() {
        for sex in [Sex::Male, Sex::Female] {
            for race in [Race::White, Race::AfricanAmerican] {
                let mut previous = f64::MIN;
                for sbp in [90.0, 110.0, 130.0, 150.0, 180.0, 220.0] {
                    let mut input = baseline(sex, race, 55);
                    input.systolic_bp = sbp;
                    let result = score_ascvd(&input).expect("Should score");
                    assert!(
                        result.risk_percent >= previous,
                        "{sex:?}/{race:?}: decreased at sbp {sbp}"
                    );
                    previous = result.risk_percent;
                }
            }
        }
    }

    #[test]
    fn test_effective_age_cap_and_elderly_factor() {
        // Ages 85 and 90 both cap to effective age 85 and both carry the
        // elderly multiplier, so the scores are identical.
        let at_85 = score_ascvd(&baseline(Sex::Male, Race::White, 85)).expect("Should score");
        let at_90 = score_ascvd(&baseline(Sex::Male, Race::White, 90)).expect("Should score");
        assert_eq!(at_85.risk_percent, at_90.risk_percent);

        // The elderly band scores strictly above the same profile at the
        // adult ceiling (higher age term plus the 1.25 factor).
        let at_79 = score_ascvd(&baseline(Sex::Male, Race::White, 79)).expect("Should score");
        assert!(at_85.risk_percent > at_79.risk_percent);
    }

    #[test]
    fn test_bp_medication_selects_treated_coefficient() {
        let untreated = score_ascvd(&baseline(Sex::Male, Race::White, 60)).expect("Should score");
        let mut input = baseline(Sex::Male, Race::White, 60);
        input.on_blood_pressure_medication = true;
        let treated = score_ascvd(&input).expect("Should score");
        assert!(treated.risk_percent >= untreated.risk_percent);
    }

    #[test]
    fn test_smoking_and_diabetes_increase_risk() {
        let base = score_ascvd(&baseline(Sex::Female, Race::White, 60)).expect("Should score");

        let mut smoker = baseline(Sex::Female, Race::White, 60);
        smoker.is_smoker = true;
        let smoker = score_ascvd(&smoker).expect("Should score");
        assert!(smoker.risk_percent > base.risk_percent);

        let mut diabetic = baseline(Sex::Female, Race::White, 60);
        diabetic.is_diabetic = true;
        diabetic.hba1c = Some(7.0);
        let diabetic = score_ascvd(&diabetic).expect("Should score");
        assert!(diabetic.risk_percent > base.risk_percent);
    }

    #[test]
    fn test_race_required_for_adults() {
        let mut input = baseline(Sex::Male, Race::White, 55);
        input.race = None;
        let err = score_ascvd(&input).expect_err("Should reject");
        match err {
            EngineError::InvalidInput(errors) => assert!(errors.get("race").is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pediatric_routing_ignores_race() {
        let mut input = baseline(Sex::Male, Race::White, 12);
        input.race = None;
        input.total_cholesterol = None;
        input.hdl_cholesterol = None;
        input.egfr = None;
        let result = score_ascvd(&input).expect("Should score");
        assert_eq!(result.model, Model::Ascvd);
        assert!(result.disclaimer.is_some());
        assert!(matches!(
            result.classification,
            Classification::Normal | Classification::Elevated
        ));
    }

    #[test]
    fn test_invalid_ages_rejected() {
        for age in [0, 131] {
            let input = baseline(Sex::Male, Race::White, age);
            let err = score_ascvd(&input).expect_err("Should reject");
            match err {
                EngineError::InvalidInput(errors) => assert!(errors.get("age").is_some()),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let input = baseline(Sex::Female, Race::AfricanAmerican, 64);
        let first = score_ascvd(&input).expect("Should score");
        let second = score_ascvd(&input).expect("Should score");
        assert_eq!(first, second);
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(classify(4.9), Classification::Low);
        assert_eq!(classify(5.0), Classification::Borderline);
        assert_eq!(classify(7.4), Classification::Borderline);
        assert_eq!(classify(7.5), Classification::Intermediate);
        assert_eq!(classify(19.9), Classification::Intermediate);
        assert_eq!(classify(20.0), Classification::High);
    }
}
