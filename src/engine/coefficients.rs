//! Fixed coefficient tables for the risk models.
//!
//! Every cell here is a calibrated regression output and must be treated as
//! a fixed asset. The irregularities across groups are intentional and
//! match the published equations: the African-American female group carries
//! ln(age)*ln(SBP) cross terms no other group has, and neither
//! African-American group has an ln(age)*smoker term. Do not symmetrize.

use crate::domain::{Race, Sex};

/// Baseline survival constant for the pooled-cohort risk transform.
pub const BASELINE_SURVIVAL: f64 = 0.9533;

/// Age ceiling applied before any log/age term for the elderly band.
pub const EFFECTIVE_AGE_CAP: f64 = 85.0;

/// Multiplier applied to the ASCVD percentage for the elderly band,
/// after the risk transform.
pub const ELDERLY_ASCVD_FACTOR: f64 = 1.25;

/// Pooled-cohort coefficients for one (sex, race) group.
///
/// Terms not present in a group's published equation are zero.
#[derive(Debug, Clone, Copy)]
pub struct AscvdCoefficients {
    pub ln_age: f64,
    pub ln_age_squared: f64,
    pub ln_total_chol: f64,
    pub ln_age_ln_total_chol: f64,
    pub ln_hdl: f64,
    pub ln_age_ln_hdl: f64,
    pub ln_sbp_treated: f64,
    pub ln_sbp_untreated: f64,
    pub ln_age_ln_sbp_treated: f64,
    pub ln_age_ln_sbp_untreated: f64,
    pub smoker: f64,
    pub ln_age_smoker: f64,
    pub diabetes: f64,
    /// Mean-centering constant for the group's weighted sum.
    pub mean_sum: f64,
}

const WHITE_MALE: AscvdCoefficients = AscvdCoefficients {
    ln_age: 12.344,
    ln_age_squared: 0.0,
    ln_total_chol: 11.853,
    ln_age_ln_total_chol: -2.664,
    ln_hdl: -7.990,
    ln_age_ln_hdl: 1.769,
    ln_sbp_treated: 1.797,
    ln_sbp_untreated: 1.764,
    ln_age_ln_sbp_treated: 0.0,
    ln_age_ln_sbp_untreated: 0.0,
    smoker: 7.837,
    ln_age_smoker: -1.795,
    diabetes: 0.658,
    mean_sum: 61.18,
};

const AFRICAN_AMERICAN_MALE: AscvdCoefficients = AscvdCoefficients {
    ln_age: 2.469,
    ln_age_squared: 0.0,
    ln_total_chol: 0.302,
    ln_age_ln_total_chol: 0.0,
    ln_hdl: -0.307,
    ln_age_ln_hdl: 0.0,
    ln_sbp_treated: 1.916,
    ln_sbp_untreated: 1.809,
    ln_age_ln_sbp_treated: 0.0,
    ln_age_ln_sbp_untreated: 0.0,
    smoker: 0.549,
    ln_age_smoker: 0.0,
    diabetes: 0.645,
    mean_sum: 19.54,
};

const WHITE_FEMALE: AscvdCoefficients = AscvdCoefficients {
    ln_age: -29.799,
    ln_age_squared: 4.884,
    ln_total_chol: 13.540,
    ln_age_ln_total_chol: -3.114,
    ln_hdl: -13.578,
    ln_age_ln_hdl: 3.149,
    ln_sbp_treated: 2.019,
    ln_sbp_untreated: 1.957,
    ln_age_ln_sbp_treated: 0.0,
    ln_age_ln_sbp_untreated: 0.0,
    smoker: 7.574,
    ln_age_smoker: -1.665,
    diabetes: 0.661,
    mean_sum: -29.18,
};

const AFRICAN_AMERICAN_FEMALE: AscvdCoefficients = AscvdCoefficients {
    ln_age: 17.114,
    ln_age_squared: 0.0,
    ln_total_chol: 0.940,
    ln_age_ln_total_chol: 0.0,
    ln_hdl: -18.920,
    ln_age_ln_hdl: 4.475,
    ln_sbp_treated: 29.291,
    ln_sbp_untreated: 27.820,
    ln_age_ln_sbp_treated: -6.432,
    ln_age_ln_sbp_untreated: -6.087,
    smoker: 0.691,
    ln_age_smoker: 0.0,
    diabetes: 0.874,
    mean_sum: 86.61,
};

/// Look up the pooled-cohort coefficient group for (sex, race).
#[must_use]
pub fn ascvd(sex: Sex, race: Race) -> &'static AscvdCoefficients {
    match (sex, race) {
        (Sex::Male, Race::White) => &WHITE_MALE,
        (Sex::Male, Race::AfricanAmerican) => &AFRICAN_AMERICAN_MALE,
        (Sex::Female, Race::White) => &WHITE_FEMALE,
        (Sex::Female, Race::AfricanAmerican) => &AFRICAN_AMERICAN_FEMALE,
    }
}

/// PREVENT-style additive model coefficients (sex-independent; sex and
/// elderly adjustments are multiplicative).
#[derive(Debug, Clone, Copy)]
pub struct PreventCoefficients {
    /// Weight on ln(effective_age) * effective_age
    pub base_age: f64,
    /// Weight on total/HDL cholesterol ratio
    pub chol_ratio: f64,
    /// Weight on systolic BP divided by 20
    pub sbp_per_20: f64,
    /// Diabetes indicator base term
    pub diabetes_base: f64,
    /// Additional diabetes weight per HbA1c percent
    pub diabetes_hba1c: f64,
    /// Smoker indicator term
    pub smoker: f64,
    /// Weight on (120 - eGFR)
    pub kidney: f64,
    /// Multiplier applied for male patients
    pub male_multiplier: f64,
    /// Multiplier applied for the elderly band
    pub elderly_multiplier: f64,
    /// Hard model ceiling in percent
    pub cap: f64,
}

pub const PREVENT: PreventCoefficients = PreventCoefficients {
    base_age: 0.015,
    chol_ratio: 0.35,
    sbp_per_20: 0.25,
    diabetes_base: 2.0,
    diabetes_hba1c: 0.3,
    smoker: 1.5,
    kidney: 0.02,
    male_multiplier: 1.15,
    elderly_multiplier: 1.2,
    cap: 50.0,
};

/// Per-sex constants for the pediatric screening score.
#[derive(Debug, Clone, Copy)]
pub struct PediatricCoefficients {
    /// Weight per year of age
    pub base_age: f64,
    /// Weight per mg/dL total cholesterol (ASCVD variant only)
    pub cholesterol: f64,
    /// Weight per mmHg systolic BP
    pub systolic_bp: f64,
    /// Smoker indicator term
    pub smoker: f64,
    /// Diabetes indicator term
    pub diabetes: f64,
}

const PEDIATRIC_MALE: PediatricCoefficients = PediatricCoefficients {
    base_age: 0.0004,
    cholesterol: 0.00002,
    systolic_bp: 0.0002,
    smoker: 0.015,
    diabetes: 0.02,
};

const PEDIATRIC_FEMALE: PediatricCoefficients = PediatricCoefficients {
    base_age: 0.0003,
    cholesterol: 0.000018,
    systolic_bp: 0.00018,
    smoker: 0.012,
    diabetes: 0.018,
};

/// Look up the pediatric constants for a sex.
#[must_use]
pub fn pediatric(sex: Sex) -> &'static PediatricCoefficients {
    match sex {
        Sex::Male => &PEDIATRIC_MALE,
        Sex::Female => &PEDIATRIC_FEMALE,
    }
}

/// Total cholesterol assumed when absent in the pediatric ASCVD variant.
pub const PEDIATRIC_DEFAULT_CHOLESTEROL: f64 = 150.0;

/// Risk fraction above which a pediatric score classifies as Elevated.
pub const PEDIATRIC_ELEVATED_THRESHOLD: f64 = 0.05;

/// Multiplicative adjustments for the pediatric PREVENT variant, which
/// also omits the cholesterol term entirely.
pub const PEDIATRIC_PREVENT_AGE_SCALE: f64 = 0.8;
pub const PEDIATRIC_PREVENT_BP_SCALE: f64 = 1.2;
pub const PEDIATRIC_PREVENT_SMOKER_SCALE: f64 = 0.7;
pub const PEDIATRIC_PREVENT_DIABETES_SCALE: f64 = 1.1;
