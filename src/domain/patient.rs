//! Patient snapshot types, age-band routing, and band-specific validation.
//!
//! A `RiskInput` is the flat clinical snapshot submitted for one assessment.
//! Which fields are required, and their accepted ranges, depend on the
//! `AgeBand` derived from `age`. All range checks are inclusive at both
//! ends; the lower bounds (HDL >= 20, cholesterol >= 100, age >= 1) also
//! guarantee that every log and division argument in the scoring formulas
//! is strictly positive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Patient sex as used by the risk equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sex {
    Male,
    Female,
}

/// Race group for the pooled-cohort coefficient tables.
///
/// Required only for non-pediatric ASCVD-style scoring; the PREVENT-style
/// model and the pediatric screeners do not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Race {
    White,
    AfricanAmerican,
}

/// Age band derived from `age`; never stored.
///
/// The band selects both the validation rules and the formula path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeBand {
    /// Age below 1 or above 130: no score is produced.
    Invalid,
    /// Ages 1-17: simplified screening formulas.
    Pediatric,
    /// Ages 18-79: full adult equations.
    Adult,
    /// Ages 80 and over: adult equations with effective-age capping.
    Elderly,
}

impl AgeBand {
    /// Classify an age in whole years into its band.
    #[must_use]
    pub fn from_age(age: u32) -> Self {
        match age {
            0 => Self::Invalid,
            1..=17 => Self::Pediatric,
            18..=79 => Self::Adult,
            80..=130 => Self::Elderly,
            _ => Self::Invalid,
        }
    }
}

/// The patient snapshot submitted for one risk assessment.
///
/// Optional fields are only required for the bands that consume them (see
/// [`RiskInput::validate`]); fields a band does not consume are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskInput {
    /// Age in whole years (1-130)
    pub age: u32,

    /// Patient sex
    pub sex: Sex,

    /// Race group; required for adult/elderly ASCVD scoring only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<Race>,

    /// Total cholesterol in mg/dL (100-400); required for ages 18 and over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cholesterol: Option<f64>,

    /// HDL cholesterol in mg/dL (20-100); required for ages 18 and over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdl_cholesterol: Option<f64>,

    /// Systolic blood pressure in mmHg (50-150 pediatric, 70-250 otherwise)
    #[serde(rename = "systolicBP")]
    pub systolic_bp: f64,

    /// Whether the patient is on blood pressure medication
    #[serde(default)]
    pub on_blood_pressure_medication: bool,

    /// Doctor-diagnosed diabetes
    #[serde(default)]
    pub is_diabetic: bool,

    /// Current smoker
    #[serde(default)]
    pub is_smoker: bool,

    /// Estimated glomerular filtration rate in mL/min/1.73m2 (15-120);
    /// required for ages 18 and over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egfr: Option<f64>,

    /// Glycated hemoglobin in percent (4-15); required iff diabetic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
}

/// Validation failure: a map of field name to human-readable violation.
///
/// Callers must not proceed to scoring while any violation is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Record a violation for a field. Later entries for the same field
    /// replace earlier ones.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// Whether any violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up the violation message for a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate over (field, message) pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert into `Ok(())` when empty, `Err(self)` otherwise.
    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validated adult/elderly vitals extracted from a `RiskInput`.
///
/// Produced by [`RiskInput::adult_vitals`] so the scorers never touch an
/// unchecked `Option`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdultVitals {
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub systolic_bp: f64,
    pub egfr: f64,
    /// Present whenever the patient is diabetic.
    pub hba1c: Option<f64>,
}

/// Inclusive ranges for the adult/elderly band.
const ADULT_SBP_RANGE: (f64, f64) = (70.0, 250.0);
const TOTAL_CHOLESTEROL_RANGE: (f64, f64) = (100.0, 400.0);
const HDL_CHOLESTEROL_RANGE: (f64, f64) = (20.0, 100.0);
const EGFR_RANGE: (f64, f64) = (15.0, 120.0);
const HBA1C_RANGE: (f64, f64) = (4.0, 15.0);

/// Inclusive range for the pediatric band.
const PEDIATRIC_SBP_RANGE: (f64, f64) = (50.0, 150.0);

impl RiskInput {
    /// Validate the subset of fields relevant to the given age band.
    ///
    /// # Errors
    /// Returns a field-to-message map describing every violation found.
    pub fn validate(&self, band: AgeBand) -> Result<(), ValidationErrors> {
        match band {
            AgeBand::Invalid => {
                let mut errors = ValidationErrors::default();
                errors.insert("age", format!("Age {} out of range [1, 130]", self.age));
                Err(errors)
            }
            AgeBand::Pediatric => {
                let mut errors = ValidationErrors::default();
                let (min, max) = PEDIATRIC_SBP_RANGE;
                if !(min..=max).contains(&self.systolic_bp) {
                    errors.insert(
                        "systolicBP",
                        format!(
                            "Systolic BP {} out of range [{min}, {max}]",
                            self.systolic_bp
                        ),
                    );
                }
                errors.into_result()
            }
            AgeBand::Adult | AgeBand::Elderly => self.adult_vitals().map(|_| ()),
        }
    }

    /// Extract and range-check the vitals the adult/elderly formulas consume.
    pub(crate) fn adult_vitals(&self) -> Result<AdultVitals, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let total_cholesterol = required_in_range(
            &mut errors,
            "totalCholesterol",
            "Total cholesterol",
            self.total_cholesterol,
            TOTAL_CHOLESTEROL_RANGE,
        );
        let hdl_cholesterol = required_in_range(
            &mut errors,
            "hdlCholesterol",
            "HDL cholesterol",
            self.hdl_cholesterol,
            HDL_CHOLESTEROL_RANGE,
        );
        let egfr = required_in_range(&mut errors, "egfr", "eGFR", self.egfr, EGFR_RANGE);

        let (min, max) = ADULT_SBP_RANGE;
        if !(min..=max).contains(&self.systolic_bp) {
            errors.insert(
                "systolicBP",
                format!(
                    "Systolic BP {} out of range [{min}, {max}]",
                    self.systolic_bp
                ),
            );
        }

        // HbA1c only participates in the diabetes term; it is don't-care
        // for non-diabetic patients.
        let hba1c = if self.is_diabetic {
            let (min, max) = HBA1C_RANGE;
            match self.hba1c {
                Some(v) if (min..=max).contains(&v) => Some(v),
                Some(v) => {
                    errors.insert("hba1c", format!("HbA1c {v} out of range [{min}, {max}]"));
                    None
                }
                None => {
                    errors.insert("hba1c", "HbA1c is required for diabetic patients");
                    None
                }
            }
        } else {
            None
        };

        match (total_cholesterol, hdl_cholesterol, egfr, errors.is_empty()) {
            (Some(total_cholesterol), Some(hdl_cholesterol), Some(egfr), true) => Ok(AdultVitals {
                total_cholesterol,
                hdl_cholesterol,
                systolic_bp: self.systolic_bp,
                egfr,
                hba1c,
            }),
            _ => Err(errors),
        }
    }
}

/// Check that an optional field is present and within an inclusive range,
/// recording a violation otherwise.
fn required_in_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<f64>,
    (min, max): (f64, f64),
) -> Option<f64> {
    match value {
        Some(v) if (min..=max).contains(&v) => Some(v),
        Some(v) => {
            errors.insert(field, format!("{label} {v} out of range [{min}, {max}]"));
            None
        }
        None => {
            errors.insert(field, format!("{label} is required for ages 18 and over"));
            None
        }
    }
}
