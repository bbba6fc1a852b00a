//! Risk-scoring engine: pure, stateless functions over fixed tables.
//!
//! Every operation here reads only its own input and the coefficient
//! tables, allocates its own output, and performs no I/O. Calls are
//! independent and idempotent; the two model scorers may run concurrently
//! with no coordination. No randomness participates in any score.

mod ascvd;
pub mod coefficients;
mod consolidate;
mod pediatric;
mod prevent;

pub use ascvd::score_ascvd;
pub use consolidate::{consolidate, METHODOLOGY};
pub use prevent::score_prevent;

use crate::domain::{AgeBand, Model, ValidationErrors};

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Required fields missing or out of the band-specific range.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    /// Consolidation was attempted with something other than one ASCVD
    /// result and one PREVENT result. This is a caller bug, not a
    /// user-facing condition.
    #[error("consolidation requires one ascvd and one prevent result, got ({ascvd}, {prevent})")]
    ModelPairMismatch { ascvd: Model, prevent: Model },
}

/// Classify an age in whole years into its band.
///
/// Convenience alias for [`AgeBand::from_age`].
#[must_use]
pub fn classify_age_band(age: u32) -> AgeBand {
    AgeBand::from_age(age)
}

/// Round a percentage to one decimal place and clamp it to the model
/// ceiling.
pub(crate) fn finish_percent(percent: f64, model: Model) -> f64 {
    let clamped = percent.clamp(0.0, model.max_percent());
    (clamped * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_age_band() {
        assert_eq!(classify_age_band(17), AgeBand::Pediatric);
        assert_eq!(classify_age_band(18), AgeBand::Adult);
        assert_eq!(classify_age_band(80), AgeBand::Elderly);
        assert_eq!(classify_age_band(0), AgeBand::Invalid);
        assert_eq!(classify_age_band(131), AgeBand::Invalid);
    }

    #[test]
    fn test_finish_percent() {
        assert!((finish_percent(5.349, Model::Ascvd) - 5.3).abs() < f64::EPSILON);
        assert!((finish_percent(-2.0, Model::Ascvd)).abs() < f64::EPSILON);
        assert!((finish_percent(120.0, Model::Ascvd) - 100.0).abs() < f64::EPSILON);
        assert!((finish_percent(73.0, Model::Prevent) - 50.0).abs() < f64::EPSILON);
    }
}
