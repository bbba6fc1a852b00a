//! Assessment service: Orchestrates the scoring pipeline.
//!
//! This service coordinates:
//! - Band-specific input validation (inside the scorers)
//! - Both model runs
//! - Consolidation
//! - Storage persistence

use std::sync::Arc;

use crate::domain::{AgeBand, Assessment, RiskInput};
use crate::engine::{consolidate, score_ascvd, score_prevent};
use crate::ports::Storage;
use crate::CardioscopeError;

/// Service for running full risk assessments.
///
/// The engine itself is pure; this service is the boundary where results
/// become persistent records. The two model scorers share no state and
/// could run in either order.
pub struct AssessmentService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new assessment service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Run a full assessment on a patient snapshot.
    ///
    /// Performs the pipeline: validate, score both models, consolidate,
    /// persist. A persistence failure is logged but does not discard the
    /// computed result.
    ///
    /// # Errors
    /// Returns error if validation or scoring fails.
    pub fn assess(&self, input: RiskInput) -> Result<Assessment, CardioscopeError> {
        let band = AgeBand::from_age(input.age);
        tracing::info!("Starting assessment (age band {:?})...", band);

        tracing::debug!("Step 1: Scoring pooled-cohort (ASCVD) model...");
        let ascvd = score_ascvd(&input)?;
        tracing::debug!(
            "ASCVD: {}% ({})",
            ascvd.risk_percent,
            ascvd.classification
        );

        tracing::debug!("Step 2: Scoring PREVENT model...");
        let prevent = score_prevent(&input)?;
        tracing::debug!(
            "PREVENT: {}% ({})",
            prevent.risk_percent,
            prevent.classification
        );

        tracing::debug!("Step 3: Consolidating...");
        let result = consolidate(&ascvd, &prevent)?;

        let assessment = Assessment::new(input, result);

        tracing::debug!("Step 4: Saving assessment to storage...");
        if let Err(e) = self.storage.save_assessment(&assessment) {
            tracing::warn!("Failed to save assessment: {:?}", e);
        }

        tracing::info!(
            "Assessment complete: level={}, max_risk={:.1}%",
            assessment.result.risk_level,
            assessment.result.max_risk
        );

        Ok(assessment)
    }

    /// Get recent assessments from storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn get_recent_assessments(
        &self,
        limit: usize,
    ) -> Result<Vec<Assessment>, CardioscopeError> {
        self.storage
            .load_recent_assessments(limit)
            .map_err(|e| CardioscopeError::Storage(e.into()))
    }

    /// Get total assessment count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn get_assessment_count(&self) -> Result<usize, CardioscopeError> {
        self.storage
            .count_assessments()
            .map_err(|e| CardioscopeError::Storage(e.into()))
    }

    /// Delete one assessment by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn delete_assessment(&self, id: &str) -> Result<(), CardioscopeError> {
        self.storage
            .delete_assessment(id)
            .map_err(|e| CardioscopeError::Storage(e.into()))
    }
}
