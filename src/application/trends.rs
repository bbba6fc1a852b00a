//! Trends service: Aggregate statistics over stored assessments.
//!
//! Backs the trend dashboards: distribution of consolidated risk levels
//! and summary statistics of the maximum risk percentage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::RiskLevel;
use crate::ports::Storage;
use crate::CardioscopeError;

/// Page size used when walking the assessment history.
const SUMMARY_PAGE_SIZE: usize = 500;

/// Aggregate view over stored assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    /// Number of assessments aggregated
    pub total_count: usize,
    /// Assessments with a Low consolidated level
    pub low_count: usize,
    /// Assessments with a Moderate consolidated level
    pub moderate_count: usize,
    /// Assessments with a High consolidated level
    pub high_count: usize,
    /// Mean of `max_risk` across assessments (0 when empty)
    pub average_max_risk: f64,
    /// Highest `max_risk` seen (0 when empty)
    pub peak_max_risk: f64,
    /// Timestamp of the most recent assessment, if any
    pub latest_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Service for computing trend summaries.
pub struct TrendsService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> TrendsService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new trends service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Compute the trend summary over all stored assessments.
    ///
    /// Walks the full history page by page, so the summary stays exact
    /// regardless of how many assessments have accumulated.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn get_summary(&self) -> Result<TrendSummary, CardioscopeError> {
        self.summarize_paged(SUMMARY_PAGE_SIZE)
    }

    fn summarize_paged(&self, page_size: usize) -> Result<TrendSummary, CardioscopeError> {
        let mut total_count = 0;
        let mut low_count = 0;
        let mut moderate_count = 0;
        let mut high_count = 0;
        let mut risk_sum = 0.0;
        let mut peak_max_risk = 0.0_f64;
        let mut latest_at = None;

        let mut offset = 0;
        loop {
            let page = self
                .storage
                .load_assessments_paginated(offset, page_size)
                .map_err(|e| CardioscopeError::Storage(e.into()))?;

            total_count += page.items.len();
            for assessment in &page.items {
                match assessment.result.risk_level {
                    RiskLevel::Low => low_count += 1,
                    RiskLevel::Moderate => moderate_count += 1,
                    RiskLevel::High => high_count += 1,
                }
                risk_sum += assessment.result.max_risk;
                peak_max_risk = peak_max_risk.max(assessment.result.max_risk);
                if latest_at.map_or(true, |t| assessment.created_at > t) {
                    latest_at = Some(assessment.created_at);
                }
            }

            match page.next_offset() {
                Some(next) => offset = next,
                None => break,
            }
        }

        let average_max_risk = if total_count > 0 {
            risk_sum / total_count as f64
        } else {
            0.0
        };

        let summary = TrendSummary {
            total_count,
            low_count,
            moderate_count,
            high_count,
            average_max_risk,
            peak_max_risk,
            latest_at,
        };

        tracing::info!(
            "Trend summary: {} assessments, avg max risk {:.1}%, {} high",
            summary.total_count,
            summary.average_max_risk,
            summary.high_count
        );

        Ok(summary)
    }
}
