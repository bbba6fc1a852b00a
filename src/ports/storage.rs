//! Storage port: Trait for persistent storage operations.
//!
//! This trait abstracts the storage backend (SQLite) from the application
//! logic. Assessment records are immutable once saved.

use crate::domain::Assessment;

/// A page of assessments with pagination metadata.
#[derive(Debug, Clone)]
pub struct AssessmentPage {
    /// Assessments in this page
    pub items: Vec<Assessment>,
    /// Total count of all assessments (for UI pagination)
    pub total_count: usize,
    /// Current page offset
    pub offset: usize,
    /// Page size limit
    pub limit: usize,
    /// Whether there are more pages
    pub has_more: bool,
}

impl AssessmentPage {
    /// Create a new assessment page.
    #[must_use]
    pub fn new(items: Vec<Assessment>, total_count: usize, offset: usize, limit: usize) -> Self {
        let has_more = offset + items.len() < total_count;
        Self {
            items,
            total_count,
            offset,
            limit,
            has_more,
        }
    }

    /// Get the next page offset.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        if self.has_more {
            Some(self.offset + self.limit)
        } else {
            None
        }
    }

    /// Get the previous page offset.
    #[must_use]
    pub fn prev_offset(&self) -> Option<usize> {
        if self.offset > 0 {
            Some(self.offset.saturating_sub(self.limit))
        } else {
            None
        }
    }
}

/// Trait for local storage operations.
///
/// All data is stored locally and never transmitted.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save an assessment to storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error>;

    /// Load all assessments from storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_assessments(&self) -> Result<Vec<Assessment>, Self::Error>;

    /// Load recent assessments (up to `limit`).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent_assessments(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error>;

    /// Load assessments with pagination (cursor-based).
    ///
    /// # Arguments
    /// * `offset` - Starting position (0-indexed)
    /// * `limit` - Maximum number of items to return
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_assessments_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<AssessmentPage, Self::Error>;

    /// Get the total count of assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count_assessments(&self) -> Result<usize, Self::Error>;

    /// Delete an assessment by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn delete_assessment(&self, id: &str) -> Result<(), Self::Error>;

    /// Clear all stored assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Race, RiskInput, Sex};
    use crate::engine::{consolidate, score_ascvd, score_prevent};

    fn sample_assessment() -> Assessment {
        let input = RiskInput {
            age: 62,
            sex: Sex::Male,
            race: Some(Race::White),
            total_cholesterol: Some(200.0),
            hdl_cholesterol: Some(55.0),
            systolic_bp: 128.0,
            on_blood_pressure_medication: false,
            is_diabetic: false,
            is_smoker: false,
            egfr: Some(85.0),
            hba1c: None,
        };
        let ascvd = score_ascvd(&input).expect("Should score");
        let prevent = score_prevent(&input).expect("Should score");
        let result = consolidate(&ascvd, &prevent).expect("Should consolidate");
        Assessment::new(input, result)
    }

    #[test]
    fn test_middle_page_offsets() {
        let items = vec![sample_assessment(), sample_assessment()];
        let page = AssessmentPage::new(items, 10, 4, 2);

        assert!(page.has_more);
        assert_eq!(page.next_offset(), Some(6));
        assert_eq!(page.prev_offset(), Some(2));
    }

    #[test]
    fn test_first_page_has_no_previous() {
        let page = AssessmentPage::new(vec![sample_assessment()], 3, 0, 1);
        assert_eq!(page.prev_offset(), None);
        assert_eq!(page.next_offset(), Some(1));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = AssessmentPage::new(vec![sample_assessment()], 5, 4, 2);
        assert!(!page.has_more);
        assert_eq!(page.next_offset(), None);
        assert_eq!(page.prev_offset(), Some(2));
    }

    #[test]
    fn test_offset_past_end() {
        // An empty page beyond the data still reports no further pages
        // and steps back without underflow.
        let page = AssessmentPage::new(Vec::new(), 5, 8, 3);
        assert!(!page.has_more);
        assert_eq!(page.next_offset(), None);
        assert_eq!(page.prev_offset(), Some(5));
    }

    #[test]
    fn test_zero_limit_page() {
        // Limit 0 always yields an empty page whose previous offset
        // saturates at the current position.
        let page = AssessmentPage::new(Vec::new(), 5, 2, 0);
        assert!(page.has_more);
        assert_eq!(page.next_offset(), Some(2));
        assert_eq!(page.prev_offset(), Some(2));
    }

    #[test]
    fn test_empty_store_page() {
        let page = AssessmentPage::new(Vec::new(), 0, 0, 10);
        assert!(!page.has_more);
        assert_eq!(page.next_offset(), None);
        assert_eq!(page.prev_offset(), None);
    }
}
