//! SQLite adapter: Implementation of Storage.
//!
//! Provides local persistence for assessment records. The raw input
//! snapshot is stored as JSON; the per-model results are flattened into
//! columns so trend queries never need to parse JSON.
//!
//! # Mutex Behavior
//!
//! Database connection is protected by `Mutex`. A poisoned mutex (from
//! panic in another thread) will cause panic. This fail-fast behavior is
//! intentional for data integrity in healthcare applications.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, Row};

use crate::domain::{
    Assessment, Classification, ConsolidatedRisk, Model, RiskLevel, RiskResult,
};
use crate::ports::{AssessmentPage, Storage};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// SQLite storage adapter.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Create a new SQLite storage with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock().expect("Lock failed");

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                input_json TEXT NOT NULL,
                ascvd_percent REAL NOT NULL,
                ascvd_classification TEXT NOT NULL,
                ascvd_formula TEXT NOT NULL,
                ascvd_disclaimer TEXT,
                prevent_percent REAL NOT NULL,
                prevent_classification TEXT NOT NULL,
                prevent_formula TEXT NOT NULL,
                prevent_disclaimer TEXT,
                risk_level TEXT NOT NULL,
                max_risk REAL NOT NULL,
                methodology TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_created
                ON assessments(created_at DESC);
            ",
        )?;

        Ok(())
    }

    /// Parse a stored classification label. Unknown labels indicate enum
    /// drift between writer and reader versions; they are flagged and
    /// mapped to the lowest severity rather than silently accepted.
    fn parse_classification(label: &str) -> Classification {
        Classification::from_label(label).unwrap_or_else(|| {
            tracing::warn!("Unknown stored classification '{label}', defaulting to Low");
            Classification::Low
        })
    }

    /// Parse a stored risk level label, with the same drift handling.
    fn parse_risk_level(label: &str) -> RiskLevel {
        RiskLevel::from_label(label).unwrap_or_else(|| {
            tracing::warn!("Unknown stored risk level '{label}', defaulting to Low");
            RiskLevel::Low
        })
    }

    /// Reconstruct an assessment from a full row.
    fn row_to_assessment(row: &Row<'_>) -> rusqlite::Result<Assessment> {
        let id: String = row.get(0)?;
        let input_json: String = row.get(1)?;
        let ascvd_percent: f64 = row.get(2)?;
        let ascvd_classification: String = row.get(3)?;
        let ascvd_formula: String = row.get(4)?;
        let ascvd_disclaimer: Option<String> = row.get(5)?;
        let prevent_percent: f64 = row.get(6)?;
        let prevent_classification: String = row.get(7)?;
        let prevent_formula: String = row.get(8)?;
        let prevent_disclaimer: Option<String> = row.get(9)?;
        let risk_level: String = row.get(10)?;
        let max_risk: f64 = row.get(11)?;
        let methodology: String = row.get(12)?;
        let created_at_str: String = row.get(13)?;

        let input = serde_json::from_str(&input_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| chrono::Utc::now());

        Ok(Assessment {
            id,
            input,
            result: ConsolidatedRisk {
                risk_level: Self::parse_risk_level(&risk_level),
                ascvd: RiskResult {
                    model: Model::Ascvd,
                    risk_percent: ascvd_percent,
                    classification: Self::parse_classification(&ascvd_classification),
                    formula_name: ascvd_formula,
                    disclaimer: ascvd_disclaimer,
                },
                prevent: RiskResult {
                    model: Model::Prevent,
                    risk_percent: prevent_percent,
                    classification: Self::parse_classification(&prevent_classification),
                    formula_name: prevent_formula,
                    disclaimer: prevent_disclaimer,
                },
                max_risk,
                methodology,
            },
            created_at,
        })
    }
}

const SELECT_COLUMNS: &str = r"
    SELECT id, input_json,
           ascvd_percent, ascvd_classification, ascvd_formula, ascvd_disclaimer,
           prevent_percent, prevent_classification, prevent_formula, prevent_disclaimer,
           risk_level, max_risk, methodology, created_at
    FROM assessments
";

impl Storage for SqliteStorage {
    type Error = StorageError;

    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error> {
        let input_json = serde_json::to_string(&assessment.input)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let conn = self.conn.lock().expect("Lock failed");
        let result = &assessment.result;

        conn.execute(
            r"
            INSERT INTO assessments (
                id, input_json,
                ascvd_percent, ascvd_classification, ascvd_formula, ascvd_disclaimer,
                prevent_percent, prevent_classification, prevent_formula, prevent_disclaimer,
                risk_level, max_risk, methodology, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ",
            params![
                assessment.id,
                input_json,
                result.ascvd.risk_percent,
                result.ascvd.classification.as_str(),
                result.ascvd.formula_name,
                result.ascvd.disclaimer,
                result.prevent.risk_percent,
                result.prevent.classification.as_str(),
                result.prevent.formula_name,
                result.prevent.disclaimer,
                result.risk_level.as_str(),
                result.max_risk,
                result.methodology,
                assessment.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Saved assessment {} to storage", assessment.id);
        Ok(())
    }

    fn load_assessments(&self) -> Result<Vec<Assessment>, Self::Error> {
        // NOTE: This loads up to 1000 assessments into memory.
        // For larger datasets, use load_assessments_paginated() instead.
        self.load_recent_assessments(1000)
    }

    fn load_recent_assessments(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let mut stmt =
            conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1"))?;

        let assessments = stmt
            .query_map(params![limit as i64], Self::row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(assessments)
    }

    fn load_assessments_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<AssessmentPage, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC LIMIT ?1 OFFSET ?2"
        ))?;

        let assessments = stmt
            .query_map(params![limit as i64, offset as i64], Self::row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AssessmentPage::new(
            assessments,
            total_count as usize,
            offset,
            limit,
        ))
    }

    fn count_assessments(&self) -> Result<usize, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");

        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn delete_assessment(&self, id: &str) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let deleted = conn.execute("DELETE FROM assessments WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute_batch("DELETE FROM assessments;")?;
        tracing::warn!("Cleared all assessments from storage");
        Ok(())
    }
}
