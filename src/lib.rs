//! # Cardioscope
//!
//! Deterministic cardiovascular risk scoring with local assessment history.
//!
//! This crate provides:
//! - A pure, stateless risk-scoring engine (pooled-cohort/ASCVD and
//!   PREVENT-style models, with pediatric screening variants)
//! - Age-band routing and band-specific input validation
//! - Local SQLite persistence of assessment records and trend summaries
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (RiskInput, RiskResult, ConsolidatedRisk)
//! - `engine`: Pure scoring functions over fixed coefficient tables
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod engine;
pub mod ports;

pub use domain::{AgeBand, Assessment, ConsolidatedRisk, RiskInput, RiskLevel, RiskResult};
pub use engine::{classify_age_band, consolidate, score_ascvd, score_prevent};

/// Result type for Cardioscope operations
pub type Result<T> = std::result::Result<T, CardioscopeError>;

/// Main error type for Cardioscope
#[derive(Debug, thiserror::Error)]
pub enum CardioscopeError {
    #[error("Invalid patient input: {0}")]
    Validation(#[from] domain::ValidationErrors),

    #[error("Scoring failed: {0}")]
    Engine(#[from] engine::EngineError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
