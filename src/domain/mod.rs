//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies
//! beyond serialization. All types are serializable and validate strictly.

mod assessment;
mod patient;

pub use assessment::{
    Assessment, Classification, ConsolidatedRisk, Model, RiskLevel, RiskResult,
};
pub use patient::{AgeBand, Race, RiskInput, Sex, ValidationErrors};
