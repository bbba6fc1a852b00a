//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and external systems (storage). The engine
//! itself never touches a port; persistence is the caller's concern.

mod storage;

pub use storage::{AssessmentPage, Storage};
