//! Poblacion Projection - population projection engine for municipalities
//!
//! This library provides:
//! - Arithmetic, geometric, exponential and Wappaus growth models
//! - Constant and segmented (two-phase) growth rates
//! - Multi-municipality aggregation with deterministic row order
//! - Consolidated and per-municipality result tables with CSV export

pub mod error;
pub mod config;
pub mod municipality;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, ConfigError};
pub use municipality::Entity;
pub use projection::{project, Method, ProjectionInput, ProjectionSeries, RateSpec};
pub use report::{ResultRow, ResultTable};
pub use scenario::{ScenarioRunner, ProjectionRun, LabeledSeries};
