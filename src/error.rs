//! Error types for projection and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the projection engine and the aggregator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    /// Input violates an engine constraint; no series is produced
    #[error("invalid projection input: {0}")]
    InvalidInput(String),

    /// Entity has no methods selected; it contributes no series
    #[error("municipality '{entity}' has no projection methods selected")]
    NoMethodsSelected { entity: String },
}

impl ProjectionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ProjectionError::InvalidInput(message.into())
    }

    /// Whether the error is a non-fatal configuration notice
    pub fn is_notice(&self) -> bool {
        matches!(self, ProjectionError::NoMethodsSelected { .. })
    }
}

/// Errors raised while loading or validating run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid municipality CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown projection method '{0}'")]
    UnknownMethod(String),

    #[error("{0}")]
    OutOfRange(String),
}
