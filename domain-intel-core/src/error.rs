//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Scan not found
    #[error("Scan not found: {0}")]
    ScanNotFound(i64),

    /// Domain not found
    #[error("Domain not found: {0}")]
    DomainNotFound(i64),

    /// Domain name already registered
    #[error("Domain already exists: {0}")]
    DomainExists(String),

    /// The scan transitioned to failed; the row still records the attempt
    #[error("Scan {scan_id} failed: {message}")]
    ScanFailed { scan_id: i64, message: String },

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when
    /// returning `false`. **Please update this method simultaneously when new
    /// variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ScanNotFound(_)
                | Self::DomainNotFound(_)
                | Self::DomainExists(_)
        )
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
