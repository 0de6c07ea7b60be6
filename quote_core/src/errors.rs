//! # Error Types
//!
//! Structured error types for quote_core. The engine distinguishes two kinds
//! of calculation-facing failures:
//!
//! - [`EstimateError::ValidationFailed`] - the raw specification broke one or
//!   more business rules. Every violation found is listed, not just the
//!   first, so a caller can display all problems at once. Always recoverable
//!   by correcting input.
//! - [`EstimateError::CalculationFailed`] - an internal invariant broke
//!   during the pipeline (non-finite intermediate, zero ups, zero quantity).
//!   Unexpected given valid input; the whole multi-quantity batch fails.
//!
//! The remaining variants carry the quotation file layer.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{EstimateError, EstimateResult};
//!
//! fn check_quantity(quantity: u32) -> EstimateResult<()> {
//!     if quantity == 0 {
//!         return Err(EstimateError::calculation_failed(
//!             "pricing",
//!             "quantity is zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
///
/// Each variant provides specific context about what went wrong, enabling
/// programmatic handling by UI layers and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// The raw specification violated one or more business rules.
    ///
    /// Contains every violation found - validation never stops at the first.
    #[error("Specification invalid ({} violations): {}", .violations.len(), .violations.join("; "))]
    ValidationFailed { violations: Vec<String> },

    /// An internal invariant broke during the calculation pipeline.
    #[error("Calculation failed in {stage}: {reason}")]
    CalculationFailed { stage: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl EstimateError {
    /// Create a ValidationFailed error from a list of violations
    pub fn validation_failed(violations: Vec<String>) -> Self {
        EstimateError::ValidationFailed { violations }
    }

    /// Create a CalculationFailed error naming the failing pipeline stage
    pub fn calculation_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::CalculationFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        EstimateError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (correct the input and retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EstimateError::ValidationFailed { .. } | EstimateError::FileLocked { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::ValidationFailed { .. } => "VALIDATION_FAILED",
            EstimateError::CalculationFailed { .. } => "CALCULATION_FAILED",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::FileLocked { .. } => "FILE_LOCKED",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
