//! # Quotation Data Structures
//!
//! The `Quotation` struct is the record a consumer persists once an estimate
//! is accepted. Quotations serialize to `.pqt` (PressQuote) files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Quotation
//! ├── meta: QuotationMetadata (version, estimator, job info, timestamps)
//! ├── spec: JobSpecification (the normalized specification quoted)
//! └── results: Vec<CostResult> (one per candidate quantity)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::quotation::Quotation;
//!
//! let quotation = Quotation::new("Jane Estimator", "Q-2031", "Harbor Press");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&quotation).unwrap();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::CostResult;
use crate::spec::JobSpecification;

/// Current schema version for .pqt files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root quotation container.
///
/// This is the top-level struct that gets serialized to `.pqt` files. The
/// engine itself never writes one; it exists so every consumer persists the
/// same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    /// Quotation metadata (version, estimator, job info)
    pub meta: QuotationMetadata,

    /// The normalized specification the results were calculated from
    pub spec: Option<JobSpecification>,

    /// One result per candidate quantity, in the order requested
    pub results: Vec<CostResult>,
}

impl Quotation {
    /// Create a new empty quotation.
    ///
    /// # Arguments
    ///
    /// * `estimator` - Name of the responsible estimator
    /// * `quote_id` - Quotation number (e.g., "Q-2031")
    /// * `customer` - Customer name
    ///
    /// # Example
    ///
    /// ```rust
    /// use quote_core::quotation::Quotation;
    ///
    /// let quotation = Quotation::new("Jane Estimator", "Q-2031", "Harbor Press");
    /// assert_eq!(quotation.meta.estimator, "Jane Estimator");
    /// assert!(quotation.results.is_empty());
    /// ```
    pub fn new(
        estimator: impl Into<String>,
        quote_id: impl Into<String>,
        customer: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Quotation {
            meta: QuotationMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                estimator: estimator.into(),
                quote_id: quote_id.into(),
                customer: customer.into(),
                created: now,
                modified: now,
            },
            spec: None,
            results: Vec::new(),
        }
    }

    /// Attach the quoted specification and its results, replacing any
    /// previous ones.
    pub fn set_estimate(&mut self, spec: JobSpecification, results: Vec<CostResult>) {
        self.spec = Some(spec);
        self.results = results;
        self.touch();
    }

    /// The result for a specific quantity, if it was estimated.
    pub fn result_for(&self, quantity: u32) -> Option<&CostResult> {
        self.results.iter().find(|r| r.quantity == quantity)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Quotation {
    fn default() -> Self {
        Quotation::new("", "", "")
    }
}

/// Quotation metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Stable identifier for this quotation
    pub id: Uuid,

    /// Name of the responsible estimator
    pub estimator: String,

    /// Quotation number
    pub quote_id: String,

    /// Customer name
    pub customer: String,

    /// When the quotation was created
    pub created: DateTime<Utc>,

    /// When the quotation was last modified
    pub modified: DateTime<Utc>,
}
