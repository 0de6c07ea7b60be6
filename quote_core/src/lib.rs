//! # quote_core - Print Job Estimation Engine
//!
//! `quote_core` is the computational heart of PressQuote, turning a
//! structured specification of a bound product (trim size, page sections,
//! paper weights, cover, binding, finishing, delivery) plus a set of rate
//! tables into a complete, itemized cost breakdown and sell price for one or
//! more candidate print quantities.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results; the
//!   engine owns no rates, no machines, no persistence
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings; validation
//!   reports every violation at once
//! - **Deterministic**: Identical inputs produce identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::calculations::estimate_raw;
//! use quote_core::rates::RateTables;
//! use quote_core::spec::{RawJobSpecification, RawPricingConfig, RawTextSection};
//!
//! let raw = RawJobSpecification {
//!     trim_width_mm: "148".to_string(),
//!     trim_height_mm: "210".to_string(),
//!     sections: vec![RawTextSection {
//!         enabled: true,
//!         label: "Text".to_string(),
//!         pages: "96".to_string(),
//!         paper_gsm: "100".to_string(),
//!         paper_stock: "woodfree".to_string(),
//!         machine: String::new(),
//!         colors_front: "1".to_string(),
//!         colors_back: "1".to_string(),
//!         printing_method: "sheetwise".to_string(),
//!     }],
//!     binding: "saddle_stitching".to_string(),
//!     destination: "Domestic".to_string(),
//!     quantities: vec!["1000".to_string()],
//!     pricing: RawPricingConfig {
//!         mode: "markup".to_string(),
//!         percent: "15".to_string(),
//!         turnaround: "standard".to_string(),
//!         tax_rate_percent: "0".to_string(),
//!         ..RawPricingConfig::default()
//!     },
//!     ..RawJobSpecification::default()
//! };
//!
//! let results = estimate_raw(&raw, RateTables::standard(), &[]).unwrap();
//! println!("Grand total: {:.2}", results[0].grand_total);
//! ```
//!
//! ## Modules
//!
//! - [`spec`] - Raw (pre-validation) and normalized job specifications
//! - [`validate`] - Business-rule validation collecting every violation
//! - [`rates`] - Read-only rate/lookup tables and machine profiles
//! - [`calculations`] - The estimation pipeline and orchestrator
//! - [`quotation`] - Quotation record container for consumers
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Quotation files with atomic saves and locking

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod quotation;
pub mod rates;
pub mod spec;
pub mod units;
pub mod validate;

// Re-export commonly used types at crate root for convenience
pub use calculations::{estimate, estimate_for_quantity, estimate_raw, CostResult};
pub use errors::{EstimateError, EstimateResult};
pub use file_io::{load_quotation, save_quotation, FileLock};
pub use quotation::{Quotation, QuotationMetadata};
pub use rates::{MachineProfile, RateTables};
pub use spec::{JobSpecification, RawJobSpecification};
