//! Finishing rate table: process to per-copy rate with a minimum order.
//!
//! Finishing prices scale with the job's trim area against a reference size
//! (see the finishing calculator); the table itself only carries the base
//! rate and the floor below which no finisher will take the work.

use serde::{Deserialize, Serialize};

use crate::spec::FinishingType;

/// One finishing rate row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingRate {
    pub finish: FinishingType,
    /// Rate per copy at the reference trim size
    pub rate_per_copy: f64,
    /// Minimum charge for the process, applied per job
    pub minimum_order: f64,
}

/// The finishing rate table.
///
/// Carries the reference trim the per-copy rates are quoted at; jobs larger
/// than the reference are scaled up by area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingRateTable {
    pub rows: Vec<FinishingRate>,
    /// Reference trim width the rates are quoted at (mm)
    pub reference_trim_width_mm: f64,
    /// Reference trim height the rates are quoted at (mm)
    pub reference_trim_height_mm: f64,
}

impl FinishingRateTable {
    /// Resolve the rate row for a finishing process.
    ///
    /// An unlisted process extrapolates to the last row; `None` only for an
    /// empty table.
    pub fn lookup(&self, finish: FinishingType) -> Option<&FinishingRate> {
        self.rows
            .iter()
            .find(|r| r.finish == finish)
            .or_else(|| self.rows.last())
    }

    /// Reference trim area in square meters
    pub fn reference_area_m2(&self) -> f64 {
        self.reference_trim_width_mm / 1000.0 * (self.reference_trim_height_mm / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FinishingRateTable {
        FinishingRateTable {
            rows: vec![
                FinishingRate {
                    finish: FinishingType::GlossLamination,
                    rate_per_copy: 0.085,
                    minimum_order: 45.0,
                },
                FinishingRate {
                    finish: FinishingType::SpotUv,
                    rate_per_copy: 0.12,
                    minimum_order: 90.0,
                },
            ],
            reference_trim_width_mm: 210.0,
            reference_trim_height_mm: 297.0,
        }
    }

    #[test]
    fn test_lookup() {
        let rate = table().lookup(FinishingType::SpotUv).unwrap().rate_per_copy;
        assert_eq!(rate, 0.12);
    }

    #[test]
    fn test_unlisted_extrapolates_to_last() {
        let binding = table();
        let rate = binding.lookup(FinishingType::Foiling).unwrap();
        assert_eq!(rate.finish, FinishingType::SpotUv);
    }

    #[test]
    fn test_reference_area() {
        let area = table().reference_area_m2();
        assert!((area - 0.06237).abs() < 1e-9);
    }
}
