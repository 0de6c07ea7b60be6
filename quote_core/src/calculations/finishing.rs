//! # Finishing Cost Calculator
//!
//! Lamination and decorative finishing: rate × area-scaled quantity with a
//! minimum-order floor.
//!
//! The table's per-copy rates are quoted at a reference trim. A job larger
//! than the reference scales the rate up by area; a smaller job never scales
//! below the table rate (`area_scale = max(1, job area / reference area)`).
//! Every process then pays at least its minimum order value.
//!
//! Charged processes are the cover lamination, the jacket lamination, and
//! each job-level finishing option, in that order.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::RateTables;
use crate::spec::{FinishingType, JobSpecification};

/// One charged finishing process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingCharge {
    pub finish: FinishingType,
    /// Charge for the process, rounded to 2 decimals
    pub cost: f64,
    /// Whether the minimum order value governed
    pub at_minimum: bool,
}

/// All finishing charges for one quantity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinishingResult {
    pub charges: Vec<FinishingCharge>,
    pub total: f64,
}

/// Cost every finishing process the specification carries.
///
/// A job with no cover lamination, no jacket lamination and no finishing
/// options returns an empty result at zero cost.
pub fn finishing_cost(
    spec: &JobSpecification,
    quantity: u32,
    tables: &RateTables,
) -> EstimateResult<FinishingResult> {
    let mut processes: Vec<FinishingType> = Vec::new();
    if let Some(cover) = &spec.cover {
        if let Some(lamination) = cover.lamination {
            processes.push(lamination);
        }
    }
    if let Some(jacket) = &spec.jacket {
        if let Some(lamination) = jacket.lamination {
            processes.push(lamination);
        }
    }
    processes.extend(spec.finishing.iter().copied());

    if processes.is_empty() {
        return Ok(FinishingResult::default());
    }

    let reference_area = tables.finishing.reference_area_m2();
    if reference_area <= 0.0 {
        return Err(EstimateError::calculation_failed(
            "finishing",
            "finishing table has no reference trim",
        ));
    }
    let area_scale = (spec.trim_area_m2() / reference_area).max(1.0);

    let mut charges = Vec::with_capacity(processes.len());
    let mut total = 0.0;
    for finish in processes {
        let rate = tables.finishing.lookup(finish).ok_or_else(|| {
            EstimateError::calculation_failed("finishing", "finishing rate table is empty")
        })?;
        let scaled = rate.rate_per_copy * area_scale * quantity as f64;
        let cost = round2(scaled.max(rate.minimum_order));
        charges.push(FinishingCharge {
            finish,
            cost,
            at_minimum: scaled < rate.minimum_order,
        });
        total += cost;
    }

    Ok(FinishingResult {
        charges,
        total: round2(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::*;

    fn spec_with(
        trim: (f64, f64),
        lamination: Option<FinishingType>,
        finishing: Vec<FinishingType>,
    ) -> JobSpecification {
        JobSpecification {
            trim_width_mm: trim.0,
            trim_height_mm: trim.1,
            sections: vec![],
            cover: Some(CoverSpecification {
                paper_gsm: 300.0,
                paper_stock: PaperStock::ArtCard,
                colors_outside: 4,
                colors_inside: 0,
                machine: None,
                lamination,
            }),
            endleaves: None,
            jacket: None,
            board: None,
            binding: BindingType::PerfectBinding,
            finishing,
            destination: "Domestic".to_string(),
            quantities: vec![1000],
            pricing: PricingConfig {
                mode: PricingMode::Margin,
                percent: 20.0,
                turnaround: Turnaround::Standard,
                tax_rate_percent: 0.0,
                minimum_order_value: 0.0,
                currency: "USD".to_string(),
            },
        }
    }

    #[test]
    fn test_no_processes_costs_nothing() {
        let tables = crate::rates::RateTables::standard();
        let spec = spec_with((153.0, 234.0), None, vec![]);
        let result = finishing_cost(&spec, 5000, tables).unwrap();
        assert!(result.charges.is_empty());
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_small_trim_never_scales_below_rate() {
        let tables = crate::rates::RateTables::standard();
        let spec = spec_with((153.0, 234.0), Some(FinishingType::GlossLamination), vec![]);
        let result = finishing_cost(&spec, 5000, tables).unwrap();
        // Trim is smaller than A4 reference: scale pins to 1.0
        assert_eq!(result.charges[0].cost, round2(0.085 * 5000.0));
    }

    #[test]
    fn test_oversized_trim_scales_up() {
        let tables = crate::rates::RateTables::standard();
        let spec = spec_with((297.0, 420.0), Some(FinishingType::GlossLamination), vec![]);
        let result = finishing_cost(&spec, 5000, tables).unwrap();
        // A3 job on an A4-referenced table: double area, double rate
        let expected = round2(0.085 * 2.0 * 5000.0);
        assert_eq!(result.charges[0].cost, expected);
    }

    #[test]
    fn test_minimum_order_floor() {
        let tables = crate::rates::RateTables::standard();
        let spec = spec_with((153.0, 234.0), Some(FinishingType::GlossLamination), vec![]);
        let result = finishing_cost(&spec, 100, tables).unwrap();
        // 100 copies x 0.085 = 8.50, under the 45.00 floor
        assert_eq!(result.charges[0].cost, 45.0);
        assert!(result.charges[0].at_minimum);
    }

    #[test]
    fn test_multiple_processes_sum() {
        let tables = crate::rates::RateTables::standard();
        let spec = spec_with(
            (153.0, 234.0),
            Some(FinishingType::MattLamination),
            vec![FinishingType::SpotUv, FinishingType::Foiling],
        );
        let result = finishing_cost(&spec, 5000, tables).unwrap();
        assert_eq!(result.charges.len(), 3);
        let sum: f64 = result.charges.iter().map(|c| c.cost).sum();
        assert!((result.total - sum).abs() < 0.01);
    }
}
