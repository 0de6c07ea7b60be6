//! # Rate & Lookup Tables
//!
//! Read-only inputs to the estimation engine. The engine never fetches or
//! edits rates; a rate-management store owns them and hands the engine a
//! snapshot for the duration of one calculation.
//!
//! ## Range resolution contract
//!
//! Every quantity-tiered table in this module resolves the same way: ranges
//! are non-overlapping and ordered by lower bound, bounds are inclusive, and
//! a lookup falling outside every range resolves to the last entry
//! (extrapolation, not an error). `None` is only possible on an empty table,
//! which the calculators surface as a calculation failure.
//!
//! ## Tables
//!
//! - [`paper::PaperRateTable`] - stock + gsm → per-ream money
//! - [`wastage::WastageChart`] - quantity × color class → waste per form
//! - [`binding`] - per-binding-method tier tables
//! - [`finishing::FinishingRateTable`] - process → per-copy rate + minimum
//! - [`impressions::ImpressionRateTable`] - legacy rate per 1,000 impressions
//! - [`machines::MachineProfile`] - press physics (passed alongside, not
//!   inside, the table snapshot)
//! - [`logistics`] - packing rates and freight routes

pub mod binding;
pub mod finishing;
pub mod impressions;
pub mod logistics;
pub mod machines;
pub mod paper;
pub mod wastage;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use binding::{HardcaseTier, PerfectBindingTier, SaddleStitchTier, WireOTier};
pub use finishing::{FinishingRate, FinishingRateTable};
pub use impressions::{ImpressionRateBand, ImpressionRateTable, MachineClass};
pub use logistics::{FreightBasis, FreightRoute, PackingRates};
pub use machines::{resolve_profile, MachineProfile};
pub use paper::{PaperRate, PaperRateTable};
pub use wastage::{ColorClass, WastageAllowance, WastageChart, WastageRow};

use crate::spec::FinishingType;

/// An inclusive quantity range `[min, max]`; `max: None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl QuantityRange {
    /// Create a new range (inclusive bounds)
    pub fn new(min: u32, max: Option<u32>) -> Self {
        QuantityRange { min, max }
    }

    /// Whether the range contains a quantity (both bounds inclusive)
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min && self.max.map_or(true, |max| quantity <= max)
    }
}

/// Resolve a range-tiered table: first row containing the quantity, else the
/// last row (extrapolation). `None` only for an empty table.
pub fn resolve_by_quantity<'a, T>(
    rows: &'a [T],
    quantity: u32,
    range_of: impl Fn(&T) -> &QuantityRange,
) -> Option<&'a T> {
    rows.iter()
        .find(|row| range_of(row).contains(quantity))
        .or_else(|| rows.last())
}

/// One volume discount threshold: orders of at least `min_quantity` earn
/// `percent` off the surcharged subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeDiscountTier {
    pub min_quantity: u32,
    pub percent: f64,
}

/// The complete rate snapshot the engine calculates from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTables {
    pub paper: PaperRateTable,
    pub wastage: WastageChart,
    pub perfect_binding: Vec<PerfectBindingTier>,
    pub saddle_stitching: Vec<SaddleStitchTier>,
    pub hardcase: Vec<HardcaseTier>,
    pub wire_o: Vec<WireOTier>,
    pub finishing: FinishingRateTable,
    pub impressions: ImpressionRateTable,
    pub packing: PackingRates,
    pub freight: Vec<FreightRoute>,
    /// Thresholds ordered ascending; percents monotonically non-decreasing
    pub volume_discounts: Vec<VolumeDiscountTier>,
    /// Case board cost per kilogram (hardcase work)
    pub board_rate_per_kg: f64,
}

impl RateTables {
    /// Volume discount percent for a quantity: the highest threshold at or
    /// below the quantity wins (inclusive lower bound).
    pub fn volume_discount_percent(&self, quantity: u32) -> f64 {
        self.volume_discounts
            .iter()
            .filter(|t| quantity >= t.min_quantity)
            .map(|t| t.percent)
            .fold(0.0, f64::max)
    }

    /// The built-in standard rate card used by the CLI and tests.
    pub fn standard() -> &'static RateTables {
        &STANDARD_TABLES
    }
}

static STANDARD_TABLES: Lazy<RateTables> = Lazy::new(|| RateTables {
    paper: PaperRateTable {
        rows: vec![
            paper_rate(crate::spec::PaperStock::Woodfree, 80.0, 30.0, 34.0),
            paper_rate(crate::spec::PaperStock::Woodfree, 100.0, 36.0, 41.0),
            paper_rate(crate::spec::PaperStock::Bond, 90.0, 34.0, 39.0),
            paper_rate(crate::spec::PaperStock::GlossArt, 115.0, 44.0, 50.0),
            paper_rate(crate::spec::PaperStock::GlossArt, 130.0, 50.0, 56.0),
            paper_rate(crate::spec::PaperStock::MattArt, 115.0, 46.0, 52.0),
            paper_rate(crate::spec::PaperStock::MattArt, 130.0, 52.0, 58.0),
            paper_rate(crate::spec::PaperStock::MattArt, 170.0, 66.0, 74.0),
            paper_rate(crate::spec::PaperStock::ArtCard, 250.0, 110.0, 123.0),
            paper_rate(crate::spec::PaperStock::ArtCard, 300.0, 130.0, 145.0),
            paper_rate(crate::spec::PaperStock::ArtCard, 350.0, 150.0, 168.0),
        ],
    },
    wastage: WastageChart {
        rows: vec![
            WastageRow {
                range: QuantityRange::new(0, Some(999)),
                four_color: WastageAllowance::Sheets(150),
                two_color: WastageAllowance::Sheets(100),
                one_color: WastageAllowance::Sheets(75),
            },
            WastageRow {
                range: QuantityRange::new(1000, Some(4999)),
                four_color: WastageAllowance::Sheets(250),
                two_color: WastageAllowance::Sheets(175),
                one_color: WastageAllowance::Sheets(125),
            },
            WastageRow {
                range: QuantityRange::new(5000, Some(9999)),
                four_color: WastageAllowance::Percent(4.0),
                two_color: WastageAllowance::Percent(3.0),
                one_color: WastageAllowance::Percent(2.0),
            },
            WastageRow {
                range: QuantityRange::new(10_000, None),
                four_color: WastageAllowance::Percent(3.0),
                two_color: WastageAllowance::Percent(2.5),
                one_color: WastageAllowance::Percent(2.0),
            },
        ],
    },
    perfect_binding: vec![
        PerfectBindingTier {
            range: QuantityRange::new(0, Some(1999)),
            rate_per_16pp: 0.040,
            gathering_per_16pp: 0.012,
            setup: 60.0,
        },
        PerfectBindingTier {
            range: QuantityRange::new(2000, Some(4999)),
            rate_per_16pp: 0.032,
            gathering_per_16pp: 0.010,
            setup: 60.0,
        },
        PerfectBindingTier {
            range: QuantityRange::new(5000, Some(9999)),
            rate_per_16pp: 0.026,
            gathering_per_16pp: 0.008,
            setup: 60.0,
        },
        PerfectBindingTier {
            range: QuantityRange::new(10_000, None),
            rate_per_16pp: 0.022,
            gathering_per_16pp: 0.007,
            setup: 60.0,
        },
    ],
    saddle_stitching: vec![
        SaddleStitchTier {
            range: QuantityRange::new(0, Some(1999)),
            rate_per_copy: 0.060,
            setup: 40.0,
        },
        SaddleStitchTier {
            range: QuantityRange::new(2000, Some(4999)),
            rate_per_copy: 0.045,
            setup: 40.0,
        },
        SaddleStitchTier {
            range: QuantityRange::new(5000, None),
            rate_per_copy: 0.035,
            setup: 40.0,
        },
    ],
    hardcase: vec![
        HardcaseTier {
            range: QuantityRange::new(0, Some(1999)),
            sewing_per_16pp: 0.050,
            case_per_copy: 0.85,
            setup: 150.0,
        },
        HardcaseTier {
            range: QuantityRange::new(2000, Some(4999)),
            sewing_per_16pp: 0.040,
            case_per_copy: 0.75,
            setup: 150.0,
        },
        HardcaseTier {
            range: QuantityRange::new(5000, None),
            sewing_per_16pp: 0.035,
            case_per_copy: 0.65,
            setup: 150.0,
        },
    ],
    wire_o: vec![
        WireOTier {
            max_diameter_mm: 6.9,
            rate_per_copy: 0.55,
            setup: 45.0,
        },
        WireOTier {
            max_diameter_mm: 12.7,
            rate_per_copy: 0.75,
            setup: 45.0,
        },
        WireOTier {
            max_diameter_mm: 19.0,
            rate_per_copy: 1.05,
            setup: 45.0,
        },
        WireOTier {
            max_diameter_mm: 25.4,
            rate_per_copy: 1.40,
            setup: 45.0,
        },
    ],
    finishing: FinishingRateTable {
        rows: vec![
            finishing_rate(FinishingType::GlossLamination, 0.085, 45.0),
            finishing_rate(FinishingType::MattLamination, 0.095, 45.0),
            finishing_rate(FinishingType::SoftTouchLamination, 0.180, 80.0),
            finishing_rate(FinishingType::SpotUv, 0.120, 90.0),
            finishing_rate(FinishingType::Embossing, 0.100, 120.0),
            finishing_rate(FinishingType::DieCutting, 0.080, 100.0),
            finishing_rate(FinishingType::Foiling, 0.150, 110.0),
        ],
        reference_trim_width_mm: 210.0,
        reference_trim_height_mm: 297.0,
    },
    impressions: ImpressionRateTable {
        bands: vec![
            ImpressionRateBand {
                range: QuantityRange::new(0, Some(2499)),
                full_size: 45.0,
                half_size: 36.0,
                quarter_size: 30.0,
            },
            ImpressionRateBand {
                range: QuantityRange::new(2500, Some(4999)),
                full_size: 40.0,
                half_size: 32.0,
                quarter_size: 27.0,
            },
            ImpressionRateBand {
                range: QuantityRange::new(5000, Some(9999)),
                full_size: 36.0,
                half_size: 29.0,
                quarter_size: 24.0,
            },
            ImpressionRateBand {
                range: QuantityRange::new(10_000, None),
                full_size: 32.0,
                half_size: 26.0,
                quarter_size: 21.0,
            },
        ],
    },
    packing: PackingRates {
        carton_rate: 1.40,
        pallet_rate: 12.0,
        carton_capacity_kg: 14.0,
        max_copies_per_carton: 100,
        cartons_per_pallet: 40,
    },
    freight: vec![
        FreightRoute {
            route: "Domestic".to_string(),
            overseas: false,
            basis: FreightBasis::PerTonne(85.0),
            clearance_fee: 0.0,
            documentation_fee: 0.0,
        },
        FreightRoute {
            route: "Europe".to_string(),
            overseas: true,
            basis: FreightBasis::PerTonne(160.0),
            clearance_fee: 150.0,
            documentation_fee: 40.0,
        },
        FreightRoute {
            route: "UK".to_string(),
            overseas: true,
            basis: FreightBasis::PerTonne(190.0),
            clearance_fee: 180.0,
            documentation_fee: 45.0,
        },
        FreightRoute {
            route: "USA East".to_string(),
            overseas: true,
            basis: FreightBasis::PerTonne(220.0),
            clearance_fee: 200.0,
            documentation_fee: 50.0,
        },
        FreightRoute {
            route: "Air".to_string(),
            overseas: true,
            basis: FreightBasis::PerKg(1.80),
            clearance_fee: 120.0,
            documentation_fee: 35.0,
        },
    ],
    volume_discounts: vec![
        VolumeDiscountTier {
            min_quantity: 0,
            percent: 0.0,
        },
        VolumeDiscountTier {
            min_quantity: 2500,
            percent: 1.0,
        },
        VolumeDiscountTier {
            min_quantity: 5000,
            percent: 2.0,
        },
        VolumeDiscountTier {
            min_quantity: 10_000,
            percent: 3.0,
        },
        VolumeDiscountTier {
            min_quantity: 25_000,
            percent: 4.0,
        },
    ],
    board_rate_per_kg: 1.10,
});

fn paper_rate(
    stock: crate::spec::PaperStock,
    gsm: f64,
    landed: f64,
    charge: f64,
) -> PaperRate {
    PaperRate {
        stock,
        gsm,
        landed_cost_per_ream: landed,
        charge_per_ream: charge,
    }
}

fn finishing_rate(finish: FinishingType, rate_per_copy: f64, minimum_order: f64) -> FinishingRate {
    FinishingRate {
        finish,
        rate_per_copy,
        minimum_order,
    }
}
