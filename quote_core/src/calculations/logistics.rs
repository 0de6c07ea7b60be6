//! # Packing & Freight Calculator
//!
//! Converts quantity and unit weight into carton/pallet counts, prices the
//! packaging, and rates the freight for the job's destination route.
//!
//! Copies per carton come from the carton's weight capacity, clamped to at
//! least one copy and at most the packing table's hard cap. Overseas routes
//! add their fixed clearance and documentation charges on top of the rated
//! freight.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::{logistics::resolve_route, FreightBasis, RateTables};

/// Packing and freight for one quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsResult {
    pub copies_per_carton: u32,
    pub cartons: u32,
    pub pallets: u32,
    /// Consignment weight (kg)
    pub total_weight_kg: f64,
    /// Cartons + pallets priced from the packing table, 2 decimals
    pub packing_cost: f64,
    /// Route-rated freight plus overseas fixed charges, 2 decimals
    pub freight_cost: f64,
    /// Route the destination resolved to
    pub route: String,
}

/// Price packing and freight.
pub fn packing_and_freight(
    quantity: u32,
    unit_weight_g: f64,
    destination: &str,
    tables: &RateTables,
) -> EstimateResult<LogisticsResult> {
    if quantity == 0 {
        return Err(EstimateError::calculation_failed(
            "logistics",
            "quantity is zero",
        ));
    }
    if unit_weight_g <= 0.0 || !unit_weight_g.is_finite() {
        return Err(EstimateError::calculation_failed(
            "logistics",
            format!("unit weight is not positive ({} g)", unit_weight_g),
        ));
    }

    let packing = &tables.packing;
    let by_weight = (packing.carton_capacity_kg * 1000.0 / unit_weight_g).floor() as u32;
    let copies_per_carton = by_weight.clamp(1, packing.max_copies_per_carton.max(1));
    let cartons = quantity.div_ceil(copies_per_carton);
    let pallets = cartons.div_ceil(packing.cartons_per_pallet.max(1));
    let packing_cost =
        cartons as f64 * packing.carton_rate + pallets as f64 * packing.pallet_rate;

    let route = resolve_route(&tables.freight, destination).ok_or_else(|| {
        EstimateError::calculation_failed("logistics", "freight route table is empty")
    })?;

    let total_weight_kg = quantity as f64 * unit_weight_g / 1000.0;
    let rated = match route.basis {
        FreightBasis::PerTonne(rate) => total_weight_kg / 1000.0 * rate,
        FreightBasis::PerKg(rate) => total_weight_kg * rate,
        FreightBasis::PerPallet(rate) => pallets as f64 * rate,
    };
    let fixed = if route.overseas {
        route.clearance_fee + route.documentation_fee
    } else {
        0.0
    };

    Ok(LogisticsResult {
        copies_per_carton,
        cartons,
        pallets,
        total_weight_kg,
        packing_cost: round2(packing_cost),
        freight_cost: round2(rated + fixed),
        route: route.route.clone(),
    })
}
