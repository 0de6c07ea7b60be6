//! Packing and freight rate tables.
//!
//! Packing is priced per carton and per pallet with fixed capacity
//! assumptions; freight is priced per destination route with a basis that
//! depends on how the route moves (per tonne by sea/surface, per kg by air,
//! per pallet for groupage). Overseas routes add fixed clearance and
//! documentation charges.

use serde::{Deserialize, Serialize};

/// Packing rates and capacity assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingRates {
    /// Cost of one carton (board, strapping, labor)
    pub carton_rate: f64,
    /// Cost of one pallet (pallet, wrap, banding)
    pub pallet_rate: f64,
    /// Weight a carton may carry (kg)
    pub carton_capacity_kg: f64,
    /// Never pack more copies than this in one carton, however light
    pub max_copies_per_carton: u32,
    /// Cartons stacked per pallet
    pub cartons_per_pallet: u32,
}

/// How a route charges freight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "rate", rename_all = "snake_case")]
pub enum FreightBasis {
    /// Sea or surface: rate per metric tonne
    PerTonne(f64),
    /// Air: rate per kilogram
    PerKg(f64),
    /// Groupage: rate per pallet
    PerPallet(f64),
}

/// One destination route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightRoute {
    /// Route name matched against the job's destination
    pub route: String,
    /// Overseas routes attract clearance and documentation charges
    pub overseas: bool,
    pub basis: FreightBasis,
    /// Fixed customs clearance charge (overseas only)
    pub clearance_fee: f64,
    /// Fixed export documentation charge (overseas only)
    pub documentation_fee: f64,
}

/// Resolve a destination name against the route table (case-insensitive,
/// last entry extrapolates). `None` only for an empty table.
pub fn resolve_route<'a>(routes: &'a [FreightRoute], destination: &str) -> Option<&'a FreightRoute> {
    let wanted = destination.trim();
    routes
        .iter()
        .find(|r| r.route.eq_ignore_ascii_case(wanted))
        .or_else(|| routes.last())
}
