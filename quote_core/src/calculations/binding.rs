//! # Binding Cost Calculator
//!
//! A strategy over the closed set of binding methods. Each variant resolves
//! its own tier table and builds a per-copy rate; the job pays
//! `per_copy × quantity` plus one flat setup.
//!
//! - Perfect binding: per-signature binding + gathering rates
//! - Saddle stitching: flat per-copy rate, page count does not enter
//! - Section sewn hardcase: per-signature sewing + case-making per copy
//!   (plus board, priced by weight, when the job carries one)
//! - Wire-o: tiered by the wire diameter the spine needs

use serde::{Deserialize, Serialize};

use super::round2;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::{binding::resolve_wire_tier, resolve_by_quantity, RateTables};
use crate::spec::BindingType;

/// Extra wire diameter over the spine so the loops close freely (mm)
pub const WIRE_LOOP_ALLOWANCE_MM: f64 = 3.0;

/// Pages per gathered signature
const PAGES_PER_SIGNATURE: u32 = 16;

/// Costed binding for one quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingResult {
    /// Rate per copy before setup
    pub per_copy: f64,
    /// Flat setup, charged once
    pub setup: f64,
    /// Signatures gathered per copy
    pub signatures: u32,
    /// Wire diameter resolved for wire-o work (mm)
    pub wire_diameter_mm: Option<f64>,
    /// `per_copy × quantity + setup`, rounded to 2 decimals
    pub total: f64,
}

/// Cost the binding for `quantity` copies.
///
/// `board_weight_g` is the per-copy case board weight from geometry; it only
/// enters for hardcase work.
pub fn binding_cost(
    binding: BindingType,
    total_pages: u32,
    quantity: u32,
    spine_thickness_mm: f64,
    board_weight_g: f64,
    tables: &RateTables,
) -> EstimateResult<BindingResult> {
    let signatures = total_pages.div_ceil(PAGES_PER_SIGNATURE);

    let (per_copy, setup, wire_diameter_mm) = match binding {
        BindingType::PerfectBinding => {
            let tier = resolve_by_quantity(&tables.perfect_binding, quantity, |t| &t.range)
                .ok_or_else(|| empty_table("perfect binding"))?;
            let per_copy =
                signatures as f64 * tier.rate_per_16pp + signatures as f64 * tier.gathering_per_16pp;
            (per_copy, tier.setup, None)
        }
        BindingType::SaddleStitching => {
            let tier = resolve_by_quantity(&tables.saddle_stitching, quantity, |t| &t.range)
                .ok_or_else(|| empty_table("saddle stitching"))?;
            (tier.rate_per_copy, tier.setup, None)
        }
        BindingType::SectionSewnHardcase => {
            let tier = resolve_by_quantity(&tables.hardcase, quantity, |t| &t.range)
                .ok_or_else(|| empty_table("hardcase"))?;
            let board_per_copy = board_weight_g / 1000.0 * tables.board_rate_per_kg;
            let per_copy =
                signatures as f64 * tier.sewing_per_16pp + tier.case_per_copy + board_per_copy;
            (per_copy, tier.setup, None)
        }
        BindingType::WireO => {
            let diameter = spine_thickness_mm + WIRE_LOOP_ALLOWANCE_MM;
            let tier = resolve_wire_tier(&tables.wire_o, diameter)
                .ok_or_else(|| empty_table("wire-o"))?;
            (tier.rate_per_copy, tier.setup, Some(diameter))
        }
    };

    Ok(BindingResult {
        per_copy,
        setup,
        signatures,
        wire_diameter_mm,
        total: round2(per_copy * quantity as f64 + setup),
    })
}

fn empty_table(which: &str) -> EstimateError {
    EstimateError::calculation_failed("binding", format!("{} tier table is empty", which))
}
