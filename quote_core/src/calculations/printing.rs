//! # Printing Cost Calculator
//!
//! Plates, impressions, and printing + make-ready money for one imposed
//! element (a text section's forms, or a cover/jacket run).
//!
//! Costing takes one of two mutually exclusive paths:
//!
//! - **Machine physics** - the resolved profile has a positive rated speed:
//!   running hours × the press's all-in hourly cost, with make-ready built
//!   from the profile's flat cost and make-ready time.
//! - **Legacy table** - no usable profile: rate per 1,000 impressions from
//!   the impression-rate table, bucketed by impressions per form and the
//!   machine's format class, with the class default make-ready per form.
//!
//! The profile is an explicit parameter. The calculator never resolves
//! machine ids itself and never touches a store.
//!
//! Monetary outputs are rounded to 2 decimals here, at the calculator
//! boundary, never on intermediates.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::{ImpressionRateTable, MachineClass, MachineProfile};
use crate::spec::PrintingMethod;

/// Plate and impression arithmetic plus costed output for one print run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintingResult {
    /// Plates per form under the chosen printing method
    pub plates_per_form: u32,
    /// Plates across all forms
    pub total_plates: u32,
    /// Press passes per form (gross sheets per form)
    pub impressions_per_form: u64,
    /// Passes across all forms
    pub total_impressions: u64,
    /// Impressions actually charged; a perfector halves the total
    pub effective_impressions: u64,
    /// Printing (running) cost, rounded to 2 decimals
    pub printing_cost: f64,
    /// Make-ready cost across all forms, rounded to 2 decimals
    pub make_ready_cost: f64,
    /// Rate per 1,000 impressions: resolved on the legacy path,
    /// back-computed for display on the physics path
    pub rate_per_1000: f64,
    /// Which path costed this run
    pub physics_path: bool,
}

/// Plates per form for a printing method and color counts.
///
/// Sheetwise and perfector presses burn a plate set per side; work-and-turn
/// and work-and-tumble print both sides from one set, so the larger side
/// governs.
pub fn plates_per_form(method: PrintingMethod, colors_front: u8, colors_back: u8) -> u32 {
    match method {
        PrintingMethod::Sheetwise | PrintingMethod::Perfector => {
            colors_front as u32 + colors_back as u32
        }
        PrintingMethod::WorkAndTurn | PrintingMethod::WorkAndTumble => {
            colors_front.max(colors_back) as u32
        }
    }
}

/// Cost one print run.
///
/// `gross_sheets_per_form` comes from the imposition/wastage stage;
/// `profile` is the already-resolved machine (or `None` to force the legacy
/// path); `class` backs the legacy table lookup and its defaults.
pub fn printing_cost(
    number_of_forms: u32,
    gross_sheets_per_form: u64,
    colors_front: u8,
    colors_back: u8,
    method: PrintingMethod,
    profile: Option<&MachineProfile>,
    class: MachineClass,
    impressions: &ImpressionRateTable,
) -> EstimateResult<PrintingResult> {
    let plates = plates_per_form(method, colors_front, colors_back);
    let total_plates = plates * number_of_forms;

    let impressions_per_form = gross_sheets_per_form;
    let total_impressions = impressions_per_form * number_of_forms as u64;
    let effective_impressions = match method {
        // Both sides in one pass: half the passes do the same work
        PrintingMethod::Perfector => total_impressions.div_ceil(2),
        _ => total_impressions,
    };

    let (printing_cost, make_ready_cost, rate_per_1000, physics) = match profile {
        Some(machine) if machine.uses_physics() => {
            let hourly_cost = machine.hourly_cost();
            let running_hours = effective_impressions as f64 / machine.speed_sheets_per_hour;
            let printing = running_hours * hourly_cost;
            let make_ready_per_form =
                machine.make_ready_flat + machine.make_ready_hours * hourly_cost;
            let make_ready = make_ready_per_form * number_of_forms as f64;
            let synthetic_rate = if effective_impressions > 0 {
                printing / effective_impressions as f64 * 1000.0
            } else {
                0.0
            };
            (printing, make_ready, synthetic_rate, true)
        }
        _ => {
            let per_form = impressions_per_form.min(u32::MAX as u64) as u32;
            let rate = impressions.rate_per_1000(per_form, class).ok_or_else(|| {
                EstimateError::calculation_failed("printing", "impression rate table is empty")
            })?;
            let printing = effective_impressions as f64 / 1000.0 * rate;
            let make_ready = class.default_make_ready_per_form() * number_of_forms as f64;
            (printing, make_ready, rate, false)
        }
    };

    Ok(PrintingResult {
        plates_per_form: plates,
        total_plates,
        impressions_per_form,
        total_impressions,
        effective_impressions,
        printing_cost: round2(printing_cost),
        make_ready_cost: round2(make_ready_cost),
        rate_per_1000: round2(rate_per_1000),
        physics_path: physics,
    })
}
