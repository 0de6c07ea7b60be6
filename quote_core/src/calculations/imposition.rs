//! # Imposition Resolver
//!
//! How many page images of the trim fit a press sheet, how many whole forms
//! the sheet carries, and how many forms the job needs.
//!
//! `ups` here is the number of complete copies of one form a sheet carries:
//! a sheet holding 16 page images per side holds 32 images over both sides,
//! which is two full 16-page forms. That definition is what makes
//! `gross_sheets_per_form = ceil((quantity + wastage) / ups)` dimensionally
//! consistent.
//!
//! A trim/press combination that cannot carry even one complete form is
//! infeasible and fails before any costing runs - it is never silently
//! floored to 1.

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::rates::MachineClass;

/// Pages imposed on one form (front and back of one press sheet section)
pub const PAGES_PER_FORM: u32 = 16;

/// Default gripper margin when no machine profile supplies geometry (mm)
const DEFAULT_GRIPPER_MARGIN_MM: f64 = 12.0;

/// Default trim/edge margin when no machine profile supplies geometry (mm)
const DEFAULT_EDGE_MARGIN_MM: f64 = 8.0;

/// Result of imposing one section on a press sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpositionResult {
    /// Page images of the trim that fit one side of the sheet
    pub images_per_side: u32,
    /// Whole copies of a form per sheet: `(2 × images_per_side) / 16`
    pub ups: u32,
    /// Forms (signatures) needed to carry the section's pages
    pub number_of_forms: u32,
}

/// Usable sheet (width, height) in mm for a machine class when no profile
/// supplies real geometry.
pub fn default_usable_sheet_mm(class: MachineClass) -> (f64, f64) {
    let (w, h) = class.sheet_size_mm();
    (
        w - 2.0 * DEFAULT_EDGE_MARGIN_MM,
        h - DEFAULT_GRIPPER_MARGIN_MM - DEFAULT_EDGE_MARGIN_MM,
    )
}

/// How many pieces of `piece_w × piece_h` fit one side of a
/// `usable_w × usable_h` sheet, trying both orientations.
pub fn pieces_per_sheet(piece_w: f64, piece_h: f64, usable_w: f64, usable_h: f64) -> u32 {
    if piece_w <= 0.0 || piece_h <= 0.0 || usable_w <= 0.0 || usable_h <= 0.0 {
        return 0;
    }
    let upright = (usable_w / piece_w).floor() * (usable_h / piece_h).floor();
    let rotated = (usable_w / piece_h).floor() * (usable_h / piece_w).floor();
    upright.max(rotated) as u32
}

/// Impose a section of `pages` pages of the given trim on a sheet.
///
/// Fails with a calculation error naming this stage when the sheet cannot
/// carry one complete form.
pub fn impose(
    trim_width_mm: f64,
    trim_height_mm: f64,
    pages: u32,
    usable_width_mm: f64,
    usable_height_mm: f64,
) -> EstimateResult<ImpositionResult> {
    let images_per_side = pieces_per_sheet(trim_width_mm, trim_height_mm, usable_width_mm, usable_height_mm);
    let ups = images_per_side * 2 / PAGES_PER_FORM;
    if ups == 0 {
        return Err(EstimateError::calculation_failed(
            "imposition",
            format!(
                "trim {}x{} mm yields no complete {}-page form on a {}x{} mm sheet",
                trim_width_mm, trim_height_mm, PAGES_PER_FORM, usable_width_mm, usable_height_mm
            ),
        ));
    }
    Ok(ImpositionResult {
        images_per_side,
        ups,
        number_of_forms: pages.div_ceil(PAGES_PER_FORM),
    })
}

/// Press sheets per form to yield `quantity` good copies given the wastage
/// allowance: `ceil((quantity + wastage) / ups)`.
pub fn gross_sheets_per_form(quantity: u32, wastage_per_form: f64, ups: u32) -> u64 {
    ((quantity as f64 + wastage_per_form) / ups as f64).ceil() as u64
}
