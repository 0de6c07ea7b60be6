//! # Specification Validator
//!
//! Checks a [`RawJobSpecification`] against the business rules and produces
//! either a normalized [`JobSpecification`] or the complete list of
//! violations - never both, and never just the first problem found. A UI can
//! therefore show the user everything that is wrong in one pass.
//!
//! Disabled section rows are dropped without validation; a UI may hold
//! half-edited values in rows the user has switched off.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::spec::RawJobSpecification;
//! use quote_core::validate::validate;
//!
//! let raw = RawJobSpecification::default();
//! let violations = validate(&raw).unwrap_err();
//! assert!(violations.iter().any(|v| v.contains("trim width")));
//! ```

use crate::errors::{EstimateError, EstimateResult};
use crate::spec::{
    BindingType, BoardSpecification, CoverSpecification, EndleavesSpecification, FinishingType,
    JacketSpecification, JobSpecification, PaperStock, PricingConfig, PricingMode,
    PrintingMethod, RawJobSpecification, TextSection, Turnaround,
};

/// Upper bound on trim dimensions (mm)
const MAX_TRIM_MM: f64 = 1000.0;
/// Upper bound on a section's page count
const MAX_PAGES: u32 = 5000;
/// Upper bound on a candidate quantity
const MAX_QUANTITY: u32 = 1_000_000;
/// Upper bound on text paper grammage
const MAX_TEXT_GSM: f64 = 600.0;
/// Upper bound on cover/jacket grammage
const MAX_COVER_GSM: f64 = 800.0;
/// Upper bound on case board thickness (mm)
const MAX_BOARD_MM: f64 = 6.0;

/// Validate and normalize a raw specification.
///
/// Returns the normalized specification, or the full list of rule
/// violations. An empty violation list is never returned as an error.
pub fn validate(raw: &RawJobSpecification) -> Result<JobSpecification, Vec<String>> {
    let mut violations = Vec::new();

    let trim_width = parse_number("trim width (mm)", &raw.trim_width_mm, &mut violations);
    let trim_height = parse_number("trim height (mm)", &raw.trim_height_mm, &mut violations);
    for (field, value) in [("trim width (mm)", trim_width), ("trim height (mm)", trim_height)] {
        if let Some(v) = value {
            if v <= 0.0 {
                violations.push(format!("{} must be positive (got {})", field, v));
            } else if v > MAX_TRIM_MM {
                violations.push(format!("{} must not exceed {} mm (got {})", field, MAX_TRIM_MM, v));
            }
        }
    }

    let sections = validate_sections(raw, &mut violations);
    let cover = raw
        .cover
        .as_ref()
        .map(|c| validate_cover(c, &mut violations));
    let endleaves = raw
        .endleaves
        .as_ref()
        .map(|e| validate_endleaves(e, &mut violations));
    let jacket = raw
        .jacket
        .as_ref()
        .map(|j| validate_jacket(j, &mut violations));
    let board = raw.board.as_ref().map(|b| validate_board(b, &mut violations));

    let binding = match BindingType::from_str_flexible(&raw.binding) {
        Some(b) => b,
        None => {
            if raw.binding.trim().is_empty() {
                violations.push("binding type is required".to_string());
            } else {
                violations.push(format!("unknown binding type \"{}\"", raw.binding));
            }
            BindingType::PerfectBinding
        }
    };

    let mut finishing = Vec::new();
    for name in &raw.finishing {
        match FinishingType::from_str_flexible(name) {
            Some(f) => finishing.push(f),
            None => violations.push(format!("unknown finishing option \"{}\"", name)),
        }
    }

    if raw.destination.trim().is_empty() {
        violations.push("destination is required".to_string());
    }

    let quantities = validate_quantities(raw, &mut violations);
    let pricing = validate_pricing(raw, &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(JobSpecification {
        trim_width_mm: trim_width.unwrap_or(0.0),
        trim_height_mm: trim_height.unwrap_or(0.0),
        sections,
        cover,
        endleaves,
        jacket,
        board,
        binding,
        finishing,
        destination: raw.destination.trim().to_string(),
        quantities,
        pricing,
    })
}

/// Validate and normalize, wrapping violations in [`EstimateError`].
pub fn normalize(raw: &RawJobSpecification) -> EstimateResult<JobSpecification> {
    validate(raw).map_err(EstimateError::validation_failed)
}

fn validate_sections(raw: &RawJobSpecification, violations: &mut Vec<String>) -> Vec<TextSection> {
    let enabled: Vec<_> = raw.sections.iter().filter(|s| s.enabled).collect();
    if enabled.is_empty() {
        violations.push("at least one enabled text section is required".to_string());
        return Vec::new();
    }

    let mut sections = Vec::with_capacity(enabled.len());
    for (index, section) in enabled.iter().enumerate() {
        let name = if section.label.trim().is_empty() {
            format!("section #{}", index + 1)
        } else {
            format!("section \"{}\"", section.label.trim())
        };

        let pages = parse_whole(&format!("{} pages", name), &section.pages, violations);
        if let Some(p) = pages {
            if p == 0 {
                violations.push(format!("{} pages must be positive", name));
            } else {
                if p % 4 != 0 {
                    violations.push(format!("{} pages must be a multiple of 4 (got {})", name, p));
                }
                if p > MAX_PAGES {
                    violations.push(format!("{} pages must not exceed {} (got {})", name, MAX_PAGES, p));
                }
            }
        }

        let gsm = parse_number(&format!("{} paper gsm", name), &section.paper_gsm, violations);
        if let Some(g) = gsm {
            if g <= 0.0 {
                violations.push(format!("{} paper gsm must be positive (got {})", name, g));
            } else if g > MAX_TEXT_GSM {
                violations.push(format!(
                    "{} paper gsm must not exceed {} for text stock (got {})",
                    name, MAX_TEXT_GSM, g
                ));
            }
        }

        let stock = parse_stock(&format!("{} paper stock", name), &section.paper_stock, violations);
        let colors_front = parse_colors(&format!("{} front colors", name), &section.colors_front, violations);
        let colors_back = parse_colors(&format!("{} back colors", name), &section.colors_back, violations);

        let printing_method = if section.printing_method.trim().is_empty() {
            PrintingMethod::Sheetwise
        } else {
            match PrintingMethod::from_str_flexible(&section.printing_method) {
                Some(m) => m,
                None => {
                    violations.push(format!(
                        "{} has unknown printing method \"{}\"",
                        name, section.printing_method
                    ));
                    PrintingMethod::Sheetwise
                }
            }
        };

        sections.push(TextSection {
            enabled: true,
            label: section.label.trim().to_string(),
            pages: pages.unwrap_or(0),
            paper_gsm: gsm.unwrap_or(0.0),
            paper_stock: stock.unwrap_or(PaperStock::Woodfree),
            machine: optional_string(&section.machine),
            colors_front: colors_front.unwrap_or(0),
            colors_back: colors_back.unwrap_or(0),
            printing_method,
        });
    }
    sections
}

fn validate_cover(
    raw: &crate::spec::RawCoverSpecification,
    violations: &mut Vec<String>,
) -> CoverSpecification {
    let gsm = parse_number("cover paper gsm", &raw.paper_gsm, violations);
    if let Some(g) = gsm {
        if g <= 0.0 {
            violations.push(format!("cover paper gsm must be positive (got {})", g));
        } else if g > MAX_COVER_GSM {
            violations.push(format!(
                "cover paper gsm must not exceed {} (got {})",
                MAX_COVER_GSM, g
            ));
        }
    }
    let stock = parse_stock("cover paper stock", &raw.paper_stock, violations);
    let colors_outside = parse_colors("cover outside colors", &raw.colors_outside, violations);
    let colors_inside = parse_colors("cover inside colors", &raw.colors_inside, violations);
    let lamination = parse_lamination("cover lamination", &raw.lamination, violations);

    CoverSpecification {
        paper_gsm: gsm.unwrap_or(0.0),
        paper_stock: stock.unwrap_or(PaperStock::ArtCard),
        colors_outside: colors_outside.unwrap_or(0),
        colors_inside: colors_inside.unwrap_or(0),
        machine: optional_string(&raw.machine),
        lamination,
    }
}

fn validate_endleaves(
    raw: &crate::spec::RawEndleavesSpecification,
    violations: &mut Vec<String>,
) -> EndleavesSpecification {
    let gsm = parse_number("endleaves paper gsm", &raw.paper_gsm, violations);
    if let Some(g) = gsm {
        if g <= 0.0 {
            violations.push(format!("endleaves paper gsm must be positive (got {})", g));
        } else if g > MAX_TEXT_GSM {
            violations.push(format!(
                "endleaves paper gsm must not exceed {} (got {})",
                MAX_TEXT_GSM, g
            ));
        }
    }
    let stock = parse_stock("endleaves paper stock", &raw.paper_stock, violations);
    let leaves = parse_whole("endleaves leaves per copy", &raw.leaves_per_copy, violations);
    if let Some(l) = leaves {
        if !(1..=8).contains(&l) {
            violations.push(format!(
                "endleaves leaves per copy must be between 1 and 8 (got {})",
                l
            ));
        }
    }

    EndleavesSpecification {
        paper_gsm: gsm.unwrap_or(0.0),
        paper_stock: stock.unwrap_or(PaperStock::Woodfree),
        leaves_per_copy: leaves.unwrap_or(0),
    }
}

fn validate_jacket(
    raw: &crate::spec::RawJacketSpecification,
    violations: &mut Vec<String>,
) -> JacketSpecification {
    let gsm = parse_number("jacket paper gsm", &raw.paper_gsm, violations);
    if let Some(g) = gsm {
        if g <= 0.0 {
            violations.push(format!("jacket paper gsm must be positive (got {})", g));
        } else if g > MAX_COVER_GSM {
            violations.push(format!(
                "jacket paper gsm must not exceed {} (got {})",
                MAX_COVER_GSM, g
            ));
        }
    }
    let stock = parse_stock("jacket paper stock", &raw.paper_stock, violations);
    let colors = parse_colors("jacket colors", &raw.colors, violations);
    let lamination = parse_lamination("jacket lamination", &raw.lamination, violations);

    JacketSpecification {
        paper_gsm: gsm.unwrap_or(0.0),
        paper_stock: stock.unwrap_or(PaperStock::GlossArt),
        colors: colors.unwrap_or(0),
        lamination,
    }
}

fn validate_board(
    raw: &crate::spec::RawBoardSpecification,
    violations: &mut Vec<String>,
) -> BoardSpecification {
    let thickness = parse_number("board thickness (mm)", &raw.thickness_mm, violations);
    if let Some(t) = thickness {
        if t <= 0.0 {
            violations.push(format!("board thickness (mm) must be positive (got {})", t));
        } else if t > MAX_BOARD_MM {
            violations.push(format!(
                "board thickness (mm) must not exceed {} (got {})",
                MAX_BOARD_MM, t
            ));
        }
    }
    BoardSpecification {
        thickness_mm: thickness.unwrap_or(0.0),
    }
}

fn validate_quantities(raw: &RawJobSpecification, violations: &mut Vec<String>) -> Vec<u32> {
    if raw.quantities.is_empty() {
        violations.push("at least one candidate quantity is required".to_string());
        return Vec::new();
    }

    let mut quantities = Vec::with_capacity(raw.quantities.len());
    for (index, value) in raw.quantities.iter().enumerate() {
        let field = format!("quantity #{}", index + 1);
        if let Some(q) = parse_whole(&field, value, violations) {
            if q == 0 {
                violations.push(format!("{} must be positive", field));
            } else if q > MAX_QUANTITY {
                violations.push(format!(
                    "{} must not exceed {} (got {})",
                    field, MAX_QUANTITY, q
                ));
            }
            quantities.push(q);
        } else {
            quantities.push(0);
        }
    }
    quantities
}

fn validate_pricing(raw: &RawJobSpecification, violations: &mut Vec<String>) -> PricingConfig {
    let pricing = &raw.pricing;

    let mode = match PricingMode::from_str_flexible(&pricing.mode) {
        Some(m) => m,
        None => {
            if pricing.mode.trim().is_empty() {
                violations.push("pricing mode is required (margin or markup)".to_string());
            } else {
                violations.push(format!("unknown pricing mode \"{}\"", pricing.mode));
            }
            PricingMode::Margin
        }
    };

    let percent = parse_number("margin/markup percent", &pricing.percent, violations);
    if let Some(p) = percent {
        if !(0.0..100.0).contains(&p) {
            violations.push(format!(
                "margin/markup percent must be at least 0 and below 100 (got {}); margin inversion is undefined at 100",
                p
            ));
        }
    }

    let turnaround = match Turnaround::from_str_flexible(&pricing.turnaround) {
        Some(t) => t,
        None => {
            if pricing.turnaround.trim().is_empty() {
                violations.push("turnaround is required (standard, rush, or express)".to_string());
            } else {
                violations.push(format!("unknown turnaround \"{}\"", pricing.turnaround));
            }
            Turnaround::Standard
        }
    };

    let tax = parse_number("tax rate percent", &pricing.tax_rate_percent, violations);
    if let Some(t) = tax {
        if !(0.0..=100.0).contains(&t) {
            violations.push(format!(
                "tax rate percent must be between 0 and 100 (got {})",
                t
            ));
        }
    }

    // Optional with defaults: a blank minimum order means "no floor".
    let minimum_order = if pricing.minimum_order_value.trim().is_empty() {
        0.0
    } else {
        let v = parse_number("minimum order value", &pricing.minimum_order_value, violations);
        if let Some(m) = v {
            if m < 0.0 {
                violations.push(format!("minimum order value must not be negative (got {})", m));
            }
        }
        v.unwrap_or(0.0)
    };

    let currency = if pricing.currency.trim().is_empty() {
        "USD".to_string()
    } else {
        pricing.currency.trim().to_uppercase()
    };

    PricingConfig {
        mode,
        percent: percent.unwrap_or(0.0),
        turnaround,
        tax_rate_percent: tax.unwrap_or(0.0),
        minimum_order_value: minimum_order,
        currency,
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

fn parse_number(field: &str, raw: &str, violations: &mut Vec<String>) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        violations.push(format!("{} is required", field));
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            violations.push(format!("{} must be a number (got \"{}\")", field, trimmed));
            None
        }
    }
}

fn parse_whole(field: &str, raw: &str, violations: &mut Vec<String>) -> Option<u32> {
    let v = parse_number(field, raw, violations)?;
    if v.fract() != 0.0 {
        violations.push(format!(
            "{} must be a whole number (got \"{}\")",
            field,
            raw.trim()
        ));
        return None;
    }
    if v < 0.0 || v > u32::MAX as f64 {
        violations.push(format!("{} is out of range (got \"{}\")", field, raw.trim()));
        return None;
    }
    Some(v as u32)
}

fn parse_colors(field: &str, raw: &str, violations: &mut Vec<String>) -> Option<u8> {
    let v = parse_whole(field, raw, violations)?;
    if v > 4 {
        violations.push(format!("{} must be between 0 and 4 (got {})", field, v));
        return None;
    }
    Some(v as u8)
}

fn parse_stock(field: &str, raw: &str, violations: &mut Vec<String>) -> Option<PaperStock> {
    if raw.trim().is_empty() {
        violations.push(format!("{} is required", field));
        return None;
    }
    match PaperStock::from_str_flexible(raw) {
        Some(s) => Some(s),
        None => {
            violations.push(format!("{} is not a known stock (got \"{}\")", field, raw.trim()));
            None
        }
    }
}

fn parse_lamination(
    field: &str,
    raw: &str,
    violations: &mut Vec<String>,
) -> Option<FinishingType> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    match FinishingType::from_str_flexible(trimmed) {
        Some(f) if f.is_lamination() => Some(f),
        Some(f) => {
            violations.push(format!(
                "{} must be a lamination type, not {}",
                field,
                f.display_name()
            ));
            None
        }
        None => {
            violations.push(format!("{} is not a known lamination (got \"{}\")", field, trimmed));
            None
        }
    }
}

fn optional_string(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{RawCoverSpecification, RawPricingConfig, RawTextSection};

    fn sample_raw() -> RawJobSpecification {
        RawJobSpecification {
            trim_width_mm: "153".to_string(),
            trim_height_mm: "234".to_string(),
            sections: vec![RawTextSection {
                enabled: true,
                label: "Text".to_string(),
                pages: "256".to_string(),
                paper_gsm: "130".to_string(),
                paper_stock: "Matt Art".to_string(),
                machine: "sm102".to_string(),
                colors_front: "4".to_string(),
                colors_back: "4".to_string(),
                printing_method: "sheetwise".to_string(),
            }],
            cover: Some(RawCoverSpecification {
                paper_gsm: "300".to_string(),
                paper_stock: "Art Card".to_string(),
                colors_outside: "4".to_string(),
                colors_inside: "0".to_string(),
                machine: String::new(),
                lamination: "gloss".to_string(),
            }),
            endleaves: None,
            jacket: None,
            board: None,
            binding: "perfect_binding".to_string(),
            finishing: vec![],
            destination: "Domestic".to_string(),
            quantities: vec!["5000".to_string()],
            pricing: RawPricingConfig {
                mode: "margin".to_string(),
                percent: "20".to_string(),
                turnaround: "standard".to_string(),
                tax_rate_percent: "0".to_string(),
                minimum_order_value: String::new(),
                currency: String::new(),
            },
        }
    }

    #[test]
    fn test_valid_spec_normalizes() {
        let spec = validate(&sample_raw()).unwrap();
        assert_eq!(spec.trim_width_mm, 153.0);
        assert_eq!(spec.sections.len(), 1);
        assert_eq!(spec.sections[0].pages, 256);
        assert_eq!(spec.sections[0].paper_stock, PaperStock::MattArt);
        assert_eq!(spec.quantities, vec![5000]);
        assert_eq!(spec.pricing.currency, "USD");
        assert_eq!(
            spec.cover.as_ref().unwrap().lamination,
            Some(FinishingType::GlossLamination)
        );
    }

    #[test]
    fn test_fractional_quantity_rejected() {
        let mut raw = sample_raw();
        raw.quantities = vec!["1500.5".to_string()];
        let violations = validate(&raw).unwrap_err();
        assert!(violations
            .iter()
            .any(|v| v.contains("quantity") && v.contains("whole number")));
    }

    #[test]
    fn test_all_violations_collected() {
        let mut raw = sample_raw();
        raw.trim_width_mm = "-5".to_string();
        raw.sections[0].pages = "257".to_string();
        raw.sections[0].colors_front = "7".to_string();
        raw.pricing.percent = "100".to_string();
        let violations = validate(&raw).unwrap_err();
        assert!(violations.len() >= 4);
        assert!(violations.iter().any(|v| v.contains("trim width")));
        assert!(violations.iter().any(|v| v.contains("multiple of 4")));
        assert!(violations.iter().any(|v| v.contains("between 0 and 4")));
        assert!(violations.iter().any(|v| v.contains("below 100")));
    }

    #[test]
    fn test_margin_100_rejected() {
        let mut raw = sample_raw();
        raw.pricing.percent = "100".to_string();
        let violations = validate(&raw).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("undefined at 100")));
    }

    #[test]
    fn test_unparseable_number_reported_once() {
        let mut raw = sample_raw();
        raw.sections[0].paper_gsm = "abc".to_string();
        let violations = validate(&raw).unwrap_err();
        let gsm_violations: Vec<_> = violations
            .iter()
            .filter(|v| v.contains("paper gsm"))
            .collect();
        assert_eq!(gsm_violations.len(), 1);
    }

    #[test]
    fn test_disabled_sections_dropped() {
        let mut raw = sample_raw();
        raw.sections.push(RawTextSection {
            enabled: false,
            pages: "not a number".to_string(),
            ..RawTextSection::default()
        });
        let spec = validate(&raw).unwrap();
        assert_eq!(spec.sections.len(), 1);
    }

    #[test]
    fn test_no_enabled_sections() {
        let mut raw = sample_raw();
        raw.sections[0].enabled = false;
        let violations = validate(&raw).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("enabled text section")));
    }

    #[test]
    fn test_cover_lamination_must_be_lamination() {
        let mut raw = sample_raw();
        raw.cover.as_mut().unwrap().lamination = "spot uv".to_string();
        let violations = validate(&raw).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("lamination type")));
    }

    #[test]
    fn test_oversize_bounds() {
        let mut raw = sample_raw();
        raw.trim_width_mm = "1200".to_string();
        raw.sections[0].pages = "5004".to_string();
        raw.quantities = vec!["2000000".to_string()];
        let violations = validate(&raw).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("1000 mm")));
        assert!(violations.iter().any(|v| v.contains("5000")));
        assert!(violations.iter().any(|v| v.contains("1000000")));
    }

    #[test]
    fn test_normalize_wraps_in_error() {
        let raw = RawJobSpecification::default();
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert!(err.is_recoverable());
    }
}
