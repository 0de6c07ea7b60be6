//! # Geometry Derivation
//!
//! Spine thickness and book weight from the physical specification. Both are
//! pure functions of explicit inputs: all paper properties arrive on the
//! specification itself, nothing is read from a registry.
//!
//! Weight uses the paper area-weight formula throughout: an element's weight
//! in grams is its page (face) count × grammage × trim area in m².
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::geometry;
//! # use quote_core::spec::*;
//! # let spec = JobSpecification {
//! #     trim_width_mm: 153.0,
//! #     trim_height_mm: 234.0,
//! #     sections: vec![TextSection {
//! #         enabled: true,
//! #         label: "Text".to_string(),
//! #         pages: 256,
//! #         paper_gsm: 130.0,
//! #         paper_stock: PaperStock::MattArt,
//! #         machine: None,
//! #         colors_front: 4,
//! #         colors_back: 4,
//! #         printing_method: PrintingMethod::Sheetwise,
//! #     }],
//! #     cover: None,
//! #     endleaves: None,
//! #     jacket: None,
//! #     board: None,
//! #     binding: BindingType::PerfectBinding,
//! #     finishing: vec![],
//! #     destination: "Domestic".to_string(),
//! #     quantities: vec![5000],
//! #     pricing: PricingConfig {
//! #         mode: PricingMode::Margin,
//! #         percent: 20.0,
//! #         turnaround: Turnaround::Standard,
//! #         tax_rate_percent: 0.0,
//! #         minimum_order_value: 0.0,
//! #         currency: "USD".to_string(),
//! #     },
//! # };
//! let result = geometry::derive(&spec);
//! assert!(result.spine_thickness_mm > 15.0);
//! assert!(result.unit_weight_g > 1000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::spec::JobSpecification;

/// Page faces a cover contributes to the weight sum (outside/inside, front
/// and back panel)
const COVER_FACES: f64 = 4.0;

/// Dust jacket flap width (mm), folded inside each board
const JACKET_FLAP_MM: f64 = 80.0;

/// Bleed/turn-in allowance added to a jacket's height (mm)
const JACKET_BLEED_ALLOWANCE_MM: f64 = 10.0;

/// Hinge and turn-in allowance added to a cover's width (mm)
const COVER_HINGE_ALLOWANCE_MM: f64 = 16.0;

/// Bleed allowance added to a cover's height (mm)
const COVER_BLEED_ALLOWANCE_MM: f64 = 6.0;

/// Greyboard density for case board weight (kg/m³)
const BOARD_DENSITY_KG_M3: f64 = 620.0;

/// Derived physical geometry for one copy of the book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    /// Spine thickness across all enabled sections plus endleaves (mm)
    pub spine_thickness_mm: f64,
    /// Weight of one finished copy (g)
    pub unit_weight_g: f64,
    /// Text block contribution (g)
    pub text_weight_g: f64,
    /// Cover contribution (g)
    pub cover_weight_g: f64,
    /// Endleaves contribution (g)
    pub endleaves_weight_g: f64,
    /// Dust jacket contribution (g)
    pub jacket_weight_g: f64,
    /// Case board contribution (g)
    pub board_weight_g: f64,
}

/// Spine thickness in mm: each enabled section contributes
/// `(pages / 2) × caliper(gsm, stock)`, plus the endleaves' leaves.
pub fn spine_thickness_mm(spec: &JobSpecification) -> f64 {
    let mut spine = 0.0;
    for section in spec.enabled_sections() {
        let leaves = section.pages as f64 / 2.0;
        spine += leaves * section.paper_stock.caliper_mm(section.paper_gsm);
    }
    if let Some(endleaves) = &spec.endleaves {
        spine += endleaves.leaves_per_copy as f64
            * endleaves.paper_stock.caliper_mm(endleaves.paper_gsm);
    }
    spine
}

/// Flat cover piece (width, height) in mm: wraps both boards and the spine
/// with hinge and bleed allowances.
pub fn cover_piece_mm(spec: &JobSpecification, spine_mm: f64) -> (f64, f64) {
    (
        2.0 * spec.trim_width_mm + spine_mm + COVER_HINGE_ALLOWANCE_MM,
        spec.trim_height_mm + COVER_BLEED_ALLOWANCE_MM,
    )
}

/// Flat jacket piece (width, height) in mm: the cover wrap plus both flaps.
pub fn jacket_piece_mm(spec: &JobSpecification, spine_mm: f64) -> (f64, f64) {
    (
        2.0 * spec.trim_width_mm + spine_mm + 2.0 * JACKET_FLAP_MM,
        spec.trim_height_mm + JACKET_BLEED_ALLOWANCE_MM,
    )
}

/// Derive spine and per-copy weight for a specification.
pub fn derive(spec: &JobSpecification) -> GeometryResult {
    let spine = spine_thickness_mm(spec);
    let trim_area = spec.trim_area_m2();

    let text_weight_g: f64 = spec
        .enabled_sections()
        .map(|s| s.pages as f64 * s.paper_gsm * trim_area)
        .sum();

    let cover_weight_g = spec
        .cover
        .as_ref()
        .map(|c| COVER_FACES * c.paper_gsm * trim_area)
        .unwrap_or(0.0);

    let endleaves_weight_g = spec
        .endleaves
        .as_ref()
        .map(|e| {
            let pages = e.leaves_per_copy as f64 * 2.0;
            pages * e.paper_gsm * trim_area
        })
        .unwrap_or(0.0);

    let jacket_weight_g = spec
        .jacket
        .as_ref()
        .map(|j| {
            let (w, h) = jacket_piece_mm(spec, spine);
            w / 1000.0 * (h / 1000.0) * j.paper_gsm
        })
        .unwrap_or(0.0);

    let board_weight_g = spec
        .board
        .as_ref()
        .map(|b| {
            // Two boards, each the trim area, thickness in meters
            2.0 * trim_area * (b.thickness_mm / 1000.0) * BOARD_DENSITY_KG_M3 * 1000.0
        })
        .unwrap_or(0.0);

    GeometryResult {
        spine_thickness_mm: spine,
        unit_weight_g: text_weight_g
            + cover_weight_g
            + endleaves_weight_g
            + jacket_weight_g
            + board_weight_g,
        text_weight_g,
        cover_weight_g,
        endleaves_weight_g,
        jacket_weight_g,
        board_weight_g,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::*;

    fn base_spec() -> JobSpecification {
        JobSpecification {
            trim_width_mm: 153.0,
            trim_height_mm: 234.0,
            sections: vec![TextSection {
                enabled: true,
                label: "Text".to_string(),
                pages: 256,
                paper_gsm: 130.0,
                paper_stock: PaperStock::MattArt,
                machine: None,
                colors_front: 4,
                colors_back: 4,
                printing_method: PrintingMethod::Sheetwise,
            }],
            cover: Some(CoverSpecification {
                paper_gsm: 300.0,
                paper_stock: PaperStock::ArtCard,
                colors_outside: 4,
                colors_inside: 0,
                machine: None,
                lamination: None,
            }),
            endleaves: None,
            jacket: None,
            board: None,
            binding: BindingType::PerfectBinding,
            finishing: vec![],
            destination: "Domestic".to_string(),
            quantities: vec![5000],
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
    fn test_spine_thickness() {
        let spec = base_spec();
        // 128 leaves x 130gsm x 0.00095 mm/gsm = 15.808 mm
        let spine = spine_thickness_mm(&spec);
        assert!((spine - 15.808).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_sections_do_not_contribute() {
        let mut spec = base_spec();
        spec.sections.push(TextSection {
            enabled: false,
            label: "Plates".to_string(),
            pages: 32,
            paper_gsm: 170.0,
            paper_stock: PaperStock::GlossArt,
            machine: None,
            colors_front: 4,
            colors_back: 4,
            printing_method: PrintingMethod::Sheetwise,
        });
        assert_eq!(
            spine_thickness_mm(&spec),
            spine_thickness_mm(&base_spec())
        );
    }

    #[test]
    fn test_endleaves_thicken_spine() {
        let mut spec = base_spec();
        spec.endleaves = Some(EndleavesSpecification {
            paper_gsm: 140.0,
            paper_stock: PaperStock::Woodfree,
            leaves_per_copy: 4,
        });
        assert!(spine_thickness_mm(&spec) > spine_thickness_mm(&base_spec()));
    }

    #[test]
    fn test_text_weight_area_formula() {
        let result = derive(&base_spec());
        // 256 pages x 130 gsm x (0.153 x 0.234) m2
        assert!((result.text_weight_g - 1191.49).abs() < 0.01);
    }

    #[test]
    fn test_cover_weight() {
        let result = derive(&base_spec());
        // 4 faces x 300 gsm x trim area
        assert!((result.cover_weight_g - 42.96).abs() < 0.01);
    }

    #[test]
    fn test_unit_weight_sums_contributions() {
        let mut spec = base_spec();
        spec.jacket = Some(JacketSpecification {
            paper_gsm: 130.0,
            paper_stock: PaperStock::GlossArt,
            colors: 4,
            lamination: None,
        });
        spec.board = Some(BoardSpecification { thickness_mm: 2.5 });
        let result = derive(&spec);
        let sum = result.text_weight_g
            + result.cover_weight_g
            + result.endleaves_weight_g
            + result.jacket_weight_g
            + result.board_weight_g;
        assert!((result.unit_weight_g - sum).abs() < 1e-9);
        assert!(result.jacket_weight_g > 0.0);
        assert!(result.board_weight_g > 0.0);
    }

    #[test]
    fn test_board_weight() {
        let mut spec = base_spec();
        spec.board = Some(BoardSpecification { thickness_mm: 2.0 });
        let result = derive(&spec);
        // 2 boards x 0.035802 m2 x 0.002 m x 620 kg/m3 = 0.0888 kg
        assert!((result.board_weight_g - 88.79).abs() < 0.1);
    }

    #[test]
    fn test_cover_piece_grows_with_spine() {
        let spec = base_spec();
        let (w_thin, _) = cover_piece_mm(&spec, 5.0);
        let (w_thick, _) = cover_piece_mm(&spec, 25.0);
        assert_eq!(w_thick - w_thin, 20.0);
    }
}
