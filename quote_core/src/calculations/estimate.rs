//! # Estimation Orchestrator
//!
//! Runs the full pipeline once per requested quantity and collects the
//! results in input order. Runs are independent - nothing is shared or
//! mutated between quantities - and one failing run aborts the whole batch:
//! callers never receive a partial comparison table.
//!
//! The last step before a result is returned checks every numeric field for
//! finiteness; a non-finite value is a defect surfaced as a calculation
//! failure, never silently zeroed.
//!
//! ## Cost centers
//!
//! | center        | contents                                              |
//! |---------------|-------------------------------------------------------|
//! | paper         | text section sheets + endleaves, at charge-per-ream   |
//! | cover         | cover + jacket sheets and their run (printing) cost   |
//! | printing      | text section run cost                                 |
//! | plates        | every plate burned, at the machine's plate cost       |
//! | make-ready    | make-ready across all runs                            |
//! | binding       | binding strategy output                               |
//! | finishing     | lamination + finishing processes                      |
//! | packing       | cartons + pallets                                     |
//! | freight       | destination-rated freight                             |

use serde::{Deserialize, Serialize};

use super::geometry;
use super::imposition::{
    default_usable_sheet_mm, gross_sheets_per_form, impose, pieces_per_sheet,
};
use super::round2;
use super::{binding, finishing, logistics, pricing, printing};
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::{paper::reams, resolve_profile, ColorClass, MachineClass, MachineProfile, RateTables};
use crate::spec::{JobSpecification, PrintingMethod, RawJobSpecification};
use crate::validate;

/// Handling waste added to an endleaf cut (sheets)
const ENDLEAF_WASTE_SHEETS: u64 = 50;

/// The complete, itemized cost breakdown and price for one quantity.
///
/// Constructed once per (specification, quantity) pair and immutable after
/// construction; a recalculation produces a new result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// The candidate quantity this result was calculated for
    pub quantity: u32,
    /// Currency code declared by the pricing configuration
    pub currency: String,

    // === Cost Centers ===
    pub paper_cost: f64,
    pub cover_cost: f64,
    pub printing_cost: f64,
    pub plates_cost: f64,
    pub make_ready_cost: f64,
    pub binding_cost: f64,
    pub finishing_cost: f64,
    pub packing_cost: f64,
    pub freight_cost: f64,

    // === Pricing ===
    pub subtotal: f64,
    pub rush_surcharge: f64,
    pub volume_discount_percent: f64,
    pub volume_discount_amount: f64,
    pub minimum_order_adjustment: f64,
    pub production_subtotal: f64,
    pub sell_before_tax: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    pub cost_per_copy: f64,
    pub sell_per_copy: f64,

    // === Derived Quantities ===
    /// Reams consumed across every element
    pub reams: f64,
    pub total_plates: u32,
    pub total_impressions: u64,
    pub effective_impressions: u64,
    /// Blended rate per 1,000 effective impressions across all runs
    pub rate_per_1000: f64,
    /// Ups of the first enabled section
    pub ups: u32,
    /// Forms across all text sections
    pub number_of_forms: u32,
    pub spine_thickness_mm: f64,
    pub unit_weight_g: f64,
    pub total_weight_kg: f64,
    pub cartons: u32,
    pub pallets: u32,
}

impl CostResult {
    /// The nine cost centers in pipeline order, for itemized display
    pub fn cost_centers(&self) -> [(&'static str, f64); 9] {
        [
            ("Paper", self.paper_cost),
            ("Cover", self.cover_cost),
            ("Printing", self.printing_cost),
            ("Plates / CTP", self.plates_cost),
            ("Make-ready", self.make_ready_cost),
            ("Binding", self.binding_cost),
            ("Finishing", self.finishing_cost),
            ("Packing", self.packing_cost),
            ("Freight", self.freight_cost),
        ]
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 25] {
        [
            ("paper_cost", self.paper_cost),
            ("cover_cost", self.cover_cost),
            ("printing_cost", self.printing_cost),
            ("plates_cost", self.plates_cost),
            ("make_ready_cost", self.make_ready_cost),
            ("binding_cost", self.binding_cost),
            ("finishing_cost", self.finishing_cost),
            ("packing_cost", self.packing_cost),
            ("freight_cost", self.freight_cost),
            ("subtotal", self.subtotal),
            ("rush_surcharge", self.rush_surcharge),
            ("volume_discount_percent", self.volume_discount_percent),
            ("volume_discount_amount", self.volume_discount_amount),
            ("minimum_order_adjustment", self.minimum_order_adjustment),
            ("production_subtotal", self.production_subtotal),
            ("sell_before_tax", self.sell_before_tax),
            ("tax_amount", self.tax_amount),
            ("grand_total", self.grand_total),
            ("cost_per_copy", self.cost_per_copy),
            ("sell_per_copy", self.sell_per_copy),
            ("reams", self.reams),
            ("rate_per_1000", self.rate_per_1000),
            ("spine_thickness_mm", self.spine_thickness_mm),
            ("unit_weight_g", self.unit_weight_g),
            ("total_weight_kg", self.total_weight_kg),
        ]
    }

    /// Every numeric field must be finite; checked as the last step before a
    /// result leaves the engine.
    pub fn check_finite(&self) -> EstimateResult<()> {
        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(EstimateError::calculation_failed(
                    "result",
                    format!("{} is not finite ({})", name, value),
                ));
            }
        }
        Ok(())
    }
}

/// Validate a raw specification and estimate every requested quantity.
pub fn estimate_raw(
    raw: &RawJobSpecification,
    tables: &RateTables,
    machines: &[MachineProfile],
) -> EstimateResult<Vec<CostResult>> {
    let spec = validate::normalize(raw)?;
    estimate(&spec, tables, machines)
}

/// Estimate every requested quantity of a normalized specification.
///
/// Results are ordered to match `spec.quantities`. Any failing quantity
/// fails the whole batch.
pub fn estimate(
    spec: &JobSpecification,
    tables: &RateTables,
    machines: &[MachineProfile],
) -> EstimateResult<Vec<CostResult>> {
    spec.quantities
        .iter()
        .map(|&quantity| estimate_for_quantity(spec, quantity, tables, machines))
        .collect()
}

/// Run the full pipeline for a single quantity.
pub fn estimate_for_quantity(
    spec: &JobSpecification,
    quantity: u32,
    tables: &RateTables,
    machines: &[MachineProfile],
) -> EstimateResult<CostResult> {
    let geo = geometry::derive(spec);

    let mut paper_cost = 0.0;
    let mut cover_cost = 0.0;
    let mut text_run_cost = 0.0;
    let mut make_ready_cost = 0.0;
    let mut plates_cost = 0.0;
    let mut all_runs_cost = 0.0;
    let mut total_plates: u32 = 0;
    let mut total_impressions: u64 = 0;
    let mut effective_impressions: u64 = 0;
    let mut total_sheets: u64 = 0;
    let mut ups_headline: u32 = 0;
    let mut number_of_forms: u32 = 0;

    // --- Text sections ---
    for section in spec.enabled_sections() {
        let profile = resolve_profile(machines, section.machine.as_deref());
        let class = machine_class(profile, section.machine.as_deref());
        let (usable_w, usable_h) = usable_sheet(profile, class);

        let imposition = impose(
            spec.trim_width_mm,
            spec.trim_height_mm,
            section.pages,
            usable_w,
            usable_h,
        )?;
        if ups_headline == 0 {
            ups_headline = imposition.ups;
        }
        number_of_forms += imposition.number_of_forms;

        let wastage = tables
            .wastage
            .wastage_per_form(quantity, ColorClass::from_colors(section.effective_colors()))
            .ok_or_else(|| empty_table("wastage", "wastage chart"))?;
        let gross = gross_sheets_per_form(quantity, wastage, imposition.ups);

        let run = printing::printing_cost(
            imposition.number_of_forms,
            gross,
            section.colors_front,
            section.colors_back,
            section.printing_method,
            profile,
            class,
            &tables.impressions,
        )?;

        let sheets = gross * imposition.number_of_forms as u64;
        let rate = tables
            .paper
            .lookup(section.paper_stock, section.paper_gsm)
            .ok_or_else(|| empty_table("paper", "paper rate table"))?;
        paper_cost += reams(sheets) * rate.charge_per_ream;
        total_sheets += sheets;

        text_run_cost += run.printing_cost;
        make_ready_cost += run.make_ready_cost;
        all_runs_cost += run.printing_cost;
        plates_cost += run.total_plates as f64 * plate_cost(profile, class);
        total_plates += run.total_plates;
        total_impressions += run.total_impressions;
        effective_impressions += run.effective_impressions;
    }

    // --- Endleaves: cut, not printed ---
    if let Some(endleaves) = &spec.endleaves {
        let (usable_w, usable_h) = default_usable_sheet_mm(MachineClass::FullSize);
        let per_side = pieces_per_sheet(spec.trim_width_mm, spec.trim_height_mm, usable_w, usable_h);
        if per_side == 0 {
            return Err(EstimateError::calculation_failed(
                "imposition",
                "endleaf trim does not fit the cutting sheet",
            ));
        }
        let leaves = quantity as u64 * endleaves.leaves_per_copy as u64;
        let sheets = leaves.div_ceil(per_side as u64) + ENDLEAF_WASTE_SHEETS;
        let rate = tables
            .paper
            .lookup(endleaves.paper_stock, endleaves.paper_gsm)
            .ok_or_else(|| empty_table("paper", "paper rate table"))?;
        paper_cost += reams(sheets) * rate.charge_per_ream;
        total_sheets += sheets;
    }

    // --- Cover ---
    if let Some(cover) = &spec.cover {
        let profile = resolve_profile(machines, cover.machine.as_deref());
        let class = machine_class(profile, cover.machine.as_deref());
        let (usable_w, usable_h) = usable_sheet(profile, class);
        let (piece_w, piece_h) = geometry::cover_piece_mm(spec, geo.spine_thickness_mm);

        let cover_ups = pieces_per_sheet(piece_w, piece_h, usable_w, usable_h);
        if cover_ups == 0 {
            return Err(EstimateError::calculation_failed(
                "imposition",
                format!(
                    "cover piece {:.0}x{:.0} mm does not fit a {:.0}x{:.0} mm sheet",
                    piece_w, piece_h, usable_w, usable_h
                ),
            ));
        }
        let wastage = tables
            .wastage
            .wastage_per_form(quantity, ColorClass::from_colors(cover.effective_colors()))
            .ok_or_else(|| empty_table("wastage", "wastage chart"))?;
        let gross = gross_sheets_per_form(quantity, wastage, cover_ups);

        let run = printing::printing_cost(
            1,
            gross,
            cover.colors_outside,
            cover.colors_inside,
            PrintingMethod::Sheetwise,
            profile,
            class,
            &tables.impressions,
        )?;
        let rate = tables
            .paper
            .lookup(cover.paper_stock, cover.paper_gsm)
            .ok_or_else(|| empty_table("paper", "paper rate table"))?;

        cover_cost += reams(gross) * rate.charge_per_ream + run.printing_cost;
        make_ready_cost += run.make_ready_cost;
        all_runs_cost += run.printing_cost;
        plates_cost += run.total_plates as f64 * plate_cost(profile, class);
        total_plates += run.total_plates;
        total_impressions += run.total_impressions;
        effective_impressions += run.effective_impressions;
        total_sheets += gross;
    }

    // --- Dust jacket: joins the cover center ---
    if let Some(jacket) = &spec.jacket {
        let class = MachineClass::FullSize;
        let (usable_w, usable_h) = default_usable_sheet_mm(class);
        let (piece_w, piece_h) = geometry::jacket_piece_mm(spec, geo.spine_thickness_mm);

        let jacket_ups = pieces_per_sheet(piece_w, piece_h, usable_w, usable_h);
        if jacket_ups == 0 {
            return Err(EstimateError::calculation_failed(
                "imposition",
                format!(
                    "jacket piece {:.0}x{:.0} mm does not fit a {:.0}x{:.0} mm sheet",
                    piece_w, piece_h, usable_w, usable_h
                ),
            ));
        }
        let wastage = tables
            .wastage
            .wastage_per_form(quantity, ColorClass::from_colors(jacket.colors))
            .ok_or_else(|| empty_table("wastage", "wastage chart"))?;
        let gross = gross_sheets_per_form(quantity, wastage, jacket_ups);

        let run = printing::printing_cost(
            1,
            gross,
            jacket.colors,
            0,
            PrintingMethod::Sheetwise,
            None,
            class,
            &tables.impressions,
        )?;
        let rate = tables
            .paper
            .lookup(jacket.paper_stock, jacket.paper_gsm)
            .ok_or_else(|| empty_table("paper", "paper rate table"))?;

        cover_cost += reams(gross) * rate.charge_per_ream + run.printing_cost;
        make_ready_cost += run.make_ready_cost;
        all_runs_cost += run.printing_cost;
        plates_cost += run.total_plates as f64 * plate_cost(None, class);
        total_plates += run.total_plates;
        total_impressions += run.total_impressions;
        effective_impressions += run.effective_impressions;
        total_sheets += gross;
    }

    // --- Binding, finishing, logistics ---
    let binding = binding::binding_cost(
        spec.binding,
        spec.total_pages(),
        quantity,
        geo.spine_thickness_mm,
        geo.board_weight_g,
        tables,
    )?;
    let finishing = finishing::finishing_cost(spec, quantity, tables)?;
    let logistics = logistics::packing_and_freight(quantity, geo.unit_weight_g, &spec.destination, tables)?;

    // --- Pricing ---
    let paper_cost = round2(paper_cost);
    let cover_cost = round2(cover_cost);
    let printing_cost = round2(text_run_cost);
    let plates_cost = round2(plates_cost);
    let make_ready_cost = round2(make_ready_cost);

    let subtotal = paper_cost
        + cover_cost
        + printing_cost
        + plates_cost
        + make_ready_cost
        + binding.total
        + finishing.total
        + logistics.packing_cost
        + logistics.freight_cost;

    let priced = pricing::price(subtotal, quantity, &spec.pricing, tables)?;

    let rate_per_1000 = if effective_impressions > 0 {
        round2(all_runs_cost / effective_impressions as f64 * 1000.0)
    } else {
        0.0
    };

    let result = CostResult {
        quantity,
        currency: spec.pricing.currency.clone(),
        paper_cost,
        cover_cost,
        printing_cost,
        plates_cost,
        make_ready_cost,
        binding_cost: binding.total,
        finishing_cost: finishing.total,
        packing_cost: logistics.packing_cost,
        freight_cost: logistics.freight_cost,
        subtotal: priced.subtotal,
        rush_surcharge: priced.rush_surcharge,
        volume_discount_percent: priced.volume_discount_percent,
        volume_discount_amount: priced.volume_discount_amount,
        minimum_order_adjustment: priced.minimum_order_adjustment,
        production_subtotal: priced.production_subtotal,
        sell_before_tax: priced.sell_before_tax,
        tax_amount: priced.tax_amount,
        grand_total: priced.grand_total,
        cost_per_copy: priced.cost_per_copy,
        sell_per_copy: priced.sell_per_copy,
        reams: round2(reams(total_sheets)),
        total_plates,
        total_impressions,
        effective_impressions,
        rate_per_1000,
        ups: ups_headline,
        number_of_forms,
        spine_thickness_mm: geo.spine_thickness_mm,
        unit_weight_g: geo.unit_weight_g,
        total_weight_kg: logistics.total_weight_kg,
        cartons: logistics.cartons,
        pallets: logistics.pallets,
    };

    result.check_finite()?;
    Ok(result)
}

fn machine_class(profile: Option<&MachineProfile>, machine_id: Option<&str>) -> MachineClass {
    profile
        .map(|p| p.class)
        .unwrap_or_else(|| MachineClass::from_name(machine_id.unwrap_or("")))
}

fn usable_sheet(profile: Option<&MachineProfile>, class: MachineClass) -> (f64, f64) {
    profile
        .map(|p| p.usable_sheet_mm())
        .unwrap_or_else(|| default_usable_sheet_mm(class))
}

fn plate_cost(profile: Option<&MachineProfile>, class: MachineClass) -> f64 {
    profile
        .map(|p| p.plate_cost)
        .unwrap_or_else(|| class.default_plate_cost())
}

fn empty_table(stage: &str, table: &str) -> EstimateError {
    EstimateError::calculation_failed(stage, format!("{} is empty", table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::*;

    /// The reference job: royal octavo, 256pp 4/4 matt art, art card cover,
    /// perfect bound, gloss laminated, 20% margin, no tax.
    fn reference_spec() -> JobSpecification {
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
                lamination: Some(FinishingType::GlossLamination),
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
    fn test_reference_scenario() {
        let tables = crate::rates::RateTables::standard();
        let results = estimate(&reference_spec(), tables, &[]).unwrap();
        assert_eq!(results.len(), 1);
        let r = &results[0];

        assert!(r.grand_total.is_finite());
        assert!(r.grand_total > 0.0);
        // 20% margin with no tax: sell strictly above cost
        assert!(r.grand_total > r.production_subtotal);
        // Per-copy figure reconstructs the production subtotal
        assert!((r.cost_per_copy * 5000.0 - r.production_subtotal).abs() < 0.01);
        // Every cost center engaged except none
        for (name, value) in r.cost_centers() {
            assert!(value > 0.0, "{} should be positive", name);
        }
        // 16 forms of 16pp, 2 forms per sheet
        assert_eq!(r.ups, 2);
        assert_eq!(r.number_of_forms, 16);
        // Sheetwise 4/4 over 16 forms + 4/0 cover
        assert_eq!(r.total_plates, 8 * 16 + 4);
    }

    #[test]
    fn test_all_fields_finite_and_deltas_non_negative() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        spec.pricing.turnaround = Turnaround::Rush;
        spec.pricing.tax_rate_percent = 18.0;
        spec.pricing.minimum_order_value = 100_000.0;
        let r = estimate_for_quantity(&spec, 5000, tables, &[]).unwrap();
        assert!(r.check_finite().is_ok());
        assert!(r.rush_surcharge >= 0.0);
        assert!(r.volume_discount_amount >= 0.0);
        assert!(r.minimum_order_adjustment > 0.0);
        assert!((r.production_subtotal - 100_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotence() {
        let tables = crate::rates::RateTables::standard();
        let spec = reference_spec();
        let first = estimate(&spec, tables, &[]).unwrap();
        let second = estimate(&spec, tables, &[]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_results_match_input_order() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        spec.quantities = vec![3000, 1000, 2000];
        let results = estimate(&spec, tables, &[]).unwrap();
        let quantities: Vec<u32> = results.iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![3000, 1000, 2000]);
    }

    #[test]
    fn test_monotonicity_across_quantities() {
        let tables = crate::rates::RateTables::standard();
        let spec = reference_spec();
        let ladder = [1000u32, 2000, 5000, 20_000];
        let mut last_total = 0.0;
        let mut last_per_copy = f64::INFINITY;
        for quantity in ladder {
            let r = estimate_for_quantity(&spec, quantity, tables, &[]).unwrap();
            assert!(
                r.production_subtotal >= last_total,
                "total cost decreased at quantity {}",
                quantity
            );
            assert!(
                r.cost_per_copy <= last_per_copy,
                "per-copy cost increased at quantity {}",
                quantity
            );
            last_total = r.production_subtotal;
            last_per_copy = r.cost_per_copy;
        }
    }

    #[test]
    fn test_batch_aborts_on_any_failure() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        // A zero quantity is unreachable through the validator; fed straight
        // to the engine it must fail the entire batch, not skip one entry.
        spec.quantities = vec![1000, 0];
        assert!(estimate(&spec, tables, &[]).is_err());
    }

    #[test]
    fn test_saddle_binding_cost_is_flat_rate_times_quantity() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        spec.binding = BindingType::SaddleStitching;
        spec.sections[0].pages = 64;
        let r = estimate_for_quantity(&spec, 3000, tables, &[]).unwrap();
        // Tier 2000-4999: 0.045 per copy + 40 setup, page count irrelevant
        assert!((r.binding_cost - 175.0).abs() < 1e-9);

        spec.sections[0].pages = 96;
        let longer = estimate_for_quantity(&spec, 3000, tables, &[]).unwrap();
        assert_eq!(longer.binding_cost, r.binding_cost);
    }

    #[test]
    fn test_discount_threshold_boundary() {
        let tables = crate::rates::RateTables::standard();
        let spec = reference_spec();
        let below = estimate_for_quantity(&spec, 9_999, tables, &[]).unwrap();
        let at = estimate_for_quantity(&spec, 10_000, tables, &[]).unwrap();
        assert_eq!(below.volume_discount_percent, 2.0);
        assert_eq!(at.volume_discount_percent, 3.0);
    }

    #[test]
    fn test_physics_and_legacy_paths_differ() {
        let tables = crate::rates::RateTables::standard();
        let machines = MachineProfile::standard_fleet();
        let mut spec = reference_spec();

        let legacy = estimate_for_quantity(&spec, 5000, tables, &[]).unwrap();
        spec.sections[0].machine = Some("sm102".to_string());
        let physics = estimate_for_quantity(&spec, 5000, tables, &machines).unwrap();

        assert!(legacy.printing_cost > 0.0);
        assert!(physics.printing_cost > 0.0);
        assert!((legacy.printing_cost - physics.printing_cost).abs() > 1.0);
    }

    #[test]
    fn test_multi_section_jobs_accumulate() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        spec.sections.push(TextSection {
            enabled: true,
            label: "Plate Section".to_string(),
            pages: 32,
            paper_gsm: 170.0,
            paper_stock: PaperStock::GlossArt,
            machine: None,
            colors_front: 4,
            colors_back: 4,
            printing_method: PrintingMethod::Sheetwise,
        });
        let single = estimate_for_quantity(&reference_spec(), 5000, tables, &[]).unwrap();
        let double = estimate_for_quantity(&spec, 5000, tables, &[]).unwrap();
        // 256 + 32 pages = 18 forms
        assert_eq!(double.number_of_forms, 18);
        assert!(double.paper_cost > single.paper_cost);
        assert!(double.printing_cost > single.printing_cost);
        // Binding sees the combined page count: 18 signatures
        assert!(double.binding_cost > single.binding_cost);
    }

    #[test]
    fn test_hardcase_extras_feed_weight_and_binding() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        spec.binding = BindingType::SectionSewnHardcase;
        spec.endleaves = Some(EndleavesSpecification {
            paper_gsm: 140.0,
            paper_stock: PaperStock::Woodfree,
            leaves_per_copy: 4,
        });
        spec.jacket = Some(JacketSpecification {
            paper_gsm: 130.0,
            paper_stock: PaperStock::GlossArt,
            colors: 4,
            lamination: Some(FinishingType::GlossLamination),
        });
        spec.board = Some(BoardSpecification { thickness_mm: 2.5 });

        let paperback = estimate_for_quantity(&reference_spec(), 2000, tables, &[]).unwrap();
        let hardcase = estimate_for_quantity(&spec, 2000, tables, &[]).unwrap();

        assert!(hardcase.unit_weight_g > paperback.unit_weight_g);
        assert!(hardcase.binding_cost > paperback.binding_cost);
        // Jacket paper and printing land in the cover center
        assert!(hardcase.cover_cost > paperback.cover_cost);
        // Endleaf sheets land in the paper center
        assert!(hardcase.paper_cost > paperback.paper_cost);
        // Cover + jacket lamination both charged
        assert!(hardcase.finishing_cost > paperback.finishing_cost);
    }

    #[test]
    fn test_infeasible_trim_aborts_before_costing() {
        let tables = crate::rates::RateTables::standard();
        let mut spec = reference_spec();
        spec.trim_width_mm = 900.0;
        spec.trim_height_mm = 650.0;
        let err = estimate(&spec, tables, &[]).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("imposition"));
    }

    #[test]
    fn test_estimate_raw_validates_first() {
        let tables = crate::rates::RateTables::standard();
        let raw = RawJobSpecification {
            quantities: vec!["1500.5".to_string()],
            ..RawJobSpecification::default()
        };
        let err = estimate_raw(&raw, tables, &[]).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let tables = crate::rates::RateTables::standard();
        let r = estimate_for_quantity(&reference_spec(), 5000, tables, &[]).unwrap();
        let json = serde_json::to_string_pretty(&r).unwrap();
        assert!(json.contains("grand_total"));
        assert!(json.contains("cost_per_copy"));
        let roundtrip: CostResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, roundtrip);
    }
}
