//! # PressQuote CLI Application
//!
//! Terminal front-end for the estimation engine. Prompts for a handful of
//! job parameters, runs the engine against the standard rate card, and
//! prints the itemized breakdown for each candidate quantity.

use std::io::{self, BufRead, Write};

use quote_core::calculations::estimate;
use quote_core::rates::{MachineProfile, RateTables};
use quote_core::spec::{
    BindingType, CoverSpecification, FinishingType, JobSpecification, PaperStock, PricingConfig,
    PricingMode, PrintingMethod, TextSection, Turnaround,
};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("PressQuote CLI - Print Job Estimator");
    println!("====================================");
    println!();

    let pages = prompt_f64("Enter page count [256]: ", 256.0) as u32;
    let quantity = prompt_f64("Enter quantity [5000]: ", 5000.0) as u32;
    let margin = prompt_f64("Enter margin percent [20]: ", 20.0);

    println!();
    println!("Estimating 153x234mm, {}pp 4/4 on 130gsm Matt Art,", pages);
    println!("300gsm Art Card cover, perfect bound, gloss laminated...");
    println!();

    let spec = JobSpecification {
        trim_width_mm: 153.0,
        trim_height_mm: 234.0,
        sections: vec![TextSection {
            enabled: true,
            label: "Text".to_string(),
            pages,
            paper_gsm: 130.0,
            paper_stock: PaperStock::MattArt,
            machine: Some("sm102".to_string()),
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
        quantities: vec![quantity],
        pricing: PricingConfig {
            mode: PricingMode::Margin,
            percent: margin,
            turnaround: Turnaround::Standard,
            tax_rate_percent: 0.0,
            minimum_order_value: 0.0,
            currency: "USD".to_string(),
        },
    };

    let machines = MachineProfile::standard_fleet();
    match estimate(&spec, RateTables::standard(), &machines) {
        Ok(results) => {
            for result in &results {
                println!("═══════════════════════════════════════");
                println!("  ESTIMATE FOR {} COPIES", result.quantity);
                println!("═══════════════════════════════════════");
                println!();
                println!("Production:");
                println!("  Spine:       {:.1} mm", result.spine_thickness_mm);
                println!("  Unit weight: {:.0} g", result.unit_weight_g);
                println!(
                    "  Imposition:  {}-up, {} forms, {} impressions",
                    result.ups, result.number_of_forms, result.total_impressions
                );
                println!(
                    "  Materials:   {:.1} reams, {} plates",
                    result.reams, result.total_plates
                );
                println!(
                    "  Dispatch:    {} cartons on {} pallets, {:.0} kg",
                    result.cartons, result.pallets, result.total_weight_kg
                );
                println!();
                println!("Cost breakdown ({}):", result.currency);
                for (name, value) in result.cost_centers() {
                    println!("  {:<14} {:>12.2}", name, value);
                }
                println!("  {:<14} {:>12.2}", "Subtotal", result.subtotal);
                if result.rush_surcharge > 0.0 {
                    println!("  {:<14} {:>12.2}", "Rush", result.rush_surcharge);
                }
                if result.volume_discount_amount > 0.0 {
                    println!(
                        "  {:<14} {:>12.2}",
                        format!("Discount {}%", result.volume_discount_percent),
                        -result.volume_discount_amount
                    );
                }
                if result.minimum_order_adjustment > 0.0 {
                    println!(
                        "  {:<14} {:>12.2}",
                        "Min. order", result.minimum_order_adjustment
                    );
                }
                println!();
                println!("Pricing:");
                println!("  Cost:        {:>12.2}", result.production_subtotal);
                println!("  Sell:        {:>12.2}", result.sell_before_tax);
                if result.tax_amount > 0.0 {
                    println!("  Tax:         {:>12.2}", result.tax_amount);
                }
                println!("  Grand total: {:>12.2}", result.grand_total);
                println!(
                    "  Per copy:    {:.4} cost / {:.4} sell",
                    result.cost_per_copy, result.sell_per_copy
                );
                println!();
            }
        }
        Err(e) => {
            eprintln!("Estimation failed [{}]:", e.error_code());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
