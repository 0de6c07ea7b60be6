//! # Pricing & Tax Layer
//!
//! The fixed-order pipeline from cost subtotal to grand total. The order is
//! load-bearing:
//!
//! 1. turnaround surcharge on the subtotal
//! 2. volume discount on the *surcharged* amount
//! 3. minimum-order floor on the *discounted* amount
//! 4. margin/markup inversion on the floor-adjusted amount
//! 5. tax on the sell price
//!
//! A heavily discounted small order can still be lifted back to the floor,
//! and the margin applies to the floored figure, not the raw subtotal.
//!
//! Monetary fields are carried at 2 decimals step by step, so the published
//! identities (`grand_total = sell_before_tax + tax_amount`, etc.) hold
//! exactly on the stored values. Per-copy figures stay unrounded;
//! presentation is the caller's concern.

use serde::{Deserialize, Serialize};

use super::round2;
use crate::errors::{EstimateError, EstimateResult};
use crate::rates::RateTables;
use crate::spec::{PricingConfig, PricingMode};

/// The pricing pipeline's output for one quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Sum of all cost centers
    pub subtotal: f64,
    /// Surcharge over the subtotal for rush/express turnaround (≥ 0)
    pub rush_surcharge: f64,
    /// Resolved volume discount percent
    pub volume_discount_percent: f64,
    /// Discount taken off the surcharged subtotal (≥ 0)
    pub volume_discount_amount: f64,
    /// Lift applied to reach the minimum order value (≥ 0)
    pub minimum_order_adjustment: f64,
    /// Cost basis after surcharge, discount and floor
    pub production_subtotal: f64,
    /// Sell price before tax (margin/markup applied)
    pub sell_before_tax: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
    /// `production_subtotal / quantity`, unrounded
    pub cost_per_copy: f64,
    /// `grand_total / quantity`, unrounded
    pub sell_per_copy: f64,
}

/// Run the pricing pipeline over a cost subtotal.
pub fn price(
    subtotal: f64,
    quantity: u32,
    config: &PricingConfig,
    tables: &RateTables,
) -> EstimateResult<PricingResult> {
    if quantity == 0 {
        return Err(EstimateError::calculation_failed(
            "pricing",
            "quantity is zero",
        ));
    }
    if !subtotal.is_finite() || subtotal < 0.0 {
        return Err(EstimateError::calculation_failed(
            "pricing",
            format!("subtotal is not a non-negative finite number ({})", subtotal),
        ));
    }
    // The validator rejects 100 up front; guard the division anyway.
    if config.mode == PricingMode::Margin && config.percent >= 100.0 {
        return Err(EstimateError::calculation_failed(
            "pricing",
            format!("margin percent {} leaves no sell basis", config.percent),
        ));
    }

    let subtotal = round2(subtotal);

    let surcharged = round2(subtotal * config.turnaround.multiplier());
    let rush_surcharge = round2(surcharged - subtotal);

    let volume_discount_percent = tables.volume_discount_percent(quantity);
    let volume_discount_amount = round2(surcharged * volume_discount_percent / 100.0);
    let discounted = round2(surcharged - volume_discount_amount);

    let minimum_order_adjustment = round2((config.minimum_order_value - discounted).max(0.0));
    let production_subtotal = round2(discounted + minimum_order_adjustment);

    let sell_before_tax = match config.mode {
        PricingMode::Margin => round2(production_subtotal / (1.0 - config.percent / 100.0)),
        PricingMode::Markup => round2(production_subtotal * (1.0 + config.percent / 100.0)),
    };

    let tax_amount = round2(sell_before_tax * config.tax_rate_percent / 100.0);
    let grand_total = round2(sell_before_tax + tax_amount);

    Ok(PricingResult {
        subtotal,
        rush_surcharge,
        volume_discount_percent,
        volume_discount_amount,
        minimum_order_adjustment,
        production_subtotal,
        sell_before_tax,
        tax_amount,
        grand_total,
        cost_per_copy: production_subtotal / quantity as f64,
        sell_per_copy: grand_total / quantity as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Turnaround;

    fn config(mode: PricingMode, percent: f64) -> PricingConfig {
        PricingConfig {
            mode,
            percent,
            turnaround: Turnaround::Standard,
            tax_rate_percent: 0.0,
            minimum_order_value: 0.0,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_margin_inversion() {
        let tables = crate::rates::RateTables::standard();
        let result = price(800.0, 100, &config(PricingMode::Margin, 20.0), tables).unwrap();
        // 800 / 0.8 = 1000
        assert!((result.sell_before_tax - 1000.0).abs() < 1e-9);
        // Margin recovered from the two figures matches the input percent
        let recovered = 100.0 * (1.0 - result.production_subtotal / result.sell_before_tax);
        assert!((recovered - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_markup_multiplication() {
        let tables = crate::rates::RateTables::standard();
        let result = price(800.0, 100, &config(PricingMode::Markup, 20.0), tables).unwrap();
        assert!((result.sell_before_tax - 960.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_exceeds_markup_at_same_percent() {
        let tables = crate::rates::RateTables::standard();
        let margin = price(800.0, 100, &config(PricingMode::Margin, 20.0), tables).unwrap();
        let markup = price(800.0, 100, &config(PricingMode::Markup, 20.0), tables).unwrap();
        assert!(margin.sell_before_tax > markup.sell_before_tax);
    }

    #[test]
    fn test_discount_applies_to_surcharged_amount() {
        let tables = crate::rates::RateTables::standard();
        let mut cfg = config(PricingMode::Markup, 0.0);
        cfg.turnaround = Turnaround::Rush;
        // 10_000 copies earns the 3% tier
        let result = price(1000.0, 10_000, &cfg, tables).unwrap();
        assert!((result.rush_surcharge - 150.0).abs() < 1e-9);
        // 3% of 1150, not of 1000
        assert!((result.volume_discount_amount - 34.5).abs() < 1e-9);
        assert!((result.production_subtotal - 1115.5).abs() < 1e-9);
    }

    #[test]
    fn test_floor_applies_after_discount() {
        let tables = crate::rates::RateTables::standard();
        let mut cfg = config(PricingMode::Markup, 0.0);
        cfg.minimum_order_value = 500.0;
        let result = price(300.0, 100, &cfg, tables).unwrap();
        assert!((result.minimum_order_adjustment - 200.0).abs() < 1e-9);
        assert!((result.production_subtotal - 500.0).abs() < 1e-9);
        // Sell price builds on the floored figure
        assert!((result.sell_before_tax - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_tax_and_grand_total_identity() {
        let tables = crate::rates::RateTables::standard();
        let mut cfg = config(PricingMode::Margin, 25.0);
        cfg.tax_rate_percent = 18.0;
        let result = price(750.0, 500, &cfg, tables).unwrap();
        assert!((result.tax_amount - result.sell_before_tax * 0.18).abs() < 0.01);
        assert!((result.grand_total - (result.sell_before_tax + result.tax_amount)).abs() < 1e-9);
    }

    #[test]
    fn test_per_copy_figures() {
        let tables = crate::rates::RateTables::standard();
        let result = price(1000.0, 400, &config(PricingMode::Markup, 10.0), tables).unwrap();
        assert!((result.cost_per_copy * 400.0 - result.production_subtotal).abs() < 1e-9);
        assert!((result.sell_per_copy * 400.0 - result.grand_total).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_quantity_takes_higher_tier() {
        let tables = crate::rates::RateTables::standard();
        let below = price(1000.0, 9_999, &config(PricingMode::Markup, 0.0), tables).unwrap();
        let at = price(1000.0, 10_000, &config(PricingMode::Markup, 0.0), tables).unwrap();
        assert_eq!(below.volume_discount_percent, 2.0);
        assert_eq!(at.volume_discount_percent, 3.0);
        assert!(at.volume_discount_amount > below.volume_discount_amount);
    }

    #[test]
    fn test_zero_quantity_is_an_error() {
        let tables = crate::rates::RateTables::standard();
        let err = price(1000.0, 0, &config(PricingMode::Margin, 20.0), tables).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_margin_at_100_guarded() {
        let tables = crate::rates::RateTables::standard();
        let err = price(1000.0, 10, &config(PricingMode::Margin, 100.0), tables).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }
}
