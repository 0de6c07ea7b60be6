//! Binding tier tables, one per binding method.
//!
//! Perfect binding, saddle stitching and hardcase work tier by quantity;
//! wire-o tiers by the wire diameter the book's spine needs. Rates are in
//! the job's declared currency.

use serde::{Deserialize, Serialize};

use super::QuantityRange;

/// Perfect binding tier: rates per 16-page signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectBindingTier {
    pub range: QuantityRange,
    /// Binding rate per copy per 16pp signature
    pub rate_per_16pp: f64,
    /// Gathering rate per copy per 16pp signature
    pub gathering_per_16pp: f64,
    /// Flat setup added once per job
    pub setup: f64,
}

/// Saddle stitching tier: flat rate per copy, page count does not enter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaddleStitchTier {
    pub range: QuantityRange,
    pub rate_per_copy: f64,
    pub setup: f64,
}

/// Section sewn hardcase tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardcaseTier {
    pub range: QuantityRange,
    /// Sewing rate per copy per 16pp signature
    pub sewing_per_16pp: f64,
    /// Case-making cost per copy
    pub case_per_copy: f64,
    pub setup: f64,
}

/// Wire-o tier, keyed by the largest spine the wire size closes over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireOTier {
    /// Largest wire diameter this tier covers (mm)
    pub max_diameter_mm: f64,
    pub rate_per_copy: f64,
    pub setup: f64,
}

/// Resolve a wire-o tier by required wire diameter.
///
/// Picks the smallest wire that closes over the spine; a spine thicker than
/// every tier extrapolates to the last (largest) wire.
pub fn resolve_wire_tier(tiers: &[WireOTier], diameter_mm: f64) -> Option<&WireOTier> {
    tiers
        .iter()
        .find(|t| diameter_mm <= t.max_diameter_mm)
        .or_else(|| tiers.last())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::resolve_by_quantity;

    fn wire_tiers() -> Vec<WireOTier> {
        vec![
            WireOTier {
                max_diameter_mm: 6.9,
                rate_per_copy: 0.55,
                setup: 45.0,
            },
            WireOTier {
                max_diameter_mm: 12.7,
                rate_per_copy: 0.75,
                setup: 45.0,
            },
            WireOTier {
                max_diameter_mm: 25.4,
                rate_per_copy: 1.40,
                setup: 45.0,
            },
        ]
    }

    #[test]
    fn test_wire_tier_picks_smallest_sufficient() {
        let tiers = wire_tiers();
        assert_eq!(resolve_wire_tier(&tiers, 5.0).unwrap().rate_per_copy, 0.55);
        assert_eq!(resolve_wire_tier(&tiers, 8.0).unwrap().rate_per_copy, 0.75);
    }

    #[test]
    fn test_wire_tier_boundary_inclusive() {
        let tiers = wire_tiers();
        assert_eq!(resolve_wire_tier(&tiers, 6.9).unwrap().rate_per_copy, 0.55);
    }

    #[test]
    fn test_wire_tier_extrapolates() {
        let tiers = wire_tiers();
        assert_eq!(resolve_wire_tier(&tiers, 40.0).unwrap().rate_per_copy, 1.40);
    }

    #[test]
    fn test_quantity_tier_resolution() {
        let tiers = vec![
            SaddleStitchTier {
                range: QuantityRange::new(0, Some(1999)),
                rate_per_copy: 0.06,
                setup: 40.0,
            },
            SaddleStitchTier {
                range: QuantityRange::new(2000, None),
                rate_per_copy: 0.045,
                setup: 40.0,
            },
        ];
        assert_eq!(
            resolve_by_quantity(&tiers, 1500, |t| &t.range)
                .unwrap()
                .rate_per_copy,
            0.06
        );
        assert_eq!(
            resolve_by_quantity(&tiers, 2000, |t| &t.range)
                .unwrap()
                .rate_per_copy,
            0.045
        );
    }
}
