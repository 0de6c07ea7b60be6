//! Legacy impression-rate table and the machine class it is keyed by.
//!
//! When a job's machine has no physical profile, printing is priced the old
//! way: a rate per 1,000 impressions looked up by the impressions-per-form
//! bucket and the machine's format class.
//!
//! [`MachineClass::from_name`] is the only place free-form machine names are
//! interpreted. It resolves a name once, at the boundary, by substring - the
//! costing core only ever matches on the closed enum. Unrecognized names
//! fall through to the documented default class ([`MachineClass::FullSize`]);
//! the matching order is specific patterns first, default last.

use serde::{Deserialize, Serialize};

use super::{resolve_by_quantity, QuantityRange};

/// Press format classes the legacy rate table is columned by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MachineClass {
    /// Full-size press (B1-class sheet). The documented default for
    /// unrecognized machine names.
    #[default]
    FullSize,
    /// Half-size press (B2-class sheet)
    HalfSize,
    /// Quarter-size press (B3-class sheet)
    QuarterSize,
}

impl MachineClass {
    /// All machine class variants
    pub const ALL: [MachineClass; 3] = [
        MachineClass::FullSize,
        MachineClass::HalfSize,
        MachineClass::QuarterSize,
    ];

    /// Resolve a free-form machine name or id to a class.
    ///
    /// Matches the format-number conventions of common press names
    /// ("SM 102", "CD 102", "XL 106" are full size; "SM 74", "RMGT 790"
    /// half; "GTO 52", "PM 46" quarter). Specific patterns are tried before
    /// falling back to the default class, which can silently absorb genuinely
    /// unknown presses - callers wanting strictness should resolve classes
    /// themselves.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        const FULL: [&str; 5] = ["102", "105", "106", "140", "full"];
        const HALF: [&str; 5] = ["74", "75", "79", "66", "half"];
        const QUARTER: [&str; 4] = ["46", "52", "gto", "quarter"];

        if FULL.iter().any(|p| lower.contains(p)) {
            MachineClass::FullSize
        } else if HALF.iter().any(|p| lower.contains(p)) {
            MachineClass::HalfSize
        } else if QUARTER.iter().any(|p| lower.contains(p)) {
            MachineClass::QuarterSize
        } else {
            MachineClass::default()
        }
    }

    /// Maximum sheet size (width, height) in mm assumed for the class when
    /// no machine profile supplies real geometry
    pub fn sheet_size_mm(&self) -> (f64, f64) {
        match self {
            MachineClass::FullSize => (1020.0, 720.0),
            MachineClass::HalfSize => (740.0, 520.0),
            MachineClass::QuarterSize => (520.0, 360.0),
        }
    }

    /// Default plate cost for the class, used when no profile prices plates
    pub fn default_plate_cost(&self) -> f64 {
        match self {
            MachineClass::FullSize => 7.0,
            MachineClass::HalfSize => 5.0,
            MachineClass::QuarterSize => 3.5,
        }
    }

    /// Default make-ready cost per form on the legacy costing path
    pub fn default_make_ready_per_form(&self) -> f64 {
        match self {
            MachineClass::FullSize => 18.0,
            MachineClass::HalfSize => 14.0,
            MachineClass::QuarterSize => 10.0,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MachineClass::FullSize => "Full Size",
            MachineClass::HalfSize => "Half Size",
            MachineClass::QuarterSize => "Quarter Size",
        }
    }
}

impl std::fmt::Display for MachineClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One rate band: an impressions-per-form range with a rate per 1,000
/// impressions for each machine class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpressionRateBand {
    pub range: QuantityRange,
    pub full_size: f64,
    pub half_size: f64,
    pub quarter_size: f64,
}

impl ImpressionRateBand {
    fn rate(&self, class: MachineClass) -> f64 {
        match class {
            MachineClass::FullSize => self.full_size,
            MachineClass::HalfSize => self.half_size,
            MachineClass::QuarterSize => self.quarter_size,
        }
    }
}

/// The legacy impression-rate table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpressionRateTable {
    pub bands: Vec<ImpressionRateBand>,
}

impl ImpressionRateTable {
    /// Rate per 1,000 impressions for the band containing
    /// `impressions_per_form` (last band extrapolates).
    ///
    /// Returns `None` only when the table is empty.
    pub fn rate_per_1000(&self, impressions_per_form: u32, class: MachineClass) -> Option<f64> {
        resolve_by_quantity(&self.bands, impressions_per_form, |b| &b.range)
            .map(|band| band.rate(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ImpressionRateTable {
        ImpressionRateTable {
            bands: vec![
                ImpressionRateBand {
                    range: QuantityRange::new(0, Some(2499)),
                    full_size: 45.0,
                    half_size: 36.0,
                    quarter_size: 30.0,
                },
                ImpressionRateBand {
                    range: QuantityRange::new(2500, Some(4999)),
                    full_size: 40.0,
                    half_size: 32.0,
                    quarter_size: 27.0,
                },
                ImpressionRateBand {
                    range: QuantityRange::new(5000, None),
                    full_size: 36.0,
                    half_size: 29.0,
                    quarter_size: 24.0,
                },
            ],
        }
    }

    #[test]
    fn test_class_from_press_names() {
        assert_eq!(MachineClass::from_name("Speedmaster SM 102"), MachineClass::FullSize);
        assert_eq!(MachineClass::from_name("XL 106"), MachineClass::FullSize);
        assert_eq!(MachineClass::from_name("sm74"), MachineClass::HalfSize);
        assert_eq!(MachineClass::from_name("GTO 52"), MachineClass::QuarterSize);
    }

    #[test]
    fn test_unrecognized_name_takes_default() {
        assert_eq!(MachineClass::from_name("mystery press"), MachineClass::FullSize);
        assert_eq!(MachineClass::from_name(""), MachineClass::FullSize);
    }

    #[test]
    fn test_specific_pattern_wins_over_default() {
        // "gto" would fall to default if quarter patterns were not tried
        assert_eq!(MachineClass::from_name("old gto"), MachineClass::QuarterSize);
    }

    #[test]
    fn test_band_resolution() {
        let t = table();
        assert_eq!(t.rate_per_1000(2600, MachineClass::FullSize), Some(40.0));
        assert_eq!(t.rate_per_1000(2500, MachineClass::HalfSize), Some(32.0));
        assert_eq!(t.rate_per_1000(100_000, MachineClass::QuarterSize), Some(24.0));
    }

    #[test]
    fn test_class_defaults() {
        assert!(MachineClass::FullSize.default_plate_cost() > MachineClass::QuarterSize.default_plate_cost());
        let (w, h) = MachineClass::FullSize.sheet_size_mm();
        assert_eq!((w, h), (1020.0, 720.0));
    }
}
