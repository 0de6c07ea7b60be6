//! Wastage chart: quantity range × color class to waste sheets per form.
//!
//! Make-ready and running waste is charted per form, either as a flat sheet
//! count (short runs) or as a percentage of the run (long runs). The column
//! is picked by the effective color count of the form being run.

use serde::{Deserialize, Serialize};

use super::{resolve_by_quantity, QuantityRange};

/// Color classes charted by the wastage table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    FourColor,
    TwoColor,
    OneColor,
}

impl ColorClass {
    /// Classify an effective color count (max of front/back).
    ///
    /// Three and four color work both run as process work and share the
    /// four-color column.
    pub fn from_colors(colors: u8) -> Self {
        match colors {
            0 | 1 => ColorClass::OneColor,
            2 => ColorClass::TwoColor,
            _ => ColorClass::FourColor,
        }
    }
}

/// A waste allowance: flat sheets or a percentage of the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum WastageAllowance {
    /// Flat waste sheet count per form
    Sheets(u32),
    /// Waste as a percentage of the run quantity
    Percent(f64),
}

impl WastageAllowance {
    /// Waste sheets per form for a run of `quantity`
    pub fn sheets_for(&self, quantity: u32) -> f64 {
        match self {
            WastageAllowance::Sheets(n) => *n as f64,
            WastageAllowance::Percent(p) => quantity as f64 * p / 100.0,
        }
    }
}

/// One chart row: a quantity range with an allowance per color class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WastageRow {
    pub range: QuantityRange,
    pub four_color: WastageAllowance,
    pub two_color: WastageAllowance,
    pub one_color: WastageAllowance,
}

impl WastageRow {
    fn allowance(&self, class: ColorClass) -> WastageAllowance {
        match class {
            ColorClass::FourColor => self.four_color,
            ColorClass::TwoColor => self.two_color,
            ColorClass::OneColor => self.one_color,
        }
    }
}

/// The wastage chart. Rows are non-overlapping and ordered by lower bound;
/// a quantity beyond every range resolves to the last row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WastageChart {
    pub rows: Vec<WastageRow>,
}

impl WastageChart {
    /// Waste sheets per form for the given run quantity and color class.
    ///
    /// Returns `None` only when the chart is empty.
    pub fn wastage_per_form(&self, quantity: u32, class: ColorClass) -> Option<f64> {
        resolve_by_quantity(&self.rows, quantity, |r| &r.range)
            .map(|row| row.allowance(class).sheets_for(quantity))
    }
}
