//! Paper rate table: stock + grammage to per-ream money.
//!
//! Each row carries two figures the trade quotes separately: the landed cost
//! (what the ream cost to put in the store) and the charge rate (what the
//! job is billed). The estimator prices paper at the charge rate; landed
//! cost is carried for margin reporting by consumers.

use serde::{Deserialize, Serialize};

use crate::spec::PaperStock;

/// Sheets in one ream, the unit the paper table is priced in
pub const SHEETS_PER_REAM: f64 = 500.0;

/// Convert a sheet count to (fractional) reams
pub fn reams(sheets: u64) -> f64 {
    sheets as f64 / SHEETS_PER_REAM
}

/// One paper rate row: a stock at a grammage, priced per ream of press-size
/// sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRate {
    pub stock: PaperStock,
    pub gsm: f64,
    /// Cost per ream as landed in the store
    pub landed_cost_per_ream: f64,
    /// Rate per ream charged to the job
    pub charge_per_ream: f64,
}

/// The paper rate table.
///
/// Lookup resolves within the requested stock to the row with the nearest
/// grammage (ties toward the heavier row). A stock with no rows at all
/// extrapolates to the table's last entry rather than failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaperRateTable {
    pub rows: Vec<PaperRate>,
}

impl PaperRateTable {
    /// Resolve the charge row for a stock and grammage.
    ///
    /// Returns `None` only when the table is empty.
    pub fn lookup(&self, stock: PaperStock, gsm: f64) -> Option<&PaperRate> {
        let best = self
            .rows
            .iter()
            .filter(|r| r.stock == stock)
            .min_by(|a, b| {
                let da = (a.gsm - gsm).abs();
                let db = (b.gsm - gsm).abs();
                da.total_cmp(&db)
                    .then_with(|| b.gsm.total_cmp(&a.gsm))
            });
        best.or_else(|| self.rows.last())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PaperRateTable {
        PaperRateTable {
            rows: vec![
                PaperRate {
                    stock: PaperStock::MattArt,
                    gsm: 90.0,
                    landed_cost_per_ream: 38.0,
                    charge_per_ream: 43.0,
                },
                PaperRate {
                    stock: PaperStock::MattArt,
                    gsm: 130.0,
                    landed_cost_per_ream: 52.0,
                    charge_per_ream: 58.0,
                },
                PaperRate {
                    stock: PaperStock::ArtCard,
                    gsm: 300.0,
                    landed_cost_per_ream: 130.0,
                    charge_per_ream: 145.0,
                },
            ],
        }
    }

    #[test]
    fn test_exact_match() {
        let rate = table().lookup(PaperStock::MattArt, 130.0).unwrap().charge_per_ream;
        assert_eq!(rate, 58.0);
    }

    #[test]
    fn test_nearest_gsm_wins() {
        let t = table();
        assert_eq!(t.lookup(PaperStock::MattArt, 100.0).unwrap().gsm, 90.0);
        assert_eq!(t.lookup(PaperStock::MattArt, 128.0).unwrap().gsm, 130.0);
    }

    #[test]
    fn test_tie_prefers_heavier() {
        let t = table();
        // 110 is equidistant from 90 and 130
        assert_eq!(t.lookup(PaperStock::MattArt, 110.0).unwrap().gsm, 130.0);
    }

    #[test]
    fn test_unknown_stock_extrapolates_to_last() {
        let t = table();
        let rate = t.lookup(PaperStock::Bond, 100.0).unwrap();
        assert_eq!(rate.stock, PaperStock::ArtCard);
    }

    #[test]
    fn test_empty_table() {
        let t = PaperRateTable::default();
        assert!(t.lookup(PaperStock::MattArt, 130.0).is_none());
    }

    #[test]
    fn test_reams() {
        assert_eq!(reams(500), 1.0);
        assert_eq!(reams(41600), 83.2);
    }
}
