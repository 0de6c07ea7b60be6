//! # Job Specification Types
//!
//! The specification of a print job exists in two distinct forms:
//!
//! - [`RawJobSpecification`] - the pre-validation form, numeric fields still
//!   carried as text exactly as a UI collected them.
//! - [`JobSpecification`] - the normalized form produced by the validator,
//!   with numbers coerced and enum-ish strings resolved to closed variants.
//!
//! The calculation core only ever sees the normalized form. The raw form
//! never crosses into a calculator.
//!
//! ## JSON Example (normalized)
//!
//! ```json
//! {
//!   "trim_width_mm": 153.0,
//!   "trim_height_mm": 234.0,
//!   "sections": [
//!     {
//!       "enabled": true,
//!       "label": "Text",
//!       "pages": 256,
//!       "paper_gsm": 130.0,
//!       "paper_stock": "matt_art",
//!       "machine": "sm102",
//!       "colors_front": 4,
//!       "colors_back": 4,
//!       "printing_method": "sheetwise"
//!     }
//!   ],
//!   "binding": "perfect_binding",
//!   "finishing": [],
//!   "destination": "Domestic",
//!   "quantities": [5000],
//!   "pricing": {
//!     "mode": "margin",
//!     "percent": 20.0,
//!     "turnaround": "standard",
//!     "tax_rate_percent": 0.0,
//!     "minimum_order_value": 0.0,
//!     "currency": "USD"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{rect_area_m2, Millimeters};

// ============================================================================
// Closed Variant Sets
// ============================================================================

/// Paper stocks known to the estimator.
///
/// Each stock carries a bulk constant (thickness per sheet per gsm) used by
/// the spine calculation. 130 gsm matt art calipers at roughly 0.12 mm per
/// sheet; uncoated woodfree bulks noticeably higher at the same grammage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperStock {
    /// Coated matt art paper
    MattArt,
    /// Coated gloss art paper
    GlossArt,
    /// Uncoated woodfree / offset paper
    Woodfree,
    /// Bond / writing paper
    Bond,
    /// Heavy coated art card (cover weights)
    ArtCard,
}

impl PaperStock {
    /// All paper stock variants for UI selection
    pub const ALL: [PaperStock; 5] = [
        PaperStock::MattArt,
        PaperStock::GlossArt,
        PaperStock::Woodfree,
        PaperStock::Bond,
        PaperStock::ArtCard,
    ];

    /// Bulk constant: sheet thickness in mm per gsm of grammage
    pub fn bulk_mm_per_gsm(&self) -> f64 {
        match self {
            PaperStock::MattArt => 0.00095,
            PaperStock::GlossArt => 0.00085,
            PaperStock::Woodfree => 0.00125,
            PaperStock::Bond => 0.00130,
            PaperStock::ArtCard => 0.00105,
        }
    }

    /// Caliper (single-sheet thickness) in mm at the given grammage
    pub fn caliper_mm(&self, gsm: f64) -> f64 {
        gsm * self.bulk_mm_per_gsm()
    }

    /// Parse from common string representations.
    ///
    /// Returns `None` for unrecognized input so the validator can collect the
    /// violation instead of failing fast.
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "MATTART" | "MATT" | "MATTE" | "MATTEART" => Some(PaperStock::MattArt),
            "GLOSSART" | "GLOSS" => Some(PaperStock::GlossArt),
            "WOODFREE" | "OFFSET" | "MAPLITHO" => Some(PaperStock::Woodfree),
            "BOND" | "WRITING" => Some(PaperStock::Bond),
            "ARTCARD" | "ARTBOARD" | "CARD" => Some(PaperStock::ArtCard),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PaperStock::MattArt => "Matt Art",
            PaperStock::GlossArt => "Gloss Art",
            PaperStock::Woodfree => "Woodfree",
            PaperStock::Bond => "Bond",
            PaperStock::ArtCard => "Art Card",
        }
    }
}

impl std::fmt::Display for PaperStock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a form is laid on the press.
///
/// Drives the plate count and whether the impression total halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrintingMethod {
    /// One plate set per side, sheet turned between passes
    #[default]
    Sheetwise,
    /// Same plate set prints both sides; sheet turned on the long edge
    WorkAndTurn,
    /// Same plate set prints both sides; sheet tumbled on the short edge
    WorkAndTumble,
    /// Both sides printed in a single pass
    Perfector,
}

impl PrintingMethod {
    /// All printing method variants for UI selection
    pub const ALL: [PrintingMethod; 4] = [
        PrintingMethod::Sheetwise,
        PrintingMethod::WorkAndTurn,
        PrintingMethod::WorkAndTumble,
        PrintingMethod::Perfector,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '_', '-', '&'], "").as_str() {
            "SHEETWISE" | "SW" => Some(PrintingMethod::Sheetwise),
            "WORKANDTURN" | "WT" | "WANDT" => Some(PrintingMethod::WorkAndTurn),
            "WORKANDTUMBLE" | "WTU" => Some(PrintingMethod::WorkAndTumble),
            "PERFECTOR" | "PERFECTING" => Some(PrintingMethod::Perfector),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PrintingMethod::Sheetwise => "Sheetwise",
            PrintingMethod::WorkAndTurn => "Work & Turn",
            PrintingMethod::WorkAndTumble => "Work & Tumble",
            PrintingMethod::Perfector => "Perfector",
        }
    }
}

/// Binding methods - the closed strategy set for the binding calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingType {
    /// Glued spine paperback
    PerfectBinding,
    /// Wire staples through the fold
    SaddleStitching,
    /// Thread-sewn signatures in a rigid case
    SectionSewnHardcase,
    /// Double-loop wire through punched holes
    WireO,
}

impl BindingType {
    /// All binding variants for UI selection
    pub const ALL: [BindingType; 4] = [
        BindingType::PerfectBinding,
        BindingType::SaddleStitching,
        BindingType::SectionSewnHardcase,
        BindingType::WireO,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "PERFECTBINDING" | "PERFECT" | "PB" => Some(BindingType::PerfectBinding),
            "SADDLESTITCHING" | "SADDLESTITCH" | "SADDLE" => Some(BindingType::SaddleStitching),
            "SECTIONSEWNHARDCASE" | "HARDCASE" | "HARDBACK" | "CASEBOUND" => {
                Some(BindingType::SectionSewnHardcase)
            }
            "WIREO" | "WIRO" | "WIRE" => Some(BindingType::WireO),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BindingType::PerfectBinding => "Perfect Binding",
            BindingType::SaddleStitching => "Saddle Stitching",
            BindingType::SectionSewnHardcase => "Section Sewn Hardcase",
            BindingType::WireO => "Wire-O",
        }
    }
}

impl std::fmt::Display for BindingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Finishing processes priced by the finishing calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishingType {
    GlossLamination,
    MattLamination,
    SoftTouchLamination,
    SpotUv,
    Embossing,
    DieCutting,
    Foiling,
}

impl FinishingType {
    /// All finishing variants for UI selection
    pub const ALL: [FinishingType; 7] = [
        FinishingType::GlossLamination,
        FinishingType::MattLamination,
        FinishingType::SoftTouchLamination,
        FinishingType::SpotUv,
        FinishingType::Embossing,
        FinishingType::DieCutting,
        FinishingType::Foiling,
    ];

    /// Whether this finish is a lamination (valid for the cover/jacket
    /// lamination slot)
    pub fn is_lamination(&self) -> bool {
        matches!(
            self,
            FinishingType::GlossLamination
                | FinishingType::MattLamination
                | FinishingType::SoftTouchLamination
        )
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "GLOSSLAMINATION" | "GLOSSLAM" | "GLOSS" => Some(FinishingType::GlossLamination),
            "MATTLAMINATION" | "MATTLAM" | "MATT" | "MATTE" => Some(FinishingType::MattLamination),
            "SOFTTOUCHLAMINATION" | "SOFTTOUCH" | "VELVET" => {
                Some(FinishingType::SoftTouchLamination)
            }
            "SPOTUV" | "UV" => Some(FinishingType::SpotUv),
            "EMBOSSING" | "EMBOSS" | "DEBOSS" | "DEBOSSING" => Some(FinishingType::Embossing),
            "DIECUTTING" | "DIECUT" => Some(FinishingType::DieCutting),
            "FOILING" | "FOIL" | "FOILBLOCKING" => Some(FinishingType::Foiling),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FinishingType::GlossLamination => "Gloss Lamination",
            FinishingType::MattLamination => "Matt Lamination",
            FinishingType::SoftTouchLamination => "Soft Touch Lamination",
            FinishingType::SpotUv => "Spot UV",
            FinishingType::Embossing => "Embossing",
            FinishingType::DieCutting => "Die Cutting",
            FinishingType::Foiling => "Foiling",
        }
    }
}

impl std::fmt::Display for FinishingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Turnaround classes and their subtotal multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Turnaround {
    /// Standard schedule: no surcharge
    #[default]
    Standard,
    /// Rush schedule: +15%
    Rush,
    /// Express schedule: +30%
    Express,
}

impl Turnaround {
    /// All turnaround variants for UI selection
    pub const ALL: [Turnaround; 3] = [Turnaround::Standard, Turnaround::Rush, Turnaround::Express];

    /// Subtotal multiplier applied by the pricing layer
    pub fn multiplier(&self) -> f64 {
        match self {
            Turnaround::Standard => 1.00,
            Turnaround::Rush => 1.15,
            Turnaround::Express => 1.30,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "STANDARD" | "STD" | "NORMAL" => Some(Turnaround::Standard),
            "RUSH" => Some(Turnaround::Rush),
            "EXPRESS" | "URGENT" => Some(Turnaround::Express),
            _ => None,
        }
    }
}

/// How the configured percent converts cost into sell price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Percent of sell price: `sell = cost / (1 - p/100)`
    #[default]
    Margin,
    /// Percent of cost: `sell = cost × (1 + p/100)`
    Markup,
}

impl PricingMode {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "MARGIN" => Some(PricingMode::Margin),
            "MARKUP" => Some(PricingMode::Markup),
            _ => None,
        }
    }
}

// ============================================================================
// Raw (pre-validation) Specification
// ============================================================================

/// A text section exactly as collected by a UI - numbers still text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTextSection {
    pub enabled: bool,
    pub label: String,
    pub pages: String,
    pub paper_gsm: String,
    pub paper_stock: String,
    /// Machine identifier; empty means "no machine assigned"
    pub machine: String,
    pub colors_front: String,
    pub colors_back: String,
    pub printing_method: String,
}

/// Cover as collected by a UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCoverSpecification {
    pub paper_gsm: String,
    pub paper_stock: String,
    pub colors_outside: String,
    pub colors_inside: String,
    pub machine: String,
    /// Lamination name; empty or "none" means unlaminated
    pub lamination: String,
}

/// Endleaves as collected by a UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEndleavesSpecification {
    pub paper_gsm: String,
    pub paper_stock: String,
    pub leaves_per_copy: String,
}

/// Dust jacket as collected by a UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawJacketSpecification {
    pub paper_gsm: String,
    pub paper_stock: String,
    pub colors: String,
    pub lamination: String,
}

/// Case board as collected by a UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBoardSpecification {
    pub thickness_mm: String,
}

/// Pricing configuration as collected by a UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPricingConfig {
    pub mode: String,
    pub percent: String,
    pub turnaround: String,
    pub tax_rate_percent: String,
    pub minimum_order_value: String,
    pub currency: String,
}

/// The raw, string/number-mixed job specification.
///
/// This is what the validator consumes. It never reaches a calculator: the
/// raw textual form and the normalized numeric form are two distinct types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawJobSpecification {
    pub trim_width_mm: String,
    pub trim_height_mm: String,
    pub sections: Vec<RawTextSection>,
    pub cover: Option<RawCoverSpecification>,
    pub endleaves: Option<RawEndleavesSpecification>,
    pub jacket: Option<RawJacketSpecification>,
    pub board: Option<RawBoardSpecification>,
    pub binding: String,
    pub finishing: Vec<String>,
    pub destination: String,
    pub quantities: Vec<String>,
    pub pricing: RawPricingConfig,
}

// ============================================================================
// Normalized Specification
// ============================================================================

/// A validated text section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSection {
    /// Disabled sections are carried but contribute nothing
    pub enabled: bool,
    /// User label (e.g., "Text", "Plate Section")
    pub label: String,
    /// Page count; positive multiple of 4
    pub pages: u32,
    /// Paper grammage in gsm
    pub paper_gsm: f64,
    /// Paper stock
    pub paper_stock: PaperStock,
    /// Assigned machine id, if any
    pub machine: Option<String>,
    /// Front color count, 0-4
    pub colors_front: u8,
    /// Back color count, 0-4
    pub colors_back: u8,
    /// Press layout for this section
    pub printing_method: PrintingMethod,
}

impl TextSection {
    /// Effective color count for wastage classification: max of front/back
    pub fn effective_colors(&self) -> u8 {
        self.colors_front.max(self.colors_back)
    }
}

/// A validated cover specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverSpecification {
    pub paper_gsm: f64,
    pub paper_stock: PaperStock,
    pub colors_outside: u8,
    pub colors_inside: u8,
    pub machine: Option<String>,
    pub lamination: Option<FinishingType>,
}

impl CoverSpecification {
    /// Effective color count for wastage classification
    pub fn effective_colors(&self) -> u8 {
        self.colors_outside.max(self.colors_inside)
    }
}

/// Validated endleaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndleavesSpecification {
    pub paper_gsm: f64,
    pub paper_stock: PaperStock,
    /// Trim-size leaves consumed per copy (front + back pairs)
    pub leaves_per_copy: u32,
}

/// Validated dust jacket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JacketSpecification {
    pub paper_gsm: f64,
    pub paper_stock: PaperStock,
    pub colors: u8,
    pub lamination: Option<FinishingType>,
}

/// Validated case board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSpecification {
    pub thickness_mm: f64,
}

/// Validated pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub mode: PricingMode,
    /// Margin or markup percent, [0, 100)
    pub percent: f64,
    pub turnaround: Turnaround,
    /// Tax rate percent, [0, 100]
    pub tax_rate_percent: f64,
    /// Production floor: a discounted order is lifted back up to this value
    pub minimum_order_value: f64,
    /// Declared currency code; the engine never converts
    pub currency: String,
}

/// The normalized, strictly-typed job specification - the validator's output
/// and the only specification type the calculation core accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpecification {
    pub trim_width_mm: f64,
    pub trim_height_mm: f64,
    pub sections: Vec<TextSection>,
    pub cover: Option<CoverSpecification>,
    pub endleaves: Option<EndleavesSpecification>,
    pub jacket: Option<JacketSpecification>,
    pub board: Option<BoardSpecification>,
    pub binding: BindingType,
    pub finishing: Vec<FinishingType>,
    /// Freight route name, resolved against the destination table
    pub destination: String,
    /// Candidate print quantities; one `CostResult` is produced per entry
    pub quantities: Vec<u32>,
    pub pricing: PricingConfig,
}

impl JobSpecification {
    /// Iterator over enabled sections only
    pub fn enabled_sections(&self) -> impl Iterator<Item = &TextSection> {
        self.sections.iter().filter(|s| s.enabled)
    }

    /// Total page count across enabled sections
    pub fn total_pages(&self) -> u32 {
        self.enabled_sections().map(|s| s.pages).sum()
    }

    /// Trim area in square meters
    pub fn trim_area_m2(&self) -> f64 {
        rect_area_m2(
            Millimeters(self.trim_width_mm),
            Millimeters(self.trim_height_mm),
        )
        .0
    }
}
