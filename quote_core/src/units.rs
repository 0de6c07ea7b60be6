//! # Unit Types
//!
//! Type-safe wrappers for print-production units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Print estimation uses a small, consistent set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Metric Units (Primary)
//!
//! The engine works in metric units throughout, matching the trade:
//! - Length: millimeters (mm)
//! - Area: square meters (m²)
//! - Paper weight: grams per square meter (gsm)
//! - Mass: grams (g), kilograms (kg), tonnes (t)
//! - Time: hours (h)
//!
//! ## Example
//!
//! ```rust
//! use quote_core::units::{Millimeters, Kilograms, Grams, rect_area_m2};
//!
//! let width = Millimeters(153.0);
//! let height = Millimeters(234.0);
//! let area = rect_area_m2(width, height);
//! assert!((area.0 - 0.035802).abs() < 1e-9);
//!
//! let weight: Kilograms = Grams(1500.0).into();
//! assert_eq!(weight.0, 1.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length & Area
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Area of a rectangle given in millimeters, expressed in square meters.
///
/// This is the conversion at the heart of the paper area-weight formula:
/// `weight_g = pages × gsm × area_m²`.
pub fn rect_area_m2(width: Millimeters, height: Millimeters) -> SquareMeters {
    SquareMeters(width.0 / 1000.0 * (height.0 / 1000.0))
}

// ============================================================================
// Paper Weight
// ============================================================================

/// Paper grammage in grams per square meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gsm(pub f64);

// ============================================================================
// Mass
// ============================================================================

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl From<Grams> for Kilograms {
    fn from(g: Grams) -> Self {
        Kilograms(g.0 / 1000.0)
    }
}

impl From<Kilograms> for Grams {
    fn from(kg: Kilograms) -> Self {
        Grams(kg.0 * 1000.0)
    }
}

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * 1000.0)
    }
}

impl From<Grams> for Tonnes {
    fn from(g: Grams) -> Self {
        Tonnes(g.0 / 1_000_000.0)
    }
}

// ============================================================================
// Time
// ============================================================================

/// Duration in hours (machine running time, make-ready time)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(Gsm);
impl_arithmetic!(Grams);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Tonnes);
impl_arithmetic!(Hours);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_area() {
        let area = rect_area_m2(Millimeters(1000.0), Millimeters(1000.0));
        assert_eq!(area.0, 1.0);

        let b1 = rect_area_m2(Millimeters(720.0), Millimeters(1020.0));
        assert!((b1.0 - 0.7344).abs() < 1e-9);
    }

    #[test]
    fn test_mass_conversions() {
        let kg: Kilograms = Grams(2500.0).into();
        assert_eq!(kg.0, 2.5);

        let t: Tonnes = Kilograms(1250.0).into();
        assert_eq!(t.0, 1.25);

        let t: Tonnes = Grams(500_000.0).into();
        assert_eq!(t.0, 0.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(153.0);
        let b = Millimeters(47.0);
        assert_eq!((a + b).0, 200.0);
        assert_eq!((a - b).0, 106.0);
        assert_eq!((a * 2.0).0, 306.0);
        assert_eq!((b / 2.0).0, 23.5);
    }

    #[test]
    fn test_serialization() {
        let mm = Millimeters(234.5);
        let json = serde_json::to_string(&mm).unwrap();
        assert_eq!(json, "234.5");

        let roundtrip: Millimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(mm, roundtrip);
    }
}
