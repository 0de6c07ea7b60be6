//! Machine profiles: press physics and sheet geometry.
//!
//! A profile with a positive rated speed carries enough physics for the
//! printing calculator's machine-cost path; a profile without one (or a job
//! whose machine id resolves to no profile at all) drops the calculation to
//! the legacy impression-rate table.
//!
//! Profiles are owned and edited by the rate-management store. The engine
//! receives a read-only snapshot and resolves ids against it once, up front;
//! no calculator reaches into a store.

use serde::{Deserialize, Serialize};

use super::impressions::MachineClass;

/// Physical and commercial profile of one press
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineProfile {
    /// Stable identifier jobs reference (e.g., "sm102")
    pub id: String,
    /// Display name (e.g., "Speedmaster SM 102-8P")
    pub name: String,
    /// Format class, resolved when the profile is created
    pub class: MachineClass,
    /// Maximum sheet width (mm)
    pub max_sheet_width_mm: f64,
    /// Maximum sheet height (mm)
    pub max_sheet_height_mm: f64,
    /// Non-printable gripper margin along one sheet edge (mm)
    pub gripper_margin_mm: f64,
    /// Non-printable margin on the remaining edges (mm)
    pub edge_margin_mm: f64,
    /// Rated running speed in sheets per hour; 0 means "no physics profile"
    pub speed_sheets_per_hour: f64,
    /// Base charge-out rate per running hour
    pub hourly_rate: f64,
    /// Ink consumption cost per running hour
    pub ink_cost_per_hour: f64,
    /// Power draw under load (kW)
    pub power_kw: f64,
    /// Electricity cost per kWh
    pub electricity_rate_per_kwh: f64,
    /// Flat make-ready cost per form
    pub make_ready_flat: f64,
    /// Make-ready time per form (hours)
    pub make_ready_hours: f64,
    /// Cost per plate on this press's CTP line
    pub plate_cost: f64,
}

impl MachineProfile {
    /// Usable sheet (width, height) in mm after gripper and edge margins
    pub fn usable_sheet_mm(&self) -> (f64, f64) {
        (
            self.max_sheet_width_mm - 2.0 * self.edge_margin_mm,
            self.max_sheet_height_mm - self.gripper_margin_mm - self.edge_margin_mm,
        )
    }

    /// Whether the physics-based costing path applies
    pub fn uses_physics(&self) -> bool {
        self.speed_sheets_per_hour > 0.0
    }

    /// All-in cost per running hour: base rate + ink + power
    pub fn hourly_cost(&self) -> f64 {
        self.hourly_rate + self.ink_cost_per_hour + self.power_kw * self.electricity_rate_per_kwh
    }

    /// A small representative fleet for demos and tests
    pub fn standard_fleet() -> Vec<MachineProfile> {
        vec![
            MachineProfile {
                id: "sm102".to_string(),
                name: "Speedmaster SM 102".to_string(),
                class: MachineClass::FullSize,
                max_sheet_width_mm: 1020.0,
                max_sheet_height_mm: 720.0,
                gripper_margin_mm: 14.0,
                edge_margin_mm: 8.0,
                speed_sheets_per_hour: 10_000.0,
                hourly_rate: 95.0,
                ink_cost_per_hour: 12.0,
                power_kw: 55.0,
                electricity_rate_per_kwh: 0.14,
                make_ready_flat: 25.0,
                make_ready_hours: 0.33,
                plate_cost: 7.0,
            },
            MachineProfile {
                id: "sm74".to_string(),
                name: "Speedmaster SM 74".to_string(),
                class: MachineClass::HalfSize,
                max_sheet_width_mm: 740.0,
                max_sheet_height_mm: 520.0,
                gripper_margin_mm: 12.0,
                edge_margin_mm: 6.0,
                speed_sheets_per_hour: 12_000.0,
                hourly_rate: 70.0,
                ink_cost_per_hour: 8.0,
                power_kw: 32.0,
                electricity_rate_per_kwh: 0.14,
                make_ready_flat: 18.0,
                make_ready_hours: 0.25,
                plate_cost: 5.0,
            },
            // Kept without physics: prices through the legacy table
            MachineProfile {
                id: "gto52".to_string(),
                name: "GTO 52".to_string(),
                class: MachineClass::QuarterSize,
                max_sheet_width_mm: 520.0,
                max_sheet_height_mm: 360.0,
                gripper_margin_mm: 10.0,
                edge_margin_mm: 5.0,
                speed_sheets_per_hour: 0.0,
                hourly_rate: 0.0,
                ink_cost_per_hour: 0.0,
                power_kw: 0.0,
                electricity_rate_per_kwh: 0.0,
                make_ready_flat: 0.0,
                make_ready_hours: 0.0,
                plate_cost: 3.5,
            },
        ]
    }
}

/// Resolve a machine id against a profile snapshot (case-insensitive on id,
/// then on display name). `None` when the job names no machine or the
/// snapshot has no match - the caller then falls back to class-based
/// defaults.
pub fn resolve_profile<'a>(
    profiles: &'a [MachineProfile],
    id: Option<&str>,
) -> Option<&'a MachineProfile> {
    let id = id?.trim();
    if id.is_empty() {
        return None;
    }
    profiles
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
        .or_else(|| profiles.iter().find(|p| p.name.eq_ignore_ascii_case(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_sheet() {
        let fleet = MachineProfile::standard_fleet();
        let sm102 = &fleet[0];
        let (w, h) = sm102.usable_sheet_mm();
        assert_eq!(w, 1004.0);
        assert_eq!(h, 698.0);
    }

    #[test]
    fn test_physics_flag() {
        let fleet = MachineProfile::standard_fleet();
        assert!(fleet[0].uses_physics());
        assert!(!fleet[2].uses_physics());
    }

    #[test]
    fn test_hourly_cost() {
        let fleet = MachineProfile::standard_fleet();
        let sm102 = &fleet[0];
        // 95 + 12 + 55 * 0.14
        assert!((sm102.hourly_cost() - 114.7).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_profile() {
        let fleet = MachineProfile::standard_fleet();
        assert!(resolve_profile(&fleet, Some("SM102")).is_some());
        assert!(resolve_profile(&fleet, Some("Speedmaster SM 74")).is_some());
        assert!(resolve_profile(&fleet, Some("unknown")).is_none());
        assert!(resolve_profile(&fleet, None).is_none());
        assert!(resolve_profile(&fleet, Some("  ")).is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let fleet = MachineProfile::standard_fleet();
        let json = serde_json::to_string(&fleet).unwrap();
        let roundtrip: Vec<MachineProfile> = serde_json::from_str(&json).unwrap();
        assert_eq!(fleet, roundtrip);
    }
}
