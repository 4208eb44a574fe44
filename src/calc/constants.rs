//! System-wide sizing and cost constants shared by every region.

use serde::{Deserialize, Serialize};

/// Fixed constants of the savings model.
///
/// Constructed once from configuration and shared by reference with the
/// calculator. Every field must be strictly positive; [`crate::config`]
/// rejects anything else before a calculator is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConstants {
    /// Derating for inverter, wiring, and soiling losses (0.0–1.0].
    pub efficiency_margin: f64,
    /// Nameplate wattage of one panel (W).
    pub panel_wattage_w: f64,
    /// Installed cost per kWp (currency).
    pub cost_per_kwp: f64,
    /// Displaced grid emission intensity (kg CO2 per kWh).
    pub co2_kg_per_kwh: f64,
    /// Payback reported when the system never pays back (years).
    pub payback_sentinel_years: f64,
}

impl Default for SystemConstants {
    fn default() -> Self {
        Self {
            efficiency_margin: 0.85,
            panel_wattage_w: 550.0,
            cost_per_kwp: 950_000.0,
            co2_kg_per_kwh: 0.4,
            payback_sentinel_years: 999.0,
        }
    }
}
