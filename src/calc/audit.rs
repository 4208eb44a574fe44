//! Savings calculator: monthly bill + region parameters → sized system and payback.
//!
//! Each formula step is a pure function over full-precision `f64`. Rounding
//! happens once, in [`compute`], when the [`AuditResult`] is assembled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::constants::SystemConstants;
use super::rounding::{round_to, round_whole};
use crate::error::AuditError;
use crate::region::{RegionParameters, RegionTable};

/// Months per year.
const MONTHS: f64 = 12.0;
/// Horizon of the net-savings figure (years).
pub const NET_SAVINGS_YEARS: f64 = 20.0;

/// Kind of property the audit is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Detached house with its own roof.
    House,
    /// Business premises.
    Commercial,
    /// Rented apartment; usually cannot install on the roof.
    Apartment,
    /// Not answered yet.
    #[default]
    Unknown,
}

impl PropertyType {
    /// Whether a lead for this property is considered qualified.
    ///
    /// Only apartments are disqualified; the audit still runs for them.
    pub fn is_qualified(self) -> bool {
        self != Self::Apartment
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::House => "house",
            Self::Commercial => "commercial",
            Self::Apartment => "apartment",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(Self::House),
            "commercial" => Ok(Self::Commercial),
            "apartment" => Ok(Self::Apartment),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!(
                "unknown property type \"{other}\", expected house, commercial, or apartment"
            )),
        }
    }
}

/// User-supplied parameters for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditInput {
    /// Region identifier, possibly unmatched.
    pub region_id: String,
    /// Monthly electricity bill (currency). Not validated here.
    pub monthly_bill: f64,
    /// Property category.
    pub property_type: PropertyType,
}

impl AuditInput {
    /// Runs the calculator on this input's bill and region only.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownRegion` if the region id is unmatched.
    pub fn audit(&self, calculator: &Calculator) -> Result<AuditResult, AuditError> {
        calculator.compute_audit(self.monthly_bill, &self.region_id)
    }
}

/// Computed, presentation-rounded audit figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditResult {
    /// Annual energy consumption (kWh, whole).
    pub annual_consumption_kwh: i64,
    /// Required system power (kWp, 2 dp).
    pub required_power_kwp: f64,
    /// Smallest panel count covering the required power.
    pub panel_count: u32,
    /// Power actually installed by `panel_count` panels (kWp, 2 dp).
    pub installed_power_kwp: f64,
    /// Annual savings (currency, whole).
    pub annual_savings: i64,
    /// Installation cost (currency, whole).
    pub installation_cost: i64,
    /// Monthly bill after solar, never negative (currency, whole).
    pub monthly_bill_with_solar: i64,
    /// Payback period (years, 1 dp), or the sentinel when savings ≤ 0.
    pub payback_years: f64,
    /// Savings over 20 years minus installation cost (currency, whole).
    pub twenty_year_savings: i64,
    /// CO2 avoided per year (kg, whole).
    pub co2_avoided_kg: i64,
}

/// Annual consumption (kWh) implied by a monthly bill at a unit price.
pub fn annual_consumption_kwh(monthly_bill: f64, price_kwh: f64) -> f64 {
    monthly_bill / price_kwh * MONTHS
}

/// System power (kWp) needed to cover `annual_consumption` after losses.
pub fn required_power_kwp(
    annual_consumption: f64,
    generation_factor: f64,
    constants: &SystemConstants,
) -> f64 {
    annual_consumption / (generation_factor * constants.efficiency_margin)
}

/// Panels needed to reach `required_power`, rounded up.
///
/// Negative or NaN power yields 0 panels. The count saturates at
/// `u32::MAX`, so for infinite or absurdly large power the installed power
/// falls short of the requirement.
pub fn panel_count(required_power: f64, constants: &SystemConstants) -> u32 {
    let panels = (required_power * 1000.0 / constants.panel_wattage_w).ceil();
    // `as` saturates; NaN.max(0.0) is 0.0
    panels.max(0.0) as u32
}

/// Nameplate power (kWp) of `panels` panels.
pub fn installed_power_kwp(panels: u32, constants: &SystemConstants) -> f64 {
    f64::from(panels) * constants.panel_wattage_w / 1000.0
}

/// Annual savings (currency) produced by an installed system.
pub fn annual_savings(
    installed_power: f64,
    generation_factor: f64,
    price_kwh: f64,
    constants: &SystemConstants,
) -> f64 {
    installed_power * generation_factor * constants.efficiency_margin * price_kwh
}

/// Installation cost (currency) of `power_kwp`.
pub fn installation_cost(power_kwp: f64, constants: &SystemConstants) -> f64 {
    power_kwp * constants.cost_per_kwp
}

/// Years for savings to repay the installation.
///
/// Returns the sentinel when `annual_savings <= 0`.
pub fn payback_years(installation_cost: f64, annual_savings: f64, constants: &SystemConstants) -> f64 {
    if annual_savings <= 0.0 {
        return constants.payback_sentinel_years;
    }
    installation_cost / annual_savings
}

/// Residual monthly bill after solar, floored at zero.
pub fn monthly_bill_with_solar(monthly_bill: f64, annual_savings: f64) -> f64 {
    (monthly_bill - annual_savings / MONTHS).max(0.0)
}

/// Savings over [`NET_SAVINGS_YEARS`] minus the installation cost.
pub fn twenty_year_net_savings(annual_savings: f64, installation_cost: f64) -> f64 {
    annual_savings * NET_SAVINGS_YEARS - installation_cost
}

/// Annual CO2 avoided (kg) by displacing `annual_consumption` of grid power.
pub fn co2_avoided_kg(annual_consumption: f64, constants: &SystemConstants) -> f64 {
    annual_consumption * constants.co2_kg_per_kwh
}

/// Runs the full formula chain for one region.
///
/// Financial figures use the installed power of the whole panel count, not
/// the unrounded required power.
pub fn compute(monthly_bill: f64, region: &RegionParameters, constants: &SystemConstants) -> AuditResult {
    let factor = region.generation_factor();
    let price = region.price_kwh();

    let consumption = annual_consumption_kwh(monthly_bill, price);
    let required = required_power_kwp(consumption, factor, constants);
    let panels = panel_count(required, constants);
    let installed = installed_power_kwp(panels, constants);

    let savings = annual_savings(installed, factor, price, constants);
    let cost = installation_cost(installed, constants);
    let payback = payback_years(cost, savings, constants);
    let bill_with_solar = monthly_bill_with_solar(monthly_bill, savings);
    let net = twenty_year_net_savings(savings, cost);
    let co2 = co2_avoided_kg(consumption, constants);

    AuditResult {
        annual_consumption_kwh: round_whole(consumption),
        required_power_kwp: round_to(required, 2),
        panel_count: panels,
        installed_power_kwp: round_to(installed, 2),
        annual_savings: round_whole(savings),
        installation_cost: round_whole(cost),
        monthly_bill_with_solar: round_whole(bill_with_solar),
        payback_years: round_to(payback, 1),
        twenty_year_savings: round_whole(net),
        co2_avoided_kg: round_whole(co2),
    }
}

/// Region table plus constants: the whole calculator state.
///
/// Immutable after construction; share it by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct Calculator {
    regions: RegionTable,
    constants: SystemConstants,
}

impl Calculator {
    /// Creates a calculator over a validated table and constants.
    pub fn new(regions: RegionTable, constants: SystemConstants) -> Self {
        Self { regions, constants }
    }

    /// Built-in Chilean table with default constants.
    pub fn chile() -> Self {
        Self::new(RegionTable::chile(), SystemConstants::default())
    }

    /// Region table in use.
    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Constants in use.
    pub fn constants(&self) -> &SystemConstants {
        &self.constants
    }

    /// Resolves a region so its context can be shown before the audit runs.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownRegion` if the id has no entry.
    pub fn lookup_region(&self, region_id: &str) -> Result<&RegionParameters, AuditError> {
        self.regions.lookup(region_id)
    }

    /// Computes the audit for a monthly bill in a region.
    ///
    /// Zero or negative bills are not rejected; they flow through the
    /// formulas.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownRegion` if the id has no entry. No
    /// partial result is produced.
    pub fn compute_audit(&self, monthly_bill: f64, region_id: &str) -> Result<AuditResult, AuditError> {
        let region = self.regions.lookup(region_id).inspect_err(|_| {
            warn!(region_id, "audit requested for unknown region");
        })?;
        let result = compute(monthly_bill, region, &self.constants);
        debug!(
            region_id,
            monthly_bill,
            panels = result.panel_count,
            annual_savings = result.annual_savings,
            payback_years = result.payback_years,
            "audit computed"
        );
        Ok(result)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::chile()
    }
}
