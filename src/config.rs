//! TOML-based audit configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::calc::{Calculator, ProjectionConfig, SystemConstants};
use crate::region::{RegionEntry, RegionTable, chile_entries};
use crate::wizard::BillLimits;

/// Longest accepted projection horizon (years).
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults matching the built-in Chilean preset. Load
/// from TOML with [`AuditConfig::from_toml_file`] or use
/// [`AuditConfig::chile`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Model constants shared by all regions.
    #[serde(default)]
    pub constants: SystemConstants,
    /// Long-horizon projection assumptions.
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Bill input limits of the wizard.
    #[serde(default)]
    pub wizard: BillLimits,
    /// Region parameter table.
    #[serde(default = "chile_entries")]
    pub regions: Vec<RegionEntry>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::chile()
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"constants.panel_wattage_w"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AuditConfig {
    /// Built-in Chilean comuna table with reference constants.
    pub fn chile() -> Self {
        Self {
            constants: SystemConstants::default(),
            projection: ProjectionConfig::default(),
            wizard: BillLimits::default(),
            regions: chile_entries(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["chile"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "chile" => Ok(Self::chile()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let c = &self.constants;
        if !(c.efficiency_margin > 0.0 && c.efficiency_margin <= 1.0) {
            errors.push(ConfigError::new(
                "constants.efficiency_margin",
                "must be in (0.0, 1.0]",
            ));
        }
        for (field, value) in [
            ("constants.panel_wattage_w", c.panel_wattage_w),
            ("constants.cost_per_kwp", c.cost_per_kwp),
            ("constants.co2_kg_per_kwh", c.co2_kg_per_kwh),
            ("constants.payback_sentinel_years", c.payback_sentinel_years),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError::new(field, "must be a finite number > 0"));
            }
        }

        let p = &self.projection;
        if p.years == 0 || p.years > MAX_PROJECTION_YEARS {
            errors.push(ConfigError::new(
                "projection.years",
                format!("must be in [1, {MAX_PROJECTION_YEARS}]"),
            ));
        }
        for (field, value) in [
            ("projection.price_escalation", p.price_escalation),
            ("projection.savings_growth", p.savings_growth),
        ] {
            if !(value.is_finite() && value > -1.0) {
                errors.push(ConfigError::new(field, "must be a finite number > -1.0"));
            }
        }

        let w = &self.wizard;
        if !(w.bill_min.is_finite() && w.bill_max.is_finite() && w.bill_min <= w.bill_max) {
            errors.push(ConfigError::new(
                "wizard.bill_min",
                "must be finite and <= wizard.bill_max",
            ));
        } else if !w.accepts(w.default_bill) {
            errors.push(ConfigError::new(
                "wizard.default_bill",
                "must be within [wizard.bill_min, wizard.bill_max]",
            ));
        }

        if self.regions.is_empty() {
            errors.push(ConfigError::new("regions", "must contain at least one region"));
        }
        if let Err(e) = RegionTable::from_entries(&self.regions) {
            errors.push(ConfigError::new("regions", e.to_string()));
        }

        errors
    }

    /// Validates the configuration and builds the calculator from it.
    ///
    /// # Errors
    ///
    /// Returns the first validation error.
    pub fn build_calculator(&self) -> Result<Calculator, ConfigError> {
        if let Some(e) = self.validate().into_iter().next() {
            return Err(e);
        }
        let table = RegionTable::from_entries(&self.regions)
            .map_err(|e| ConfigError::new("regions", e.to_string()))?;
        Ok(Calculator::new(table, self.constants.clone()))
    }
}
