//! Currency formatting and the text rendition of a finished audit.

use std::fmt;

use serde::Serialize;

use crate::calc::projection::{Projection, ProjectionConfig};
use crate::calc::rounding::{round_to, round_whole};
use crate::calc::{AuditInput, AuditResult};
use crate::region::RegionParameters;

/// Formats whole pesos the es-CL way: `$1.234.567`.
///
/// ```
/// use solar_audit::report::format_clp;
///
/// assert_eq!(format_clp(80_000), "$80.000");
/// assert_eq!(format_clp(-1_500), "-$1.500");
/// ```
pub fn format_clp(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

/// Compact axis-style amount: `$15.6M` from a million up, `$950K` below.
pub fn format_millions(value: i64) -> String {
    let v = value as f64;
    if v >= 1_000_000.0 {
        format!("${:.1}M", round_to(v / 1_000_000.0, 1))
    } else {
        format!("${:.0}K", round_to(v / 1_000.0, 0))
    }
}

/// Everything the result page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Region the audit ran for.
    pub region: RegionParameters,
    /// Collected answers.
    pub input: AuditInput,
    /// Audit figures.
    pub result: AuditResult,
    /// Cumulative cost projection.
    pub projection: Projection,
}

impl AuditReport {
    /// Assembles the report and its projection.
    pub fn new(
        region: RegionParameters,
        input: AuditInput,
        result: AuditResult,
        projection: &ProjectionConfig,
    ) -> Self {
        let projection = Projection::build(input.monthly_bill, result.annual_savings as f64, projection);
        Self {
            region,
            input,
            result,
            projection,
        }
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        let horizon = self.projection.points.last().map_or(0, |p| p.year);
        writeln!(f, "--- Solar Audit: {} ---", self.region.name())?;
        writeln!(f, "Annual savings:        {}/year", format_clp(r.annual_savings))?;
        writeln!(f, "Panels needed:         {} panels", r.panel_count)?;
        writeln!(f, "Payback:               {} years", r.payback_years)?;
        writeln!(f, "CO2 avoided:           {} kg/year", r.co2_avoided_kg)?;
        writeln!(f, "Annual consumption:    {} kWh", r.annual_consumption_kwh)?;
        writeln!(f, "Required power:        {} kWp", r.required_power_kwp)?;
        writeln!(f, "Installed power:       {} kWp", r.installed_power_kwp)?;
        writeln!(f, "Installation cost:     {}", format_clp(r.installation_cost))?;
        writeln!(
            f,
            "Current bill:          {}/month",
            format_clp(round_whole(self.input.monthly_bill))
        )?;
        writeln!(
            f,
            "Bill with solar:       {}/month",
            format_clp(r.monthly_bill_with_solar)
        )?;
        writeln!(
            f,
            "20-year net savings:   {}",
            format_clp(r.twenty_year_savings)
        )?;
        match self.projection.break_even_year(r.installation_cost) {
            Some(year) => writeln!(f, "Break-even:            year {year}")?,
            None => writeln!(f, "Break-even:            beyond year {horizon}")?,
        }
        write!(
            f,
            "{horizon}-year projection:   {} saved",
            format_millions(self.projection.difference())
        )?;
        if !self.input.property_type.is_qualified() {
            write!(
                f,
                "\nWarning: apartments usually face restrictions on solar installation; \
                 check with your building administration or consider shared solar."
            )?;
        }
        Ok(())
    }
}
