//! Multi-year cumulative electricity cost, with and without solar.
//!
//! Grid prices escalate yearly; solar savings grow at a slower rate. The
//! model is a presentation aid for the savings chart, not part of the
//! single-year audit figures.

use serde::{Deserialize, Serialize};

use super::rounding::round_whole;

/// Growth assumptions of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Yearly electricity price increase (fraction, e.g. 0.05).
    pub price_escalation: f64,
    /// Yearly growth of the avoided cost (fraction, e.g. 0.02).
    pub savings_growth: f64,
    /// Horizon in years; the projection has `years + 1` points.
    pub years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            price_escalation: 0.05,
            savings_growth: 0.02,
            years: 20,
        }
    }
}

/// One point of the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionPoint {
    /// Year index, 0-based.
    pub year: u32,
    /// Cumulative grid cost without solar (currency, whole).
    pub cumulative_grid: i64,
    /// Cumulative grid cost with solar (currency, whole).
    pub cumulative_solar: i64,
}

impl ProjectionPoint {
    /// Cumulative amount saved by this year.
    pub fn difference(&self) -> i64 {
        self.cumulative_grid - self.cumulative_solar
    }
}

/// Year-by-year cumulative costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Points for years `0..=years`.
    pub points: Vec<ProjectionPoint>,
}

impl Projection {
    /// Builds the projection for a monthly bill and the audit's annual savings.
    ///
    /// Year `y` grid cost sums years `0..=y`; the solar-side cost sums the
    /// residual bill of years `0..y`, so year 0 is always 0.
    ///
    /// # Arguments
    ///
    /// * `monthly_bill` - Current monthly bill (currency)
    /// * `annual_savings` - Rounded annual savings from the audit
    /// * `cfg` - Growth assumptions
    pub fn build(monthly_bill: f64, annual_savings: f64, cfg: &ProjectionConfig) -> Self {
        let annual_bill = monthly_bill * 12.0;
        let grid_factor = 1.0 + cfg.price_escalation;
        let savings_factor = 1.0 + cfg.savings_growth;

        let mut points = Vec::with_capacity(cfg.years as usize + 1);
        let mut grid = 0.0_f64;
        let mut solar = 0.0_f64;
        for year in 0..=cfg.years {
            let exp = i32::try_from(year).unwrap_or(i32::MAX);
            let yearly_bill = annual_bill * grid_factor.powi(exp);
            grid += yearly_bill;

            points.push(ProjectionPoint {
                year,
                cumulative_grid: round_whole(grid),
                cumulative_solar: round_whole(solar),
            });

            // lags one year behind the grid sum
            solar += (yearly_bill - annual_savings * savings_factor.powi(exp)).max(0.0);
        }
        Self { points }
    }

    /// Cumulative savings at the horizon.
    pub fn difference(&self) -> i64 {
        self.points.last().map_or(0, ProjectionPoint::difference)
    }

    /// Year at which cumulative savings first exceed `installation_cost`.
    pub fn break_even_year(&self, installation_cost: i64) -> Option<u32> {
        self.points
            .iter()
            .find(|p| p.difference() >= installation_cost)
            .map(|p| p.year)
    }
}
