//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use solar_audit::calc::{Calculator, SystemConstants};
use solar_audit::region::{RegionParameters, RegionTable};
use solar_audit::wizard::BillLimits;

/// Region with generation factor 1600 and price 165, the worked example.
pub fn reference_region() -> RegionParameters {
    RegionParameters::new("reference", "Reference", 1600.0, 165.0)
        .expect("reference region should be valid")
}

/// Calculator over the reference region only, with default constants.
pub fn reference_calculator() -> Calculator {
    let table = RegionTable::from_regions([reference_region()])
        .expect("single-region table should build");
    Calculator::new(table, SystemConstants::default())
}

/// Built-in calculator.
pub fn chile_calculator() -> Calculator {
    Calculator::chile()
}

/// Default wizard bill limits (20 000 – 600 000, default 80 000).
pub fn default_limits() -> BillLimits {
    BillLimits::default()
}

/// Monthly bills spanning the wizard slider range and beyond.
pub fn bill_grid() -> Vec<f64> {
    let mut bills: Vec<f64> = (0..=120).map(|k| f64::from(k) * 5_000.0).collect();
    bills.extend([1.0, 12_345.67, 77_777.0, 1_000_000.0, 2_500_000.0]);
    bills
}
