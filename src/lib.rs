//! Solar-panel savings audit: region table, savings calculator, and the
//! lead-capture wizard around them.

#[cfg(feature = "api")]
pub mod api;
/// Savings formulas, calculator, and projection.
pub mod calc;
pub mod config;
pub mod error;
pub mod io;
pub mod region;
pub mod report;
pub mod wizard;

pub use calc::{AuditInput, AuditResult, Calculator, PropertyType};
pub use error::{AuditError, RegionError, WizardError};
pub use region::{RegionParameters, RegionTable};
