//! Error taxonomy for region lookup, table construction, and wizard transitions.

use thiserror::Error;

use crate::wizard::WizardStep;

/// Failure of a calculator operation.
///
/// The only way a lookup or audit can fail is an unmatched region
/// identifier; numeric edge cases flow through the formulas instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// No entry in the parameter table for this identifier.
    #[error("unknown region \"{0}\"")]
    UnknownRegion(String),
}

/// A region entry that cannot enter the parameter table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// Generation factor or unit price is zero, negative, or not finite.
    #[error("region \"{id}\": {field} must be a positive finite number, got {value}")]
    NonPositive {
        /// Region identifier.
        id: String,
        /// Offending field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Identifier is empty.
    #[error("region identifier must not be empty")]
    EmptyId,
    /// Two entries share the same identifier.
    #[error("duplicate region \"{0}\"")]
    Duplicate(String),
}

/// Rejected wizard transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// Transition called from the wrong step.
    #[error("cannot do this at step {actual:?}, expected {expected:?}")]
    WrongStep {
        /// Step the transition requires.
        expected: WizardStep,
        /// Step the session is at.
        actual: WizardStep,
    },
    /// Selected location has no entry in the parameter table.
    #[error(transparent)]
    Region(#[from] AuditError),
    /// Bill outside the accepted input range.
    #[error("monthly bill {bill} outside [{min}, {max}]")]
    BillOutOfRange {
        /// Rejected amount.
        bill: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },
    /// Contact form did not validate.
    #[error("invalid contact: {0}")]
    InvalidContact(String),
    /// Step has no meaning here.
    #[error("cannot go back from step {0:?}")]
    NoPreviousStep(WizardStep),
}
