/// Savings formula chain and the calculator.
pub mod audit;
/// Model constants.
pub mod constants;
pub mod projection;
pub mod rounding;

pub use audit::{AuditInput, AuditResult, Calculator, PropertyType};
pub use constants::SystemConstants;
pub use projection::{Projection, ProjectionConfig, ProjectionPoint};
