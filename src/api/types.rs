//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::calc::{AuditResult, Projection};
use crate::region::RegionParameters;

/// Audit response: the region used, the figures, and the chart data.
#[derive(Debug, Serialize)]
pub struct AuditResponse {
    /// Region the audit ran for.
    pub region: RegionParameters,
    /// Audit figures.
    pub result: AuditResult,
    /// Cumulative cost projection.
    pub projection: Projection,
}

/// Query parameters for the audit endpoint.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Region identifier.
    pub region: String,
    /// Monthly bill (currency).
    pub bill: f64,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
