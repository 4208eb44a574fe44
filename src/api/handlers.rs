//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{AuditQuery, AuditResponse, ErrorResponse};
use crate::calc::{Projection, audit};
use crate::error::AuditError;
use crate::region::RegionParameters;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn not_found(e: &AuditError) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// `GET /regions` → 200 + `Vec<RegionParameters>` JSON
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<Vec<RegionParameters>> {
    Json(state.calculator.regions().iter().cloned().collect())
}

/// Returns one region.
///
/// `GET /regions/{id}` → 200 + `RegionParameters` JSON
/// `GET /regions/unknown` → 404 + `ErrorResponse`
pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RegionParameters>, ApiError> {
    state
        .calculator
        .lookup_region(&id)
        .map(|r| Json(r.clone()))
        .map_err(|e| not_found(&e))
}

/// Computes an audit and its projection.
///
/// `GET /audit?region=santiago&bill=80000` → 200 + `AuditResponse` JSON
/// `GET /audit?region=unknown&bill=1` → 404 + `ErrorResponse`
/// Missing or non-numeric parameters are rejected by the `Query` extractor (400).
pub async fn get_audit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, ApiError> {
    let region = state
        .calculator
        .lookup_region(&query.region)
        .map_err(|e| not_found(&e))?;
    let result = audit::compute(query.bill, region, state.calculator.constants());
    let projection = Projection::build(query.bill, result.annual_savings as f64, &state.projection);

    Ok(Json(AuditResponse {
        region: region.clone(),
        result,
        projection,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::calc::{Calculator, ProjectionConfig};

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            calculator: Calculator::chile(),
            projection: ProjectionConfig::default(),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn regions_returns_table() {
        let (status, json) = get_json("/regions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(19));
        assert_eq!(json[0]["id"], "santiago");
    }

    #[tokio::test]
    async fn region_lookup() {
        let (status, json) = get_json("/regions/antofagasta").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["generation_factor"], 2100.0);
        assert_eq!(json["price_kwh"], 155.0);
    }

    #[tokio::test]
    async fn unknown_region_returns_404() {
        let (status, json) = get_json("/regions/atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn audit_returns_result_and_projection() {
        let (status, json) = get_json("/audit?region=santiago&bill=80000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["panel_count"], 8);
        assert_eq!(json["result"]["annual_savings"], 987_360);
        assert_eq!(json["region"]["name"], "Santiago");
        assert_eq!(json["projection"]["points"].as_array().map(Vec::len), Some(21));
    }

    #[tokio::test]
    async fn audit_unknown_region_returns_404() {
        let (status, json) = get_json("/audit?region=nonexistent-slug&bill=50000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json.get("result").is_none());
    }

    #[tokio::test]
    async fn audit_matches_calculator() {
        let state = make_test_state();
        let expected = state
            .calculator
            .compute_audit(150_000.0, "calama")
            .expect("calama should exist");
        let (status, json) = get_json("/audit?region=calama&bill=150000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["result"],
            serde_json::to_value(&expected).expect("result should serialize")
        );
    }

    #[tokio::test]
    async fn audit_bad_bill_returns_400() {
        let (status, _) = get_json("/audit?region=santiago&bill=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
