//! Laytime recalculation.
//!
//! Recomputes the laytime figures from explicit terms, so the UI can adjust
//! the allowance, rate, or currencies without re-running extraction.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{compute_laytime_outcome, parse_duration_hours};
use crate::models::{Currency, LaytimeOutcome, LaytimeParameters};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaytimeRequest {
    /// Laytime consumed, in hours
    #[serde(default)]
    pub used_hours: Option<f64>,

    /// Alternative to `usedHours`: a human-readable duration string
    #[serde(default)]
    pub total_laytime: Option<String>,

    #[serde(default)]
    pub allowed_laytime_days: Option<f64>,

    #[serde(default)]
    pub demurrage_rate_per_day: Option<f64>,

    #[serde(default)]
    pub rate_currency: Option<Currency>,

    #[serde(default)]
    pub display_currency: Option<Currency>,
}

pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<LaytimeRequest>,
) -> Result<Json<LaytimeOutcome>, ApiError> {
    let used_hours = req
        .used_hours
        .or_else(|| req.total_laytime.as_deref().map(parse_duration_hours))
        .ok_or_else(|| {
            ApiError::BadRequest("Provide either `usedHours` or `totalLaytime`".to_string())
        })?;

    let defaults = &state.laytime;
    let params = LaytimeParameters {
        allowed_laytime_days: req
            .allowed_laytime_days
            .unwrap_or(defaults.default_allowed_days),
        demurrage_rate_per_day: req
            .demurrage_rate_per_day
            .unwrap_or(defaults.default_rate_per_day),
        rate_currency: req.rate_currency.unwrap_or(defaults.rate_currency),
        display_currency: req.display_currency.unwrap_or(defaults.display_currency),
    }
    .sanitized();

    let outcome = compute_laytime_outcome(
        used_hours,
        params.allowed_laytime_days,
        params.demurrage_rate_per_day,
        params.rate_currency,
        params.display_currency,
    );

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use crate::agents::backend::MockBackend;
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::LaytimeConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_app() -> axum::Router {
        let state = AppState::new(Arc::new(MockBackend::new("{}")), LaytimeConfig::default());
        build_router(state)
    }

    async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_demurrage_case() {
        let (status, json) = post_json(
            test_app(),
            "/api/laytime",
            r#"{"usedHours": 80.0, "allowedLaytimeDays": 3.0, "demurrageRatePerDay": 20000.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["time_saved_hours"], 0.0);
        assert!((json["demurrage_hours"].as_f64().unwrap() - 8.0).abs() < 1e-9);
        assert!((json["demurrage_cost"].as_f64().unwrap() - 6666.67).abs() < 0.01);
        assert_eq!(json["demurrage_display"], "8h");
    }

    #[tokio::test]
    async fn test_despatch_case() {
        let (status, json) = post_json(
            test_app(),
            "/api/laytime",
            r#"{"usedHours": 50.0, "allowedLaytimeDays": 3.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!((json["time_saved_hours"].as_f64().unwrap() - 22.0).abs() < 1e-9);
        assert_eq!(json["demurrage_hours"], 0.0);
        assert_eq!(json["demurrage_cost"], 0.0);
    }

    #[tokio::test]
    async fn test_display_currency_conversion() {
        let (status, json) = post_json(
            test_app(),
            "/api/laytime",
            r#"{"usedHours": 80.0, "allowedLaytimeDays": 3.0, "demurrageRatePerDay": 20000.0, "rateCurrency": "USD", "displayCurrency": "EUR"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!((json["demurrage_cost"].as_f64().unwrap() - 6133.33).abs() < 0.01);
        assert_eq!(json["display_currency"], "EUR");
    }

    #[tokio::test]
    async fn test_total_laytime_string_input() {
        let (status, json) = post_json(
            test_app(),
            "/api/laytime",
            r#"{"totalLaytime": "3 days, 8 hours", "allowedLaytimeDays": 3.0}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!((json["demurrage_hours"].as_f64().unwrap() - 8.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        // Only hours supplied; allowance and rate come from config defaults.
        let (status, json) =
            post_json(test_app(), "/api/laytime", r#"{"usedHours": 72.0}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["time_saved_hours"], 0.0);
        assert_eq!(json["demurrage_hours"], 0.0);
    }

    #[tokio::test]
    async fn test_missing_input_rejected() {
        let (status, json) = post_json(test_app(), "/api/laytime", "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }
}
