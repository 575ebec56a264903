//! Assistant chat endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::agents::assistant::{AssistantAgent, AssistantInput};
use crate::agents::Agent;
use crate::api::state::AppState;
use crate::api::ApiError;

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub query: String,

    /// Optional JSON of the currently loaded extraction record
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub response: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query must not be empty".to_string()));
    }

    let agent = AssistantAgent::new(state.ai_backend.clone());
    let output = agent
        .execute(AssistantInput {
            query: req.query,
            context: req.context,
        })
        .await?;

    Ok(Json(AssistantResponse {
        response: output.response,
    }))
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
    async fn test_assistant_answers() {
        let state = AppState::new(
            Arc::new(MockBackend::new("Upload a SoF file to get started.")),
            LaytimeConfig::default(),
        );
        let app = build_router(state);

        let (status, json) = post_json(
            app,
            "/api/assistant",
            r#"{"query": "How do I upload a document?"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["response"].as_str().unwrap().contains("Upload"));
    }

    #[tokio::test]
    async fn test_assistant_rejects_empty_query() {
        let state = AppState::new(Arc::new(MockBackend::new("")), LaytimeConfig::default());
        let app = build_router(state);

        let (status, json) = post_json(app, "/api/assistant", r#"{"query": "  "}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_assistant_quota_exceeded() {
        let state = AppState::new(
            Arc::new(MockBackend::rate_limited()),
            LaytimeConfig::default(),
        );
        let app = build_router(state);

        let (status, _) = post_json(app, "/api/assistant", r#"{"query": "hello"}"#).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
}
