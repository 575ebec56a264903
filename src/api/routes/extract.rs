//! SoF upload and extraction.
//!
//! Accepts either a multipart file upload or a JSON body carrying raw text
//! or a base64 data URI. One extraction runs at a time; a second request
//! while one is in flight gets a 409.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::agents::event_extractor::{EventExtractorAgent, EventExtractorInput};
use crate::agents::event_summarizer::{EventSummarizerAgent, EventSummarizerInput};
use crate::agents::Agent;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{compute_laytime_outcome, parse_duration_hours};
use crate::config::LaytimeConfig;
use crate::document::{self, DocumentKind};
use crate::models::{ExtractionRecord, LaytimeBreakdown, LaytimeOutcome, PortEvent};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extraction gate status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractParams {
    /// Raw SoF text
    #[serde(default)]
    pub content: Option<String>,

    /// `data:<mime>;base64,<bytes>` document upload
    #[serde(default)]
    pub data_uri: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    #[serde(flatten)]
    pub record: ExtractionRecord,
    /// Deterministic recomputation of the gateway's laytime judgment
    pub outcome: LaytimeOutcome,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: ExtractionStatus,
}

pub async fn extract(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ExtractResponse>, ApiError> {
    let text = read_document_text(request).await?;
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("Document is empty".to_string()));
    }

    // Check if an extraction is already running
    {
        let mut status = state.extraction_status.write().await;
        if *status == ExtractionStatus::Running {
            return Err(ApiError::Conflict(
                "An extraction is already in progress".to_string(),
            ));
        }
        *status = ExtractionStatus::Running;
    }

    // Run the pipeline on its own task: if the client disconnects, axum
    // drops this handler future, but the task still completes and releases
    // the gate.
    let task_state = state.clone();
    let result = tokio::spawn(async move {
        let result = run_extraction(&task_state, text).await;
        let mut status = task_state.extraction_status.write().await;
        *status = ExtractionStatus::Idle;
        result
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))?;

    result.map(Json)
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = *state.extraction_status.read().await;
    Json(StatusResponse { status })
}

/// Pull plain text out of the request, whatever shape it arrived in.
async fn read_document_text(request: Request) -> Result<String, ApiError> {
    let content_type = request
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            if field.name() != Some("file") {
                continue;
            }

            let kind = match field.file_name() {
                Some(name) => DocumentKind::from_name(name)?,
                None => field
                    .content_type()
                    .map(DocumentKind::from_mime)
                    .transpose()?
                    .ok_or_else(|| {
                        ApiError::BadRequest(
                            "Upload has no file name or content type".to_string(),
                        )
                    })?,
            };

            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
            if bytes.len() > MAX_UPLOAD_BYTES {
                return Err(ApiError::BadRequest(
                    "Upload exceeds the 10 MB limit".to_string(),
                ));
            }

            return Ok(document::extract_text(&bytes, kind)?);
        }

        Err(ApiError::BadRequest(
            "Multipart body has no `file` field".to_string(),
        ))
    } else {
        let bytes = axum::body::to_bytes(request.into_body(), MAX_UPLOAD_BYTES)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {}", e)))?;
        let params: ExtractParams = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

        if let Some(content) = params.content {
            return Ok(content);
        }
        if let Some(uri) = params.data_uri {
            return Ok(document::extract_text_from_data_uri(&uri)?);
        }

        Err(ApiError::BadRequest(
            "Provide either `content` or `dataUri`".to_string(),
        ))
    }
}

async fn run_extraction(state: &AppState, text: String) -> Result<ExtractResponse, ApiError> {
    let extractor = EventExtractorAgent::new(state.ai_backend.clone());
    let extracted = extractor
        .execute(EventExtractorInput { sof_content: text })
        .await?;

    // The summary is best-effort; extraction still succeeds without it.
    let summarizer = EventSummarizerAgent::new(state.ai_backend.clone());
    let events_summary = match summarizer
        .execute(EventSummarizerInput {
            events: extracted.events.clone(),
        })
        .await
    {
        Ok(output) => Some(output.summary),
        Err(e) => {
            warn!("Event summary failed: {}", e);
            None
        }
    };

    let outcome = compute_outcome(&state.laytime, &extracted.events, extracted.laytime.as_ref());

    Ok(ExtractResponse {
        record: ExtractionRecord {
            vessel_name: extracted.vessel_name,
            events: extracted.events,
            laytime: extracted.laytime,
            events_summary,
        },
        outcome,
    })
}

/// Recompute laytime figures deterministically from the extracted record.
/// The gateway's totals seed the inputs; configured defaults fill the gaps.
fn compute_outcome(
    defaults: &LaytimeConfig,
    events: &[PortEvent],
    laytime: Option<&LaytimeBreakdown>,
) -> LaytimeOutcome {
    let used_hours = match laytime {
        Some(l) if !l.total_laytime.trim().is_empty() => parse_duration_hours(&l.total_laytime),
        _ => events.iter().map(|e| e.duration_hours()).sum(),
    };

    let allowed_days = laytime
        .map(|l| parse_duration_hours(&l.allowed_laytime) / 24.0)
        .filter(|d| *d > 0.0)
        .unwrap_or(defaults.default_allowed_days);

    compute_laytime_outcome(
        used_hours,
        allowed_days,
        defaults.default_rate_per_day,
        defaults.rate_currency,
        defaults.display_currency,
    )
}
