//! Record export.
//!
//! Returns the posted extraction record as a JSON attachment named after
//! the vessel.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::ApiError;
use crate::models::ExtractionRecord;

pub async fn export(Json(record): Json<ExtractionRecord>) -> Result<impl IntoResponse, ApiError> {
    let body = serde_json::to_string_pretty(&record)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize record: {}", e)))?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", record.export_file_name()),
        ),
    ];

    Ok((headers, body))
}
