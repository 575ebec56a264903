use std::sync::Arc;

use crate::agents::backend::AiBackend;
use crate::api::routes::extract::ExtractionStatus;
use crate::config::LaytimeConfig;

#[derive(Clone)]
pub struct AppState {
    pub ai_backend: Arc<dyn AiBackend>,
    pub laytime: LaytimeConfig,
    pub extraction_status: Arc<tokio::sync::RwLock<ExtractionStatus>>,
}

impl AppState {
    pub fn new(ai_backend: Arc<dyn AiBackend>, laytime: LaytimeConfig) -> Self {
        Self {
            ai_backend,
            laytime,
            extraction_status: Arc::new(tokio::sync::RwLock::new(ExtractionStatus::default())),
        }
    }
}
