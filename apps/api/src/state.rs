use std::sync::Arc;

use crate::colleges::CollegeData;
use crate::errors::AppError;
use crate::llm_client::ChatCompletion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Essay and résumé feedback provider. `None` when `OPENAI_API_KEY` is unset.
    pub openai: Option<Arc<dyn ChatCompletion>>,
    /// Grammar-check provider. `None` when `GROQ_API_KEY` is unset.
    pub groq: Option<Arc<dyn ChatCompletion>>,
    pub colleges: Arc<CollegeData>,
}

impl AppState {
    /// The OpenAI provider, or the 500 answered when its key is not configured.
    pub fn openai(&self) -> Result<&dyn ChatCompletion, AppError> {
        self.openai.as_deref().ok_or_else(|| {
            AppError::MissingConfig("OpenAI API key is not configured".to_string())
        })
    }

    /// The Groq provider, or the 500 answered when its key is not configured.
    pub fn groq(&self) -> Result<&dyn ChatCompletion, AppError> {
        self.groq
            .as_deref()
            .ok_or_else(|| AppError::MissingConfig("Groq API key is not configured".to_string()))
    }
}
