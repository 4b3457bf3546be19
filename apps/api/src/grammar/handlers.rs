//! Axum route handlers for grammar checking and the highlight overlay.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::grammar::highlight::{
    apply_all_corrections, apply_correction, build_overlay, Segment,
};
use crate::grammar::models::{GrammarCheckResult, GrammarError};
use crate::grammar::prompts::{
    grammar_user_prompt, GRAMMAR_CHECK_SYSTEM, GRAMMAR_CHECK_TEMPERATURE,
};
use crate::llm_client::prompts::with_json_only;
use crate::llm_client::{call_json, CompletionRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GrammarCheckRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    pub text: String,
    #[serde(default)]
    pub errors: Vec<GrammarError>,
    #[serde(default = "default_true")]
    pub enable_checking: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct HighlightResponse {
    pub html: String,
    pub segments: Vec<Segment>,
    pub error_count: usize,
    /// The text with every suggestion applied; absent when nothing would change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub text: String,
    #[serde(default)]
    pub errors: Vec<GrammarError>,
    /// Apply only `errors[index]`; all of them when absent.
    #[serde(default)]
    pub index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /essay/grammar-check/api
///
/// Asks the grammar model for flagged spans. Blank text short-circuits to an
/// empty list without an upstream call.
pub async fn handle_grammar_check(
    State(state): State<AppState>,
    AppJson(request): AppJson<GrammarCheckRequest>,
) -> Result<Json<GrammarCheckResult>, AppError> {
    let text = request.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(Json(GrammarCheckResult::default()));
    }
    let llm = state.groq()?;

    let result: GrammarCheckResult = call_json(
        llm,
        CompletionRequest {
            system: with_json_only(GRAMMAR_CHECK_SYSTEM),
            user: grammar_user_prompt(&text),
            temperature: GRAMMAR_CHECK_TEMPERATURE,
            max_tokens: None,
            json_output: true,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Grammar check failed: {e}")))?;

    debug!(
        "Grammar check flagged {} span(s) in {} chars",
        result.errors.len(),
        text.chars().count()
    );

    Ok(Json(result))
}

/// POST /essay/grammar-check/api/highlight
///
/// Builds the overlay for the current text and a previously returned error list.
pub async fn handle_highlight(AppJson(request): AppJson<HighlightRequest>) -> Json<HighlightResponse> {
    let overlay = build_overlay(&request.text, &request.errors, request.enable_checking);

    let corrected_text = (request.enable_checking && overlay.error_count > 0)
        .then(|| apply_all_corrections(&request.text, &request.errors))
        .filter(|corrected| *corrected != request.text);

    if overlay.error_count < request.errors.len() && request.enable_checking {
        info!(
            "Dropped {} grammar span(s) that do not fit the text",
            request.errors.len() - overlay.error_count
        );
    }

    Json(HighlightResponse {
        html: overlay.to_html(),
        error_count: overlay.error_count,
        segments: overlay.segments,
        corrected_text,
    })
}

/// POST /essay/grammar-check/api/apply
///
/// Applies one suggestion (by index) or all of them.
pub async fn handle_apply(AppJson(request): AppJson<ApplyRequest>) -> Result<Json<ApplyResponse>, AppError> {
    let text = match request.index {
        Some(index) => {
            let error = request.errors.get(index).ok_or_else(|| {
                AppError::Validation(format!(
                    "Error index {index} is out of range ({} errors)",
                    request.errors.len()
                ))
            })?;
            apply_correction(&request.text, error)
        }
        None => apply_all_corrections(&request.text, &request.errors),
    };

    Ok(Json(ApplyResponse { text }))
}
