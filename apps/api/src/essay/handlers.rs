//! Axum route handlers for essay feedback.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::essay::export::{render_essay_export, ExportDocument, ExportFormat};
use crate::essay::prompts::{
    essay_user_prompt, ESSAY_FEEDBACK_MAX_TOKENS, ESSAY_FEEDBACK_SYSTEM,
    ESSAY_FEEDBACK_TEMPERATURE, UNTITLED_ESSAY,
};
use crate::essay::sections::{parse_essay_feedback, EssayFeedbackSections};
use crate::llm_client::CompletionRequest;
use crate::state::AppState;
use crate::validation::require_text;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields are loosely typed so that a missing or non-string essay is a 400
/// with a readable message rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct EssayFeedbackRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub essay: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct EssayFeedbackResponse {
    /// The provider's reply, verbatim.
    pub feedback: String,
    pub sections: EssayFeedbackSections,
}

#[derive(Debug, Deserialize)]
pub struct SectionsRequest {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct EssayExportRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub essay: String,
    #[serde(default)]
    pub feedback: String,
    pub format: String,
}

fn display_title(title: Option<&str>) -> &str {
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_ESSAY)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /essay/api/generate-feedback
///
/// Sends the essay to the counselor prompt and returns the reply verbatim,
/// along with its heading-based sections.
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    AppJson(request): AppJson<EssayFeedbackRequest>,
) -> Result<Json<EssayFeedbackResponse>, AppError> {
    let essay = require_text(request.essay.as_ref(), "Essay text is required")?;
    let llm = state.openai()?;
    let title = display_title(request.title.as_deref());

    let feedback = llm
        .complete(CompletionRequest {
            system: ESSAY_FEEDBACK_SYSTEM.to_string(),
            user: essay_user_prompt(title, essay),
            temperature: ESSAY_FEEDBACK_TEMPERATURE,
            max_tokens: Some(ESSAY_FEEDBACK_MAX_TOKENS),
            json_output: false,
        })
        .await
        .map_err(AppError::feedback)?;

    let sections = parse_essay_feedback(&feedback);
    if sections.is_empty() {
        debug!("Essay feedback has no recognized headings");
    }
    info!(
        "Essay feedback generated: title={title:?}, essay_chars={}, feedback_chars={}",
        essay.chars().count(),
        feedback.chars().count()
    );

    Ok(Json(EssayFeedbackResponse { feedback, sections }))
}

/// POST /essay/api/sections
///
/// Re-sections a previously generated feedback string.
pub async fn handle_sections(AppJson(request): AppJson<SectionsRequest>) -> Json<EssayFeedbackSections> {
    Json(parse_essay_feedback(&request.feedback))
}

/// POST /essay/api/export
///
/// Renders the essay and its feedback as a downloadable txt, doc or pdf file.
pub async fn handle_export(
    AppJson(request): AppJson<EssayExportRequest>,
) -> Result<ExportDocument, AppError> {
    let format = ExportFormat::parse(&request.format)?;
    let feedback = request.feedback.trim();
    if feedback.is_empty() {
        return Err(AppError::Validation(
            "Feedback is required for export".to_string(),
        ));
    }
    let title = display_title(request.title.as_deref());

    render_essay_export(format, title, &request.essay, feedback)
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::json;

    use crate::test_support::{post_json, post_raw, test_router, FakeCompletion, FakeReply};

    const URI: &str = "/essay/api/generate-feedback";

    #[tokio::test]
    async fn test_blank_essay_rejected_before_upstream_call() {
        let openai = FakeCompletion::text("unused");
        for body in [
            json!({"title": "T", "essay": "   \n"}),
            json!({"title": "T"}),
            json!({"essay": 7}),
        ] {
            let (status, json) = post_json(test_router(Some(openai.clone()), None), URI, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "Essay text is required");
        }
        assert_eq!(openai.calls(), 0);
    }

    #[tokio::test]
    async fn test_mistyped_body_is_json_400() {
        let openai = FakeCompletion::text("unused");
        let (status, headers, body) = post_raw(
            test_router(Some(openai.clone()), None),
            URI,
            json!({"title": 5, "essay": "My essay."}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("title"));
        assert_eq!(openai.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_openai_key_is_500() {
        let (status, json) =
            post_json(test_router(None, None), URI, json!({"essay": "My essay."})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "OpenAI API key is not configured");
    }

    #[tokio::test]
    async fn test_feedback_passed_through_verbatim() {
        let reply = "Feedback and Areas of Improvement:\n  Vivid opening.  \nGRAMMAR:\nNone found.\n";
        let openai = FakeCompletion::text(reply);
        let (status, json) = post_json(
            test_router(Some(openai.clone()), None),
            URI,
            json!({"title": "Robotics", "essay": "I built a robot."}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["feedback"], reply);
        assert_eq!(json["sections"]["general"], "Vivid opening.");
        assert_eq!(json["sections"]["grammar"], "None found.");

        let sent = openai.last_request().unwrap();
        assert_eq!(
            sent.user,
            "Please provide feedback on my essay titled \"Robotics\": \n\nI built a robot."
        );
        assert_eq!(sent.max_tokens, Some(1000));
        assert!(!sent.json_output);
    }

    #[tokio::test]
    async fn test_blank_title_defaults_to_untitled() {
        let openai = FakeCompletion::text("ok");
        post_json(
            test_router(Some(openai.clone()), None),
            URI,
            json!({"title": " ", "essay": "Text."}),
        )
        .await;
        assert!(openai
            .last_request()
            .unwrap()
            .user
            .contains("titled \"Untitled Essay\""));
    }

    #[tokio::test]
    async fn test_upstream_status_forwarded() {
        let openai = FakeCompletion::new(FakeReply::ApiError(429, "Rate limit reached".into()));
        let (status, json) =
            post_json(test_router(Some(openai), None), URI, json!({"essay": "Text."})).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"], "Rate limit reached");
    }

    #[tokio::test]
    async fn test_empty_upstream_content_is_500() {
        let openai = FakeCompletion::new(FakeReply::Empty);
        let (status, json) =
            post_json(test_router(Some(openai), None), URI, json!({"essay": "Text."})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to generate feedback");
    }

    #[tokio::test]
    async fn test_sections_route() {
        let (status, json) = post_json(
            test_router(None, None),
            "/essay/api/sections",
            json!({"feedback": "CONTENT: Add detail.\nLANGUAGE: Vary verbs."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({"content": "Add detail.", "language": "Vary verbs."})
        );
    }

    #[tokio::test]
    async fn test_export_txt_attachment() {
        let (status, headers, body) = post_raw(
            test_router(None, None),
            "/essay/api/export",
            json!({"title": "Grit", "essay": "I ran.", "feedback": "Good.", "format": "txt"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"feedback-grit.txt\""
        );
        assert!(String::from_utf8(body).unwrap().ends_with("--- FEEDBACK ---\nGood."));
    }

    #[tokio::test]
    async fn test_export_rejects_empty_feedback_and_unknown_format() {
        let (status, _) = post_json(
            test_router(None, None),
            "/essay/api/export",
            json!({"essay": "I ran.", "feedback": " ", "format": "txt"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = post_json(
            test_router(None, None),
            "/essay/api/export",
            json!({"essay": "I ran.", "feedback": "Good.", "format": "docx"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("docx"));
    }

    #[tokio::test]
    async fn test_export_pdf_attachment() {
        let (status, headers, body) = post_raw(
            test_router(None, None),
            "/essay/api/export",
            json!({
                "title": "My Summer Job",
                "essay": "I worked.\n".repeat(80),
                "feedback": "Good.",
                "format": "pdf"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"feedback-my-summer-job.pdf\""
        );
        assert!(body.starts_with(b"%PDF-"));
    }
}
