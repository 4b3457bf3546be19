//! Axum route handlers for the résumé builder.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::essay::export::ExportDocument;
use crate::llm_client::CompletionRequest;
use crate::resume::export::render_resume_doc;
use crate::resume::form::ResumeForm;
use crate::resume::prompts::{
    RESUME_FEEDBACK_MAX_TOKENS, RESUME_FEEDBACK_SYSTEM, RESUME_FEEDBACK_TEMPERATURE,
};
use crate::resume::sections::{parse_resume_feedback, ResumeFeedbackSections};
use crate::state::AppState;
use crate::validation::require_text;

#[derive(Debug, Deserialize)]
pub struct ResumeFeedbackRequest {
    #[serde(default)]
    pub resume: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ResumeFeedbackResponse {
    /// The provider's reply, verbatim.
    pub feedback: String,
    pub sections: ResumeFeedbackSections,
}

#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    pub resume: String,
}

/// POST /resume/api/generate-feedback
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    AppJson(request): AppJson<ResumeFeedbackRequest>,
) -> Result<Json<ResumeFeedbackResponse>, AppError> {
    let resume = require_text(request.resume.as_ref(), "Resume text is required")?;
    let llm = state.openai()?;

    let feedback = llm
        .complete(CompletionRequest {
            system: RESUME_FEEDBACK_SYSTEM.to_string(),
            user: resume.to_string(),
            temperature: RESUME_FEEDBACK_TEMPERATURE,
            max_tokens: Some(RESUME_FEEDBACK_MAX_TOKENS),
            json_output: false,
        })
        .await
        .map_err(AppError::feedback)?;

    let sections = parse_resume_feedback(&feedback);
    info!(
        "Resume feedback generated: resume_chars={}, feedback_chars={}",
        resume.chars().count(),
        feedback.chars().count()
    );

    Ok(Json(ResumeFeedbackResponse { feedback, sections }))
}

/// POST /resume/api/compose
///
/// Flattens the builder form into the text the feedback route expects.
pub async fn handle_compose(
    AppJson(form): AppJson<ResumeForm>,
) -> Result<Json<ComposeResponse>, AppError> {
    form.validate()?;
    Ok(Json(ComposeResponse {
        resume: form.compose(),
    }))
}

/// POST /resume/api/export
pub async fn handle_export(AppJson(form): AppJson<ResumeForm>) -> Result<ExportDocument, AppError> {
    form.validate()?;
    Ok(render_resume_doc(&form))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::json;

    use crate::test_support::{post_json, post_raw, test_router, FakeCompletion, FakeReply};

    const URI: &str = "/resume/api/generate-feedback";

    #[tokio::test]
    async fn test_blank_or_non_string_resume_rejected_without_call() {
        let openai = FakeCompletion::text("unused");
        for body in [json!({"resume": ""}), json!({"resume": "\t "}), json!({"resume": ["x"]}), json!({})] {
            let (status, json) = post_json(test_router(Some(openai.clone()), None), URI, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "Resume text is required");
        }
        assert_eq!(openai.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_openai_key_is_500() {
        let (status, json) =
            post_json(test_router(None, None), URI, json!({"resume": "Name: Ada"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "OpenAI API key is not configured");
    }

    #[tokio::test]
    async fn test_feedback_verbatim_with_sections() {
        let reply = "**CLARITY:** Clear.\n**IMPACT:** Add numbers.";
        let openai = FakeCompletion::text(reply);
        let (status, json) = post_json(
            test_router(Some(openai.clone()), None),
            URI,
            json!({"resume": "Name: Ada\nSkills: Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["feedback"], reply);
        assert_eq!(json["sections"]["clarity"], "Clear.");
        assert_eq!(json["sections"]["impact"], "Add numbers.");

        let sent = openai.last_request().unwrap();
        assert_eq!(sent.user, "Name: Ada\nSkills: Python");
        assert_eq!(sent.max_tokens, Some(1500));
    }

    #[tokio::test]
    async fn test_provider_auth_error_forwarded() {
        let openai = FakeCompletion::new(FakeReply::ApiError(401, "Incorrect API key provided".into()));
        let (status, json) =
            post_json(test_router(Some(openai), None), URI, json!({"resume": "Name: Ada"})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Incorrect API key provided");
    }

    #[tokio::test]
    async fn test_compose_route() {
        let (status, json) = post_json(
            test_router(None, None),
            "/resume/api/compose",
            json!({"student": {"name": "Ada"}, "skills": "Rust"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let resume = json["resume"].as_str().unwrap();
        assert!(resume.starts_with("Name: Ada\n"));
        assert!(resume.contains("Skills: Rust\n"));
        assert!(resume.ends_with("Activities:\n"));
    }

    #[tokio::test]
    async fn test_compose_rejects_too_many_activities() {
        let activities: Vec<_> = (0..11).map(|_| json!({})).collect();
        let (status, _) = post_json(
            test_router(None, None),
            "/resume/api/compose",
            json!({"activities": activities}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_route_sends_word_document() {
        let (status, headers, body) = post_raw(
            test_router(None, None),
            "/resume/api/export",
            json!({"student": {"name": "Ada"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/msword");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.doc\""
        );
        assert!(String::from_utf8(body).unwrap().contains(">Ada</div>"));
    }
}
