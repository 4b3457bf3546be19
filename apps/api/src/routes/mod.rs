pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::colleges::handlers as colleges;
use crate::essay::handlers as essay;
use crate::grammar::handlers as grammar;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Essay feedback
        .route(
            "/essay/api/generate-feedback",
            post(essay::handle_generate_feedback),
        )
        .route("/essay/api/sections", post(essay::handle_sections))
        .route("/essay/api/export", post(essay::handle_export))
        // Grammar check
        .route(
            "/essay/grammar-check/api",
            post(grammar::handle_grammar_check),
        )
        .route(
            "/essay/grammar-check/api/highlight",
            post(grammar::handle_highlight),
        )
        .route(
            "/essay/grammar-check/api/apply",
            post(grammar::handle_apply),
        )
        // Résumé builder
        .route(
            "/resume/api/generate-feedback",
            post(resume::handle_generate_feedback),
        )
        .route("/resume/api/compose", post(resume::handle_compose))
        .route("/resume/api/export", post(resume::handle_export))
        // School info
        .route("/school_info/api/search", get(colleges::handle_search))
        .route(
            "/school_info/api/schools/:name",
            get(colleges::handle_school),
        )
        .route("/school_info/api/compare", get(colleges::handle_compare))
        .route("/school_info/api/steps/:name", get(colleges::handle_steps))
        .with_state(state)
}
