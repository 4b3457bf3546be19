//! Axum route handlers for the school info pages.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::colleges::dataset::{CollegeData, NAME_COLUMN};
use crate::colleges::summary::{SchoolSummary, SearchHit};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub exclude: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub b: String,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub a: SchoolSummary,
    pub b: SchoolSummary,
}

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub name: String,
    /// Step columns with a value, keyed by header.
    pub steps: BTreeMap<String, String>,
}

fn loaded(state: &AppState) -> Result<&CollegeData, AppError> {
    if state.colleges.is_loaded() {
        Ok(&state.colleges)
    } else {
        Err(AppError::Unavailable(
            "College data is not loaded".to_string(),
        ))
    }
}

fn summary_for(data: &CollegeData, name: &str) -> Result<SchoolSummary, AppError> {
    data.find(name)
        .map(SchoolSummary::from_record)
        .ok_or_else(|| AppError::NotFound(format!("School not found: {}", name.trim())))
}

/// GET /school_info/api/search?q=&exclude=
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let data = loaded(&state)?;
    let results = data
        .search(params.q.trim(), params.exclude.as_deref())
        .into_iter()
        .map(SearchHit::from_record)
        .collect();
    Ok(Json(SearchResponse { results }))
}

/// GET /school_info/api/schools/:name
pub async fn handle_school(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SchoolSummary>, AppError> {
    let data = loaded(&state)?;
    Ok(Json(summary_for(data, &name)?))
}

/// GET /school_info/api/compare?a=&b=
pub async fn handle_compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<CompareResponse>, AppError> {
    let data = loaded(&state)?;
    Ok(Json(CompareResponse {
        a: summary_for(data, &params.a)?,
        b: summary_for(data, &params.b)?,
    }))
}

/// GET /school_info/api/steps/:name
pub async fn handle_steps(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StepsResponse>, AppError> {
    let row = state
        .colleges
        .steps_for(&name)
        .ok_or_else(|| AppError::NotFound(format!("No application steps for: {}", name.trim())))?;

    let steps = row
        .fields()
        .iter()
        .filter(|(column, value)| column.as_str() != NAME_COLUMN && !value.trim().is_empty())
        .map(|(column, value)| (column.clone(), value.clone()))
        .collect();

    Ok(Json(StepsResponse {
        name: row.name().to_string(),
        steps,
    }))
}
