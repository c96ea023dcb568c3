//! Quiz handlers

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::AppState;
use wikiquiz_common::{
    errors::{AppError, Result},
    QuizResponse, QuizSummary,
};

/// Request to build a quiz from a page
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(url(message = "url must be a valid URL"))]
    pub url: String,
}

/// Scrape a page, synthesize a quiz and store it
#[instrument(skip(state, payload))]
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation {
        message: rejection.body_text(),
        field: None,
    })?;
    request.validate()?;

    let quiz = state.quizzes.generate(&request.url).await?;
    Ok(Json(quiz))
}

/// List stored quizzes, newest first
#[instrument(skip(state))]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<Json<Vec<QuizSummary>>> {
    Ok(Json(state.quizzes.list().await?))
}

/// Get one quiz by ID
#[instrument(skip(state))]
pub async fn get_quiz(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<QuizResponse>> {
    let Path(id) = id.map_err(|rejection| AppError::Validation {
        message: rejection.body_text(),
        field: Some("id".to_string()),
    })?;

    Ok(Json(state.quizzes.get(id).await?))
}
