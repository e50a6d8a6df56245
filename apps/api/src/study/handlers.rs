//! Axum route handlers for the study API.
//!
//! Input problems, including bodies that do not deserialize, are rejected with
//! `AppError::Validation` (400). Completion
//! failures are returned as data: `{"<View>": {"error": "..."}}` with status 200.

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::gateway::{CompletionError, CompletionRequest};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::models::question::{Subject, DEFAULT_QUESTION_QUANTITY, MAX_QUESTIONS};
use crate::state::AppState;
use crate::study::{notice, questions, roadmap};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractNoticeRequest {
    #[serde(default)]
    pub notice_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchNoticeRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoadmapRequest {
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub notice_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionsRequest {
    pub subject: Subject,
    #[serde(default = "default_quantity")]
    pub quantity: usize,
}

fn default_quantity() -> usize {
    DEFAULT_QUESTION_QUANTITY
}

#[derive(Debug, Deserialize)]
pub struct CompletionRelayRequest {
    #[serde(default)]
    pub prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Turns a pipeline result into the body of a `*View` field.
///
/// Unknown schemas and registry faults are programming errors and surface as a
/// 500. Every other completion failure becomes `{"error": reason}`.
fn into_view<T: Serialize>(result: Result<T, CompletionError>) -> Result<Value, AppError> {
    match result {
        Ok(data) => serde_json::to_value(data).map_err(|e| AppError::Internal(e.into())),
        Err(CompletionError::UnknownSchema(name)) => {
            Err(AppError::Internal(anyhow!("completion requested unknown schema '{name}'")))
        }
        Err(CompletionError::Registry(reason)) => {
            Err(AppError::Internal(anyhow!("schema registry fault: {reason}")))
        }
        Err(e) => Ok(json!({ "error": e.to_string() })),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/notices/extract
pub async fn handle_extract_notice(
    State(state): State<AppState>,
    payload: Result<Json<ExtractNoticeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    require(&request.notice_text, "NoticeText")?;

    let result = notice::extract_notice(&state.gateway, &request.notice_text).await;

    Ok(Json(json!({ "ExamDataView": into_view(result)? })))
}

/// POST /api/v1/notices/search
pub async fn handle_search_notice(
    State(state): State<AppState>,
    payload: Result<Json<SearchNoticeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    require(&request.prompt, "Prompt")?;

    let result = notice::search_notice(&state.gateway, request.prompt.trim()).await;

    Ok(Json(json!({ "ExamDataView": into_view(result)? })))
}

/// POST /api/v1/roadmaps
///
/// Slices the syllabus out of the notice text and builds a roadmap for one job role.
pub async fn handle_extract_roadmap(
    State(state): State<AppState>,
    payload: Result<Json<RoadmapRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    require(&request.job_role, "JobRole")?;
    require(&request.notice_text, "NoticeText")?;

    let result = roadmap::extract_roadmap(
        &state.gateway,
        &state.config.roadmap_policy,
        request.job_role.trim(),
        &request.notice_text,
    )
    .await;

    Ok(Json(json!({ "RoadmapDataView": into_view(result)? })))
}

/// POST /api/v1/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    payload: Result<Json<QuestionsRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    require(&request.subject.title, "Subject.Title")?;
    if request.quantity == 0 || request.quantity > MAX_QUESTIONS {
        return Err(AppError::Validation(format!(
            "Quantity must be between 1 and {MAX_QUESTIONS}"
        )));
    }

    let result =
        questions::generate_questions(&state.gateway, &request.subject, request.quantity).await;

    Ok(Json(json!({ "Questions": into_view(result)? })))
}

/// POST /api/v1/completions
///
/// Free-form relay: no schema constraint, the model must still answer in JSON.
pub async fn handle_completion(
    State(state): State<AppState>,
    payload: Result<Json<CompletionRelayRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    require(&request.prompt, "prompt")?;

    let completion = CompletionRequest {
        user_prompt: request.prompt,
        system_instruction: JSON_ONLY_SYSTEM.to_string(),
        schema_name: String::new(),
    };
    let result = state.gateway.complete(&completion).await;

    Ok(Json(json!({ "response": into_view(result)? })))
}
