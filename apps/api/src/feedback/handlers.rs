//! Axum route handlers for resume feedback.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::feedback::prompts;
use crate::llm_client::Prompt;
use crate::state::AppState;
use crate::uploads::extract::extract_text;
use crate::uploads::read_upload_form;

/// Multipart text field naming the career path on `/upload-career`.
pub const CAREER_PATH_FIELD: &str = "careerPath";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileResponse {
    pub message: String,
    pub file_path: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
}

/// POST /upload
///
/// Extracts the resume, grades it against the generic checklist and returns
/// the model's feedback. The upload is deleted when the handler returns.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let mut form = read_upload_form(multipart, &state.config.upload_dir).await?;
    let upload = form.require_file()?;

    let text = extract_text(&upload).await?;
    let message = request_feedback(&state, prompts::resume_evaluation(&text)).await?;

    Ok(Json(MessageResponse { message }))
}

/// POST /upload-career
///
/// Same pipeline as `/upload`, with the checklist chosen by `careerPath`.
pub async fn handle_upload_career(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let mut form = read_upload_form(multipart, &state.config.upload_dir).await?;
    let upload = form.require_file()?;
    let career_path = form
        .field(CAREER_PATH_FIELD)
        .ok_or_else(|| AppError::Validation("careerPath is required.".to_string()))?
        .to_string();

    let text = extract_text(&upload).await?;
    info!("Evaluating resume for career path '{career_path}'");
    let message = request_feedback(
        &state,
        prompts::career_path_evaluation(&career_path, &text),
    )
    .await?;

    Ok(Json(MessageResponse { message }))
}

/// POST /upload-file
///
/// Stores the file permanently and returns where it is served from.
pub async fn handle_upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadedFileResponse>, AppError> {
    let mut form = read_upload_form(multipart, &state.config.upload_dir).await?;
    let upload = form.require_file()?;
    let stored_name = upload.stored_name();
    upload.keep()?;

    Ok(Json(UploadedFileResponse {
        message: "File uploaded successfully!".to_string(),
        file_path: format!("/uploads/{stored_name}"),
    }))
}

/// POST /ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let question = request
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Question is required.".to_string()))?;

    let message = request_feedback(&state, prompts::question(&question)).await?;

    Ok(Json(MessageResponse { message }))
}

async fn request_feedback(state: &AppState, prompt: Prompt) -> Result<String, AppError> {
    let feedback = state.feedback.complete(&prompt).await?;
    info!("Received {} characters of feedback", feedback.len());
    Ok(feedback)
}
