// src/web/handlers/assistant_handlers.rs
//! Occupation listing and the submit action

use rocket::form::Form;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::error::PipelineError;
use crate::extractor::Upload;
use crate::pipeline::{ResumeAssistant, Submission};
use crate::web::types::{AskData, AskForm, DataResponse, OccupationSkills, StandardErrorResponse};

pub type ApiError = Custom<Json<StandardErrorResponse>>;

const DEFAULT_UPLOAD_MIME: &str = "text/plain";

pub fn pipeline_error_response(error: &PipelineError) -> ApiError {
    let status = match error {
        PipelineError::MissingResume => Status::BadRequest,
        PipelineError::ReferenceData(_) => Status::ServiceUnavailable,
        PipelineError::Completion(_) => Status::BadGateway,
        PipelineError::Extraction(_) | PipelineError::OutputWrite(_) => {
            Status::InternalServerError
        }
    };

    Custom(
        status,
        Json(StandardErrorResponse::new(
            error.to_string(),
            error.code().to_string(),
            error.suggestions(),
        )),
    )
}

fn upload_read_error(message: String) -> ApiError {
    Custom(
        Status::InternalServerError,
        Json(StandardErrorResponse::new(
            message,
            "FILE_SAVE_ERROR".to_string(),
            vec!["Try uploading the file again".to_string()],
        )),
    )
}

pub async fn list_occupations_handler(
    assistant: &State<ResumeAssistant>,
) -> Result<Json<DataResponse<Vec<String>>>, ApiError> {
    let occupations = assistant
        .occupations()
        .await
        .map_err(|e| pipeline_error_response(&e))?;

    Ok(Json(DataResponse::success(
        format!("{} occupations available", occupations.len()),
        occupations,
    )))
}

pub async fn occupation_skills_handler(
    occupation: String,
    assistant: &State<ResumeAssistant>,
) -> Result<Json<DataResponse<OccupationSkills>>, ApiError> {
    let skills = assistant
        .skills(&occupation)
        .await
        .map_err(|e| pipeline_error_response(&e))?;

    Ok(Json(DataResponse::success(
        format!("{} skills for {}", skills.len(), occupation),
        OccupationSkills { occupation, skills },
    )))
}

pub async fn ask_handler(
    mut form: Form<AskForm<'_>>,
    assistant: &State<ResumeAssistant>,
) -> Result<Json<DataResponse<AskData>>, ApiError> {
    let resume = match form.resume.as_mut() {
        Some(file) if file.len() > 0 => Some(read_upload(file).await?),
        _ => None,
    };

    let submission = Submission {
        resume,
        occupation: form.occupation.clone(),
        question: form.question.clone(),
    };

    match assistant.submit(submission).await {
        Ok(outcome) => {
            let output_file = outcome.output_file_name();
            Ok(Json(DataResponse::success(
                format!("Response saved to {}", output_file),
                AskData {
                    answer: outcome.answer,
                    output_file,
                    media_kind: outcome.media_kind,
                },
            )))
        }
        Err(e) => {
            app_log!(error, "Submission aborted [{}]: {}", e.code(), e);
            Err(pipeline_error_response(&e))
        }
    }
}

/// Reads the temp file fully into memory; it is never persisted under its own name.
async fn read_upload(file: &mut rocket::fs::TempFile<'_>) -> Result<Upload, ApiError> {
    let mime = file
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| DEFAULT_UPLOAD_MIME.to_string());
    let file_name = file
        .raw_name()
        .and_then(|name| name.as_str())
        .map(|name| name.to_string());

    let temp_path = std::env::temp_dir().join(format!("resume_upload_{}", uuid::Uuid::new_v4()));
    if let Err(e) = file.persist_to(&temp_path).await {
        app_log!(error, "Failed to save uploaded file: {}", e);
        return Err(upload_read_error("Failed to process uploaded file".to_string()));
    }

    let bytes = tokio::fs::read(&temp_path).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    match bytes {
        Ok(bytes) => Ok(Upload::new(file_name, mime, bytes)),
        Err(e) => {
            app_log!(error, "Failed to read uploaded file: {}", e);
            Err(upload_read_error("Failed to process uploaded file".to_string()))
        }
    }
}
