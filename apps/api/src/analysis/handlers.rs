//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::analyzer::run_analysis;
use crate::analysis::invoker::ModelTier;
use crate::errors::AppError;
use crate::extraction::{
    extract_pdf_text, extract_plain_text, resolve_job_description, ExtractionError,
};
use crate::state::AppState;

/// Multipart field carrying the resume PDF.
pub const RESUME_FIELD: &str = "resume";
/// Multipart field carrying an uploaded job description text file.
pub const JOB_DESCRIPTION_FILE_FIELD: &str = "job_description_file";
/// Multipart field carrying pasted job description text.
pub const JOB_DESCRIPTION_TEXT_FIELD: &str = "job_description_text";

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub model_tier: ModelTier,
    pub model: String,
    pub analysis: String,
    pub resume_text: String,
    pub job_description: String,
    pub notices: Vec<String>,
}

/// Raw uploads collected from the multipart form.
#[derive(Debug, Default)]
struct AnalysisForm {
    resume: Option<Bytes>,
    job_description_file: Option<Bytes>,
    job_description_text: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<AnalysisForm, AppError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => form.resume = Some(field.bytes().await?),
            JOB_DESCRIPTION_FILE_FIELD => form.job_description_file = Some(field.bytes().await?),
            JOB_DESCRIPTION_TEXT_FIELD => form.job_description_text = Some(field.text().await?),
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

/// POST /api/v1/analyses
///
/// Extracts the resume and job description, then runs the model analysis.
/// Returns the model's text verbatim along with the extracted inputs.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = read_form(multipart).await?;

    let resume = form.resume.filter(|b| !b.is_empty()).ok_or_else(|| {
        AppError::Validation("A resume PDF is required in the 'resume' field".to_string())
    })?;

    // PDF parsing is CPU-bound
    let resume_text = tokio::task::spawn_blocking(move || extract_pdf_text(&resume))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction(ExtractionError::Malformed)
            } else {
                AppError::Internal(anyhow::anyhow!("Resume extraction task failed: {e}"))
            }
        })??;

    let file_text = form
        .job_description_file
        .filter(|b| !b.is_empty())
        .map(|b| extract_plain_text(&b))
        .transpose()?;
    let job_description = resolve_job_description(file_text, form.job_description_text);

    let outcome = run_analysis(&state.invoker, &resume_text, &job_description).await?;

    let analysis_id = Uuid::new_v4();
    info!(
        "Analysis {} completed by {:?} model {}",
        analysis_id, outcome.tier, outcome.model
    );

    Ok(Json(AnalysisResponse {
        analysis_id,
        completed_at: Utc::now(),
        model_tier: outcome.tier,
        model: outcome.model,
        analysis: outcome.text,
        job_description: job_description.text().to_string(),
        resume_text,
        notices: outcome.notices,
    }))
}
