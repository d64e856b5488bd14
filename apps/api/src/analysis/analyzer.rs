//! Analysis pipeline: validate inputs → build prompt → invoke model → collect notices.

use tracing::info;

use crate::analysis::invoker::{ModelInvoker, ModelTier};
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::extraction::JobDescriptionSource;

/// Result of one analysis run, ready to hand to the presentation layer.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub tier: ModelTier,
    pub model: String,
    /// Model output, unparsed.
    pub text: String,
    pub notices: Vec<String>,
}

/// Runs an analysis of `resume_text` against the resolved job description.
///
/// The model is never called unless both texts have content.
pub async fn run_analysis(
    invoker: &ModelInvoker,
    resume_text: &str,
    job_description: &JobDescriptionSource,
) -> Result<AnalysisOutcome, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the resume.".to_string(),
        ));
    }
    let jd_text = job_description.text();
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "A job description is required: upload a text file or paste it.".to_string(),
        ));
    }

    let mut notices = Vec::new();
    if let JobDescriptionSource::File {
        pasted_ignored: true,
        ..
    } = job_description
    {
        notices.push(
            "Both a job description file and pasted text were supplied; the file was used."
                .to_string(),
        );
    }

    let prompt = build_analysis_prompt(jd_text, resume_text);
    info!(
        "Running analysis: resume_chars={}, jd_chars={}, prompt_chars={}",
        resume_text.chars().count(),
        jd_text.chars().count(),
        prompt.chars().count()
    );

    let response = invoker.invoke(&prompt).await?;

    if response.tier == ModelTier::Fallback {
        notices.push(format!(
            "Primary model quota exceeded. Analysis produced by fallback model {}.",
            response.model
        ));
    }

    Ok(AnalysisOutcome {
        tier: response.tier,
        model: response.model,
        text: response.text,
        notices,
    })
}
