// Prompt text for the resume / job description comparison.
// Inputs are spliced with `format!` rather than placeholder replacement so that
// document text containing `{...}` is passed through untouched.

/// Role line and the four numbered directives, sent verbatim.
pub const ANALYSIS_INSTRUCTIONS: &str = "\
You are an AI hiring assistant. Compare the candidate's resume with the job description below.

1. Give a match percentage (0–100%) based on how well the resume fits the job.
2. List the candidate's strengths for the role.
3. Point out any missing or weak areas.
4. Generate 3 technical and 2 behavioral interview questions based on the job and resume.";

pub const JOB_DESCRIPTION_HEADER: &str = "--- Job Description ---";
pub const RESUME_HEADER: &str = "--- Resume ---";

/// Builds the analysis prompt. Pure: no truncation, escaping or length limits,
/// so very large documents go to the model as-is.
pub fn build_analysis_prompt(job_description: &str, resume_text: &str) -> String {
    format!(
        "{ANALYSIS_INSTRUCTIONS}\n\n{JOB_DESCRIPTION_HEADER}\n{job_description}\n\n{RESUME_HEADER}\n{resume_text}\n"
    )
}
