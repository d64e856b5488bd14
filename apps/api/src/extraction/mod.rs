//! Document text extraction for the two analysis inputs.
//!
//! Resumes arrive as PDF bytes, job descriptions as UTF-8 text (uploaded file or
//! pasted). Extraction never interprets the text: it only turns bytes into a string.

pub mod job_description;
pub mod pdf;

use thiserror::Error;

pub use job_description::{extract_plain_text, resolve_job_description, JobDescriptionSource};
pub use pdf::extract_pdf_text;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Uploaded resume is not a PDF document")]
    NotPdf,

    #[error("Failed to read PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to read PDF: document is malformed")]
    Malformed,

    #[error("Job description file is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
