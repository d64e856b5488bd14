use crate::extraction::ExtractionError;

/// Where the job description used for an analysis came from.
#[derive(Debug, Clone, PartialEq)]
pub enum JobDescriptionSource {
    /// Uploaded text file. `pasted_ignored` is set when pasted text was also supplied.
    File { text: String, pasted_ignored: bool },
    Pasted(String),
    Missing,
}

impl JobDescriptionSource {
    pub fn text(&self) -> &str {
        match self {
            JobDescriptionSource::File { text, .. } => text,
            JobDescriptionSource::Pasted(text) => text,
            JobDescriptionSource::Missing => "",
        }
    }
}

/// Decodes an uploaded text file verbatim.
pub fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Picks the job description text. An uploaded file with content wins; pasted
/// text is only used when there is no file content.
pub fn resolve_job_description(
    file_text: Option<String>,
    pasted_text: Option<String>,
) -> JobDescriptionSource {
    let pasted = pasted_text.filter(|t| !t.trim().is_empty());

    match file_text.filter(|t| !t.trim().is_empty()) {
        Some(text) => JobDescriptionSource::File {
            text,
            pasted_ignored: pasted.is_some(),
        },
        None => match pasted {
            Some(text) => JobDescriptionSource::Pasted(text),
            None => JobDescriptionSource::Missing,
        },
    }
}
