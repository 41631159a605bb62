// src/error.rs
//! Stage errors surfaced to the presentation layer

use thiserror::Error;

/// Failure of one interaction, tagged with the stage that aborted it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load the job skills data. Please check the file path.")]
    ReferenceData(#[source] anyhow::Error),

    #[error("Please upload a resume.")]
    MissingResume,

    #[error("Failed to extract text from the resume: {0:#}")]
    Extraction(#[source] anyhow::Error),

    #[error("Completion request failed: {0:#}")]
    Completion(#[source] anyhow::Error),

    #[error("Failed to save the response: {0:#}")]
    OutputWrite(#[source] anyhow::Error),
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReferenceData(_) => "REFERENCE_DATA_UNAVAILABLE",
            Self::MissingResume => "MISSING_RESUME",
            Self::Extraction(_) => "EXTRACTION_FAILED",
            Self::Completion(_) => "COMPLETION_FAILED",
            Self::OutputWrite(_) => "OUTPUT_WRITE_FAILED",
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        let hints: &[&str] = match self {
            Self::ReferenceData(_) => &["Check that the job skills CSV file is present next to the program"],
            Self::MissingResume => &["Upload a PDF, text or image resume before submitting"],
            Self::Extraction(_) => &[
                "Check the file is not corrupted",
                "Text files must be UTF-8 encoded",
                "Image uploads need a working tesseract installation (TESSERACT_CMD)",
            ],
            Self::Completion(_) => &[
                "Check GROQ_API_KEY is configured",
                "Try again in a few moments",
            ],
            Self::OutputWrite(_) => &["Check the working directory is writable"],
        };
        hints.iter().map(|s| s.to_string()).collect()
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
