// src/pipeline.rs
//! One submit action: extract → prompt → complete → persist

use std::path::PathBuf;
use std::sync::Arc;

use crate::app_log;
use crate::completion::CompletionBackend;
use crate::error::{PipelineError, PipelineResult};
use crate::extractor::{MediaKind, TextExtractor, Upload};
use crate::prompt::{build_prompt, PromptInput};
use crate::reference_data::{ReferenceDataLoader, ReferenceDataset};
use crate::sink::ResultSink;

#[derive(Debug, Clone)]
pub struct Submission {
    pub resume: Option<Upload>,
    pub occupation: String,
    pub question: String,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub answer: String,
    pub output_path: PathBuf,
    pub media_kind: MediaKind,
}

impl Outcome {
    pub fn output_file_name(&self) -> String {
        self.output_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

pub struct ResumeAssistant {
    reference: ReferenceDataLoader,
    extractor: TextExtractor,
    backend: Arc<dyn CompletionBackend>,
    sink: ResultSink,
}

impl ResumeAssistant {
    pub fn new(
        reference: ReferenceDataLoader,
        extractor: TextExtractor,
        backend: Arc<dyn CompletionBackend>,
        sink: ResultSink,
    ) -> Self {
        Self {
            reference,
            extractor,
            backend,
            sink,
        }
    }

    pub async fn reference_data(&self) -> PipelineResult<Arc<ReferenceDataset>> {
        self.reference.get().await.map_err(|e| {
            app_log!(
                error,
                "Reference data unavailable at {}: {:#}",
                self.reference.path().display(),
                e
            );
            PipelineError::ReferenceData(e)
        })
    }

    pub async fn occupations(&self) -> PipelineResult<Vec<String>> {
        let dataset = self.reference_data().await?;
        Ok(dataset.occupations().into_iter().map(str::to_string).collect())
    }

    pub async fn skills(&self, occupation: &str) -> PipelineResult<Vec<String>> {
        Ok(self.reference_data().await?.skill_lines(occupation))
    }

    /// Runs the whole flow once; the first failing stage aborts it with no retry.
    pub async fn submit(&self, submission: Submission) -> PipelineResult<Outcome> {
        let dataset = self.reference_data().await?;

        let resume = submission.resume.ok_or(PipelineError::MissingResume)?;
        let media_kind = resume.kind();

        app_log!(
            info,
            "Processing submission for occupation '{}' ({:?} resume)",
            submission.occupation,
            media_kind
        );

        let resume_text = self
            .extractor
            .extract(&resume)
            .await
            .map_err(PipelineError::Extraction)?;

        let skill_context = dataset.skill_context(&submission.occupation);
        let prompt = build_prompt(&PromptInput {
            resume_text: &resume_text,
            occupation: &submission.occupation,
            skill_context: &skill_context,
            question: &submission.question,
        });

        let answer = self
            .backend
            .complete(&prompt)
            .await
            .map_err(PipelineError::Completion)?;

        let output_path = self
            .sink
            .write(&answer)
            .await
            .map_err(PipelineError::OutputWrite)?;

        Ok(Outcome {
            answer,
            output_path,
            media_kind,
        })
    }
}
