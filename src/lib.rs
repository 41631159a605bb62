pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod reference_data;
pub mod secrets;
pub mod sink;
pub mod utils;
pub mod web;

use anyhow::Result;
use std::sync::Arc;

pub use config::AppConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Outcome, ResumeAssistant, Submission};
pub use web::start_web_server;

use completion::GroqClient;
use extractor::TextExtractor;
use reference_data::ReferenceDataLoader;
use secrets::SecretStore;
use sink::ResultSink;

/// Wire the production collaborators from configuration
pub fn assistant_from_config(config: &AppConfig) -> Result<ResumeAssistant> {
    let secrets = SecretStore::new(config.secrets_path.clone());
    let backend = GroqClient::new(config.completion_base_url.clone(), secrets)?;

    Ok(ResumeAssistant::new(
        ReferenceDataLoader::new(config.reference_data_path.clone()),
        TextExtractor::new(config.tesseract_cmd.clone()),
        Arc::new(backend),
        ResultSink::new(config.output_dir.clone()),
    ))
}
