// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app_log;
use crate::config::AppConfig;
use crate::extractor::{mime_for_file_name, Upload};
use crate::pipeline::{ResumeAssistant, Submission};
use crate::utils::file_name_of;

#[derive(Parser)]
#[command(name = "resume-assistant")]
#[command(about = "Ask questions about a resume against occupation core competencies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the web interface (default)
    Serve {
        /// Overrides ROCKET_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// List the occupations in the reference data
    Occupations,
    /// Print the core competencies of one occupation
    Skills { occupation: String },
    /// Run one question against a resume file
    Ask {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        occupation: String,
        #[arg(long)]
        question: String,
    },
}

pub async fn handle_command(
    command: Option<Command>,
    config: &AppConfig,
    assistant: ResumeAssistant,
) -> Result<()> {
    match command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            crate::web::start_web_server(assistant, port.unwrap_or(config.port)).await
        }

        Command::Occupations => {
            for occupation in assistant.occupations().await? {
                println!("{}", occupation);
            }
            Ok(())
        }

        Command::Skills { occupation } => {
            for line in assistant.skills(&occupation).await? {
                println!("{}", line);
            }
            Ok(())
        }

        Command::Ask {
            resume,
            occupation,
            question,
        } => {
            let bytes = tokio::fs::read(&resume)
                .await
                .with_context(|| format!("Failed to read resume: {}", resume.display()))?;
            let file_name = file_name_of(&resume);
            let mime = mime_for_file_name(file_name.as_deref().unwrap_or_default());
            app_log!(info, "Submitting {} as {}", resume.display(), mime);

            let outcome = assistant
                .submit(Submission {
                    resume: Some(Upload::new(file_name, mime, bytes)),
                    occupation,
                    question,
                })
                .await?;

            println!("{}", outcome.answer);
            println!();
            println!("Response saved to {}", outcome.output_file_name());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["resume-assistant"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "resume-assistant",
            "ask",
            "--resume",
            "cv.pdf",
            "--occupation",
            "Software Engineer",
            "--question",
            "What soft skills should I add?",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Ask {
                resume,
                occupation,
                question,
            }) => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(occupation, "Software Engineer");
                assert_eq!(question, "What soft skills should I add?");
            }
            _ => panic!("expected ask subcommand"),
        }
    }

    #[test]
    fn test_ask_requires_resume() {
        assert!(Cli::try_parse_from([
            "resume-assistant",
            "ask",
            "--occupation",
            "Nurse",
            "--question",
            "?"
        ])
        .is_err());
    }
}
