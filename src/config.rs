// src/config.rs
//! Application configuration: environment variables with defaults

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const REFERENCE_DATA_RELATIVE_PATH: &str = "data/job skill context(Core competencies).csv";
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reference_data_path: PathBuf,
    pub output_dir: PathBuf,
    pub tesseract_cmd: String,
    pub completion_base_url: String,
    pub secrets_path: PathBuf,
    pub log_file: PathBuf,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;

        let port = match std::env::var("ROCKET_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?,
            Err(_) => DEFAULT_PORT,
        };

        let secrets_path = std::env::var("RESUME_ASSISTANT_SECRETS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("secrets.toml"));

        Ok(Self {
            reference_data_path: Self::reference_data_path(),
            output_dir: current_dir.clone(),
            tesseract_cmd: std::env::var("TESSERACT_CMD")
                .unwrap_or_else(|_| DEFAULT_TESSERACT_CMD.to_string()),
            completion_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_BASE_URL.to_string()),
            secrets_path: resolve_path(&current_dir, &secrets_path),
            log_file: std::env::var("RESUME_ASSISTANT_LOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/resume_assistant.log")),
            port,
        })
    }

    /// The reference CSV lives next to the program; a source checkout is the fallback.
    fn reference_data_path() -> PathBuf {
        let beside_binary = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(REFERENCE_DATA_RELATIVE_PATH)));

        match beside_binary {
            Some(path) if path.exists() => path,
            _ => Path::new(env!("CARGO_MANIFEST_DIR")).join(REFERENCE_DATA_RELATIVE_PATH),
        }
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
