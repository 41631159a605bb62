// src/sink.rs
//! Persists each completion to a timestamped markdown file

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::app_log;

/// `resume_<YYYYMMDDHHMMSS>.md` for the given wall-clock time.
pub fn output_file_name(at: NaiveDateTime) -> String {
    format!("resume_{}.md", at.format("%Y%m%d%H%M%S"))
}

#[derive(Debug, Clone)]
pub struct ResultSink {
    output_dir: PathBuf,
}

impl ResultSink {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `text` verbatim; a file from the same second is overwritten.
    pub async fn write(&self, text: &str) -> Result<PathBuf> {
        self.write_at(text, Local::now().naive_local()).await
    }

    pub async fn write_at(&self, text: &str, at: NaiveDateTime) -> Result<PathBuf> {
        let path = self.output_dir.join(output_file_name(at));

        tokio::fs::write(&path, text)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        app_log!(info, "Response saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 3, 7)
            .unwrap()
    }

    fn temp_output_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("resume_sink_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_output_file_name_format() {
        assert_eq!(output_file_name(fixed_time()), "resume_20240105090307.md");
    }

    #[tokio::test]
    async fn test_write_is_verbatim_and_overwrites() {
        let dir = temp_output_dir();
        let sink = ResultSink::new(dir.clone());

        let path = sink.write_at("# First\n", fixed_time()).await.unwrap();
        assert_eq!(path, dir.join("resume_20240105090307.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# First\n");

        sink.write_at("second", fixed_time()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_an_error() {
        let sink = ResultSink::new(PathBuf::from("/nonexistent/output"));
        assert!(sink.write("text").await.is_err());
    }
}
