// src/reference_data.rs
//! Occupation → core competency reference table

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::app_log;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompetencyRow {
    #[serde(rename = "ANZSCO Title")]
    pub occupation: String,
    #[serde(rename = "Core Competency")]
    pub competency: String,
    #[serde(rename = "Anchor Value", default)]
    pub anchor_value: String,
}

/// Immutable, row-ordered view of the reference CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDataset {
    rows: Vec<CompetencyRow>,
}

impl ReferenceDataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let rows = csv_reader
            .deserialize::<CompetencyRow>()
            .enumerate()
            .map(|(index, record)| {
                record.with_context(|| format!("Malformed reference row {}", index + 1))
            })
            .collect::<Result<Vec<CompetencyRow>>>()?;

        Ok(Self { rows })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open reference data: {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to parse reference data: {}", path.display()))
    }

    pub fn rows(&self) -> &[CompetencyRow] {
        &self.rows
    }

    /// Distinct occupation titles in order of first appearance.
    pub fn occupations(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|row| row.occupation.as_str())
            .filter(|title| seen.insert(*title))
            .collect()
    }

    /// `<competency>: <anchor value>` for every row of `occupation`, in row order.
    pub fn skill_lines(&self, occupation: &str) -> Vec<String> {
        self.rows
            .iter()
            .filter(|row| row.occupation == occupation)
            .map(|row| format!("{}: {}", row.competency, row.anchor_value))
            .collect()
    }

    /// Newline-joined skill lines; empty when the title is unknown.
    pub fn skill_context(&self, occupation: &str) -> String {
        self.skill_lines(occupation).join("\n")
    }
}

/// Reads the reference file at most once per loader; later calls share the same dataset.
#[derive(Debug)]
pub struct ReferenceDataLoader {
    path: PathBuf,
    dataset: OnceCell<Arc<ReferenceDataset>>,
}

impl ReferenceDataLoader {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            dataset: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A failed read is not memoized, so the next interaction reports it again.
    pub async fn get(&self) -> Result<Arc<ReferenceDataset>> {
        self.dataset
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let dataset = tokio::task::spawn_blocking(move || ReferenceDataset::from_path(&path))
                    .await
                    .context("Reference data loader task panicked")??;
                app_log!(
                    info,
                    "Loaded {} reference rows from {}",
                    dataset.rows().len(),
                    self.path.display()
                );
                Ok::<_, anyhow::Error>(Arc::new(dataset))
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ANZSCO Title,Core Competency,Anchor Value,Notes
Software Engineer,Communication,High,x
Nurse,Teamwork,High,
Software Engineer,Teamwork,Medium,y
Nurse,Numeracy,,
";

    fn sample() -> ReferenceDataset {
        ReferenceDataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_occupations_are_distinct_in_first_seen_order() {
        assert_eq!(sample().occupations(), vec!["Software Engineer", "Nurse"]);
    }

    #[test]
    fn test_skill_context_keeps_row_order() {
        assert_eq!(
            sample().skill_context("Software Engineer"),
            "Communication: High\nTeamwork: Medium"
        );
        assert_eq!(sample().skill_context("Nurse"), "Teamwork: High\nNumeracy: ");
    }

    #[test]
    fn test_unknown_occupation_yields_empty_context() {
        let data = sample();
        assert!(data.skill_lines("Astronaut").is_empty());
        assert_eq!(data.skill_context("Astronaut"), "");
        assert_eq!(data.skill_context("software engineer"), "");
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let broken = "ANZSCO Title,Anchor Value\nNurse,High\n";
        assert!(ReferenceDataset::from_reader(broken.as_bytes()).is_err());
    }

    #[tokio::test]
    async fn test_loader_reads_source_once() {
        let path = std::env::temp_dir().join(format!("reference_{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, SAMPLE).unwrap();

        let loader = ReferenceDataLoader::new(path.clone());
        let first = loader.get().await.unwrap();

        std::fs::remove_file(&path).unwrap();
        let second = loader.get().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(first.rows().len(), 4);
    }

    #[tokio::test]
    async fn test_loader_reports_unreadable_source() {
        let loader = ReferenceDataLoader::new(PathBuf::from("/nonexistent/skills.csv"));
        assert!(loader.get().await.is_err());
        assert!(loader.get().await.is_err());
    }
}
