// src/secrets.rs
//! Key-value secret lookup: process environment first, then a TOML file

use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SecretStore {
    file: PathBuf,
}

impl SecretStore {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    /// Resolve `key` on every call; nothing is cached here.
    pub fn get(&self, key: &str) -> Result<String> {
        if let Ok(value) = std::env::var(key) {
            if !value.trim().is_empty() {
                return Ok(value);
            }
        }

        self.get_from_file(key)
    }

    fn get_from_file(&self, key: &str) -> Result<String> {
        if !self.file.exists() {
            anyhow::bail!(
                "Secret {} not set in environment and {} does not exist",
                key,
                self.file.display()
            );
        }

        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read secrets file: {}", self.file.display()))?;
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse secrets file: {}", self.file.display()))?;

        table
            .get(key)
            .and_then(|value| value.as_str())
            .map(|value| value.to_string())
            .ok_or_else(|| anyhow::anyhow!("Secret {} not found in {}", key, self.file.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_secrets(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("secrets_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_key_from_file() {
        let path = temp_secrets("RA_TEST_ONLY_KEY = \"gsk_from_file\"\n");
        let store = SecretStore::new(path.clone());
        assert_eq!(store.get("RA_TEST_ONLY_KEY").unwrap(), "gsk_from_file");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_reads_file_on_every_call() {
        let path = temp_secrets("RA_TEST_ROTATED_KEY = \"first\"\n");
        let store = SecretStore::new(path.clone());
        assert_eq!(store.get("RA_TEST_ROTATED_KEY").unwrap(), "first");

        std::fs::write(&path, "RA_TEST_ROTATED_KEY = \"second\"\n").unwrap();
        assert_eq!(store.get("RA_TEST_ROTATED_KEY").unwrap(), "second");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let path = temp_secrets("OTHER = \"x\"\n");
        let store = SecretStore::new(path.clone());
        assert!(store.get("RA_TEST_ABSENT_KEY").is_err());
        std::fs::remove_file(path).unwrap();

        let store = SecretStore::new(PathBuf::from("/nonexistent/secrets.toml"));
        assert!(store.get("RA_TEST_ABSENT_KEY").is_err());
    }
}
