// src/extractor.rs
//! Resume text extraction, dispatched on the declared media type

use anyhow::{Context, Result};
use std::process::Stdio;
use tokio::process::Command;

use crate::app_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Pdf,
    Image,
    PlainText,
}

impl MediaKind {
    /// Only the MIME essence is inspected; anything unrecognised is plain text.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/pdf" {
            Self::Pdf
        } else if essence.starts_with("image/") {
            Self::Image
        } else {
            Self::PlainText
        }
    }
}

/// Declared MIME type for a local file, judged by extension the way a browser would.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    match crate::utils::get_file_extension(file_name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "text/plain",
    }
}

/// An uploaded resume: raw bytes plus the media type the client declared.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: Option<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            mime: mime.into(),
            bytes,
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }
}

#[derive(Debug, Clone)]
pub struct TextExtractor {
    tesseract_cmd: String,
}

impl TextExtractor {
    pub fn new(tesseract_cmd: impl Into<String>) -> Self {
        Self {
            tesseract_cmd: tesseract_cmd.into(),
        }
    }

    pub async fn extract(&self, upload: &Upload) -> Result<String> {
        let kind = upload.kind();
        app_log!(
            info,
            "Extracting resume text ({:?}, {} bytes)",
            kind,
            upload.bytes.len()
        );

        let text = match kind {
            MediaKind::Pdf => {
                let bytes = upload.bytes.clone();
                tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                    .await
                    .context("PDF extraction task panicked")??
            }
            MediaKind::Image => self.extract_image_text(&upload.bytes, &upload.mime).await?,
            MediaKind::PlainText => extract_plain_text(&upload.bytes)?,
        };

        app_log!(info, "Extracted {} characters of resume text", text.len());
        Ok(text)
    }

    async fn extract_image_text(&self, bytes: &[u8], mime: &str) -> Result<String> {
        let extension = mime
            .split(';')
            .next()
            .and_then(|essence| essence.trim().strip_prefix("image/"))
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("png");
        let input_path =
            std::env::temp_dir().join(format!("resume_ocr_{}.{}", uuid::Uuid::new_v4(), extension));

        tokio::fs::write(&input_path, bytes)
            .await
            .with_context(|| format!("Failed to stage image for OCR: {}", input_path.display()))?;

        let output = Command::new(&self.tesseract_cmd)
            .arg(&input_path)
            .arg("stdout")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        let _ = tokio::fs::remove_file(&input_path).await;

        let output = output
            .with_context(|| format!("Failed to run OCR engine: {}", self.tesseract_cmd))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("OCR engine exited with {}: {}", output.status, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Text of every page in page order, concatenated without separators.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = lopdf::Document::load_mem(bytes).context("Failed to parse PDF document")?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .with_context(|| format!("Failed to extract text from PDF page {}", page_number))?;
        text.push_str(&page_text);
    }

    Ok(text)
}

pub fn extract_plain_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).context("Resume is not valid UTF-8 text")
}
