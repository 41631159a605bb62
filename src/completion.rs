// src/completion.rs
//! Chat-completion client for the hosted model endpoint

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::app_log;
use crate::secrets::SecretStore;

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

pub const MODEL: &str = "llama-3.1-70b-versatile";
pub const API_KEY_SECRET: &str = "GROQ_API_KEY";
pub const TEMPERATURE: f32 = 1.0;
pub const MAX_TOKENS: u32 = 1024;
pub const TOP_P: f32 = 1.0;

/// Anything that turns a prompt into generated text.
#[rocket::async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
    pub stop: Option<Vec<String>>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// The prompt is sent as the only user turn with fixed sampling settings.
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
            stop: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
}

impl ChatCompletionResponse {
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .context("Completion response contained no choices")?
            .message
            .content
            .context("Completion message has no content")
    }
}

pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
    secrets: SecretStore,
    api_key_secret: String,
}

impl GroqClient {
    /// No request timeout is set; a call runs until the endpoint answers or fails.
    pub fn new(base_url: String, secrets: SecretStore) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secrets,
            api_key_secret: API_KEY_SECRET.to_string(),
        })
    }

    /// Look the API key up under a different secret name.
    pub fn with_api_key_secret(mut self, name: impl Into<String>) -> Self {
        self.api_key_secret = name.into();
        self
    }
}

#[rocket::async_trait]
impl CompletionBackend for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self.secrets.get(&self.api_key_secret)?;
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT);
        let payload = ChatCompletionRequest::for_prompt(prompt);

        app_log!(
            info,
            "Calling completion service: {} (model {}, prompt {} chars)",
            url,
            MODEL,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .context("Completion HTTP request failed")?;

        let status = response.status();
        app_log!(trace, "Completion response status: {}", status);

        if status.is_success() {
            let completion: ChatCompletionResponse = response
                .json()
                .await
                .context("Failed to parse completion response")?;
            completion.into_text()
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            app_log!(error, "Completion service error response: {}", error_text);
            anyhow::bail!("Completion service returned error status {}: {}", status, error_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_fixed_parameters() {
        let request = ChatCompletionRequest::for_prompt("hello");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama-3.1-70b-versatile");
        assert_eq!(json["temperature"], 1.0);
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["top_p"], 1.0);
        assert_eq!(json["stream"], false);
        assert!(json["stop"].is_null());
        assert_eq!(
            json["messages"],
            serde_json::json!([{ "role": "user", "content": "hello" }])
        );
    }

    #[test]
    fn test_first_choice_text_is_returned() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Practise active listening." }, "finish_reason": "stop" }
            ],
            "usage": { "total_tokens": 42 }
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "Practise active listening.");
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.into_text().is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        let secrets = SecretStore::new(std::path::PathBuf::from("/nonexistent/secrets.toml"));
        let client = GroqClient::new("http://127.0.0.1:9".to_string(), secrets)
            .unwrap()
            .with_api_key_secret("RA_TEST_COMPLETION_KEY");

        let err = client.complete("hello").await.unwrap_err();
        assert!(err.to_string().contains("RA_TEST_COMPLETION_KEY"));
    }
}
