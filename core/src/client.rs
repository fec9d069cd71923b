use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::AssistantConfig;
use crate::errors::{ChatError, ChatResult};
use crate::session::ChatSession;
use crate::types::*;

/// Seam between the conversation loop and the model.
///
/// A successful call appends both the outgoing user turn and the model's
/// reply to the session.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, session: &mut ChatSession, message: &str) -> ChatResult<String>;
}

/// Client for the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiChat {
    http: Client,
    api_key: String,
    model_name: String,
    system_prompt: Option<String>,
}

impl GeminiChat {
    /// Create a new Gemini chat client from the loaded configuration
    pub fn new(config: &AssistantConfig) -> ChatResult<Self> {
        let api_key = config.google_api_key.clone().ok_or_else(|| {
            ChatError::Config("API key is required to initialize the Gemini client".to_string())
        })?;

        let model_name = config
            .model_name
            .clone()
            .unwrap_or_else(|| "gemini-2.0-flash".to_string());

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChatError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model_name,
            system_prompt: config.system_prompt.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Replaces the system prompt used for every request
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    fn api_url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model_name, self.api_key
        )
    }

    fn build_request(&self, session: &ChatSession) -> GenerateContentRequest {
        let system_instruction = self.system_prompt.as_ref().map(|prompt| Content {
            parts: vec![Part::text(prompt.clone())],
            role: Some("system".to_string()),
        });

        GenerateContentRequest {
            contents: session.contents(),
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                ..Default::default()
            }),
        }
    }

    async fn generate(&self, request: &GenerateContentRequest) -> ChatResult<GenerateContentResponse> {
        let response = self
            .http
            .post(self.api_url())
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Request(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Response(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            // The API usually returns a structured error body; fall back to
            // the raw text when it does not.
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(parsed) => format!(
                    "{} (code: {}, status: {})",
                    parsed.error.message, parsed.error.code, parsed.error.status
                ),
                Err(_) => body,
            };
            return Err(ChatError::Http {
                status_code: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ChatError::Parsing(format!("Failed to parse response: {}", e)))
    }
}

/// Extracts the primary text from a response: the first text part of the
/// first candidate.
pub fn primary_text(response: &GenerateContentResponse) -> ChatResult<String> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| ChatError::Response("No candidates in response".to_string()))?;

    if let Some(reason) = &candidate.finish_reason {
        if reason != "STOP" {
            warn!(finish_reason = %reason, "Generation stopped early");
        }
    }

    let content = candidate
        .content
        .as_ref()
        .ok_or_else(|| ChatError::Response("No content in candidate".to_string()))?;

    content
        .parts
        .iter()
        .find_map(|part| part.text.clone())
        .ok_or_else(|| ChatError::Response("No text in candidate parts".to_string()))
}

#[async_trait]
impl ChatBackend for GeminiChat {
    async fn send_message(&self, session: &mut ChatSession, message: &str) -> ChatResult<String> {
        session.push_user(message);
        debug!(
            session_id = %session.id(),
            turns = session.len(),
            model = %self.model_name,
            "Sending chat request"
        );

        let request = self.build_request(session);
        let response = self.generate(&request).await?;
        let text = primary_text(&response)?;

        session.push_model(text.clone());
        Ok(text)
    }
}
