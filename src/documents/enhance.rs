//! Best-effort document enhancement through an external text-generation service.
//!
//! Failures never propagate: `EnhancementClient::enhance` always yields an
//! `EnhancementOutcome` and callers keep the original text on `Unavailable`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::OpenAiConfig;

pub const DEFAULT_TONE: &str = "professional and formal";

const SYSTEM_PROMPT: &str = "You are an expert legal document reviewer and editor.";
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Error)]
pub enum EnhancementError {
    #[error("no API key configured for the text-generation service")]
    NotConfigured,
    #[error("request to text-generation service failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("text-generation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("text-generation service returned no choices")]
    NoChoices,
    #[error("text-generation service returned an empty reply")]
    EmptyReply,
}

/// A single request to the text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub instruction_prompt: String,
    pub content: String,
}

/// Seam for the external text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EnhancementError>;
}

#[derive(Debug, Clone, Default)]
pub struct EnhancementOptions {
    pub tone: Option<String>,
}

impl EnhancementOptions {
    pub fn with_tone(tone: impl Into<String>) -> Self {
        Self {
            tone: Some(tone.into()),
        }
    }

    fn tone(&self) -> &str {
        self.tone
            .as_deref()
            .map(str::trim)
            .filter(|tone| !tone.is_empty())
            .unwrap_or(DEFAULT_TONE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnhancementOutcome {
    Enhanced(String),
    Unavailable(String),
}

/// Build the fixed review instruction for the given tone.
pub fn instruction_prompt(options: &EnhancementOptions) -> String {
    format!(
        "You are a legal document expert. Review and enhance the following document draft.\n\n\
         Ensure it:\n\
         - Maintains {} tone\n\
         - Includes all necessary legal clauses\n\
         - Is clear and unambiguous\n\
         - Complies with standard legal practices",
        options.tone()
    )
}

/// Wraps an optional `TextGenerator`; absent backends report `Unavailable`.
#[derive(Clone, Default)]
pub struct EnhancementClient {
    backend: Option<Arc<dyn TextGenerator>>,
}

impl EnhancementClient {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Production client from configuration; disabled when no API key is set.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, EnhancementError> {
        if config.api_key.is_none() {
            return Ok(Self::disabled());
        }
        Ok(Self::new(Arc::new(OpenAiGenerator::new(config.clone())?)))
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn enhance(&self, content: &str, options: &EnhancementOptions) -> EnhancementOutcome {
        let Some(backend) = &self.backend else {
            return EnhancementOutcome::Unavailable(EnhancementError::NotConfigured.to_string());
        };

        let request = CompletionRequest {
            instruction_prompt: instruction_prompt(options),
            content: content.to_string(),
        };

        match backend.complete(&request).await {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    EnhancementOutcome::Unavailable(EnhancementError::EmptyReply.to_string())
                } else {
                    EnhancementOutcome::Enhanced(reply.to_string())
                }
            }
            Err(e) => EnhancementOutcome::Unavailable(e.to_string()),
        }
    }
}

/// Chat Completions backend.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Result<Self, EnhancementError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("legaldraft-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    fn user_prompt(request: &CompletionRequest) -> String {
        format!(
            "{}\n\nDocument:\n{}\n\nPlease provide the enhanced version only, without explanations.",
            request.instruction_prompt, request.content
        )
    }
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EnhancementError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(EnhancementError::NotConfigured)?;

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "model": &self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": Self::user_prompt(request)}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EnhancementError::Status { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .ok_or(EnhancementError::NoChoices)?
            .message
            .content
            .ok_or(EnhancementError::EmptyReply)
    }
}
