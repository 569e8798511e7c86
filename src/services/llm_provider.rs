use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::LlmConfig;

/// Raw chat response. Providers answer either with a top-level `text` or with a
/// `message.content` list of blocks; every field is optional so both parse.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub message: Option<ChatMessage>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl ChatResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            message: None,
        }
    }

    pub fn from_message_content(text: impl Into<String>) -> Self {
        Self {
            text: None,
            message: Some(ChatMessage {
                content: vec![ContentBlock {
                    text: Some(text.into()),
                }],
            }),
        }
    }
}

type TextStrategy = fn(&ChatResponse) -> Option<&str>;

const TEXT_STRATEGIES: &[TextStrategy] = &[direct_text, first_content_block];

fn direct_text(response: &ChatResponse) -> Option<&str> {
    response.text.as_deref().filter(|t| !t.is_empty())
}

fn first_content_block(response: &ChatResponse) -> Option<&str> {
    response
        .message
        .as_ref()?
        .content
        .first()?
        .text
        .as_deref()
}

/// Text carried by `response`, from the first extraction strategy that finds any.
pub fn response_text(response: &ChatResponse) -> Option<&str> {
    TEXT_STRATEGIES.iter().find_map(|strategy| strategy(response))
}

/// A hosted chat completion endpoint. One call per prompt, no retries.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn chat(&self, model: &str, message: &str) -> Result<ChatResponse>;
}

/// Cohere chat API spoken directly over HTTP.
pub struct CohereClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CohereClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pdf-summarizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat", self.base_url)
    }
}

#[async_trait]
impl CompletionService for CohereClient {
    async fn chat(&self, model: &str, message: &str) -> Result<ChatResponse> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&json!({ "model": model, "message": message }))
            .send()
            .await
            .context("Cohere chat request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Cohere chat returned {status}: {body}");
        }

        response
            .json::<ChatResponse>()
            .await
            .context("Failed to decode Cohere chat response")
    }
}

/// Build the process-wide completion client. Only Cohere is supported.
pub fn build_completion_service(config: &LlmConfig) -> Result<Arc<dyn CompletionService>> {
    let client = CohereClient::new(&config.base_url, &config.api_key)?;

    tracing::info!(base_url = %client.base_url, model = %config.model, "Completion service ready");
    Ok(Arc::new(client))
}
