use async_trait::async_trait;
use color_eyre::{eyre::OptionExt, Result};
use serde::{Deserialize, Serialize};

use super::{SamplingParams, TextGenerator};

const SYSTEM_PROMPT: &str = "You are an experienced calculus tutor writing content for a \
     self-study platform. Use LaTeX delimiters \\( \\) for inline math and \\[ \\] for display \
     math. Follow the requested output format exactly.";

/// OpenAI-compatible chat-completions backend. Any provider exposing the
/// /chat/completions shape works; the configured name doubles as the
/// provenance tag.
pub struct ChatBackend {
    name: String,
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl ChatBackend {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }
}

#[async_trait]
impl TextGenerator for ChatBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str, params: SamplingParams) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("generator {} error: {status} - {text}", self.name);
            color_eyre::eyre::bail!("generator {} returned {status}", self.name);
        }

        let parsed: ChatResponse = resp.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_eyre("generator response carried no choices")?
            .message
            .content;

        tracing::debug!("generator {} produced {} chars", self.name, content.len());
        Ok(content)
    }
}
