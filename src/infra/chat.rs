//! Chat completion gateway for the assistant and content enhancers.
//!
//! Speaks the OpenAI-style chat completions dialect. Two modes: a
//! buffered `complete` for the Q&A assistant and a streaming `stream`
//! that yields text fragments as the model emits them.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// One turn of a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Text fragments of a streamed completion, in emission order.
pub type TextFragments = BoxStream<'static, AppResult<String>>;

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

/// Chat completion operations.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run a transcript to completion and return the reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;

    /// Stream the reply to a transcript as text fragments.
    async fn stream(&self, messages: &[ChatMessage]) -> AppResult<TextFragments>;
}

/// HTTP implementation of [`ChatClient`].
pub struct ChatGateway {
    http: Client,
    endpoint: String,
    model: String,
}

impl ChatGateway {
    pub fn new(config: &Config) -> Self {
        let mut headers = HeaderMap::new();
        let key = config.chat_api_key();
        if !key.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .expect("chat API key contains invalid header characters");
            headers.insert(AUTHORIZATION, bearer);
        }

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: format!("{}/chat/completions", config.chat_url),
            model: config.chat_model.clone(),
        }
    }

    fn payload(&self, messages: &[ChatMessage], stream: bool) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": stream,
        })
    }
}

/// Pull complete `data:` lines out of an SSE byte stream and decode the
/// text fragment each one carries. Returns `None` at the `[DONE]` marker.
fn parse_sse_line(line: &str) -> Option<AppResult<Option<String>>> {
    let data = line.strip_prefix("data: ")?.trim();
    if data == "[DONE]" {
        return Some(Ok(None));
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            let text = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.delta.content)
                .unwrap_or_default();
            Some(Ok(Some(text)))
        }
        Err(e) => Some(Err(AppError::ai(format!("malformed stream chunk: {e}")))),
    }
}

#[async_trait]
impl ChatClient for ChatGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&self.payload(messages, false))
            .send()
            .await
            .map_err(|e| AppError::ai(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ai(format!("chat service returned {status}: {body}")));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ai(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::ai("chat service returned no choices"))
    }

    async fn stream(&self, messages: &[ChatMessage]) -> AppResult<TextFragments> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&self.payload(messages, true))
            .send()
            .await
            .map_err(|e| AppError::ai(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ai(format!("chat service returned {status}: {body}")));
        }

        // Reassemble SSE lines across chunk boundaries, then flatten each
        // chunk's decoded fragments back into one stream. A `[DONE]` line
        // decodes to None and ends the stream.
        let fragments = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| AppError::ai(e.to_string())))
            .scan(String::new(), |buffer, chunk| {
                let mut out: Vec<AppResult<Option<String>>> = Vec::new();
                match chunk {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        while let Some(newline) = buffer.find('\n') {
                            let line = buffer[..newline].trim_end_matches('\r').to_string();
                            buffer.drain(..=newline);
                            if let Some(parsed) = parse_sse_line(&line) {
                                out.push(parsed);
                            }
                        }
                    }
                    Err(e) => out.push(Err(e)),
                }
                futures::future::ready(Some(stream::iter(out)))
            })
            .flatten()
            .take_while(|item| {
                let done = matches!(item, Ok(None));
                futures::future::ready(!done)
            })
            .filter_map(|item| {
                futures::future::ready(match item {
                    Ok(Some(text)) if text.is_empty() => None,
                    Ok(Some(text)) => Some(Ok(text)),
                    Ok(None) => None,
                    Err(e) => Some(Err(e)),
                })
            });

        Ok(fragments.boxed())
    }
}
