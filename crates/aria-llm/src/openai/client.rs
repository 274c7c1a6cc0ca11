// OpenAI-specific client implementation

use crate::config::OpenAIConfig;
use crate::error::LlmError;
use crate::streaming::parse_chat_sse_stream;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, EventStream, TokenUsage};
use crate::types::{Content, ContentPart, Message};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration("OpenAI API key is empty".to_string()).into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    pub fn from_config(config: &OpenAIConfig) -> Result<Self> {
        let client = Self::new(config.api_key.clone())?;
        Ok(match &config.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    /// Point the client at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build chat completion request payload
    fn build_chat_request(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: &ChatOptions,
        stream: bool,
    ) -> Result<Value> {
        let openai_messages: Vec<Value> = messages
            .into_iter()
            .map(|msg| self.convert_message(msg))
            .collect();

        let mut obj = Map::new();
        obj.insert("model".to_string(), Value::from(model));
        obj.insert("messages".to_string(), Value::Array(openai_messages));
        obj.insert("stream".to_string(), Value::Bool(stream));

        // o1 and gpt-5 models use different parameter names
        let is_reasoning_model = model.starts_with("o1") || model.starts_with("gpt-5");

        if let Some(temp) = options.temperature {
            // o1 and gpt-5 models don't support temperature
            if !is_reasoning_model {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
        }
        if let Some(max_tokens) = options.max_tokens {
            let token_field = if is_reasoning_model {
                "max_completion_tokens"
            } else {
                "max_tokens"
            };
            obj.insert(token_field.to_string(), serde_json::json!(max_tokens));
        }
        if let Some(format) = &options.response_format {
            obj.insert("response_format".to_string(), serde_json::to_value(format)?);
        }

        Ok(Value::Object(obj))
    }

    /// Convert our Message type to OpenAI format
    fn convert_message(&self, message: Message) -> Value {
        let (role, content, name) = match message {
            Message::System { content, name } => ("system", Some(content), name),
            Message::Human { content, name } => ("user", Some(content), name),
            Message::AI { content, name } => ("assistant", content, name),
        };

        let mut obj = Map::new();
        obj.insert("role".to_string(), Value::from(role));
        if let Some(content) = content {
            obj.insert("content".to_string(), self.convert_content(content));
        }
        if let Some(name) = name {
            obj.insert("name".to_string(), Value::from(name));
        }
        Value::Object(obj)
    }

    /// Convert Content to OpenAI format (string or array of parts)
    fn convert_content(&self, content: Content) -> Value {
        match content {
            Content::Text(s) => Value::String(s),
            Content::Parts(parts) => {
                let converted: Vec<Value> = parts
                    .into_iter()
                    .map(|part| match part {
                        ContentPart::Text { text } => serde_json::json!({
                            "type": "text",
                            "text": text,
                        }),
                        ContentPart::ImageUrl { image_url } => serde_json::json!({
                            "type": "image_url",
                            "image_url": image_url,
                        }),
                    })
                    .collect();
                Value::Array(converted)
            }
        }
    }

    async fn post_chat(&self, payload: &Value) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(LlmError::Transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, "OpenAI API returned an error status");
            return Err(LlmError::Api { status, body }.into());
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_chat_request(
            &request.model,
            request.messages,
            &request.options,
            false,
        )?;

        tracing::debug!(model = %request.model, "Sending chat completion request");
        let response = self.post_chat(&payload).await?;

        let body = response.text().await.map_err(LlmError::Transport)?;
        let raw: OpenAIChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::malformed(format!("Failed to parse response: {}", e)))?;

        // Convert to provider-agnostic response
        let choice = raw.choices.first();
        Ok(ChatResponse {
            content: choice.and_then(|c| c.message.content.clone()),
            usage: raw.usage.as_ref().map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason.clone()),
            raw: serde_json::to_value(&raw)?,
        })
    }

    async fn chat_stream(&self, request: ChatRequest) -> Result<EventStream> {
        let payload = self.build_chat_request(
            &request.model,
            request.messages,
            &request.options,
            true,
        )?;

        tracing::debug!(model = %request.model, "Opening chat completion stream");
        let response = self.post_chat(&payload).await?;

        Ok(parse_chat_sse_stream(response))
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES (for Chat Completions)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ResponseFormat;
    use crate::types::ImageDetail;

    fn client() -> OpenAIClient {
        OpenAIClient::new("test-key").unwrap()
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(OpenAIClient::new("  ").is_err());
    }

    #[test]
    fn test_payload_uses_max_tokens_and_temperature() {
        let options = ChatOptions::new().temperature(0.8).max_tokens(500);
        let payload = client()
            .build_chat_request("gpt-4o", vec![Message::human("Hi")], &options, false)
            .unwrap();

        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["max_tokens"], 500);
        assert!((payload["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "Hi");
    }

    #[test]
    fn test_reasoning_model_parameter_names() {
        let options = ChatOptions::new().temperature(0.8).max_tokens(500);
        let payload = client()
            .build_chat_request("o1-mini", vec![Message::human("Hi")], &options, true)
            .unwrap();

        assert!(payload.get("temperature").is_none());
        assert!(payload.get("max_tokens").is_none());
        assert_eq!(payload["max_completion_tokens"], 500);
    }

    #[test]
    fn test_json_response_format() {
        let options = ChatOptions::new().response_format(ResponseFormat::JsonObject);
        let payload = client()
            .build_chat_request("gpt-4o", vec![Message::human("plan")], &options, false)
            .unwrap();

        assert_eq!(payload["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_image_parts_are_converted() {
        let content = Content::Parts(vec![
            ContentPart::text("Check my squat"),
            ContentPart::image("data:image/jpeg;base64,AAAA", Some(ImageDetail::High)),
        ]);
        let payload = client()
            .build_chat_request("gpt-4o", vec![Message::human(content)], &ChatOptions::new(), false)
            .unwrap();

        let parts = payload["messages"][0]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/jpeg;base64,AAAA");
        assert_eq!(parts[1]["image_url"]["detail"], "high");
    }

    #[test]
    fn test_assistant_without_content_omits_field() {
        let message = Message::AI { content: None, name: None };
        let value = client().convert_message(message);
        assert_eq!(value["role"], "assistant");
        assert!(value.get("content").is_none());
    }
}
