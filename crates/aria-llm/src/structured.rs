//! Structured (JSON) generation on top of [`ChatClient::chat`].
//!
//! The request is forced into `response_format: json_object` and the reply is
//! decoded into the caller's type. A reply that cannot be decoded surfaces as
//! [`LlmError::MalformedResponse`] so callers can pick a fallback value.

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::error::LlmError;
use crate::traits::{ChatClient, ChatRequest, ResponseFormat};

/// Run a chat request in JSON mode and decode the reply as `T`
pub async fn generate_structured<T: DeserializeOwned>(
    client: &dyn ChatClient,
    mut request: ChatRequest,
) -> Result<T> {
    request.options.response_format = Some(ResponseFormat::JsonObject);

    let response = client.chat(request).await?;
    let content = response
        .content
        .ok_or_else(|| LlmError::malformed("Response had no content"))?;

    Ok(parse_json_content(&content)?)
}

/// Decode model output as JSON, tolerating a surrounding ```json fence
pub fn parse_json_content<T: DeserializeOwned>(content: &str) -> std::result::Result<T, LlmError> {
    let trimmed = strip_code_fence(content.trim());
    serde_json::from_str(trimmed).map_err(|e| {
        tracing::debug!(error = %e, "Model output is not valid JSON for target type");
        LlmError::malformed(format!("Invalid JSON in response: {}", e))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") up to the first newline
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
