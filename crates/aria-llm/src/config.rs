// Configuration layer for LLM client creation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::LlmError;
use crate::openai::OpenAIClient;
use crate::traits::ChatClient;

/// Configuration for the OpenAI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Base URL for OpenAI API (optional, defaults to https://api.openai.com/v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read `OPENAI_API_KEY` (and optional `OPENAI_BASE_URL`) from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_var("OPENAI_API_KEY")
    }

    /// Read the key from a named variable, e.g. `OPENAI_VISION_API_KEY`
    pub fn from_env_var(key_var: &str) -> Result<Self> {
        let api_key = std::env::var(key_var)
            .map_err(|_| LlmError::Configuration(format!("{} is not set", key_var)))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }
}

/// Factory for creating LLM clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a chat client from provider configuration
    pub fn create_chat_client(config: &OpenAIConfig) -> Result<Arc<dyn ChatClient>> {
        let client = OpenAIClient::from_config(config)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config() {
        let config = OpenAIConfig::new("test-key").with_base_url("http://localhost:9999");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999"));
    }

    #[test]
    fn test_base_url_is_skipped_when_absent() {
        let json = serde_json::to_value(OpenAIConfig::new("k")).unwrap();
        assert!(json.get("base_url").is_none());
    }

    #[test]
    fn test_factory_rejects_empty_key() {
        assert!(ClientFactory::create_chat_client(&OpenAIConfig::new("")).is_err());
    }

    #[test]
    fn test_factory_builds_client() {
        let client = ClientFactory::create_chat_client(&OpenAIConfig::new("test-key"));
        assert!(client.is_ok());
    }
}
