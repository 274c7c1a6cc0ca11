use thiserror::Error;

/// Failures raised by the LLM client.
///
/// Trait methods return `anyhow::Result`; these variants travel inside the
/// `anyhow::Error` so callers can classify a failure with `downcast_ref`.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl LlmError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Find the `LlmError` inside an `anyhow::Error`, if there is one
    pub fn classify(error: &anyhow::Error) -> Option<&LlmError> {
        error.downcast_ref::<LlmError>()
    }
}
