use aria_context::ContextError;
use aria_llm::LlmError;
use thiserror::Error;

/// Why a coaching operation fell back to its canned value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoachError {
    #[error("Could not load user context: {0}")]
    Context(String),

    #[error("Could not reach the model: {0}")]
    Transport(String),

    #[error("Model API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Model response could not be used: {0}")]
    MalformedResponse(String),

    #[error("Coach is misconfigured: {0}")]
    Configuration(String),
}

impl CoachError {
    /// Classify an error from the LLM client
    pub fn from_llm(error: &anyhow::Error) -> Self {
        match LlmError::classify(error) {
            Some(LlmError::Transport(e)) => Self::Transport(e.to_string()),
            Some(LlmError::Stream(message)) => Self::Transport(message.clone()),
            Some(LlmError::Api { status, body }) => Self::Api {
                status: *status,
                message: body.clone(),
            },
            Some(LlmError::MalformedResponse(message)) => Self::MalformedResponse(message.clone()),
            Some(LlmError::Configuration(message)) => Self::Configuration(message.clone()),
            None => Self::Transport(format!("{:#}", error)),
        }
    }

    /// Short machine-readable tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Context(_) => "context",
            Self::Transport(_) => "transport",
            Self::Api { .. } => "api",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Configuration(_) => "configuration",
        }
    }
}

impl From<ContextError> for CoachError {
    fn from(error: ContextError) -> Self {
        Self::Context(error.to_string())
    }
}

impl From<LlmError> for CoachError {
    fn from(error: LlmError) -> Self {
        Self::from_llm(&anyhow::Error::from(error))
    }
}
