use serde::{Deserialize, Serialize};

/// Events emitted while a streamed coaching reply is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoachEvent {
    /// Incremental reply text
    Message {
        content: String,
    },

    /// Reply finished; `reply` is the full text recorded in the transcript
    Done {
        reply: String,
        fallback: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl CoachEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Done { .. } => "done",
        }
    }
}
