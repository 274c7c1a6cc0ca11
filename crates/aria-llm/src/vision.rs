// Image analysis: frames are inlined as base64 data URLs in one user message

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use crate::types::{ContentPart, ImageDetail, Message};

/// A single still image, already base64 encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    pub mime_type: String,
    pub base64: String,
}

impl ImageFrame {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64: STANDARD.encode(bytes),
        }
    }

    /// Wrap an existing base64 payload, rejecting anything that does not decode
    pub fn from_base64(
        mime_type: impl Into<String>,
        base64: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let base64 = base64.into();
        STANDARD
            .decode(base64.as_bytes())
            .map_err(|e| LlmError::Configuration(format!("Invalid base64 image: {}", e)))?;
        Ok(Self {
            mime_type: mime_type.into(),
            base64,
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    pub system: Option<String>,
    pub prompt: String,
    pub frames: Vec<ImageFrame>,
    pub options: ChatOptions,
}

impl VisionRequest {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        frames: Vec<ImageFrame>,
    ) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: prompt.into(),
            frames,
            options: ChatOptions::default(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn into_chat_request(self) -> ChatRequest {
        let mut parts = Vec::with_capacity(self.frames.len() + 1);
        parts.push(ContentPart::text(self.prompt));
        parts.extend(
            self.frames
                .iter()
                .map(|frame| ContentPart::image(frame.to_data_url(), Some(ImageDetail::High))),
        );

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.system {
            messages.push(Message::system(system));
        }
        messages.push(Message::human(parts));

        ChatRequest::new(self.model, messages).with_options(self.options)
    }
}

/// Send frames plus prompt to a vision-capable model
pub async fn analyze_images(
    client: &dyn ChatClient,
    request: VisionRequest,
) -> Result<ChatResponse> {
    if request.frames.is_empty() {
        return Err(LlmError::Configuration("Vision request has no frames".to_string()).into());
    }
    tracing::debug!(frames = request.frames.len(), model = %request.model, "Analyzing images");
    client.chat(request.into_chat_request()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let frame = ImageFrame::from_bytes("image/jpeg", b"abc");
        assert_eq!(frame.to_data_url(), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(ImageFrame::from_base64("image/png", "not base64!!").is_err());
        assert!(ImageFrame::from_base64("image/png", "YWJj").is_ok());
    }

    #[test]
    fn test_chat_request_layout() {
        let frames = vec![
            ImageFrame::from_bytes("image/jpeg", b"1"),
            ImageFrame::from_bytes("image/jpeg", b"2"),
        ];
        let request = VisionRequest::new("gpt-4o", "Rate my squat", frames)
            .with_system("You are a coach")
            .into_chat_request();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role(), "system");
        match &request.messages[1] {
            Message::Human { content, .. } => assert_eq!(content.image_count(), 2),
            other => panic!("unexpected message {:?}", other),
        }
    }
}
