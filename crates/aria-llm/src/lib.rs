pub mod types;
pub mod traits;
pub mod error;
pub mod config;
pub mod streaming;
pub mod structured;
pub mod vision;
pub mod buffer_utils;
pub mod openai;

pub use traits::{
    ChatClient,
    ChatRequest, ChatResponse, ChatOptions, ResponseFormat,
    EventStream, TokenUsage,
};

pub use error::LlmError;
pub use config::{ClientFactory, OpenAIConfig};
pub use streaming::StreamEvent;
pub use buffer_utils::CircularLineBuffer;
pub use structured::{generate_structured, parse_json_content};
pub use vision::{analyze_images, ImageFrame, VisionRequest};
pub use openai::OpenAIClient;
pub use types::{Message, Content, ContentPart, ImageDetail, ImageUrl};
