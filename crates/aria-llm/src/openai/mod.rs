// OpenAI Chat Completions API
// https://platform.openai.com/docs/api-reference/chat

mod client;

pub use client::{OpenAIClient, OPENAI_API_BASE};
