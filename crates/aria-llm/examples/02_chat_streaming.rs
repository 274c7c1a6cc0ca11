use anyhow::Result;
use aria_llm::{ChatClient, ChatRequest, Message, OpenAIClient, OpenAIConfig, StreamEvent};
use futures::StreamExt;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    let client = OpenAIClient::from_config(&OpenAIConfig::from_env()?)?;

    let request = ChatRequest::new(
        "gpt-4o",
        vec![Message::human("Write a three-line warm-up routine.")],
    );

    let mut stream = client.chat_stream(request).await?;

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::Message { content } => {
                print!("{}", content);
                std::io::stdout().flush()?;
            }
            StreamEvent::Done { finish_reason } => {
                println!("\n[done: {}]", finish_reason.unwrap_or_else(|| "end".to_string()));
            }
        }
    }

    Ok(())
}
