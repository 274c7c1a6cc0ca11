use anyhow::Result;
use aria_llm::{ChatClient, ChatOptions, ChatRequest, Message, OpenAIConfig, OpenAIClient};

#[tokio::main]
async fn main() -> Result<()> {
    let client = OpenAIClient::from_config(&OpenAIConfig::from_env()?)?;

    let request = ChatRequest::new(
        "gpt-4o",
        vec![
            Message::system("You are ARIA, a concise fitness coach."),
            Message::human("Give me one tip for a better deadlift."),
        ],
    )
    .with_options(ChatOptions::new().temperature(0.8).max_tokens(500));

    let response = client.chat(request).await?;

    println!("Response: {}", response.content.unwrap_or_default());

    if let Some(usage) = response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }

    Ok(())
}
