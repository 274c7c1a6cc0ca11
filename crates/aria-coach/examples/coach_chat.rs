//! Chat with ARIA from the terminal against an in-memory data store.
//!
//! `OPENAI_API_KEY=... cargo run -p aria-coach --example coach_chat`

use anyhow::Result;
use aria_coach::AriaCoach;
use aria_llm::{ClientFactory, OpenAIConfig};
use aria_persist::{InMemoryDataStore, MemoryKeyValueStore, SessionStore};
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let chat_client = ClientFactory::create_chat_client(&OpenAIConfig::from_env()?)?;
    let sessions = Arc::new(SessionStore::new(Arc::new(MemoryKeyValueStore::new())));

    let coach = AriaCoach::builder()
        .chat_client(chat_client)
        .data_store(Arc::new(InMemoryDataStore::new()))
        .sessions(sessions)
        .build()?;

    let question = "I have 30 minutes and a pair of dumbbells. What should I do?";
    let outcome = coach
        .chat_stream("demo-user", question, |chunk| {
            print!("{}", chunk);
            let _ = std::io::stdout().flush();
        })
        .await;
    println!();

    if let Some(error) = outcome.error() {
        eprintln!("(fallback: {})", error);
    }

    let motivation = coach.get_motivation("demo-user").await.into_value();
    println!("\n{}", motivation);

    Ok(())
}
