//! # ARIA
//!
//! AI fitness coaching over an OpenAI-compatible chat API.
//!
//! Each call rebuilds the user's training context (active workout, recent
//! sessions, today's nutrition, goals, preferences), renders a persona prompt
//! from it and asks the model for a reply, a plan or an analysis. Any failure
//! yields a canned fallback instead of an error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aria::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ClientFactory::create_chat_client(&OpenAIConfig::from_env()?)?;
//!
//!     let coach = AriaCoach::builder()
//!         .chat_client(client)
//!         .data_store(Arc::new(InMemoryDataStore::new()))
//!         .sessions(Arc::new(SessionStore::new(Arc::new(MemoryKeyValueStore::new()))))
//!         .build()?;
//!
//!     let reply = coach.chat("user-1", "What should I train today?").await;
//!     println!("{}", reply.into_value());
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - **`aria-types`**: shared data model
//! - **`aria-llm`**: OpenAI chat, streaming, JSON mode and vision
//! - **`aria-persist`**: data store, key-value storage and conversation sessions
//! - **`aria-context`**: context aggregation and prompt assembly
//! - **`aria-coach`**: the coaching facade
//! - **`aria-wearables`**: simulated wearable devices (feature `wearables`)

pub mod prelude;

pub use aria_types::{
    CoachEvent, CommunicationStyle, ConversationContext, ConversationTurn, Device, DeviceKind,
    EnergyLevel, FormAnalysis, FormAnalysisRequest, MealPlan, MealPlanRequest, ModelSettings,
    ModelSettingsTable, PlateauAdvice, PlateauRequest, ProgressInsight, TimeOfDay, TurnRole,
    WorkoutPlan, WorkoutPlanRequest,
};

pub use aria_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, ClientFactory, LlmError, Message,
    OpenAIClient, OpenAIConfig, ResponseFormat,
};

pub use aria_persist::{
    FitnessDataStore, InMemoryDataStore, KeyValueStore, MemoryKeyValueStore, PersistError,
    SessionStore, SessionStoreBuilder, SupabaseConfig, SupabaseDataStore,
};

pub use aria_context::{ContextAggregator, ContextProvider, PromptAssembler};

pub use aria_coach::{AriaCoach, CoachBuilder, CoachError, CoachOutcome};

#[cfg(feature = "wearables")]
pub use aria_wearables::{DeviceSource, SimulatedDeviceSource, WearableError};
