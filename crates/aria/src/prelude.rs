//! Prelude module for convenient imports
//!
//! ```rust
//! use aria::prelude::*;
//! ```

pub use crate::{
    AriaCoach, ChatClient, ClientFactory, CoachOutcome, ConversationTurn, FitnessDataStore,
    InMemoryDataStore, MemoryKeyValueStore, OpenAIConfig, SessionStore, SessionStoreBuilder,
    SupabaseDataStore,
};

#[cfg(feature = "wearables")]
pub use crate::{DeviceSource, SimulatedDeviceSource};
