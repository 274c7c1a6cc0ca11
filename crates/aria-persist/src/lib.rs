pub mod builder;
pub mod error;
pub mod kv;
pub mod memory_store;
pub mod session;
pub mod store;
pub mod supabase;

pub use builder::SessionStoreBuilder;
pub use error::{PersistError, Result};
pub use kv::{DeviceStorage, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use memory_store::InMemoryDataStore;
pub use session::{conversation_key, SessionConfig, SessionStore};
pub use store::FitnessDataStore;
pub use supabase::{SupabaseClient, SupabaseConfig, SupabaseDataStore, SupabaseQuery};
