mod aggregator;
mod error;
mod prompt;
mod signals;
mod strategy;
pub mod templates;

pub use aggregator::{ContextAggregator, RECENT_WORKOUT_LIMIT};
pub use error::ContextError;
pub use prompt::PromptAssembler;
pub use signals::{detect_plateau, PlateauSignal};
pub use strategy::{ContextProvider, ContextWindow};
