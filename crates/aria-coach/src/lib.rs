pub mod builder;
pub mod coach;
pub mod error;
pub mod fallbacks;
pub mod outcome;
pub mod streaming;

pub use builder::CoachBuilder;
pub use coach::{AriaCoach, DEFAULT_HISTORY_TURNS};
pub use error::CoachError;
pub use outcome::{CoachOutcome, OutcomeResponse};
pub use streaming::{ChatStreamAdapter, StreamAdapter};
