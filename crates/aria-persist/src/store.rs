use async_trait::async_trait;
use aria_types::{ConversationTurn, FitnessGoals, NutritionDay, UserPreferences, Workout};
use chrono::NaiveDate;

use crate::error::Result;

/// Read access to a user's fitness data plus the conversation log table
///
/// Lookups for a single row return `Ok(None)` when the row is absent; only
/// transport and decoding failures are errors.
#[async_trait]
pub trait FitnessDataStore: Send + Sync {
    /// The workout currently marked `in_progress`, if any
    async fn active_workout(&self, user_id: &str) -> Result<Option<Workout>>;

    /// Most recent workouts, newest first
    async fn recent_workouts(&self, user_id: &str, limit: usize) -> Result<Vec<Workout>>;

    async fn nutrition_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<NutritionDay>>;

    async fn goals(&self, user_id: &str) -> Result<Option<FitnessGoals>>;

    async fn preferences(&self, user_id: &str) -> Result<Option<UserPreferences>>;

    /// Append chat turns to the remote conversation log
    async fn save_conversation_turns(
        &self,
        user_id: &str,
        session_id: &str,
        turns: &[ConversationTurn],
    ) -> Result<()>;
}
