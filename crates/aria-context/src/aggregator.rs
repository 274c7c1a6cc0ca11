use async_trait::async_trait;
use aria_persist::FitnessDataStore;
use aria_types::{ConversationContext, EnergyLevel, TimeOfDay};
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::sync::Arc;

use crate::error::ContextError;
use crate::strategy::ContextProvider;

pub const RECENT_WORKOUT_LIMIT: usize = 10;

const ENERGY_WINDOW_HOURS: i64 = 48;

/// Builds a [`ConversationContext`] from the remote data store.
///
/// Five lookups run concurrently and are joined; the first failure aborts the
/// build. Nothing is cached, every call reads fresh data.
pub struct ContextAggregator {
    store: Arc<dyn FitnessDataStore>,
}

impl ContextAggregator {
    pub fn new(store: Arc<dyn FitnessDataStore>) -> Self {
        Self { store }
    }

    /// Build using the server's local clock for time-of-day
    pub async fn build(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<ConversationContext, ContextError> {
        self.build_at(user_id, session_id, Local::now().fixed_offset()).await
    }

    /// Build as if the call happened at `now`
    pub async fn build_at(
        &self,
        user_id: &str,
        session_id: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<ConversationContext, ContextError> {
        let today = now.date_naive();

        let (current_workout, recent_workouts, nutrition_today, goals, preferences) =
            tokio::try_join!(
                self.store.active_workout(user_id),
                self.store.recent_workouts(user_id, RECENT_WORKOUT_LIMIT),
                self.store.nutrition_for_day(user_id, today),
                self.store.goals(user_id),
                self.store.preferences(user_id),
            )
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Context aggregation failed");
                ContextError::from(e)
            })?;

        let now_utc = now.with_timezone(&Utc);
        let time_of_day = TimeOfDay::at(&now);
        let recent_load =
            ConversationContext::workouts_within(&recent_workouts, now_utc, ENERGY_WINDOW_HOURS);
        let energy_level = EnergyLevel::estimate(time_of_day, recent_load);

        tracing::debug!(
            user_id,
            recent_workouts = recent_workouts.len(),
            active_workout = current_workout.is_some(),
            time_of_day = time_of_day.as_str(),
            energy_level = energy_level.as_str(),
            "Built conversation context"
        );

        Ok(ConversationContext {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            current_workout,
            recent_workouts,
            nutrition_today,
            goals,
            preferences,
            time_of_day,
            energy_level,
            generated_at: now_utc,
        })
    }
}

#[async_trait]
impl ContextProvider for ContextAggregator {
    async fn build(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<ConversationContext, ContextError> {
        ContextAggregator::build(self, user_id, session_id).await
    }
}
