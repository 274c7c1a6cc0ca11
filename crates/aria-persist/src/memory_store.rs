use async_trait::async_trait;
use aria_types::{
    ConversationTurn, FitnessGoals, NutritionDay, UserPreferences, Workout, WorkoutStatus,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::store::FitnessDataStore;

#[derive(Default)]
struct UserData {
    workouts: Vec<Workout>,
    nutrition: Vec<NutritionDay>,
    goals: Option<FitnessGoals>,
    preferences: Option<UserPreferences>,
    conversations: Vec<(String, ConversationTurn)>,
}

/// Data store kept entirely in memory, for local runs without Supabase
#[derive(Default)]
pub struct InMemoryDataStore {
    users: RwLock<HashMap<String, UserData>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_workout(&self, user_id: &str, workout: Workout) {
        self.users
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .workouts
            .push(workout);
    }

    pub async fn add_nutrition(&self, user_id: &str, day: NutritionDay) {
        self.users
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .nutrition
            .push(day);
    }

    pub async fn set_goals(&self, user_id: &str, goals: FitnessGoals) {
        self.users.write().await.entry(user_id.to_string()).or_default().goals = Some(goals);
    }

    pub async fn set_preferences(&self, user_id: &str, preferences: UserPreferences) {
        self.users
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .preferences = Some(preferences);
    }

    /// Turns written through `save_conversation_turns`, with their session ids
    pub async fn saved_turns(&self, user_id: &str) -> Vec<(String, ConversationTurn)> {
        self.users
            .read()
            .await
            .get(user_id)
            .map(|data| data.conversations.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FitnessDataStore for InMemoryDataStore {
    async fn active_workout(&self, user_id: &str) -> Result<Option<Workout>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).and_then(|data| {
            data.workouts
                .iter()
                .rev()
                .find(|w| w.status == WorkoutStatus::InProgress)
                .cloned()
        }))
    }

    async fn recent_workouts(&self, user_id: &str, limit: usize) -> Result<Vec<Workout>> {
        let users = self.users.read().await;
        let mut workouts = users
            .get(user_id)
            .map(|data| data.workouts.clone())
            .unwrap_or_default();
        workouts.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));
        workouts.truncate(limit);
        Ok(workouts)
    }

    async fn nutrition_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<NutritionDay>> {
        let users = self.users.read().await;
        Ok(users
            .get(user_id)
            .and_then(|data| data.nutrition.iter().find(|n| n.date == Some(date)).cloned()))
    }

    async fn goals(&self, user_id: &str) -> Result<Option<FitnessGoals>> {
        Ok(self.users.read().await.get(user_id).and_then(|d| d.goals.clone()))
    }

    async fn preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        Ok(self
            .users
            .read()
            .await
            .get(user_id)
            .and_then(|d| d.preferences.clone()))
    }

    async fn save_conversation_turns(
        &self,
        user_id: &str,
        session_id: &str,
        turns: &[ConversationTurn],
    ) -> Result<()> {
        let mut users = self.users.write().await;
        let data = users.entry(user_id.to_string()).or_default();
        data.conversations
            .extend(turns.iter().map(|t| (session_id.to_string(), t.clone())));
        Ok(())
    }
}
