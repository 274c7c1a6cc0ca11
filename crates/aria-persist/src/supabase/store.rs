use async_trait::async_trait;
use aria_types::{ConversationTurn, FitnessGoals, NutritionDay, UserPreferences, Workout};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::client::{SupabaseClient, SupabaseConfig};
use crate::error::Result;
use crate::store::FitnessDataStore;

const WORKOUTS: &str = "workouts";
const NUTRITION_LOGS: &str = "nutrition_logs";
const USER_GOALS: &str = "user_goals";
const USER_PREFERENCES: &str = "user_preferences";
const AI_CONVERSATIONS: &str = "ai_conversations";

/// `ai_conversations` row
#[derive(Debug, Serialize)]
struct ConversationRow<'a> {
    user_id: &'a str,
    session_id: &'a str,
    message_id: &'a str,
    role: &'a str,
    content: &'a str,
    created_at: DateTime<Utc>,
}

/// [`FitnessDataStore`] over the Supabase tables
#[derive(Clone)]
pub struct SupabaseDataStore {
    client: SupabaseClient,
}

impl SupabaseDataStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &SupabaseConfig) -> Result<Self> {
        Ok(Self::new(SupabaseClient::new(config)?))
    }

    pub fn client(&self) -> &SupabaseClient {
        &self.client
    }
}

#[async_trait]
impl FitnessDataStore for SupabaseDataStore {
    async fn active_workout(&self, user_id: &str) -> Result<Option<Workout>> {
        self.client
            .from(WORKOUTS)
            .eq("user_id", user_id)
            .eq("status", "in_progress")
            .order("started_at", false)
            .maybe_single()
            .await
    }

    async fn recent_workouts(&self, user_id: &str, limit: usize) -> Result<Vec<Workout>> {
        self.client
            .from(WORKOUTS)
            .eq("user_id", user_id)
            .order("created_at", false)
            .limit(limit)
            .execute()
            .await
    }

    async fn nutrition_for_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<NutritionDay>> {
        self.client
            .from(NUTRITION_LOGS)
            .eq("user_id", user_id)
            .eq("date", date.format("%Y-%m-%d"))
            .maybe_single()
            .await
    }

    async fn goals(&self, user_id: &str) -> Result<Option<FitnessGoals>> {
        self.client
            .from(USER_GOALS)
            .eq("user_id", user_id)
            .maybe_single()
            .await
    }

    async fn preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        self.client
            .from(USER_PREFERENCES)
            .eq("user_id", user_id)
            .maybe_single()
            .await
    }

    async fn save_conversation_turns(
        &self,
        user_id: &str,
        session_id: &str,
        turns: &[ConversationTurn],
    ) -> Result<()> {
        if turns.is_empty() {
            return Ok(());
        }
        let rows: Vec<ConversationRow<'_>> = turns
            .iter()
            .map(|turn| ConversationRow {
                user_id,
                session_id,
                message_id: &turn.id,
                role: turn.role.as_str(),
                content: &turn.content,
                created_at: turn.timestamp,
            })
            .collect();
        self.client.insert(AI_CONVERSATIONS, &rows).await
    }
}
