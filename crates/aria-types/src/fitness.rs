//! Shapes of the rows read from the remote fitness data store.
//!
//! Every field defaults so that partially filled rows still deserialize.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Planned,
    InProgress,
    #[default]
    Completed,
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub status: WorkoutStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub calories_burned: Option<f64>,
    pub exercises: Vec<WorkoutExercise>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Best-known time the workout happened
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at.or(self.started_at).or(self.created_at)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutExercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: Option<f64>,
    pub rest_seconds: Option<u32>,
}

/// One day of logged nutrition (`nutrition_logs` row)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionDay {
    pub user_id: String,
    pub date: Option<NaiveDate>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub water_ml: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessGoals {
    pub user_id: String,
    pub primary_goal: Option<String>,
    pub target_weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub weekly_workouts: Option<u32>,
    pub daily_calories: Option<f64>,
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    #[default]
    Balanced,
    Motivational,
    Analytical,
    Gentle,
    ToughLove,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub user_id: String,
    pub communication_style: CommunicationStyle,
    pub fitness_level: Option<String>,
    pub preferred_workout_time: Option<String>,
    pub dietary_restrictions: Vec<String>,
    pub available_equipment: Vec<String>,
    pub injuries: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_workout_row() {
        let workout: Workout =
            serde_json::from_str(r#"{"id":"w1","status":"in_progress"}"#).unwrap();
        assert_eq!(workout.status, WorkoutStatus::InProgress);
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_preferences_style_defaults_to_balanced() {
        let prefs: UserPreferences = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert_eq!(prefs.communication_style, CommunicationStyle::Balanced);

        let prefs: UserPreferences =
            serde_json::from_str(r#"{"communication_style":"tough_love"}"#).unwrap();
        assert_eq!(prefs.communication_style, CommunicationStyle::ToughLove);
    }

    #[test]
    fn test_occurred_at_prefers_completion() {
        let started = "2024-05-01T10:00:00Z".parse().unwrap();
        let completed = "2024-05-01T11:00:00Z".parse().unwrap();
        let workout = Workout {
            started_at: Some(started),
            completed_at: Some(completed),
            ..Default::default()
        };
        assert_eq!(workout.occurred_at(), Some(completed));
    }
}
