use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::fitness::{FitnessGoals, NutritionDay, UserPreferences, Workout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// morning 05-11, afternoon 12-16, evening 17-20, night otherwise
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn at<T: Timelike>(time: &T) -> Self {
        Self::from_hour(time.hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Moderate,
    High,
}

impl EnergyLevel {
    /// Heuristic estimate from time of day and training load.
    ///
    /// Two or more workouts in the last 48 hours, or a late-night session,
    /// read as low. A rested user in the morning or afternoon reads as high.
    pub fn estimate(time_of_day: TimeOfDay, workouts_last_48h: usize) -> Self {
        match (time_of_day, workouts_last_48h) {
            (_, n) if n >= 2 => Self::Low,
            (TimeOfDay::Night, _) => Self::Low,
            (TimeOfDay::Morning | TimeOfDay::Afternoon, 0) => Self::High,
            _ => Self::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Snapshot of a user's state, rebuilt for every coaching call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    pub user_id: String,
    pub session_id: String,
    pub current_workout: Option<Workout>,
    pub recent_workouts: Vec<Workout>,
    pub nutrition_today: Option<NutritionDay>,
    pub goals: Option<FitnessGoals>,
    pub preferences: Option<UserPreferences>,
    pub time_of_day: TimeOfDay,
    pub energy_level: EnergyLevel,
    pub generated_at: DateTime<Utc>,
}

impl ConversationContext {
    /// Workouts from the recent history that happened within `hours` before `now`
    pub fn workouts_within(workouts: &[Workout], now: DateTime<Utc>, hours: i64) -> usize {
        let since = now - Duration::hours(hours);
        workouts
            .iter()
            .filter_map(Workout::occurred_at)
            .filter(|at| *at >= since && *at <= now)
            .count()
    }

    pub fn has_active_workout(&self) -> bool {
        self.current_workout.is_some()
    }

    pub fn has_logged_nutrition(&self) -> bool {
        self.nutrition_today.is_some()
    }
}
