//! Inputs and model-generated outputs of the coaching operations.
//!
//! Outputs are decoded from the model's JSON with every field defaulted, so a
//! partial document still yields a value. Only syntactically invalid JSON is
//! rejected.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlanRequest {
    pub goal: String,
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    #[serde(default = "default_minutes_per_session")]
    pub minutes_per_session: u32,
    #[serde(default)]
    pub equipment: Vec<String>,
}

fn default_days_per_week() -> u32 {
    3
}

fn default_minutes_per_session() -> u32 {
    45
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanRequest {
    pub calories: u32,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: u32,
}

fn default_meals_per_day() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateauRequest {
    pub exercise: String,
    pub weeks_stalled: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAnalysisRequest {
    pub exercise: String,
    /// Base64-encoded still frames
    pub frames: Vec<String>,
    #[serde(default = "default_frame_mime")]
    pub mime_type: String,
}

fn default_frame_mime() -> String {
    "image/jpeg".to_string()
}

// ---------------------------------------------------------------------------
// Workout plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutPlan {
    pub name: String,
    pub description: String,
    pub duration_weeks: u32,
    pub days: Vec<WorkoutPlanDay>,
}

impl WorkoutPlan {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutPlanDay {
    pub day: String,
    pub focus: String,
    pub exercises: Vec<PlannedExercise>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannedExercise {
    pub name: String,
    pub sets: u32,
    /// Free-form so ranges like "8-12" survive
    pub reps: String,
    pub rest_seconds: u32,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Meal plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealPlan {
    pub daily_calories: u32,
    pub days: Vec<MealPlanDay>,
    pub shopping_list: Vec<String>,
}

impl MealPlan {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealPlanDay {
    pub day: String,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meal {
    pub name: String,
    pub meal_type: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients: Vec<String>,
}

// ---------------------------------------------------------------------------
// Form analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormAnalysis {
    pub exercise: String,
    /// 0-100
    pub score: u32,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub corrections: Vec<ExerciseFeedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseFeedback {
    pub issue: String,
    pub cue: String,
    pub severity: String,
}

// ---------------------------------------------------------------------------
// Progress and plateaus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressInsights {
    pub insights: Vec<ProgressInsight>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressInsight {
    pub title: String,
    pub description: String,
    pub category: String,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateauAdvice {
    pub advice: String,
    pub strategies: Vec<String>,
    pub estimated_weeks_to_break: String,
}

impl Default for PlateauAdvice {
    fn default() -> Self {
        Self {
            advice: String::new(),
            strategies: Vec::new(),
            estimated_weeks_to_break: "2-4 weeks".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_workout_plan() {
        let plan: WorkoutPlan = serde_json::from_str(
            r#"{"name":"Strength Base","days":[{"day":"Monday","exercises":[{"name":"Squat","sets":5,"reps":"5"}]}]}"#,
        )
        .unwrap();
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].exercises[0].rest_seconds, 0);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_plan() {
        let plan: MealPlan = serde_json::from_str("{}").unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plateau_default_estimate() {
        let advice: PlateauAdvice = serde_json::from_str(r#"{"advice":"Deload"}"#).unwrap();
        assert_eq!(advice.estimated_weeks_to_break, "2-4 weeks");
    }

    #[test]
    fn test_request_defaults() {
        let req: WorkoutPlanRequest = serde_json::from_str(r#"{"goal":"strength"}"#).unwrap();
        assert_eq!(req.days_per_week, 3);
        assert_eq!(req.minutes_per_session, 45);

        let req: FormAnalysisRequest =
            serde_json::from_str(r#"{"exercise":"squat","frames":["AA=="]}"#).unwrap();
        assert_eq!(req.mime_type, "image/jpeg");
    }
}
