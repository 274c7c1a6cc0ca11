pub mod config;
pub mod context;
pub mod conversation;
pub mod device;
pub mod events;
pub mod fitness;
pub mod plans;

pub use config::{ModelSettings, ModelSettingsTable};
pub use context::{ConversationContext, EnergyLevel, TimeOfDay};
pub use conversation::{ConversationTurn, TurnRole};
pub use device::{Device, DeviceKind, DeviceReading};
pub use events::CoachEvent;
pub use fitness::{
    CommunicationStyle, FitnessGoals, NutritionDay, UserPreferences, Workout, WorkoutExercise,
    WorkoutStatus,
};
pub use plans::{
    ExerciseFeedback, FormAnalysis, FormAnalysisRequest, Meal, MealPlan, MealPlanDay,
    MealPlanRequest, PlannedExercise, PlateauAdvice, PlateauRequest, ProgressInsight,
    ProgressInsights, WorkoutPlan, WorkoutPlanDay, WorkoutPlanRequest,
};
