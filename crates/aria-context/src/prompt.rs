use aria_llm::Message;
use aria_types::{
    CommunicationStyle, ConversationContext, ConversationTurn, MealPlanRequest, PlateauRequest,
    TimeOfDay, TurnRole, WorkoutPlanRequest,
};

use crate::signals::detect_plateau;
use crate::strategy::ContextWindow;
use crate::templates::*;

/// Renders system and task prompts from a [`ConversationContext`]
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    persona_template: String,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAssembler {
    pub fn new() -> Self {
        Self {
            persona_template: PERSONA_TEMPLATE.to_string(),
        }
    }

    /// Replace the persona template; it must keep the `<style>`, `<time_of_day>`,
    /// `<energy_level>`, `<situational>` and `<context_json>` placeholders
    pub fn with_persona_template(mut self, template: impl Into<String>) -> Self {
        self.persona_template = template.into();
        self
    }

    pub fn system_prompt(&self, context: &ConversationContext) -> String {
        let style = context
            .preferences
            .as_ref()
            .map(|p| p.communication_style)
            .unwrap_or_default();

        fill(
            &self.persona_template,
            &[
                ("<style>", style_block(style)),
                ("<time_of_day>", time_of_day_block(context.time_of_day)),
                ("<energy_level>", context.energy_level.as_str()),
                ("<situational>", situational_blocks(context).join("\n").as_str()),
                ("<context_json>", context_json(context).as_str()),
            ],
        )
    }

    /// System prompt plus transcript, oldest turn first
    pub fn context_window(
        &self,
        context: &ConversationContext,
        history: &[ConversationTurn],
    ) -> ContextWindow {
        let messages = history
            .iter()
            .map(|turn| match turn.role {
                TurnRole::User => Message::human(turn.content.as_str()),
                TurnRole::Assistant => Message::ai(turn.content.as_str()),
            })
            .collect();

        ContextWindow {
            system_prompt: self.system_prompt(context),
            messages,
        }
    }

    pub fn workout_plan_prompt(&self, request: &WorkoutPlanRequest) -> String {
        fill(
            WORKOUT_PLAN_TEMPLATE,
            &[
                ("<goal>", request.goal.as_str()),
                ("<days_per_week>", request.days_per_week.to_string().as_str()),
                ("<minutes_per_session>", request.minutes_per_session.to_string().as_str()),
                ("<equipment>", list_or(&request.equipment, "bodyweight only").as_str()),
            ],
        )
    }

    pub fn meal_plan_prompt(&self, request: &MealPlanRequest) -> String {
        fill(
            MEAL_PLAN_TEMPLATE,
            &[
                ("<calories>", request.calories.to_string().as_str()),
                ("<meals_per_day>", request.meals_per_day.to_string().as_str()),
                ("<restrictions>", list_or(&request.dietary_restrictions, "none").as_str()),
            ],
        )
    }

    pub fn motivation_prompt(&self, context: &ConversationContext) -> String {
        fill(
            MOTIVATION_TEMPLATE,
            &[
                ("<time_of_day>", context.time_of_day.as_str()),
                ("<energy_level>", context.energy_level.as_str()),
                ("<recent_count>", context.recent_workouts.len().to_string().as_str()),
            ],
        )
    }

    pub fn progress_prompt(&self) -> String {
        PROGRESS_TEMPLATE.to_string()
    }

    pub fn plateau_prompt(&self, request: &PlateauRequest) -> String {
        fill(
            PLATEAU_ADVICE_TEMPLATE,
            &[
                ("<exercise>", request.exercise.as_str()),
                ("<weeks_stalled>", request.weeks_stalled.to_string().as_str()),
            ],
        )
    }

    pub fn form_analysis_system(&self) -> String {
        FORM_ANALYSIS_SYSTEM.to_string()
    }

    pub fn form_analysis_prompt(&self, exercise: &str) -> String {
        fill(FORM_ANALYSIS_TEMPLATE, &[("<exercise>", exercise)])
    }
}

fn style_block(style: CommunicationStyle) -> &'static str {
    match style {
        CommunicationStyle::Balanced => STYLE_BALANCED,
        CommunicationStyle::Motivational => STYLE_MOTIVATIONAL,
        CommunicationStyle::Analytical => STYLE_ANALYTICAL,
        CommunicationStyle::Gentle => STYLE_GENTLE,
        CommunicationStyle::ToughLove => STYLE_TOUGH_LOVE,
    }
}

fn time_of_day_block(time_of_day: TimeOfDay) -> &'static str {
    match time_of_day {
        TimeOfDay::Morning => TIME_MORNING,
        TimeOfDay::Afternoon => TIME_AFTERNOON,
        TimeOfDay::Evening => TIME_EVENING,
        TimeOfDay::Night => TIME_NIGHT,
    }
}

fn situational_blocks(context: &ConversationContext) -> Vec<String> {
    let mut blocks = Vec::new();

    if let Some(workout) = &context.current_workout {
        let name = if workout.name.is_empty() { "unnamed workout" } else { workout.name.as_str() };
        blocks.push(fill(
            WORKOUT_IN_PROGRESS_TEMPLATE,
            &[
                ("<workout_name>", name),
                ("<exercise_count>", workout.exercises.len().to_string().as_str()),
            ],
        ));
    }

    if let Some(plateau) = detect_plateau(&context.recent_workouts) {
        blocks.push(fill(
            PLATEAU_TEMPLATE,
            &[
                ("<exercise>", plateau.exercise.as_str()),
                ("<sessions>", plateau.sessions.to_string().as_str()),
            ],
        ));
    }

    if let Some(nutrition) = &context.nutrition_today {
        blocks.push(fill(
            NUTRITION_TEMPLATE,
            &[
                ("<calories>", format!("{:.0}", nutrition.calories).as_str()),
                ("<protein>", format!("{:.0}", nutrition.protein).as_str()),
                ("<carbs>", format!("{:.0}", nutrition.carbs).as_str()),
                ("<fat>", format!("{:.0}", nutrition.fat).as_str()),
            ],
        ));
    }

    blocks
}

/// Substitute placeholders in one left-to-right pass; inserted values are
/// never scanned again
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn context_json(context: &ConversationContext) -> String {
    serde_json::to_string_pretty(context).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to serialize context for prompt");
        "{}".to_string()
    })
}

fn list_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}
