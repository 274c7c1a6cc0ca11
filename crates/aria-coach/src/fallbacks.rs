// Canned values returned when an operation cannot complete

use aria_types::{FormAnalysis, PlateauAdvice};

pub const CHAT_FALLBACK: &str = "I'm having trouble connecting right now. Please try again in a moment - your progress is safe and I'll be right here.";

pub const MOTIVATION_FALLBACK: &str = "Every rep counts. Show up today and your future self will thank you!";

pub const FORM_FEEDBACK_FALLBACK: &str = "I couldn't analyze your form right now. Please try again with clear, well-lit frames that show your full body.";

pub const PLATEAU_ADVICE_FALLBACK: &str = "Plateaus are a normal part of training. Try changing your rep ranges, adding a deload week, and making sure you're sleeping and eating enough to recover.";

pub fn form_analysis(exercise: &str) -> FormAnalysis {
    FormAnalysis {
        exercise: exercise.to_string(),
        score: 0,
        feedback: FORM_FEEDBACK_FALLBACK.to_string(),
        ..Default::default()
    }
}

pub fn plateau_advice() -> PlateauAdvice {
    PlateauAdvice {
        advice: PLATEAU_ADVICE_FALLBACK.to_string(),
        strategies: vec![
            "Change your rep range for 3-4 weeks".to_string(),
            "Take a deload week at 60% of your usual load".to_string(),
            "Add a variation of the stalled lift".to_string(),
        ],
        ..Default::default()
    }
}
