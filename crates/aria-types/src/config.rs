use serde::{Deserialize, Serialize};

/// Model parameters for one coaching call site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }
}

/// Settings for every coaching operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettingsTable {
    pub chat: ModelSettings,
    pub form_analysis: ModelSettings,
    pub workout_plan: ModelSettings,
    pub meal_plan: ModelSettings,
    pub motivation: ModelSettings,
    pub progress: ModelSettings,
    pub plateau: ModelSettings,
}

impl Default for ModelSettingsTable {
    fn default() -> Self {
        Self {
            chat: ModelSettings::new("gpt-4o", 0.8, 500),
            form_analysis: ModelSettings::new("gpt-4o", 0.3, 1000),
            workout_plan: ModelSettings::new("gpt-4o", 0.7, 2000),
            meal_plan: ModelSettings::new("gpt-4o", 0.7, 2000),
            motivation: ModelSettings::new("gpt-4o-mini", 0.9, 150),
            progress: ModelSettings::new("gpt-4o", 0.5, 1000),
            plateau: ModelSettings::new("gpt-4o", 0.7, 800),
        }
    }
}

impl ModelSettingsTable {
    /// Swap model names while keeping per-operation temperature and token limits
    pub fn with_models(
        mut self,
        chat_model: &str,
        vision_model: &str,
        motivation_model: &str,
    ) -> Self {
        for settings in [
            &mut self.chat,
            &mut self.workout_plan,
            &mut self.meal_plan,
            &mut self.progress,
            &mut self.plateau,
        ] {
            settings.model = chat_model.to_string();
        }
        self.form_analysis.model = vision_model.to_string();
        self.motivation.model = motivation_model.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = ModelSettingsTable::default();
        assert_eq!(table.chat, ModelSettings::new("gpt-4o", 0.8, 500));
        assert_eq!(table.motivation.model, "gpt-4o-mini");
        assert_eq!(table.motivation.max_tokens, 150);
        assert_eq!(table.plateau.max_tokens, 800);
    }

    #[test]
    fn test_with_models_keeps_limits() {
        let table =
            ModelSettingsTable::default().with_models("gpt-4.1", "gpt-4.1-vision", "gpt-4.1-mini");
        assert_eq!(table.chat.model, "gpt-4.1");
        assert_eq!(table.chat.max_tokens, 500);
        assert_eq!(table.form_analysis.model, "gpt-4.1-vision");
        assert_eq!(table.form_analysis.temperature, 0.3);
        assert_eq!(table.motivation.model, "gpt-4.1-mini");
    }
}
