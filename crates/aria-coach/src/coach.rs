use aria_context::{ContextProvider, PromptAssembler};
use aria_llm::{
    analyze_images, generate_structured, parse_json_content, ChatClient, ChatOptions, ChatRequest,
    ImageFrame, LlmError, Message, VisionRequest,
};
use aria_persist::{FitnessDataStore, SessionStore};
use aria_types::{
    CoachEvent, ConversationContext, ConversationTurn, FormAnalysis, FormAnalysisRequest,
    MealPlan, MealPlanRequest, ModelSettings, ModelSettingsTable, PlateauAdvice, PlateauRequest,
    ProgressInsight, ProgressInsights, WorkoutPlan, WorkoutPlanRequest,
};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::CoachError;
use crate::fallbacks;
use crate::outcome::CoachOutcome;
use crate::streaming::{ChatStreamAdapter, StreamAdapter};

/// Turns of prior conversation sent with each chat call
pub const DEFAULT_HISTORY_TURNS: usize = 20;

/// The ARIA coaching facade.
///
/// Every operation rebuilds the user's context, renders prompts and calls the
/// model. Failures never escape: they become [`CoachOutcome::Fallback`].
pub struct AriaCoach {
    pub(crate) chat_client: Arc<dyn ChatClient>,
    pub(crate) vision_client: Arc<dyn ChatClient>,
    pub(crate) context: Arc<dyn ContextProvider>,
    pub(crate) prompts: PromptAssembler,
    pub(crate) sessions: Arc<SessionStore>,
    pub(crate) remote_log: Option<Arc<dyn FitnessDataStore>>,
    pub(crate) settings: ModelSettingsTable,
    pub(crate) history_turns: usize,
    pub(crate) session_id: String,
}

impl AriaCoach {
    pub fn builder() -> crate::builder::CoachBuilder {
        crate::builder::CoachBuilder::new()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn settings(&self) -> &ModelSettingsTable {
        &self.settings
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// One conversational reply; both turns are recorded even on fallback
    pub async fn chat(&self, user_id: &str, message: &str) -> CoachOutcome<String> {
        let outcome = match self.chat_request(user_id, message).await {
            Ok(request) => match self.chat_client.chat(request).await {
                Ok(response) => match response.content.filter(|c| !c.trim().is_empty()) {
                    Some(reply) => CoachOutcome::Success(reply),
                    None => self.fallback(
                        "chat",
                        user_id,
                        fallbacks::CHAT_FALLBACK.to_string(),
                        LlmError::malformed("Empty reply").into(),
                    ),
                },
                Err(e) => self.fallback(
                    "chat",
                    user_id,
                    fallbacks::CHAT_FALLBACK.to_string(),
                    CoachError::from_llm(&e),
                ),
            },
            Err(error) => {
                self.fallback("chat", user_id, fallbacks::CHAT_FALLBACK.to_string(), error)
            }
        };

        self.record_exchange(user_id, message, outcome.value()).await;
        outcome
    }

    /// Streamed reply; `on_chunk` sees every text fragment as it arrives.
    ///
    /// On failure the apology is also passed to `on_chunk`. No cancellation:
    /// the stream is read to completion.
    pub async fn chat_stream<F>(
        &self,
        user_id: &str,
        message: &str,
        mut on_chunk: F,
    ) -> CoachOutcome<String>
    where
        F: FnMut(&str) + Send,
    {
        let outcome = match self.stream_reply(user_id, message, &mut on_chunk).await {
            Ok(reply) => CoachOutcome::Success(reply),
            Err(error) => {
                on_chunk(fallbacks::CHAT_FALLBACK);
                self.fallback(
                    "chat_stream",
                    user_id,
                    fallbacks::CHAT_FALLBACK.to_string(),
                    error,
                )
            }
        };

        self.record_exchange(user_id, message, outcome.value()).await;
        outcome
    }

    /// Run [`AriaCoach::chat_stream`] in the background and expose it as events.
    ///
    /// Every chunk is delivered; the reply is bounded by the model's token
    /// limit. A dropped receiver stops delivery but the reply is still read
    /// to completion and recorded.
    pub fn spawn_chat_stream(
        self: Arc<Self>,
        user_id: String,
        message: String,
    ) -> mpsc::UnboundedReceiver<CoachEvent> {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let chunk_tx = tx.clone();
            let mut receiver_open = true;
            let outcome = self
                .chat_stream(&user_id, &message, move |chunk| {
                    if !receiver_open {
                        return;
                    }
                    let event = CoachEvent::Message {
                        content: chunk.to_string(),
                    };
                    if chunk_tx.send(event).is_err() {
                        receiver_open = false;
                        tracing::debug!(
                            "Stream receiver closed, draining reply without forwarding"
                        );
                    }
                })
                .await;

            let done = CoachEvent::Done {
                fallback: outcome.is_fallback(),
                error: outcome.error().map(|e| e.to_string()),
                reply: outcome.into_value(),
            };
            let _ = tx.send(done);
        });

        rx
    }

    async fn stream_reply<F>(
        &self,
        user_id: &str,
        message: &str,
        on_chunk: &mut F,
    ) -> Result<String, CoachError>
    where
        F: FnMut(&str) + Send,
    {
        let request = self.chat_request(user_id, message).await?;
        let mut stream = self
            .chat_client
            .chat_stream(request)
            .await
            .map_err(|e| CoachError::from_llm(&e))?;

        let adapter = ChatStreamAdapter;
        let mut reply = String::new();
        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| CoachError::from_llm(&e))?;
            if let Some(CoachEvent::Message { content }) = adapter.adapt(event) {
                on_chunk(&content);
                reply.push_str(&content);
            }
        }

        if reply.trim().is_empty() {
            return Err(LlmError::malformed("Stream ended without content").into());
        }
        Ok(reply)
    }

    async fn chat_request(&self, user_id: &str, message: &str) -> Result<ChatRequest, CoachError> {
        let context = self.load_context(user_id).await?;
        let history = self.sessions.get_recent(user_id, self.history_turns).await;
        let messages = self
            .prompts
            .context_window(&context, &history)
            .into_messages(message);

        Ok(Self::request(&self.settings.chat, messages))
    }

    async fn record_exchange(&self, user_id: &str, message: &str, reply: &str) {
        let user_turn = ConversationTurn::user(message);
        let assistant_turn = ConversationTurn::assistant(reply);

        self.sessions.append(user_id, user_turn.clone()).await;
        self.sessions.append(user_id, assistant_turn.clone()).await;

        if let Some(remote) = &self.remote_log {
            if let Err(e) = remote
                .save_conversation_turns(user_id, &self.session_id, &[user_turn, assistant_turn])
                .await
            {
                tracing::warn!(
                    user_id,
                    error = %e,
                    "Failed to mirror conversation to data store"
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Structured generation
    // ------------------------------------------------------------------

    pub async fn generate_workout_plan(
        &self,
        user_id: &str,
        request: &WorkoutPlanRequest,
    ) -> CoachOutcome<WorkoutPlan> {
        let prompt = self.prompts.workout_plan_prompt(request);
        match self
            .structured::<WorkoutPlan>(user_id, &self.settings.workout_plan, prompt)
            .await
        {
            Ok(plan) => CoachOutcome::Success(plan),
            Err(error) => {
                self.fallback("generate_workout_plan", user_id, WorkoutPlan::default(), error)
            }
        }
    }

    pub async fn generate_meal_plan(
        &self,
        user_id: &str,
        request: &MealPlanRequest,
    ) -> CoachOutcome<MealPlan> {
        let prompt = self.prompts.meal_plan_prompt(request);
        match self
            .structured::<MealPlan>(user_id, &self.settings.meal_plan, prompt)
            .await
        {
            Ok(plan) => CoachOutcome::Success(plan),
            Err(error) => {
                self.fallback("generate_meal_plan", user_id, MealPlan::default(), error)
            }
        }
    }

    pub async fn analyze_progress(&self, user_id: &str) -> CoachOutcome<Vec<ProgressInsight>> {
        let prompt = self.prompts.progress_prompt();
        match self
            .structured::<ProgressInsights>(user_id, &self.settings.progress, prompt)
            .await
        {
            Ok(progress) => CoachOutcome::Success(progress.insights),
            Err(error) => self.fallback("analyze_progress", user_id, Vec::new(), error),
        }
    }

    pub async fn get_plateau_advice(
        &self,
        user_id: &str,
        request: &PlateauRequest,
    ) -> CoachOutcome<PlateauAdvice> {
        let prompt = self.prompts.plateau_prompt(request);
        match self
            .structured::<PlateauAdvice>(user_id, &self.settings.plateau, prompt)
            .await
        {
            Ok(advice) => CoachOutcome::Success(advice),
            Err(error) => self.fallback(
                "get_plateau_advice",
                user_id,
                fallbacks::plateau_advice(),
                error,
            ),
        }
    }

    async fn structured<T: DeserializeOwned>(
        &self,
        user_id: &str,
        settings: &ModelSettings,
        prompt: String,
    ) -> Result<T, CoachError> {
        let context = self.load_context(user_id).await?;
        let messages = vec![
            Message::system(self.prompts.system_prompt(&context)),
            Message::human(prompt),
        ];

        generate_structured(self.chat_client.as_ref(), Self::request(settings, messages))
            .await
            .map_err(|e| CoachError::from_llm(&e))
    }

    // ------------------------------------------------------------------
    // Short-form text
    // ------------------------------------------------------------------

    pub async fn get_motivation(&self, user_id: &str) -> CoachOutcome<String> {
        match self.motivation(user_id).await {
            Ok(message) => CoachOutcome::Success(message),
            Err(error) => self.fallback(
                "get_motivation",
                user_id,
                fallbacks::MOTIVATION_FALLBACK.to_string(),
                error,
            ),
        }
    }

    async fn motivation(&self, user_id: &str) -> Result<String, CoachError> {
        let context = self.load_context(user_id).await?;
        let messages = vec![
            Message::system(self.prompts.system_prompt(&context)),
            Message::human(self.prompts.motivation_prompt(&context)),
        ];

        let response = self
            .chat_client
            .chat(Self::request(&self.settings.motivation, messages))
            .await
            .map_err(|e| CoachError::from_llm(&e))?;

        response
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LlmError::malformed("Empty motivational message").into())
    }

    // ------------------------------------------------------------------
    // Vision
    // ------------------------------------------------------------------

    /// Score exercise technique from still frames.
    ///
    /// Uses the vision client and the form-analysis prompts only; the user's
    /// training context is not needed to judge technique.
    pub async fn analyze_form(
        &self,
        user_id: &str,
        request: &FormAnalysisRequest,
    ) -> CoachOutcome<FormAnalysis> {
        match self.form_analysis(request).await {
            Ok(mut analysis) => {
                if analysis.exercise.is_empty() {
                    analysis.exercise = request.exercise.clone();
                }
                analysis.score = analysis.score.min(100);
                CoachOutcome::Success(analysis)
            }
            Err(error) => self.fallback(
                "analyze_form",
                user_id,
                fallbacks::form_analysis(&request.exercise),
                error,
            ),
        }
    }

    async fn form_analysis(
        &self,
        request: &FormAnalysisRequest,
    ) -> Result<FormAnalysis, CoachError> {
        let frames = request
            .frames
            .iter()
            .map(|frame| ImageFrame::from_base64(request.mime_type.clone(), frame.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        if frames.is_empty() {
            return Err(CoachError::Configuration("No frames to analyze".to_string()));
        }

        let settings = &self.settings.form_analysis;
        let vision_request = VisionRequest::new(
            settings.model.clone(),
            self.prompts.form_analysis_prompt(&request.exercise),
            frames,
        )
        .with_system(self.prompts.form_analysis_system())
        .with_options(
            ChatOptions::new()
                .temperature(settings.temperature)
                .max_tokens(settings.max_tokens)
                .response_format(aria_llm::ResponseFormat::JsonObject),
        );

        let response = analyze_images(self.vision_client.as_ref(), vision_request)
            .await
            .map_err(|e| CoachError::from_llm(&e))?;
        let content = response
            .content
            .ok_or_else(|| LlmError::malformed("Vision response had no content"))?;

        Ok(parse_json_content(&content)?)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub async fn history(&self, user_id: &str, limit: usize) -> Vec<ConversationTurn> {
        self.sessions.get_recent(user_id, limit).await
    }

    pub async fn clear_history(&self, user_id: &str) -> Result<(), CoachError> {
        self.sessions
            .clear(user_id)
            .await
            .map_err(|e| CoachError::Configuration(format!("Failed to clear history: {}", e)))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    async fn load_context(&self, user_id: &str) -> Result<ConversationContext, CoachError> {
        Ok(self.context.build(user_id, &self.session_id).await?)
    }

    fn request(settings: &ModelSettings, messages: Vec<Message>) -> ChatRequest {
        ChatRequest::new(settings.model.clone(), messages).with_options(
            ChatOptions::new()
                .temperature(settings.temperature)
                .max_tokens(settings.max_tokens),
        )
    }

    fn fallback<T>(
        &self,
        operation: &str,
        user_id: &str,
        value: T,
        error: CoachError,
    ) -> CoachOutcome<T> {
        tracing::error!(
            operation,
            user_id,
            kind = error.kind(),
            error = %error,
            "Coaching operation failed, returning fallback"
        );
        CoachOutcome::Fallback { value, error }
    }
}
