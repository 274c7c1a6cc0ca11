use std::sync::Arc;

use aria_context::{ContextAggregator, ContextProvider, PromptAssembler};
use aria_llm::ChatClient;
use aria_persist::{FitnessDataStore, SessionStore};
use aria_types::ModelSettingsTable;

use crate::coach::{AriaCoach, DEFAULT_HISTORY_TURNS};
use crate::error::CoachError;

/// Builder for [`AriaCoach`].
///
/// A chat client, a session store and a data store (or an explicit context
/// provider) are required. The vision client defaults to the chat client.
pub struct CoachBuilder {
    chat_client: Option<Arc<dyn ChatClient>>,
    vision_client: Option<Arc<dyn ChatClient>>,
    data_store: Option<Arc<dyn FitnessDataStore>>,
    context_provider: Option<Arc<dyn ContextProvider>>,
    sessions: Option<Arc<SessionStore>>,
    prompts: PromptAssembler,
    settings: ModelSettingsTable,
    history_turns: usize,
    session_id: Option<String>,
    mirror_conversations: bool,
}

impl CoachBuilder {
    pub fn new() -> Self {
        Self {
            chat_client: None,
            vision_client: None,
            data_store: None,
            context_provider: None,
            sessions: None,
            prompts: PromptAssembler::new(),
            settings: ModelSettingsTable::default(),
            history_turns: DEFAULT_HISTORY_TURNS,
            session_id: None,
            mirror_conversations: true,
        }
    }

    pub fn chat_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.chat_client = Some(client);
        self
    }

    pub fn vision_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.vision_client = Some(client);
        self
    }

    /// Source of fitness rows; also receives the conversation mirror
    pub fn data_store(mut self, store: Arc<dyn FitnessDataStore>) -> Self {
        self.data_store = Some(store);
        self
    }

    /// Override how context is built (defaults to a [`ContextAggregator`] over the data store)
    pub fn context_provider(mut self, provider: Arc<dyn ContextProvider>) -> Self {
        self.context_provider = Some(provider);
        self
    }

    pub fn sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn prompts(mut self, prompts: PromptAssembler) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn settings(mut self, settings: ModelSettingsTable) -> Self {
        self.settings = settings;
        self
    }

    pub fn history_turns(mut self, turns: usize) -> Self {
        self.history_turns = turns;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Skip writing chat turns to the data store's conversation table
    pub fn mirror_conversations(mut self, enabled: bool) -> Self {
        self.mirror_conversations = enabled;
        self
    }

    pub fn build(self) -> Result<AriaCoach, CoachError> {
        let chat_client = self
            .chat_client
            .ok_or_else(|| CoachError::Configuration("chat client is required".to_string()))?;
        let sessions = self
            .sessions
            .ok_or_else(|| CoachError::Configuration("session store is required".to_string()))?;

        let context: Arc<dyn ContextProvider> = match (self.context_provider, &self.data_store) {
            (Some(provider), _) => provider,
            (None, Some(store)) => Arc::new(ContextAggregator::new(Arc::clone(store))),
            (None, None) => {
                return Err(CoachError::Configuration(
                    "a data store or context provider is required".to_string(),
                ))
            }
        };

        let vision_client = self.vision_client.unwrap_or_else(|| Arc::clone(&chat_client));
        let remote_log = if self.mirror_conversations { self.data_store } else { None };
        let session_id = self
            .session_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        tracing::info!(
            session_id = %session_id,
            chat_model = %self.settings.chat.model,
            vision_model = %self.settings.form_analysis.model,
            "ARIA coach ready"
        );

        Ok(AriaCoach {
            chat_client,
            vision_client,
            context,
            prompts: self.prompts,
            sessions,
            remote_log,
            settings: self.settings,
            history_turns: self.history_turns,
            session_id,
        })
    }
}

impl Default for CoachBuilder {
    fn default() -> Self {
        Self::new()
    }
}
