use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aria_api::{build_router, config::Config, state::AppState};
use aria_coach::AriaCoach;
use aria_llm::{ClientFactory, OpenAIConfig};
use aria_persist::{FitnessDataStore, InMemoryDataStore, SessionStoreBuilder, SupabaseDataStore};
use aria_types::ModelSettingsTable;
use aria_wearables::SimulatedDeviceSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting ARIA API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let missing = config.missing_required();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Some configuration values are not set");
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // LLM clients
    let chat_key = config.secrets.openai_api_key.clone().unwrap_or_default();
    let vision_key = config.secrets.vision_api_key().unwrap_or_default().to_string();
    let chat_client = ClientFactory::create_chat_client(&OpenAIConfig::new(chat_key))?;
    let vision_client = ClientFactory::create_chat_client(&OpenAIConfig::new(vision_key))?;

    // Data store
    let data_store: Arc<dyn FitnessDataStore> = match config.supabase() {
        Some(supabase) => {
            tracing::info!("Using Supabase data store");
            Arc::new(SupabaseDataStore::from_config(&supabase)?)
        }
        None => {
            tracing::warn!(
                "SUPABASE_URL / SUPABASE_ANON_KEY not set, using an empty in-memory data store"
            );
            Arc::new(InMemoryDataStore::new())
        }
    };

    // Conversation sessions
    let mut sessions = SessionStoreBuilder::new()
        .memory_window(config.session.memory_window)
        .persisted_window(config.session.persisted_window)
        .max_users(config.session.max_users)
        .idle_ttl(Duration::from_secs(config.session.idle_ttl_secs));
    if let Some(dir) = &config.session.storage_dir {
        sessions = sessions.storage_dir(dir);
    }
    let sessions = Arc::new(sessions.build().await?);

    let coach = AriaCoach::builder()
        .chat_client(chat_client)
        .vision_client(vision_client)
        .data_store(data_store)
        .sessions(sessions.clone())
        .settings(ModelSettingsTable::default().with_models(
            &config.llm.chat_model,
            &config.llm.vision_model,
            &config.llm.motivation_model,
        ))
        .build()?;

    spawn_session_sweeper(sessions, Duration::from_secs(config.session.idle_ttl_secs));

    let state = Arc::new(AppState::new(
        config.clone(),
        coach,
        Arc::new(SimulatedDeviceSource::new()),
    ));

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Drop idle transcripts from memory on a fixed interval
fn spawn_session_sweeper(sessions: Arc<aria_persist::SessionStore>, ttl: Duration) {
    let period = (ttl / 2).max(Duration::from_secs(30));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let evicted = sessions.evict_idle().await;
            if evicted > 0 {
                tracing::debug!(evicted, "Evicted idle sessions");
            }
        }
    });
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}
