use config::{Config as ConfigLoader, ConfigBuilder, ConfigError, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub session: SessionSettings,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(skip)]
    pub secrets: Secrets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub chat_model: String,
    pub vision_model: String,
    pub motivation_model: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub memory_window: usize,
    pub persisted_window: usize,
    pub max_users: usize,
    pub idle_ttl_secs: u64,
    /// Transcripts are kept in memory only when unset
    pub storage_dir: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        let defaults = aria_persist::SessionConfig::default();
        Self {
            memory_window: defaults.memory_window,
            persisted_window: defaults.persisted_window,
            max_users: defaults.max_users,
            idle_ttl_secs: defaults.idle_ttl.as_secs(),
            storage_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Named secret values read from the process environment
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub realtime_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_vision_api_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Empty values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            supabase_url: get("SUPABASE_URL"),
            supabase_anon_key: get("SUPABASE_ANON_KEY"),
            realtime_api_key: get("REALTIME_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_vision_api_key: get("OPENAI_VISION_API_KEY"),
        }
    }

    /// Vision key, or the chat key when no separate one is set
    pub fn vision_api_key(&self) -> Option<&str> {
        self.openai_vision_api_key
            .as_deref()
            .or(self.openai_api_key.as_deref())
    }
}

/// Environment variable -> config key overrides, applied after the files
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("LLM_CHAT_MODEL", "llm.chat_model"),
    ("LLM_VISION_MODEL", "llm.vision_model"),
    ("LLM_MOTIVATION_MODEL", "llm.motivation_model"),
    ("SESSION_MEMORY_WINDOW", "session.memory_window"),
    ("SESSION_PERSISTED_WINDOW", "session.persisted_window"),
    ("SESSION_MAX_USERS", "session.max_users"),
    ("SESSION_IDLE_TTL_SECS", "session.idle_ttl_secs"),
    ("SESSION_STORAGE_DIR", "session.storage_dir"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. SERVER_*, LLM_*, SESSION_* and LOG_* environment variables
    ///
    /// Secrets are never read from files.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));
        let builder = apply_env_overrides(builder)?;

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        cfg.secrets = Secrets::from_env();
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    /// Names of the secret values that are not set
    pub fn missing_required(&self) -> Vec<&'static str> {
        let s = &self.secrets;
        let mut missing = Vec::new();
        if s.supabase_url.is_none() {
            missing.push("SUPABASE_URL");
        }
        if s.supabase_anon_key.is_none() {
            missing.push("SUPABASE_ANON_KEY");
        }
        if s.realtime_api_key.is_none() {
            missing.push("REALTIME_API_KEY");
        }
        if s.openai_api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if s.vision_api_key().is_none() {
            missing.push("OPENAI_VISION_API_KEY");
        }
        missing
    }

    /// Fails only on what the server cannot start without.
    ///
    /// A missing data store or realtime key degrades features; a missing
    /// OpenAI key or an unusable session window does not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secrets.openai_api_key.is_none() {
            return Err(ConfigError::Message(
                "OPENAI_API_KEY environment variable is required".to_string(),
            ));
        }
        if self.session.persisted_window < self.session.memory_window {
            return Err(ConfigError::Message(format!(
                "session.persisted_window ({}) must be >= session.memory_window ({})",
                self.session.persisted_window, self.session.memory_window
            )));
        }
        Ok(())
    }

    pub fn supabase(&self) -> Option<aria_persist::SupabaseConfig> {
        match (&self.secrets.supabase_url, &self.secrets.supabase_anon_key) {
            (Some(url), Some(key)) => Some(aria_persist::SupabaseConfig::new(url, key)),
            _ => None,
        }
    }
}

fn apply_env_overrides(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in ENV_OVERRIDES {
        builder = builder.set_override_option(*key, std::env::var(var).ok())?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [cors]
        enabled = true
        origins = ["http://localhost:3000"]

        [llm]
        chat_model = "gpt-4o"
        vision_model = "gpt-4o"
        motivation_model = "gpt-4o-mini"

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: Config = toml::from_str(TOML).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.motivation_model, "gpt-4o-mini");
        // session section is optional
        assert_eq!(config.session.memory_window, 50);
        assert_eq!(config.session.persisted_window, 100);
    }

    #[test]
    fn test_missing_required_lists_unset_values() {
        let mut config: Config = toml::from_str(TOML).unwrap();
        config.secrets = Secrets::from_lookup(|name| match name {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "SUPABASE_URL" => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(
            config.missing_required(),
            vec!["SUPABASE_URL", "SUPABASE_ANON_KEY", "REALTIME_API_KEY"]
        );
        assert_eq!(config.secrets.vision_api_key(), Some("sk-test"));
        assert!(config.validate().is_ok());
        assert!(config.supabase().is_none());
    }

    #[test]
    fn test_validate_requires_openai_key() {
        let config: Config = toml::from_str(TOML).unwrap();
        assert!(config.missing_required().contains(&"OPENAI_VISION_API_KEY"));
        assert!(config.validate().is_err());
    }
}
