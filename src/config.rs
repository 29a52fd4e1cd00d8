use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

use crate::error::{MentorError, Result};

pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Main configuration structure for the mentor server and chat client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub groq: GroqConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    /// host:port the HTTP server listens on
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Provider credential; only ever read from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the mentor endpoint used by `mentor-chat`
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/api/mentor".to_string(),
        }
    }
}

impl GroqConfig {
    /// The credential, or `MissingCredential` when unset or blank.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(MentorError::MissingCredential {
                var: GROQ_API_KEY_VAR,
            })
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        let env_paths = [".env.local", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded environment from: {}", path);
                env_loaded = true;
            }
        }

        if !env_loaded {
            tracing::debug!("No .env.local or .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("MENTOR_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match Self::from_file(&config_path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path);
                    config
                }
                Err(e) => {
                    tracing::error!("{:#} - using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::debug!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn from_file(path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {path}"))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {path}"))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = env::var("MENTOR_HTTP_BIND") {
            self.server.bind = bind;
        }

        if let Ok(api_key) = env::var(GROQ_API_KEY_VAR) {
            self.groq.api_key = Some(api_key);
        }
        if let Ok(api_url) = env::var("GROQ_API_URL") {
            self.groq.api_url = api_url;
        }
        if let Ok(model) = env::var("GROQ_MODEL") {
            self.groq.model = model;
        }

        if let Ok(endpoint) = env::var("MENTOR_ENDPOINT") {
            self.client.endpoint = endpoint;
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if !(0.0..=2.0).contains(&self.groq.temperature) {
            return Err(MentorError::Config(
                "groq.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.groq.max_tokens == 0 {
            return Err(MentorError::Config("groq.max_tokens cannot be 0".into()));
        }

        // Absence is reported per request; here it is only a warning
        self.groq.require_api_key()?;

        Ok(())
    }

    /// Resolve `server.bind`, accepting host names as well as IP literals
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let invalid = |reason: String| {
            MentorError::Config(format!(
                "Invalid server.bind '{}' (expected host:port): {reason}",
                self.server.bind
            ))
        };
        self.server
            .bind
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no address resolved".to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "analyst-mentor".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                bind: "127.0.0.1:3000".to_string(),
            },
            groq: GroqConfig {
                api_key: None,
                api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                model: "llama-3.3-70b-versatile".to_string(),
                temperature: 0.4,
                max_tokens: 800,
            },
            client: ClientConfig::default(),
        }
    }
}
