//! Bot configuration, loadable from TOML with environment overrides.

use serde::Deserialize;

use crate::classifier::LuisConfig;

/// Top-level configuration for the bot host.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// LUIS application settings.
    #[serde(default)]
    pub luis: LuisConfig,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Sessions idle for longer than this are dropped (seconds).
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3978
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            luis: LuisConfig::default(),
            server: ServerConfig::default(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl BotConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// LUIS credentials from the environment win either way.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut config = if std::path::Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!(path, "config file not found, using defaults");
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Override LUIS credentials from `LUIS_APP_ID`, `LUIS_API_KEY`, `LUIS_HOSTNAME`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("LUIS_APP_ID") {
            self.luis.app_id = v;
        }
        if let Some(v) = lookup("LUIS_API_KEY") {
            self.luis.api_key = v;
        }
        if let Some(v) = lookup("LUIS_HOSTNAME") {
            self.luis.hostname = v;
        }
    }

    /// Listen address, e.g. `0.0.0.0:3978`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
