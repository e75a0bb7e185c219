//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::services::{CommandRegistry, DEFAULT_PREFIX};

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub router: RouterConfig,
    /// Prefix overrides keyed by guild id
    pub prefixes: BTreeMap<String, String>,
    /// Aliases hooked at startup, name to template
    pub aliases: BTreeMap<String, String>,
    pub whitelist: WhitelistConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RouterConfig {
    /// Stop alias expansion after this many steps; unlimited when absent
    pub max_alias_depth: Option<usize>,
}

/// Whitelist of users allowed to change settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WhitelistConfig {
    pub enabled: bool,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Id the console user sends messages as
    pub user_id: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "lazybot".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Default for AdaptersConfig {
    fn default() -> Self {
        Self {
            console: Some(ConsoleConfig::default()),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            user_id: "console".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        Self::default().with_env()
    }

    /// Apply environment overrides on top of this configuration
    pub fn with_env(mut self) -> Self {
        if let Ok(name) = std::env::var("BOT_NAME") {
            self.bot.name = name;
        }

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            if !prefix.is_empty() {
                self.bot.prefix = prefix;
            }
        }

        if let Ok(depth) = std::env::var("BOT_MAX_ALIAS_DEPTH") {
            match depth.parse() {
                Ok(depth) => self.router.max_alias_depth = Some(depth),
                Err(_) => tracing::warn!("Ignoring invalid BOT_MAX_ALIAS_DEPTH: {}", depth),
            }
        }

        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::InvalidValue("bot.prefix must not be empty".to_string()));
        }
        if let Some((scope, _)) = self.prefixes.iter().find(|(_, p)| p.is_empty()) {
            return Err(ConfigError::InvalidValue(format!("prefix for '{}' must not be empty", scope)));
        }
        Ok(())
    }

    /// Users allowed to change settings; `None` when the whitelist is off
    pub fn owners(&self) -> Option<Vec<String>> {
        self.whitelist.enabled.then(|| self.whitelist.users.clone())
    }

    /// Push prefixes and aliases into a registry
    pub fn apply(&self, registry: &CommandRegistry) {
        registry.set_prefix(self.bot.prefix.as_str());
        for (scope, prefix) in &self.prefixes {
            registry.set_scope_prefix(scope.as_str(), prefix.as_str());
        }
        for (name, template) in &self.aliases {
            registry.hook(name, template.as_str());
        }
    }
}
