//! Bot configuration loaded from TOML.

use derive_getters::Getters;
use emojibot_bot::RewriteSettings;
use emojibot_error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Environment variable consulted when the file has no token.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    level: String,
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Top-level bot configuration.
///
/// ```toml
/// catalog_path = "emojis.json"
/// builtins_path = "builtins.json"
///
/// [rewrite]
/// frequent_slots = 40
///
/// [logging]
/// level = "emojibot=debug,info"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct AppConfig {
    /// Discord bot token; prefer the environment for secrets.
    #[serde(default)]
    bot_token: Option<String>,

    /// Catalog JSON document.
    #[serde(default = "default_catalog_path")]
    catalog_path: PathBuf,

    /// Builtin emoji name blocklist.
    #[serde(default = "default_builtins_path")]
    builtins_path: PathBuf,

    /// Rewrite pipeline settings.
    #[serde(default)]
    rewrite: RewriteSettings,

    /// Logging settings.
    #[serde(default)]
    logging: LoggingConfig,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("emojis.json")
}

fn default_builtins_path() -> PathBuf {
    PathBuf::from("builtins.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            catalog_path: default_catalog_path(),
            builtins_path: default_builtins_path(),
            rewrite: RewriteSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative catalog and builtin paths are resolved against the
    /// directory containing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// settings are out of range.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&content)?;

        if let Some(dir) = path.parent() {
            config.catalog_path = dir.join(&config.catalog_path);
            config.builtins_path = dir.join(&config.builtins_path);
        }
        debug!(catalog = %config.catalog_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let rewrite = &self.rewrite;
        if rewrite.command_prefix().trim().is_empty() {
            return Err(ConfigError::invalid_setting(
                "rewrite.command_prefix",
                "not be empty",
            ));
        }
        if !(0.0..=1.0).contains(rewrite.fuzzy_threshold()) {
            return Err(ConfigError::invalid_setting(
                "rewrite.fuzzy_threshold",
                "be between 0 and 1",
            ));
        }
        if rewrite.frequent_slots() > rewrite.native_capacity() {
            return Err(ConfigError::invalid_setting(
                "rewrite.frequent_slots",
                "not exceed rewrite.native_capacity",
            ));
        }
        if *rewrite.list_page_budget() < RewriteSettings::MIN_LIST_PAGE_BUDGET {
            return Err(ConfigError::invalid_setting(
                "rewrite.list_page_budget",
                format!("be at least {}", RewriteSettings::MIN_LIST_PAGE_BUDGET),
            ));
        }
        Ok(())
    }

    /// Bot token from the file or the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if neither provides a non-empty token.
    pub fn token(&self) -> Result<String, ConfigError> {
        self.bot_token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "No bot token: set bot_token or the {} environment variable",
                    TOKEN_ENV
                ))
            })
    }
}
