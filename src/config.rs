//! Configuration management for Buildgram
//!
//! This module defines the main `Config` struct, responsible for holding the
//! harness settings. It uses the `figment` crate to layer a `buildgram.toml`
//! file, environment variables, and command-line arguments over defaults. The
//! composition and dispatch core never reads configuration itself; delivery
//! credentials are handed to it per invocation.

use crate::cli::Cli;
use crate::notification::telegram::TELEGRAM_API_BASE;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The main configuration struct for the notification harness.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Delivery settings for the Telegram Bot API.
    pub telegram: TelegramConfig,
}

/// Delivery settings for the Telegram Bot API.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    /// The bot token used to authenticate against the Bot API.
    pub bot_token: String,
    /// The numeric identifier of the destination chat.
    pub chat_id: i64,
    /// Base URL of the Bot API. Overridden in tests.
    pub api_base: String,
}

impl Config {
    /// Loads the configuration by layering sources: defaults, the TOML file,
    /// `BUILDGRAM_*` environment variables, and CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .as_deref()
            .unwrap_or_else(|| std::path::Path::new("buildgram.toml"));
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g.,
            // BUILDGRAM_TELEGRAM__CHAT_ID=42
            .merge(Env::prefixed("BUILDGRAM_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            telegram: TelegramConfig {
                bot_token: String::new(),
                chat_id: 0,
                api_base: TELEGRAM_API_BASE.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_production_api() {
        let config = Config::default();
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = Cli {
            config: None,
            event: None,
            bot_token: Some("999:override".to_string()),
            chat_id: Some(-42),
        };
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.telegram.bot_token, "999:override");
        assert_eq!(config.telegram.chat_id, -42);
    }
}
