//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the harness binary using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! with the configuration from the `buildgram.toml` file and environment
//! variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends a CI/CD build or deployment notification to a Telegram chat.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the notification event JSON file. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// Telegram bot token, overriding the configuration file.
    #[arg(long, value_name = "TOKEN")]
    pub bot_token: Option<String>,

    /// Destination chat identifier, overriding the configuration file.
    #[arg(long, value_name = "ID", allow_hyphen_values = true)]
    pub chat_id: Option<i64>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut telegram = Dict::new();

        if let Some(token) = &self.bot_token {
            telegram.insert("bot_token".into(), Value::from(token.clone()));
        }

        if let Some(chat_id) = self.chat_id {
            telegram.insert("chat_id".into(), Value::from(chat_id));
        }

        let mut dict = Dict::new();
        if !telegram.is_empty() {
            dict.insert("telegram".into(), Value::Dict(Tag::Default, telegram));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
