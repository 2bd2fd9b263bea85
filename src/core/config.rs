//! Environment-driven bot configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::env;
use thiserror::Error;

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Variable is set but could not be parsed.
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Application ID used for slash-command registration
    pub client_id: Option<u64>,
    pub prefix: String,
    pub leaderboard_url: String,
    pub help_url: String,
    pub admin_ids: Vec<u64>,
    pub bot_avatar_url: String,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process env in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = get("BTOKEN")
            .or_else(|| get("DISCORD_TOKEN"))
            .ok_or_else(|| ConfigError::MissingEnvVar("BTOKEN".to_string()))?;

        let leaderboard_url = get("LEADERBOARD_FETCH_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("LEADERBOARD_FETCH_URL".to_string()))?;

        let client_id = get("CLIENT_ID")
            .map(|raw| parse_number::<u64>("CLIENT_ID", &raw))
            .transpose()?;

        let port = get("PORT")
            .map(|raw| parse_number::<u16>("PORT", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        let admin_ids = match get("ADMIN_IDS") {
            Some(raw) => parse_id_list("ADMIN_IDS", &raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            discord_token,
            client_id,
            prefix: get("PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            leaderboard_url,
            help_url: get("HELP_README_URL").unwrap_or_default(),
            admin_ids,
            bot_avatar_url: get("BOT_PROFILE_IMG").unwrap_or_default(),
            port,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Whether the given Discord user is in the admin list
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

fn parse_id_list(name: &str, raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|id| parse_number(name, id))
        .collect()
}
