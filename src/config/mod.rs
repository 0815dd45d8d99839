//! Configuration module for the trackpin bot.
//!
//! Loads configuration from environment variables. Every key is required:
//! the bot must not start with a partial configuration, so any missing or
//! malformed value is an error that aborts startup.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Application configuration, loaded once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct Config {
    // Last.fm
    pub api_key: String,
    /// Default Last.fm account whose activity is mirrored.
    pub user: String,
    /// User agent sent with every Last.fm request.
    pub user_agent: String,

    // Telegram
    pub bot_token: String,
    /// Chat holding the pinned status message.
    pub chat_id: i64,
    /// Id of the status message that gets edited in place.
    pub message_id: i32,

    // Update cycle
    /// Minutes between status refreshes.
    pub update_interval: u64,
    pub limit_artists: u32,
    pub limit_tracks: u32,
}

impl Config {
    /// Load configuration from the process environment. `main` loads the
    /// `.env` file before calling this.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&env::vars().collect())
    }

    /// Build a configuration from an explicit key/value map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let update_interval = required_parsed(vars, "UPDATE_INTERVAL")?;
        if update_interval == 0 {
            // tokio panics on a zero interval period.
            bail!("UPDATE_INTERVAL must be at least 1 minute");
        }

        Ok(Self {
            api_key: required(vars, "LASTFM_API_KEY")?,
            user: required(vars, "LASTFM_USER")?,
            user_agent: required(vars, "USER_AGENT")?,
            bot_token: required(vars, "BOT_TOKEN")?,
            chat_id: required_parsed(vars, "CHAT_ID")?,
            message_id: required_parsed(vars, "MESSAGE_ID")?,
            update_interval,
            limit_artists: required_parsed(vars, "LIMIT_ARTISTS")?,
            limit_tracks: required_parsed(vars, "LIMIT_TRACKS")?,
        })
    }
}

fn required(vars: &HashMap<String, String>, key: &str) -> Result<String> {
    match vars.get(key).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => bail!("{key} must be set"),
    }
}

fn required_parsed<T>(vars: &HashMap<String, String>, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    required(vars, key)?
        .parse()
        .with_context(|| format!("{key} is not a valid number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_vars() -> HashMap<String, String> {
        [
            ("LASTFM_API_KEY", "abc123"),
            ("LASTFM_USER", "listener"),
            ("USER_AGENT", "trackpin/0.1"),
            ("BOT_TOKEN", "12345:token"),
            ("CHAT_ID", "-1001234567890"),
            ("MESSAGE_ID", "42"),
            ("UPDATE_INTERVAL", "5"),
            ("LIMIT_ARTISTS", "5"),
            ("LIMIT_TRACKS", "10"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn loads_full_configuration() {
        let config = Config::from_vars(&full_vars()).unwrap();

        assert_eq!(config.user, "listener");
        assert_eq!(config.chat_id, -1001234567890);
        assert_eq!(config.message_id, 42);
        assert_eq!(config.update_interval, 5);
        assert_eq!(config.limit_tracks, 10);
    }

    #[test]
    fn missing_key_fails_with_key_name() {
        let mut vars = full_vars();
        vars.remove("BOT_TOKEN");

        let err = Config::from_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn empty_value_is_treated_as_missing() {
        let mut vars = full_vars();
        vars.insert("LASTFM_API_KEY".to_string(), "  ".to_string());

        assert!(Config::from_vars(&vars).is_err());
    }

    #[test]
    fn zero_update_interval_is_rejected() {
        let mut vars = full_vars();
        vars.insert("UPDATE_INTERVAL".to_string(), "0".to_string());

        let err = Config::from_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("UPDATE_INTERVAL"));
    }

    #[test]
    fn malformed_integer_fails() {
        let mut vars = full_vars();
        vars.insert("CHAT_ID".to_string(), "not-a-number".to_string());

        let err = Config::from_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("CHAT_ID"));
    }
}
