//! Environment-based bot configuration.
//!
//! The `Config` struct is built once in `main` and passed by reference to everything
//! that needs it. Values come from the process environment (after `dotenvy` has loaded
//! an optional `.env` file); `Config::from_lookup` accepts any lookup function so tests
//! can build configurations without touching the real environment.

use serenity::all::GuildId;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{config::ConfigError, AppError};

const YOUTUBE_FEED_URL: &str = "https://www.youtube.com/feeds/videos.xml";
const YOUTUBE_CHANNEL_URL: &str = "https://www.youtube.com/channel/";

const DEFAULT_YOUTUBE_CHANNEL_ID: &str = "UC1owxxoNexXWbJ-ri7r5-ww";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 20;
const DEFAULT_GIST_FILENAME: &str = "bot_state.json";

/// Backing medium of the persisted state.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    /// Flat files inside `data_dir`.
    File { data_dir: PathBuf },
    /// A single JSON file inside a GitHub Gist.
    Gist {
        gist_id: String,
        token: String,
        filename: String,
    },
}

/// Bot configuration, built once at startup.
#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    /// Guild receiving an immediate command sync on top of the global one.
    pub dev_guild_id: Option<GuildId>,

    pub youtube_channel_id: String,
    pub youtube_channel_url: String,
    pub feed_url: String,
    pub poll_interval: Duration,
    pub feed_timeout: Duration,

    pub storage: StorageConfig,

    /// Graceful self-shutdown after this long, if set.
    pub max_runtime: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of the named variable, if any
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let discord_token = require("DISCORD_TOKEN")?;

        let dev_guild_id = match get("DEV_GUILD_ID") {
            Some(value) => Some(GuildId::new(parse_non_zero("DEV_GUILD_ID", &value)?)),
            None => None,
        };

        let youtube_channel_id =
            get("YOUTUBE_CHANNEL_ID").unwrap_or_else(|| DEFAULT_YOUTUBE_CHANNEL_ID.to_string());
        let feed_url = build_feed_url(&youtube_channel_id)?;
        let youtube_channel_url = format!("{}{}", YOUTUBE_CHANNEL_URL, youtube_channel_id);

        let poll_interval = Duration::from_secs(parse_secs(
            "POLL_INTERVAL_SECS",
            get("POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let feed_timeout = Duration::from_secs(parse_secs(
            "FEED_TIMEOUT_SECS",
            get("FEED_TIMEOUT_SECS"),
            DEFAULT_FEED_TIMEOUT_SECS,
        )?);

        let backend = get("STATE_BACKEND").unwrap_or_else(|| "file".to_string());
        let storage = match backend.to_ascii_lowercase().as_str() {
            "file" => StorageConfig::File {
                data_dir: PathBuf::from(get("DATA_DIR").unwrap_or_else(|| ".".to_string())),
            },
            "gist" => StorageConfig::Gist {
                gist_id: require("GIST_ID")?,
                token: require("GIST_TOKEN")?,
                filename: get("GIST_FILENAME")
                    .unwrap_or_else(|| DEFAULT_GIST_FILENAME.to_string()),
            },
            _ => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "STATE_BACKEND".to_string(),
                    value: backend,
                    reason: "expected 'file' or 'gist'".to_string(),
                }
                .into())
            }
        };

        let max_runtime = match get("MAX_RUNTIME_SECS") {
            Some(value) => Some(Duration::from_secs(parse_non_zero("MAX_RUNTIME_SECS", &value)?)),
            None => None,
        };

        Ok(Self {
            discord_token,
            dev_guild_id,
            youtube_channel_id,
            youtube_channel_url,
            feed_url,
            poll_interval,
            feed_timeout,
            storage,
            max_runtime,
        })
    }
}

fn build_feed_url(channel_id: &str) -> Result<String, ConfigError> {
    let url = Url::parse_with_params(YOUTUBE_FEED_URL, &[("channel_id", channel_id)]).map_err(
        |e| ConfigError::InvalidEnvVar {
            name: "YOUTUBE_CHANNEL_ID".to_string(),
            value: channel_id.to_string(),
            reason: e.to_string(),
        },
    )?;

    Ok(url.into())
}

fn parse_secs(name: &str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        Some(value) => parse_non_zero(name, &value),
        None => Ok(default),
    }
}

fn parse_non_zero(name: &str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(invalid(&e.to_string())),
    }
}
