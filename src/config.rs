//! Configuration management for the birthday sync tools.
//!
//! Settings are resolved once per run, in this order of precedence:
//! command-line overrides, then the `immich.toml` file, then environment
//! variables (a `.env` file is loaded first via `dotenvy`). The result is an
//! immutable settings struct handed to the clients explicitly.

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "immich.toml";

/// Immich URL used when neither the file nor `IMMICH_URL` provides one.
pub const DEFAULT_IMMICH_URL: &str = "http://localhost:2283";

/// Default HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    immich: ImmichSection,
    carddav: CardDavSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImmichSection {
    url: Option<String>,
    api_key: Option<String>,
    request_timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CardDavSection {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    sleep: Option<f64>,
    request_timeout: Option<u64>,
}

/// Resolved settings for the Immich people API.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmichSettings {
    /// Immich server base URL (without `/api`)
    pub url: String,

    /// API key sent as `x-api-key`
    pub api_key: String,

    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

/// Resolved settings for the CardDAV address book.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDavSettings {
    /// CardDAV server base URL
    pub url: String,

    pub username: String,

    pub password: String,

    /// Pause after every card fetch
    pub sleep: Duration,

    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CardDavOverrides {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sleep: Option<f64>,
}

/// The parsed configuration file plus the environment it falls back to.
#[derive(Debug)]
pub struct Config {
    file: ConfigFile,
}

impl Config {
    /// Load the configuration file at `path`.
    ///
    /// A `.env` file in the working directory is loaded into the process
    /// environment first, without overriding variables that are already set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` if `path` does not exist; the tools
    /// refuse to run without a config file even when everything is in the
    /// environment.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(Self { file })
    }

    /// Resolve the path given on the command line, or the default.
    pub fn path_or_default(path: Option<PathBuf>) -> PathBuf {
        path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Resolve Immich settings against the process environment.
    pub fn immich(&self) -> ConfigResult<ImmichSettings> {
        self.immich_with(|key| env::var(key).ok())
    }

    /// Resolve CardDAV settings against the process environment.
    pub fn carddav(&self, overrides: &CardDavOverrides) -> ConfigResult<CardDavSettings> {
        self.carddav_with(overrides, |key| env::var(key).ok())
    }

    fn immich_with<F>(&self, lookup: F) -> ConfigResult<ImmichSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let section = &self.file.immich;

        let url = section
            .url
            .clone()
            .or_else(|| lookup("IMMICH_URL"))
            .unwrap_or_else(|| DEFAULT_IMMICH_URL.to_string());
        validate_url("IMMICH_URL", &url)?;

        let api_key = required(section.api_key.clone(), &lookup, "Immich API key", "IMMICH_API_KEY")?;

        let request_timeout = request_timeout(section.request_timeout, &lookup)?;

        Ok(ImmichSettings {
            url,
            api_key,
            request_timeout,
        })
    }

    fn carddav_with<F>(&self, overrides: &CardDavOverrides, lookup: F) -> ConfigResult<CardDavSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let section = &self.file.carddav;

        let url = required(
            overrides.url.clone().or_else(|| section.url.clone()),
            &lookup,
            "CardDAV URL",
            "CARDDAV_URL",
        )?;
        validate_url("CARDDAV_URL", &url)?;

        let username = required(
            overrides.username.clone().or_else(|| section.username.clone()),
            &lookup,
            "CardDAV username",
            "CARDDAV_USER",
        )?;

        let password = required(
            overrides.password.clone().or_else(|| section.password.clone()),
            &lookup,
            "CardDAV password",
            "CARDDAV_PASS",
        )?;

        let sleep_secs = match overrides.sleep.or(section.sleep) {
            Some(secs) => secs,
            None => match lookup("CARDDAV_SLEEP") {
                Some(raw) => raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                    var: "CARDDAV_SLEEP".to_string(),
                    reason: format!("Must be a number of seconds, got: {}", raw),
                })?,
                None => 0.0,
            },
        };
        let sleep = Duration::try_from_secs_f64(sleep_secs).map_err(|_| ConfigError::InvalidValue {
            var: "CARDDAV_SLEEP".to_string(),
            reason: format!("Must be a non-negative number of seconds, got: {}", sleep_secs),
        })?;

        let request_timeout = request_timeout(section.request_timeout, &lookup)?;

        Ok(CardDavSettings {
            url,
            username,
            password,
            sleep,
            request_timeout,
        })
    }
}

/// Take the configured value or the environment variable, rejecting blanks.
fn required<F>(configured: Option<String>, lookup: &F, key: &str, env_var: &str) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .or_else(|| lookup(env_var))
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingValue {
            key: key.to_string(),
            env: env_var.to_string(),
        })
}

fn request_timeout<F>(configured: Option<u64>, lookup: &F) -> ConfigResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secs) = configured {
        return Ok(secs);
    }
    match lookup("REQUEST_TIMEOUT") {
        Some(val) => val.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT".to_string(),
            reason: format!("Must be a positive number, got: {}", val),
        }),
        None => Ok(DEFAULT_REQUEST_TIMEOUT),
    }
}

fn validate_url(var: &str, url: &str) -> ConfigResult<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            reason: "Must start with http:// or https://".to_string(),
        });
    }
    Ok(())
}
