use std::env;

use crate::plaato::FailurePolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.plaato.cloud/";

pub const API_KEY_VAR: &str = "PLAATO_KEY";
pub const BASE_URL_VAR: &str = "PLAATO_BASE_URL";
pub const TIMEOUT_VAR: &str = "PLAATO_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Sent as-is, even when empty; the API rejects the request in that case.
    pub api_key: String,
    /// `None` leaves reqwest's default in place.
    pub timeout_secs: Option<u64>,
    pub devices_policy: FailurePolicy,
    pub readings_policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: None,
            devices_policy: FailurePolicy::Swallow,
            readings_policy: FailurePolicy::Propagate,
        }
    }
}

impl Config {
    /// Loads `.env` from the working directory or one of its parents into the
    /// process environment. Variables that are already set win.
    pub fn load_dotenv() {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
            Err(err) if err.not_found() => tracing::debug!("no .env file found"),
            Err(err) => tracing::warn!("failed to load .env file: {err}"),
        }
    }

    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let timeout_secs = lookup(TIMEOUT_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(err) => {
                tracing::warn!("ignoring {TIMEOUT_VAR}='{raw}': {err}");
                None
            }
        });

        Config {
            base_url: lookup(BASE_URL_VAR)
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: lookup(API_KEY_VAR).unwrap_or_default(),
            timeout_secs,
            ..Config::default()
        }
    }
}
