//! Environment-driven configuration.
//!
//! Everything has a logged default so a bare `cargo run` serves on
//! localhost against the public generation API (unauthenticated).

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::storage::CookieSettings;

pub struct Config {
    pub port: u16,
    pub cookie_name: String,
    /// Set the cookie's `Secure` attribute; enable behind TLS.
    pub cookie_secure: bool,
    pub generation_api_url: String,
    pub generation_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("MODELSTUDIO_PORT", "3000"),
            cookie_name: try_load("MODELSTUDIO_COOKIE_NAME", "searchHistory"),
            cookie_secure: try_load("MODELSTUDIO_COOKIE_SECURE", "false"),
            generation_api_url: try_load(
                "MODELSTUDIO_GENERATION_URL",
                "https://hyperhuman.deemos.com/api/v2",
            ),
            generation_api_key: env::var("MODELSTUDIO_GENERATION_KEY").ok(),
        }
    }

    /// Cookie attributes derived from this configuration.
    pub fn cookie_settings(&self) -> CookieSettings {
        CookieSettings {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
