//! Client configuration loaded from the environment.

use chrono_tz::Tz;
use kesfolio_core::errors::{Error, Result};
use kesfolio_core::utils::time_utils::DEFAULT_DISPLAY_TZ;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend origin when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend API root, including the `/api` prefix
    pub api_url: String,
    /// Timezone used to bucket timestamps into calendar days
    pub display_tz: Tz,
    pub request_timeout: Duration,
    /// File holding the persisted session, if sessions should survive restarts
    pub session_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: api_url_from_origin(DEFAULT_BACKEND_URL),
            display_tz: DEFAULT_DISPLAY_TZ,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_path: None,
        }
    }
}

fn api_url_from_origin(origin: &str) -> String {
    format!("{}/api", origin.trim().trim_end_matches('/'))
}

/// A missing `.env` is fine; an unreadable or malformed one is not.
fn load_dotenv(outcome: std::result::Result<(), dotenvy::Error>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::ConfigIO(e.to_string())),
    }
}

impl Config {
    /// Loads `.env` if present, then reads `KESFOLIO_*` variables.
    pub fn from_env() -> Result<Self> {
        load_dotenv(dotenvy::dotenv().map(|_| ()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(origin) = lookup("KESFOLIO_BACKEND_URL").filter(|v| !v.trim().is_empty()) {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(Error::InvalidConfigValue(format!(
                    "KESFOLIO_BACKEND_URL must be an http(s) URL, got '{}'",
                    origin
                )));
            }
            config.api_url = api_url_from_origin(&origin);
        }

        if let Some(tz) = lookup("KESFOLIO_DISPLAY_TZ").filter(|v| !v.trim().is_empty()) {
            config.display_tz = tz.trim().parse::<Tz>().map_err(|e| {
                Error::InvalidConfigValue(format!("KESFOLIO_DISPLAY_TZ '{}': {}", tz, e))
            })?;
        }

        if let Some(secs) = lookup("KESFOLIO_HTTP_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            let secs = secs.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                Error::InvalidConfigValue(format!(
                    "KESFOLIO_HTTP_TIMEOUT_SECS must be a positive integer, got '{}'",
                    secs
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.session_path = lookup("KESFOLIO_SESSION_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}
