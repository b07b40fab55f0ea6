use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://api.musshk.com/api";
pub const DEFAULT_SESSION_FILE: &str = ".order-desk-session.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        let api_url: String = try_load("ORDER_DESK_API_URL", DEFAULT_API_URL.to_string());
        let session_file: String =
            try_load("ORDER_DESK_SESSION_FILE", DEFAULT_SESSION_FILE.to_string());

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            session_file: PathBuf::from(session_file),
            timeout: Duration::from_secs(try_load("ORDER_DESK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    let Some(raw) = var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
