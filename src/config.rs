//! Runtime settings read from the environment.

use std::env;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_SESSION_HOURS: i64 = 24;
const MAX_SESSION_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctors_file: Option<PathBuf>,
    pub log_level: String,
    pub session_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let doctors_file = lookup("MEDIBOOK_DOCTORS_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_level = lookup("MEDIBOOK_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let session_hours = match lookup("MEDIBOOK_SESSION_HOURS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(hours) if (1..=MAX_SESSION_HOURS).contains(&hours) => hours,
                _ => {
                    warn!(
                        "MEDIBOOK_SESSION_HOURS '{}' is not between 1 and {}, using {}",
                        raw, MAX_SESSION_HOURS, DEFAULT_SESSION_HOURS
                    );
                    DEFAULT_SESSION_HOURS
                }
            },
            None => DEFAULT_SESSION_HOURS,
        };

        Self {
            doctors_file,
            log_level,
            session_hours,
        }
    }
}
