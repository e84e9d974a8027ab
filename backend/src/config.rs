//! Server configuration read from the environment.
//!
//! | Variable               | Default            |
//! |------------------------|--------------------|
//! | `FORMSMITH_HOST`       | `127.0.0.1`        |
//! | `FORMSMITH_PORT`       | `8080`             |
//! | `FORMSMITH_DB`         | `formsmith.sqlite` |
//! | `FORMSMITH_JSON_LIMIT` | `1048576` (bytes)  |
//! | `FORMSMITH_SESSION_IDLE_SECS` | `1800`      |
//!
//! A `.env` file in the working directory is loaded first when present.
//! Values that fail to parse fall back to their default with a warning.

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "formsmith.sqlite";
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the template and submission blobs.
    pub database_path: PathBuf,
    /// Maximum accepted JSON body size, in bytes.
    pub json_limit: usize,
    /// Edit sessions untouched for this long are closed without saving.
    pub session_idle: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("FORMSMITH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("FORMSMITH_PORT", lookup("FORMSMITH_PORT"), DEFAULT_PORT),
            database_path: lookup("FORMSMITH_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
            json_limit: parse_or(
                "FORMSMITH_JSON_LIMIT",
                lookup("FORMSMITH_JSON_LIMIT"),
                DEFAULT_JSON_LIMIT,
            ),
            session_idle: Duration::from_secs(parse_or(
                "FORMSMITH_SESSION_IDLE_SECS",
                lookup("FORMSMITH_SESSION_IDLE_SECS"),
                DEFAULT_SESSION_IDLE_SECS,
            )),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("formsmith.sqlite"));
        assert_eq!(config.json_limit, 1024 * 1024);
        assert_eq!(config.session_idle, Duration::from_secs(1800));
    }

    #[test]
    fn overrides_and_invalid_values() {
        let config = config(&[
            ("FORMSMITH_HOST", "0.0.0.0"),
            ("FORMSMITH_PORT", "not-a-port"),
            ("FORMSMITH_DB", "/tmp/forms.sqlite"),
            ("FORMSMITH_JSON_LIMIT", " 2048 "),
            ("FORMSMITH_SESSION_IDLE_SECS", "90"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("/tmp/forms.sqlite"));
        assert_eq!(config.json_limit, 2048);
        assert_eq!(config.session_idle, Duration::from_secs(90));
    }
}
