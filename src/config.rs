//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default origins of the bundled web frontend in development.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:3003";

/// Top-level service configuration.
///
/// Loaded once at startup via [`ManagerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8003`).
    pub listen_addr: SocketAddr,

    /// Directory holding the JSON documents; backups go to `backups/` inside.
    pub data_dir: PathBuf,

    /// Directory the generated text files are written to.
    pub output_dir: PathBuf,

    /// Number of backups kept per category.
    pub backup_retention: usize,

    /// Allowed CORS origins. A single `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,

    /// Emit log lines as JSON instead of human-readable text.
    pub log_json: bool,
}

impl ManagerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8003".to_string())
            .parse()?;

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into()));
        let output_dir =
            PathBuf::from(std::env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".into()));

        let backup_retention = parse_env("BACKUP_RETENTION", 10);
        let cors_allowed_origins = split_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );
        let log_json = parse_env_bool("LOG_JSON", false);

        Ok(Self {
            listen_addr,
            data_dir,
            output_dir,
            backup_retention,
            cors_allowed_origins,
            log_json,
        })
    }

    /// Default configuration rooted at the given directories.
    #[must_use]
    pub fn for_dirs(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8003)),
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            backup_retention: 10,
            cors_allowed_origins: split_origins(DEFAULT_CORS_ORIGINS),
            log_json: false,
        }
    }

    /// Directory backups are written to.
    #[must_use]
    pub fn backups_dir(&self) -> PathBuf {
        self.data_dir.join("backups")
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).map(|v| v.trim().to_ascii_lowercase()) {
        Ok(v) if v == "true" || v == "1" => true,
        Ok(v) if v == "false" || v == "0" => false,
        _ => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_origins() {
        let origins = split_origins(" http://a:1 , ,http://b:2");
        assert_eq!(origins, ["http://a:1", "http://b:2"]);
    }

    #[test]
    fn for_dirs_uses_defaults() {
        let config = ManagerConfig::for_dirs("/tmp/d", "/tmp/o");
        assert_eq!(config.backup_retention, 10);
        assert_eq!(config.backups_dir(), PathBuf::from("/tmp/d/backups"));
        assert_eq!(config.cors_allowed_origins.len(), 3);
    }
}
