//! TOML configuration for the dashboard gateway.
//!
//! Layered model with compiled-in defaults, environment variable override
//! for the config file path, and a standard filesystem location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Root configuration for the dashboard process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "loaded dashboard configuration");
        Ok(config)
    }

    /// Try to load configuration from, in order:
    /// 1. The path specified by the `PHALANX_DASHBOARD_CONFIG` environment variable.
    /// 2. `/etc/phalanx/dashboard.toml`.
    /// 3. Fall back to compiled-in defaults.
    pub fn load_or_default() -> Self {
        if let Ok(env_path) = std::env::var("PHALANX_DASHBOARD_CONFIG") {
            let path = Path::new(&env_path);
            match Self::load(path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "PHALANX_DASHBOARD_CONFIG set but file could not be loaded, trying fallback"
                    );
                }
            }
        }

        let system_path = Path::new("/etc/phalanx/dashboard.toml");
        if system_path.exists() {
            match Self::load(system_path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warn!(
                        path = %system_path.display(),
                        error = %e,
                        "system config file exists but could not be loaded, using defaults"
                    );
                }
            }
        }

        debug!("no config file found, using compiled-in defaults");
        Self::default()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address and port the dashboard listens on.
    pub bind: String,
    /// Directory served under `/static` (stylesheet, feed script).
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Base URLs of the backend services the dashboard renders from.
///
/// Defaults match the fixed local ports the services bind in development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Anomaly detector (`GET /anomalies`, `GET /ws/anomalies`).
    pub anomaly_url: String,
    /// Report generator (`GET /reports`, `GET /reports/{name}`).
    pub report_url: String,
    /// Connector registry (`GET/POST /connectors`, `DELETE /connectors/{id}`).
    pub connector_url: String,
    /// Policy store (`GET/POST /policies`, `DELETE /policies/{id}`).
    pub policy_url: String,
    /// Per-request timeout for all backend calls (seconds).
    pub request_timeout_sec: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            anomaly_url: "http://127.0.0.1:8000".to_string(),
            report_url: "http://127.0.0.1:8002".to_string(),
            connector_url: "http://127.0.0.1:8004".to_string(),
            policy_url: "http://127.0.0.1:8005".to_string(),
            request_timeout_sec: 5,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum tracing level (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let cfg = DashboardConfig::default();

        assert_eq!(cfg.server.bind, "0.0.0.0:3000");
        assert_eq!(cfg.server.static_dir, PathBuf::from("static"));

        assert_eq!(cfg.upstream.anomaly_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.upstream.report_url, "http://127.0.0.1:8002");
        assert_eq!(cfg.upstream.connector_url, "http://127.0.0.1:8004");
        assert_eq!(cfg.upstream.policy_url, "http://127.0.0.1:8005");
        assert_eq!(cfg.upstream.request_timeout_sec, 5);

        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_parse_example_toml() {
        let toml_str = r#"
[server]
bind = "127.0.0.1:9000"
static_dir = "/opt/phalanx/static"

[upstream]
anomaly_url = "http://detector.internal:8000"
report_url = "http://reports.internal:8002"
connector_url = "http://connectors.internal:8004"
policy_url = "http://policies.internal:8005"
request_timeout_sec = 10

[logging]
level = "debug"
"#;

        let cfg: DashboardConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(cfg.server.bind, "127.0.0.1:9000");
        assert_eq!(cfg.server.static_dir, PathBuf::from("/opt/phalanx/static"));
        assert_eq!(cfg.upstream.anomaly_url, "http://detector.internal:8000");
        assert_eq!(cfg.upstream.request_timeout_sec, 10);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[upstream]
anomaly_url = "http://10.0.0.5:8000"
"#;

        let cfg: DashboardConfig = toml::from_str(toml_str).unwrap();

        // Explicit override.
        assert_eq!(cfg.upstream.anomaly_url, "http://10.0.0.5:8000");

        // Everything else should be defaults.
        assert_eq!(cfg.upstream.policy_url, "http://127.0.0.1:8005");
        assert_eq!(cfg.server.bind, "0.0.0.0:3000");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let cfg: DashboardConfig = toml::from_str("").unwrap();
        let defaults = DashboardConfig::default();

        assert_eq!(cfg.server.bind, defaults.server.bind);
        assert_eq!(cfg.upstream.connector_url, defaults.upstream.connector_url);
        assert_eq!(cfg.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(
            &path,
            r#"
[server]
bind = "0.0.0.0:9999"
"#,
        )
        .unwrap();

        let cfg = DashboardConfig::load(&path).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:9999");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = DashboardConfig::load(Path::new("/nonexistent/path/dashboard.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let cfg = DashboardConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let roundtripped: DashboardConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(cfg.server.bind, roundtripped.server.bind);
        assert_eq!(cfg.upstream.anomaly_url, roundtripped.upstream.anomaly_url);
        assert_eq!(
            cfg.upstream.request_timeout_sec,
            roundtripped.upstream.request_timeout_sec
        );
    }
}
