use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const MIN_REQUEST_TIMEOUT_MS: u64 = 100;
pub const MAX_REQUEST_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_LOG_LEVEL: &str = "symptom_triage=info,tower_http=info";

/// Main configuration structure loaded from symptom_triage.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Identity reported by the health endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "HealthCare Symptom Checker API".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

/// HTTP listener, CORS and timeout settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub cors_origins: Vec<String>,
    pub request_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5000".to_string(),
                "http://localhost:5000".to_string(),
            ],
            request_timeout_ms: 30_000,
        }
    }
}

impl HttpConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e| TriageError::Config {
            message: format!("invalid http.bind '{}': {}", self.bind, e),
        })
    }
}

/// Runtime configuration from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses SYMPTOM_TRIAGE_CONFIG environment variable or defaults to "symptom_triage.toml"
    pub fn load() -> Result<Self> {
        // TRIAGE_ENV_FILE if set, else ./.env
        match std::env::var("TRIAGE_ENV_FILE") {
            Ok(env_path) => {
                let _ = dotenvy::from_path(env_path);
            }
            Err(_) => {
                let _ = dotenvy::from_path(".env");
            }
        }

        let config_path = std::env::var("SYMPTOM_TRIAGE_CONFIG")
            .unwrap_or_else(|_| "symptom_triage.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = std::env::var("TRIAGE_HTTP_BIND") {
            tracing::debug!("TRIAGE_HTTP_BIND env override applied");
            self.http.bind = bind;
        }
        if let Ok(origins) = std::env::var("TRIAGE_CORS_ORIGINS") {
            tracing::debug!("TRIAGE_CORS_ORIGINS env override applied");
            self.http.cors_origins = origins.split(',').map(|o| o.to_string()).collect();
        }
        if let Ok(raw) = std::env::var("TRIAGE_HTTP_REQUEST_TIMEOUT_MS") {
            match raw.trim().parse() {
                Ok(ms) => self.http.request_timeout_ms = ms,
                Err(_) => tracing::warn!(
                    "Ignoring TRIAGE_HTTP_REQUEST_TIMEOUT_MS='{}': not a number",
                    raw
                ),
            }
        }
    }

    /// Normalize ranges and reject settings the server cannot start with
    pub fn validate(&mut self) -> Result<()> {
        let clamped = self
            .http
            .request_timeout_ms
            .clamp(MIN_REQUEST_TIMEOUT_MS, MAX_REQUEST_TIMEOUT_MS);
        if clamped != self.http.request_timeout_ms {
            tracing::warn!(
                "http.request_timeout_ms {} out of range, using {}",
                self.http.request_timeout_ms,
                clamped
            );
            self.http.request_timeout_ms = clamped;
        }

        self.http.cors_origins = self
            .http
            .cors_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string())
            .collect();

        self.http.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = Config::default();
        assert_eq!(config.service.version, "1.0.0");
        assert_eq!(config.http.cors_origins.len(), 3);
        assert_eq!(config.runtime.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.http.socket_addr().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [http]
            bind = "127.0.0.1:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.http.bind, "127.0.0.1:8080");
        assert_eq!(config.http.request_timeout_ms, 30_000);
        assert_eq!(config.service.name, "HealthCare Symptom Checker API");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml("[http\nbind = 1").unwrap_err();
        assert!(matches!(err, TriageError::Config { .. }));
    }

    #[test]
    fn validate_clamps_timeout_and_drops_blank_origins() {
        let mut config = Config::default();
        config.http.request_timeout_ms = 5;
        config.http.cors_origins = vec![" http://a.test ".into(), "".into(), "  ".into()];
        config.validate().unwrap();
        assert_eq!(config.http.request_timeout_ms, MIN_REQUEST_TIMEOUT_MS);
        assert_eq!(config.http.cors_origins, vec!["http://a.test"]);

        config.http.request_timeout_ms = 10_000_000;
        config.validate().unwrap();
        assert_eq!(config.http.request_timeout_ms, MAX_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn bad_bind_is_rejected() {
        let mut config = Config::default();
        config.http.bind = "not-an-address".into();
        assert!(matches!(config.validate(), Err(TriageError::Config { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        unsafe {
            std::env::set_var("TRIAGE_HTTP_BIND", "127.0.0.1:9999");
            std::env::set_var("TRIAGE_CORS_ORIGINS", "http://x.test, http://y.test");
            std::env::set_var("TRIAGE_HTTP_REQUEST_TIMEOUT_MS", "2500");
        }
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate().unwrap();
        unsafe {
            std::env::remove_var("TRIAGE_HTTP_BIND");
            std::env::remove_var("TRIAGE_CORS_ORIGINS");
            std::env::remove_var("TRIAGE_HTTP_REQUEST_TIMEOUT_MS");
        }
        assert_eq!(config.http.bind, "127.0.0.1:9999");
        assert_eq!(config.http.cors_origins, vec!["http://x.test", "http://y.test"]);
        assert_eq!(config.http.request_timeout_ms, 2500);
    }
}
