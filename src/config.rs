//! Process configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. TOML file (`--config PATH`, else `<config dir>/teams-alert-bridge/config.toml` when present)
//! 3. environment: `TEAMS_WEBHOOK_URL`, `BRIDGE_BIND`, `BRIDGE_PORT`
//!
//! ```toml
//! teams_webhook_url = "https://example.webhook.office.com/webhookb2/..."
//!
//! [gateway]
//! bind = "127.0.0.1"
//! port = 8080
//! route = "/api/bridge"
//! max_body_bytes = 1048576
//! request_timeout_secs = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const WEBHOOK_URL_ENV: &str = "TEAMS_WEBHOOK_URL";
pub const BIND_ENV: &str = "BRIDGE_BIND";
pub const PORT_ENV: &str = "BRIDGE_PORT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
    #[error("gateway.route must start with '/': '{0}'")]
    InvalidRoute(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Teams incoming webhook. Not validated here; a missing or bad URL fails
    /// the first delivery instead.
    pub teams_webhook_url: Option<String>,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub bind: String,
    pub port: u16,
    pub route: String,
    pub max_body_bytes: usize,
    /// Deadline for a whole inbound request, delivery included. `None` = no limit.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 7071,
            route: "/api/bridge".into(),
            max_body_bytes: 1024 * 1024,
            request_timeout_secs: None,
        }
    }
}

impl GatewayConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Config {
    /// Load from `path` (or the default location) and apply process env overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(&expand_path(p))?,
            None => match default_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values axum would panic on when building the router.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gateway.route.starts_with('/') {
            return Err(ConfigError::InvalidRoute(self.gateway.route.clone()));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay environment values. Empty values are ignored.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(WEBHOOK_URL_ENV) {
            self.teams_webhook_url = Some(url);
        }
        if let Some(bind) = get(BIND_ENV) {
            self.gateway.bind = bind;
        }
        if let Some(port) = get(PORT_ENV) {
            self.gateway.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: PORT_ENV,
                value: port,
            })?;
        }
        Ok(())
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "teams-alert-bridge")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_have_no_webhook_url() {
        let config = Config::default();
        assert_eq!(config.teams_webhook_url, None);
        assert_eq!(config.gateway.addr(), "0.0.0.0:7071");
        assert_eq!(config.gateway.route, "/api/bridge");
    }

    #[test]
    fn file_values_are_read_and_missing_keys_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
teams_webhook_url = "https://example.com/hook"

[gateway]
port = 9000
request_timeout_secs = 15
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.teams_webhook_url.as_deref(),
            Some("https://example.com/hook")
        );
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.request_timeout_secs, Some(15));
        assert_eq!(config.gateway.bind, "0.0.0.0");
        assert_eq!(config.gateway.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Config::load(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "got: {err}");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway]\nport = \"eighty\"\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn route_without_leading_slash_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway]\nroute = \"api/bridge\"\n").unwrap();
        let err = Config::load(path.to_str()).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidRoute(ref r) if r == "api/bridge"),
            "got: {err}"
        );
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config {
            teams_webhook_url: Some("https://from-file".into()),
            gateway: GatewayConfig::default(),
        };
        config
            .apply_env(env(&[
                (WEBHOOK_URL_ENV, "https://from-env"),
                (BIND_ENV, "127.0.0.1"),
                (PORT_ENV, "8088"),
            ]))
            .unwrap();
        assert_eq!(config.teams_webhook_url.as_deref(), Some("https://from-env"));
        assert_eq!(config.gateway.addr(), "127.0.0.1:8088");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = Config::default();
        config
            .apply_env(env(&[(WEBHOOK_URL_ENV, "  "), (PORT_ENV, "")]))
            .unwrap();
        assert_eq!(config.teams_webhook_url, None);
        assert_eq!(config.gateway.port, 7071);
    }

    #[test]
    fn bad_port_env_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[(PORT_ENV, "not-a-port")]))
            .unwrap_err();
        assert!(err.to_string().contains(PORT_ENV));
    }
}
