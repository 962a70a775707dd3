//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Policy engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Identity provider settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public A2A URL advertised in the agent card.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// Policy engine connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the NPL engine; `/npl/evaluate` is appended.
    #[serde(default = "default_engine_url")]
    pub url: String,
}

/// Identity provider settings.
///
/// Only reported at startup. Bearer tokens are forwarded to the engine
/// without being checked against this provider.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the Keycloak server.
    #[serde(default = "default_identity_url")]
    pub url: String,

    /// Keycloak realm.
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Keycloak client id.
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

impl IdentityConfig {
    /// Token issuer URL for the configured realm.
    pub fn issuer_url(&self) -> String {
        format!("{}/realms/{}", self.url.trim_end_matches('/'), self.realm)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "a2a_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

fn default_public_url() -> String {
    "http://localhost:8000/a2a".to_string()
}

fn default_engine_url() -> String {
    "http://engine:12000".to_string()
}

fn default_identity_url() -> String {
    "http://keycloak:11000".to_string()
}

fn default_realm() -> String {
    "noumena".to_string()
}

fn default_client_id() -> String {
    "noumena".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: default_identity_url(),
            realm: default_realm(),
            client_id: default_client_id(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Where the loaded settings came from, before environment overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Parsed from the config file.
    File,
    /// No file given, or the file does not exist.
    Defaults,
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies overrides from the process environment.
///
/// Nothing is logged here; tracing is not initialised until the logging
/// settings are known, so the caller reports the returned [`ConfigOrigin`].
/// See [`apply_overrides`] for the recognised variables.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<(Config, ConfigOrigin), ConfigError> {
    let (mut config, origin) = match path {
        Some(p) => read_config_file(p)?,
        None => (Config::default(), ConfigOrigin::Defaults),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok((config, origin))
}

/// Reads a TOML config file. A missing file yields the defaults.
fn read_config_file(path: &str) -> Result<(Config, ConfigOrigin), ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok((toml::from_str(&contents)?, ConfigOrigin::File)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok((Config::default(), ConfigOrigin::Defaults))
        }
        Err(e) => Err(ConfigError::FileRead(e)),
    }
}

/// Applies variable overrides looked up through `var`.
///
/// - `A2A_HOST` overrides `server.host`
/// - `A2A_PORT` overrides `server.port`
/// - `A2A_PUBLIC_URL` overrides `server.public_url`
/// - `NPL_ENGINE_URL` overrides `engine.url`
/// - `KEYCLOAK_URL` overrides `identity.url`
/// - `KEYCLOAK_REALM` overrides `identity.realm`
/// - `KEYCLOAK_CLIENT_ID` overrides `identity.client_id`
/// - `A2A_LOG_LEVEL` overrides `logging.level`
/// - `A2A_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// Host and port values that fail to parse are ignored.
pub fn apply_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = var("A2A_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = var("A2A_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(public_url) = var("A2A_PUBLIC_URL") {
        config.server.public_url = public_url;
    }
    if let Some(engine_url) = var("NPL_ENGINE_URL") {
        config.engine.url = engine_url;
    }
    if let Some(url) = var("KEYCLOAK_URL") {
        config.identity.url = url;
    }
    if let Some(realm) = var("KEYCLOAK_REALM") {
        config.identity.realm = realm;
    }
    if let Some(client_id) = var("KEYCLOAK_CLIENT_ID") {
        config.identity.client_id = client_id;
    }
    if let Some(level) = var("A2A_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("A2A_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
