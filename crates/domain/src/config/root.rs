use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;

/// Proxy-side configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sidecar-relay.toml in current directory
    /// 3. /etc/sidecar-relay/config.toml
    /// 4. Default configuration
    ///
    /// Environment overrides are applied on top, then CLI overrides.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("sidecar-relay.toml").exists() {
            Self::from_file("sidecar-relay.toml")?
        } else if std::path::Path::new("/etc/sidecar-relay/config.toml").exists() {
            Self::from_file("/etc/sidecar-relay/config.toml")?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// `PROXY_PORT` and `INGRESS_DOMAIN`, read through `lookup` so tests can supply their own.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PROXY_PORT").filter(|v| !v.trim().is_empty()) {
            self.server.proxy_port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("PROXY_PORT '{}' is not a valid port", port))
            })?;
        }
        if let Some(domain) = lookup("INGRESS_DOMAIN") {
            let domain = domain.trim();
            self.resolver.ingress_domain = (!domain.is_empty()).then(|| domain.to_string());
        }
        Ok(())
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.proxy_port {
            self.server.proxy_port = port;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(domain) = overrides.ingress_domain {
            self.resolver.ingress_domain = Some(domain);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.proxy_port == 0 {
            return Err(ConfigError::Validation("Proxy port cannot be 0".to_string()));
        }

        if self.server.registration_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Registration host cannot be empty".to_string(),
            ));
        }

        if self.resolver.gateway.enabled && self.resolver.gateway.port == 0 {
            return Err(ConfigError::Validation(
                "Gateway port cannot be 0".to_string(),
            ));
        }

        if let Some(domain) = &self.resolver.ingress_domain {
            if domain.starts_with('.') || domain.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "Invalid ingress domain '{}'",
                    domain
                )));
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub proxy_port: Option<u16>,
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub ingress_domain: Option<String>,
    pub log_level: Option<String>,
}
