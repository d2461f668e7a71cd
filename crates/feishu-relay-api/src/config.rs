//! Configuration types for the HTTP service.

use serde::{Deserialize, Serialize};
use url::Url;

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Inbound GitHub webhook settings
    #[serde(default)]
    pub github: GithubConfig,

    /// Outbound Feishu delivery settings
    #[serde(default)]
    pub feishu: FeishuConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Validate the configuration.
    ///
    /// A missing GitHub secret is allowed (open relay mode); a missing or
    /// malformed Feishu URL is not, since the service cannot deliver
    /// anything without it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feishu.webhook_url.is_empty() {
            return Err(ConfigError::Missing {
                key: "feishu.webhook_url".to_string(),
            });
        }

        match Url::parse(&self.feishu.webhook_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "feishu.webhook_url must be http or https, got scheme '{}'",
                        url.scheme()
                    ),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid {
                    message: format!("feishu.webhook_url is not a valid URL: {}", e),
                });
            }
        }

        if self.feishu.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                message: "feishu.timeout_seconds must be greater than zero".to_string(),
            });
        }

        if !self.server.webhook_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                message: "server.webhook_path must start with '/'".to_string(),
            });
        }

        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Webhook endpoint path
    pub webhook_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            webhook_path: "/webhook".to_string(),
        }
    }
}

/// Inbound GitHub webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GithubConfig {
    /// Shared secret for inbound signature verification.
    ///
    /// When absent, verification is skipped entirely and the relay accepts
    /// unsigned requests. That is an explicit tradeoff for setups where the
    /// secret cannot be provisioned; do not run it on a public endpoint.
    pub webhook_secret: Option<String>,
}

/// Outbound Feishu delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeishuConfig {
    /// Destination incoming-webhook URL
    pub webhook_url: String,

    /// Bot secret for outbound message signing; omitted fields when absent
    pub secret: Option<String>,

    /// Total timeout for the downstream call, in seconds
    pub timeout_seconds: u64,
}

impl Default for FeishuConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            secret: None,
            timeout_seconds: 10,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("missing required configuration: {key}")]
    Missing { key: String },
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
