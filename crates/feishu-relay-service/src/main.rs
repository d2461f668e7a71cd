//! # Feishu Relay Service
//!
//! Binary entry point for the webhook relay.
//!
//! This executable:
//! - Loads configuration from optional files and environment variables
//! - Initializes logging
//! - Builds the signature validator and Feishu client from configuration
//! - Starts the HTTP server from feishu-relay-api

use feishu_relay_api::{start_server, ServiceConfig, ServiceError};
use feishu_relay_core::{FeishuClient, FeishuClientConfig, HmacSha256Validator, SignatureValidator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources (applied in order — later sources override earlier ones):
    //  1. ./config/relay.yaml                 — deployment-local file
    //  2. Path given by RELAY_CONFIG_FILE env — operator-specified file
    //  3. Environment variables prefixed RELAY__ (double-underscore separator)
    //     e.g. RELAY__SERVER__PORT=9090 sets server.port = 9090
    //  4. The bare variables GITHUB_WEBHOOK_SECRET, FEISHU_SECRET and
    //     FEISHU_WEBHOOK_URL, kept for compatibility with existing
    //     deployments of the relay.
    //
    // All configuration fields carry serde defaults, so an absent file or an
    // entirely unconfigured environment produces a valid config that then
    // fails validation only on the missing Feishu URL.
    // -------------------------------------------------------------------------
    let service_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not initialized yet
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(3);
        }
    };

    init_tracing(&service_config);

    if let Err(e) = service_config.validate() {
        error!(error = %e, "Service configuration is invalid; aborting");
        std::process::exit(3);
    }

    info!("Starting Feishu Relay Service");

    // -------------------------------------------------------------------------
    // Build the inbound signature validator
    //
    // Verification is only enabled when a webhook secret is configured.
    // Without one the relay accepts unsigned requests, which is an explicit
    // tradeoff for setups where the secret cannot be provisioned.
    // -------------------------------------------------------------------------
    let signature_validator: Option<Arc<dyn SignatureValidator>> =
        match &service_config.github.webhook_secret {
            Some(secret) => {
                info!("Inbound signature verification enabled");
                Some(Arc::new(HmacSha256Validator::new(secret.clone())))
            }
            None => {
                warn!(
                    "GITHUB_WEBHOOK_SECRET is not configured; inbound signature \
                     verification is DISABLED. Do not expose this endpoint publicly."
                );
                None
            }
        };

    let mut feishu_config = FeishuClientConfig::default()
        .with_webhook_url(service_config.feishu.webhook_url.clone())
        .with_timeout(Duration::from_secs(service_config.feishu.timeout_seconds));
    if let Some(secret) = &service_config.feishu.secret {
        feishu_config = feishu_config.with_secret(secret.clone());
        info!("Outbound message signing enabled");
    }

    let feishu = match FeishuClient::new(feishu_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Failed to build Feishu client; aborting");
            std::process::exit(3);
        }
    };

    info!(
        host = %service_config.server.host,
        port = service_config.server.port,
        webhook_path = %service_config.server.webhook_path,
        "Starting HTTP server"
    );

    if let Err(e) = start_server(service_config, signature_validator, feishu).await {
        error!("Failed to start server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
            ServiceError::Configuration(_) => 3,
            ServiceError::FeishuClient(_) => 3,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}

// ============================================================================
// Private helpers
// ============================================================================

/// Load and merge configuration from files and the environment.
fn load_config() -> anyhow::Result<ServiceConfig> {
    let mut config_builder = config::Config::builder().add_source(
        config::File::with_name("config/relay")
            .required(false)
            .format(config::FileFormat::Yaml),
    );

    // Optional explicit path supplied by the operator.
    if let Ok(explicit_path) = std::env::var("RELAY_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            config_builder = config_builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }
    }

    let config = config_builder
        .add_source(config::Environment::with_prefix("RELAY").separator("__"))
        .build()?;

    let mut service_config: ServiceConfig = config.try_deserialize()?;

    // Bare variables from the original deployment win over everything else.
    if let Ok(secret) = std::env::var("GITHUB_WEBHOOK_SECRET") {
        if !secret.is_empty() {
            service_config.github.webhook_secret = Some(secret);
        }
    }
    if let Ok(secret) = std::env::var("FEISHU_SECRET") {
        if !secret.is_empty() {
            service_config.feishu.secret = Some(secret);
        }
    }
    if let Ok(url) = std::env::var("FEISHU_WEBHOOK_URL") {
        if !url.is_empty() {
            service_config.feishu.webhook_url = url;
        }
    }

    Ok(service_config)
}

/// Initialize the tracing subscriber.
///
/// RUST_LOG takes precedence; otherwise the configured default level is
/// applied to the relay's own crates.
fn init_tracing(config: &ServiceConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "feishu_relay_service={level},feishu_relay_api={level},feishu_relay_core={level},tower_http=debug",
            level = config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.json_format {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
