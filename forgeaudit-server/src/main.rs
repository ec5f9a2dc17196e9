//! forgeaudit API server entrypoint

mod api;
mod args;
mod http;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use forgeaudit_core::config::{ProviderName, ServerConfig};
use forgeaudit_core::enhance::Enhancer;
use forgeaudit_core::providers::create_provider;
use forgeaudit_core::report::ReportStore;

use crate::api::AppState;
use crate::http::HttpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = args::Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    // CLI flags override the config file.
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(provider) = &args.provider {
        config.provider.name = parse_provider_name(provider)?;
    }
    if let Some(model) = &args.model {
        config.provider.model = model.clone();
    }

    // A missing API key is not fatal: enhancement degrades to the
    // deterministic fallback and everything else works unchanged.
    let provider = match create_provider(&config.provider) {
        Ok(provider) => {
            info!(provider = provider.name(), model = %config.provider.model, "provider ready");
            Some(provider)
        }
        Err(e) => {
            warn!("AI credentials not found ({}), using fallback enhancement", e);
            None
        }
    };

    let state = Arc::new(AppState {
        store: ReportStore::new(),
        enhancer: Enhancer::new(provider)
            .with_timeout(Duration::from_secs(config.enhance_timeout_secs)),
    });

    let server = HttpServer::start(state, config.port).await?;
    info!("forgeaudit server running at {}", server.url());

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown().await;

    Ok(())
}

fn parse_provider_name(name: &str) -> Result<ProviderName> {
    match name.to_lowercase().as_str() {
        "anthropic" => Ok(ProviderName::Anthropic),
        "openai" => Ok(ProviderName::OpenAi),
        other => anyhow::bail!("unknown provider '{}', expected anthropic or openai", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_name() {
        assert_eq!(
            parse_provider_name("Anthropic").unwrap(),
            ProviderName::Anthropic
        );
        assert_eq!(parse_provider_name("openai").unwrap(), ProviderName::OpenAi);
        assert!(parse_provider_name("bedrock").is_err());
    }
}
