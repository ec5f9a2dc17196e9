//! Provider factory for creating text provider instances

use std::sync::Arc;

use crate::config::{ProviderConfig, ProviderName};
use crate::{Error, Result};

use super::{AnthropicProvider, OpenAiProvider, TextProvider};

/// Create a provider from configuration, resolving API keys from the
/// config first and the environment second.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn TextProvider>> {
    match config.name {
        ProviderName::Anthropic => {
            let api_key = config
                .api_key
                .clone()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
                .ok_or_else(|| Error::Provider("ANTHROPIC_API_KEY not set".to_string()))?;
            Ok(Arc::new(AnthropicProvider::with_api_key(
                api_key,
                &config.model,
            )))
        }
        ProviderName::OpenAi => {
            let api_key = config
                .api_key
                .clone()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .ok_or_else(|| Error::Provider("OPENAI_API_KEY not set".to_string()))?;
            let provider = if let Some(ref base_url) = config.base_url {
                OpenAiProvider::with_base_url(api_key, base_url, &config.model)
            } else {
                OpenAiProvider::with_api_key(api_key, &config.model)
            };
            Ok(Arc::new(provider))
        }
    }
}
