//! AI-assisted text enhancement
//!
//! The adapter tries the configured provider once under a bounded
//! timeout; any transport error, service error, or timeout degrades to
//! the deterministic fallback. The adapter never mutates a report; the
//! caller decides which field receives the result.

pub mod fallback;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::providers::TextProvider;

const SYSTEM_PROMPT: &str = "You are an expert audit analyst. Enhance the given report \
section based on the user's request. Make it more professional, comprehensive, and \
suitable for an executive audience. Maintain the original structure and key information \
while improving clarity and impact. Return only the enhanced content, no explanations \
or additional text.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Text enhancement adapter with graceful degradation
pub struct Enhancer {
    provider: Option<Arc<dyn TextProvider>>,
    timeout: Duration,
}

impl Enhancer {
    /// Create an enhancer; `None` runs fallback-only.
    pub fn new(provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Rewrite `current` for `section` following `prompt`.
    ///
    /// Never fails: one provider attempt (no retries), then the
    /// deterministic fallback.
    pub async fn enhance(&self, section: &str, prompt: &str, current: &str) -> String {
        if let Some(provider) = &self.provider {
            let user_prompt = format!(
                "Section: {}\nCurrent content: {}\nUser enhancement request: {}\n\n\
                 Please enhance this content based on the user's request.",
                section,
                if current.is_empty() {
                    "No content provided"
                } else {
                    current
                },
                prompt
            );

            match tokio::time::timeout(self.timeout, provider.complete(SYSTEM_PROMPT, &user_prompt))
                .await
            {
                Ok(Ok(text)) if !text.trim().is_empty() => {
                    debug!(provider = provider.name(), section, "enhancement completed");
                    return text;
                }
                Ok(Ok(_)) => {
                    warn!(provider = provider.name(), "provider returned empty text, using fallback");
                }
                Ok(Err(e)) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, using fallback");
                }
                Err(_) => {
                    warn!(provider = provider.name(), "provider timed out, using fallback");
                }
            }
        }

        fallback::enhance(section, prompt, current)
    }
}
