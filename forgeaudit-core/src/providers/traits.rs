//! Provider trait definitions

use async_trait::async_trait;

use crate::Result;

/// A single-turn text completion provider.
///
/// Enhancement only ever needs one system-prompted completion, so the
/// surface is deliberately small; failures are absorbed by the caller's
/// deterministic fallback.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Get provider name
    fn name(&self) -> &str;

    /// Complete a prompt under a fixed system instruction
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}
