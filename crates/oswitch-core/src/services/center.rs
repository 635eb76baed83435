//! `ConfigCenter` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (GUI shell,
//! CLI) receive a `ConfigCenter` instance and use it to access all
//! functionality.

use std::sync::Arc;

use crate::cache::ConfigCache;
use crate::ports::HostClient;

use super::{InstructionService, McpService, PromptService, ProviderService};

/// The core application facade.
///
/// `ConfigCenter` wires every service to one host client and one shared
/// cache, so that a mutation through one service is visible to reads
/// through another (providers and instructions share the `config` slot).
///
/// # Example
///
/// ```ignore
/// let host = Arc::new(FileHost::new(paths));
/// let center = ConfigCenter::new(host);
///
/// let providers = center.providers().list().await?;
/// ```
pub struct ConfigCenter {
    cache: Arc<ConfigCache>,
    providers: ProviderService,
    mcp: McpService,
    prompts: PromptService,
    instructions: InstructionService,
}

impl ConfigCenter {
    /// Create a new `ConfigCenter` over the given host client.
    #[must_use]
    pub fn new(host: Arc<dyn HostClient>) -> Self {
        let cache = Arc::new(ConfigCache::new());
        Self {
            providers: ProviderService::new(Arc::clone(&host), Arc::clone(&cache)),
            mcp: McpService::new(Arc::clone(&host), Arc::clone(&cache)),
            prompts: PromptService::new(Arc::clone(&host), Arc::clone(&cache)),
            instructions: InstructionService::new(host, Arc::clone(&cache)),
            cache,
        }
    }

    /// Access the provider service.
    pub const fn providers(&self) -> &ProviderService {
        &self.providers
    }

    /// Access the MCP server service.
    pub const fn mcp(&self) -> &McpService {
        &self.mcp
    }

    /// Access the prompt service.
    pub const fn prompts(&self) -> &PromptService {
        &self.prompts
    }

    /// Access the instruction service.
    pub const fn instructions(&self) -> &InstructionService {
        &self.instructions
    }

    /// Drop every cached collection, forcing fresh reads (pull-to-refresh).
    pub async fn refresh_all(&self) {
        self.cache.config.invalidate().await;
        self.cache.credentials.invalidate().await;
        self.cache.mcp.invalidate().await;
        self.cache.prompts.invalidate().await;
    }
}
