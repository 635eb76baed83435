//! Instruction file list orchestration.
//!
//! Instructions are paths to markdown files the host prepends to every
//! session. They live inside the aggregate config, so mutations here
//! invalidate the `config` slot.

use std::sync::Arc;

use crate::cache::ConfigCache;
use crate::ports::{CoreError, HostClient};

pub struct InstructionService {
    host: Arc<dyn HostClient>,
    cache: Arc<ConfigCache>,
}

impl InstructionService {
    pub(crate) fn new(host: Arc<dyn HostClient>, cache: Arc<ConfigCache>) -> Self {
        Self { host, cache }
    }

    /// Configured instruction file paths, in order.
    pub async fn list(&self) -> Result<Vec<String>, CoreError> {
        let host = Arc::clone(&self.host);
        let config = self
            .cache
            .config
            .get_or_fetch(|| {
                let host = Arc::clone(&host);
                async move { host.get_config().await }
            })
            .await?;
        Ok(config.instructions.unwrap_or_default())
    }

    pub async fn add(&self, path: &str) -> Result<(), CoreError> {
        self.host.add_instruction(path).await?;
        self.cache.config.invalidate().await;
        Ok(())
    }

    pub async fn remove(&self, path: &str) -> Result<(), CoreError> {
        self.host.remove_instruction(path).await?;
        self.cache.config.invalidate().await;
        Ok(())
    }

    /// Replace the whole list (reorder, bulk edit).
    pub async fn replace(&self, paths: &[String]) -> Result<(), CoreError> {
        self.host.update_instructions(paths).await?;
        self.cache.config.invalidate().await;
        Ok(())
    }
}
