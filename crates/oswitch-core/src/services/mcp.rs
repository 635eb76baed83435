//! MCP server orchestration.

use std::sync::Arc;

use tracing::debug;

use crate::cache::ConfigCache;
use crate::domain::McpServerSet;
use crate::forms::McpForm;
use crate::ports::{CoreError, HostClient};
use crate::services::submit::SubmitGate;

pub struct McpService {
    host: Arc<dyn HostClient>,
    cache: Arc<ConfigCache>,
    gate: SubmitGate,
}

impl McpService {
    pub(crate) fn new(host: Arc<dyn HostClient>, cache: Arc<ConfigCache>) -> Self {
        Self {
            host,
            cache,
            gate: SubmitGate::new("mcp server"),
        }
    }

    /// Configured MCP servers, keyed by name.
    pub async fn list(&self) -> Result<McpServerSet, CoreError> {
        let host = Arc::clone(&self.host);
        let servers = self
            .cache
            .mcp
            .get_or_fetch(|| {
                let host = Arc::clone(&host);
                async move { host.get_mcp_servers().await }
            })
            .await?;
        Ok(servers)
    }

    /// Validate and persist an MCP server form.
    ///
    /// `editing` carries the name of the record being edited; `None`
    /// creates a new record under the form's name field.
    pub async fn submit(&self, form: &McpForm, editing: Option<&str>) -> Result<String, CoreError> {
        let _token = self.gate.begin()?;
        let record = form.validate()?;

        let name = editing.unwrap_or_else(|| form.trimmed_name()).to_string();
        match editing {
            Some(_) => self.host.update_mcp_server(&name, &record).await?,
            None => self.host.add_mcp_server(&name, &record).await?,
        }
        self.cache.mcp.invalidate().await;
        debug!(server = %name, editing = editing.is_some(), "mcp server saved");
        Ok(name)
    }

    /// Enable or disable a server without opening a form session.
    pub async fn toggle(&self, name: &str, enabled: bool) -> Result<(), CoreError> {
        self.host.toggle_mcp_server(name, enabled).await?;
        self.cache.mcp.invalidate().await;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<(), CoreError> {
        self.host.delete_mcp_server(name).await?;
        self.cache.mcp.invalidate().await;
        Ok(())
    }
}
