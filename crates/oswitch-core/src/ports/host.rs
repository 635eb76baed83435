//! Host persistence port.
//!
//! The host collaborator durably stores the aggregate config, credentials,
//! MCP servers, and prompts. The core calls this command surface and trusts
//! its responses; it never reimplements storage. Commands that the host
//! reports as booleans signal failure by rejecting — there is no
//! success-with-`false` value, so mutations are modeled as
//! `Result<(), HostError>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AuthConfig, HostConfig, McpServer, Prompt, PromptSet, ProviderConfig};
use crate::domain::McpServerSet;

/// Errors a host command can fail with.
///
/// Messages are surfaced to the user verbatim, so adapters should keep them
/// human-readable.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The addressed entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The host rejected the command.
    #[error("{0}")]
    Rejected(String),

    /// The host's storage backend failed (I/O, permissions, ...).
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Command surface of the host persistence service.
///
/// Every mutation here is a targeted add/update/delete against one entry;
/// the host owns aggregate persistence atomicity. The single multi-entry
/// command is `enable_prompt`, which also demotes the previously active
/// prompt (collaborator contract, see `PromptService`).
#[async_trait]
pub trait HostClient: Send + Sync {
    // --- Aggregate config ---

    /// Read the full aggregate config (a default one if none exists yet).
    async fn get_config(&self) -> Result<HostConfig, HostError>;

    /// Replace the full aggregate config.
    async fn save_config(&self, config: &HostConfig) -> Result<(), HostError>;

    // --- Providers ---

    async fn add_provider(&self, id: &str, provider: &ProviderConfig) -> Result<(), HostError>;

    /// # Errors
    ///
    /// - `NotFound` if no provider with the given id exists
    async fn update_provider(&self, id: &str, provider: &ProviderConfig)
    -> Result<(), HostError>;

    /// # Errors
    ///
    /// - `NotFound` if no provider with the given id exists
    async fn delete_provider(&self, id: &str) -> Result<(), HostError>;

    // --- Credentials ---

    async fn get_credentials(&self) -> Result<AuthConfig, HostError>;

    async fn set_credential(&self, id: &str, api_key: &str) -> Result<(), HostError>;

    /// # Errors
    ///
    /// - `NotFound` if no credential for the given id exists
    async fn delete_credential(&self, id: &str) -> Result<(), HostError>;

    async fn has_credential(&self, id: &str) -> Result<bool, HostError>;

    // --- MCP servers ---

    async fn get_mcp_servers(&self) -> Result<McpServerSet, HostError>;

    async fn add_mcp_server(&self, name: &str, server: &McpServer) -> Result<(), HostError>;

    /// # Errors
    ///
    /// - `NotFound` if no server with the given name exists
    async fn update_mcp_server(&self, name: &str, server: &McpServer) -> Result<(), HostError>;

    /// # Errors
    ///
    /// - `NotFound` if no server with the given name exists
    async fn delete_mcp_server(&self, name: &str) -> Result<(), HostError>;

    /// Single-field enable/disable mutation.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no server with the given name exists
    async fn toggle_mcp_server(&self, name: &str, enabled: bool) -> Result<(), HostError>;

    // --- Instructions ---

    async fn get_instructions(&self) -> Result<Vec<String>, HostError>;

    async fn add_instruction(&self, path: &str) -> Result<(), HostError>;

    async fn remove_instruction(&self, path: &str) -> Result<(), HostError>;

    async fn update_instructions(&self, paths: &[String]) -> Result<(), HostError>;

    // --- Prompts ---

    async fn get_prompts(&self) -> Result<PromptSet, HostError>;

    async fn upsert_prompt(&self, prompt: &Prompt) -> Result<(), HostError>;

    /// # Errors
    ///
    /// - `NotFound` if no prompt with the given id exists
    /// - `Rejected` if the prompt is currently enabled
    async fn delete_prompt(&self, id: &str) -> Result<(), HostError>;

    /// Make the given prompt the single active one, demoting any other.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no prompt with the given id exists
    async fn enable_prompt(&self, id: &str) -> Result<(), HostError>;

    /// Import the host's current prompt file as a new, disabled prompt.
    /// Returns the imported prompt's id.
    async fn import_prompt_from_file(&self) -> Result<String, HostError>;

    /// Current content of the host's active-prompt file, `None` when the
    /// file does not exist. Used for previewing before an import.
    async fn get_prompt_file_content(&self) -> Result<Option<String>, HostError>;
}
