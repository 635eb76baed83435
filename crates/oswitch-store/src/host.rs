//! `FileHost` - `HostClient` over the opencode config files.
//!
//! Aggregate config and MCP servers live in `opencode.json`, credentials
//! in `auth.json`, the prompt collection in `prompts.json`, and the active
//! prompt's content is mirrored into `AGENTS.md` where the host tool reads
//! it. Each command is read-modify-write against one document; writes are
//! atomic renames.

use async_trait::async_trait;
use chrono::{Local, Utc};
use tracing::{debug, info};

use oswitch_core::domain::{
    AuthConfig, Credential, HostConfig, McpServer, McpServerSet, McpTransport, Prompt, PromptSet,
    ProviderConfig,
};
use oswitch_core::ports::{HostClient, HostError};

use crate::files::{read_json_or_default, read_text_optional, write_json_atomic, write_text_atomic};
use crate::paths::StorePaths;

/// File-backed host adapter.
pub struct FileHost {
    paths: StorePaths,
}

impl FileHost {
    #[must_use]
    pub const fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Adapter over the opencode default locations.
    pub fn from_home() -> Result<Self, HostError> {
        Ok(Self::new(StorePaths::from_home()?))
    }

    async fn load_config(&self) -> Result<HostConfig, HostError> {
        read_json_or_default(&self.paths.config_file()).await
    }

    async fn store_config(&self, config: &HostConfig) -> Result<(), HostError> {
        write_json_atomic(&self.paths.config_file(), config).await
    }

    async fn load_auth(&self) -> Result<AuthConfig, HostError> {
        read_json_or_default(&self.paths.auth_file()).await
    }

    async fn store_auth(&self, auth: &AuthConfig) -> Result<(), HostError> {
        write_json_atomic(&self.paths.auth_file(), auth).await
    }

    async fn load_prompts(&self) -> Result<PromptSet, HostError> {
        read_json_or_default(&self.paths.prompts_file()).await
    }

    async fn store_prompts(&self, prompts: &PromptSet) -> Result<(), HostError> {
        write_json_atomic(&self.paths.prompts_file(), prompts).await
    }

    /// One-time migration: when the prompt collection is still empty but an
    /// `AGENTS.md` with content already exists, adopt it as the active
    /// prompt. Returns the number of prompts imported (0 or 1).
    pub async fn import_on_first_launch(&self) -> Result<usize, HostError> {
        let mut prompts = self.load_prompts().await?;
        if !prompts.is_empty() {
            return Ok(0);
        }
        let Some(content) = read_text_optional(&self.paths.agents_file()).await? else {
            return Ok(0);
        };
        if content.trim().is_empty() {
            return Ok(0);
        }

        let now = Utc::now().timestamp_millis();
        let id = format!("auto-imported-{}", now / 1000);
        prompts.insert(
            id.clone(),
            Prompt {
                id: id.clone(),
                name: format!(
                    "Auto-imported Prompt {}",
                    Local::now().format("%Y-%m-%d %H:%M")
                ),
                content,
                description: Some("Automatically imported on first launch".to_string()),
                enabled: true,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );
        self.store_prompts(&prompts).await?;
        info!(prompt = %id, "existing prompt file auto-imported");
        Ok(1)
    }
}

/// Wrap interpreter-launched commands in `cmd /c` on Windows, where `npx`
/// and friends are batch scripts that cannot be spawned directly.
#[cfg(target_os = "windows")]
fn normalize_command(command: Vec<String>) -> Vec<String> {
    let Some(first) = command.first() else {
        return command;
    };
    let first = first.to_lowercase();
    let needs_shell = matches!(first.as_str(), "npx" | "npm" | "node" | "pnpm" | "yarn" | "bunx" | "bun")
        || first.ends_with(".cmd")
        || first.ends_with(".bat");
    if needs_shell {
        let mut wrapped = vec!["cmd".to_string(), "/c".to_string()];
        wrapped.extend(command);
        wrapped
    } else {
        command
    }
}

#[cfg(not(target_os = "windows"))]
fn normalize_command(command: Vec<String>) -> Vec<String> {
    command
}

fn normalize_server(mut server: McpServer) -> McpServer {
    if let McpTransport::Local { command, .. } = &mut server.transport {
        *command = normalize_command(std::mem::take(command));
    }
    server
}

#[async_trait]
impl HostClient for FileHost {
    async fn get_config(&self) -> Result<HostConfig, HostError> {
        self.load_config().await
    }

    async fn save_config(&self, config: &HostConfig) -> Result<(), HostError> {
        self.store_config(config).await
    }

    async fn add_provider(&self, id: &str, provider: &ProviderConfig) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        config.provider.insert(id.to_string(), provider.clone());
        self.store_config(&config).await?;
        debug!(provider = id, "provider added");
        Ok(())
    }

    async fn update_provider(&self, id: &str, provider: &ProviderConfig) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        if !config.provider.contains_key(id) {
            return Err(HostError::NotFound(format!("provider '{id}'")));
        }
        config.provider.insert(id.to_string(), provider.clone());
        self.store_config(&config).await
    }

    async fn delete_provider(&self, id: &str) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        if config.provider.shift_remove(id).is_none() {
            return Err(HostError::NotFound(format!("provider '{id}'")));
        }
        self.store_config(&config).await
    }

    async fn get_credentials(&self) -> Result<AuthConfig, HostError> {
        self.load_auth().await
    }

    async fn set_credential(&self, id: &str, api_key: &str) -> Result<(), HostError> {
        let mut auth = self.load_auth().await?;
        auth.insert(id.to_string(), Credential::api(api_key));
        self.store_auth(&auth).await
    }

    async fn delete_credential(&self, id: &str) -> Result<(), HostError> {
        let mut auth = self.load_auth().await?;
        if auth.shift_remove(id).is_none() {
            return Err(HostError::NotFound(format!("credential '{id}'")));
        }
        self.store_auth(&auth).await
    }

    async fn has_credential(&self, id: &str) -> Result<bool, HostError> {
        Ok(self.load_auth().await?.contains_key(id))
    }

    async fn get_mcp_servers(&self) -> Result<McpServerSet, HostError> {
        Ok(self.load_config().await?.mcp.unwrap_or_default())
    }

    async fn add_mcp_server(&self, name: &str, server: &McpServer) -> Result<(), HostError> {
        let server = normalize_server(server.clone());
        let mut config = self.load_config().await?;
        config
            .mcp
            .get_or_insert_with(McpServerSet::new)
            .insert(name.to_string(), server);
        self.store_config(&config).await?;
        debug!(server = name, "mcp server added");
        Ok(())
    }

    async fn update_mcp_server(&self, name: &str, server: &McpServer) -> Result<(), HostError> {
        let server = normalize_server(server.clone());
        let mut config = self.load_config().await?;
        let mcp = config.mcp.get_or_insert_with(McpServerSet::new);
        if !mcp.contains_key(name) {
            return Err(HostError::NotFound(format!("mcp server '{name}'")));
        }
        mcp.insert(name.to_string(), server);
        self.store_config(&config).await
    }

    async fn delete_mcp_server(&self, name: &str) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        let removed = config
            .mcp
            .as_mut()
            .and_then(|mcp| mcp.shift_remove(name))
            .is_some();
        if !removed {
            return Err(HostError::NotFound(format!("mcp server '{name}'")));
        }
        // Keep the stored file minimal, same as an absent instruction list.
        if config.mcp.as_ref().is_some_and(|mcp| mcp.is_empty()) {
            config.mcp = None;
        }
        self.store_config(&config).await
    }

    async fn toggle_mcp_server(&self, name: &str, enabled: bool) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        let Some(server) = config.mcp.as_mut().and_then(|mcp| mcp.get_mut(name)) else {
            return Err(HostError::NotFound(format!("mcp server '{name}'")));
        };
        server.enabled = Some(enabled);
        self.store_config(&config).await
    }

    async fn get_instructions(&self) -> Result<Vec<String>, HostError> {
        Ok(self.load_config().await?.instructions.unwrap_or_default())
    }

    async fn add_instruction(&self, path: &str) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        let instructions = config.instructions.get_or_insert_with(Vec::new);
        if !instructions.iter().any(|p| p == path) {
            instructions.push(path.to_string());
        }
        self.store_config(&config).await
    }

    async fn remove_instruction(&self, path: &str) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        if let Some(instructions) = &mut config.instructions {
            instructions.retain(|p| p != path);
            if instructions.is_empty() {
                config.instructions = None;
            }
        }
        self.store_config(&config).await
    }

    async fn update_instructions(&self, paths: &[String]) -> Result<(), HostError> {
        let mut config = self.load_config().await?;
        config.instructions = if paths.is_empty() {
            None
        } else {
            Some(paths.to_vec())
        };
        self.store_config(&config).await
    }

    async fn get_prompts(&self) -> Result<PromptSet, HostError> {
        self.load_prompts().await
    }

    async fn upsert_prompt(&self, prompt: &Prompt) -> Result<(), HostError> {
        let mut prompts = self.load_prompts().await?;
        let mut record = prompt.clone();
        // An edit may not carry the original creation time; keep the stored
        // one in that case.
        if record.created_at.is_none() {
            record.created_at = prompts.get(&record.id).and_then(|p| p.created_at);
        }
        let active = record.enabled;
        let content = record.content.clone();
        prompts.insert(record.id.clone(), record);
        self.store_prompts(&prompts).await?;

        // Saving the active prompt updates what the host tool actually reads.
        if active {
            write_text_atomic(&self.paths.agents_file(), &content).await?;
        }
        Ok(())
    }

    async fn delete_prompt(&self, id: &str) -> Result<(), HostError> {
        let mut prompts = self.load_prompts().await?;
        match prompts.get(id) {
            None => return Err(HostError::NotFound(format!("prompt '{id}'"))),
            Some(prompt) if prompt.enabled => {
                return Err(HostError::Rejected(
                    "cannot delete the enabled prompt".to_string(),
                ));
            }
            Some(_) => {
                prompts.shift_remove(id);
            }
        }
        self.store_prompts(&prompts).await
    }

    async fn enable_prompt(&self, id: &str) -> Result<(), HostError> {
        let mut prompts = self.load_prompts().await?;
        if !prompts.contains_key(id) {
            return Err(HostError::NotFound(format!("prompt '{id}'")));
        }

        // The user may have edited the live file since the last activation.
        // Fold those edits back into the active prompt, or keep them as a
        // backup prompt when nothing is active, before overwriting the file.
        if let Some(live) = read_text_optional(&self.paths.agents_file()).await? {
            if !live.trim().is_empty() {
                let now = Utc::now().timestamp_millis();
                let active_id = prompts
                    .iter()
                    .find(|(_, p)| p.enabled)
                    .map(|(id, _)| id.clone());
                match active_id {
                    Some(active_id) => {
                        if let Some(active) = prompts.get_mut(&active_id) {
                            info!(prompt = %active_id, "backfilling live prompt file edits");
                            active.content = live;
                            active.updated_at = Some(now);
                        }
                    }
                    None if !prompts.values().any(|p| p.content.trim() == live.trim()) => {
                        let backup_id = format!("backup-{}", now / 1000);
                        info!(prompt = %backup_id, "backing up unowned prompt file content");
                        prompts.insert(
                            backup_id.clone(),
                            Prompt {
                                id: backup_id,
                                name: format!(
                                    "Original Prompt {}",
                                    Local::now().format("%Y-%m-%d %H:%M")
                                ),
                                content: live,
                                description: Some("Auto-backup of original prompt".to_string()),
                                enabled: false,
                                created_at: Some(now),
                                updated_at: Some(now),
                            },
                        );
                    }
                    None => {}
                }
            }
        }

        for (prompt_id, prompt) in prompts.iter_mut() {
            prompt.enabled = prompt_id == id;
        }
        let content = prompts
            .get(id)
            .map(|p| p.content.clone())
            .unwrap_or_default();

        write_text_atomic(&self.paths.agents_file(), &content).await?;
        self.store_prompts(&prompts).await?;
        info!(prompt = id, "prompt activated");
        Ok(())
    }

    async fn import_prompt_from_file(&self) -> Result<String, HostError> {
        let Some(content) = read_text_optional(&self.paths.agents_file()).await? else {
            return Err(HostError::NotFound("AGENTS.md".to_string()));
        };

        let now = Utc::now().timestamp_millis();
        let id = format!("imported-{}", now / 1000);
        let prompt = Prompt {
            id: id.clone(),
            name: format!("Imported Prompt {}", Local::now().format("%Y-%m-%d %H:%M")),
            content,
            description: Some("Imported from existing AGENTS.md".to_string()),
            enabled: false,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let mut prompts = self.load_prompts().await?;
        prompts.insert(id.clone(), prompt);
        self.store_prompts(&prompts).await?;
        info!(prompt = %id, "prompt imported from file");
        Ok(id)
    }

    async fn get_prompt_file_content(&self) -> Result<Option<String>, HostError> {
        read_text_optional(&self.paths.agents_file()).await
    }
}
