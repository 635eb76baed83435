//! Mutation orchestration - the application's business logic layer.
//!
//! Services sit between forms and the host port: they validate, sequence
//! dependent host calls, and own the cache-invalidation contract. On
//! success exactly the affected collection's slot is invalidated; on
//! failure the cache is left untouched and the error is surfaced. No
//! partial local mutation is ever applied.

mod center;
mod instructions;
mod mcp;
mod prompt;
mod provider;
mod session;
mod submit;

pub use center::ConfigCenter;
pub use instructions::InstructionService;
pub use mcp::McpService;
pub use prompt::PromptService;
pub use provider::{CredentialOutcome, ProviderService, ProviderSubmitOutcome};
pub use session::{DeleteConfirm, DialogSession};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared in-memory host double for service tests.

    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::{
        AuthConfig, Credential, HostConfig, McpServer, McpServerSet, Prompt, PromptSet,
        ProviderConfig,
    };
    use crate::ports::{HostClient, HostError};

    /// In-memory `HostClient` that records every command it receives and
    /// can be told to reject specific commands by name.
    #[derive(Default)]
    pub struct MockHost {
        pub config: Mutex<HostConfig>,
        pub auth: Mutex<AuthConfig>,
        pub prompts: Mutex<PromptSet>,
        pub prompt_file: Mutex<Option<String>>,
        pub calls: Mutex<Vec<String>>,
        pub fail: Mutex<HashSet<&'static str>>,
    }

    impl MockHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_on(&self, command: &'static str) {
            self.fail.lock().unwrap().insert(command);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_named(&self, command: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| *c == command)
                .count()
        }

        fn hit(&self, command: &'static str) -> Result<(), HostError> {
            self.calls.lock().unwrap().push(command.to_string());
            if self.fail.lock().unwrap().contains(command) {
                return Err(HostError::Rejected(format!("{command} rejected")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl HostClient for MockHost {
        async fn get_config(&self) -> Result<HostConfig, HostError> {
            self.hit("get_config")?;
            Ok(self.config.lock().unwrap().clone())
        }

        async fn save_config(&self, config: &HostConfig) -> Result<(), HostError> {
            self.hit("save_config")?;
            *self.config.lock().unwrap() = config.clone();
            Ok(())
        }

        async fn add_provider(
            &self,
            id: &str,
            provider: &ProviderConfig,
        ) -> Result<(), HostError> {
            self.hit("add_provider")?;
            self.config
                .lock()
                .unwrap()
                .provider
                .insert(id.to_string(), provider.clone());
            Ok(())
        }

        async fn update_provider(
            &self,
            id: &str,
            provider: &ProviderConfig,
        ) -> Result<(), HostError> {
            self.hit("update_provider")?;
            let mut config = self.config.lock().unwrap();
            if !config.provider.contains_key(id) {
                return Err(HostError::NotFound(format!("provider '{id}'")));
            }
            config.provider.insert(id.to_string(), provider.clone());
            Ok(())
        }

        async fn delete_provider(&self, id: &str) -> Result<(), HostError> {
            self.hit("delete_provider")?;
            self.config
                .lock()
                .unwrap()
                .provider
                .shift_remove(id)
                .map(|_| ())
                .ok_or_else(|| HostError::NotFound(format!("provider '{id}'")))
        }

        async fn get_credentials(&self) -> Result<AuthConfig, HostError> {
            self.hit("get_credentials")?;
            Ok(self.auth.lock().unwrap().clone())
        }

        async fn set_credential(&self, id: &str, api_key: &str) -> Result<(), HostError> {
            self.hit("set_credential")?;
            self.auth
                .lock()
                .unwrap()
                .insert(id.to_string(), Credential::api(api_key));
            Ok(())
        }

        async fn delete_credential(&self, id: &str) -> Result<(), HostError> {
            self.hit("delete_credential")?;
            self.auth
                .lock()
                .unwrap()
                .shift_remove(id)
                .map(|_| ())
                .ok_or_else(|| HostError::NotFound(format!("credential '{id}'")))
        }

        async fn has_credential(&self, id: &str) -> Result<bool, HostError> {
            self.hit("has_credential")?;
            Ok(self.auth.lock().unwrap().contains_key(id))
        }

        async fn get_mcp_servers(&self) -> Result<McpServerSet, HostError> {
            self.hit("get_mcp_servers")?;
            Ok(self.config.lock().unwrap().mcp.clone().unwrap_or_default())
        }

        async fn add_mcp_server(&self, name: &str, server: &McpServer) -> Result<(), HostError> {
            self.hit("add_mcp_server")?;
            self.config
                .lock()
                .unwrap()
                .mcp
                .get_or_insert_with(McpServerSet::new)
                .insert(name.to_string(), server.clone());
            Ok(())
        }

        async fn update_mcp_server(
            &self,
            name: &str,
            server: &McpServer,
        ) -> Result<(), HostError> {
            self.hit("update_mcp_server")?;
            let mut config = self.config.lock().unwrap();
            let mcp = config.mcp.get_or_insert_with(McpServerSet::new);
            if !mcp.contains_key(name) {
                return Err(HostError::NotFound(format!("mcp server '{name}'")));
            }
            mcp.insert(name.to_string(), server.clone());
            Ok(())
        }

        async fn delete_mcp_server(&self, name: &str) -> Result<(), HostError> {
            self.hit("delete_mcp_server")?;
            let mut config = self.config.lock().unwrap();
            match config.mcp.as_mut().and_then(|mcp| mcp.shift_remove(name)) {
                Some(_) => Ok(()),
                None => Err(HostError::NotFound(format!("mcp server '{name}'"))),
            }
        }

        async fn toggle_mcp_server(&self, name: &str, enabled: bool) -> Result<(), HostError> {
            self.hit("toggle_mcp_server")?;
            let mut config = self.config.lock().unwrap();
            config
                .mcp
                .as_mut()
                .and_then(|mcp| mcp.get_mut(name))
                .map(|server| server.enabled = Some(enabled))
                .ok_or_else(|| HostError::NotFound(format!("mcp server '{name}'")))
        }

        async fn get_instructions(&self) -> Result<Vec<String>, HostError> {
            self.hit("get_instructions")?;
            Ok(self
                .config
                .lock()
                .unwrap()
                .instructions
                .clone()
                .unwrap_or_default())
        }

        async fn add_instruction(&self, path: &str) -> Result<(), HostError> {
            self.hit("add_instruction")?;
            let mut config = self.config.lock().unwrap();
            let instructions = config.instructions.get_or_insert_with(Vec::new);
            if !instructions.iter().any(|p| p == path) {
                instructions.push(path.to_string());
            }
            Ok(())
        }

        async fn remove_instruction(&self, path: &str) -> Result<(), HostError> {
            self.hit("remove_instruction")?;
            let mut config = self.config.lock().unwrap();
            if let Some(instructions) = &mut config.instructions {
                instructions.retain(|p| p != path);
                if instructions.is_empty() {
                    config.instructions = None;
                }
            }
            Ok(())
        }

        async fn update_instructions(&self, paths: &[String]) -> Result<(), HostError> {
            self.hit("update_instructions")?;
            self.config.lock().unwrap().instructions = if paths.is_empty() {
                None
            } else {
                Some(paths.to_vec())
            };
            Ok(())
        }

        async fn get_prompts(&self) -> Result<PromptSet, HostError> {
            self.hit("get_prompts")?;
            Ok(self.prompts.lock().unwrap().clone())
        }

        async fn upsert_prompt(&self, prompt: &Prompt) -> Result<(), HostError> {
            self.hit("upsert_prompt")?;
            self.prompts
                .lock()
                .unwrap()
                .insert(prompt.id.clone(), prompt.clone());
            Ok(())
        }

        async fn delete_prompt(&self, id: &str) -> Result<(), HostError> {
            self.hit("delete_prompt")?;
            let mut prompts = self.prompts.lock().unwrap();
            match prompts.get(id) {
                None => Err(HostError::NotFound(format!("prompt '{id}'"))),
                Some(p) if p.enabled => {
                    Err(HostError::Rejected("cannot delete enabled prompt".into()))
                }
                Some(_) => {
                    prompts.shift_remove(id);
                    Ok(())
                }
            }
        }

        async fn enable_prompt(&self, id: &str) -> Result<(), HostError> {
            self.hit("enable_prompt")?;
            let mut prompts = self.prompts.lock().unwrap();
            if !prompts.contains_key(id) {
                return Err(HostError::NotFound(format!("prompt '{id}'")));
            }
            for (prompt_id, prompt) in prompts.iter_mut() {
                prompt.enabled = prompt_id == id;
            }
            *self.prompt_file.lock().unwrap() = prompts.get(id).map(|p| p.content.clone());
            Ok(())
        }

        async fn import_prompt_from_file(&self) -> Result<String, HostError> {
            self.hit("import_prompt_from_file")?;
            let id = "imported-1".to_string();
            self.prompts.lock().unwrap().insert(
                id.clone(),
                Prompt {
                    id: id.clone(),
                    name: "Imported Prompt".to_string(),
                    content: "imported content".to_string(),
                    description: None,
                    enabled: false,
                    created_at: Some(1),
                    updated_at: Some(1),
                },
            );
            Ok(id)
        }

        async fn get_prompt_file_content(&self) -> Result<Option<String>, HostError> {
            self.hit("get_prompt_file_content")?;
            Ok(self.prompt_file.lock().unwrap().clone())
        }
    }
}
