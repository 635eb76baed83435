//! Prompt orchestration.
//!
//! At most one prompt is active at a time. Activation goes through the
//! host's `enable_prompt` command, which demotes the previous active prompt
//! as part of the same operation; the core never toggles two prompts
//! itself. Deleting the active prompt is refused before any host call.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::cache::ConfigCache;
use crate::domain::{Prompt, PromptSet, new_prompt_id};
use crate::forms::PromptForm;
use crate::ports::{CoreError, HostClient};
use crate::services::submit::SubmitGate;

pub struct PromptService {
    host: Arc<dyn HostClient>,
    cache: Arc<ConfigCache>,
    gate: SubmitGate,
}

impl PromptService {
    pub(crate) fn new(host: Arc<dyn HostClient>, cache: Arc<ConfigCache>) -> Self {
        Self {
            host,
            cache,
            gate: SubmitGate::new("prompt"),
        }
    }

    /// All stored prompts, keyed by id.
    pub async fn list(&self) -> Result<PromptSet, CoreError> {
        let host = Arc::clone(&self.host);
        let prompts = self
            .cache
            .prompts
            .get_or_fetch(|| {
                let host = Arc::clone(&host);
                async move { host.get_prompts().await }
            })
            .await?;
        Ok(prompts)
    }

    /// The currently active prompt, if any.
    pub async fn active(&self) -> Result<Option<Prompt>, CoreError> {
        Ok(self
            .list()
            .await?
            .into_values()
            .find(|prompt| prompt.enabled))
    }

    /// Validate and persist a prompt form.
    ///
    /// Upserts always persist disabled; only [`Self::activate`] flips a
    /// prompt on. An edit keeps the record's id and creation time.
    pub async fn submit(&self, form: &PromptForm, editing: Option<&str>) -> Result<String, CoreError> {
        let _token = self.gate.begin()?;
        let draft = form.validate()?;

        let now = Utc::now().timestamp_millis();
        let existing = match editing {
            Some(id) => self.list().await?.get(id).cloned(),
            None => None,
        };
        let prompt = match (editing, existing) {
            (Some(id), Some(existing)) => Prompt {
                id: id.to_string(),
                name: draft.name,
                description: draft.description,
                content: draft.content,
                enabled: false,
                created_at: existing.created_at,
                updated_at: Some(now),
            },
            // Editing token pointed at a record that no longer exists; the
            // host decides, same as any other not-found update.
            (Some(id), None) => Prompt {
                id: id.to_string(),
                name: draft.name,
                description: draft.description,
                content: draft.content,
                enabled: false,
                created_at: Some(now),
                updated_at: Some(now),
            },
            (None, _) => Prompt {
                id: new_prompt_id(now),
                name: draft.name,
                description: draft.description,
                content: draft.content,
                enabled: false,
                created_at: Some(now),
                updated_at: Some(now),
            },
        };

        self.host.upsert_prompt(&prompt).await?;
        self.cache.prompts.invalidate().await;
        debug!(prompt = %prompt.id, editing = editing.is_some(), "prompt saved");
        Ok(prompt.id)
    }

    /// Make the given prompt the single active one.
    pub async fn activate(&self, id: &str) -> Result<(), CoreError> {
        self.host.enable_prompt(id).await?;
        self.cache.prompts.invalidate().await;
        Ok(())
    }

    /// Delete a prompt. The active prompt cannot be deleted; deactivate it
    /// (by activating another) first.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        if let Some(prompt) = self.list().await?.get(id) {
            if prompt.enabled {
                return Err(CoreError::ActivePrompt(prompt.name.clone()));
            }
        }
        self.host.delete_prompt(id).await?;
        self.cache.prompts.invalidate().await;
        Ok(())
    }

    /// Import the host's current prompt file as a new, disabled prompt.
    /// Returns the new prompt's id.
    pub async fn import(&self) -> Result<String, CoreError> {
        let id = self.host.import_prompt_from_file().await?;
        self.cache.prompts.invalidate().await;
        Ok(id)
    }

    /// Current content of the host's prompt file, for previewing what an
    /// import would pick up. Always read fresh, never cached.
    pub async fn file_content(&self) -> Result<Option<String>, CoreError> {
        Ok(self.host.get_prompt_file_content().await?)
    }
}
