//! Provider orchestration.
//!
//! A provider submit is a compound write: the provider record goes into the
//! aggregate config, the API key (if entered) goes to the separate
//! credential store. The credential is only attempted after the provider
//! write succeeded, and a credential failure is reported on its own — the
//! provider stays saved, there is no rollback.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::cache::ConfigCache;
use crate::domain::{HostConfig, ProviderConfig};
use crate::forms::ProviderForm;
use crate::ports::{CoreError, HostClient, HostError};
use crate::services::submit::SubmitGate;

/// What happened to the credential half of a provider submit.
#[derive(Debug)]
pub enum CredentialOutcome {
    /// The form's API key field was empty; no credential command was sent.
    NotRequested,
    /// The credential was stored.
    Saved,
    /// The provider was saved but the credential command failed.
    Failed(HostError),
}

/// Result of a successful provider submit.
#[derive(Debug)]
pub struct ProviderSubmitOutcome {
    /// Id the record was written under.
    pub id: String,
    pub credential: CredentialOutcome,
}

pub struct ProviderService {
    host: Arc<dyn HostClient>,
    cache: Arc<ConfigCache>,
    gate: SubmitGate,
}

impl ProviderService {
    pub(crate) fn new(host: Arc<dyn HostClient>, cache: Arc<ConfigCache>) -> Self {
        Self {
            host,
            cache,
            gate: SubmitGate::new("provider"),
        }
    }

    /// Current aggregate config, from cache when fresh.
    pub async fn config(&self) -> Result<HostConfig, CoreError> {
        let host = Arc::clone(&self.host);
        let config = self
            .cache
            .config
            .get_or_fetch(|| {
                let host = Arc::clone(&host);
                async move { host.get_config().await }
            })
            .await?;
        Ok(config)
    }

    /// Configured providers, keyed by id.
    pub async fn list(&self) -> Result<IndexMap<String, ProviderConfig>, CoreError> {
        Ok(self.config().await?.provider)
    }

    /// Whether a credential is stored for the given provider id.
    ///
    /// Computed by lookup against the credential collection; never derived
    /// from the provider record itself.
    pub async fn credential_configured(&self, id: &str) -> Result<bool, CoreError> {
        let host = Arc::clone(&self.host);
        let credentials = self
            .cache
            .credentials
            .get_or_fetch(|| {
                let host = Arc::clone(&host);
                async move { host.get_credentials().await }
            })
            .await?;
        Ok(credentials.contains_key(id))
    }

    /// Validate and persist a provider form.
    ///
    /// `editing` carries the id of the record being edited; `None` creates
    /// a new record under the form's id field. The id is never taken from
    /// the form in edit mode.
    pub async fn submit(
        &self,
        form: &ProviderForm,
        editing: Option<&str>,
    ) -> Result<ProviderSubmitOutcome, CoreError> {
        let _token = self.gate.begin()?;
        let record = form.validate()?;

        let id = editing.unwrap_or_else(|| form.trimmed_id()).to_string();
        match editing {
            Some(_) => self.host.update_provider(&id, &record).await?,
            None => self.host.add_provider(&id, &record).await?,
        }
        self.cache.config.invalidate().await;
        debug!(provider = %id, editing = editing.is_some(), "provider saved");

        let credential = match form.trimmed_api_key() {
            None => CredentialOutcome::NotRequested,
            Some(key) => match self.host.set_credential(&id, key).await {
                Ok(()) => {
                    self.cache.credentials.invalidate().await;
                    CredentialOutcome::Saved
                }
                Err(e) => {
                    warn!(provider = %id, error = %e, "credential save failed after provider save");
                    CredentialOutcome::Failed(e)
                }
            },
        };

        Ok(ProviderSubmitOutcome { id, credential })
    }

    /// Delete a provider and, if one is stored, its credential.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.host.delete_provider(id).await?;
        self.cache.config.invalidate().await;

        // The credential store is independent; a leftover key is cleaned up
        // but a missing one is not an error.
        match self.host.delete_credential(id).await {
            Ok(()) => self.cache.credentials.invalidate().await,
            Err(HostError::NotFound(_)) => {}
            Err(e) => warn!(provider = %id, error = %e, "credential cleanup failed"),
        }
        Ok(())
    }

    /// Remove only the stored credential, keeping the provider.
    pub async fn delete_credential(&self, id: &str) -> Result<(), CoreError> {
        self.host.delete_credential(id).await?;
        self.cache.credentials.invalidate().await;
        Ok(())
    }
}
