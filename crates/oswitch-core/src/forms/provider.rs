//! Provider form state and mapping.

use indexmap::IndexMap;

use super::{ValidationError, parse_string_map, string_map_to_text};
use crate::domain::{ProviderConfig, ProviderModel, ProviderOptions, SdkKind};

/// One row of the model list in the provider form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelEntry {
    /// Model id, used as the map key in the persisted record.
    pub id: String,
    /// Display name; forms fill this with the id when a model is added.
    pub name: String,
    pub thinking: bool,
    pub set_cache_key: bool,
}

impl ModelEntry {
    /// New entry named after its id, no capability flags.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            thinking: false,
            set_cache_key: false,
        }
    }
}

/// Editable state of the provider dialog.
///
/// `id` is immutable once a provider exists; edit flows keep the field
/// disabled and pass the stored id as the editing token instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderForm {
    pub id: String,
    pub sdk: SdkKind,
    pub display_name: String,
    pub base_url: String,
    /// Never pre-filled from a stored secret; empty means "leave unchanged".
    pub api_key: String,
    /// Raw JSON text for extra headers.
    pub headers_text: String,
    pub models: Vec<ModelEntry>,
}

impl ProviderForm {
    /// Validate the form and map it to a domain record.
    ///
    /// The credential is intentionally not part of the record; see
    /// [`Self::trimmed_api_key`].
    pub fn validate(&self) -> Result<ProviderConfig, ValidationError> {
        const ENTITY: &str = "provider";

        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField {
                entity: ENTITY,
                field: "id",
            });
        }
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                entity: ENTITY,
                field: "name",
            });
        }
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingField {
                entity: ENTITY,
                field: "baseURL",
            });
        }

        let headers = parse_string_map("headers", &self.headers_text)?;

        let mut models = IndexMap::new();
        for entry in &self.models {
            models.insert(
                entry.id.clone(),
                ProviderModel {
                    name: entry.name.clone(),
                    thinking: entry.thinking.then_some(true),
                    set_cache_key: entry.set_cache_key.then_some(true),
                },
            );
        }

        Ok(ProviderConfig {
            npm: self.sdk,
            name: self.display_name.trim().to_string(),
            options: ProviderOptions {
                base_url: self.base_url.trim().to_string(),
                api_key: None,
                headers,
            },
            models,
        })
    }

    /// Populate an edit form from a stored record.
    ///
    /// The API key field always starts empty; whether a credential exists is
    /// looked up separately and shown as an indicator.
    #[must_use]
    pub fn from_record(id: &str, record: &ProviderConfig) -> Self {
        let models = record
            .models
            .iter()
            .map(|(model_id, model)| ModelEntry {
                id: model_id.clone(),
                name: model.name.clone(),
                thinking: model.thinking.unwrap_or(false),
                set_cache_key: model.set_cache_key.unwrap_or(false),
            })
            .collect();

        Self {
            id: id.to_string(),
            sdk: record.npm,
            display_name: record.name.clone(),
            base_url: record.options.base_url.clone(),
            api_key: String::new(),
            headers_text: string_map_to_text(record.options.headers.as_ref()),
            models,
        }
    }

    /// The credential to write alongside the provider, if any.
    #[must_use]
    pub fn trimmed_api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// The provider id as it would be persisted.
    #[must_use]
    pub fn trimmed_id(&self) -> &str {
        self.id.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProviderForm {
        ProviderForm {
            id: "openai".to_string(),
            sdk: SdkKind::OpenAiCompatible,
            display_name: "OpenAI".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            headers_text: "{}".to_string(),
            models: vec![ModelEntry::new("gpt-4")],
        }
    }

    #[test]
    fn test_validate_maps_models_with_minimal_flags() {
        let record = filled_form().validate().unwrap();
        let model = &record.models["gpt-4"];
        assert_eq!(model.name, "gpt-4");
        // thinking=false / setCacheKey=false must not appear in the record
        assert_eq!(model.thinking, None);
        assert_eq!(model.set_cache_key, None);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["models"]["gpt-4"].get("thinking").is_none());
        assert!(json["models"]["gpt-4"].get("setCacheKey").is_none());
    }

    #[test]
    fn test_validate_requires_base_url() {
        let form = ProviderForm {
            base_url: "  ".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::MissingField {
                entity: "provider",
                field: "baseURL"
            }
        );
    }

    #[test]
    fn test_validate_requires_id_and_name() {
        let form = ProviderForm {
            id: String::new(),
            ..filled_form()
        };
        assert!(form.validate().is_err());

        let form = ProviderForm {
            display_name: String::new(),
            ..filled_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_headers() {
        let form = ProviderForm {
            headers_text: "not json".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::MalformedStructuredField { field: "headers", .. }
        ));
    }

    #[test]
    fn test_round_trip_edit_without_changes() {
        let mut form = filled_form();
        form.headers_text = r#"{"X-Org": "acme"}"#.to_string();
        form.models.push(ModelEntry {
            thinking: true,
            ..ModelEntry::new("o1")
        });
        let original = form.validate().unwrap();

        let reopened = ProviderForm::from_record("openai", &original);
        assert!(reopened.api_key.is_empty());
        assert_eq!(reopened.validate().unwrap(), original);
    }

    #[test]
    fn test_trimmed_api_key() {
        let mut form = filled_form();
        assert_eq!(form.trimmed_api_key(), None);
        form.api_key = "  sk-123  ".to_string();
        assert_eq!(form.trimmed_api_key(), Some("sk-123"));
    }
}
