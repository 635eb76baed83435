//! Provider and aggregate configuration types.
//!
//! Wire-compatible with the host's `opencode.json` / `auth.json` formats.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{McpServerSet, StringMap};

/// Schema URL written into freshly created aggregate configs.
pub const CONFIG_SCHEMA_URL: &str = "https://opencode.ai/config.json";

/// Supported SDK adapter packages for a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SdkKind {
    /// Generic OpenAI-compatible endpoint.
    #[default]
    #[serde(rename = "@ai-sdk/openai-compatible")]
    OpenAiCompatible,
    #[serde(rename = "@ai-sdk/openai")]
    OpenAi,
    #[serde(rename = "@ai-sdk/anthropic")]
    Anthropic,
    #[serde(rename = "@ai-sdk/google")]
    Google,
}

impl SdkKind {
    /// All selectable SDK kinds, in display order.
    pub const ALL: [Self; 4] = [
        Self::OpenAiCompatible,
        Self::OpenAi,
        Self::Anthropic,
        Self::Google,
    ];

    /// Human-readable label for selection lists.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "OpenAI Compatible",
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google",
        }
    }
}

/// A model entry under a provider.
///
/// The boolean capability flags are present on the wire only when `true`,
/// keeping stored configs minimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderModel {
    /// Display name (defaults to the model id when added from a form).
    pub name: String,

    /// Whether the model supports extended thinking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<bool>,

    /// Whether requests should set a prompt-cache key.
    #[serde(rename = "setCacheKey", default, skip_serializing_if = "Option::is_none")]
    pub set_cache_key: Option<bool>,
}

impl ProviderModel {
    /// Create a model entry with no capability flags set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thinking: None,
            set_cache_key: None,
        }
    }
}

/// Connection options for a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
    /// Endpoint base URL. Required and non-empty.
    #[serde(rename = "baseURL")]
    pub base_url: String,

    /// Legacy inline API key. The core never writes this field; credentials
    /// live in the separate auth collection. Kept so existing configs
    /// survive a read-modify-write cycle.
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Extra HTTP headers sent to the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<StringMap>,
}

/// A configured LLM provider.
///
/// The provider id is the key in [`HostConfig::provider`] and in the
/// credential collection; it is not repeated inside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// SDK adapter package.
    pub npm: SdkKind,

    /// Display name.
    pub name: String,

    /// Connection options.
    pub options: ProviderOptions,

    /// Models offered by this provider, in display order.
    #[serde(default)]
    pub models: IndexMap<String, ProviderModel>,
}

/// The host-owned aggregate configuration envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<Vec<String>>,

    /// Provider collection keyed by provider id.
    #[serde(default)]
    pub provider: IndexMap<String, ProviderConfig>,

    /// MCP server collection keyed by server name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp: Option<McpServerSet>,

    /// Instruction file paths, in priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            schema: Some(CONFIG_SCHEMA_URL.to_string()),
            plugin: None,
            provider: IndexMap::new(),
            mcp: None,
            instructions: None,
        }
    }
}

/// A stored API credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Credential kind; always `"api"` for keys written by this client.
    #[serde(rename = "type")]
    pub credential_type: String,

    /// The secret itself.
    pub key: String,
}

impl Credential {
    /// Create an API-key credential.
    pub fn api(key: impl Into<String>) -> Self {
        Self {
            credential_type: "api".to_string(),
            key: key.into(),
        }
    }
}

/// Credential collection keyed by provider id.
pub type AuthConfig = IndexMap<String, Credential>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_kind_wire_names() {
        let json = serde_json::to_string(&SdkKind::Anthropic).unwrap();
        assert_eq!(json, "\"@ai-sdk/anthropic\"");

        let parsed: SdkKind = serde_json::from_str("\"@ai-sdk/openai-compatible\"").unwrap();
        assert_eq!(parsed, SdkKind::OpenAiCompatible);
    }

    #[test]
    fn test_model_flags_omitted_when_unset() {
        let model = ProviderModel::new("gpt-4");
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "{\"name\":\"gpt-4\"}");
    }

    #[test]
    fn test_model_flags_present_when_true() {
        let model = ProviderModel {
            thinking: Some(true),
            ..ProviderModel::new("o1")
        };
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"thinking\":true"));
        assert!(!json.contains("setCacheKey"));
    }

    #[test]
    fn test_default_config_carries_schema() {
        let config = HostConfig::default();
        assert_eq!(config.schema.as_deref(), Some(CONFIG_SCHEMA_URL));
        assert!(config.provider.is_empty());
        assert!(config.mcp.is_none());
    }

    #[test]
    fn test_provider_round_trip_preserves_model_order() {
        let mut models = IndexMap::new();
        models.insert("b-model".to_string(), ProviderModel::new("b-model"));
        models.insert("a-model".to_string(), ProviderModel::new("a-model"));

        let provider = ProviderConfig {
            npm: SdkKind::OpenAi,
            name: "Test".to_string(),
            options: ProviderOptions {
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: None,
                headers: None,
            },
            models,
        };

        let json = serde_json::to_string(&provider).unwrap();
        let parsed: ProviderConfig = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = parsed.models.keys().cloned().collect();
        assert_eq!(keys, vec!["b-model", "a-model"]);
    }

    #[test]
    fn test_credential_api_kind() {
        let cred = Credential::api("sk-test");
        let json = serde_json::to_string(&cred).unwrap();
        assert_eq!(json, "{\"type\":\"api\",\"key\":\"sk-test\"}");
    }
}
