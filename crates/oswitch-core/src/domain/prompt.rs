//! Reusable system-prompt records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named, reusable system prompt.
///
/// At most one prompt in the collection is enabled at a time; the host's
/// `enable_prompt` command enforces this by demoting the rest. Upserts
/// from the client always carry `enabled = false`; only the activate
/// action flips it on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Stable id, assigned at creation and preserved across edits.
    pub id: String,

    /// Display name. Non-empty.
    pub name: String,

    /// The prompt text itself. Non-empty.
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this is the active prompt.
    pub enabled: bool,

    /// Creation timestamp (Unix millis). Set once, never overwritten.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,

    /// Last-write timestamp (Unix millis). Set on every write.
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Prompt collection keyed by prompt id, in insertion order.
pub type PromptSet = IndexMap<String, Prompt>;

/// Generate the id for a newly created prompt.
#[must_use]
pub fn new_prompt_id(now_millis: i64) -> String {
    format!("prompt-{now_millis}")
}
