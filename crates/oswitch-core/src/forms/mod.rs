//! Form state and the form↔domain mapper.
//!
//! Each entity type has a form struct of raw text/boolean fields mirroring
//! what the user edits, a pure `validate()` that either produces a domain
//! record or a typed [`ValidationError`], and a `from_record()` that
//! populates an edit form from a stored record. Populating a form from a
//! record and re-submitting it unchanged yields a record equal to the
//! original, except for the credential field which is never pre-filled.

mod mcp;
mod prompt;
mod provider;

pub use mcp::McpForm;
pub use prompt::{PromptDraft, PromptForm};
pub use provider::{ModelEntry, ProviderForm};

use thiserror::Error;

use crate::domain::StringMap;

/// A user-fixable reason a form cannot be submitted.
///
/// Validation runs entirely client-side; no host call is made for a form
/// that fails, and no state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{entity}: {field} is required")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A structured-text field (headers, environment) is not a JSON object
    /// of string values.
    #[error("{field} must be a JSON object of string values: {detail}")]
    MalformedStructuredField {
        field: &'static str,
        detail: String,
    },

    /// A numeric text field holds something other than a positive base-10
    /// integer.
    #[error("{field} must be a positive integer, got {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
    },
}

/// Parse a structured-text field edited as raw JSON.
///
/// Empty (or whitespace-only) text means the field is absent. Anything else
/// must parse as a string-keyed string map; a parse failure is a
/// [`ValidationError::MalformedStructuredField`], never a silent empty map.
pub(crate) fn parse_string_map(
    field: &'static str,
    text: &str,
) -> Result<Option<StringMap>, ValidationError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<StringMap>(text)
        .map(Some)
        .map_err(|e| ValidationError::MalformedStructuredField {
            field,
            detail: e.to_string(),
        })
}

/// Render a structured field back to editable JSON text.
pub(crate) fn string_map_to_text(map: Option<&StringMap>) -> String {
    map.map_or_else(String::new, |m| {
        serde_json::to_string_pretty(m).unwrap_or_default()
    })
}

/// Parse an optional positive-integer text field (e.g. a timeout in
/// milliseconds). Empty text means absent; non-numeric or zero input is
/// rejected before submission rather than coerced.
pub(crate) fn parse_optional_millis(
    field: &'static str,
    text: &str,
) -> Result<Option<u64>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u64>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        }),
    }
}
