//! Prompt form state and mapping.

use super::ValidationError;
use crate::domain::Prompt;

/// Editable state of the prompt dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub name: String,
    pub description: String,
    pub content: String,
}

/// A validated prompt body with no identity yet.
///
/// The orchestrator attaches the id and timestamps: a fresh
/// `prompt-{millis}` id on create, the existing id (and `createdAt`) on
/// edit. Drafts always persist as disabled; activation is a separate
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDraft {
    pub name: String,
    pub description: Option<String>,
    pub content: String,
}

impl PromptForm {
    /// Validate the form and map it to a draft.
    pub fn validate(&self) -> Result<PromptDraft, ValidationError> {
        const ENTITY: &str = "prompt";

        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                entity: ENTITY,
                field: "name",
            });
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingField {
                entity: ENTITY,
                field: "content",
            });
        }

        let description = self.description.trim();
        Ok(PromptDraft {
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            // Content is stored verbatim; only the emptiness check trims.
            content: self.content.clone(),
        })
    }

    /// Populate an edit form from a stored record.
    #[must_use]
    pub fn from_record(record: &Prompt) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            content: record.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_and_content() {
        let form = PromptForm {
            name: "  ".to_string(),
            content: "text".to_string(),
            ..PromptForm::default()
        };
        assert!(form.validate().is_err());

        let form = PromptForm {
            name: "Reviewer".to_string(),
            content: " \n ".to_string(),
            ..PromptForm::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::MissingField {
                entity: "prompt",
                field: "content"
            }
        );
    }

    #[test]
    fn test_validate_keeps_content_verbatim() {
        let form = PromptForm {
            name: " Reviewer ".to_string(),
            description: String::new(),
            content: "  indented\nlines\n".to_string(),
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "Reviewer");
        assert_eq!(draft.description, None);
        assert_eq!(draft.content, "  indented\nlines\n");
    }

    #[test]
    fn test_round_trip_edit() {
        let record = Prompt {
            id: "prompt-1".to_string(),
            name: "Reviewer".to_string(),
            content: "Be thorough.".to_string(),
            description: Some("Code review".to_string()),
            enabled: true,
            created_at: Some(1),
            updated_at: Some(2),
        };
        let form = PromptForm::from_record(&record);
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, record.name);
        assert_eq!(draft.description, record.description);
        assert_eq!(draft.content, record.content);
    }
}
