//! MCP server form state and mapping.

use super::{ValidationError, parse_optional_millis, parse_string_map, string_map_to_text};
use crate::domain::{McpServer, McpServerKind, McpTransport};

/// Editable state of the MCP server dialog.
///
/// The form carries the fields of both variants so the user can flip the
/// type selector without losing input, but only the selected variant's
/// fields reach the record on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpForm {
    /// Server name, the collection key. Immutable once the server exists.
    pub name: String,
    pub kind: McpServerKind,
    /// Newline-delimited command tokens (local).
    pub command_text: String,
    /// Raw JSON text for environment variables (local).
    pub environment_text: String,
    /// Endpoint URL (remote).
    pub url: String,
    /// Raw JSON text for headers (remote).
    pub headers_text: String,
    /// Timeout in milliseconds; empty means absent.
    pub timeout_text: String,
    pub enabled: bool,
}

impl Default for McpForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: McpServerKind::Local,
            command_text: String::new(),
            environment_text: String::new(),
            url: String::new(),
            headers_text: String::new(),
            timeout_text: String::new(),
            enabled: true,
        }
    }
}

impl McpForm {
    /// Validate the form and map it to a domain record.
    ///
    /// Only the fields of the selected variant are mapped; the other
    /// variant's text is discarded here, which is what makes a type switch
    /// during an edit drop the stale fields on submit.
    pub fn validate(&self) -> Result<McpServer, ValidationError> {
        const ENTITY: &str = "mcp server";

        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                entity: ENTITY,
                field: "name",
            });
        }

        let transport = match self.kind {
            McpServerKind::Local => {
                if self.command_text.trim().is_empty() {
                    return Err(ValidationError::MissingField {
                        entity: ENTITY,
                        field: "command",
                    });
                }
                McpTransport::Local {
                    command: split_command_lines(&self.command_text),
                    environment: parse_string_map("environment", &self.environment_text)?,
                }
            }
            McpServerKind::Remote => {
                if self.url.trim().is_empty() {
                    return Err(ValidationError::MissingField {
                        entity: ENTITY,
                        field: "url",
                    });
                }
                McpTransport::Remote {
                    url: self.url.trim().to_string(),
                    headers: parse_string_map("headers", &self.headers_text)?,
                }
            }
        };

        Ok(McpServer {
            transport,
            enabled: Some(self.enabled),
            timeout: parse_optional_millis("timeout", &self.timeout_text)?,
        })
    }

    /// Populate an edit form from a stored record.
    #[must_use]
    pub fn from_record(name: &str, record: &McpServer) -> Self {
        let mut form = Self {
            name: name.to_string(),
            kind: record.kind(),
            enabled: record.is_enabled(),
            timeout_text: record.timeout.map(|t| t.to_string()).unwrap_or_default(),
            ..Self::default()
        };
        match &record.transport {
            McpTransport::Local {
                command,
                environment,
            } => {
                form.command_text = command.join("\n");
                form.environment_text = string_map_to_text(environment.as_ref());
            }
            McpTransport::Remote { url, headers } => {
                form.url = url.clone();
                form.headers_text = string_map_to_text(headers.as_ref());
            }
        }
        form
    }

    /// The server name as it would be persisted.
    #[must_use]
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

/// Split newline-delimited command text into ordered tokens, trimming each
/// line and dropping empty ones.
fn split_command_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_form() -> McpForm {
        McpForm {
            name: "files".to_string(),
            command_text: "npx\n-y\n@modelcontextprotocol/server-filesystem\n".to_string(),
            ..McpForm::default()
        }
    }

    #[test]
    fn test_command_split_preserves_order_and_drops_blanks() {
        assert_eq!(
            split_command_lines("npx\n\n  -y  \n@scope/pkg\n"),
            vec!["npx", "-y", "@scope/pkg"]
        );
    }

    #[test]
    fn test_validate_local() {
        let record = local_form().validate().unwrap();
        assert!(matches!(
            &record.transport,
            McpTransport::Local { command, environment: None } if command.len() == 3
        ));
        assert_eq!(record.enabled, Some(true));
        assert_eq!(record.timeout, None);
    }

    #[test]
    fn test_validate_local_requires_command() {
        let form = McpForm {
            command_text: "   \n  ".to_string(),
            ..local_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::MissingField {
                entity: "mcp server",
                field: "command"
            }
        );
    }

    #[test]
    fn test_validate_remote_requires_url() {
        let form = McpForm {
            kind: McpServerKind::Remote,
            ..local_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::MissingField {
                entity: "mcp server",
                field: "url"
            }
        );
    }

    #[test]
    fn test_type_switch_discards_other_variant() {
        // A form populated from a local record, then switched to remote,
        // must not leak command/environment into the new record.
        let mut form = local_form();
        form.environment_text = r#"{"TOKEN":"t"}"#.to_string();
        form.kind = McpServerKind::Remote;
        form.url = "https://mcp.example.com".to_string();

        let record = form.validate().unwrap();
        assert!(matches!(
            record.transport,
            McpTransport::Remote { ref url, headers: None } if url == "https://mcp.example.com"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_timeout() {
        let form = McpForm {
            timeout_text: "soon".to_string(),
            ..local_form()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidNumber { field: "timeout", .. }
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_environment() {
        let form = McpForm {
            environment_text: "PATH=/usr/bin".to_string(),
            ..local_form()
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::MalformedStructuredField { field: "environment", .. }
        ));
    }

    #[test]
    fn test_round_trip_edit_without_changes() {
        let mut form = local_form();
        form.environment_text = r#"{"TOKEN": "abc"}"#.to_string();
        form.timeout_text = "8000".to_string();
        let original = form.validate().unwrap();

        let reopened = McpForm::from_record("files", &original);
        assert_eq!(reopened.validate().unwrap(), original);
    }

    #[test]
    fn test_round_trip_remote() {
        let form = McpForm {
            name: "search".to_string(),
            kind: McpServerKind::Remote,
            url: "https://mcp.example.com/sse".to_string(),
            headers_text: r#"{"Authorization": "Bearer k"}"#.to_string(),
            enabled: false,
            ..McpForm::default()
        };
        let original = form.validate().unwrap();
        let reopened = McpForm::from_record("search", &original);
        assert_eq!(reopened.enabled, false);
        assert_eq!(reopened.validate().unwrap(), original);
    }
}
