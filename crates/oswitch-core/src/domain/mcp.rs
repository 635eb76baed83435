//! MCP server domain types.
//!
//! A server is either a local process (command + environment) or a remote
//! endpoint (URL + headers). The two variants are a tagged union so that
//! only the fields legal for a given `type` can exist; the wire format stays
//! flat for compatibility with the host config file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::StringMap;

/// Which kind of MCP server a record (or a form) describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpServerKind {
    /// Process spawned by the host.
    #[default]
    Local,
    /// External HTTP endpoint.
    Remote,
}

/// Transport-specific fields, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpTransport {
    Local {
        /// Command tokens, in execution order. Never empty for a valid record.
        command: Vec<String>,

        /// Environment variables for the spawned process.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        environment: Option<StringMap>,
    },
    Remote {
        /// Endpoint URL.
        url: String,

        /// Extra HTTP headers for the connection.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<StringMap>,
    },
}

impl McpTransport {
    /// The kind tag of this transport.
    #[must_use]
    pub const fn kind(&self) -> McpServerKind {
        match self {
            Self::Local { .. } => McpServerKind::Local,
            Self::Remote { .. } => McpServerKind::Remote,
        }
    }
}

/// A configured MCP server.
///
/// The server name is the key in the host's MCP collection; it is not
/// repeated inside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    /// Transport variant (`type` plus its legal fields).
    #[serde(flatten)]
    pub transport: McpTransport,

    /// Whether the host should use this server. Absent means enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Request timeout in milliseconds. Always positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl McpServer {
    /// Effective enabled state (absent defaults to true).
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        match self.enabled {
            Some(enabled) => enabled,
            None => true,
        }
    }

    /// The kind tag of this server.
    #[must_use]
    pub const fn kind(&self) -> McpServerKind {
        self.transport.kind()
    }
}

/// MCP server collection keyed by server name.
pub type McpServerSet = IndexMap<String, McpServer>;

#[cfg(test)]
mod tests {
    use super::*;

    fn local_server() -> McpServer {
        McpServer {
            transport: McpTransport::Local {
                command: vec!["npx".to_string(), "-y".to_string(), "@test/mcp".to_string()],
                environment: None,
            },
            enabled: Some(true),
            timeout: None,
        }
    }

    #[test]
    fn test_local_serializes_flat() {
        let json = serde_json::to_value(local_server()).unwrap();
        assert_eq!(json["type"], "local");
        assert_eq!(json["command"][0], "npx");
        assert_eq!(json["enabled"], true);
        assert!(json.get("timeout").is_none());
        assert!(json.get("url").is_none());
    }

    #[test]
    fn test_remote_round_trip() {
        let mut headers = StringMap::new();
        headers.insert("Authorization".to_string(), "Bearer x".to_string());
        let server = McpServer {
            transport: McpTransport::Remote {
                url: "https://mcp.example.com/sse".to_string(),
                headers: Some(headers),
            },
            enabled: None,
            timeout: Some(5000),
        };

        let json = serde_json::to_string(&server).unwrap();
        let parsed: McpServer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, server);
        assert_eq!(parsed.kind(), McpServerKind::Remote);
    }

    #[test]
    fn test_deserialize_flat_wire_format() {
        let json = r#"{"type":"local","command":["node","server.js"],"timeout":3000}"#;
        let server: McpServer = serde_json::from_str(json).unwrap();
        assert!(matches!(
            &server.transport,
            McpTransport::Local { command, .. } if command.len() == 2
        ));
        assert_eq!(server.timeout, Some(3000));
        assert!(server.is_enabled());
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let server = McpServer {
            enabled: None,
            ..local_server()
        };
        assert!(server.is_enabled());

        let disabled = McpServer {
            enabled: Some(false),
            ..local_server()
        };
        assert!(!disabled.is_enabled());
    }
}
