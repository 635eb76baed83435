//! Domain types for the host configuration.
//!
//! These are the persisted record shapes shared with the host collaborator.
//! They are pure data: wire-format concerns (field renames, skipped
//! optionals) live here, behavior lives in `forms` and `services`.

mod mcp;
mod prompt;
mod provider;

pub use mcp::{McpServer, McpServerKind, McpServerSet, McpTransport};
pub use prompt::{Prompt, PromptSet, new_prompt_id};
pub use provider::{
    AuthConfig, CONFIG_SCHEMA_URL, Credential, HostConfig, ProviderConfig, ProviderModel,
    ProviderOptions, SdkKind,
};

/// String-keyed string map used for headers and environment blocks.
///
/// `IndexMap` keeps the order the user entered, which is also the order the
/// host serializes.
pub type StringMap = indexmap::IndexMap<String, String>;
