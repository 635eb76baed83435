//! Configuration domain model and synchronization core for Open-Switch.
//!
//! The core owns four concerns:
//!
//! - **Domain types** (`domain`): providers, credentials, MCP servers,
//!   prompts, and the aggregate host config, in the host's wire shape.
//! - **Forms** (`forms`): text-field drafts, their validation, and the
//!   bidirectional mapping between drafts and domain records.
//! - **Services** (`services`): mutation orchestration behind the
//!   [`ConfigCenter`] facade - sequencing, submit guarding, cache
//!   invalidation.
//! - **Cache** (`cache`): stale-while-revalidate slots over the host's
//!   collections.
//!
//! Persistence lives behind the [`HostClient`] port; the core never touches
//! storage itself.

#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod domain;
pub mod forms;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use cache::{ConfigCache, STALE_AFTER, Slot};
pub use domain::{
    AuthConfig, CONFIG_SCHEMA_URL, Credential, HostConfig, McpServer, McpServerKind, McpServerSet,
    McpTransport, Prompt, PromptSet, ProviderConfig, ProviderModel, ProviderOptions, SdkKind,
    StringMap, new_prompt_id,
};
pub use forms::{McpForm, ModelEntry, PromptDraft, PromptForm, ProviderForm, ValidationError};
pub use ports::{CoreError, HostClient, HostError};
pub use services::{
    ConfigCenter, CredentialOutcome, DeleteConfirm, DialogSession, InstructionService, McpService,
    PromptService, ProviderService, ProviderSubmitOutcome,
};
