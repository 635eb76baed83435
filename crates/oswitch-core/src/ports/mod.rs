//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure. They
//! contain no implementation details and use only domain types.

mod host;

pub use host::{HostClient, HostError};

use thiserror::Error;

use crate::forms::ValidationError;

/// Core error type for semantic domain errors.
///
/// This is the canonical error type services return. Adapters map it to
/// their own surface (toast message, CLI exit code, serialized dialog
/// error).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The form did not pass client-side validation; nothing was sent to
    /// the host.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The host collaborator rejected a command or was unreachable. The
    /// message is surfaced to the user verbatim.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Attempted to delete the currently active prompt.
    #[error("cannot delete the active prompt: {0}")]
    ActivePrompt(String),

    /// A mutation for this entity type is already in flight.
    #[error("a {0} mutation is already in flight")]
    SubmitInFlight(&'static str),
}
