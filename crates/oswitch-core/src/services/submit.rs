//! In-flight mutation guard.
//!
//! Each entity type runs at most one mutation at a time: the submit button
//! stays disabled for the duration of its own request. The lifecycle is
//! `Idle -> Submitting -> Idle`; success and failure both return to idle
//! when the guard drops, so there is no lingering terminal state to reset.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ports::CoreError;

/// One-at-a-time gate for an entity type's mutations.
#[derive(Debug)]
pub(crate) struct SubmitGate {
    entity: &'static str,
    busy: AtomicBool,
}

impl SubmitGate {
    pub(crate) const fn new(entity: &'static str) -> Self {
        Self {
            entity,
            busy: AtomicBool::new(false),
        }
    }

    /// Enter the submitting state, or fail if a mutation is already in
    /// flight. The returned token releases the gate on drop.
    pub(crate) fn begin(&self) -> Result<InFlight<'_>, CoreError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(CoreError::SubmitInFlight(self.entity));
        }
        Ok(InFlight { gate: self })
    }
}

/// Token for an in-flight mutation; dropping it returns the gate to idle.
#[derive(Debug)]
pub(crate) struct InFlight<'a> {
    gate: &'a SubmitGate,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_begin_rejected() {
        let gate = SubmitGate::new("provider");
        let token = gate.begin().unwrap();
        assert!(matches!(
            gate.begin().unwrap_err(),
            CoreError::SubmitInFlight("provider")
        ));
        drop(token);
        assert!(gate.begin().is_ok());
    }
}
