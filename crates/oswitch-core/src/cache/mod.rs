//! Local cache of remote host state.
//!
//! Four independent, named slots hold the latest successful fetch of each
//! collection. A slot is never hand-patched after a mutation: the
//! orchestrator invalidates it and the next read refetches, so the cache
//! cannot diverge from host state after a partial failure.
//!
//! Reads are stale-while-revalidate: while one task refetches a dirty or
//! aged slot, concurrent readers get the previous value instead of
//! blocking. Lists here are read-mostly, so a short staleness window is
//! acceptable.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::{AuthConfig, HostConfig, McpServerSet, PromptSet};
use crate::ports::HostError;

/// How old a slot value may get before a read triggers a refetch.
pub const STALE_AFTER: Duration = Duration::from_secs(60);

/// How many times a failed refetch of an already-populated slot is retried.
/// Mutations are never retried.
const REFETCH_RETRIES: u32 = 1;

struct SlotState<T> {
    value: Option<T>,
    fetched_at: Option<Instant>,
    /// Set by `invalidate`; forces the next read to refetch even if the
    /// value is fresh. The value is kept for stale reads in the meantime.
    dirty: bool,
}

/// One named, independently invalidated view of a remote collection.
pub struct Slot<T> {
    name: &'static str,
    state: RwLock<SlotState<T>>,
    refreshing: AtomicBool,
    stale_after: Duration,
}

impl<T: Clone> Slot<T> {
    /// Create an empty slot.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(SlotState {
                value: None,
                fetched_at: None,
                dirty: false,
            }),
            refreshing: AtomicBool::new(false),
            stale_after: STALE_AFTER,
        }
    }

    #[cfg(test)]
    fn with_stale_after(name: &'static str, stale_after: Duration) -> Self {
        Self {
            stale_after,
            ..Self::new(name)
        }
    }

    /// Mark the slot dirty. The held value stays available to concurrent
    /// readers until the next read replaces it.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.dirty = true;
        tracing::debug!(slot = self.name, "cache slot invalidated");
    }

    /// Return the slot value, fetching from the host when the slot is
    /// empty, dirty, or older than the staleness window.
    ///
    /// If another task is already refetching, a held value is returned
    /// as-is (stale-while-revalidate). A failed refetch of a slot that
    /// already held a value is retried once; a cold fetch failure
    /// propagates immediately.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<T, HostError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, HostError>>,
    {
        let had_value = {
            let state = self.state.read().await;
            let fresh = !state.dirty
                && state
                    .fetched_at
                    .is_some_and(|at| at.elapsed() < self.stale_after);
            if let Some(value) = &state.value {
                if fresh {
                    return Ok(value.clone());
                }
                // Stale or dirty: serve the old value while someone else
                // refreshes.
                if self.refreshing.load(Ordering::Acquire) {
                    return Ok(value.clone());
                }
            }
            state.value.is_some()
        };

        if self.refreshing.swap(true, Ordering::AcqRel) {
            // Lost the race to another refresher; fall back to whatever is
            // held rather than fetching twice.
            if let Some(value) = self.state.read().await.value.clone() {
                return Ok(value);
            }
        }

        let result = self.fetch_with_retry(&fetch, had_value).await;

        match result {
            Ok(value) => {
                let mut state = self.state.write().await;
                state.value = Some(value.clone());
                state.fetched_at = Some(Instant::now());
                state.dirty = false;
                self.refreshing.store(false, Ordering::Release);
                Ok(value)
            }
            Err(e) => {
                self.refreshing.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    async fn fetch_with_retry<F, Fut>(&self, fetch: &F, had_value: bool) -> Result<T, HostError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, HostError>>,
    {
        let mut attempts_left = if had_value { REFETCH_RETRIES } else { 0 };
        loop {
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(e) if attempts_left > 0 => {
                    attempts_left -= 1;
                    tracing::warn!(slot = self.name, error = %e, "refetch failed, retrying");
                }
                Err(e) => {
                    tracing::warn!(slot = self.name, error = %e, "fetch failed");
                    return Err(e);
                }
            }
        }
    }
}

/// The client's view of remote state, one slot per entity collection.
///
/// Slots are independent: invalidating or refetching one never touches the
/// others.
pub struct ConfigCache {
    pub config: Slot<HostConfig>,
    pub credentials: Slot<AuthConfig>,
    pub mcp: Slot<McpServerSet>,
    pub prompts: Slot<PromptSet>,
}

impl ConfigCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Slot::new("config"),
            credentials: Slot::new("credentials"),
            mcp: Slot::new("mcp"),
            prompts: Slot::new("prompts"),
        }
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}
