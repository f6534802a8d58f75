//! The view engine: one verse cache shared by every data type.
//!
//! Reads canonicalize the selector, serve from the cache, and on a miss
//! fetch from the [`RemoteTextSource`]. Writes pass the [`authorize`] gate,
//! replace the cached text, and bump the mutation counter. The engine lock is
//! never held across a fetch, so two reads of the same uncached key may both
//! fetch; the later completion wins unless a write got there first.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::cache::{Entry, EntryCache};
use super::decorate::{render, DEFAULT_WARNING};
use super::gate::{authorize, GateDecision, VerseSetData};
use super::notify::{UpdateBus, UpdateInstruction};
use super::selector::{canonicalize, is_notify, LatestPointer, DEFAULT_LATEST};
use super::source::RemoteTextSource;

/// Start-up parameters for a [`ViewEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Initial target of the `"latest"` alias.
    pub bootstrap_latest: String,

    /// Word shown in the banner of changed verses.
    pub warning: String,

    /// Mutation counter restored by the host.
    pub initial_mutation_count: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bootstrap_latest: DEFAULT_LATEST.to_string(),
            warning: DEFAULT_WARNING.to_string(),
            initial_mutation_count: 0,
        }
    }
}

#[derive(Debug)]
struct EngineState {
    cache: EntryCache,
    latest: LatestPointer,
    mutation_count: u64,
}

/// Owner of the verse cache, the `"latest"` pointer, and the mutation counter.
pub struct ViewEngine {
    state: Mutex<EngineState>,
    source: Arc<dyn RemoteTextSource>,
    updates: UpdateBus,
    warning: String,
}

impl ViewEngine {
    pub fn new(
        source: Arc<dyn RemoteTextSource>,
        updates: UpdateBus,
        options: EngineOptions,
    ) -> Self {
        Self {
            state: Mutex::new(EngineState {
                cache: EntryCache::new(),
                latest: LatestPointer::new(&options.bootstrap_latest),
                mutation_count: options.initial_mutation_count,
            }),
            source,
            updates,
            warning: options.warning,
        }
    }

    /// Read the text for a raw selector.
    ///
    /// Returns `None` only for the `"notify"` probe. Fetch failures produce
    /// placeholder text that is not cached, so the next read retries.
    pub async fn get(&self, raw: &str) -> Option<String> {
        if is_notify(raw) {
            return None;
        }

        let key = {
            let state = self.state.lock().await;
            let key = canonicalize(raw, &state.latest);
            if let Some(entry) = state.cache.get(&key) {
                tracing::debug!(%key, "verse cache hit");
                return Some(render(entry, &self.warning, state.mutation_count));
            }
            key
        };

        tracing::debug!(%key, source = self.source.name(), "verse cache miss, fetching");
        match self.source.fetch(&key).await {
            Ok(text) => {
                let rendered = {
                    let mut state = self.state.lock().await;
                    let count = state.mutation_count;
                    let rendered = render(
                        state.cache.populate(key.clone(), text),
                        &self.warning,
                        count,
                    );
                    state.latest.advance(raw, &key);
                    rendered
                };
                self.updates.publish(UpdateInstruction::All);
                Some(rendered)
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to fetch verse");
                Some(format!(
                    "Failed to fetch {} from {}! Reason: {}",
                    key,
                    self.source.name(),
                    e
                ))
            }
        }
    }

    /// Apply a write through a raw selector.
    ///
    /// Returns [`UpdateInstruction::All`] for an effective write, since every
    /// data type projects the same entry, and `Unchanged` otherwise. Publishing
    /// the instruction is left to the caller.
    pub async fn set(&self, raw: &str, payload: VerseSetData) -> UpdateInstruction {
        if is_notify(raw) {
            return UpdateInstruction::Unchanged;
        }

        let mut state = self.state.lock().await;
        let key = canonicalize(raw, &state.latest);

        let text = match authorize(raw, payload, state.cache.get(&key)) {
            GateDecision::Change(text) => text,
            GateDecision::Rejected(reason) => {
                tracing::debug!(%key, ?reason, "write rejected");
                return UpdateInstruction::Unchanged;
            }
        };

        state.cache.put(key.clone(), Entry::mutated(text));
        state.latest.advance(raw, &key);
        state.mutation_count = state.mutation_count.saturating_add(1);
        tracing::info!(%key, mutation_count = state.mutation_count, "verse changed");

        UpdateInstruction::All
    }

    /// Current mutation counter, for the host to persist.
    pub async fn mutation_count(&self) -> u64 {
        self.state.lock().await.mutation_count
    }

    /// Current target of the `"latest"` alias.
    pub async fn latest(&self) -> String {
        self.state.lock().await.latest.get().to_string()
    }

    pub async fn cached_count(&self) -> usize {
        self.state.lock().await.cache.len()
    }

    pub fn updates(&self) -> &UpdateBus {
        &self.updates
    }
}
