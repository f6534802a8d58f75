//! Persisted counters.
//!
//! The provider only receives its starting mutation count and reports the
//! current one; this store keeps both counters across sessions in a JSON
//! file in the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuickVerseResult;

/// Counters that survive restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    /// Effective verse writes so far.
    pub mutation_count: u64,
    /// Invocations of the do-stuff command so far.
    pub do_stuff_count: u64,
}

/// JSON-file backed [`PersistedState`].
///
/// Writes go to disk only when the state actually changed.
pub struct StateStore {
    path: PathBuf,
    state: PersistedState,
    dirty: bool,
}

impl StateStore {
    /// Open the store in `dir`.
    ///
    /// A missing or corrupt file yields zeroed counters.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join("state.json");

        let state = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring corrupt state file"
                    );
                    PersistedState::default()
                }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read state file");
                    PersistedState::default()
                }
            }
        } else {
            PersistedState::default()
        };

        Self {
            path,
            state,
            dirty: false,
        }
    }

    pub fn state(&self) -> PersistedState {
        self.state
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the counters; marks the store dirty if anything changed.
    pub fn update(&mut self, state: PersistedState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }

    /// Write pending changes to disk.
    pub fn flush(&mut self) -> QuickVerseResult<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, contents)?;

        self.dirty = false;
        Ok(())
    }
}

impl Drop for StateStore {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}
