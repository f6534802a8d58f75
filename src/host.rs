//! Extension host - owns everything the extension registers.
//!
//! The ExtensionHost is responsible for:
//! - Restoring persisted counters
//! - Building and validating the quick verse data provider
//! - Registering the do-stuff command
//! - Persisting counters on deactivation

use std::sync::Arc;

use crate::commands::DoStuffCommand;
use crate::config::Config;
use crate::error::QuickVerseResult;
use crate::provider::{BibleApiSource, QuickVerseProvider, RemoteTextSource};
use crate::state::{PersistedState, StateStore};

/// The activated extension.
pub struct ExtensionHost {
    provider: QuickVerseProvider,
    command: DoStuffCommand,
    store: StateStore,
}

impl std::fmt::Debug for ExtensionHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionHost")
            .field("provider", &self.provider.name())
            .field("state_path", &self.store.path())
            .finish()
    }
}

impl ExtensionHost {
    /// Activate against the configured remote source.
    pub fn activate(config: &Config) -> QuickVerseResult<Self> {
        let source = BibleApiSource::new(config.source_config())?;
        Self::activate_with_source(config, Arc::new(source))
    }

    /// Activate against an explicit source.
    ///
    /// Fails only if the provider's data types are wired incorrectly or the
    /// data directory cannot be determined.
    pub fn activate_with_source(
        config: &Config,
        source: Arc<dyn RemoteTextSource>,
    ) -> QuickVerseResult<Self> {
        tracing::info!("Extension template is activating!");

        let store = StateStore::open(&config.data_dir()?);
        let restored = store.state();

        let provider = QuickVerseProvider::new(
            &config.provider.name,
            source,
            config.engine_options(restored.mutation_count),
        )?;
        let command = DoStuffCommand::new(restored.do_stuff_count);

        tracing::info!(
            provider = provider.name(),
            mutation_count = restored.mutation_count,
            "Extension template is finished activating!"
        );

        Ok(Self {
            provider,
            command,
            store,
        })
    }

    pub fn provider(&self) -> &QuickVerseProvider {
        &self.provider
    }

    pub fn command(&self) -> &DoStuffCommand {
        &self.command
    }

    /// Current counters as they would be persisted.
    pub async fn snapshot(&self) -> PersistedState {
        PersistedState {
            mutation_count: self.provider.mutation_count().await,
            do_stuff_count: self.command.count(),
        }
    }

    /// Write the current counters to the state file.
    pub async fn persist(&mut self) -> QuickVerseResult<()> {
        let snapshot = self.snapshot().await;
        self.store.update(snapshot);
        self.store.flush()
    }

    /// Persist counters and release everything the extension registered.
    pub async fn deactivate(mut self) -> QuickVerseResult<()> {
        tracing::info!("Extension template is deactivating!");
        self.persist().await
    }
}
