//! The quick verse data provider.
//!
//! Routes typed get/set calls through the [`ViewRegistry`] into the shared
//! [`ViewEngine`], and publishes the update instruction of every effective
//! write on the [`UpdateBus`].

use std::sync::Arc;

use tokio::sync::broadcast;

use super::engine::{EngineOptions, ViewEngine};
use super::error::ProviderResult;
use super::gate::VerseSetData;
use super::notify::{ProviderUpdate, UpdateBus, UpdateInstruction};
use super::registry::ViewRegistry;
use super::source::RemoteTextSource;
use super::views::{ChapterRef, DataType, Selector, SetValue};

/// Name the provider is registered under.
pub const QUICK_VERSE_PROVIDER: &str = "paranextExtensionTemplate.quickVerse";

/// Data provider over one verse cache with `Verse`, `Heresy`, and `Chapter`
/// data types.
pub struct QuickVerseProvider {
    engine: ViewEngine,
    registry: ViewRegistry,
}

impl QuickVerseProvider {
    /// Build the provider and validate its data type table.
    pub fn new(
        name: &str,
        source: Arc<dyn RemoteTextSource>,
        options: EngineOptions,
    ) -> ProviderResult<Self> {
        let registry = ViewRegistry::quick_verse(name)?;
        let engine = ViewEngine::new(source, UpdateBus::new(name), options);
        Ok(Self { engine, registry })
    }

    pub fn name(&self) -> &str {
        self.registry.provider()
    }

    pub fn data_types(&self) -> Vec<DataType> {
        self.registry.data_types().collect()
    }

    /// Read through any data type.
    pub async fn get(
        &self,
        data_type: DataType,
        selector: &Selector,
    ) -> ProviderResult<Option<String>> {
        let handlers = self.registry.handlers(data_type)?;
        (handlers.get)(&self.engine, selector).await
    }

    /// Write through any data type and notify subscribers of the result.
    pub async fn set(
        &self,
        data_type: DataType,
        selector: &Selector,
        value: SetValue,
    ) -> ProviderResult<UpdateInstruction> {
        let handlers = self.registry.handlers(data_type)?;
        let instruction = (handlers.set)(&self.engine, selector, value).await?;
        self.engine.updates().publish(instruction.clone());
        Ok(instruction)
    }

    pub async fn get_verse(&self, selector: &str) -> ProviderResult<Option<String>> {
        self.get(DataType::Verse, &Selector::from(selector)).await
    }

    pub async fn set_verse(
        &self,
        selector: &str,
        data: VerseSetData,
    ) -> ProviderResult<UpdateInstruction> {
        self.set(DataType::Verse, &Selector::from(selector), SetValue::Verse(data))
            .await
    }

    pub async fn get_heresy(&self, selector: &str) -> ProviderResult<Option<String>> {
        self.get(DataType::Heresy, &Selector::from(selector)).await
    }

    /// Change a verse, acknowledging that it overrides scripture.
    pub async fn set_heresy(
        &self,
        selector: &str,
        text: &str,
    ) -> ProviderResult<UpdateInstruction> {
        self.set(
            DataType::Heresy,
            &Selector::from(selector),
            SetValue::Heresy(text.to_string()),
        )
        .await
    }

    pub async fn get_chapter(&self, book: &str, chapter: u32) -> ProviderResult<Option<String>> {
        self.get(DataType::Chapter, &Selector::from(ChapterRef::new(book, chapter)))
            .await
    }

    /// Receive an update whenever cached text is populated or changed.
    pub fn subscribe(&self) -> broadcast::Receiver<ProviderUpdate> {
        self.engine.updates().subscribe()
    }

    pub async fn mutation_count(&self) -> u64 {
        self.engine.mutation_count().await
    }

    pub async fn latest(&self) -> String {
        self.engine.latest().await
    }
}
