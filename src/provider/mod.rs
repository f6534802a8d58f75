//! Quick verse data provider.
//!
//! Several typed data types read and write one verse cache.
//!
//! # Architecture
//!
//! ```text
//! QuickVerseProvider
//! ├── registry: ViewRegistry (DataType -> get/set handlers)
//! └── engine: ViewEngine
//!     ├── cache: EntryCache (canonical key -> { text, mutated })
//!     ├── latest: LatestPointer
//!     ├── mutation_count: u64
//!     ├── source: Arc<dyn RemoteTextSource>
//!     └── updates: UpdateBus
//! ```
//!
//! Reads fetch on a cache miss and fall back to placeholder text when the
//! source fails. Writes must pass the gate in [`gate`]; an effective write
//! invalidates every data type because they all project the same entry.

mod cache;
mod data_provider;
mod decorate;
mod engine;
mod error;
mod gate;
mod notify;
mod registry;
pub mod selector;
mod source;
#[cfg(test)]
pub(crate) mod testing;
mod views;

pub use cache::{Entry, EntryCache};
pub use data_provider::{QuickVerseProvider, QUICK_VERSE_PROVIDER};
pub use decorate::DEFAULT_WARNING;
pub use engine::{EngineOptions, ViewEngine};
pub use error::{ProviderError, ProviderResult};
pub use gate::{authorize, GateDecision, Rejection, VerseSetData};
pub use notify::{ProviderUpdate, UpdateBus, UpdateInstruction};
pub use registry::{ViewHandlers, ViewRegistry, ViewRegistryBuilder};
pub use source::{BibleApiConfig, BibleApiSource, FetchError, RemoteTextSource};
pub use views::{ChapterRef, DataType, GetFn, Selector, SetFn, SetValue, ViewFuture};
