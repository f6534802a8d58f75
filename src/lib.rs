//! quickverse - multi-view scripture text data provider.
//!
//! One cache of verse text, fetched on demand from a remote source, is
//! exposed through several typed data types. Writes are gated, counted, and
//! announced to subscribers of every data type.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`provider`] - The data provider: selectors, cache, write gate, views
//! - [`host`] - Extension activation, wiring, and deactivation
//! - [`commands`] - Host commands registered by the extension
//! - [`state`] - Persisted counters
//! - [`config`] - Configuration loading and management
//! - [`cli`] - Command-line front end
//!
//! # Example
//!
//! ```ignore
//! use quickverse::{Config, ExtensionHost};
//!
//! let config = Config::load();
//! let host = ExtensionHost::activate(&config)?;
//!
//! let text = host.provider().get_verse("latest").await?;
//! host.provider().set_heresy("Romans 1:16", "Heretical text").await?;
//! host.deactivate().await?;
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod host;
pub mod provider;
pub mod state;

mod error;

pub use config::Config;
pub use error::{QuickVerseError, QuickVerseResult};
pub use host::ExtensionHost;
pub use provider::{DataType, QuickVerseProvider, UpdateInstruction, VerseSetData};
