//! Data type registry.
//!
//! A provider declares its data types up front. Each declared type is bound
//! to one pair of handlers, and the table is checked completely when it is
//! sealed: undeclared, duplicate, or missing handlers are wiring errors that
//! abort activation.

use std::collections::BTreeMap;

use super::error::{ProviderError, ProviderResult};
use super::views::{self, DataType, GetFn, SetFn};

/// Read/write handlers for one data type.
#[derive(Clone, Copy)]
pub struct ViewHandlers {
    pub get: GetFn,
    pub set: SetFn,
}

impl ViewHandlers {
    pub fn new(get: GetFn, set: SetFn) -> Self {
        Self { get, set }
    }
}

impl std::fmt::Debug for ViewHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewHandlers").finish_non_exhaustive()
    }
}

/// Registry under construction.
#[derive(Debug)]
pub struct ViewRegistryBuilder {
    provider: String,
    declared: Vec<DataType>,
    handlers: BTreeMap<DataType, ViewHandlers>,
}

impl ViewRegistryBuilder {
    /// Bind handlers to a declared data type.
    pub fn register(mut self, data_type: DataType, handlers: ViewHandlers) -> ProviderResult<Self> {
        if !self.declared.contains(&data_type) {
            return Err(ProviderError::UndeclaredDataType {
                provider: self.provider,
                data_type,
            });
        }
        if self.handlers.contains_key(&data_type) {
            return Err(ProviderError::DuplicateDataType {
                provider: self.provider,
                data_type,
            });
        }
        self.handlers.insert(data_type, handlers);
        Ok(self)
    }

    /// Finish registration; every declared data type must have handlers.
    pub fn seal(self) -> ProviderResult<ViewRegistry> {
        let missing: Vec<DataType> = self
            .declared
            .iter()
            .filter(|data_type| !self.handlers.contains_key(*data_type))
            .copied()
            .collect();

        if !missing.is_empty() {
            return Err(ProviderError::MissingHandlers {
                provider: self.provider,
                missing,
            });
        }

        Ok(ViewRegistry {
            provider: self.provider,
            handlers: self.handlers,
        })
    }
}

/// Sealed table from data type to handlers.
#[derive(Debug)]
pub struct ViewRegistry {
    provider: String,
    handlers: BTreeMap<DataType, ViewHandlers>,
}

impl ViewRegistry {
    /// Start a registry for a provider declaring `declared`.
    pub fn builder(provider: impl Into<String>, declared: &[DataType]) -> ViewRegistryBuilder {
        let mut declared = declared.to_vec();
        declared.sort();
        declared.dedup();
        ViewRegistryBuilder {
            provider: provider.into(),
            declared,
            handlers: BTreeMap::new(),
        }
    }

    /// The quick verse table: `Verse`, `Heresy`, and `Chapter`.
    pub fn quick_verse(provider: impl Into<String>) -> ProviderResult<Self> {
        Self::builder(provider, &DataType::ALL)
            .register(
                DataType::Verse,
                ViewHandlers::new(views::get_verse, views::set_verse),
            )?
            .register(
                DataType::Heresy,
                ViewHandlers::new(views::get_heresy, views::set_heresy),
            )?
            .register(
                DataType::Chapter,
                ViewHandlers::new(views::get_chapter, views::set_chapter),
            )?
            .seal()
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn handlers(&self, data_type: DataType) -> ProviderResult<ViewHandlers> {
        self.handlers
            .get(&data_type)
            .copied()
            .ok_or_else(|| ProviderError::UnknownDataType {
                provider: self.provider.clone(),
                data_type,
            })
    }

    pub fn data_types(&self) -> impl Iterator<Item = DataType> + '_ {
        self.handlers.keys().copied()
    }
}
