use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{QuickVerseError, QuickVerseResult};
use crate::provider::{BibleApiConfig, EngineOptions, DEFAULT_WARNING, QUICK_VERSE_PROVIDER};
use crate::provider::selector::DEFAULT_LATEST;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub source: SourceConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Name the data provider is registered under.
    pub name: String,
    /// Target of the "latest" selector before anything is read or changed.
    pub bootstrap_latest: String,
    /// Word shown in the banner of changed verses.
    pub warning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub name: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory for persisted counters.
    pub data_dir: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: QUICK_VERSE_PROVIDER.to_string(),
            bootstrap_latest: DEFAULT_LATEST.to_string(),
            warning: DEFAULT_WARNING.to_string(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        let api = BibleApiConfig::default();
        Self {
            name: api.name,
            base_url: api.base_url,
            timeout_secs: api.timeout.as_secs(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("quickverse")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if it is
    /// missing or unreadable
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using default config");
                Self::default()
            }
        }
    }

    /// Load and validate config from a specific file
    pub fn load_from(path: &Path) -> QuickVerseResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Clamp values to acceptable ranges
    fn validate(&mut self) {
        self.source.timeout_secs = self.source.timeout_secs.clamp(1, 120);

        if self.provider.name.trim().is_empty() {
            self.provider.name = QUICK_VERSE_PROVIDER.to_string();
        }
        if self.provider.bootstrap_latest.trim().is_empty() {
            self.provider.bootstrap_latest = DEFAULT_LATEST.to_string();
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> QuickVerseResult<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> QuickVerseResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding persisted counters
    pub fn data_dir(&self) -> QuickVerseResult<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("quickverse"))
            .ok_or_else(|| QuickVerseError::Config("Could not find data directory".to_string()))
    }

    pub fn engine_options(&self, initial_mutation_count: u64) -> EngineOptions {
        EngineOptions {
            bootstrap_latest: self.provider.bootstrap_latest.clone(),
            warning: self.provider.warning.clone(),
            initial_mutation_count,
        }
    }

    pub fn source_config(&self) -> BibleApiConfig {
        BibleApiConfig {
            name: self.source.name.clone(),
            base_url: self.source.base_url.clone(),
            timeout: Duration::from_secs(self.source.timeout_secs),
        }
    }
}
