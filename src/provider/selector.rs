//! Selector canonicalization.
//!
//! Valid raw selectors:
//! - `"notify"` - subscription probe; carries no data and never mutates
//! - `"latest"` - alias for the most recently fetched or changed reference
//! - scripture references such as `"Romans 1:16"`, matched case-insensitively

/// Reserved selector used only to receive update notifications.
///
/// Matched literally on every data type of the provider.
pub const NOTIFY_SELECTOR: &str = "notify";

/// Alias resolved to the current [`LatestPointer`] target.
pub const LATEST_SELECTOR: &str = "latest";

/// Default target of the `"latest"` alias before any activity.
pub const DEFAULT_LATEST: &str = "john 11:35";

/// Whether a raw selector is the reserved notification channel.
pub fn is_notify(raw: &str) -> bool {
    raw == NOTIFY_SELECTOR
}

/// Whether a raw selector addresses the `"latest"` alias.
pub fn is_latest_alias(raw: &str) -> bool {
    raw.eq_ignore_ascii_case(LATEST_SELECTOR)
}

/// The canonical key most recently created or changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestPointer(String);

impl LatestPointer {
    /// Create a pointer at a bootstrap key (lower-cased).
    pub fn new(bootstrap: &str) -> Self {
        Self(bootstrap.to_lowercase())
    }

    pub fn get(&self) -> &str {
        &self.0
    }

    /// Move the pointer to `key` unless the caller addressed the alias itself.
    ///
    /// Returns whether the pointer was moved.
    pub fn advance(&mut self, raw: &str, key: &str) -> bool {
        if is_latest_alias(raw) {
            return false;
        }
        if self.0 != key {
            self.0 = key.to_string();
        }
        true
    }
}

impl Default for LatestPointer {
    fn default() -> Self {
        Self::new(DEFAULT_LATEST)
    }
}

/// Normalize a raw selector into a canonical cache key.
///
/// Not cacheable across writes: the result of `"latest"` depends on the
/// current pointer.
pub fn canonicalize(raw: &str, latest: &LatestPointer) -> String {
    let lowered = raw.to_lowercase();
    if lowered == LATEST_SELECTOR {
        latest.get().to_string()
    } else {
        lowered
    }
}
