//! Test doubles shared by the provider's unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::source::{FetchError, RemoteTextSource};

/// In-memory source that counts fetches and fails for chosen keys.
#[derive(Default)]
pub struct FakeSource {
    pub texts: HashMap<String, String>,
    pub failing: HashSet<String>,
    pub fetches: AtomicUsize,
}

impl FakeSource {
    pub fn with_text(mut self, key: &str, text: &str) -> Self {
        self.texts.insert(key.to_string(), text.to_string());
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteTextSource for FakeSource {
    fn name(&self) -> &str {
        "fake-api"
    }

    async fn fetch(&self, key: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(key) {
            return Err(FetchError::Other("connection refused".to_string()));
        }
        Ok(self
            .texts
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("text of {key}")))
    }
}

/// Source whose fetch signals `started` and then waits for `release`.
#[derive(Default)]
pub struct GatedSource {
    pub started: Notify,
    pub release: Notify,
    pub fetches: AtomicUsize,
}

impl GatedSource {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteTextSource for GatedSource {
    fn name(&self) -> &str {
        "gated-api"
    }

    async fn fetch(&self, key: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(format!("text of {key}"))
    }
}
