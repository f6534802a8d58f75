//! Host commands registered by the extension.
//!
//! `extensionTemplate.doStuff` keeps its own invocation counter, unrelated
//! to the provider's mutation counter, and announces every invocation on a
//! broadcast channel.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::broadcast;

/// Name the command is registered under.
pub const DO_STUFF_COMMAND: &str = "extensionTemplate.doStuff";

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Reply to one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoStuffResponse {
    pub response: String,
    pub occurrence: u64,
}

/// Event emitted after each invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoStuffEvent {
    /// How many times the command has run.
    pub count: u64,
}

pub struct DoStuffCommand {
    count: AtomicU64,
    events: broadcast::Sender<DoStuffEvent>,
}

impl DoStuffCommand {
    /// Create the command with a count restored by the host.
    pub fn new(initial_count: u64) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            count: AtomicU64::new(initial_count),
            events,
        }
    }

    pub fn handle(&self, message: &str) -> DoStuffResponse {
        let previous = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                Some(count.saturating_add(1))
            })
            .unwrap_or_else(|count| count);
        let occurrence = previous.saturating_add(1);
        tracing::debug!(command = DO_STUFF_COMMAND, occurrence, "command invoked");

        // No listeners is fine
        let _ = self.events.send(DoStuffEvent { count: occurrence });

        DoStuffResponse {
            response: format!("The template did stuff! {message}"),
            occurrence,
        }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DoStuffEvent> {
        self.events.subscribe()
    }
}
