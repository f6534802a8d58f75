//! Update notifications.
//!
//! The provider decides *what* changed; delivery to subscribers goes through
//! a broadcast channel owned by the host.

use std::fmt;

use serde::Serialize;
use tokio::sync::broadcast;

use super::views::DataType;

/// Capacity of the update channel. Slow subscribers see `Lagged` and re-read.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Which data types of a provider must be refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UpdateInstruction {
    /// Nothing changed.
    Unchanged,
    /// Every data type of the provider.
    All,
    /// Only the listed data types.
    DataTypes(Vec<DataType>),
}

impl UpdateInstruction {
    /// Whether subscribers need to be told anything.
    pub fn is_update(&self) -> bool {
        match self {
            Self::Unchanged => false,
            Self::All => true,
            Self::DataTypes(types) => !types.is_empty(),
        }
    }

    /// Whether subscribers of `data_type` must re-read.
    pub fn affects(&self, data_type: DataType) -> bool {
        match self {
            Self::Unchanged => false,
            Self::All => true,
            Self::DataTypes(types) => types.contains(&data_type),
        }
    }
}

impl fmt::Display for UpdateInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "false"),
            Self::All => write!(f, "*"),
            Self::DataTypes(types) => {
                let names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

/// An update published for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUpdate {
    pub provider: String,
    pub instruction: UpdateInstruction,
}

/// Broadcast channel carrying [`ProviderUpdate`]s to subscribers.
#[derive(Debug, Clone)]
pub struct UpdateBus {
    provider: String,
    sender: broadcast::Sender<ProviderUpdate>,
}

impl UpdateBus {
    pub fn new(provider: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            provider: provider.into(),
            sender,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProviderUpdate> {
        self.sender.subscribe()
    }

    /// Publish an instruction. `Unchanged` is dropped.
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&self, instruction: UpdateInstruction) -> usize {
        if !instruction.is_update() {
            return 0;
        }
        tracing::debug!(provider = %self.provider, %instruction, "publishing update");
        // No subscribers is not an error
        self.sender
            .send(ProviderUpdate {
                provider: self.provider.clone(),
                instruction,
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_affects() {
        assert!(!UpdateInstruction::Unchanged.affects(DataType::Verse));
        assert!(UpdateInstruction::All.affects(DataType::Chapter));

        let only_verse = UpdateInstruction::DataTypes(vec![DataType::Verse]);
        assert!(only_verse.affects(DataType::Verse));
        assert!(!only_verse.affects(DataType::Heresy));
        assert!(!UpdateInstruction::DataTypes(Vec::new()).is_update());
    }

    #[tokio::test]
    async fn test_publish_reaches_subscribers() {
        let bus = UpdateBus::new("test.provider");
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(UpdateInstruction::All), 1);
        let update = rx.recv().await.unwrap();
        assert_eq!(update.provider, "test.provider");
        assert_eq!(update.instruction, UpdateInstruction::All);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = UpdateBus::new("test.provider");
        assert_eq!(bus.publish(UpdateInstruction::All), 0);
        assert_eq!(bus.publish(UpdateInstruction::Unchanged), 0);
    }
}
