//! Mission definitions
//!
//! Missions are static configuration. Per-customer progress lives in the
//! server's reward ledger and references missions by id only.

use serde::{Deserialize, Serialize};

/// Which activity counter a mission measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    /// Number of non-cancelled orders placed
    OrdersPlaced,
    /// Number of distinct collectibles unlocked
    CollectiblesOwned,
    /// Largest item count in a single order
    ItemsInSingleOrder,
    /// At least one order containing a bulk container
    BulkOrderPlaced,
}

/// Mission definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u32,
    pub title: String,
    pub kind: MissionKind,
    /// Counter value that completes the mission
    pub target: u32,
    /// Reward discount, whole percent (0..=99)
    pub reward_percent: u8,
}

impl Mission {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        kind: MissionKind,
        target: u32,
        reward_percent: u8,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            target,
            reward_percent,
        }
    }
}
