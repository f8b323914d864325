//! Reward Ledger
//!
//! Per-customer mission progress over three monotonic sets:
//!
//! ```text
//! not-completed ──evaluate──▶ completed ──redeem──▶ redeemed ──consume──▶ used
//! ```
//!
//! `used ⊆ redeemed ⊆ completed` holds after every operation. Mutations only
//! happen through the methods below; persistence wraps them in a single
//! store transaction (see [`crate::rewards::RewardService`] and the order
//! manager's `create`).

use serde::{Deserialize, Serialize};
use shared::models::{Mission, MissionKind, Order, OrderLine, OrderStatus};
use std::collections::BTreeSet;
use thiserror::Error;

use super::missions::MissionCatalog;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Mission not found: {0}")]
    UnknownMission(u32),

    #[error("Mission {0} is not completed")]
    NotCompleted(u32),

    #[error("Mission {0} reward already redeemed")]
    AlreadyRedeemed(u32),

    #[error("Mission {0} reward is not redeemed")]
    NotRedeemed(u32),

    #[error("Mission {0} reward already used")]
    AlreadyUsed(u32),
}

/// Activity counters a mission can measure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerActivity {
    pub orders_placed: u32,
    pub collectibles_owned: u32,
    pub max_items_in_single_order: u32,
    pub bulk_order_placed: bool,
}

impl CustomerActivity {
    pub fn counter(&self, kind: MissionKind) -> u32 {
        match kind {
            MissionKind::OrdersPlaced => self.orders_placed,
            MissionKind::CollectiblesOwned => self.collectibles_owned,
            MissionKind::ItemsInSingleOrder => self.max_items_in_single_order,
            MissionKind::BulkOrderPlaced => u32::from(self.bulk_order_placed),
        }
    }

    pub fn satisfies(&self, mission: &Mission) -> bool {
        self.counter(mission.kind) >= mission.target
    }

    /// Recompute counters from a customer's order history
    ///
    /// Cancelled orders do not count.
    pub fn from_history<'a>(
        history: impl IntoIterator<Item = (&'a Order, &'a [OrderLine])>,
        collectibles_owned: u32,
    ) -> Self {
        let mut activity = Self {
            collectibles_owned,
            ..Default::default()
        };
        for (order, lines) in history {
            if order.status == OrderStatus::Cancelled {
                continue;
            }
            activity.orders_placed += 1;
            let items: u32 = lines.iter().map(|l| l.quantity).sum();
            activity.max_items_in_single_order = activity.max_items_in_single_order.max(items);
            if lines.iter().any(|l| l.category.is_bulk()) {
                activity.bulk_order_placed = true;
            }
        }
        activity
    }
}

/// A redeemed, unspent discount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOption {
    pub mission_id: u32,
    pub title: String,
    pub percent: u8,
}

/// Reward state of one customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRewardState {
    completed: BTreeSet<u32>,
    redeemed: BTreeSet<u32>,
    used: BTreeSet<u32>,
    collectibles: BTreeSet<String>,
}

impl UserRewardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> &BTreeSet<u32> {
        &self.completed
    }

    pub fn redeemed(&self) -> &BTreeSet<u32> {
        &self.redeemed
    }

    pub fn used(&self) -> &BTreeSet<u32> {
        &self.used
    }

    pub fn collectibles(&self) -> &BTreeSet<String> {
        &self.collectibles
    }

    /// `used ⊆ redeemed ⊆ completed`
    pub fn is_consistent(&self) -> bool {
        self.used.is_subset(&self.redeemed) && self.redeemed.is_subset(&self.completed)
    }

    /// Mark every mission whose target `activity` meets as completed
    ///
    /// Returns the ids completed by this call. Already-completed missions are
    /// left untouched, and nothing is ever un-completed.
    pub fn evaluate_completion(
        &mut self,
        missions: &MissionCatalog,
        activity: &CustomerActivity,
    ) -> Vec<u32> {
        missions
            .iter()
            .filter(|m| activity.satisfies(m))
            .filter_map(|m| self.completed.insert(m.id).then_some(m.id))
            .collect()
    }

    /// Convert a completed mission into a spendable discount
    pub fn redeem<'a>(
        &mut self,
        missions: &'a MissionCatalog,
        mission_id: u32,
    ) -> Result<&'a Mission, LedgerError> {
        let mission = missions
            .get(mission_id)
            .ok_or(LedgerError::UnknownMission(mission_id))?;
        if !self.completed.contains(&mission_id) {
            return Err(LedgerError::NotCompleted(mission_id));
        }
        if !self.redeemed.insert(mission_id) {
            return Err(LedgerError::AlreadyRedeemed(mission_id));
        }
        Ok(mission)
    }

    /// Redeemed but unused discounts, ordered by mission id
    ///
    /// Ids missing from `missions` are skipped.
    pub fn available_discounts(&self, missions: &MissionCatalog) -> Vec<DiscountOption> {
        self.redeemed
            .difference(&self.used)
            .filter_map(|id| missions.get(*id))
            .map(|m| DiscountOption {
                mission_id: m.id,
                title: m.title.clone(),
                percent: m.reward_percent,
            })
            .collect()
    }

    /// Spend a redeemed discount; succeeds at most once per mission
    ///
    /// On failure the state is unchanged.
    pub fn consume(&mut self, mission_id: u32) -> Result<(), LedgerError> {
        if !self.redeemed.contains(&mission_id) {
            return Err(LedgerError::NotRedeemed(mission_id));
        }
        if !self.used.insert(mission_id) {
            return Err(LedgerError::AlreadyUsed(mission_id));
        }
        Ok(())
    }

    /// Record an unlocked collectible; returns false if already owned
    pub fn unlock_collectible(&mut self, collectible_id: impl Into<String>) -> bool {
        self.collectibles.insert(collectible_id.into())
    }
}
