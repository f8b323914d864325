//! Persistent reward operations
//!
//! Each call loads the customer's [`UserRewardState`], applies one ledger
//! operation and writes it back inside a single redb write transaction.

use redb::WriteTransaction;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Mission;
use std::sync::Arc;
use thiserror::Error;

use super::ledger::{CustomerActivity, DiscountOption, LedgerError, UserRewardState};
use super::missions::MissionCatalog;
use crate::orders::storage::{OrderStorage, StorageError, StorageResult};

#[derive(Debug, Error)]
pub enum RewardError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<RewardError> for AppError {
    fn from(err: RewardError) -> Self {
        match err {
            RewardError::Storage(e) => e.into(),
            RewardError::Ledger(e) => {
                let (code, id) = match e {
                    LedgerError::UnknownMission(id) => (ErrorCode::MissionNotFound, id),
                    LedgerError::NotCompleted(id) => (ErrorCode::MissionNotCompleted, id),
                    LedgerError::AlreadyRedeemed(id) => (ErrorCode::RewardAlreadyRedeemed, id),
                    LedgerError::NotRedeemed(id) => (ErrorCode::RewardNotRedeemed, id),
                    LedgerError::AlreadyUsed(id) => (ErrorCode::RewardAlreadyUsed, id),
                };
                AppError::with_message(code, e.to_string()).with_detail("mission_id", id)
            }
        }
    }
}

pub type RewardResult<T> = Result<T, RewardError>;

/// Reward state as shown to the customer
#[derive(Debug, Clone, Serialize)]
pub struct RewardView {
    pub customer_id: String,
    pub state: UserRewardState,
    pub available_discounts: Vec<DiscountOption>,
}

/// Recompute a customer's activity inside `txn`
///
/// Reads the customer's order history and lines through the same
/// transaction, so an order written earlier in `txn` is counted.
pub fn activity_txn(
    storage: &OrderStorage,
    txn: &WriteTransaction,
    customer_id: &str,
    state: &UserRewardState,
) -> StorageResult<CustomerActivity> {
    let orders = storage.get_customer_orders_txn(txn, customer_id)?;
    let mut history = Vec::with_capacity(orders.len());
    for order in orders {
        let lines = storage.get_lines_txn(txn, &order.id)?;
        history.push((order, lines));
    }
    let collectibles = u32::try_from(state.collectibles().len()).unwrap_or(u32::MAX);
    Ok(CustomerActivity::from_history(
        history.iter().map(|(o, l)| (o, l.as_slice())),
        collectibles,
    ))
}

#[derive(Clone)]
pub struct RewardService {
    storage: OrderStorage,
    missions: Arc<MissionCatalog>,
}

impl std::fmt::Debug for RewardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardService")
            .field("missions", &self.missions.all().len())
            .finish()
    }
}

impl RewardService {
    pub fn new(storage: OrderStorage, missions: Arc<MissionCatalog>) -> Self {
        Self { storage, missions }
    }

    pub fn missions(&self) -> &MissionCatalog {
        &self.missions
    }

    fn view(&self, customer_id: &str, state: UserRewardState) -> RewardView {
        RewardView {
            customer_id: customer_id.to_string(),
            available_discounts: state.available_discounts(&self.missions),
            state,
        }
    }

    /// Current reward state, read from the store
    pub fn state(&self, customer_id: &str) -> RewardResult<RewardView> {
        let state = self.storage.get_reward_state(customer_id)?;
        Ok(self.view(customer_id, state))
    }

    /// Redeemed, unused discounts
    pub fn available_discounts(&self, customer_id: &str) -> RewardResult<Vec<DiscountOption>> {
        let state = self.storage.get_reward_state(customer_id)?;
        Ok(state.available_discounts(&self.missions))
    }

    /// Turn a completed mission into a spendable discount
    pub fn redeem(&self, customer_id: &str, mission_id: u32) -> RewardResult<Mission> {
        let txn = self.storage.begin_write()?;
        let mut state = self.storage.get_reward_state_txn(&txn, customer_id)?;

        let mission = state.redeem(&self.missions, mission_id)?.clone();

        self.storage.store_reward_state(&txn, customer_id, &state)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            customer_id = %customer_id,
            mission_id,
            reward_percent = mission.reward_percent,
            "Mission reward redeemed"
        );
        Ok(mission)
    }

    /// Record a collectible and re-evaluate missions
    pub fn unlock_collectible(
        &self,
        customer_id: &str,
        collectible_id: &str,
    ) -> RewardResult<RewardView> {
        let txn = self.storage.begin_write()?;
        let mut state = self.storage.get_reward_state_txn(&txn, customer_id)?;

        if !state.unlock_collectible(collectible_id) {
            // Already owned; nothing to write
            drop(txn);
            return Ok(self.view(customer_id, state));
        }

        let activity = activity_txn(&self.storage, &txn, customer_id, &state)?;
        let newly_completed = state.evaluate_completion(&self.missions, &activity);

        self.storage.store_reward_state(&txn, customer_id, &state)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            customer_id = %customer_id,
            collectible_id = %collectible_id,
            newly_completed = ?newly_completed,
            "Collectible unlocked"
        );
        Ok(self.view(customer_id, state))
    }
}
