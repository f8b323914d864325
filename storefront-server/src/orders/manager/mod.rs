//! OrdersManager - order creation and status transitions
//!
//! # Create Flow
//!
//! ```text
//! create(summary)
//!     ├─ 1. Begin write transaction
//!     ├─ 2. Allocate order number (PED-xxxxx)
//!     ├─ 3. Persist order + lines
//!     ├─ 4. Consume discount (mission id) in the customer's reward state
//!     │       └─ failure → drop transaction, nothing is persisted
//!     ├─ 5. Recompute activity, evaluate mission completion
//!     ├─ 6. Persist reward state
//!     ├─ 7. Commit transaction
//!     └─ 8. Broadcast OrderEvent::Created
//! ```
//!
//! Transitions are single-record updates checked against
//! [`transitions::is_allowed`](super::transitions::is_allowed). Concurrent
//! legal transitions are last-write-wins.

mod error;
pub use error::*;

use super::storage::{OrderSnapshot, OrderStorage, StorageError};
use super::transitions;
use crate::checkout::CheckoutSummary;
use crate::rewards::{LedgerError, MissionCatalog, service::activity_txn};
use serde::Serialize;
use shared::models::{Order, OrderDetail, OrderFilter, OrderLine, OrderStatus};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Order number prefix
const ORDER_NUMBER_PREFIX: &str = "PED";

/// Events emitted after a successful commit
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    Created {
        order: Order,
        lines: Vec<OrderLine>,
    },
    StatusChanged {
        order_id: String,
        number: String,
        from: OrderStatus,
        to: OrderStatus,
        at: i64,
    },
}

pub fn format_order_number(n: u64) -> String {
    format!("{}-{:05}", ORDER_NUMBER_PREFIX, n)
}

pub struct OrdersManager {
    storage: OrderStorage,
    missions: Arc<MissionCatalog>,
    event_tx: broadcast::Sender<OrderEvent>,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<OrderStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl OrdersManager {
    pub fn new(storage: OrderStorage, missions: Arc<MissionCatalog>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            missions,
            event_tx,
        }
    }

    /// Create an OrdersManager with the standard missions (for testing)
    #[cfg(test)]
    pub fn with_storage(storage: OrderStorage) -> Self {
        Self::new(storage, Arc::new(MissionCatalog::standard()))
    }

    /// Subscribe to event broadcasts
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    fn broadcast(&self, event: OrderEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!("Order event dropped: no active receivers");
        }
    }

    /// Persist an order from a finalized checkout
    ///
    /// Order, lines and the discount consume are one failure-atomic unit.
    pub fn create(&self, summary: &CheckoutSummary) -> ManagerResult<OrderDetail> {
        if summary.lines.is_empty() {
            return Err(ManagerError::EmptyOrder);
        }
        let customer_id = summary.customer.customer_id.as_str();

        let txn = self.storage.begin_write()?;

        let number = format_order_number(self.storage.next_order_number(&txn)?);
        let now = shared::util::now_millis();
        let order = Order {
            id: shared::util::new_id(),
            number,
            customer: summary.customer.clone(),
            total: summary.final_total,
            subtotal: summary.subtotal,
            payment_method: summary.payment_method,
            branch: summary.branch,
            logistics: summary.logistics.clone(),
            bulk_volume_liters: summary.bulk_volume_liters,
            status: OrderStatus::InProgress,
            discount_percent: summary.discount_percent,
            mission_id: summary.mission_id,
            created_at: now,
            updated_at: now,
        };
        let lines: Vec<OrderLine> = summary
            .lines
            .iter()
            .zip(0u32..)
            .map(|(l, line_no)| OrderLine {
                order_id: order.id.clone(),
                line_no,
                product_id: l.product_id.clone(),
                product_name: l.product_name.clone(),
                category: l.category,
                unit_price: l.unit_price,
                quantity: l.quantity,
                add_ons: l.add_ons.clone(),
            })
            .collect();

        self.storage.store_order(&txn, &order)?;
        self.storage.store_lines(&txn, &lines)?;

        let mut state = self.storage.get_reward_state_txn(&txn, customer_id)?;
        if let Some(mission_id) = summary.mission_id
            && let Err(e) = state.consume(mission_id)
        {
            // Dropping the transaction discards the order and lines
            drop(txn);
            tracing::warn!(
                customer_id = %customer_id,
                mission_id,
                error = %e,
                "Order rejected: discount cannot be consumed"
            );
            return Err(match e {
                LedgerError::AlreadyUsed(id) => ManagerError::DiscountAlreadyConsumed(id),
                _ => ManagerError::DiscountUnavailable(mission_id),
            });
        }

        let activity = activity_txn(&self.storage, &txn, customer_id, &state)?;
        let newly_completed = state.evaluate_completion(&self.missions, &activity);
        self.storage.store_reward_state(&txn, customer_id, &state)?;

        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            order_id = %order.id,
            number = %order.number,
            customer_id = %customer_id,
            total = order.total,
            mission_id = ?order.mission_id,
            newly_completed = ?newly_completed,
            "Order created"
        );

        self.broadcast(OrderEvent::Created {
            order: order.clone(),
            lines: lines.clone(),
        });

        Ok(OrderDetail { order, lines })
    }

    /// Move an order to `target`
    ///
    /// Only the edges in [`transitions`](super::transitions) are accepted;
    /// anything else leaves the stored status unchanged.
    pub fn transition(&self, order_id: &str, target: OrderStatus) -> ManagerResult<Order> {
        let txn = self.storage.begin_write()?;
        let mut order = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;

        let from = order.status;
        if !transitions::is_allowed(from, target) {
            return Err(ManagerError::InvalidTransition {
                order_id: order_id.to_string(),
                from,
                to: target,
            });
        }

        order.status = target;
        order.updated_at = shared::util::now_millis();
        self.storage.store_order(&txn, &order)?;
        txn.commit().map_err(StorageError::from)?;

        if transitions::is_reopen(from, target) {
            tracing::info!(order_id = %order_id, from = ?from, "Order reopened");
        } else {
            tracing::info!(order_id = %order_id, from = ?from, status = ?target, "Order status changed");
        }

        self.broadcast(OrderEvent::StatusChanged {
            order_id: order.id.clone(),
            number: order.number.clone(),
            from,
            to: target,
            at: order.updated_at,
        });

        Ok(order)
    }

    /// Get an order with its lines
    pub fn get(&self, order_id: &str) -> ManagerResult<OrderDetail> {
        let order = self
            .storage
            .get_order(order_id)?
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
        let lines = self.storage.get_lines(order_id)?;
        Ok(OrderDetail { order, lines })
    }

    /// Orders matching `filter`, newest first
    pub fn list(&self, filter: &OrderFilter) -> ManagerResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .storage
            .get_all_orders()?
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.number.cmp(&a.number))
        });
        Ok(orders)
    }

    /// Point-in-time copy of all orders and lines (for metrics)
    pub fn snapshot(&self) -> ManagerResult<OrderSnapshot> {
        Ok(self.storage.snapshot()?)
    }
}

#[cfg(test)]
mod tests;
