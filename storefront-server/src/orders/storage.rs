//! redb-based record store for orders and reward state
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` | Order records (never deleted) |
//! | `order_lines` | `(order_id, line_no)` | `OrderLine` | Lines, written with the order |
//! | `reward_states` | `customer_id` | `UserRewardState` | Mission progress per customer |
//! | `counters` | name | `u64` | Order number sequence |
//!
//! # Atomicity
//!
//! redb serialises write transactions. Every mutation that must be
//! failure-atomic (order + lines + discount consume) runs inside a single
//! [`WriteTransaction`] obtained from [`OrderStorage::begin_write`]; dropping
//! the transaction without committing discards all of it.

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderLine};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::rewards::UserRewardState;

/// key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// key = (order_id, line_no), value = JSON-serialized OrderLine
const ORDER_LINES_TABLE: TableDefinition<(&str, u32), &[u8]> = TableDefinition::new("order_lines");

/// key = customer_id, value = JSON-serialized UserRewardState
const REWARD_STATES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reward_states");

/// key = counter name, value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const ORDER_NUMBER_KEY: &str = "order_number";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Map a storage error onto an error code
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    if let StorageError::Serialization(_) = e {
        return ErrorCode::InternalError;
    }

    // redb errors are classified by message
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return ErrorCode::StorageFull;
    }

    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return ErrorCode::StorageCorrupted;
    }

    // Database/Transaction/Table/Storage/Commit errors are usually transient
    ErrorCode::SystemBusy
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let code = classify_storage_error(&err);
        tracing::error!(error = %err, error_code = ?code, "Storage error occurred");
        AppError::with_message(code, err.to_string())
    }
}

/// Consistent view of all orders and lines, read in one transaction
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    pub orders: Vec<Order>,
    pub lines: Vec<OrderLine>,
}

/// Record store backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path
    ///
    /// redb commits are durable once `commit()` returns (copy-on-write with
    /// an atomic root swap), so a crash never leaves a half-written order.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_LINES_TABLE)?;
            let _ = write_txn.open_table(REWARD_STATES_TABLE)?;

            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(ORDER_NUMBER_KEY)?.is_none() {
                counters.insert(ORDER_NUMBER_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Order Number ==========

    /// Increment and return the order number counter (within transaction)
    pub fn next_order_number(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table
            .get(ORDER_NUMBER_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(ORDER_NUMBER_KEY, next)?;
        Ok(next)
    }

    /// Current order number (read-only)
    pub fn current_order_number(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COUNTERS_TABLE)?;
        Ok(table
            .get(ORDER_NUMBER_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0))
    }

    // ========== Orders ==========

    /// Insert or overwrite an order
    pub fn store_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get an order by id
    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by id (within transaction)
    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all orders
    pub fn get_all_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    /// Orders placed by one customer (within transaction)
    pub fn get_customer_orders_txn(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
    ) -> StorageResult<Vec<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: Order = serde_json::from_slice(value.value())?;
            if order.customer.customer_id == customer_id {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    // ========== Order Lines ==========

    /// Store the lines of an order, keyed by their `line_no`
    pub fn store_lines(&self, txn: &WriteTransaction, lines: &[OrderLine]) -> StorageResult<()> {
        let mut table = txn.open_table(ORDER_LINES_TABLE)?;
        for line in lines {
            let value = serde_json::to_vec(line)?;
            table.insert((line.order_id.as_str(), line.line_no), value.as_slice())?;
        }
        Ok(())
    }

    /// Get the lines of an order, ordered by `line_no`
    pub fn get_lines(&self, order_id: &str) -> StorageResult<Vec<OrderLine>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDER_LINES_TABLE)?;

        let mut lines = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            lines.push(serde_json::from_slice(value.value())?);
        }
        Ok(lines)
    }

    /// Get the lines of an order (within transaction)
    pub fn get_lines_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Vec<OrderLine>> {
        let table = txn.open_table(ORDER_LINES_TABLE)?;

        let mut lines = Vec::new();
        for result in table.range((order_id, 0u32)..=(order_id, u32::MAX))? {
            let (_key, value) = result?;
            lines.push(serde_json::from_slice(value.value())?);
        }
        Ok(lines)
    }

    /// Point-in-time copy of every order and line
    pub fn snapshot(&self) -> StorageResult<OrderSnapshot> {
        let read_txn = self.db.begin_read()?;
        let orders_table = read_txn.open_table(ORDERS_TABLE)?;
        let lines_table = read_txn.open_table(ORDER_LINES_TABLE)?;

        let mut snapshot = OrderSnapshot::default();
        for result in orders_table.iter()? {
            let (_key, value) = result?;
            snapshot.orders.push(serde_json::from_slice(value.value())?);
        }
        for result in lines_table.iter()? {
            let (_key, value) = result?;
            snapshot.lines.push(serde_json::from_slice(value.value())?);
        }
        Ok(snapshot)
    }

    // ========== Reward State ==========

    /// Get a customer's reward state; customers without one start empty
    pub fn get_reward_state(&self, customer_id: &str) -> StorageResult<UserRewardState> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REWARD_STATES_TABLE)?;

        match table.get(customer_id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(UserRewardState::default()),
        }
    }

    /// Get a customer's reward state (within transaction)
    pub fn get_reward_state_txn(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
    ) -> StorageResult<UserRewardState> {
        let table = txn.open_table(REWARD_STATES_TABLE)?;

        match table.get(customer_id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(UserRewardState::default()),
        }
    }

    /// Store a customer's reward state
    pub fn store_reward_state(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
        state: &UserRewardState,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(REWARD_STATES_TABLE)?;
        let value = serde_json::to_vec(state)?;
        table.insert(customer_id, value.as_slice())?;
        Ok(())
    }

    // ========== Stats ==========

    /// Get storage statistics
    pub fn get_stats(&self) -> StorageResult<StorageStats> {
        let read_txn = self.db.begin_read()?;

        let orders_table = read_txn.open_table(ORDERS_TABLE)?;
        let lines_table = read_txn.open_table(ORDER_LINES_TABLE)?;
        let rewards_table = read_txn.open_table(REWARD_STATES_TABLE)?;
        let counters_table = read_txn.open_table(COUNTERS_TABLE)?;

        Ok(StorageStats {
            order_count: orders_table.len()?,
            line_count: lines_table.len()?,
            reward_state_count: rewards_table.len()?,
            last_order_number: counters_table
                .get(ORDER_NUMBER_KEY)?
                .map(|guard| guard.value())
                .unwrap_or(0),
        })
    }
}

/// Storage statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageStats {
    pub order_count: u64,
    pub line_count: u64,
    pub reward_state_count: u64,
    pub last_order_number: u64,
}
