//! Order lifecycle
//!
//! - **manager**: `OrdersManager` for create / transition / list / get
//! - **storage**: redb persistence for orders, lines and reward state
//! - **transitions**: allowed status edges
//!
//! # Architecture
//!
//! ```text
//! CheckoutSummary → OrdersManager.create → Storage (redb, one txn)
//!                          ↓
//!                      Broadcast
//!                          ↓
//!                   All Subscribers
//! ```

pub mod manager;
pub mod storage;
pub mod transitions;

// Re-exports
pub use manager::{ManagerError, ManagerResult, OrderEvent, OrdersManager};
pub use storage::{OrderSnapshot, OrderStorage, StorageError, StorageResult};
