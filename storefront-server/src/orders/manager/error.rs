use super::super::storage::StorageError;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order {order_id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Discount from mission {0} was already used on another order")]
    DiscountAlreadyConsumed(u32),

    #[error("Discount from mission {0} is not redeemed")]
    DiscountUnavailable(u32),

    #[error("Order has no lines")]
    EmptyOrder,
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => e.into(),
            ManagerError::OrderNotFound(ref id) => {
                AppError::with_message(ErrorCode::OrderNotFound, err.to_string())
                    .with_detail("order_id", id.clone())
            }
            ManagerError::InvalidTransition {
                ref order_id,
                from,
                to,
            } => AppError::with_message(ErrorCode::InvalidTransition, err.to_string())
                .with_detail("order_id", order_id.clone())
                .with_detail("from", serde_json::to_value(from).unwrap_or_default())
                .with_detail("to", serde_json::to_value(to).unwrap_or_default()),
            ManagerError::DiscountAlreadyConsumed(id) => {
                AppError::with_message(ErrorCode::DiscountAlreadyConsumed, err.to_string())
                    .with_detail("mission_id", id)
            }
            ManagerError::DiscountUnavailable(id) => {
                AppError::with_message(ErrorCode::DiscountUnavailable, err.to_string())
                    .with_detail("mission_id", id)
            }
            ManagerError::EmptyOrder => {
                AppError::with_message(ErrorCode::IncompleteCheckout, err.to_string())
                    .with_detail("missing", vec!["cart"])
            }
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
