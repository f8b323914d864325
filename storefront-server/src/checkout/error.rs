use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Every required field that is absent, in form order
    #[error("Checkout is incomplete, missing: {}", missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Discount from mission {0} is not available")]
    DiscountUnavailable(u32),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Incomplete { ref missing } => {
                AppError::with_message(ErrorCode::IncompleteCheckout, err.to_string())
                    .with_detail("missing", missing.clone())
            }
            CheckoutError::InvalidField { field, ref reason } => {
                AppError::with_message(ErrorCode::ValidationFailed, reason.clone())
                    .with_detail("field", field)
            }
            CheckoutError::DiscountUnavailable(id) => {
                AppError::with_message(ErrorCode::DiscountUnavailable, err.to_string())
                    .with_detail("mission_id", id)
            }
        }
    }
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;
