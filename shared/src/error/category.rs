//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// How a failure is surfaced to the caller
///
/// - `Validation`: missing or invalid input, shown inline for correction
/// - `StateConflict`: illegal transition or reward already spent, "try again"
/// - `NotFound`: unknown order, mission or product
/// - `StoreFailure`: record store or relay unavailable, generic retry prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Not an error
    Success,
    /// Invalid or incomplete input
    Validation,
    /// Operation conflicts with current state
    StateConflict,
    /// Referenced entity does not exist
    NotFound,
    /// Infrastructure failure
    StoreFailure,
}

impl ErrorCategory {
    /// Determine category from an error code
    pub fn from_code(code: ErrorCode) -> Self {
        use ErrorCode::*;
        match code {
            Success => Self::Success,

            NotFound | OrderNotFound | MissionNotFound | ProductNotFound => Self::NotFound,

            AlreadyExists
            | InvalidTransition
            | DiscountAlreadyConsumed
            | MissionNotCompleted
            | RewardAlreadyRedeemed
            | RewardNotRedeemed
            | RewardAlreadyUsed
            | DiscountUnavailable => Self::StateConflict,

            Unknown | InternalError | DatabaseError | ConfigError | RelayFailed | StorageFull
            | StorageCorrupted | SystemBusy => Self::StoreFailure,

            ValidationFailed | InvalidRequest | RequiredField | NotAuthenticated
            | PermissionDenied | IncompleteCheckout | InvalidQuantity => {
                Self::Validation
            }
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Validation => "validation",
            Self::StateConflict => "state_conflict",
            Self::NotFound => "not_found",
            Self::StoreFailure => "store_failure",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(*self)
    }
}
