//! Unified error codes for the storefront
//!
//! Error codes are organized by range:
//! - 0xxx: General errors
//! - 4xxx: Order and checkout errors
//! - 5xxx: Reward errors
//! - 6xxx: Catalog and cart errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes serialize as plain `u16` values so the storefront UI and the admin
/// dashboard can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Identity headers missing
    NotAuthenticated = 10,
    /// Staff role required
    PermissionDenied = 11,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested status change is not an allowed edge
    InvalidTransition = 4002,
    /// Checkout is missing required fields
    IncompleteCheckout = 4003,
    /// The discount was spent by a concurrent checkout
    DiscountAlreadyConsumed = 4005,

    // ==================== 5xxx: Reward ====================
    /// Mission id is not in the catalog
    MissionNotFound = 5001,
    /// Mission target not reached yet
    MissionNotCompleted = 5002,
    /// Mission reward already redeemed
    RewardAlreadyRedeemed = 5003,
    /// Mission reward has not been redeemed
    RewardNotRedeemed = 5004,
    /// Mission discount already applied to an order
    RewardAlreadyUsed = 5005,
    /// Selected discount is not available to this customer
    DiscountUnavailable = 5006,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Quantity outside the accepted range
    InvalidQuantity = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Record store error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Messaging relay failed
    RelayFailed = 9004,
    /// Storage full
    StorageFull = 9101,
    /// Storage corrupted
    StorageCorrupted = 9102,
    /// Store busy, retry later
    SystemBusy = 9103,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::NotAuthenticated => "Customer identity required",
            Self::PermissionDenied => "Staff access required",

            Self::OrderNotFound => "Order not found",
            Self::InvalidTransition => "Status transition not allowed",
            Self::IncompleteCheckout => "Checkout is incomplete",
            Self::DiscountAlreadyConsumed => "Discount was already used on another order",

            Self::MissionNotFound => "Mission not found",
            Self::MissionNotCompleted => "Mission not completed",
            Self::RewardAlreadyRedeemed => "Reward already redeemed",
            Self::RewardNotRedeemed => "Reward not redeemed",
            Self::RewardAlreadyUsed => "Reward already used",
            Self::DiscountUnavailable => "Discount not available",

            Self::ProductNotFound => "Product not found",
            Self::InvalidQuantity => "Invalid quantity",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::RelayFailed => "Message delivery failed",
            Self::StorageFull => "Storage full",
            Self::StorageCorrupted => "Storage corrupted",
            Self::SystemBusy => "System busy, please retry",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            10 => Ok(ErrorCode::NotAuthenticated),
            11 => Ok(ErrorCode::PermissionDenied),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidTransition),
            4003 => Ok(ErrorCode::IncompleteCheckout),
            4005 => Ok(ErrorCode::DiscountAlreadyConsumed),

            // Reward
            5001 => Ok(ErrorCode::MissionNotFound),
            5002 => Ok(ErrorCode::MissionNotCompleted),
            5003 => Ok(ErrorCode::RewardAlreadyRedeemed),
            5004 => Ok(ErrorCode::RewardNotRedeemed),
            5005 => Ok(ErrorCode::RewardAlreadyUsed),
            5006 => Ok(ErrorCode::DiscountUnavailable),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::InvalidQuantity),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::RelayFailed),
            9101 => Ok(ErrorCode::StorageFull),
            9102 => Ok(ErrorCode::StorageCorrupted),
            9103 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
