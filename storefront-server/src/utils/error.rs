//! Error and response types
//!
//! Re-exports the unified error system from `shared` plus response helpers.
//!
//! ```ignore
//! // Error
//! Err(AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id))
//!
//! // Success
//! Ok(ok(order))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Successful response with data
pub fn ok<T: serde::Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse::success(data)
}

/// Successful response with a custom message
pub fn ok_with_message<T: serde::Serialize>(data: T, message: impl Into<String>) -> ApiResponse<T> {
    let mut response = ApiResponse::success(data);
    response.message = message.into();
    response
}
