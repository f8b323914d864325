//! Shared helpers
//!
//! - [`AppError`], [`ApiResponse`]: from `shared::error`
//! - [`logger`]: tracing setup
//! - [`time`]: business time zone helpers
//! - [`validation`]: request validation

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{ok, ok_with_message};
