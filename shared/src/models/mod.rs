//! Data models
//!
//! Shared between the storefront server and its clients (via API).
//! Money fields are `f64` rounded to cents; arithmetic happens on
//! `rust_decimal::Decimal` inside the server.

pub mod branch;
pub mod mission;
pub mod order;
pub mod product;

// Re-exports
pub use branch::*;
pub use mission::*;
pub use order::*;
pub use product::*;
