//! Checkout
//!
//! - [`calculator`]: builds a [`CheckoutSummary`] from a cart and the form
//! - [`money`]: decimal helpers shared with the cart

pub mod calculator;
mod error;
pub mod money;

pub use calculator::{
    CheckoutDetails, CheckoutSummary, DiscountChoice, LogisticsInput, SummaryLine, build_summary,
    select_discount,
};
pub use error::{CheckoutError, CheckoutResult};
