//! Cart API
//!
//! Carts live on the client; this endpoint only evaluates a submitted
//! line list against the catalog.
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/cart/evaluate | POST | none |

mod handler;

pub use handler::{CartRequest, EvaluatedCart};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/evaluate", post(handler::evaluate))
}
