//! Checkout API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/checkout/quote | POST | customer |
//! | /api/checkout/submit | POST | customer |
//!
//! # Submit flow
//!
//! ```text
//! lines + form ─► Cart ─► build_summary ─► OrdersManager::create (one txn)
//!                                                   │
//!                                    OrderMessage ─► MessagingRelay (best effort)
//! ```

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/quote", post(handler::quote))
        .route("/submit", post(handler::submit))
}
