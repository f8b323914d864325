//! Order API
//!
//! Customers see their own orders; listing everything and moving status
//! is staff-only.
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | GET | staff |
//! | /api/orders/mine | GET | customer |
//! | /api/orders/{id} | GET | owner or staff |
//! | /api/orders/{id}/transition | POST | staff |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/mine", get(handler::mine))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/transition", post(handler::transition))
}
