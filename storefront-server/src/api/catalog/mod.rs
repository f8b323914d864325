//! Catalog API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/catalog/products | GET | none |
//! | /api/catalog/products/{id} | GET | none |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/catalog", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/products", get(handler::list_products))
        .route("/products/{id}", get(handler::get_product))
}
