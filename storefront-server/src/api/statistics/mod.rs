//! Statistics API (staff)
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/statistics | GET | staff |
//!
//! Query: `top` (top product count, default 3), `date` (last day of the
//! 7-day window, `YYYY-MM-DD`, default today in the business time zone).

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/statistics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get_statistics))
}
