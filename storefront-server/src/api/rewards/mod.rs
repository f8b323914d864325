//! Rewards API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/rewards/missions | GET | none |
//! | /api/rewards/me | GET | customer |
//! | /api/rewards/missions/{id}/redeem | POST | customer |
//! | /api/rewards/collectibles/{id} | POST | customer |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/rewards", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/missions", get(handler::list_missions))
        .route("/me", get(handler::my_rewards))
        .route("/missions/{id}/redeem", post(handler::redeem))
        .route("/collectibles/{id}", post(handler::unlock_collectible))
}
