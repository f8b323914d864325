//! Rewards API Handlers

use axum::extract::{Path, State};
use serde::Serialize;
use shared::models::Mission;

use crate::core::ServerState;
use crate::identity::CustomerIdentity;
use crate::rewards::RewardView;
use crate::utils::validation::MAX_SHORT_TEXT_LEN;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

#[derive(Debug, Serialize)]
pub struct RedeemResponse {
    pub mission: Mission,
    pub rewards: RewardView,
}

pub async fn list_missions(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Mission>>> {
    Ok(ok(state.missions.all().to_vec()))
}

/// Caller's reward sets and spendable discounts
pub async fn my_rewards(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
) -> AppResult<ApiResponse<RewardView>> {
    Ok(ok(state.rewards.state(&identity.customer_id)?))
}

pub async fn redeem(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Path(mission_id): Path<u32>,
) -> AppResult<ApiResponse<RedeemResponse>> {
    let mission = state.rewards.redeem(&identity.customer_id, mission_id)?;
    let rewards = state.rewards.state(&identity.customer_id)?;
    Ok(ok(RedeemResponse { mission, rewards }))
}

pub async fn unlock_collectible(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Path(collectible_id): Path<String>,
) -> AppResult<ApiResponse<RewardView>> {
    let collectible_id = collectible_id.trim();
    if collectible_id.is_empty() || collectible_id.len() > MAX_SHORT_TEXT_LEN as usize {
        return Err(AppError::validation("Invalid collectible id")
            .with_detail("field", "collectible_id"));
    }
    Ok(ok(state
        .rewards
        .unlock_collectible(&identity.customer_id, collectible_id)?))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{TestApp, request};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_missions_are_public() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request("GET", "/api/rewards/missions", None, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        let missions = body["data"].as_array().unwrap();
        assert_eq!(missions.len(), 5);
        assert_eq!(missions[2]["reward_percent"], 15);
    }

    #[tokio::test]
    async fn test_collectibles_complete_and_redeem() {
        let app = TestApp::new();
        for sticker in ["s1", "s2", "s3", "s4", "s5", "s5"] {
            let uri = format!("/api/rewards/collectibles/{sticker}");
            let (status, _) = app.send(request("POST", &uri, Some("c-9"), None)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, me) = app
            .send(request("GET", "/api/rewards/me", Some("c-9"), None))
            .await;
        assert_eq!(me["data"]["state"]["completed"], json!([2]));

        let (status, body) = app
            .send(request("POST", "/api/rewards/missions/2/redeem", Some("c-9"), None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mission"]["id"], 2);
        assert_eq!(
            body["data"]["rewards"]["available_discounts"][0]["percent"],
            10
        );

        let (status, body) = app
            .send(request("POST", "/api/rewards/missions/2/redeem", Some("c-9"), None))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5003);
    }

    #[tokio::test]
    async fn test_redeem_errors() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request("POST", "/api/rewards/missions/1/redeem", Some("c-1"), None))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5002);

        let (status, body) = app
            .send(request("POST", "/api/rewards/missions/42/redeem", Some("c-1"), None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 5001);
    }
}
