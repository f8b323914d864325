//! Checkout API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::OrderDetail;
use validator::Validate;

use crate::cart::{Cart, CartLineInput};
use crate::checkout::{CheckoutDetails, CheckoutSummary, build_summary};
use crate::core::ServerState;
use crate::identity::CustomerIdentity;
use crate::relay::{DeliveryHandle, OrderMessage};
use crate::rewards::DiscountOption;
use crate::utils::validation::{MAX_CART_LINES, validate_request};
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[serde(default)]
    #[validate(length(max = MAX_CART_LINES), nested)]
    pub lines: Vec<CartLineInput>,
    #[serde(default)]
    #[validate(nested)]
    pub details: CheckoutDetails,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub summary: CheckoutSummary,
    /// Discount menu for the form
    pub available_discounts: Vec<DiscountOption>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub order: OrderDetail,
    /// `None` when the relay failed; the order stands regardless
    pub delivery: Option<DeliveryHandle>,
}

fn summarize(
    state: &ServerState,
    identity: &CustomerIdentity,
    payload: &CheckoutRequest,
) -> AppResult<(CheckoutSummary, Vec<DiscountOption>)> {
    validate_request(payload)?;
    let cart = Cart::from_inputs(state.catalog.as_ref(), &payload.lines)?;
    let available = state.rewards.available_discounts(&identity.customer_id)?;
    let summary = build_summary(&cart, &payload.details, identity, &available)?;
    Ok((summary, available))
}

/// Price a checkout without persisting anything
pub async fn quote(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<ApiResponse<QuoteResponse>> {
    let (summary, available_discounts) = summarize(&state, &identity, &payload)?;
    Ok(ok(QuoteResponse {
        summary,
        available_discounts,
    }))
}

/// Persist the order, then hand it to the branch relay
pub async fn submit(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<ApiResponse<SubmitResponse>> {
    let (summary, _) = summarize(&state, &identity, &payload)?;
    let order = state.orders.create(&summary)?;

    let text = OrderMessage::new(&order.order, &order.lines).render();
    let destination = state.destinations().for_branch(order.order.branch);
    let delivery = match state.relay.deliver(destination, &text).await {
        Ok(handle) => {
            tracing::info!(
                order_id = %order.order.id,
                channel = %handle.channel,
                "Order relayed to branch"
            );
            Some(handle)
        }
        Err(e) => {
            tracing::warn!(
                order_id = %order.order.id,
                branch = ?order.order.branch,
                error = %e,
                "Order relay failed; order is kept"
            );
            None
        }
    };

    Ok(ok(SubmitResponse { order, delivery }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{TestApp, request};
    use crate::relay::RecordingRelay;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    fn event_order(discount: Value) -> Value {
        json!({
            "lines": [
                { "product_id": "keg-pilsen-30", "quantity": 1 },
                { "product_id": "growler-pilsen-cristal-1l", "quantity": 2 }
            ],
            "details": {
                "branch": "marechal_candido_rondon",
                "payment_method": "pix",
                "logistics": {
                    "event_address": "Salão Paroquial",
                    "event_date": "2026-12-24",
                    "event_time": "19:30",
                    "voltage": "220v"
                },
                "discount": discount
            }
        })
    }

    #[tokio::test]
    async fn test_submit_redeem_then_discounted_order() {
        let app = TestApp::new();

        // First bulk order completes missions 1 and 3
        let (status, body) = app
            .send(request(
                "POST",
                "/api/checkout/submit",
                Some("c-1"),
                Some(event_order(json!({ "mode": "auto" }))),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["order"]["total"], 484.0);
        assert_eq!(body["data"]["order"]["number"], "PED-00001");
        assert_eq!(body["data"]["delivery"]["channel"], "recording");

        let (status, _) = app
            .send(request("POST", "/api/rewards/missions/3/redeem", Some("c-1"), None))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, quote) = app
            .send(request(
                "POST",
                "/api/checkout/quote",
                Some("c-1"),
                Some(event_order(json!({ "mode": "auto" }))),
            ))
            .await;
        assert_eq!(quote["data"]["summary"]["final_total"], 411.4);
        assert_eq!(quote["data"]["available_discounts"][0]["mission_id"], 3);

        let (status, body) = app
            .send(request(
                "POST",
                "/api/checkout/submit",
                Some("c-1"),
                Some(event_order(json!({ "mode": "mission", "mission_id": 3 }))),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let order = &body["data"]["order"];
        assert_eq!(order["total"], 411.4);
        assert_eq!(order["discount_percent"], 15);
        assert_eq!(order["status"], "in_progress");
        assert_eq!(order["lines"].as_array().unwrap().len(), 2);

        // Spent discount cannot be selected again
        let (status, body) = app
            .send(request(
                "POST",
                "/api/checkout/submit",
                Some("c-1"),
                Some(event_order(json!({ "mode": "mission", "mission_id": 3 }))),
            ))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 5006);

        let sent = app.relay.sent.lock();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].1.contains("*Novo Pedido PED-00002*"));
        assert!(sent[1].1.contains("Desconto: 15%"));
    }

    #[tokio::test]
    async fn test_submit_incomplete_lists_missing() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request("POST", "/api/checkout/submit", Some("c-1"), Some(json!({}))))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 4003);
        let missing = body["details"]["missing"].as_array().unwrap();
        for field in ["cart", "branch", "payment_method", "delivery_address"] {
            assert!(missing.contains(&json!(field)), "missing {field}: {missing:?}");
        }
    }

    #[tokio::test]
    async fn test_submit_survives_relay_failure() {
        let app = TestApp::with_relay(RecordingRelay::failing());
        let (status, body) = app
            .send(request(
                "POST",
                "/api/checkout/submit",
                Some("c-1"),
                Some(event_order(json!({ "mode": "none" }))),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["delivery"].is_null());
        let order_id = body["data"]["order"]["id"].as_str().unwrap();
        assert!(app.state.orders.get(order_id).is_ok());
    }

    #[tokio::test]
    async fn test_checkout_requires_identity() {
        let app = TestApp::new();
        let (status, body) = app
            .send(request(
                "POST",
                "/api/checkout/quote",
                None,
                Some(event_order(json!({ "mode": "none" }))),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], 10);
    }
}
