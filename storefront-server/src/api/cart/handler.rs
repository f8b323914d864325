//! Cart API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::cart::{Cart, CartLine, CartLineInput};
use crate::checkout::money::to_f64;
use crate::core::ServerState;
use crate::utils::validation::{MAX_CART_LINES, validate_request};
use crate::utils::{ApiResponse, AppResult, ok};

/// Client-side cart contents
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CartRequest {
    #[serde(default)]
    #[validate(length(max = MAX_CART_LINES), nested)]
    pub lines: Vec<CartLineInput>,
}

impl CartRequest {
    /// Validate and resolve against the catalog
    pub fn into_cart(&self, state: &ServerState) -> AppResult<Cart> {
        validate_request(self)?;
        Ok(Cart::from_inputs(state.catalog.as_ref(), &self.lines)?)
    }
}

#[derive(Debug, Serialize)]
pub struct EvaluatedCart {
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub item_count: u32,
    pub total_volume_liters: f64,
    pub bulk_volume_liters: f64,
    /// Checkout will ask for event logistics
    pub requires_event_logistics: bool,
}

pub async fn evaluate(
    State(state): State<ServerState>,
    Json(payload): Json<CartRequest>,
) -> AppResult<ApiResponse<EvaluatedCart>> {
    let cart = payload.into_cart(&state)?;
    Ok(ok(EvaluatedCart {
        subtotal: to_f64(cart.subtotal()),
        item_count: cart.item_count(),
        total_volume_liters: cart.total_volume_liters(None),
        bulk_volume_liters: cart.bulk_volume_liters(),
        requires_event_logistics: cart.has_bulk(),
        lines: cart.lines().to_vec(),
    }))
}
