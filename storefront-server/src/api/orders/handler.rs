//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderDetail, OrderFilter, OrderStatus};

use crate::core::ServerState;
use crate::identity::{CustomerIdentity, StaffAccess};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: OrderStatus,
}

/// All orders matching the filter, newest first
pub async fn list(
    State(state): State<ServerState>,
    StaffAccess(_staff): StaffAccess,
    Query(filter): Query<OrderFilter>,
) -> AppResult<ApiResponse<Vec<Order>>> {
    Ok(ok(state.orders.list(&filter)?))
}

/// Caller's own orders, newest first
pub async fn mine(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
) -> AppResult<ApiResponse<Vec<Order>>> {
    let filter = OrderFilter {
        customer_id: Some(identity.customer_id),
        ..Default::default()
    };
    Ok(ok(state.orders.list(&filter)?))
}

/// Order with lines; other customers' orders read as missing
pub async fn get_by_id(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderDetail>> {
    let detail = state.orders.get(&id)?;
    if !identity.is_staff() && detail.order.customer.customer_id != identity.customer_id {
        return Err(AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id));
    }
    Ok(ok(detail))
}

pub async fn transition(
    State(state): State<ServerState>,
    StaffAccess(staff): StaffAccess,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.transition(&id, payload.status)?;
    tracing::info!(
        order_id = %order.id,
        staff_id = %staff.customer_id,
        status = ?order.status,
        "Order status updated by staff"
    );
    Ok(ok(order))
}
