//! Catalog API Handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::models::{Product, ProductCategory};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<ProductCategory>,
}

/// List products, optionally by category
pub async fn list_products(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = state
        .catalog
        .list_products()
        .into_iter()
        .filter(|p| query.category.is_none_or(|c| p.category == c))
        .collect();
    Ok(ok(products))
}

/// Get product by id
pub async fn get_product(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Product>> {
    let product = state.catalog.get_product(&id).ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {} not found", id))
            .with_detail("product_id", id.clone())
    })?;
    Ok(ok(product))
}
